/// 数量文字列を数値に変換する。数値として解釈できない場合は 0 を返す。
pub fn parse_quantity(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// 文字数（バイト数ではない）で先頭から切り詰める
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

/// 列幅計算用の文字数
pub fn char_width(value: &str) -> usize {
    value.chars().count()
}

/// ファイル名に使うキッチン名（空白とパス区切り文字をアンダースコアに）
pub fn kitchen_slug(name: &str) -> String {
    name.replace([' ', '/', '\\'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("5"), 5.0);
        assert_eq!(parse_quantity(" 2.5 "), 2.5);
        assert_eq!(parse_quantity("-1"), -1.0);
        assert_eq!(parse_quantity("abc"), 0.0);
        assert_eq!(parse_quantity(""), 0.0);
        assert_eq!(parse_quantity("NaN"), 0.0);
        assert_eq!(parse_quantity("inf"), 0.0);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abc", 31), "abc");
        assert_eq!(truncate_chars(&"x".repeat(40), 31).len(), 31);
        assert_eq!(truncate_chars("食材食材", 2), "食材");
    }

    #[test]
    fn test_kitchen_slug() {
        assert_eq!(kitchen_slug("Main Kitchen"), "Main_Kitchen");
        assert_eq!(kitchen_slug("Bar"), "Bar");
        assert_eq!(kitchen_slug("../etc/x"), ".._etc_x");
        assert_eq!(kitchen_slug("a\\b c"), "a_b_c");
    }
}
