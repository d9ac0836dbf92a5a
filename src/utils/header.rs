use std::collections::HashMap;

use crate::models::ColumnMeta;

/// ヘッダー文字列を整形（改行を空白に置換し、前後の空白を除去）
pub fn clean_header(raw: &str) -> String {
    raw.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// フォームのフィールド名に使う安全なキーを生成（小文字化、空白をアンダースコアに）
pub fn safe_key(raw: &str) -> String {
    clean_header(raw).to_lowercase().replace(' ', "_")
}

/// 表示名と安全なキーの対応表を作成（列順を維持）
pub fn column_map(headers: &[String]) -> Vec<ColumnMeta> {
    headers
        .iter()
        .map(|name| ColumnMeta {
            name: name.clone(),
            key: safe_key(name),
        })
        .collect()
}

/// 空のヘッダーに仮名を付け、重複するヘッダーに連番を付与する
///
/// 空欄は `Unnamed: {列番号}`、重複は `Qty`, `Qty.1`, `Qty.2` のように一意化する。
pub fn unique_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut result: Vec<String> = Vec::with_capacity(headers.len());

    for (idx, header) in headers.into_iter().enumerate() {
        let base = if header.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            header
        };

        let mut candidate = base.clone();
        while let Some(count) = seen.get_mut(&candidate) {
            *count += 1;
            candidate = format!("{}.{}", base, count);
        }
        seen.insert(candidate.clone(), 0);
        seen.entry(base).or_insert(0);
        result.push(candidate);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_header() {
        assert_eq!(clean_header("Requested\nQuantity"), "Requested Quantity");
        assert_eq!(clean_header("  Supplier \r\n"), "Supplier");
        assert_eq!(clean_header("Current\r\nQty"), "Current Qty");
        assert_eq!(clean_header(""), "");
    }

    #[test]
    fn test_clean_header_removes_line_breaks() {
        for raw in ["\nItem\n", "Unit\r\nPrice ", " A\nB\rC "] {
            let cleaned = clean_header(raw);
            assert!(!cleaned.contains('\n') && !cleaned.contains('\r'));
            assert_eq!(cleaned, cleaned.trim());
        }
    }

    #[test]
    fn test_safe_key() {
        assert_eq!(safe_key("Requested\nQuantity"), "requested_quantity");
        assert_eq!(safe_key(" Item Name "), "item_name");
        assert_eq!(safe_key(""), "");
        for raw in ["Current Stock Level", "SUPPLIER", "Unit\nOf Measure"] {
            let key = safe_key(raw);
            assert!(!key.contains(' '));
            assert!(!key.chars().any(|c| c.is_uppercase()));
        }
    }

    #[test]
    fn test_column_map_keeps_order() {
        let headers = vec!["Item".to_string(), "Requested Qty".to_string()];
        let map = column_map(&headers);
        assert_eq!(map[0].key, "item");
        assert_eq!(map[1].name, "Requested Qty");
        assert_eq!(map[1].key, "requested_qty");
    }

    #[test]
    fn test_unique_headers() {
        let headers = vec![
            "Qty".to_string(),
            String::new(),
            "Qty".to_string(),
            "Qty".to_string(),
            "Qty.1".to_string(),
        ];
        assert_eq!(
            unique_headers(headers),
            vec!["Qty", "Unnamed: 1", "Qty.1", "Qty.2", "Qty.1.1"]
        );
    }
}
