use std::path::{Path, PathBuf};

/// 成果物ディレクトリを上書きする環境変数
pub const ARTIFACT_DIR_ENV: &str = "KITCHEN_ORDER_DIR";

/// キッチン名が未指定のときの既定値
pub const DEFAULT_KITCHEN_NAME: &str = "Kitchen";

/// シート名の最大文字数（xlsx の制限）
pub const SHEET_NAME_LIMIT: usize = 31;

/// 列幅の余白と上限
pub const COLUMN_WIDTH_PADDING: usize = 2;
pub const COLUMN_WIDTH_MAX: usize = 40;

/// 成果物の保存先設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub artifact_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(artifact_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifact_dir: artifact_dir.into(),
        }
    }

    /// 環境変数が設定されていればそれを、なければ既定のディレクトリを使う
    pub fn from_env_or(default_dir: &Path) -> Self {
        let dir = std::env::var_os(ARTIFACT_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| default_dir.to_path_buf());
        Self::new(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_path() {
        let config = StoreConfig::new("/tmp/uploads");
        assert_eq!(config.artifact_dir, PathBuf::from("/tmp/uploads"));
    }
}
