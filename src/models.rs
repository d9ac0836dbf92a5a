use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use crate::storage::artifacts::ArtifactEntry;

/// セルの値（文字列または数値）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }

    /// 表示用の文字列（整数値は小数点なし）
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::empty()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract().abs() < f64::EPSILON && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

/// 列名付きの表データ。すべての行は列数と同じ長さを持つ。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// 行の長さを列数に揃えて表を作成する（不足分は空文字で埋め、余剰分は切り捨て）
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize_with(width, CellValue::empty);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// 指定列の全セルを変換する
    pub fn map_column<F>(&mut self, index: usize, mut f: F)
    where
        F: FnMut(&CellValue) -> CellValue,
    {
        for row in self.rows.iter_mut() {
            if let Some(cell) = row.get_mut(index) {
                *cell = f(cell);
            }
        }
    }

    /// 条件を満たす行だけを残す（順序は維持）
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[CellValue]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    pub fn remove_column(&mut self, index: usize) {
        if index >= self.columns.len() {
            return;
        }
        self.columns.remove(index);
        for row in self.rows.iter_mut() {
            row.remove(index);
        }
    }

    /// 同じ列構成で行だけ差し替えた表を作る
    pub fn with_rows(&self, rows: Vec<Vec<CellValue>>) -> Self {
        Table::new(self.columns.clone(), rows)
    }

    /// 行を「列名 → 表示文字列」のマップに変換する
    pub fn records(&self) -> Vec<HashMap<String, String>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().map(CellValue::display))
                    .collect()
            })
            .collect()
    }
}

/// 表示用の列名とフォーム用の安全なキーの対応
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    pub key: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParseResult {
    pub table: Table,
    pub columns: Vec<ColumnMeta>,
}

/// アップロード後に編集画面へ渡すデータ
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadView {
    pub columns: Vec<String>,
    pub column_map: Vec<ColumnMeta>,
    pub rows: Vec<HashMap<String, String>>,
    pub master_inventories: Vec<ArtifactEntry>,
}

impl UploadView {
    pub fn new(parse: ParseResult, master_inventories: Vec<ArtifactEntry>) -> Self {
        Self {
            columns: parse.table.columns().to_vec(),
            rows: parse.table.records(),
            column_map: parse.columns,
            master_inventories,
        }
    }
}

/// 生成時の操作。"draft" 以外はすべて発注リスト生成として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "snake_case")]
pub enum OrderAction {
    Draft,
    #[default]
    Generate,
}

impl From<String> for OrderAction {
    fn from(value: String) -> Self {
        if value == "draft" {
            OrderAction::Draft
        } else {
            OrderAction::Generate
        }
    }
}

/// 編集画面から送信されるフォーム
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateForm {
    pub columns: Vec<String>,
    pub safe_columns: Vec<String>,
    pub row_count: usize,
    #[serde(default)]
    pub action: OrderAction,
    #[serde(default)]
    pub kitchen_name: Option<String>,
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GenerateResponse {
    Draft { message: String },
    #[serde(rename_all = "camelCase")]
    OrderList { file_name: String, path: String },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("ファイルの解析に失敗しました: {0}")]
    Parse(String),
    #[error("必須の列が見つかりません: {0}")]
    ColumnNotFound(String),
    #[error("ファイルが見つかりません: {0}")]
    NotFound(String),
    #[error("不正なファイル名です: {0}")]
    InvalidFileName(String),
    #[error("ワークブックの書き込みに失敗しました: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
    #[error("ファイルの入出力に失敗しました: {0}")]
    Io(#[from] std::io::Error),
}

// フロントエンドにはメッセージ文字列として渡す
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
