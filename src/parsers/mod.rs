mod builder;
mod csv;
mod excel;
pub mod form;

use std::path::{Path, PathBuf};

use crate::models::{AppError, ParseResult};

pub use builder::build_table;
pub use form::rebuild_table;

/// 在庫表ファイルを読み込み、正規化済みヘッダー付きの表に変換する
pub fn parse_inventory_file(path: impl AsRef<Path>) -> Result<ParseResult, AppError> {
    let path = PathBuf::from(path.as_ref());

    if !path.exists() {
        return Err(AppError::Parse(format!(
            "ファイルが見つかりません: {}",
            path.display()
        )));
    }

    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .ok_or_else(|| AppError::Parse("ファイル拡張子を判定できませんでした。".to_string()))?;

    let result = match ext.as_str() {
        "csv" => csv::parse_csv_file(&path),
        "xlsx" | "xlsm" | "xls" | "ods" => excel::parse_excel_file(&path),
        other => Err(AppError::Parse(format!(
            "サポートされていないファイル形式です: {}",
            other
        ))),
    }?;

    log::info!(
        "parsed {} ({} columns, {} rows)",
        path.display(),
        result.columns.len(),
        result.table.row_count()
    );

    Ok(result)
}
