use std::path::Path;

use calamine::{open_workbook_auto, DataType, Reader};
use chrono::NaiveTime;

use crate::models::{AppError, CellValue, ParseResult};

use super::build_table;

pub fn parse_excel_file(path: &Path) -> Result<ParseResult, AppError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|err| AppError::Parse(format!("Excelファイルの読み込みに失敗しました: {err}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::Parse("ワークシートが見つかりませんでした。".to_string()))?
        .map_err(|err| AppError::Parse(format!("ワークシートの解析に失敗しました: {err}")))?;

    let rows = range
        .rows()
        .map(|row| row.iter().map(data_type_to_cell).collect())
        .collect();

    build_table(rows)
}

fn data_type_to_cell(cell: &DataType) -> CellValue {
    match cell {
        DataType::Empty => CellValue::empty(),
        DataType::String(s) => CellValue::Text(s.clone()),
        DataType::Float(f) => CellValue::Number(*f),
        DataType::Int(v) => CellValue::Number(*v as f64),
        DataType::Bool(v) => CellValue::Text(v.to_string()),
        DataType::DateTime(_) | DataType::DateTimeIso(_) => CellValue::Text(
            format_datetime(cell).unwrap_or_else(|| cell.to_string()),
        ),
        DataType::Error(_) => CellValue::empty(),
        _ => CellValue::Text(cell.to_string()),
    }
}

/// 日付セルを文字列にする（時刻が 0 時ちょうどなら日付のみ）
fn format_datetime(cell: &DataType) -> Option<String> {
    if let Some(datetime) = cell.as_datetime() {
        if datetime.time() == NaiveTime::MIN {
            return Some(datetime.format("%Y-%m-%d").to_string());
        }
        return Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string());
    }
    cell.as_date().map(|date| date.format("%Y-%m-%d").to_string())
}
