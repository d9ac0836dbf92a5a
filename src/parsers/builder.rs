use crate::models::{AppError, CellValue, ParseResult, Table};
use crate::utils::header::{clean_header, column_map, unique_headers};

/// 読み込んだ生の行から表を組み立てる（先頭行をヘッダーとして扱う）
pub fn build_table(rows: Vec<Vec<CellValue>>) -> Result<ParseResult, AppError> {
    let mut rows = rows.into_iter();

    let header = rows
        .next()
        .ok_or_else(|| AppError::Parse("有効なヘッダー行が見つかりませんでした。".to_string()))?;

    let headers = unique_headers(
        header
            .iter()
            .map(|cell| clean_header(&cell.display()))
            .collect(),
    );

    let mut data_rows: Vec<Vec<CellValue>> = rows.collect();

    // 末尾の完全に空白の行を削除
    while let Some(last_row) = data_rows.last() {
        if is_blank_row(last_row) {
            data_rows.pop();
        } else {
            break;
        }
    }

    let columns = column_map(&headers);

    Ok(ParseResult {
        table: Table::new(headers, data_rows),
        columns,
    })
}

fn is_blank_row(row: &[CellValue]) -> bool {
    row.iter().all(|cell| match cell {
        CellValue::Text(s) => s.trim().is_empty(),
        CellValue::Number(_) => false,
    })
}
