use std::path::Path;

use csv::ReaderBuilder;

use crate::models::{AppError, CellValue, ParseResult};

use super::build_table;

pub fn parse_csv_file(path: &Path) -> Result<ParseResult, AppError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|err| AppError::Parse(format!("CSVの読み込みに失敗しました: {err}")))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|err| AppError::Parse(format!("CSVの解析に失敗しました: {err}")))?;
        let row: Vec<CellValue> = record.iter().map(csv_cell).collect();
        rows.push(row);
    }

    build_table(rows)
}

// 数値として読める値は数値セルにする
fn csv_cell(raw: &str) -> CellValue {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && !raw.trim().is_empty() => CellValue::Number(value),
        _ => CellValue::Text(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.csv");
        std::fs::write(
            &path,
            "Item,\"Current\nStock\",Supplier\nFlour,3,Mill Co\nSalt,,\n,,\n",
        )
        .unwrap();

        let result = parse_csv_file(&path).unwrap();
        assert_eq!(result.table.columns(), &["Item", "Current Stock", "Supplier"]);
        assert_eq!(result.table.row_count(), 2);
        assert_eq!(result.table.cell(0, 1), Some(&CellValue::Number(3.0)));
        assert_eq!(result.table.cell(1, 2), Some(&CellValue::empty()));
    }
}
