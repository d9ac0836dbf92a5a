use std::collections::HashMap;

use crate::models::{CellValue, GenerateForm, Table};

/// フォームのフィールド名（`{安全なキー}_{行番号}`）
pub fn field_name(safe_key: &str, row_index: usize) -> String {
    format!("{}_{}", safe_key, row_index)
}

/// 行ごと・列ごとのフォーム値から表を再構築する
///
/// 表示名と安全なキーは位置で対応付け、長い方の余りは無視する。
/// 値が無いセルは空文字列、値は前後の空白を除去する。
/// 同じ表示名が複数ある場合は最初の位置を使い、後の値で上書きする。
pub fn rebuild_table(
    columns: &[String],
    safe_columns: &[String],
    row_count: usize,
    fields: &HashMap<String, String>,
) -> Table {
    let pairs: Vec<(&String, &String)> = columns.iter().zip(safe_columns.iter()).collect();

    let mut headers: Vec<String> = Vec::with_capacity(pairs.len());
    let mut slots: Vec<usize> = Vec::with_capacity(pairs.len());
    for (display, _) in &pairs {
        let slot = match headers.iter().position(|h| h == *display) {
            Some(existing) => existing,
            None => {
                headers.push((*display).clone());
                headers.len() - 1
            }
        };
        slots.push(slot);
    }

    let rows = (0..row_count)
        .map(|row_index| {
            let mut row = vec![CellValue::empty(); headers.len()];
            for ((_, safe), slot) in pairs.iter().zip(slots.iter()) {
                let value = fields
                    .get(&field_name(safe, row_index))
                    .map(|value| value.trim())
                    .unwrap_or_default();
                row[*slot] = CellValue::Text(value.to_string());
            }
            row
        })
        .collect();

    Table::new(headers, rows)
}

/// 送信されたフォーム全体から表を再構築する
pub fn table_from_form(form: &GenerateForm) -> Table {
    rebuild_table(
        &form.columns,
        &form.safe_columns,
        form.row_count,
        &form.fields,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::header::safe_key;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_rebuild_table_defaults_and_trims() {
        let columns = strings(&["Item", "Requested Qty"]);
        let safe = strings(&["item", "requested_qty"]);
        let mut fields = HashMap::new();
        fields.insert("item_0".to_string(), "  Milk ".to_string());
        fields.insert("requested_qty_0".to_string(), "3".to_string());
        fields.insert("item_1".to_string(), "Eggs".to_string());

        let table = rebuild_table(&columns, &safe, 2, &fields);

        assert_eq!(table.columns(), &["Item", "Requested Qty"]);
        assert_eq!(table.cell(0, 0), Some(&CellValue::from("Milk")));
        assert_eq!(table.cell(1, 1), Some(&CellValue::empty()));
    }

    #[test]
    fn test_rebuild_table_zero_rows() {
        let table = rebuild_table(&strings(&["Item"]), &strings(&["item"]), 0, &HashMap::new());
        assert_eq!(table.columns(), &["Item"]);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_rebuild_table_ignores_unpaired_columns() {
        let table = rebuild_table(
            &strings(&["Item", "Supplier", "Extra"]),
            &strings(&["item", "supplier"]),
            1,
            &HashMap::new(),
        );
        assert_eq!(table.columns(), &["Item", "Supplier"]);
    }

    #[test]
    fn test_rebuild_table_duplicate_display_name() {
        let mut fields = HashMap::new();
        fields.insert("qty_0".to_string(), "1".to_string());
        fields.insert("qty_b_0".to_string(), "2".to_string());
        let table = rebuild_table(
            &strings(&["Qty", "Item", "Qty"]),
            &strings(&["qty", "item", "qty_b"]),
            1,
            &fields,
        );
        assert_eq!(table.columns(), &["Qty", "Item"]);
        assert_eq!(table.cell(0, 0), Some(&CellValue::from("2")));
    }

    #[test]
    fn test_round_trip_through_form_fields() {
        let original = Table::new(
            strings(&["Item Name", "Current Stock", "Supplier"]),
            vec![
                vec!["Flour".into(), CellValue::Number(12.0), "Mill Co".into()],
                vec![" Salt ".into(), CellValue::empty(), "Sea Co".into()],
            ],
        );

        // 編集画面が描画するフィールドを再現する
        let safe: Vec<String> = original.columns().iter().map(|c| safe_key(c)).collect();
        let mut fields = HashMap::new();
        for (row_index, row) in original.rows().iter().enumerate() {
            for (key, cell) in safe.iter().zip(row.iter()) {
                fields.insert(field_name(key, row_index), cell.display());
            }
        }

        let rebuilt = rebuild_table(original.columns(), &safe, original.row_count(), &fields);

        assert_eq!(rebuilt.columns(), original.columns());
        let expected: Vec<Vec<String>> = original
            .rows()
            .iter()
            .map(|row| row.iter().map(|c| c.display().trim().to_string()).collect())
            .collect();
        let actual: Vec<Vec<String>> = rebuilt
            .rows()
            .iter()
            .map(|row| row.iter().map(CellValue::display).collect())
            .collect();
        assert_eq!(actual, expected);
    }
}
