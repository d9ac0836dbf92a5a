use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::config::{COLUMN_WIDTH_MAX, COLUMN_WIDTH_PADDING, SHEET_NAME_LIMIT};
use crate::models::{AppError, CellValue, Table};
use crate::utils::text::{char_width, truncate_chars};

pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// 仕入先ごとの行グループ
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierGroup {
    pub supplier: String,
    pub table: Table,
}

/// 1シート分のセル（先頭行がヘッダー）
type Grid = Vec<Vec<CellValue>>;

/// 表全体を1シートのワークブックとして保存する（在庫マスタ・下書き用）
pub fn write_table_workbook(path: &Path, table: &Table) -> Result<(), AppError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(DEFAULT_SHEET_NAME)?;
    write_grid(worksheet, &sheet_grid(table), None)?;
    workbook.save(path)?;
    Ok(())
}

/// 仕入先ごとにシートを分けた発注リストを保存する
///
/// シート名は仕入先名を31文字に切り詰めたもの。切り詰め後に同名になった場合は
/// 先のシートに後のグループのセルを上書きする（後のグループが書かないセルは残る）。
/// すべてのセルに折り返し書式を設定し、列幅は内容の最大文字数 + 2（上限40）。
pub fn write_order_workbook(path: &Path, groups: &[SupplierGroup]) -> Result<(), AppError> {
    let mut sheets: Vec<(String, Grid)> = Vec::with_capacity(groups.len());
    for group in groups {
        let sheet_name = sheet_name_for(&group.supplier);
        let grid = sheet_grid(&group.table);
        match sheets.iter_mut().find(|(name, _)| *name == sheet_name) {
            Some((_, existing)) => {
                log::warn!(
                    "sheet name {:?} already used, overwriting cells with supplier {:?}",
                    sheet_name,
                    group.supplier
                );
                overlay(existing, grid);
            }
            None => sheets.push((sheet_name, grid)),
        }
    }

    let wrap_format = Format::new().set_text_wrap();
    let mut workbook = Workbook::new();

    for (sheet_name, grid) in &sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;
        write_grid(worksheet, grid, Some(&wrap_format))?;

        for (col, width) in column_widths(grid).into_iter().enumerate() {
            worksheet.set_column_width(col as u16, width as f64)?;
        }
    }

    workbook.save(path)?;
    log::info!("wrote order list {} ({} sheets)", path.display(), sheets.len());
    Ok(())
}

pub fn sheet_name_for(supplier: &str) -> String {
    truncate_chars(supplier, SHEET_NAME_LIMIT)
}

/// ヘッダー行とデータ行を1つのセル配列にする
pub fn sheet_grid(table: &Table) -> Grid {
    let header = table
        .columns()
        .iter()
        .map(|name| CellValue::Text(name.clone()))
        .collect();
    std::iter::once(header)
        .chain(table.rows().iter().cloned())
        .collect()
}

/// 後から書き込むセルで上書きする（書き込まれないセルはそのまま）
fn overlay(base: &mut Grid, other: Grid) {
    for (row_idx, row) in other.into_iter().enumerate() {
        if base.len() <= row_idx {
            base.resize_with(row_idx + 1, Vec::new);
        }
        let target = &mut base[row_idx];
        for (col, cell) in row.into_iter().enumerate() {
            if target.len() <= col {
                target.resize_with(col + 1, CellValue::empty);
            }
            target[col] = cell;
        }
    }
}

/// 列ごとの表示幅（ヘッダーを含む最大文字数 + 余白、上限あり）
pub fn column_widths(grid: &[Vec<CellValue>]) -> Vec<usize> {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    (0..width)
        .map(|col| {
            let longest = grid
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| char_width(&cell.display()))
                .max()
                .unwrap_or(0);
            (longest + COLUMN_WIDTH_PADDING).min(COLUMN_WIDTH_MAX)
        })
        .collect()
}

fn write_grid(
    worksheet: &mut Worksheet,
    grid: &[Vec<CellValue>],
    format: Option<&Format>,
) -> Result<(), AppError> {
    let default_format = Format::new();
    let format = format.unwrap_or(&default_format);

    for (row_idx, row) in grid.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            write_cell(worksheet, row_idx as u32, col as u16, cell, format)?;
        }
    }

    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
    format: &Format,
) -> Result<(), AppError> {
    match cell {
        CellValue::Number(n) => {
            worksheet.write_number_with_format(row, col, *n, format)?;
        }
        CellValue::Text(s) if s.is_empty() => {
            worksheet.write_blank(row, col, format)?;
        }
        CellValue::Text(s) => {
            worksheet.write_string_with_format(row, col, s, format)?;
        }
    }
    Ok(())
}
