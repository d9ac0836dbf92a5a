use std::path::PathBuf;

use chrono::NaiveDate;

use crate::exporters::{write_order_workbook, write_table_workbook, SupplierGroup};
use crate::exporters::xlsx::DEFAULT_SHEET_NAME;
use crate::models::{AppError, CellValue, OrderAction, Table};
use crate::processors::roles::{ColumnRoles, RoleResolver};
use crate::storage::artifacts::{ArtifactKind, ArtifactStore};
use crate::utils::text::parse_quantity;

/// 発注処理の結果
#[derive(Debug, Clone, PartialEq)]
pub enum OrderOutcome {
    Draft { master: PathBuf, draft: PathBuf },
    OrderList { master: PathBuf, order_list: PathBuf },
}

/// 表から在庫マスタ・下書き・発注リストを生成する
pub struct OrderPipeline<'a, R: RoleResolver> {
    store: &'a ArtifactStore,
    resolver: R,
}

impl<'a, R: RoleResolver> OrderPipeline<'a, R> {
    pub fn new(store: &'a ArtifactStore, resolver: R) -> Self {
        Self { store, resolver }
    }

    /// # 処理の流れ
    /// 1. 列の役割を判定（必須列が無ければ何も書き込まずにエラー）
    /// 2. 依頼数量を数値化（数値でなければ 0）
    /// 3. 在庫マスタを保存（常に実行）
    /// 4. 下書きなら下書きを保存して終了
    /// 5. 依頼数量 > 0 の行に絞り込み、現在庫列を削除
    /// 6. 仕入先ごとにシートを分けて発注リストを保存
    pub fn run(
        &self,
        mut table: Table,
        kitchen: &str,
        date: NaiveDate,
        action: OrderAction,
    ) -> Result<OrderOutcome, AppError> {
        let roles = self.resolver.resolve(table.columns())?;
        let requested_idx = column_index(&table, &roles.requested)?;

        coerce_requested(&mut table, requested_idx);

        let master = self
            .store
            .path_for(kitchen, date, ArtifactKind::MasterInventory);
        write_table_workbook(&master, &table)?;
        log::info!("saved master inventory {}", master.display());

        if action == OrderAction::Draft {
            let draft = self.store.path_for(kitchen, date, ArtifactKind::Draft);
            write_table_workbook(&draft, &table)?;
            log::info!("saved draft {}", draft.display());
            return Ok(OrderOutcome::Draft { master, draft });
        }

        let mut order = filter_positive(&table, requested_idx);
        prune_current(&mut order, &roles);

        let supplier_idx = column_index(&order, &roles.supplier)?;
        let mut groups = group_by_supplier(&order, supplier_idx);
        if groups.is_empty() {
            // ワークブックには最低1シート必要
            groups.push(SupplierGroup {
                supplier: DEFAULT_SHEET_NAME.to_string(),
                table: order.with_rows(Vec::new()),
            });
        }

        let order_list = self.store.path_for(kitchen, date, ArtifactKind::OrderList);
        write_order_workbook(&order_list, &groups)?;

        Ok(OrderOutcome::OrderList { master, order_list })
    }
}

fn column_index(table: &Table, name: &str) -> Result<usize, AppError> {
    table
        .column_index(name)
        .ok_or_else(|| AppError::ColumnNotFound(name.to_string()))
}

/// 依頼数量列を数値に変換する（変換できない値は 0）
pub fn coerce_requested(table: &mut Table, requested_idx: usize) {
    table.map_column(requested_idx, |cell| {
        let value = match cell {
            CellValue::Number(n) if n.is_finite() => *n,
            CellValue::Number(_) => 0.0,
            CellValue::Text(s) => parse_quantity(s),
        };
        CellValue::Number(value)
    });
}

/// 依頼数量が 0 より大きい行だけを残す（行の順序は維持）
pub fn filter_positive(table: &Table, requested_idx: usize) -> Table {
    let mut filtered = table.clone();
    filtered.retain_rows(|row| {
        row.get(requested_idx)
            .and_then(CellValue::as_number)
            .map(|qty| qty > 0.0)
            .unwrap_or(false)
    });
    filtered
}

/// 現在庫列があれば削除する
pub fn prune_current(table: &mut Table, roles: &ColumnRoles) {
    if let Some(idx) = roles
        .current
        .as_deref()
        .and_then(|name| table.column_index(name))
    {
        table.remove_column(idx);
    }
}

/// 仕入先の値ごとに行をまとめる（初出順、グループ内は元の順序）
pub fn group_by_supplier(table: &Table, supplier_idx: usize) -> Vec<SupplierGroup> {
    let mut keys: Vec<CellValue> = Vec::new();
    let mut buckets: Vec<Vec<Vec<CellValue>>> = Vec::new();

    for row in table.rows() {
        let key = row.get(supplier_idx).cloned().unwrap_or_default();
        match keys.iter().position(|existing| *existing == key) {
            Some(pos) => buckets[pos].push(row.clone()),
            None => {
                keys.push(key);
                buckets.push(vec![row.clone()]);
            }
        }
    }

    log::debug!("grouped {} rows into {} suppliers", table.row_count(), keys.len());

    keys.into_iter()
        .zip(buckets)
        .map(|(key, rows)| SupplierGroup {
            supplier: key.display(),
            table: table.with_rows(rows),
        })
        .collect()
}
