pub mod xlsx;

pub use xlsx::{write_order_workbook, write_table_workbook, SupplierGroup};
