//! Background jobs.

mod stock_import;

pub use stock_import::{delay_until_next_run, spawn_daily, ImportReport, StockImportJob};
