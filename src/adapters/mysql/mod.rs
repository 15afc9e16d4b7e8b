//! MySQL adapters - read-only access to the analytics source database.

mod import_source;

pub use import_source::MySqlStockImportSource;
