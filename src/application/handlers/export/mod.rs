//! CSV export handlers (Growth/Pro feature).

mod csv;
mod export_stocks;
mod export_watchlist;

pub use export_stocks::{CsvExport, ExportStocksCommand, ExportStocksHandler};
pub use export_watchlist::{ExportWatchlistCommand, ExportWatchlistHandler};
