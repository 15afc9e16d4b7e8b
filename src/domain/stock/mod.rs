//! Stock domain - analysis documents produced by the import pipeline.

mod stock;

pub use stock::{
    Analysis, AnalystView, ConflictInfo, Dividend, Financials, Signals, Stock, StockProfile,
    Synthesis, Technical, VqsgScores,
};
