//! Stock analysis document.
//!
//! The shape mirrors what the analytics pipeline produces: a handful of
//! identity columns plus nested analysis/technical blocks. Nested blocks
//! use camelCase field names because they are stored and served verbatim.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Financial ratio snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    #[serde(default)]
    pub per: Option<f64>,
    #[serde(default)]
    pub pbv: Option<f64>,
    #[serde(default)]
    pub roe: Option<f64>,
    #[serde(default)]
    pub der: Option<f64>,
    #[serde(default)]
    pub dividend_yield: Option<f64>,
    #[serde(default)]
    pub revenue_growth: Option<f64>,
    #[serde(default)]
    pub last_updated: Option<Timestamp>,
}

/// Signal conflict between fundamental and technical reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictInfo {
    pub has_conflict: bool,
    #[serde(rename = "type", default)]
    pub conflict_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Value/Quality/Safety/Growth component scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VqsgScores {
    #[serde(default)]
    pub v: Option<f64>,
    #[serde(default)]
    pub q: Option<f64>,
    #[serde(default)]
    pub s: Option<f64>,
    #[serde(default)]
    pub g: Option<f64>,
}

/// Investor-profile archetype assigned by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockProfile {
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub risk: Option<String>,
}

/// Cross-dimension synthesis verdict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Synthesis {
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub alignment: Option<String>,
}

/// Analysis block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    #[serde(default)]
    pub flexbit_score: Option<f64>,
    #[serde(default)]
    pub business_quality: Option<String>,
    #[serde(default)]
    pub timing_score: Option<f64>,
    #[serde(default)]
    pub timing_label: Option<String>,
    #[serde(default)]
    pub trend: Option<String>,
    #[serde(default)]
    pub conflict: ConflictInfo,
    #[serde(default)]
    pub investor_profile: Option<String>,
    #[serde(default)]
    pub investor_avoid: Option<String>,
    #[serde(default)]
    pub vqsg: VqsgScores,
    #[serde(default)]
    pub stock_profile: StockProfile,
    #[serde(default)]
    pub flexbit_diagnosis: Option<String>,
    #[serde(default)]
    pub flexbit_category: Option<String>,
    #[serde(default)]
    pub flexbit_strongest: Option<String>,
    #[serde(default)]
    pub flexbit_weakest: Option<String>,
    #[serde(default)]
    pub flexbit_fundamental_signal: Option<String>,
    #[serde(default)]
    pub synthesis: Synthesis,
    #[serde(default)]
    pub data_confidence: Option<String>,
    #[serde(default)]
    pub valuation_confidence: Option<String>,
    #[serde(default)]
    pub quality_confidence: Option<String>,
    #[serde(default)]
    pub safety_confidence: Option<String>,
    #[serde(default)]
    pub growth_confidence: Option<String>,
    #[serde(default)]
    pub safety_note: Option<String>,
    #[serde(default)]
    pub quality_flags: Option<String>,
    #[serde(default)]
    pub analyst_notes: Option<String>,
}

/// Entry/exit trading signals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signals {
    #[serde(default)]
    pub call: Option<String>,
    #[serde(default)]
    pub entry_price: Option<f64>,
    #[serde(default)]
    pub tp1: Option<f64>,
    #[serde(default)]
    pub tp2: Option<f64>,
    #[serde(default)]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub rsi: Option<f64>,
    #[serde(default)]
    pub rr_conservative: Option<f64>,
}

/// Technical block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technical {
    #[serde(default)]
    pub last_price: Option<f64>,
    #[serde(default)]
    pub price_change: Option<f64>,
    #[serde(default)]
    pub price_change_percent: Option<f64>,
    #[serde(default)]
    pub volume: Option<i64>,
    #[serde(default)]
    pub volume_category: Option<String>,
    #[serde(default)]
    pub week52_high: Option<f64>,
    #[serde(default)]
    pub week52_low: Option<f64>,
    #[serde(default)]
    pub position_in52_week_range: Option<f64>,
    #[serde(default)]
    pub trend: Option<String>,
    #[serde(default)]
    pub trend_strength: Option<String>,
    #[serde(default)]
    pub last_updated: Option<Timestamp>,
    #[serde(default)]
    pub signals: Signals,
}

/// Dividend block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dividend {
    #[serde(rename = "yield", default)]
    pub dividend_yield: Option<f64>,
    #[serde(default)]
    pub payout: Option<f64>,
    #[serde(default)]
    pub ex_date: Option<String>,
}

/// Analyst consensus block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalystView {
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub upside_pct: Option<f64>,
    #[serde(default)]
    pub count: Option<i64>,
}

/// Full stock analysis document, keyed by ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub ticker: String,
    pub company_name: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub is_financial_sector: bool,
    #[serde(default)]
    pub financials: Financials,
    #[serde(default)]
    pub analysis: Analysis,
    #[serde(default)]
    pub technical: Technical,
    #[serde(default)]
    pub dividend: Dividend,
    #[serde(default)]
    pub analyst: AnalystView,
    #[serde(default)]
    pub report_date: Option<Timestamp>,
}
