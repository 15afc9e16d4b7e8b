//! MySQL implementation of the StockImportSource port.
//!
//! Reads the analytics pipeline's `daily_fundamentals_update` table and
//! maps each row into the stock document shape. Numeric columns are cast
//! to DOUBLE in SQL so the mapping doesn't depend on the source table's
//! exact decimal/varchar definitions.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::MySqlPool;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::stock::{
    Analysis, AnalystView, ConflictInfo, Dividend, Financials, Signals, Stock, StockProfile,
    Synthesis, Technical, VqsgScores,
};
use crate::ports::StockImportSource;

/// MySQL-backed import source.
pub struct MySqlStockImportSource {
    pool: MySqlPool,
}

impl MySqlStockImportSource {
    /// Creates a source over the given pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Flat projection of one source row.
#[derive(Debug, Default, sqlx::FromRow)]
pub(crate) struct SourceRow {
    pub(crate) ticker: String,
    pub(crate) company_name: Option<String>,
    pub(crate) sector: Option<String>,
    pub(crate) industry: Option<String>,
    pub(crate) logo: Option<String>,
    pub(crate) is_financial_sector: Option<i64>,
    pub(crate) dividend_yield: Option<f64>,
    pub(crate) dividend_payout: Option<f64>,
    pub(crate) dividend_ex_date: Option<String>,
    pub(crate) flexbit_score: Option<f64>,
    pub(crate) business_quality_label: Option<String>,
    pub(crate) timing_score: Option<f64>,
    pub(crate) timing_label: Option<String>,
    pub(crate) tech_trend: Option<String>,
    pub(crate) has_conflict: Option<String>,
    pub(crate) conflict_type: Option<String>,
    pub(crate) investor_match: Option<String>,
    pub(crate) investor_avoid: Option<String>,
    pub(crate) v_score: Option<f64>,
    pub(crate) q_score: Option<f64>,
    pub(crate) s_score: Option<f64>,
    pub(crate) g_score: Option<f64>,
    pub(crate) stock_profile_emoji: Option<String>,
    pub(crate) stock_profile_name: Option<String>,
    pub(crate) stock_profile_description: Option<String>,
    pub(crate) stock_profile_risk: Option<String>,
    pub(crate) flexbit_diagnosis: Option<String>,
    pub(crate) flexbit_category: Option<String>,
    pub(crate) flexbit_strongest: Option<String>,
    pub(crate) flexbit_weakest: Option<String>,
    pub(crate) flexbit_fundamental_signal: Option<String>,
    pub(crate) synthesis_profile: Option<String>,
    pub(crate) synthesis_description: Option<String>,
    pub(crate) synthesis_category: Option<String>,
    pub(crate) synthesis_alignment: Option<String>,
    pub(crate) data_confidence: Option<String>,
    pub(crate) valuation_confidence: Option<String>,
    pub(crate) quality_confidence: Option<String>,
    pub(crate) safety_confidence: Option<String>,
    pub(crate) growth_confidence: Option<String>,
    pub(crate) safety_note: Option<String>,
    pub(crate) quality_flags: Option<String>,
    pub(crate) analyst_notes: Option<String>,
    pub(crate) price: Option<f64>,
    pub(crate) price_change: Option<f64>,
    pub(crate) price_change_pct: Option<f64>,
    pub(crate) volume: Option<i64>,
    pub(crate) volume_category: Option<String>,
    pub(crate) week_52_high: Option<f64>,
    pub(crate) week_52_low: Option<f64>,
    pub(crate) position_in_52week_range: Option<f64>,
    pub(crate) trend_strength: Option<String>,
    pub(crate) tech_signal: Option<String>,
    pub(crate) tech_entry_conservative: Option<f64>,
    pub(crate) tech_tp1: Option<f64>,
    pub(crate) tech_tp2: Option<f64>,
    pub(crate) tech_stop_loss: Option<f64>,
    pub(crate) tech_rsi: Option<f64>,
    pub(crate) tech_rr_conservative: Option<f64>,
    pub(crate) analyst_recommendation: Option<String>,
    pub(crate) analyst_upside_pct: Option<f64>,
    pub(crate) analyst_count: Option<i64>,
    pub(crate) report_date: Option<NaiveDateTime>,
    pub(crate) updated_at: Option<NaiveDateTime>,
}

const SELECT_ROWS: &str = r#"
SELECT
    ticker, company_name, sector, industry, logo,
    CAST(is_financial_sector AS SIGNED) AS is_financial_sector,
    CAST(dividend_yield AS DOUBLE) AS dividend_yield,
    CAST(dividend_payout AS DOUBLE) AS dividend_payout,
    dividend_ex_date,
    CAST(flexbit_score AS DOUBLE) AS flexbit_score,
    business_quality_label,
    CAST(timing_score AS DOUBLE) AS timing_score,
    timing_label, tech_trend, has_conflict, conflict_type,
    investor_match, investor_avoid,
    CAST(v_score AS DOUBLE) AS v_score,
    CAST(q_score AS DOUBLE) AS q_score,
    CAST(s_score AS DOUBLE) AS s_score,
    CAST(g_score AS DOUBLE) AS g_score,
    stock_profile_emoji, stock_profile_name, stock_profile_description, stock_profile_risk,
    flexbit_diagnosis, flexbit_category, flexbit_strongest, flexbit_weakest,
    flexbit_fundamental_signal,
    synthesis_profile, synthesis_description, synthesis_category, synthesis_alignment,
    data_confidence, valuation_confidence, quality_confidence, safety_confidence,
    growth_confidence, safety_note, quality_flags, analyst_notes,
    CAST(price AS DOUBLE) AS price,
    CAST(price_change AS DOUBLE) AS price_change,
    CAST(price_change_pct AS DOUBLE) AS price_change_pct,
    CAST(volume AS SIGNED) AS volume,
    volume_category,
    CAST(week_52_high AS DOUBLE) AS week_52_high,
    CAST(week_52_low AS DOUBLE) AS week_52_low,
    CAST(position_in_52week_range AS DOUBLE) AS position_in_52week_range,
    trend_strength, tech_signal,
    CAST(tech_entry_conservative AS DOUBLE) AS tech_entry_conservative,
    CAST(tech_tp1 AS DOUBLE) AS tech_tp1,
    CAST(tech_tp2 AS DOUBLE) AS tech_tp2,
    CAST(tech_stop_loss AS DOUBLE) AS tech_stop_loss,
    CAST(tech_rsi AS DOUBLE) AS tech_rsi,
    CAST(tech_rr_conservative AS DOUBLE) AS tech_rr_conservative,
    analyst_recommendation,
    CAST(analyst_upside_pct AS DOUBLE) AS analyst_upside_pct,
    CAST(analyst_count AS SIGNED) AS analyst_count,
    report_date, updated_at
FROM daily_fundamentals_update
"#;

/// Strips the "1. " style ordering prefix the pipeline attaches to some
/// labels.
fn strip_order_prefix(value: Option<String>) -> Option<String> {
    value.map(|v| {
        let trimmed = v.trim_start();
        match trimmed.split_once(". ") {
            Some((prefix, rest)) if prefix.chars().all(|c| c.is_ascii_digit()) => rest.to_string(),
            _ => v,
        }
    })
}

/// Maps one source row into the document shape.
pub(crate) fn row_to_stock(row: SourceRow) -> Stock {
    let now = Timestamp::now();
    let last_updated = row
        .updated_at
        .map(|dt| Timestamp::from_datetime(dt.and_utc()))
        .unwrap_or(now);

    let has_conflict = row.has_conflict.as_deref() == Some("⚠️ Ya");
    let trend = strip_order_prefix(row.tech_trend);

    Stock {
        ticker: row.ticker,
        company_name: row.company_name.unwrap_or_default(),
        sector: row.sector,
        industry: row.industry,
        logo: row.logo,
        is_financial_sector: row.is_financial_sector == Some(1),
        financials: Financials {
            dividend_yield: row.dividend_yield,
            last_updated: Some(last_updated),
            ..Default::default()
        },
        analysis: Analysis {
            flexbit_score: row.flexbit_score,
            business_quality: row.business_quality_label,
            timing_score: row.timing_score,
            timing_label: row.timing_label,
            trend: trend.clone(),
            conflict: ConflictInfo {
                has_conflict,
                message: row
                    .conflict_type
                    .as_ref()
                    .map(|t| format!("Conflict: {}", t)),
                conflict_type: Some(row.conflict_type.unwrap_or_else(|| "none".to_string())),
            },
            investor_profile: row.investor_match,
            investor_avoid: row.investor_avoid,
            vqsg: VqsgScores {
                v: row.v_score,
                q: row.q_score,
                s: row.s_score,
                g: row.g_score,
            },
            stock_profile: StockProfile {
                emoji: row.stock_profile_emoji,
                name: row.stock_profile_name,
                description: row.stock_profile_description,
                risk: row.stock_profile_risk,
            },
            flexbit_diagnosis: row.flexbit_diagnosis,
            flexbit_category: row.flexbit_category,
            flexbit_strongest: row.flexbit_strongest,
            flexbit_weakest: row.flexbit_weakest,
            flexbit_fundamental_signal: row.flexbit_fundamental_signal,
            synthesis: Synthesis {
                profile: row.synthesis_profile,
                description: row.synthesis_description,
                category: row.synthesis_category,
                alignment: row.synthesis_alignment,
            },
            data_confidence: row.data_confidence,
            valuation_confidence: row.valuation_confidence,
            quality_confidence: row.quality_confidence,
            safety_confidence: row.safety_confidence,
            growth_confidence: row.growth_confidence,
            safety_note: row.safety_note,
            quality_flags: row.quality_flags,
            analyst_notes: row.analyst_notes,
        },
        technical: Technical {
            last_price: row.price,
            price_change: row.price_change,
            price_change_percent: row.price_change_pct.map(|p| p * 100.0),
            volume: row.volume,
            volume_category: row.volume_category,
            week52_high: row.week_52_high,
            week52_low: row.week_52_low,
            position_in52_week_range: row.position_in_52week_range,
            trend,
            trend_strength: row.trend_strength,
            last_updated: Some(last_updated),
            signals: Signals {
                call: strip_order_prefix(row.tech_signal),
                entry_price: row.tech_entry_conservative,
                tp1: row.tech_tp1,
                tp2: row.tech_tp2,
                stop_loss: row.tech_stop_loss,
                rsi: row.tech_rsi,
                rr_conservative: row.tech_rr_conservative,
            },
        },
        dividend: Dividend {
            dividend_yield: row.dividend_yield,
            payout: row.dividend_payout,
            ex_date: row.dividend_ex_date,
        },
        analyst: AnalystView {
            recommendation: row.analyst_recommendation,
            upside_pct: row.analyst_upside_pct,
            count: row.analyst_count,
        },
        report_date: row.report_date.map(|dt| Timestamp::from_datetime(dt.and_utc())),
    }
}

#[async_trait]
impl StockImportSource for MySqlStockImportSource {
    async fn fetch_all(&self) -> Result<Vec<Stock>, DomainError> {
        let rows: Vec<SourceRow> = sqlx::query_as(SELECT_ROWS)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Source fetch failed: {}", e),
                )
            })?;

        Ok(rows.into_iter().map(row_to_stock).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_row() -> SourceRow {
        SourceRow {
            ticker: "BBCA".to_string(),
            company_name: Some("Bank Central Asia".to_string()),
            flexbit_score: Some(87.5),
            price: Some(10_250.0),
            price_change_pct: Some(0.0123),
            tech_trend: Some("2. Uptrend".to_string()),
            tech_signal: Some("1. Buy on Weakness".to_string()),
            has_conflict: Some("⚠️ Ya".to_string()),
            conflict_type: Some("valuation_vs_momentum".to_string()),
            v_score: Some(8.0),
            is_financial_sector: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn core_fields_survive_the_mapping() {
        let stock = row_to_stock(base_row());
        assert_eq!(stock.ticker, "BBCA");
        assert_eq!(stock.company_name, "Bank Central Asia");
        assert_eq!(stock.analysis.flexbit_score, Some(87.5));
        assert_eq!(stock.technical.last_price, Some(10_250.0));
        assert!(stock.is_financial_sector);
    }

    #[test]
    fn price_change_pct_is_scaled_to_percent() {
        let stock = row_to_stock(base_row());
        let pct = stock.technical.price_change_percent.unwrap();
        assert!((pct - 1.23).abs() < 1e-9);
    }

    #[test]
    fn ordering_prefixes_are_stripped() {
        let stock = row_to_stock(base_row());
        assert_eq!(stock.analysis.trend.as_deref(), Some("Uptrend"));
        assert_eq!(
            stock.technical.signals.call.as_deref(),
            Some("Buy on Weakness")
        );
    }

    #[test]
    fn conflict_flag_recognizes_the_marker_value() {
        let stock = row_to_stock(base_row());
        assert!(stock.analysis.conflict.has_conflict);
        assert_eq!(
            stock.analysis.conflict.message.as_deref(),
            Some("Conflict: valuation_vs_momentum")
        );

        let mut row = base_row();
        row.has_conflict = Some("Tidak".to_string());
        assert!(!row_to_stock(row).analysis.conflict.has_conflict);
    }

    #[test]
    fn sparse_rows_map_without_panicking() {
        let row = SourceRow {
            ticker: "XXXX".to_string(),
            ..Default::default()
        };
        let stock = row_to_stock(row);
        assert_eq!(stock.ticker, "XXXX");
        assert!(stock.analysis.flexbit_score.is_none());
        assert_eq!(
            stock.analysis.conflict.conflict_type.as_deref(),
            Some("none")
        );
    }
}
