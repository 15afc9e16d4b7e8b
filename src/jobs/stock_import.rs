//! Daily stock import job.
//!
//! Pulls the full universe from the relational analytics source and
//! upserts each document by ticker. Straight-line loop: per-row failures
//! are counted and logged, the run never aborts, and re-running is
//! harmless because the write path is an upsert.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, FixedOffset, TimeZone, Utc};

use crate::config::ImportConfig;
use crate::domain::foundation::DomainError;
use crate::ports::{StockImportSource, StockRepository};

/// Summary of one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub total: usize,
    pub imported: usize,
    pub failed: usize,
}

/// The import job: source → upsert loop.
pub struct StockImportJob {
    source: Arc<dyn StockImportSource>,
    stocks: Arc<dyn StockRepository>,
}

impl StockImportJob {
    pub fn new(source: Arc<dyn StockImportSource>, stocks: Arc<dyn StockRepository>) -> Self {
        Self { source, stocks }
    }

    /// Runs one import pass.
    ///
    /// Fails only when the source itself is unreachable; individual row
    /// failures are tallied in the report.
    pub async fn run(&self) -> Result<ImportReport, DomainError> {
        let started = std::time::Instant::now();
        tracing::info!("Stock import starting");

        let stocks = self.source.fetch_all().await?;
        let total = stocks.len();
        tracing::info!(total, "Fetched rows from source");

        let mut imported = 0usize;
        let mut failed = 0usize;
        for stock in stocks {
            match self.stocks.upsert(&stock).await {
                Ok(()) => imported += 1,
                Err(e) => {
                    failed += 1;
                    tracing::error!(ticker = %stock.ticker, error = %e, "Row import failed");
                }
            }
        }

        let report = ImportReport {
            total,
            imported,
            failed,
        };
        tracing::info!(
            total = report.total,
            imported = report.imported,
            failed = report.failed,
            duration_secs = started.elapsed().as_secs_f64(),
            "Stock import complete"
        );
        Ok(report)
    }
}

/// Seconds until the next scheduled run.
///
/// `run_hour` is interpreted in the configured UTC offset (default WIB).
pub fn delay_until_next_run(config: &ImportConfig, now_utc: chrono::DateTime<Utc>) -> Duration {
    let offset = FixedOffset::east_opt(config.utc_offset_mins * 60)
        .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"));
    let local_now = now_utc.with_timezone(&offset);

    let at_hour = |date: chrono::NaiveDate| {
        offset
            .with_ymd_and_hms(
                date.year(),
                date.month(),
                date.day(),
                config.run_hour as u32,
                0,
                0,
            )
            .single()
    };

    let next = match at_hour(local_now.date_naive()) {
        Some(run) if run > local_now => run,
        _ => at_hour(local_now.date_naive() + chrono::Duration::days(1))
            .unwrap_or(local_now + chrono::Duration::days(1)),
    };

    (next - local_now)
        .to_std()
        .unwrap_or(Duration::from_secs(24 * 3600))
}

/// Spawns the daily scheduler loop.
///
/// Sleeps until the configured hour, runs the job, repeats. A failed run
/// is logged and the loop keeps going.
pub fn spawn_daily(job: Arc<StockImportJob>, config: ImportConfig) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!(
            run_hour = config.run_hour,
            utc_offset_mins = config.utc_offset_mins,
            "Stock import scheduler started"
        );

        loop {
            let delay = delay_until_next_run(&config, Utc::now());
            tracing::info!(next_run_in_secs = delay.as_secs(), "Import scheduled");
            tokio::time::sleep(delay).await;

            if let Err(e) = job.run().await {
                tracing::error!(error = %e, "Scheduled import failed");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::InMemoryStockRepository;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::stock::Stock;
    use async_trait::async_trait;

    struct FixedSource {
        stocks: Vec<Stock>,
        fail: bool,
    }

    #[async_trait]
    impl StockImportSource for FixedSource {
        async fn fetch_all(&self) -> Result<Vec<Stock>, DomainError> {
            if self.fail {
                return Err(DomainError::new(ErrorCode::DatabaseError, "source down"));
            }
            Ok(self.stocks.clone())
        }
    }

    fn stock(ticker: &str) -> Stock {
        Stock {
            ticker: ticker.to_string(),
            company_name: ticker.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn run_upserts_every_row() {
        let repo = Arc::new(InMemoryStockRepository::new());
        let job = StockImportJob::new(
            Arc::new(FixedSource {
                stocks: vec![stock("AAAA"), stock("BBBB")],
                fail: false,
            }),
            repo.clone(),
        );

        let report = job.run().await.unwrap();
        assert_eq!(
            report,
            ImportReport {
                total: 2,
                imported: 2,
                failed: 0
            }
        );
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn rerun_is_an_upsert_not_a_duplicate() {
        let repo = Arc::new(InMemoryStockRepository::new());
        let job = StockImportJob::new(
            Arc::new(FixedSource {
                stocks: vec![stock("AAAA")],
                fail: false,
            }),
            repo.clone(),
        );

        job.run().await.unwrap();
        job.run().await.unwrap();
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn unreachable_source_fails_the_run() {
        let job = StockImportJob::new(
            Arc::new(FixedSource {
                stocks: vec![],
                fail: true,
            }),
            Arc::new(InMemoryStockRepository::new()),
        );
        assert!(job.run().await.is_err());
    }

    #[test]
    fn next_run_is_later_today_when_hour_not_passed() {
        let config = ImportConfig {
            run_hour: 19,
            utc_offset_mins: 7 * 60,
            ..Default::default()
        };
        // 10:00 WIB == 03:00 UTC
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 3, 0, 0).unwrap();
        let delay = delay_until_next_run(&config, now);
        assert_eq!(delay.as_secs(), 9 * 3600);
    }

    #[test]
    fn next_run_is_tomorrow_when_hour_passed() {
        let config = ImportConfig {
            run_hour: 19,
            utc_offset_mins: 7 * 60,
            ..Default::default()
        };
        // 20:00 WIB == 13:00 UTC
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 13, 0, 0).unwrap();
        let delay = delay_until_next_run(&config, now);
        assert_eq!(delay.as_secs(), 23 * 3600);
    }
}
