//! Shared in-memory repositories for handler tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::content::{Faq, NewsArticle, WikiEntry};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::stock::Stock;
use crate::domain::watchlist::Watchlist;
use crate::ports::{
    ConflictCounts, FaqRepository, NewsPage, NewsRepository, QualityCounts, ScreenerQuery,
    StockPage, StockQuery, StockRepository, StockSort, StockStats, TimingCounts,
    WatchlistRepository, WikiRepository,
};

/// Vec-backed stock store with the same filter semantics as the SQL
/// adapter, close enough for handler tests.
pub struct InMemoryStockRepository {
    stocks: Mutex<Vec<Stock>>,
}

impl InMemoryStockRepository {
    pub fn new() -> Self {
        Self {
            stocks: Mutex::new(Vec::new()),
        }
    }

    pub fn with_stocks(stocks: Vec<Stock>) -> Self {
        Self {
            stocks: Mutex::new(stocks),
        }
    }

    pub fn len(&self) -> usize {
        self.stocks.lock().unwrap().len()
    }
}

#[async_trait]
impl StockRepository for InMemoryStockRepository {
    async fn upsert(&self, stock: &Stock) -> Result<(), DomainError> {
        let mut stocks = self.stocks.lock().unwrap();
        match stocks.iter_mut().find(|s| s.ticker == stock.ticker) {
            Some(slot) => *slot = stock.clone(),
            None => stocks.push(stock.clone()),
        }
        Ok(())
    }

    async fn find_by_ticker(&self, ticker: &str) -> Result<Option<Stock>, DomainError> {
        Ok(self
            .stocks
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.ticker == ticker)
            .cloned())
    }

    async fn find_by_tickers(&self, tickers: &[String]) -> Result<Vec<Stock>, DomainError> {
        Ok(self
            .stocks
            .lock()
            .unwrap()
            .iter()
            .filter(|s| tickers.contains(&s.ticker))
            .cloned()
            .collect())
    }

    async fn search(&self, query: &StockQuery) -> Result<StockPage, DomainError> {
        let stocks = self.stocks.lock().unwrap();
        let mut hits: Vec<Stock> = stocks
            .iter()
            .filter(|s| {
                query
                    .keyword
                    .as_ref()
                    .map(|k| {
                        let k = k.to_lowercase();
                        s.ticker.to_lowercase().contains(&k)
                            || s.company_name.to_lowercase().contains(&k)
                    })
                    .unwrap_or(true)
            })
            .filter(|s| {
                query
                    .quality
                    .as_ref()
                    .map(|q| s.analysis.business_quality.as_deref() == Some(q.as_str()))
                    .unwrap_or(true)
            })
            .filter(|s| {
                query
                    .conflict
                    .map(|c| s.analysis.conflict.has_conflict == c)
                    .unwrap_or(true)
            })
            .cloned()
            .collect();

        match query.sort {
            StockSort::Ticker => hits.sort_by(|a, b| a.ticker.cmp(&b.ticker)),
            _ => hits.sort_by(|a, b| {
                b.analysis
                    .flexbit_score
                    .partial_cmp(&a.analysis.flexbit_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
        }

        let total = hits.len() as u64;
        let limit = query.limit.max(1);
        let pages = ((total as f64) / (limit as f64)).ceil() as u32;
        let start = ((query.page.max(1) - 1) * limit) as usize;
        let page_hits: Vec<Stock> = hits.into_iter().skip(start).take(limit as usize).collect();

        Ok(StockPage {
            stocks: page_hits,
            page: query.page.max(1),
            pages,
            total,
        })
    }

    async fn screen(&self, query: &ScreenerQuery) -> Result<Vec<Stock>, DomainError> {
        let mut hits: Vec<Stock> = self
            .stocks
            .lock()
            .unwrap()
            .iter()
            .filter(|s| {
                let score = s.analysis.flexbit_score.unwrap_or(0.0);
                query.min_score.map(|m| score >= m).unwrap_or(true)
                    && query.max_score.map(|m| score <= m).unwrap_or(true)
            })
            .filter(|s| {
                query
                    .quality
                    .as_ref()
                    .map(|q| s.analysis.business_quality.as_deref() == Some(q.as_str()))
                    .unwrap_or(true)
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| {
            b.analysis
                .flexbit_score
                .partial_cmp(&a.analysis.flexbit_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(hits)
    }

    async fn stats(&self) -> Result<StockStats, DomainError> {
        let stocks = self.stocks.lock().unwrap();
        let conflicting = stocks.iter().filter(|s| s.analysis.conflict.has_conflict).count() as u64;
        Ok(StockStats {
            total: stocks.len() as u64,
            quality: QualityCounts::default(),
            timing: TimingCounts::default(),
            conflict: ConflictCounts {
                conflicting,
                aligned: stocks.len() as u64 - conflicting,
            },
        })
    }

    async fn list_all(&self) -> Result<Vec<Stock>, DomainError> {
        let mut all = self.stocks.lock().unwrap().clone();
        all.sort_by(|a, b| a.ticker.cmp(&b.ticker));
        Ok(all)
    }
}

/// Vec-backed watchlist store.
pub struct InMemoryWatchlistRepository {
    lists: Mutex<Vec<Watchlist>>,
}

impl InMemoryWatchlistRepository {
    pub fn new() -> Self {
        Self {
            lists: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl WatchlistRepository for InMemoryWatchlistRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Watchlist>, DomainError> {
        Ok(self
            .lists
            .lock()
            .unwrap()
            .iter()
            .find(|w| &w.user_id == user_id)
            .cloned())
    }

    async fn save(&self, watchlist: &Watchlist) -> Result<(), DomainError> {
        let mut lists = self.lists.lock().unwrap();
        match lists.iter_mut().find(|w| w.user_id == watchlist.user_id) {
            Some(slot) => *slot = watchlist.clone(),
            None => lists.push(watchlist.clone()),
        }
        Ok(())
    }

    async fn delete_for_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.lists.lock().unwrap().retain(|w| &w.user_id != user_id);
        Ok(())
    }
}

/// Fixed-content FAQ store.
pub struct InMemoryFaqRepository {
    faqs: Vec<Faq>,
}

impl InMemoryFaqRepository {
    pub fn with_faqs(faqs: Vec<Faq>) -> Self {
        Self { faqs }
    }
}

#[async_trait]
impl FaqRepository for InMemoryFaqRepository {
    async fn list_active(&self, category: Option<&str>) -> Result<Vec<Faq>, DomainError> {
        let mut hits: Vec<Faq> = self
            .faqs
            .iter()
            .filter(|f| f.is_active)
            .filter(|f| category.map(|c| f.category == c).unwrap_or(true))
            .cloned()
            .collect();
        hits.sort_by(|a, b| (a.category.clone(), a.question.clone()).cmp(&(b.category.clone(), b.question.clone())));
        Ok(hits)
    }
}

/// Fixed-content news store.
pub struct InMemoryNewsRepository {
    articles: Vec<NewsArticle>,
}

impl InMemoryNewsRepository {
    pub fn with_articles(articles: Vec<NewsArticle>) -> Self {
        Self { articles }
    }
}

#[async_trait]
impl NewsRepository for InMemoryNewsRepository {
    async fn list(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> Result<NewsPage, DomainError> {
        let mut hits: Vec<NewsArticle> = self
            .articles
            .iter()
            .filter(|a| {
                search
                    .map(|s| {
                        let s = s.to_lowercase();
                        a.headline.to_lowercase().contains(&s)
                            || a.content.to_lowercase().contains(&s)
                    })
                    .unwrap_or(true)
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.date.cmp(&a.date));

        let total_items = hits.len() as u64;
        let limit = limit.max(1);
        let total_pages = ((total_items as f64) / (limit as f64)).ceil() as u32;
        let start = ((page.max(1) - 1) * limit) as usize;
        Ok(NewsPage {
            data: hits.into_iter().skip(start).take(limit as usize).collect(),
            current_page: page.max(1),
            total_pages,
            total_items,
        })
    }
}

/// Fixed-content wiki store.
pub struct InMemoryWikiRepository {
    entries: Vec<WikiEntry>,
}

impl InMemoryWikiRepository {
    pub fn with_entries(entries: Vec<WikiEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl WikiRepository for InMemoryWikiRepository {
    async fn list(&self, category: Option<&str>) -> Result<Vec<WikiEntry>, DomainError> {
        let mut hits: Vec<WikiEntry> = self
            .entries
            .iter()
            .filter(|e| category.map(|c| e.field_category == c).unwrap_or(true))
            .cloned()
            .collect();
        hits.sort_by_key(|e| e.display_order);
        Ok(hits)
    }
}
