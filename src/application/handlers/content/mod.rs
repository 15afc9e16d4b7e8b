//! Content query handlers (FAQ, news, wiki).

mod list_faqs;
mod list_news;
mod list_wikis;

pub use list_faqs::ListFaqsHandler;
pub use list_news::{ListNewsHandler, ListNewsQuery};
pub use list_wikis::ListWikisHandler;
