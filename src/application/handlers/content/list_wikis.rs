//! ListWikisHandler - Query handler for wiki entries.

use std::sync::Arc;

use crate::domain::content::WikiEntry;
use crate::domain::foundation::DomainError;
use crate::ports::WikiRepository;

/// Handler for the wiki listing, sorted by display order.
pub struct ListWikisHandler {
    wikis: Arc<dyn WikiRepository>,
}

impl ListWikisHandler {
    pub fn new(wikis: Arc<dyn WikiRepository>) -> Self {
        Self { wikis }
    }

    pub async fn handle(&self, category: Option<&str>) -> Result<Vec<WikiEntry>, DomainError> {
        self.wikis.list(category).await
    }
}
