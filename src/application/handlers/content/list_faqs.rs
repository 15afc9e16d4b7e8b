//! ListFaqsHandler - Query handler for active FAQs.

use std::sync::Arc;

use crate::domain::content::Faq;
use crate::domain::foundation::DomainError;
use crate::ports::FaqRepository;

/// Handler for the public FAQ listing.
pub struct ListFaqsHandler {
    faqs: Arc<dyn FaqRepository>,
}

impl ListFaqsHandler {
    pub fn new(faqs: Arc<dyn FaqRepository>) -> Self {
        Self { faqs }
    }

    pub async fn handle(&self, category: Option<&str>) -> Result<Vec<Faq>, DomainError> {
        self.faqs.list_active(category).await
    }
}
