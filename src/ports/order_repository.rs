//! Order repository port.
//!
//! # Design
//!
//! - `order_id` carries a unique index; inserting a colliding id fails
//!   loudly with `DuplicateEntry`. That index, not the id generation
//!   scheme, is what bounds the same-user-same-millisecond collision.
//! - `fail_pending_for_user` is the best-effort cleanup half of the
//!   "at most one pending order per user" invariant.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::payment::{Order, OrderId};

/// Repository port for Order persistence.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order.
    ///
    /// # Errors
    ///
    /// - `DuplicateEntry` if the order id already exists
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, order: &Order) -> Result<(), DomainError>;

    /// Update an existing order's status.
    async fn update(&self, order: &Order) -> Result<(), DomainError>;

    /// Find an order by its opaque identifier.
    async fn find_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, DomainError>;

    /// A user's orders, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, DomainError>;

    /// Mark every pending order of a user as failed.
    ///
    /// Returns the number of orders transitioned. Invoked before a new
    /// order is inserted, so a user never accumulates pending orders.
    async fn fail_pending_for_user(&self, user_id: &UserId) -> Result<u64, DomainError>;

    /// Orders held in fraud review, oldest first. Manual review queue.
    async fn list_challenged(&self) -> Result<Vec<Order>, DomainError>;
}
