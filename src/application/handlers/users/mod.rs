//! Admin user management handlers.

mod delete_user;
mod list_users;
mod update_user;

pub use delete_user::{DeleteUserCommand, DeleteUserHandler};
pub use list_users::ListUsersHandler;
pub use update_user::{AdminSubscriptionEdit, UpdateUserCommand, UpdateUserHandler};
