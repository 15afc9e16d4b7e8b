//! User domain - accounts, roles and preferences.

mod user;

pub use user::{Preferences, Role, Theme, User};
