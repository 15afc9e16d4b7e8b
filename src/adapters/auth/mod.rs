//! Authentication adapters - JWT tokens and Argon2 password hashing.

mod jwt;
mod password;

pub use jwt::JwtTokenService;
pub use password::Argon2PasswordHasher;
