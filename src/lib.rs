//! FlexBit API - subscription-gated stock analysis platform.
//!
//! REST backend over PostgreSQL with Midtrans Snap payments, tier-based
//! entitlements, and a scheduled import from the analytics source.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod jobs;
pub mod ports;
