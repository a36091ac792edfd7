//!
//! # Persistence operations
//!
//! Thin data-access layer over the `PgPool`. Every function takes the pool
//! handle explicitly; there is no ambient database object. Task operations
//! additionally take the owning account's id, resolved by the authorization
//! gate, so ownership scoping cannot be bypassed or forged by request data.

pub mod accounts;
pub mod tasks;
