//! Record access over a [`Database`](crate::db::Database).
//!
//! Each function opens its own connection and closes it before returning.

pub mod employee;
pub mod user;
