//! Core types for Pocket Market.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::{Cents, CurrencyCode, CurrencyCodeParseError, MoneyError};
pub use status::{OrderStatus, OrderStatusParseError};
