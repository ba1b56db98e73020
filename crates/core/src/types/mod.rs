//! Core types for FreshFold.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod contact;
pub mod id;
pub mod money;
pub mod order;
pub mod status;

pub use contact::{Email, EmailError, PhoneNumber, PhoneNumberError};
pub use id::*;
pub use money::{CurrencyCode, Money};
pub use order::*;
pub use status::*;
