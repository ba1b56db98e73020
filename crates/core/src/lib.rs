//! FreshFold Core - Shared types library.
//!
//! This crate provides common types used across all FreshFold components:
//! - `client` - API client, local order store, and dashboard aggregation
//! - `cli` - Command-line surface for customers and couriers
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no storage access. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Order model, status taxonomy, money, IDs, and contact types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
