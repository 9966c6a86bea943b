//! Selam Core - Shared types library.
//!
//! This crate provides common types used across all Selam admin components:
//! - `admin` - API client, session store and list controllers
//! - `cli` - The `selam` command-line shell
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, slugs, money, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
