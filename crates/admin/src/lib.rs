//! Selam back-office admin library.
//!
//! Typed access to the Selam REST backend plus the state behind every
//! admin page: the signed-in session, one list controller per collection,
//! detail views, forms, and the overview and revenue figures. The `selam`
//! CLI is a thin presentation layer over this crate.
//!
//! # Security
//!
//! The session token grants full back-office access. It is held as a
//! [`secrecy::SecretString`], redacted from `Debug` output, and persisted
//! to a single owner-only file.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod api;
pub mod config;
pub mod controllers;
pub mod detail;
pub mod error;
pub mod forms;
pub mod models;
pub mod notifications;
pub mod overview;
pub mod render;
pub mod session;
pub mod shell;

pub use api::{ApiClient, ApiError, Envelope};
pub use config::{AdminConfig, ConfigError};
pub use error::AppError;
pub use session::SessionStore;
pub use shell::{Dashboard, DashboardView};
