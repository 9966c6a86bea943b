//! Records exchanged with the backend.
//!
//! Field names follow the backend's camelCase JSON. Decoding is forgiving
//! about nulls, blank optional strings, and numbers sent as strings, since
//! the backend has been observed doing all three.

pub mod admin_user;
pub mod application;
pub mod audit_log;
pub mod contact;
pub mod job;
pub mod product;
mod serde_helpers;

pub use admin_user::AdminUser;
pub use application::JobApplication;
pub use audit_log::AuditLog;
pub use contact::ContactMessage;
pub use job::{JobDraft, JobPatch, JobPosting};
pub use product::{Product, ProductDraft, ProductPatch};
pub use serde_helpers::parse_timestamp;
