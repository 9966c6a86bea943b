//! Command implementations, one module per area.

pub mod applications;
pub mod auth;
pub mod jobs;
pub mod messages;
pub mod products;
pub mod system;
