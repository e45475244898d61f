//! Shared types for the MzansiFix reporting core
//!
//! Common types used across the client and app crates: report entities,
//! the classified error taxonomy, and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, AuthError};
pub use serde::{Deserialize, Serialize};
