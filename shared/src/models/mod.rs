//! Data models
//!
//! Shared between the orchestration core and the remote collaborators.
//! Wire formats match the classifier/store JSON contracts, so persisted
//! blobs and remote documents stay interchangeable.

pub mod chat;
pub mod department;
pub mod location;
pub mod pending;
pub mod report;
pub mod settings;
pub mod user;

// Re-exports
pub use chat::*;
pub use department::*;
pub use location::*;
pub use pending::*;
pub use report::*;
pub use settings::*;
pub use user::*;
