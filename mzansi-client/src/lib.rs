//! Remote collaborators for the MzansiFix reporting core
//!
//! HTTP clients for the external services the app depends on: the
//! generative-AI classifier and chat assistant, the remote document store,
//! and the identity provider. Each collaborator is a trait so the
//! orchestration core can be tested without a network.

pub mod chat;
pub mod classifier;
pub mod config;
pub mod error;
pub mod identity;
pub mod store;

pub use chat::{ChatAssistant, GenAiChat};
pub use classifier::{ClassificationInput, Classifier, GenAiClassifier};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use identity::{IdentityProvider, LoginInput, RegisterInput, RestIdentityProvider};
pub use store::{DocumentStore, RestDocumentStore};
