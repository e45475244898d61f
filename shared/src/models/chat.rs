//! Chat Assistant Models

use serde::{Deserialize, Serialize};

use crate::util::now_millis;

/// Synthetic welcome message id, filtered out of provider history
pub const WELCOME_MESSAGE_ID: &str = "welcome";

/// Message author role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// A single chat exchange message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: i64,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: crate::util::pending_id(),
            role: ChatRole::User,
            text: text.into(),
            timestamp: now_millis(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            id: crate::util::pending_id(),
            role: ChatRole::Model,
            text: text.into(),
            timestamp: now_millis(),
        }
    }
}
