//! Pending Report Model

use serde::{Deserialize, Serialize};

use super::LocationData;
use crate::util::{now_millis, pending_id};

/// User-supplied urgency hint, captured before classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriorityHint {
    Low,
    #[default]
    Medium,
    High,
}

/// A report captured while offline, awaiting classification.
///
/// Owned exclusively by the offline queue; removed (not mutated) on
/// successful promotion or explicit user deletion. A pending report and
/// its resulting [`super::IssueReport`] never coexist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingReport {
    /// Client-generated unique token
    pub id: String,
    /// Capture timestamp in UTC milliseconds
    pub timestamp: i64,
    /// Photo payload, base64-encoded JPEG
    pub image: String,
    pub description: String,
    #[serde(default)]
    pub location: Option<LocationData>,
    pub priority_hint: PriorityHint,
    #[serde(default)]
    pub is_anonymous: bool,
}

/// The evidence a user hands in when submitting an issue
#[derive(Debug, Clone, Default)]
pub struct Submission {
    /// Raw photo bytes (mandatory)
    pub image: Vec<u8>,
    pub description: String,
    pub location: Option<LocationData>,
    pub priority_hint: PriorityHint,
    pub is_anonymous: bool,
}

impl PendingReport {
    /// Capture a submission into a fresh pending entry
    pub fn capture(image_base64: String, submission: &Submission) -> Self {
        Self {
            id: pending_id(),
            timestamp: now_millis(),
            image: image_base64,
            description: submission.description.clone(),
            location: submission.location,
            priority_hint: submission.priority_hint,
            is_anonymous: submission.is_anonymous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_hint_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PriorityHint::High).unwrap(),
            "\"high\""
        );
    }

    #[test]
    fn capture_assigns_fresh_identity() {
        let submission = Submission {
            image: vec![1, 2, 3],
            description: "burst pipe".to_string(),
            ..Default::default()
        };
        let a = PendingReport::capture("AQID".to_string(), &submission);
        let b = PendingReport::capture("AQID".to_string(), &submission);
        assert_ne!(a.id, b.id);
        assert!(a.timestamp > 0);
    }
}
