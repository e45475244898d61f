//! Issue Report Models
//!
//! `Classification` is the classifier's output contract and is validated at
//! the boundary before it is trusted. `IssueReport` is the canonical
//! submitted record: the flattened classification plus the fields the app
//! injects after analysis (coords, image, timestamps, status).

use serde::{Deserialize, Serialize};

use super::LocationData;
use crate::util::now_millis;

/// Dispatch priority assigned by the classifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Immediate,
}

/// Report lifecycle status (user-driven, not forward-only)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Submitted,
    InProgress,
    Resolved,
}

impl ReportStatus {
    /// Human-readable label ("in progress" instead of "in_progress")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::InProgress => "in progress",
            Self::Resolved => "resolved",
        }
    }
}

/// Specialized routing fields for safety/enforcement reports
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactDetails {
    pub saps_station: Option<String>,
    pub saps_emergency: Option<String>,
    pub saps_station_line: Option<String>,
    pub jmpd_region: Option<String>,
    pub jmpd_contact_centre: Option<String>,
    pub municipal_department_contact: Option<String>,
}

/// A note the classifier attached to one of the submitted images
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageEvidence {
    #[serde(default)]
    pub image_id: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Classifier-side metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportMetadata {
    #[serde(default)]
    pub language_detected: Option<String>,
    #[serde(default)]
    pub image_evidence: Vec<ImageEvidence>,
    #[serde(default)]
    pub rules_triggered: Vec<String>,
}

/// Structured classification returned by the remote classifier.
///
/// This is an external contract: responses are deserialized strictly and
/// then range-checked via [`Classification::validate`] — a structurally
/// present but malformed response is treated as a failed call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    pub report_id: String,
    pub primary_category: String,
    #[serde(default)]
    pub secondary_category: Option<String>,
    #[serde(default)]
    pub detected_objects: Vec<String>,
    /// 0.0 (cosmetic) – 1.0 (critical)
    pub severity_score: f64,
    pub priority: Priority,
    /// Classifier self-reported confidence, 0.0 – 1.0
    pub confidence: f64,
    /// Free-text department names suggested by the classifier
    #[serde(default)]
    pub suggested_department: Vec<String>,
    #[serde(default)]
    pub contact_details: Option<ContactDetails>,
    #[serde(default)]
    pub dispatch_recommendation: Option<String>,
    #[serde(default)]
    pub estimated_time_to_fix: Option<String>,
    /// Service-level bucket, e.g. "SLA-1 (24h)"
    #[serde(default)]
    pub sla_tier: Option<String>,
    #[serde(default)]
    pub human_summary: Option<String>,
    #[serde(default)]
    pub clarifying_questions: Vec<String>,
    pub emergency: bool,
    #[serde(default)]
    pub metadata: ReportMetadata,
}

impl Classification {
    /// Boundary validation of the classifier's output.
    ///
    /// Returns the first violation found, or `Ok(())` when the record is
    /// usable.
    pub fn validate(&self) -> Result<(), String> {
        if self.report_id.trim().is_empty() {
            return Err("missing report_id".to_string());
        }
        if self.primary_category.trim().is_empty() {
            return Err("missing primary_category".to_string());
        }
        if !(0.0..=1.0).contains(&self.severity_score) {
            return Err(format!(
                "severity_score out of range: {}",
                self.severity_score
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!("confidence out of range: {}", self.confidence));
        }
        Ok(())
    }
}

/// The canonical submitted record
///
/// Created only as the successful result of a classification call; mutated
/// only via explicit status transitions; never deleted individually (only
/// as part of a full local-cache clear).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssueReport {
    #[serde(flatten)]
    pub classification: Classification,

    // === App-injected fields (not from the classifier) ===
    #[serde(default)]
    pub coords: Option<LocationData>,
    /// Photo payload, base64-encoded JPEG
    #[serde(default)]
    pub image: Option<String>,
    /// Creation timestamp in UTC milliseconds
    pub created_at: i64,
    pub status: ReportStatus,
    #[serde(default)]
    pub is_anonymous: bool,
}

impl IssueReport {
    /// Build a submitted report from a validated classification plus the
    /// app-injected fields.
    pub fn from_classification(
        classification: Classification,
        coords: Option<LocationData>,
        image: Option<String>,
        is_anonymous: bool,
    ) -> Self {
        Self {
            classification,
            coords,
            image,
            created_at: now_millis(),
            status: ReportStatus::Submitted,
            is_anonymous,
        }
    }

    /// Unique report id (assigned by the classifier or generated client-side)
    pub fn report_id(&self) -> &str {
        &self.classification.report_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_classification() -> Classification {
        Classification {
            report_id: "R123456".to_string(),
            primary_category: "Pothole".to_string(),
            secondary_category: None,
            detected_objects: vec!["pothole".to_string()],
            severity_score: 0.7,
            priority: Priority::High,
            confidence: 0.9,
            suggested_department: vec!["Johannesburg Roads Agency (JRA)".to_string()],
            contact_details: None,
            dispatch_recommendation: None,
            estimated_time_to_fix: None,
            sla_tier: Some("SLA-2 (3 days)".to_string()),
            human_summary: Some("Large pothole on the road".to_string()),
            clarifying_questions: vec![],
            emergency: false,
            metadata: ReportMetadata::default(),
        }
    }

    #[test]
    fn priority_serializes_pascal_case() {
        assert_eq!(
            serde_json::to_string(&Priority::Immediate).unwrap(),
            "\"Immediate\""
        );
        assert_eq!(
            serde_json::from_str::<Priority>("\"Low\"").unwrap(),
            Priority::Low
        );
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn validate_rejects_out_of_range_scores() {
        let mut c = sample_classification();
        c.severity_score = 1.4;
        assert!(c.validate().is_err());

        let mut c = sample_classification();
        c.confidence = -0.1;
        assert!(c.validate().is_err());

        assert!(sample_classification().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_identity() {
        let mut c = sample_classification();
        c.report_id = "  ".to_string();
        assert!(c.validate().is_err());
    }

    #[test]
    fn report_json_is_flat() {
        let report =
            IssueReport::from_classification(sample_classification(), None, None, false);
        let value = serde_json::to_value(&report).unwrap();
        // Classification fields sit at the top level next to app fields,
        // matching the remote document shape.
        assert_eq!(value["report_id"], "R123456");
        assert_eq!(value["status"], "submitted");
    }

    #[test]
    fn from_classification_marks_submitted() {
        let report =
            IssueReport::from_classification(sample_classification(), None, None, true);
        assert_eq!(report.status, ReportStatus::Submitted);
        assert!(report.is_anonymous);
        assert!(report.created_at > 0);
    }
}
