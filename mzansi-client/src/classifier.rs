//! Classification collaborator
//!
//! Turns a photo + free-text description into a structured issue report
//! via a generative-AI JSON endpoint. The response is an external contract:
//! it is deserialized strictly and range-checked before it is trusted —
//! a structurally present but malformed record is a failed call.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use shared::models::{Classification, LocationData, PriorityHint};

use crate::{ClientConfig, ClientError, ClientResult};

/// Routing rules handed to the classifier as its system instruction.
const SYSTEM_INSTRUCTION: &str = r#"
You are MzansiFix AI, an intelligent assistant designed to support users from Johannesburg, South Africa in reporting municipal issues in any of the 11 official languages.

Your responsibilities:
1. Detect the user's language from their text input.
2. Respond in the same language the user used (specifically for 'human_summary' and 'dispatch_recommendation').
3. Normalise user descriptions so that they remain clear and usable regardless of language.
4. Support code-switching between English and African languages.
5. Produce your final output ONLY in the structured JSON format requested.

VALID ISSUE TYPES & RESPONSIBLE DEPARTMENTS (Johannesburg only):
1. Roads, transport, traffic signals (potholes, cracked roads, blocked stormwater drains, faulty robots) -> Johannesburg Roads Agency (JRA)
2. Burst pipes, water leaks, no water supply -> Joburg Water
3. Sewage overflow / blocked sewers -> Joburg Water - Sewer Division
4. Waste management, illegal dumping, overflowing bins -> Pikitup - Johannesburg Waste Management
5. Electricity issues (streetlights, outages, faults) -> City Power Johannesburg; route Eskom-supplied areas to Eskom
6. Trees, parks & public recreation -> Johannesburg City Parks & Zoo (JCPZ)
7. Public safety hazards (dangerous structures, missing manhole covers) -> JMPD - Johannesburg Metropolitan Police Department
8. Emergency situations (fire, medical, life-threatening danger, crime) -> EMS Johannesburg or SAPS
9. Housing & human settlements -> City of Johannesburg Housing Department
10. Environmental health (pests, hazardous waste, public health risk) -> City of Johannesburg Environmental Health

RULES:
- Only use the Johannesburg departments listed above, with their exact names, in 'suggested_department'.
- Map severity to 'severity_score' (0.0-1.0) and 'priority' (Low/Medium/High/Immediate).
- If unsure, ask for location or clarity in 'clarifying_questions'.
- If the issue is dangerous (threat to life), set 'emergency': true and priority 'Immediate'.
"#;

/// The 11 official languages the classifier can answer in
const LANGUAGE_MAP: [(&str, &str); 11] = [
    ("en", "English"),
    ("zu", "isiZulu"),
    ("xh", "isiXhosa"),
    ("af", "Afrikaans"),
    ("st", "Sesotho"),
    ("tn", "Setswana"),
    ("nso", "Sepedi"),
    ("ts", "Xitsonga"),
    ("ss", "siSwati"),
    ("ve", "Tshivenda"),
    ("nr", "isiNdebele"),
];

/// Resolve a language code to the name handed to the classifier.
/// Unknown codes fall back to English.
pub fn target_language(code: &str) -> &'static str {
    LANGUAGE_MAP
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or("English")
}

/// Input payload for a classification call
#[derive(Debug, Clone)]
pub struct ClassificationInput {
    /// Client-generated id the classifier echoes back
    pub report_id: String,
    /// Raw photo bytes (JPEG)
    pub image: Vec<u8>,
    pub description: String,
    pub location: Option<LocationData>,
    pub priority_hint: PriorityHint,
    /// Preferred language code for the narrative fields
    pub language: String,
}

/// Remote classification collaborator
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify a submission into a structured report.
    ///
    /// Must return valid structured data or the call is treated as failed.
    async fn classify(&self, input: &ClassificationInput) -> ClientResult<Classification>;
}

// ========== Generative-AI wire types ==========

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Extract the text payload of the first candidate
fn extract_text(response: GenerateResponse) -> ClientResult<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ClientError::InvalidResponse("no response from AI".to_string()))
}

/// Parse and boundary-validate a classification JSON payload
fn parse_classification(text: &str) -> ClientResult<Classification> {
    let classification: Classification = serde_json::from_str(text)?;
    classification
        .validate()
        .map_err(ClientError::InvalidResponse)?;
    Ok(classification)
}

/// HTTP classifier backed by a generateContent-style endpoint
#[derive(Debug, Clone)]
pub struct GenAiClassifier {
    client: Client,
    config: ClientConfig,
}

impl GenAiClassifier {
    /// Create a new classifier client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            config: config.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            self.config.api_key
        )
    }

    /// Build the user-facing prompt: the input payload plus the
    /// translation instruction for the narrative fields.
    fn build_prompt(&self, input: &ClassificationInput) -> String {
        let language = target_language(&input.language);
        let payload = json!({
            "report_id": input.report_id,
            "text_description": if input.description.is_empty() {
                serde_json::Value::Null
            } else {
                json!(input.description)
            },
            "images": [{ "id": "IMG_UPLOAD", "image_metadata": { "mime": "image/jpeg" } }],
            "location": input.location.map(|l| json!({ "lat": l.latitude, "lng": l.longitude })),
            "user_priority_hint": input.priority_hint,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        format!(
            "INPUT: {payload}\n\n\
             IMPORTANT TRANSLATION INSTRUCTION:\n\
             The user's preferred language is **{language}**.\n\
             You MUST WRITE the values for 'human_summary' and 'dispatch_recommendation' IN **{language}**.\n\
             Do NOT translate the JSON keys. Keep keys in English.\n\
             Do NOT translate department names that are proper nouns (e.g. \"City Power\", \"JRA\")."
        )
    }
}

#[async_trait]
impl Classifier for GenAiClassifier {
    async fn classify(&self, input: &ClassificationInput) -> ClientResult<Classification> {
        if self.config.api_key.trim().is_empty() {
            return Err(ClientError::NotConfigured);
        }

        let body = json!({
            "system_instruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
            "contents": [{
                "parts": [
                    {
                        "inline_data": {
                            "mime_type": "image/jpeg",
                            "data": BASE64.encode(&input.image),
                        }
                    },
                    { "text": self.build_prompt(input) },
                ]
            }],
            "generation_config": {
                "response_mime_type": "application/json",
                "temperature": 0.2,
            },
        });

        tracing::debug!(report_id = %input.report_id, "sending classification request");

        let response = self.client.post(self.endpoint()).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if ClientError::detect_not_configured(&text) {
                return Err(ClientError::NotConfigured);
            }
            return Err(ClientError::InvalidResponse(format!(
                "classifier returned {status}: {text}"
            )));
        }

        let generate: GenerateResponse = response.json().await?;
        let text = extract_text(generate)?;
        parse_classification(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "report_id": "R482913",
        "primary_category": "Pothole on Main Road",
        "secondary_category": null,
        "detected_objects": ["pothole", "asphalt"],
        "severity_score": 0.72,
        "priority": "High",
        "confidence": 0.91,
        "suggested_department": ["Johannesburg Roads Agency (JRA)"],
        "dispatch_recommendation": "Dispatch a road repair crew.",
        "sla_tier": "SLA-2 (3 days)",
        "human_summary": "There is a large pothole on the main road.",
        "clarifying_questions": [],
        "emergency": false,
        "metadata": {
            "language_detected": "English",
            "image_evidence": [{"image_id": "IMG_UPLOAD", "note": "pothole visible"}],
            "rules_triggered": []
        }
    }"#;

    #[test]
    fn parses_well_formed_classification() {
        let classification = parse_classification(SAMPLE).unwrap();
        assert_eq!(classification.report_id, "R482913");
        assert_eq!(
            classification.suggested_department,
            vec!["Johannesburg Roads Agency (JRA)".to_string()]
        );
        assert!(!classification.emergency);
    }

    #[test]
    fn rejects_out_of_range_severity() {
        let bad = SAMPLE.replace("0.72", "7.2");
        let err = parse_classification(&bad).unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[test]
    fn rejects_missing_required_fields() {
        assert!(parse_classification(r#"{"report_id": "R1"}"#).is_err());
    }

    #[test]
    fn extracts_first_candidate_text() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":1}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn empty_candidates_is_invalid() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(extract_text(response).is_err());
    }

    #[test]
    fn language_map_covers_known_codes() {
        assert_eq!(target_language("zu"), "isiZulu");
        assert_eq!(target_language("af"), "Afrikaans");
        assert_eq!(target_language("xx"), "English");
    }
}
