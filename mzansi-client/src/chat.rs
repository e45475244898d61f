//! Chat collaborator
//!
//! Stateless per call aside from the supplied history: prior messages plus
//! the new user message go up, a single free-text reply comes back.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use shared::models::{ChatMessage, ChatRole, WELCOME_MESSAGE_ID};

use crate::{ClientConfig, ClientError, ClientResult};

/// Knowledge base and guardrails for the in-app assistant.
const CHAT_SYSTEM_INSTRUCTION: &str = r#"
You are KasiFixer, the official AI assistant for the MzansiFix municipal reporting app in Johannesburg, South Africa.

Your purpose:
- Assist users with Johannesburg municipal issues (JRA, City Power, Joburg Water, etc.).
- Provide contact details and procedures based strictly on the KNOWLEDGE BASE below.
- Guide users on how to use the MzansiFix app and route issues to the correct department.

KNOWLEDGE BASE (source of truth):
- Johannesburg Roads Agency (JRA): roads, potholes, traffic lights. Hotline: 0860 562 874, Email: hotline@jra.org.za.
- Joburg Water: burst pipes, sewage, no water. Hotline: 0800 000 004, SMS: 082 653 2143.
- City Power: electricity outages (non-Eskom). Faults: 011 490 7484.
- Eskom: electricity (Eskom areas). Toll-free: 08600 37566.
- Pikitup: waste, illegal dumping, bins. Hotline: 0800 742 786.
- JMPD: traffic police, by-laws, noise, accidents (no injury). Hotline: 011 758 9650.
- City Parks (JCPZ): fallen trees, parks. Hotline: 011 712 6600.
- EMERGENCY: threat to life, crime, fire. Call 10111 (SAPS) or 112.

STRICT RULES:
1. Scope: answer ONLY questions about Johannesburg service delivery or MzansiFix; politely redirect anything else.
2. Safety: if a user mentions immediate danger, instruct them to call 10111 or 112 immediately.
3. No hallucinations: if information is not in the knowledge base, say it is not available.
4. Tone: friendly, professional South African English. Keep responses short and actionable.
"#;

/// Remote chat collaborator
#[async_trait]
pub trait ChatAssistant: Send + Sync {
    /// Send a message with its prior history; returns a single reply.
    async fn send(&self, history: &[ChatMessage], message: &str) -> ClientResult<String>;
}

/// HTTP chat assistant sharing the classifier's endpoint and key
#[derive(Debug, Clone)]
pub struct GenAiChat {
    client: Client,
    config: ClientConfig,
}

impl GenAiChat {
    /// Create a new chat client from configuration
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
}

/// Map local history to provider turns, dropping the synthetic welcome
/// message the UI seeds the conversation with.
fn build_contents(history: &[ChatMessage], message: &str) -> Vec<serde_json::Value> {
    let mut contents: Vec<serde_json::Value> = history
        .iter()
        .filter(|m| m.id != WELCOME_MESSAGE_ID)
        .map(|m| {
            json!({
                "role": match m.role {
                    ChatRole::User => "user",
                    ChatRole::Model => "model",
                },
                "parts": [{ "text": m.text }],
            })
        })
        .collect();

    contents.push(json!({ "role": "user", "parts": [{ "text": message }] }));
    contents
}

#[async_trait]
impl ChatAssistant for GenAiChat {
    async fn send(&self, history: &[ChatMessage], message: &str) -> ClientResult<String> {
        if self.config.api_key.trim().is_empty() {
            return Err(ClientError::NotConfigured);
        }

        let body = json!({
            "system_instruction": { "parts": [{ "text": CHAT_SYSTEM_INSTRUCTION }] },
            "contents": build_contents(history, message),
            "generation_config": { "temperature": 0.7 },
        });

        let response = self.client.post(self.endpoint()).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if ClientError::detect_not_configured(&text) {
                return Err(ClientError::NotConfigured);
            }
            return Err(ClientError::InvalidResponse(format!(
                "chat endpoint returned {status}: {text}"
            )));
        }

        let value: serde_json::Value = response.json().await?;
        let reply = value["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClientError::InvalidResponse("empty chat reply".to_string()))?;

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_message_is_filtered() {
        let mut welcome = ChatMessage::model("Sharp! How can I help?");
        welcome.id = WELCOME_MESSAGE_ID.to_string();
        let history = vec![welcome, ChatMessage::user("My lights are out.")];

        let contents = build_contents(&history, "Is it City Power or Eskom?");
        assert_eq!(contents.len(), 2);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["parts"][0]["text"], "Is it City Power or Eskom?");
    }

    #[test]
    fn roles_map_to_provider_names() {
        let history = vec![
            ChatMessage::user("hello"),
            ChatMessage::model("Sharp, how can I help?"),
        ];
        let contents = build_contents(&history, "pothole");
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
    }
}
