use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One turn of a generation-service conversation, in the order the
/// service expects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Seam over the external text-completion service. Handlers depend on
/// this trait so tests can substitute a canned generator; the production
/// implementation is `GeminiService`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, turns: &[Turn]) -> Result<String>;
}

#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    api_key: String,
    api_url: String,
}

impl GeminiService {
    pub fn new(api_key: String, api_url: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiService {
    async fn generate(&self, turns: &[Turn]) -> Result<String> {
        let contents: Vec<JsonValue> = turns
            .iter()
            .map(|t| {
                serde_json::json!({
                    "role": t.role,
                    "parts": [{ "text": t.text }],
                })
            })
            .collect();

        let payload = serde_json::json!({ "contents": contents });

        let res = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            tracing::error!("Gemini API request failed with status {}: {}", status, text);
            return Err(Error::Upstream(format!(
                "request failed with status {}",
                status
            )));
        }

        let body: JsonValue = res.json().await?;

        body.get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.get(0))
            .and_then(|p| p.get("text"))
            .and_then(|t| t.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| Error::Upstream("unexpected response structure".to_string()))
    }
}
