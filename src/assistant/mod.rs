//! Cliente del asistente de cursos (API de completions compatible con OpenAI).
//!
//! El historial de conversación lo envía quien llama; aquí no se guarda nada
//! ni se reintenta ante fallos.

mod prompt;

pub use prompt::{build_messages, build_system_prompt, ChatMessage, ChatRole, ChatTurn, BASE_SYSTEM_PROMPT};

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AssistantConfig;
use crate::models::Course;

const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssistantError {
    #[error("assistant API key is not configured")]
    NotConfigured,

    #[error("assistant authentication failed")]
    Authentication,

    #[error("assistant rate limited")]
    RateLimited,

    #[error("assistant model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("assistant returned an empty reply")]
    EmptyReply,

    #[error("assistant unavailable: {0}")]
    Unavailable(String),
}

impl AssistantError {
    /// Clasifica una respuesta HTTP fallida del proveedor
    pub fn from_status(status: u16, body: &str) -> AssistantError {
        match status {
            401 => AssistantError::Authentication,
            429 => AssistantError::RateLimited,
            _ if body.contains("model") => AssistantError::ModelUnavailable(format!("HTTP {}", status)),
            _ => AssistantError::Unavailable(format!("HTTP {}", status)),
        }
    }

    /// Mensaje para mostrar al estudiante en lugar de la respuesta
    pub fn fallback_message(&self) -> &'static str {
        match self {
            AssistantError::NotConfigured => {
                "I apologize, but the AI assistant is not configured. Please contact the administrator to set up the OpenAI API key."
            }
            AssistantError::Authentication => {
                "I apologize, but the AI assistant authentication failed. Please check the API key configuration."
            }
            AssistantError::RateLimited => {
                "I apologize, but the AI service is currently rate-limited. Please try again in a moment."
            }
            AssistantError::ModelUnavailable(_) => {
                "I apologize, but the AI model is currently unavailable. The service may be experiencing issues. Please try again later."
            }
            AssistantError::EmptyReply => {
                "I apologize, but I couldn't generate a response. Please try again."
            }
            AssistantError::Unavailable(_) => {
                "I apologize, but I'm having trouble connecting to the AI service right now. Please try again in a moment."
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

pub struct Assistant {
    http_client: reqwest::Client,
    config: AssistantConfig,
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl Assistant {
    pub fn new(config: AssistantConfig) -> Result<Assistant, AssistantError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AssistantError::Unavailable(e.to_string()))?;
        Ok(Assistant { http_client, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Envía system prompt + historial + mensaje y devuelve el texto de la respuesta
    pub async fn reply(
        &self,
        message: &str,
        history: &[ChatTurn],
        course: Option<&Course>,
    ) -> Result<String, AssistantError> {
        let api_key = self.config.api_key.as_deref().ok_or(AssistantError::NotConfigured)?;
        let messages = build_messages(message, history, course);
        let body = CompletionRequest {
            model: &self.config.model,
            messages: &messages,
            max_completion_tokens: self.config.max_tokens,
        };

        let url = format!("{}/chat/completions", self.config.base_url);
        debug!(url = %url, model = %self.config.model, turns = messages.len(), "consultando asistente");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let err = AssistantError::from_status(status.as_u16(), &error_text);
            warn!(status = status.as_u16(), error = %err, "el asistente respondió con error");
            return Err(err);
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Unavailable(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(AssistantError::EmptyReply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clasifica_errores_por_status() {
        assert_eq!(AssistantError::from_status(401, ""), AssistantError::Authentication);
        assert_eq!(AssistantError::from_status(429, "slow down"), AssistantError::RateLimited);
        assert!(matches!(
            AssistantError::from_status(404, r#"{"error": "The model `gpt-x` does not exist"}"#),
            AssistantError::ModelUnavailable(_)
        ));
        assert!(matches!(AssistantError::from_status(502, "bad gateway"), AssistantError::Unavailable(_)));
    }

    #[test]
    fn mensajes_de_fallback_son_distintos() {
        let all = [
            AssistantError::NotConfigured,
            AssistantError::Authentication,
            AssistantError::RateLimited,
            AssistantError::ModelUnavailable(String::new()),
            AssistantError::EmptyReply,
            AssistantError::Unavailable(String::new()),
        ];
        let mut seen = std::collections::HashSet::new();
        for e in all.iter() {
            assert!(e.fallback_message().starts_with("I apologize"));
            assert!(seen.insert(e.fallback_message()));
        }
    }

    #[tokio::test]
    async fn sin_api_key_no_hace_requests() {
        let assistant = Assistant::new(AssistantConfig::default()).expect("cliente");
        assert!(!assistant.is_configured());
        let err = assistant.reply("hola", &[], None).await.expect_err("sin key");
        assert_eq!(err, AssistantError::NotConfigured);
    }
}
