//! Assistant backed by the plain chat endpoint of the coaching service.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::{Assistant, AssistantError, AssistantRequest};
use crate::model::{ChatMessage, Role};

const CHAT_PATH: &str = "/api/ai/chat/plain";

/// Posts each turn to `{endpoint}/api/ai/chat/plain`.
#[derive(Debug, Clone)]
pub struct HttpAssistant {
    url: String,
    training_id: String,
    model: Option<String>,
    http: Client,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatBody<'a> {
    training_id: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    success: bool,
    reply: Option<String>,
    error: Option<String>,
}

impl HttpAssistant {
    pub fn new(
        endpoint: &str,
        training_id: impl Into<String>,
        model: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AssistantError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: format!("{}{CHAT_PATH}", endpoint.trim_end_matches('/')),
            training_id: training_id.into(),
            model,
            http,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn body<'a>(&'a self, request: &AssistantRequest<'a>, system: &'a str) -> ChatBody<'a> {
        let mut messages = Vec::with_capacity(request.history.len() + 2);
        messages.push(WireMessage {
            role: "system",
            content: system,
        });
        messages.extend(
            request
                .history
                .iter()
                .filter(|m| !m.skip_reframe)
                .map(wire_message),
        );
        messages.push(WireMessage {
            role: "user",
            content: request.user_message,
        });
        ChatBody {
            training_id: &self.training_id,
            messages,
            model: self.model.as_deref(),
        }
    }
}

fn wire_message(message: &ChatMessage) -> WireMessage<'_> {
    WireMessage {
        role: match message.role {
            Role::User => "user",
            Role::Assistant => "assistant",
        },
        content: &message.content,
    }
}

/// System prompt with the challenge seed appended as context.
fn system_message(request: &AssistantRequest<'_>) -> String {
    if request.seed.trim().is_empty() {
        return request.system_prompt.to_string();
    }
    format!("{}\n\nContext: {}", request.system_prompt, request.seed)
}

impl Assistant for HttpAssistant {
    fn send(&self, request: &AssistantRequest<'_>) -> Result<String, AssistantError> {
        let system = system_message(request);
        let body = self.body(request, &system);
        tracing::info!(
            url = %self.url,
            messages = body.messages.len(),
            "calling assistant"
        );

        let response = self.http.post(&self.url).json(&body).send()?;
        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ChatReply>()
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| status.to_string());
            tracing::warn!(%status, detail = %detail, "assistant returned an error status");
            return Err(AssistantError::Rejected(detail));
        }

        let reply: ChatReply = response.json()?;
        if !reply.success {
            let detail = reply.error.unwrap_or_else(|| "unknown error".to_string());
            tracing::warn!(detail = %detail, "assistant reported failure");
            return Err(AssistantError::Rejected(detail));
        }
        Ok(reply.reply.unwrap_or_default())
    }
}
