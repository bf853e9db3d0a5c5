//! The conversational assistant the dialogue talks to.
//!
//! The engine only needs "send these messages, get text back". [`Assistant`]
//! is that seam; [`HttpAssistant`] is the production implementation and
//! tests substitute scripted fakes.

mod http;

pub use http::HttpAssistant;

use crate::model::ChatMessage;

/// Errors from an assistant call.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("assistant request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("assistant rejected the request: {0}")]
    Rejected(String),
}

/// Everything an assistant call carries.
#[derive(Debug, Clone, Copy)]
pub struct AssistantRequest<'a> {
    pub system_prompt: &'a str,

    /// Context string describing the user's challenge.
    pub seed: &'a str,

    /// Visible transcript so far, scripted messages included.
    pub history: &'a [ChatMessage],

    pub user_message: &'a str,
}

/// A conversational assistant.
pub trait Assistant {
    /// Send one user turn and return the reply text.
    fn send(&self, request: &AssistantRequest<'_>) -> Result<String, AssistantError>;
}

impl<A: Assistant + ?Sized> Assistant for &A {
    fn send(&self, request: &AssistantRequest<'_>) -> Result<String, AssistantError> {
        (**self).send(request)
    }
}
