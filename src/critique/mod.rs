//! Best-effort titles and critiques for finished doodles.

mod gemini;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::CritiqueError;

pub use gemini::{GeminiBackend, HttpTransport, UreqTransport};

pub const MISSING_KEY_TITLE: &str = "Untitled Mystery";
pub const MISSING_KEY_CRITIQUE: &str = "I cannot see this masterpiece because my inner eye (API Key) is missing. Please configure it!";
pub const FAILURE_TITLE: &str = "The Glitched Canvas";
pub const FAILURE_CRITIQUE: &str = "My vision is clouded (Error connecting to AI). Perhaps it is too avant-garde for me.";

pub const PROMPT: &str = r#"You are a pretentious but humorous art critic at the "Doodle Museum".
Analyze this drawing.
1. Give it a creative, slightly abstract, or funny title.
2. Write a short, 1-sentence critique that sounds sophisticated but is actually about this simple doodle.

Return the response as a JSON object with keys: "title" and "critique". Do not include markdown formatting."#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Critique {
    pub title: String,
    pub critique: String,
}

impl Critique {
    pub fn missing_key() -> Self {
        Self {
            title: MISSING_KEY_TITLE.to_owned(),
            critique: MISSING_KEY_CRITIQUE.to_owned(),
        }
    }

    pub fn failed() -> Self {
        Self {
            title: FAILURE_TITLE.to_owned(),
            critique: FAILURE_CRITIQUE.to_owned(),
        }
    }
}

/// A text-generation service that can look at an image
pub trait CritiqueBackend: Send + Sync {
    fn generate(
        &self,
        api_key: &str,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String, CritiqueError>;
}

/// Client for the critique service. [`Critic::analyze`] always produces a critique.
#[derive(Clone, Default)]
pub struct Critic {
    api_key: Option<String>,
    backend: Option<Arc<dyn CritiqueBackend>>,
}

impl std::fmt::Debug for Critic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Critic")
            .field("has_key", &self.has_credentials())
            .field("has_backend", &self.backend.is_some())
            .finish()
    }
}

impl Critic {
    pub fn new(api_key: Option<String>, backend: Option<Arc<dyn CritiqueBackend>>) -> Self {
        Self { api_key, backend }
    }

    /// Critic backed by the Gemini service whenever a non-blank key is given
    pub fn with_gemini(api_key: Option<String>) -> Self {
        let backend: Option<Arc<dyn CritiqueBackend>> = api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
            .then(|| Arc::new(GeminiBackend::new()) as Arc<dyn CritiqueBackend>);
        Self::new(api_key, backend)
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub fn analyze(&self, png: &[u8]) -> Critique {
        let Some(key) = self.api_key.as_deref().filter(|key| !key.trim().is_empty()) else {
            log::warn!("No critique API key configured; using fallback title");
            return Critique::missing_key();
        };
        let Some(backend) = self.backend.as_ref() else {
            log::warn!("Critique API key is set but no critique backend is wired; using fallback title");
            return Critique::missing_key();
        };

        match backend
            .generate(key, PROMPT, png, "image/png")
            .and_then(|text| parse_response(&text))
        {
            Ok(critique) => critique,
            Err(err) => {
                log::error!("Error analyzing doodle: {}", err);
                Critique::failed()
            }
        }
    }
}

/// Parse a `{"title", "critique"}` object, tolerating markdown code fences
pub fn parse_response(text: &str) -> Result<Critique, CritiqueError> {
    let cleaned = text.replace("```json", "").replace("```", "");
    Ok(serde_json::from_str(cleaned.trim())?)
}
