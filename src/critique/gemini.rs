//! Gemini `generateContent` backend for the critic.

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::CritiqueBackend;
use crate::error::CritiqueError;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const API_KEY_HEADER: &str = "x-goog-api-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Posts a JSON body and returns the response body
pub trait HttpTransport: Send + Sync {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, CritiqueError>;
}

/// Blocking HTTPS transport; runs on the critique worker thread
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }
}

impl HttpTransport for UreqTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, CritiqueError> {
        let mut request = self
            .agent
            .post(url)
            .set("Content-Type", "application/json");
        for (name, value) in headers {
            request = request.set(name, value);
        }

        match request.send_string(body) {
            Ok(response) => response
                .into_string()
                .map_err(|err| CritiqueError::Backend(err.to_string())),
            Err(ureq::Error::Status(code, response)) => {
                let detail = response.into_string().unwrap_or_default();
                Err(CritiqueError::Backend(format!("HTTP {code}: {detail}")))
            }
            Err(err) => Err(CritiqueError::Backend(err.to_string())),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 2],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum RequestPart<'a> {
    Text(&'a str),
    InlineData(InlineData<'a>),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Sends the prompt plus the inline image and returns the model's text
pub struct GeminiBackend<T = UreqTransport> {
    transport: T,
    endpoint: String,
    model: String,
}

impl GeminiBackend {
    pub fn new() -> Self {
        Self::with_transport(UreqTransport::default())
    }
}

impl Default for GeminiBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HttpTransport> GeminiBackend<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

fn request_body(prompt: &str, image: &[u8], mime_type: &str) -> Result<String, CritiqueError> {
    let request = GenerateRequest {
        contents: [RequestContent {
            parts: [
                RequestPart::Text(prompt),
                RequestPart::InlineData(InlineData {
                    mime_type,
                    data: base64::engine::general_purpose::STANDARD.encode(image),
                }),
            ],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
        },
    };
    Ok(serde_json::to_string(&request)?)
}

/// Text of the first candidate, its parts joined
fn response_text(body: &str) -> Result<String, CritiqueError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(CritiqueError::EmptyResponse);
    }
    Ok(text)
}

impl<T: HttpTransport> CritiqueBackend for GeminiBackend<T> {
    fn generate(
        &self,
        api_key: &str,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String, CritiqueError> {
        let body = request_body(prompt, image, mime_type)?;
        let url = self.url();
        log::debug!("Requesting critique from {} ({} image bytes)", url, image.len());
        let response = self
            .transport
            .post_json(&url, &[(API_KEY_HEADER, api_key)], &body)?;
        response_text(&response)
    }
}
