//! Together-compatible text and image clients using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::domain::{AppError, ImageApiConfig, Seed, ServiceKind, TextApiConfig};
use crate::ports::{ImageGenerator, TextGenerator};

const STOP_SEQUENCES: [&str; 2] = ["<|eot_id|>", "<|eom_id|>"];
const IMAGE_RESPONSE_FORMAT: &str = "b64_json";
const IMAGE_OUTPUT_FORMAT: &str = "png";
const DEFAULT_STATUS_MESSAGE: &str = "request failed";

/// Authenticated JSON transport shared by both clients.
///
/// Performs a single request per call.
#[derive(Clone)]
struct Transport {
    api_key: String,
    client: Client,
    service: ServiceKind,
}

impl Transport {
    fn new(api_key: String, timeout_secs: u64, service: ServiceKind) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                AppError::external(service, format!("Failed to create HTTP client: {}", e), None)
            })?;

        Ok(Self { api_key, client, service })
    }

    fn post<Req, Resp>(&self, url: &Url, request: &Req) -> Result<Resp, AppError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        debug!(service = %self.service, url = %url, "sending request");

        let response = self
            .client
            .post(url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .map_err(|e| {
                AppError::external(self.service, format!("HTTP request failed: {}", e), None)
            })?;

        let status = response.status();
        let body_text = response.text().unwrap_or_default();

        if status.is_success() {
            return serde_json::from_str(&body_text).map_err(|e| {
                AppError::external(
                    self.service,
                    format!("Failed to parse response: {}", e),
                    Some(status.as_u16()),
                )
            });
        }

        let message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status.as_u16() == 429 {
                "Rate limited".to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        Err(AppError::external(self.service, message, Some(status.as_u16())))
    }
}

/// HTTP client for the chat-completions endpoint.
#[derive(Clone)]
pub struct HttpTextGenerator {
    transport: Transport,
    config: TextApiConfig,
}

impl std::fmt::Debug for HttpTextGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTextGenerator")
            .field("api_url", &self.config.api_url)
            .field("model", &self.config.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpTextGenerator {
    pub fn new(api_key: String, config: &TextApiConfig) -> Result<Self, AppError> {
        let transport = Transport::new(api_key, config.timeout_secs, ServiceKind::Text)?;
        Ok(Self { transport, config: config.clone() })
    }
}

impl TextGenerator for HttpTextGenerator {
    fn generate_text(&self, instruction: &str) -> Result<String, AppError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage { role: "system", content: instruction }],
            temperature: self.config.temperature,
            top_p: self.config.top_p,
            top_k: self.config.top_k,
            repetition_penalty: self.config.repetition_penalty,
            stop: &STOP_SEQUENCES,
            stream: false,
        };

        let response: ChatResponse = self.transport.post(&self.config.api_url, &request)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::external(ServiceKind::Text, "No completion content in response", None)
            })
    }
}

/// HTTP client for the image-generation endpoint.
#[derive(Clone)]
pub struct HttpImageGenerator {
    transport: Transport,
    config: ImageApiConfig,
}

impl std::fmt::Debug for HttpImageGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImageGenerator")
            .field("api_url", &self.config.api_url)
            .field("model", &self.config.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpImageGenerator {
    pub fn new(api_key: String, config: &ImageApiConfig) -> Result<Self, AppError> {
        let transport = Transport::new(api_key, config.timeout_secs, ServiceKind::Image)?;
        Ok(Self { transport, config: config.clone() })
    }
}

impl ImageGenerator for HttpImageGenerator {
    fn generate_image(&self, prompt: &str, seed: Seed) -> Result<String, AppError> {
        let request = ImageRequest {
            prompt,
            model: &self.config.model,
            width: self.config.width,
            height: self.config.height,
            steps: self.config.steps,
            n: 1,
            seed: seed.value(),
            response_format: IMAGE_RESPONSE_FORMAT,
            output_format: IMAGE_OUTPUT_FORMAT,
        };

        let response: ImageResponse = self.transport.post(&self.config.api_url, &request)?;

        response
            .data
            .into_iter()
            .next()
            .and_then(|image| image.b64_json)
            .ok_or_else(|| {
                AppError::external(ServiceKind::Image, "No image payload in response", None)
            })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    top_p: f32,
    top_k: u32,
    repetition_penalty: f32,
    stop: &'a [&'a str],
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    prompt: &'a str,
    model: &'a str,
    width: u32,
    height: u32,
    steps: u32,
    n: u32,
    seed: u32,
    response_format: &'a str,
    output_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    #[serde(default)]
    b64_json: Option<String>,
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}
