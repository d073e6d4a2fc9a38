use std::sync::{Arc, Mutex};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::domain::{AppError, Seed};
use crate::ports::ImageGenerator;

/// Image generator that records requests and returns a fixed payload.
#[derive(Clone)]
pub struct FakeImageGenerator {
    payload: String,
    requests: Arc<Mutex<Vec<(String, Seed)>>>,
}

impl FakeImageGenerator {
    /// Returns a base64-encoded PNG signature for every request.
    pub fn new() -> Self {
        Self::with_payload(STANDARD.encode(b"\x89PNG\r\n\x1a\n"))
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self { payload: payload.into(), requests: Arc::new(Mutex::new(vec![])) }
    }

    pub fn requests(&self) -> Vec<(String, Seed)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for FakeImageGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageGenerator for FakeImageGenerator {
    fn generate_image(&self, prompt: &str, seed: Seed) -> Result<String, AppError> {
        self.requests.lock().unwrap().push((prompt.to_string(), seed));
        Ok(self.payload.clone())
    }
}
