//! Image-generation service port definition.

use crate::domain::{AppError, Seed};

/// Port for the per-shot image-generation service.
pub trait ImageGenerator {
    /// Generate one image for `prompt`, returning the base64-encoded payload.
    fn generate_image(&self, prompt: &str, seed: Seed) -> Result<String, AppError>;
}
