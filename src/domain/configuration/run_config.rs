//! Pipeline configuration domain models.

use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use crate::domain::AppError;

/// Configuration for a generation run, loaded from `shotframe.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Fixed image seed; `--seed` takes precedence.
    #[serde(default)]
    pub seed: Option<u32>,
    /// Text-generation service configuration.
    #[serde(default)]
    pub text: TextApiConfig,
    /// Image-generation service configuration.
    #[serde(default)]
    pub image: ImageApiConfig,
    /// Output location configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.text.validate()?;
        self.image.validate()?;
        Ok(())
    }
}

/// Chat-completions endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextApiConfig {
    /// Chat-completions endpoint URL.
    #[serde(default = "default_text_api_url")]
    pub api_url: Url,
    /// Model identifier.
    #[serde(default = "default_text_model")]
    pub model: String,
    #[serde(default = "default_sampling")]
    pub temperature: f32,
    #[serde(default = "default_sampling")]
    pub top_p: f32,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default = "default_repetition_penalty")]
    pub repetition_penalty: f32,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for TextApiConfig {
    fn default() -> Self {
        Self {
            api_url: default_text_api_url(),
            model: default_text_model(),
            temperature: default_sampling(),
            top_p: default_sampling(),
            top_k: default_top_k(),
            repetition_penalty: default_repetition_penalty(),
            timeout_secs: default_timeout(),
        }
    }
}

impl TextApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.model.trim().is_empty() {
            return Err(AppError::InvalidConfig("text.model must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "text.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Image-generation endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageApiConfig {
    /// Image-generation endpoint URL.
    #[serde(default = "default_image_api_url")]
    pub api_url: Url,
    /// Model identifier.
    #[serde(default = "default_image_model")]
    pub model: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Diffusion step count.
    #[serde(default = "default_steps")]
    pub steps: u32,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ImageApiConfig {
    fn default() -> Self {
        Self {
            api_url: default_image_api_url(),
            model: default_image_model(),
            width: default_width(),
            height: default_height(),
            steps: default_steps(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ImageApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.model.trim().is_empty() {
            return Err(AppError::InvalidConfig("image.model must not be empty".to_string()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(AppError::InvalidConfig(
                "image.width and image.height must be greater than 0".to_string(),
            ));
        }
        if self.steps == 0 {
            return Err(AppError::InvalidConfig("image.steps must be greater than 0".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "image.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where run directories are created.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Parent directory of `generated_images_<seed>/`.
    #[serde(default = "default_output_root")]
    pub root: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { root: default_output_root() }
    }
}

fn default_text_api_url() -> Url {
    Url::parse("https://api.together.xyz/v1/chat/completions")
        .expect("Default text API URL must be valid")
}

fn default_image_api_url() -> Url {
    Url::parse("https://api.together.xyz/v1/images/generations")
        .expect("Default image API URL must be valid")
}

fn default_text_model() -> String {
    "meta-llama/Llama-3.2-11B-Vision-Instruct-Turbo".to_string()
}

fn default_image_model() -> String {
    "black-forest-labs/FLUX.1-schnell".to_string()
}

fn default_sampling() -> f32 {
    0.7
}

fn default_top_k() -> u32 {
    50
}

fn default_repetition_penalty() -> f32 {
    1.0
}

fn default_timeout() -> u64 {
    120
}

fn default_width() -> u32 {
    1024
}

fn default_height() -> u32 {
    768
}

fn default_steps() -> u32 {
    4
}

fn default_output_root() -> PathBuf {
    PathBuf::from(".")
}
