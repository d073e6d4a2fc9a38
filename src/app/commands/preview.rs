//! Render the first narrative instruction without calling any service.

use crate::app::commands::generate::{RunOptions, resolve_seed, resolve_user_input};
use crate::domain::configuration::load_config;
use crate::domain::instructions::scene_description_instruction;
use crate::domain::{AppError, PromptBundle, Seed};

/// Rendered instruction and the bundle it came from.
#[derive(Debug, Clone)]
pub struct PreviewResult {
    pub bundle: PromptBundle,
    pub instruction: String,
}

/// Prepare the prompt bundle and render the scene-description instruction.
pub fn execute(options: &RunOptions) -> Result<PreviewResult, AppError> {
    let config = load_config(options.config_path.as_deref())?;
    let user_input = resolve_user_input(options)?;
    let seed = resolve_seed(options, &config).unwrap_or_else(Seed::generate);
    let bundle = PromptBundle::prepare(user_input.as_ref(), seed);
    let instruction = scene_description_instruction(&bundle)?;
    Ok(PreviewResult { bundle, instruction })
}
