//! Instruction rendering for the two narrative calls.
//!
//! Templates are embedded from `src/assets/prompts` and rendered with strict
//! undefined-variable handling, so a missing field fails loudly.

use std::sync::OnceLock;

use include_dir::{Dir, include_dir};
use minijinja::{Environment, UndefinedBehavior, context};

use crate::domain::{AppError, PromptBundle};

static PROMPTS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/assets/prompts");

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

const SCENE_DESCRIPTION_TEMPLATE: &str = "scene_description.txt";
const SHOT_DIVISION_TEMPLATE: &str = "shot_division.txt";

/// Prefix for every per-shot image prompt.
pub const IMAGE_PROMPT_PREFIX: &str =
    "generate an image frame for a video with the following description: ";

/// Instruction for the first narrative call (bundle -> scene description).
pub fn scene_description_instruction(bundle: &PromptBundle) -> Result<String, AppError> {
    let template = load_template(SCENE_DESCRIPTION_TEMPLATE)?;
    render(
        SCENE_DESCRIPTION_TEMPLATE,
        template,
        context! {
            world => bundle.world,
            characters => bundle.characters,
            scene => bundle.scene,
        },
    )
}

/// Instruction for the second narrative call (scene description -> shot division).
pub fn shot_division_instruction(description: &str) -> Result<String, AppError> {
    let template = load_template(SHOT_DIVISION_TEMPLATE)?;
    render(SHOT_DIVISION_TEMPLATE, template, context! { description => description })
}

/// Image prompt for a single shot.
pub fn image_prompt(description: &str) -> String {
    format!("{}{}", IMAGE_PROMPT_PREFIX, description)
}

fn load_template(name: &str) -> Result<&'static str, AppError> {
    PROMPTS_DIR
        .get_file(name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| {
            AppError::config_error(format!("Embedded prompt template '{}' is missing", name))
        })
}

fn render(name: &str, template: &str, ctx: minijinja::Value) -> Result<String, AppError> {
    let env = ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env
    });

    env.render_str(template, ctx).map_err(|err| {
        AppError::config_error(format!("Failed to render prompt template '{}': {}", name, err))
    })
}
