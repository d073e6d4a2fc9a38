//! Preview command implementation.

use super::StoryArgs;
use crate::RunOptions;
use crate::domain::AppError;

pub(super) fn run_preview(story: StoryArgs, seed: Option<u32>) -> Result<(), AppError> {
    let options = RunOptions {
        user_input: story.user_input(),
        input_file: story.input,
        seed,
        ..Default::default()
    };

    let result = crate::preview(&options)?;

    println!("=== Prompt Preview (seed {}) ===", result.bundle.seed);
    println!("{}", result.instruction);
    Ok(())
}
