//! Run command implementation.

use std::path::PathBuf;

use super::StoryArgs;
use crate::RunOptions;
use crate::domain::AppError;

pub(super) fn run_generation(
    story: StoryArgs,
    seed: Option<u32>,
    output_root: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<(), AppError> {
    let options = RunOptions {
        user_input: story.user_input(),
        input_file: story.input,
        seed,
        output_root,
        config_path: config,
    };

    let result = crate::run(options)?;

    println!("Generated {} shot(s) with seed {}", result.shots.len(), result.seed);
    println!("Images saved in directory: {}", result.output_directory.display());
    Ok(())
}
