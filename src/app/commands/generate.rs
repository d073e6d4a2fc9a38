//! Full generation run: narrative, shot division, images, files.

use std::path::PathBuf;

use tracing::info;

use crate::adapters::{FilesystemImageStore, HttpImageGenerator, HttpTextGenerator};
use crate::app::AppContext;
use crate::app::pipeline::Pipeline;
use crate::domain::configuration::{api_key_from_env, load_config, load_user_input};
use crate::domain::{AppError, PipelineState, RunConfig, Seed, ShotList, UserInput};
use crate::ports::{ImageGenerator, ImageStore, TextGenerator};

/// Options for a generation run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Story fields given directly; they override `input_file` per field.
    pub user_input: UserInput,
    /// TOML file with `world`, `characters`, `scene`.
    pub input_file: Option<PathBuf>,
    /// Fixed seed instead of a time-derived one.
    pub seed: Option<u32>,
    /// Override for `[output] root`.
    pub output_root: Option<PathBuf>,
    /// Explicit config file.
    pub config_path: Option<PathBuf>,
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub seed: Seed,
    pub shots: ShotList,
    pub output_directory: PathBuf,
}

/// Execute a run against the configured HTTP services and local filesystem.
pub fn execute(options: RunOptions) -> Result<RunResult, AppError> {
    let config = load_config(options.config_path.as_deref())?;
    let user_input = resolve_user_input(&options)?;
    let api_key = api_key_from_env()?;

    let text = HttpTextGenerator::new(api_key.clone(), &config.text)?;
    let images = HttpImageGenerator::new(api_key, &config.image)?;
    let root = options.output_root.clone().unwrap_or_else(|| config.output.root.clone());
    let store = FilesystemImageStore::new(root);

    info!(root = %store.root().display(), "Starting shot generation run");
    let ctx = AppContext::new(text, images, store);
    execute_with(&ctx, user_input, resolve_seed(&options, &config))
}

/// Execute a run with explicit collaborators.
pub fn execute_with<T, I, S>(
    ctx: &AppContext<T, I, S>,
    user_input: Option<UserInput>,
    seed: Option<Seed>,
) -> Result<RunResult, AppError>
where
    T: TextGenerator,
    I: ImageGenerator,
    S: ImageStore,
{
    let mut state = PipelineState::new(user_input);
    if let Some(seed) = seed {
        state = state.with_seed(seed);
    }

    let state = Pipeline::standard().execute(ctx, state)?;

    let seed = state.seed.ok_or_else(|| AppError::config_error("Run finished without a seed"))?;
    let output_directory = state
        .output_directory
        .ok_or_else(|| AppError::config_error("Run finished without an output directory"))?;

    Ok(RunResult { seed, shots: state.shots, output_directory })
}

/// `--seed` wins over the config file; `None` means generate one.
pub(crate) fn resolve_seed(options: &RunOptions, config: &RunConfig) -> Option<Seed> {
    options.seed.or(config.seed).map(Seed::new)
}

/// Merge the optional input file with directly supplied fields.
pub(crate) fn resolve_user_input(options: &RunOptions) -> Result<Option<UserInput>, AppError> {
    let from_file = match &options.input_file {
        Some(path) => load_user_input(path)?,
        None => UserInput::default(),
    };
    let merged = from_file.merged_with(options.user_input.clone());
    Ok(if merged.is_empty() { None } else { Some(merged) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeImageGenerator, FakeTextGenerator, MemoryImageStore};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn execute_with_reports_seed_shots_and_directory() {
        let ctx = AppContext::new(
            FakeTextGenerator::new(["desc", "**Shot 1: A**\n* one\n**Shot 2: B**\n* two"]),
            FakeImageGenerator::new(),
            MemoryImageStore::new("runs"),
        );

        let result = execute_with(&ctx, None, Some(Seed::new(31))).unwrap();

        assert_eq!(result.seed, Seed::new(31));
        assert_eq!(result.shots.len(), 2);
        assert_eq!(result.output_directory, PathBuf::from("runs/generated_images_31"));
    }

    #[test]
    fn resolve_seed_prefers_flag_over_config() {
        let config = RunConfig { seed: Some(5), ..Default::default() };

        let flagged = RunOptions { seed: Some(9), ..Default::default() };
        assert_eq!(resolve_seed(&flagged, &config), Some(Seed::new(9)));
        assert_eq!(resolve_seed(&RunOptions::default(), &config), Some(Seed::new(5)));
        assert_eq!(resolve_seed(&RunOptions::default(), &RunConfig::default()), None);
    }

    #[test]
    fn resolve_user_input_without_sources_is_none() {
        assert_eq!(resolve_user_input(&RunOptions::default()).unwrap(), None);
    }

    #[test]
    fn resolve_user_input_prefers_direct_fields_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("story.toml");
        fs::write(&path, "world = \"a reef\"\nscene = \"a storm rolls in\"\n").unwrap();

        let options = RunOptions {
            user_input: UserInput { scene: Some("calm seas".to_string()), ..Default::default() },
            input_file: Some(path),
            ..Default::default()
        };

        let input = resolve_user_input(&options).unwrap().unwrap();

        assert_eq!(input.world.as_deref(), Some("a reef"));
        assert_eq!(input.scene.as_deref(), Some("calm seas"));
        assert_eq!(input.characters, None);
    }
}
