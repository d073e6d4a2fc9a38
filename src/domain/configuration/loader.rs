//! Run configuration and story input loading.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, RunConfig, UserInput};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "shotframe.toml";

/// Environment variable holding the provider API key.
pub const API_KEY_ENV: &str = "TOGETHER_API_KEY";

/// Load the run configuration.
///
/// An explicit path must exist. Without one, `./shotframe.toml` is used when
/// present and built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<RunConfig, AppError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !fallback.is_file() {
                return Ok(RunConfig::default());
            }
            fallback
        }
    };

    let content = read_named_file(&path, "Config file")?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<RunConfig, AppError> {
    let config: RunConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load story fields from a TOML input file.
pub fn load_user_input(path: &Path) -> Result<UserInput, AppError> {
    let content = read_named_file(path, "Input file")?;
    Ok(toml::from_str(&content)?)
}

/// Read the provider API key from the environment.
pub fn api_key_from_env() -> Result<String, AppError> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(AppError::EnvironmentVariableMissing(API_KEY_ENV.into())),
    }
}

fn read_named_file(path: &Path, what: &str) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            AppError::config_error(format!("{} not found: {}", what, path.display()))
        } else {
            AppError::Io(err)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn run_config_parses_from_toml() {
        let toml = r#"
[text]
api_url = "https://example.com/v1/chat"
model = "tiny-llm"
timeout_secs = 10

[image]
width = 512
height = 512
steps = 8

[output]
root = "renders"
"#;
        let config = parse_config_content(toml).unwrap();

        assert_eq!(config.text.api_url.as_str(), "https://example.com/v1/chat");
        assert_eq!(config.text.model, "tiny-llm");
        assert_eq!(config.image.width, 512);
        assert_eq!(config.image.steps, 8);
        assert_eq!(config.image.model, "black-forest-labs/FLUX.1-schnell");
        assert_eq!(config.output.root, PathBuf::from("renders"));
    }

    #[test]
    fn run_config_reads_top_level_seed() {
        let config = parse_config_content("seed = 1234\n\n[output]\nroot = \"out\"\n").unwrap();
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.output.root, PathBuf::from("out"));
    }

    #[test]
    fn run_config_rejects_seed_outside_u32() {
        let result = parse_config_content("seed = 4294967296\n");
        assert!(matches!(result, Err(AppError::TomlParseError(_))));
    }

    #[test]
    fn run_config_uses_defaults_for_missing_sections() {
        let config = parse_config_content("").unwrap();
        assert_eq!(config.image.height, 768);
        assert_eq!(config.text.timeout_secs, 120);
    }

    #[test]
    fn run_config_validation_fails() {
        let result = parse_config_content("[image]\nsteps = 0\n");
        assert!(matches!(result, Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn run_config_rejects_unknown_fields() {
        let result = parse_config_content("[image]\nquality = \"hd\"\n");
        assert!(matches!(result, Err(AppError::TomlParseError(_))));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = load_config(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[image]\nwidth = 640\n").unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.image.width, 640);
    }

    #[test]
    fn user_input_file_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("story.toml");
        fs::write(&path, "scene = \"a duel at dusk\"\n").unwrap();

        let input = load_user_input(&path).unwrap();

        assert_eq!(input.scene.as_deref(), Some("a duel at dusk"));
        assert!(input.world.is_none());
    }

    struct EnvVarGuard {
        key: String,
        original: Option<std::ffi::OsString>,
    }

    impl EnvVarGuard {
        fn set<K: Into<String>, V: AsRef<std::ffi::OsStr>>(key: K, value: V) -> Self {
            let key = key.into();
            let original = std::env::var_os(&key);
            unsafe {
                std::env::set_var(&key, value);
            }
            Self { key, original }
        }

        fn remove<K: Into<String>>(key: K) -> Self {
            let key = key.into();
            let original = std::env::var_os(&key);
            unsafe {
                std::env::remove_var(&key);
            }
            Self { key, original }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            unsafe {
                match self.original.as_ref() {
                    Some(original) => std::env::set_var(&self.key, original),
                    None => std::env::remove_var(&self.key),
                }
            }
        }
    }

    #[test]
    #[serial]
    fn api_key_read_from_env() {
        let _guard = EnvVarGuard::set(API_KEY_ENV, "secret");
        assert_eq!(api_key_from_env().unwrap(), "secret");
    }

    #[test]
    #[serial]
    fn missing_api_key_is_reported() {
        let _guard = EnvVarGuard::remove(API_KEY_ENV);
        let err = api_key_from_env().unwrap_err();
        assert!(
            matches!(err, AppError::EnvironmentVariableMissing(ref name) if name == API_KEY_ENV)
        );
    }

    #[test]
    #[serial]
    fn blank_api_key_is_treated_as_missing() {
        let _guard = EnvVarGuard::set(API_KEY_ENV, "  ");
        assert!(api_key_from_env().is_err());
    }
}
