//! Shared testing utilities for shotframe CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        Self { root, work_dir }
    }

    /// Path to the directory used as the CLI working directory.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `shotframe` binary in the work directory.
    ///
    /// The provider key is cleared so each test opts in explicitly.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("shotframe").expect("Failed to locate shotframe binary");
        cmd.current_dir(&self.work_dir)
            .env("HOME", self.root.path())
            .env("RUST_LOG", "warn")
            .env_remove("TOGETHER_API_KEY");
        cmd
    }

    /// Write a file relative to the work directory and return its path.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Write `shotframe.toml` pointing both services at `base_url`.
    pub fn write_config_for(&self, base_url: &str) -> PathBuf {
        self.write_config(base_url, "")
    }

    /// Same as [`write_config_for`](Self::write_config_for) with a fixed `seed`.
    pub fn write_config_with_seed(&self, base_url: &str, seed: u32) -> PathBuf {
        self.write_config(base_url, &format!("seed = {}\n\n", seed))
    }

    fn write_config(&self, base_url: &str, preamble: &str) -> PathBuf {
        self.write_file(
            "shotframe.toml",
            &format!(
                r#"{preamble}[text]
api_url = "{base}/v1/chat/completions"
timeout_secs = 5

[image]
api_url = "{base}/v1/images/generations"
timeout_secs = 5

[output]
root = "renders"
"#,
                preamble = preamble,
                base = base_url
            ),
        )
    }

    /// Directory a run with `seed` writes into, given the config above.
    pub fn run_dir(&self, seed: u32) -> PathBuf {
        self.work_dir.join("renders").join(format!("generated_images_{}", seed))
    }
}
