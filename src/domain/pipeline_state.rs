use std::path::PathBuf;

use crate::domain::{PromptBundle, Seed, ShotId, ShotList, UserInput};

/// Record threaded through every pipeline stage.
///
/// Each stage takes the state by value and returns it with only its own
/// fields filled in.
#[derive(Debug, Clone, Default)]
pub struct PipelineState {
    /// Raw story fields supplied by the caller.
    pub user_input: Option<UserInput>,
    pub seed: Option<Seed>,
    pub prompts: Option<PromptBundle>,
    pub narrative_text: Option<String>,
    pub shot_division_text: Option<String>,
    pub shots: ShotList,
    /// Base64 payloads in shot order.
    pub images: Vec<(ShotId, String)>,
    pub output_directory: Option<PathBuf>,
}

impl PipelineState {
    pub fn new(user_input: Option<UserInput>) -> Self {
        Self { user_input, ..Default::default() }
    }

    /// Start from a caller-chosen seed instead of a generated one.
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }
}
