//! Story inputs and their normalized bundle.

use serde::Deserialize;

use crate::domain::Seed;

pub const DEFAULT_WORLD: &str = "A fantasy forest with a castle";
pub const DEFAULT_CHARACTERS: [&str; 2] = ["a brave knight", "a fierce dragon"];
pub const DEFAULT_SCENE: &str = "a knight battles a dragon in the forest.";

/// User-supplied story fields. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserInput {
    #[serde(default)]
    pub world: Option<String>,
    #[serde(default)]
    pub characters: Option<Vec<String>>,
    #[serde(default)]
    pub scene: Option<String>,
}

impl UserInput {
    /// Field-wise merge where values present in `overrides` win.
    pub fn merged_with(self, overrides: UserInput) -> UserInput {
        UserInput {
            world: overrides.world.or(self.world),
            characters: overrides.characters.or(self.characters),
            scene: overrides.scene.or(self.scene),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_none() && self.characters.is_none() && self.scene.is_none()
    }
}

/// Normalized world/characters/scene record with the run seed attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBundle {
    pub world: String,
    pub characters: Vec<String>,
    pub scene: String,
    pub seed: Seed,
}

impl PromptBundle {
    /// Fill missing fields with defaults and attach `seed`.
    pub fn prepare(input: Option<&UserInput>, seed: Seed) -> Self {
        let input = input.cloned().unwrap_or_default();
        Self {
            world: input.world.unwrap_or_else(|| DEFAULT_WORLD.to_string()),
            characters: input
                .characters
                .unwrap_or_else(|| DEFAULT_CHARACTERS.iter().map(|c| c.to_string()).collect()),
            scene: input.scene.unwrap_or_else(|| DEFAULT_SCENE.to_string()),
            seed,
        }
    }
}
