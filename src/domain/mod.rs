pub mod configuration;
pub mod error;
pub mod instructions;
pub mod pipeline_state;
pub mod prompt_bundle;
pub mod seed;
pub mod shot_division;

pub use configuration::{ImageApiConfig, OutputConfig, RunConfig, TextApiConfig};
pub use error::{AppError, ServiceKind};
pub use pipeline_state::PipelineState;
pub use prompt_bundle::{PromptBundle, UserInput};
pub use seed::Seed;
pub use shot_division::{Shot, ShotDivisionError, ShotId, ShotList, parse_shot_division};
