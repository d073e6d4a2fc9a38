//! Text-generation service port definition.

use crate::domain::AppError;

/// Port for the narrative text-generation service.
///
/// One call sends a single system-role instruction and returns the first
/// completion's content. Implementations do not retry.
pub trait TextGenerator {
    fn generate_text(&self, instruction: &str) -> Result<String, AppError>;
}
