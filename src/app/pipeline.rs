//! Ordered stage list for a generation run.
//!
//! A pipeline is built once from an explicit list of stages and executed
//! front to back. Each stage takes the state by value and returns it with the
//! fields it owns filled in; any error aborts the remaining stages.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::info;

use crate::app::AppContext;
use crate::domain::instructions::{
    image_prompt, scene_description_instruction, shot_division_instruction,
};
use crate::domain::{
    AppError, PipelineState, PromptBundle, Seed, ServiceKind, ShotId, parse_shot_division,
};
use crate::ports::{ImageGenerator, ImageStore, PNG_SIGNATURE, TextGenerator};

/// One step of the generation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    GenerateSeed,
    PreparePrompt,
    GenerateNarrative,
    ParseShotDivision,
    GenerateImages,
    PersistImages,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 6] = [
        Stage::GenerateSeed,
        Stage::PreparePrompt,
        Stage::GenerateNarrative,
        Stage::ParseShotDivision,
        Stage::GenerateImages,
        Stage::PersistImages,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::GenerateSeed => "generate_seed",
            Stage::PreparePrompt => "prepare_prompt",
            Stage::GenerateNarrative => "generate_narrative",
            Stage::ParseShotDivision => "parse_shot_division",
            Stage::GenerateImages => "generate_images",
            Stage::PersistImages => "persist_images",
        }
    }

    fn run<T, I, S>(
        self,
        ctx: &AppContext<T, I, S>,
        state: PipelineState,
    ) -> Result<PipelineState, AppError>
    where
        T: TextGenerator,
        I: ImageGenerator,
        S: ImageStore,
    {
        match self {
            Stage::GenerateSeed => Ok(generate_seed(state)),
            Stage::PreparePrompt => prepare_prompt(state),
            Stage::GenerateNarrative => generate_narrative(ctx.text(), state),
            Stage::ParseShotDivision => parse_shots(state),
            Stage::GenerateImages => generate_images(ctx.images(), state),
            Stage::PersistImages => persist_images(ctx.store(), state),
        }
    }
}

/// Builder collecting stages in the order they will run.
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    stages: Vec<Stage>,
}

impl PipelineBuilder {
    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline { stages: self.stages }
    }
}

/// Fixed sequence of stages.
#[derive(Debug, Clone)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Seed, prompt, narrative, parse, images, persist.
    pub fn standard() -> Self {
        Stage::ALL.into_iter().fold(Self::builder(), PipelineBuilder::stage).build()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run every stage in order, threading the state through.
    pub fn execute<T, I, S>(
        &self,
        ctx: &AppContext<T, I, S>,
        state: PipelineState,
    ) -> Result<PipelineState, AppError>
    where
        T: TextGenerator,
        I: ImageGenerator,
        S: ImageStore,
    {
        self.stages.iter().try_fold(state, |state, stage| {
            info!(stage = stage.name(), "running stage");
            stage.run(ctx, state)
        })
    }
}

fn missing(stage: Stage, field: &str) -> AppError {
    AppError::config_error(format!(
        "Stage '{}' requires '{}' from an earlier stage",
        stage.name(),
        field
    ))
}

fn generate_seed(mut state: PipelineState) -> PipelineState {
    let seed = *state.seed.get_or_insert_with(Seed::generate);
    info!(%seed, "using seed");
    state
}

fn prepare_prompt(mut state: PipelineState) -> Result<PipelineState, AppError> {
    let seed = state.seed.ok_or_else(|| missing(Stage::PreparePrompt, "seed"))?;
    state.prompts = Some(PromptBundle::prepare(state.user_input.as_ref(), seed));
    Ok(state)
}

fn generate_narrative(
    text: &impl TextGenerator,
    mut state: PipelineState,
) -> Result<PipelineState, AppError> {
    let bundle =
        state.prompts.as_ref().ok_or_else(|| missing(Stage::GenerateNarrative, "prompts"))?;

    info!("Generating scene description");
    let description = text.generate_text(&scene_description_instruction(bundle)?)?;

    info!("Generating shot division");
    let shot_division = text.generate_text(&shot_division_instruction(&description)?)?;
    info!(shot_division = %shot_division, "received shot division");

    state.narrative_text = Some(description);
    state.shot_division_text = Some(shot_division);
    Ok(state)
}

fn parse_shots(mut state: PipelineState) -> Result<PipelineState, AppError> {
    let text = state
        .shot_division_text
        .as_deref()
        .ok_or_else(|| missing(Stage::ParseShotDivision, "shot_division_text"))?;

    state.shots = parse_shot_division(text)?;
    info!(count = state.shots.len(), "parsed shots");
    Ok(state)
}

fn generate_images(
    images: &impl ImageGenerator,
    mut state: PipelineState,
) -> Result<PipelineState, AppError> {
    let seed = state.seed.ok_or_else(|| missing(Stage::GenerateImages, "seed"))?;

    // One seed for every shot in the run.
    let mut generated = Vec::with_capacity(state.shots.len());
    for shot in &state.shots {
        info!(shot = %shot.id, description = %shot.description, "generating image");
        let payload = images.generate_image(&image_prompt(&shot.description), seed)?;
        generated.push((shot.id.clone(), payload));
    }

    state.images = generated;
    Ok(state)
}

fn persist_images(
    store: &impl ImageStore,
    mut state: PipelineState,
) -> Result<PipelineState, AppError> {
    let seed = state.seed.ok_or_else(|| missing(Stage::PersistImages, "seed"))?;
    let directory = store.prepare_directory(seed)?;

    for (shot_id, payload) in &state.images {
        let bytes = decode_image(shot_id, payload)?;
        let path = store.write_image(&directory, shot_id, &bytes)?;
        info!(shot = %shot_id, path = %path.display(), "saved image");
    }

    state.output_directory = Some(directory);
    Ok(state)
}

fn decode_image(shot_id: &ShotId, payload: &str) -> Result<Vec<u8>, AppError> {
    let bytes = STANDARD.decode(payload.trim()).map_err(|e| {
        AppError::external(
            ServiceKind::Image,
            format!("Invalid base64 image payload for shot {}: {}", shot_id, e),
            None,
        )
    })?;

    if !bytes.starts_with(PNG_SIGNATURE) {
        return Err(AppError::external(
            ServiceKind::Image,
            format!("Image payload for shot {} is not a PNG", shot_id),
            None,
        ));
    }
    Ok(bytes)
}
