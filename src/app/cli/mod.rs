//! CLI Adapter.

mod parse;
mod preview;
mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::domain::{AppError, UserInput};

#[derive(Parser)]
#[command(name = "shotframe")]
#[command(version)]
#[command(
    about = "Draft a shot-divided video script with an LLM and render one frame per shot",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the narrative, parse shots, and save one image per shot
    #[clap(visible_alias = "r")]
    Run {
        #[command(flatten)]
        story: StoryArgs,
        /// Fixed seed for image generation (random when omitted)
        #[arg(long)]
        seed: Option<u32>,
        /// Directory that receives generated_images_<seed>/
        #[arg(short = 'o', long)]
        output_root: Option<PathBuf>,
        /// Config file (defaults to ./shotframe.toml when present)
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,
    },
    /// Show the scene-description instruction without calling any service
    #[clap(visible_alias = "p")]
    Preview {
        #[command(flatten)]
        story: StoryArgs,
        /// Fixed seed to attach to the prompt bundle
        #[arg(long)]
        seed: Option<u32>,
    },
    /// Parse a saved shot-division script and print its shots
    Parse {
        /// File containing shot-division text
        file: PathBuf,
        /// Print shots as a JSON object
        #[arg(long)]
        json: bool,
    },
}

/// Story fields shared by `run` and `preview`.
#[derive(Args, Debug, Default)]
pub(crate) struct StoryArgs {
    /// World description
    #[arg(long)]
    world: Option<String>,
    /// Character description (repeat for several characters)
    #[arg(long = "character", value_name = "CHARACTER")]
    characters: Vec<String>,
    /// Scene description
    #[arg(long)]
    scene: Option<String>,
    /// TOML file with world, characters, and scene
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,
}

impl StoryArgs {
    pub(crate) fn user_input(&self) -> UserInput {
        UserInput {
            world: self.world.clone(),
            characters: if self.characters.is_empty() {
                None
            } else {
                Some(self.characters.clone())
            },
            scene: self.scene.clone(),
        }
    }
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_tracing();

    let result: Result<(), AppError> = match cli.command {
        Commands::Run { story, seed, output_root, config } => {
            run::run_generation(story, seed, output_root, config)
        }
        Commands::Preview { story, seed } => preview::run_preview(story, seed),
        Commands::Parse { file, json } => parse::run_parse(&file, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
