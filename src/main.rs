use clap::{Parser, Subcommand};
use dreamlab::generation::GenerationError;
use dreamlab::services::design::{self, DesignError};
use dreamlab::state::Session;
use dreamlab::studio::engine::EditorError;
use dreamlab::studio::regions::RegionCatalog;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("generation setup failed: {0}")]
    Setup(#[from] GenerationError),
    #[error(transparent)]
    Design(#[from] DesignError),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error("invalid edit `{0}`; expected name=value")]
    InvalidEdit(String),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "dreamlab", about = "Place generated artwork on a garment mockup")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the placement regions.
    Regions,
    /// Generate one design, apply edits to it, and print the composed scene.
    Generate {
        #[arg(long, default_value = "chest")]
        region: String,
        prompt: String,
        /// Property edit as name=value, e.g. `scale=120` or `removeBackground=true`.
        #[arg(long = "set")]
        edits: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    match Cli::parse().command {
        Command::Regions => run_regions(),
        Command::Generate { region, prompt, edits } => run_generate(&region, &prompt, &edits).await,
    }
}

fn run_regions() -> Result<(), CliError> {
    let catalog = RegionCatalog::garment();
    println!("{}", serde_json::to_string_pretty(catalog.list())?);
    Ok(())
}

async fn run_generate(region: &str, prompt: &str, edits: &[String]) -> Result<(), CliError> {
    let mut session = Session::from_env()?;
    design::generate_design_in(&mut session, region, prompt).await?;

    for edit in edits {
        let (name, raw) = parse_edit(edit)?;
        session.core.update_active_named(name, &raw)?;
    }

    println!("{}", serde_json::to_string_pretty(&session.core.scene())?);
    Ok(())
}

/// Split `name=value`; the value is read as JSON so `120` and `true` keep their types.
fn parse_edit(edit: &str) -> Result<(&str, Value), CliError> {
    let (name, raw) = edit
        .split_once('=')
        .ok_or_else(|| CliError::InvalidEdit(edit.to_string()))?;
    let value = serde_json::from_str(raw.trim()).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.trim(), value))
}
