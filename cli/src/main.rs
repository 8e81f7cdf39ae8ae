use std::path::{Path, PathBuf};

use cabinetry::camera::ViewportMode;
use cabinetry::catalog::{FINISHES, MODULE_CATALOG};
use cabinetry::config::{ConfigError, StudioConfig};
use cabinetry::engine::Studio;
use cabinetry::proposal::ProposalError;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid proposal: {0}")]
    Proposal(#[from] ProposalError),
    #[error("unknown catalog type `{0}`")]
    UnknownCatalogType(String),
    #[error("JSON encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "cabinetry", about = "Furniture layout store and viewport projection")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog modules and finishes.
    Catalog,
    /// Build a layout and print its projected scene.
    Scene(SceneArgs),
    /// Build a layout and print its total price.
    Total(LayoutArgs),
}

#[derive(Args, Debug)]
struct LayoutArgs {
    #[arg(long, help = "Generator response file with a `modules` list")]
    proposal: Option<PathBuf>,

    #[arg(long = "add", value_name = "TYPE", help = "Catalog type to add; repeatable")]
    adds: Vec<String>,
}

#[derive(Args, Debug)]
struct SceneArgs {
    #[command(flatten)]
    layout: LayoutArgs,

    #[arg(long, env = "CABINETRY_VIEWPORT", default_value = "perspective", value_parser = parse_viewport)]
    viewport: ViewportMode,

    #[arg(long, default_value_t = false, help = "Select the last module placed")]
    select_last: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Catalog => print_json(&serde_json::json!({
            "modules": MODULE_CATALOG,
            "finishes": FINISHES,
        })),
        Command::Scene(args) => {
            let mut studio = build_studio(&args.layout)?;
            if !args.select_last {
                studio.select(None);
            }
            studio.set_viewport(args.viewport);
            print_json(&serde_json::to_value(studio.scene())?)
        }
        Command::Total(args) => {
            let studio = build_studio(&args)?;
            print_json(&serde_json::json!({
                "modules": studio.layout().len(),
                "total": studio.total_price(),
            }))
        }
    }
}

/// Proposal modules first, then catalog adds in argument order. The last
/// catalog add, or the last generated module, ends up selected.
fn build_studio(args: &LayoutArgs) -> Result<Studio, CliError> {
    let config = StudioConfig::from_env()?;
    let mut studio = Studio::new(&config);

    if let Some(path) = &args.proposal {
        let text = read_file(path)?;
        let ids = studio.apply_proposal(&text)?;
        info!(count = ids.len(), path = %path.display(), "proposal applied");
        studio.select(ids.last().cloned());
    }

    for kind in &args.adds {
        studio
            .add_from_catalog(kind)
            .ok_or_else(|| CliError::UnknownCatalogType(kind.clone()))?;
    }

    Ok(studio)
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_path_buf(), source })
}

fn parse_viewport(raw: &str) -> Result<ViewportMode, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "perspective" => Ok(ViewportMode::Perspective),
        "top" => Ok(ViewportMode::Top),
        "front" => Ok(ViewportMode::Front),
        "side" => Ok(ViewportMode::Side),
        "engineer" => Ok(ViewportMode::Engineer),
        other => Err(format!("unknown viewport `{other}` (perspective, top, front, side, engineer)")),
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
