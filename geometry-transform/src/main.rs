//! Point d'entrée CLI pour geometry-transform

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;

use cli::Commands;

/// Reprojeter des géométries entre systèmes de coordonnées
#[derive(Parser)]
#[command(name = "geometry-transform")]
#[command(author, version)]
#[command(about = "Reprojeter des géométries Simple Features (GeoJSON) entre systèmes de coordonnées")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Reproject(args) => {
            info!(path = %args.path.display(), output = %args.output.display(), "Reprojection GeoJSON");
            cli::cmd_reproject(&args)?;
        }
        Commands::Bbox { bbox, from, to } => cli::cmd_bbox(&bbox, &from, &to)?,
        Commands::Point { x, y, z, from, to } => cli::cmd_point(x, y, z, &from, &to)?,
        Commands::Systems => cli::cmd_systems(),
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
