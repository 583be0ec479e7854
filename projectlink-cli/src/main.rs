//! Projectlink CLI - attach the triggering pull request to a project board
//!
//! Runs as a GitHub Actions step. Any failure is reported as a workflow error
//! annotation and the process exits with status 1.

mod commands;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use projectlink_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::RunArgs;

/// Projectlink: keep pull requests attached to a project board
#[derive(Parser, Debug)]
#[command(name = "projectlink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ~/.config/projectlink/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Node id of the project to attach (overrides config and env)
    #[arg(long, global = true)]
    project_id: Option<String>,

    /// GraphQL endpoint (overrides config and env)
    #[arg(long, global = true)]
    graphql_url: Option<String>,

    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Attach the event's pull request to the project (default)
    Run,

    /// Show current configuration
    Config,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only ever carries workflow commands
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report::set_failed(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> anyhow::Result<()> {
    let load_config = || {
        Config::load_with_overrides(
            cli.config.as_deref(),
            cli.project_id.clone(),
            cli.graphql_url.clone(),
        )
    };

    match cli.command {
        Some(Commands::Run) | None => cli.run.execute(load_config).await,
        Some(Commands::Config) => {
            let config = load_config()?;
            println!("Projectlink Configuration");
            println!("=========================");
            println!();
            println!("GitHub:");
            println!("  graphql_url: {}", config.github.graphql_url);
            println!();
            println!("Project:");
            println!(
                "  project_id: {}",
                config.project.project_id.as_deref().unwrap_or("(not set)")
            );
            println!();
            match cli.config.clone().or_else(Config::default_config_path) {
                Some(path) if path.exists() => {
                    println!("Config file: {}", path.display());
                    println!("  (exists)");
                }
                Some(path) => {
                    println!("Config file: {}", path.display());
                    println!("  (not found - using defaults)");
                }
                None => {}
            }
            Ok(())
        }
        Some(Commands::Version) => {
            println!("projectlink {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
