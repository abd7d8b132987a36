// Supplement Advisor - terminal entry point

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use supplement_advisor::commands;
use supplement_advisor::state::AppState;

#[derive(Parser)]
#[command(name = "supplement-advisor", version)]
#[command(about = "Personalized supplement recommendations from a short health assessment", long_about = None)]
struct Cli {
    /// Config file (default: ~/.supplement-advisor/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Gemini API key for this run only
    #[arg(long, env = "GEMINI_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the health assessment
    Assess {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current settings
    Show,
    /// Store the Gemini API key in the system keyring
    SetKey { key: String },
    /// Remove the stored API key
    ClearKey,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "supplement_advisor=debug,supplement_advisor_llm=debug",
        _ => "supplement_advisor=trace,supplement_advisor_llm=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let state = AppState::new();
    if let Some(key) = cli.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        state.override_credential(key);
    }
    state
        .initialize(cli.config.clone())
        .await
        .context("failed to load configuration")?;

    match cli.command {
        Commands::Assess { json } => commands::run_assessment(&state, json).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::show_settings(&state).await?,
            ConfigAction::SetKey { key } => commands::set_api_key(&state, &key).await?,
            ConfigAction::ClearKey => commands::clear_api_key(&state).await?,
        },
    }
    Ok(())
}
