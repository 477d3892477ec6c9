use anyhow::Result;
use clap::{Parser, Subcommand};
use goldradar::AppCommand;
use goldradar::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the dashboard (default)
    Dashboard,
    /// Flip between DEMO and LIVE mode, then display the dashboard
    Toggle,
    /// Update settings, then display the dashboard
    Configure {
        /// Operating mode (demo|live)
        #[arg(long)]
        mode: Option<String>,
        /// FRED API key; pass an empty string to clear it
        #[arg(long)]
        fred_key: Option<String>,
        /// Treasury real yield source (fiscaldata|none)
        #[arg(long)]
        treasury: Option<String>,
        /// ECB FX source (daily|none)
        #[arg(long)]
        ecb: Option<String>,
        /// Risk data source (fred|none)
        #[arg(long)]
        risk: Option<String>,
    },
}

fn to_app_command(cmd: Commands) -> Result<AppCommand> {
    match cmd {
        Commands::Dashboard => Ok(AppCommand::Dashboard),
        Commands::Toggle => Ok(AppCommand::Toggle),
        Commands::Configure {
            mode,
            fred_key,
            treasury,
            ecb,
            risk,
        } => Ok(AppCommand::Configure {
            mode: mode.as_deref().map(str::parse).transpose()?,
            fred_key,
            tsy_mode: treasury.as_deref().map(str::parse).transpose()?,
            ecb_mode: ecb.as_deref().map(str::parse).transpose()?,
            risk_mode: risk.as_deref().map(str::parse).transpose()?,
        }),
        Commands::Setup => unreachable!("Setup command should be handled separately"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(cli.config_path.as_deref()),
        Some(cmd) => match to_app_command(cmd) {
            Ok(command) => goldradar::run_command(command, cli.config_path.as_deref()).await,
            Err(e) => Err(e),
        },
        None => goldradar::run_command(AppCommand::Dashboard, cli.config_path.as_deref()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup(config_path: Option<&str>) -> Result<()> {
    match config_path {
        Some(path) => goldradar::cli::setup::setup_at_path(path),
        None => goldradar::cli::setup::setup(),
    }
}
