pub mod cli;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod demo;
pub mod providers;

use crate::config::{AppConfig, EcbMode, Mode, RiskMode, TreasuryMode};
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Dashboard,
    Toggle,
    Configure {
        mode: Option<Mode>,
        fred_key: Option<String>,
        tsy_mode: Option<TreasuryMode>,
        ecb_mode: Option<EcbMode>,
        risk_mode: Option<RiskMode>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("GoldRadar starting...");

    let mut config = match config_path {
        Some(path) => AppConfig::load_from_path(path),
        None => AppConfig::load(),
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Dashboard => {}
        AppCommand::Toggle => {
            let mode = config.toggle_mode();
            persist(&config, config_path)?;
            info!("Switched to {mode} mode");
        }
        AppCommand::Configure {
            mode,
            fred_key,
            tsy_mode,
            ecb_mode,
            risk_mode,
        } => {
            if let Some(mode) = mode {
                config.mode = mode;
            }
            if let Some(fred_key) = fred_key {
                config.fred_key = fred_key;
            }
            if let Some(tsy_mode) = tsy_mode {
                config.tsy_mode = tsy_mode;
            }
            if let Some(ecb_mode) = ecb_mode {
                config.ecb_mode = ecb_mode;
            }
            if let Some(risk_mode) = risk_mode {
                config.risk_mode = risk_mode;
            }
            persist(&config, config_path)?;
            info!("Configuration updated");
        }
    }

    let fiscal_base = config
        .providers
        .fiscaldata
        .as_ref()
        .map_or(
            "https://api.fiscaldata.treasury.gov/services/api/fiscal_service",
            |p| &p.base_url,
        );
    let ecb_base = config
        .providers
        .ecb
        .as_ref()
        .map_or("https://data.ecb.europa.eu", |p| &p.base_url);
    let fred_base = config
        .providers
        .fred
        .as_ref()
        .map_or("https://api.stlouisfed.org", |p| &p.base_url);

    let real_yield_provider = providers::fiscaldata::FiscalDataProvider::new(fiscal_base);
    let fx_provider = providers::ecb::EcbProvider::new(ecb_base);
    let risk_provider = providers::fred::FredProvider::new(fred_base, &config.fred_key);

    let spinner = match config.mode {
        Mode::Live => Some(cli::ui::new_spinner("Fetching live data...")),
        Mode::Demo => None,
    };
    let (series, score) = dashboard::boot(
        &config,
        &real_yield_provider,
        &fx_provider,
        &risk_provider,
    )
    .await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    println!("{}", cli::dashboard::render(config.mode, &series, &score));
    Ok(())
}

fn persist(config: &AppConfig, config_path: Option<&str>) -> Result<()> {
    match config_path {
        Some(path) => config.save_to_path(path),
        None => config.save(),
    }
}
