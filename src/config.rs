use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::{fs, path::Path, path::PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Demo,
    Live,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Demo => Mode::Live,
            Mode::Live => Mode::Demo,
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Demo => write!(f, "DEMO"),
            Mode::Live => write!(f, "LIVE"),
        }
    }
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "demo" => Ok(Mode::Demo),
            "live" => Ok(Mode::Live),
            _ => Err(anyhow::anyhow!("Invalid mode: {} (demo|live)", s)),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TreasuryMode {
    #[default]
    FiscalData,
    None,
}

impl FromStr for TreasuryMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fiscaldata" => Ok(TreasuryMode::FiscalData),
            "none" => Ok(TreasuryMode::None),
            _ => Err(anyhow::anyhow!(
                "Invalid treasury mode: {} (fiscaldata|none)",
                s
            )),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EcbMode {
    #[default]
    Daily,
    None,
}

impl FromStr for EcbMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(EcbMode::Daily),
            "none" => Ok(EcbMode::None),
            _ => Err(anyhow::anyhow!("Invalid ECB mode: {} (daily|none)", s)),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskMode {
    Fred,
    #[default]
    None,
}

impl FromStr for RiskMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fred" => Ok(RiskMode::Fred),
            "none" => Ok(RiskMode::None),
            _ => Err(anyhow::anyhow!("Invalid risk mode: {} (fred|none)", s)),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FiscalDataProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EcbProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FredProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProvidersConfig {
    pub fiscaldata: Option<FiscalDataProviderConfig>,
    pub ecb: Option<EcbProviderConfig>,
    pub fred: Option<FredProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            fiscaldata: Some(FiscalDataProviderConfig {
                base_url: "https://api.fiscaldata.treasury.gov/services/api/fiscal_service"
                    .to_string(),
            }),
            ecb: Some(EcbProviderConfig {
                base_url: "https://data.ecb.europa.eu".to_string(),
            }),
            fred: Some(FredProviderConfig {
                base_url: "https://api.stlouisfed.org".to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub mode: Mode,
    pub fred_key: String,
    pub tsy_mode: TreasuryMode,
    pub ecb_mode: EcbMode,
    pub risk_mode: RiskMode,
    pub providers: ProvidersConfig,
}

impl AppConfig {
    /// Loads the configuration from the default location. Never fails: a
    /// missing or unreadable file yields the documented defaults.
    pub fn load() -> Self {
        debug!("Loading default config");
        match Self::default_config_path() {
            Ok(path) => Self::load_from_path(path),
            Err(e) => {
                warn!("Could not determine config path: {e}. Using defaults");
                Self::default()
            }
        }
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "goldradar")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let config_str = match fs::read_to_string(path.as_ref()) {
            Ok(s) => s,
            Err(e) => {
                debug!(
                    "Config file {} not readable ({e}). Using defaults",
                    path.as_ref().display()
                );
                return Self::default();
            }
        };

        match serde_yaml::from_str(&config_str) {
            Ok(config) => {
                debug!("Successfully loaded config");
                config
            }
            Err(e) => {
                warn!(
                    "Failed to parse config file {}: {e}. Using defaults",
                    path.as_ref().display()
                );
                Self::default()
            }
        }
    }

    /// Writes every field back to the default config location.
    pub fn save(&self) -> Result<()> {
        self.save_to_path(Self::default_config_path()?)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let config_str = serde_yaml::to_string(self).context("Failed to serialize config")?;
        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Flips DEMO and LIVE, returning the new mode. The caller persists.
    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.mode, Mode::Demo);
        assert_eq!(config.fred_key, "");
        assert_eq!(config.tsy_mode, TreasuryMode::FiscalData);
        assert_eq!(config.ecb_mode, EcbMode::Daily);
        assert_eq!(config.risk_mode, RiskMode::None);
        assert!(config.providers.fiscaldata.is_some());
        assert!(config.providers.ecb.is_some());
        assert!(config.providers.fred.is_some());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from_path("/nonexistent/goldradar/config.yaml");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "mode: [not, a, mode").unwrap();
        let config = AppConfig::load_from_path(file.path());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_absent_keys_substitute_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "mode: live\nfred_key: abc123\n").unwrap();
        let config = AppConfig::load_from_path(file.path());
        assert_eq!(config.mode, Mode::Live);
        assert_eq!(config.fred_key, "abc123");
        assert_eq!(config.tsy_mode, TreasuryMode::FiscalData);
        assert_eq!(config.ecb_mode, EcbMode::Daily);
        assert_eq!(config.risk_mode, RiskMode::None);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = AppConfig::default();
        config.mode = Mode::Live;
        config.fred_key = "secret".to_string();
        config.risk_mode = RiskMode::Fred;
        config.tsy_mode = TreasuryMode::None;
        config.save_to_path(&path).unwrap();

        let loaded = AppConfig::load_from_path(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_toggle_mode_flips_and_flips_back() {
        let mut config = AppConfig::default();
        assert_eq!(config.toggle_mode(), Mode::Live);
        assert_eq!(config.mode, Mode::Live);
        assert_eq!(config.toggle_mode(), Mode::Demo);
        assert_eq!(config.mode, Mode::Demo);
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(Mode::Demo.to_string(), "DEMO");
        assert_eq!(Mode::Live.to_string(), "LIVE");
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("live".parse::<Mode>().unwrap(), Mode::Live);
        assert_eq!(
            "fiscaldata".parse::<TreasuryMode>().unwrap(),
            TreasuryMode::FiscalData
        );
        assert_eq!("none".parse::<EcbMode>().unwrap(), EcbMode::None);
        assert_eq!("fred".parse::<RiskMode>().unwrap(), RiskMode::Fred);
        assert!("sdw".parse::<EcbMode>().is_err());
    }
}
