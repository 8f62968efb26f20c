use crate::errors::{AppError, AppResult};
use crate::location::{CommandLocation, FixedLocation, LocationProvider, NoLocation};
use crate::models::location::Fix;
use crate::models::work_type::WorkType;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_work_type")]
    pub default_work_type: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationConfig>,
}

/// Where office check-ins get their coordinates from.
/// Either fixed coordinates or a command printing `lat,lon`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

fn default_server_url() -> String {
    "http://localhost:3000".to_string()
}
fn default_request_timeout_ms() -> u64 {
    5000
}
fn default_work_type() -> String {
    "OFFICE".to_string()
}
fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_ms: default_request_timeout_ms(),
            default_work_type: default_work_type(),
            database: default_database(),
            location: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rattendance")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".rattendance")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rattendance.conf")
    }

    /// Return the full path of the SQLite audit database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rattendance.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let cfg: Config = serde_yaml::from_str(&content)?;
            Ok(cfg)
        } else {
            Ok(Config::default())
        }
    }

    /// Create the config directory and write the config file.
    /// In test mode the file is left alone.
    pub fn init_all(&self, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let path = Self::config_file();
        if !is_test {
            let yaml = serde_yaml::to_string(self)?;
            fs::write(&path, yaml)?;
        }

        Ok(path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn work_type(&self) -> AppResult<WorkType> {
        WorkType::from_code(&self.default_work_type)
            .ok_or_else(|| AppError::InvalidWorkType(self.default_work_type.clone()))
    }

    /// Build the location source for office check-ins.
    /// Explicit coordinates win over the configuration.
    pub fn location_provider(&self, cli_fix: Option<Fix>) -> AppResult<Arc<dyn LocationProvider>> {
        if let Some(fix) = cli_fix {
            return Ok(Arc::new(FixedLocation::new(fix)));
        }

        let Some(loc) = &self.location else {
            return Ok(Arc::new(NoLocation));
        };

        match (loc.latitude, loc.longitude, &loc.command) {
            (Some(lat), Some(lon), _) => Ok(Arc::new(FixedLocation::new(Fix::new(lat, lon)?))),
            (None, None, Some(cmd)) if !cmd.trim().is_empty() => {
                Ok(Arc::new(CommandLocation::new(cmd.clone())))
            }
            (None, None, _) => Ok(Arc::new(NoLocation)),
            _ => Err(AppError::Config(
                "location needs both latitude and longitude".to_string(),
            )),
        }
    }
}
