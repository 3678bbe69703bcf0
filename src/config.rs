//! Server configuration, loaded from an optional TOML file.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org/route/v1";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub osrm: OsrmConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
    /// Frontend entry page served at `/`
    pub index_html: PathBuf,
    /// Directory mounted at `/llm-html`
    pub llm_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DataConfig {
    pub dir: PathBuf,
    pub points_csv: String,
    pub database_csv: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OsrmConfig {
    pub enabled: bool,
    pub url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8000".to_string(),
            index_html: PathBuf::from("index.html"),
            llm_dir: PathBuf::from("llm-html"),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            points_csv: "lokalzacja.csv".to_string(),
            database_csv: "database.csv".to_string(),
        }
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: DEFAULT_OSRM_URL.to_string(),
            profile: "walking".to_string(),
            timeout_secs: 20,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.osrm.base_url()?;
        if self.osrm.profile.is_empty() {
            return Err(Error::Config("osrm.profile must not be empty".into()));
        }
        if self.osrm.timeout_secs == 0 {
            return Err(Error::Config("osrm.timeout_secs must be positive".into()));
        }
        Ok(())
    }

    pub fn points_csv_path(&self) -> PathBuf {
        self.data.dir.join(&self.data.points_csv)
    }

    pub fn database_csv_path(&self) -> PathBuf {
        self.data.dir.join(&self.data.database_csv)
    }
}

impl OsrmConfig {
    /// Parsed service root, always ending in a slash so profile joins append.
    pub fn base_url(&self) -> Result<Url> {
        let mut raw = self.url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw)
            .map_err(|e| Error::Config(format!("invalid osrm.url '{}': {}", self.url, e)))?;
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!("osrm.url '{}' is not a base URL", self.url)));
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
