use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use doctor_core::{
    SubmissionPolicy, DEFAULT_MAX_FILE_SIZE_MB, DEFAULT_MIN_DESCRIPTION_TOKENS,
    DEFAULT_REQUIRED_EXTENSION,
};
use doctor_engine::{EngineSettings, TransportSettings};
use doctor_logging::{LogDestination, LogSettings};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILENAME: &str = "gcode_doctor.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub policy: PolicyConfig,
    pub transport: TransportConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: TransportSettings::default().endpoint,
            policy: PolicyConfig::default(),
            transport: TransportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub max_file_size_mb: u64,
    pub required_extension: String,
    pub min_description_tokens: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            required_extension: DEFAULT_REQUIRED_EXTENSION.to_string(),
            min_description_tokens: DEFAULT_MIN_DESCRIPTION_TOKENS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        let defaults = TransportSettings::default();
        Self {
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            request_timeout_secs: defaults.request_timeout.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    Terminal,
    File,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub destination: Destination,
    pub level: String,
    pub file_path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            destination: Destination::Terminal,
            level: "warn".to_string(),
            file_path: "gcode_doctor.log".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: AppConfig =
            ron::from_str(&raw).with_context(|| format!("parsing RON: {}", path.display()))?;
        cfg.check()?;
        Ok(cfg)
    }

    /// Explicit path if given, else `./gcode_doctor.ron` if present, else defaults.
    pub fn resolve(user: Option<&Path>) -> Result<Self> {
        if let Some(path) = user {
            return Self::load(path);
        }
        let default = PathBuf::from(DEFAULT_CONFIG_FILENAME);
        if default.exists() {
            Self::load(&default)
        } else {
            Ok(Self::default())
        }
    }

    fn check(&self) -> Result<()> {
        if self.policy.required_extension.is_empty() {
            bail!("policy.required_extension must not be empty");
        }
        if self.transport.connect_timeout_secs == 0 || self.transport.request_timeout_secs == 0 {
            bail!("transport timeouts must be at least one second");
        }
        Ok(())
    }

    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())
            .map_err(|err| anyhow!("serializing config: {err}"))
    }

    pub fn policy(&self) -> SubmissionPolicy {
        SubmissionPolicy {
            max_file_size_mb: self.policy.max_file_size_mb,
            required_extension: self.policy.required_extension.clone(),
            min_description_tokens: self.policy.min_description_tokens,
        }
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            transport: TransportSettings {
                endpoint: self.endpoint.clone(),
                connect_timeout: Duration::from_secs(self.transport.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.transport.request_timeout_secs),
            },
            policy: self.policy(),
        }
    }

    pub fn log_settings(&self, level_override: Option<&str>) -> Result<LogSettings> {
        let level = level_override.unwrap_or(self.logging.level.as_str());
        let level = LevelFilter::from_str(level)
            .map_err(|_| anyhow!("unknown log level: {level}"))?;
        Ok(LogSettings {
            destination: match self.logging.destination {
                Destination::Terminal => LogDestination::Terminal,
                Destination::File => LogDestination::File,
                Destination::Both => LogDestination::Both,
            },
            level,
            file_path: PathBuf::from(&self.logging.file_path),
        })
    }
}
