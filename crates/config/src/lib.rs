//! Layered configuration for pricebot.
//!
//! Sources, lowest priority first:
//!
//! 1. built-in defaults,
//! 2. a config file (`.toml`, `.yaml`/`.yml` or `.json`), either given
//!    explicitly or `pricebot.toml` in the platform config directory,
//! 3. `PRICEBOT_`-prefixed environment variables, with `__` between section
//!    and key (`PRICEBOT_CACHE__TTL_MS=5000`).

pub mod error;

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_PREFIX: &str = "PRICEBOT_";
const CONFIG_FILE_NAME: &str = "pricebot.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache: CacheSettings,
    pub matcher: MatchSettings,
    pub lookup: LookupSettings,
    pub source: SourceSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// How long a reply is served from the cache.
    pub ttl_ms: u64,
    /// Entries older than this are removed by the background sweep.
    pub retention_ms: u64,
    pub sweep_interval_ms: u64,
}
impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub fn retention(&self) -> Duration {
        Duration::from_millis(self.retention_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}
impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_ms: 30_000,
            retention_ms: 180_000,
            sweep_interval_ms: 60_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Fraction of query words a title has to cover to count as a match.
    pub coverage_threshold: f64,
    /// Maximum length difference for the last-character word comparison.
    pub length_tolerance: usize,
}
impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            coverage_threshold: 0.8,
            length_tolerance: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    /// Addressee when the caller doesn't name one.
    pub default_user: String,
    /// Give up on the listing source after this long. No deadline when unset.
    pub fetch_timeout_ms: Option<u64>,
}
impl LookupSettings {
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms.map(Duration::from_millis)
    }
}
impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            default_user: "Streamer".to_string(),
            fetch_timeout_ms: Some(10_000),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Custom extraction strategies, tried in order. Empty means the built-in
    /// cascade.
    pub strategies: Vec<StrategySettings>,
}

/// CSS selectors for one results-page layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategySettings {
    pub name: String,
    pub card: String,
    pub title: String,
    pub set_name: String,
    pub price: String,
}

impl Config {
    /// Default location of the config file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "pricebot").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// The merged configuration sources, before extraction.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        let file = match path {
            Some(path) if !path.is_file() => {
                tracing::error!(path = %path.display(), "Config file does not exist");
                exn::bail!(ErrorKind::Load);
            },
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.is_file()),
        };
        if let Some(file) = file {
            tracing::debug!(path = %file.display(), "Reading config file");
            figment = match file.extension().and_then(|ext| ext.to_str()) {
                Some("yaml" | "yml") => figment.merge(Yaml::file(&file)),
                Some("json") => figment.merge(Json::file(&file)),
                _ => figment.merge(Toml::file(&file)),
            };
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Load and validate the configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::from_figment(&Self::figment(path)?)
    }

    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| exn::Exn::from(ErrorKind::Invalid(reason.to_string()));
        if self.cache.ttl_ms == 0 {
            return Err(invalid("cache.ttl_ms must be greater than zero"));
        }
        if self.cache.retention_ms < self.cache.ttl_ms {
            return Err(invalid("cache.retention_ms must be at least cache.ttl_ms"));
        }
        if self.cache.sweep_interval_ms == 0 {
            return Err(invalid("cache.sweep_interval_ms must be greater than zero"));
        }
        let threshold = self.matcher.coverage_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(invalid("matcher.coverage_threshold must be in (0, 1]"));
        }
        if self.lookup.default_user.trim().is_empty() {
            return Err(invalid("lookup.default_user must not be blank"));
        }
        Ok(())
    }
}
