use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EsError, Result};
use crate::search::cache::DEFAULT_QUERY_CACHE_SIZE;
use crate::search::filters::{RATING_SCALE_MAX, RATING_SCALE_MIN};
use crate::search::matcher::DEFAULT_PARTIAL_MATCH_RATIO;

/// File name of the per-project config, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".entity-search.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration: defaults, then the global and project files (or an
    /// explicit file instead of both), then environment overrides.
    pub fn load(explicit_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("ES_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_patch(&project_root.join(PROJECT_CONFIG_FILE))? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parse a complete config from TOML text, without env overrides.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| EsError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|err| EsError::Config(format!("serialize config: {err}")))
    }

    pub fn validate(&self) -> Result<()> {
        let ratio = self.search.partial_match_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(EsError::Config(format!(
                "search.partial_match_ratio must be in (0, 1], got {ratio}"
            )));
        }
        if self.search.default_rating_min > self.search.default_rating_max {
            return Err(EsError::Config(format!(
                "search.default_rating_min ({}) exceeds search.default_rating_max ({})",
                self.search.default_rating_min, self.search.default_rating_max
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("entity-search/config.toml"))
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        match Self::global_path() {
            Some(path) => Self::load_patch(&path),
            None => Ok(None),
        }
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| EsError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| EsError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
        if let Some(patch) = patch.cache {
            self.cache.merge(patch);
        }
        if let Some(patch) = patch.output {
            self.output.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if env_bool("ES_ROBOT").unwrap_or(false) {
            self.output.format = "json".to_string();
        }
        if env_bool("ES_CACHE_DISABLED").unwrap_or(false) {
            self.cache.enabled = false;
        }
        if std::env::var_os("NO_COLOR").is_some() {
            self.output.color = false;
        }

        if let Some(value) = env_f64("ES_SEARCH_PARTIAL_MATCH_RATIO")? {
            self.search.partial_match_ratio = value;
        }
        if let Some(value) = env_f64("ES_SEARCH_DEFAULT_RATING_MIN")? {
            self.search.default_rating_min = value;
        }
        if let Some(value) = env_f64("ES_SEARCH_DEFAULT_RATING_MAX")? {
            self.search.default_rating_max = value;
        }
        if let Some(value) = env_usize("ES_SEARCH_DEFAULT_LIMIT")? {
            self.search.default_limit = value;
        }

        if let Some(value) = env_bool("ES_CACHE_ENABLED") {
            self.cache.enabled = value;
        }
        if let Some(value) = env_usize("ES_CACHE_QUERY_SIZE")? {
            self.cache.query_cache_size = value;
        }

        if let Some(value) = env_string("ES_OUTPUT_FORMAT") {
            self.output.format = value;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_partial_match_ratio")]
    pub partial_match_ratio: f64,
    #[serde(default = "default_rating_min")]
    pub default_rating_min: f64,
    #[serde(default = "default_rating_max")]
    pub default_rating_max: f64,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            partial_match_ratio: DEFAULT_PARTIAL_MATCH_RATIO,
            default_rating_min: RATING_SCALE_MIN,
            default_rating_max: RATING_SCALE_MAX,
            default_limit: 20,
        }
    }
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.partial_match_ratio {
            self.partial_match_ratio = value;
        }
        if let Some(value) = patch.default_rating_min {
            self.default_rating_min = value;
        }
        if let Some(value) = patch.default_rating_max {
            self.default_rating_max = value;
        }
        if let Some(value) = patch.default_limit {
            self.default_limit = value;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_query_cache_size")]
    pub query_cache_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            query_cache_size: DEFAULT_QUERY_CACHE_SIZE,
        }
    }
}

impl CacheConfig {
    fn merge(&mut self, patch: CachePatch) {
        if let Some(value) = patch.enabled {
            self.enabled = value;
        }
        if let Some(value) = patch.query_cache_size {
            self.query_cache_size = value;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
        }
    }
}

impl OutputConfig {
    fn merge(&mut self, patch: OutputPatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
        if let Some(value) = patch.color {
            self.color = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub search: Option<SearchPatch>,
    pub cache: Option<CachePatch>,
    pub output: Option<OutputPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPatch {
    pub partial_match_ratio: Option<f64>,
    pub default_rating_min: Option<f64>,
    pub default_rating_max: Option<f64>,
    pub default_limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CachePatch {
    pub enabled: Option<bool>,
    pub query_cache_size: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OutputPatch {
    pub format: Option<String>,
    pub color: Option<bool>,
}

const fn default_partial_match_ratio() -> f64 {
    DEFAULT_PARTIAL_MATCH_RATIO
}

const fn default_rating_min() -> f64 {
    RATING_SCALE_MIN
}

const fn default_rating_max() -> f64 {
    RATING_SCALE_MAX
}

const fn default_limit() -> usize {
    20
}

const fn default_true() -> bool {
    true
}

const fn default_query_cache_size() -> usize {
    DEFAULT_QUERY_CACHE_SIZE
}

fn default_format() -> String {
    "human".to_string()
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<usize>()
            .map(Some)
            .map_err(|err| EsError::Config(format!("invalid {key} value {value}: {err}"))),
        Err(_) => Ok(None),
    }
}

fn env_f64(key: &str) -> Result<Option<f64>> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(|err| EsError::Config(format!("invalid {key} value {value}: {err}"))),
        Err(_) => Ok(None),
    }
}
