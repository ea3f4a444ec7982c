use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::plan::CadenceConfig;
use crate::scoring::{EngagementWeights, ScoreBlend};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub best_hours: usize,
    pub top_hashtags: usize,
    pub hashtag_leaders: usize,
    pub plan_hashtags: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            best_hours: 3,
            top_hashtags: 15,
            hashtag_leaders: 20,
            plan_hashtags: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    pub engagement: EngagementWeights,
    pub blend: ScoreBlend,
    pub limits: LimitsConfig,
    pub cadence: CadenceConfig,
    pub server: ServerConfig,
}

impl InsightsConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => InsightsConfig::default(),
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read config: {}", err))?;
        toml::from_str(&contents).map_err(|err| format!("failed to parse config: {}", err))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|err| format!("failed to create config dir: {}", err))?;
            }
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload).map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Some(value) = env_parse::<f64>("INSIGHTS_REACH_WEIGHT") {
            self.blend.reach = value;
        }
        if let Some(value) = env_parse::<f64>("INSIGHTS_ENGAGEMENT_WEIGHT") {
            self.blend.engagement = value;
        }
        if let Some(value) = env_parse::<usize>("INSIGHTS_TOP_HASHTAGS") {
            self.limits.top_hashtags = value;
        }
        if let Some(value) = env_parse::<usize>("INSIGHTS_BEST_HOURS") {
            self.limits.best_hours = value;
        }
        if let Ok(host) = env::var("INSIGHTS_HOST") {
            if !host.trim().is_empty() {
                self.server.host = host;
            }
        }
        if let Some(value) = env_parse::<u16>("INSIGHTS_PORT") {
            self.server.port = value;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse::<T>().ok())
}

fn default_config_path() -> Option<PathBuf> {
    env::var("INSIGHTS_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/insights.toml")))
}
