use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub bot: BotConfig,
    #[serde(default)]
    pub helper: HelperConfig,
    #[serde(default)]
    pub modules: HashMap<String, ModuleConfig>,
}

#[derive(Debug, Deserialize)]
pub struct BotConfig {
    pub name: String,
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
    #[serde(default = "default_rate_limit_commands")]
    pub rate_limit_commands: usize,
    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window_secs: u64,
}

fn default_rate_limit_commands() -> usize {
    5
}

fn default_rate_limit_window() -> u64 {
    60
}

fn default_command_prefix() -> String {
    "!".to_string()
}

fn default_db_path() -> String {
    "helpdesk.db".to_string()
}

#[derive(Debug, Deserialize)]
pub struct HelperConfig {
    #[serde(default = "default_trigger")]
    pub trigger: String,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            trigger: default_trigger(),
        }
    }
}

fn default_trigger() -> String {
    "help".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModuleConfig {
    pub enabled: bool,
    /// "public", "private" or "both"; the module's own default when unset
    pub scope: Option<String>,
    #[serde(default)]
    pub channels: Vec<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn is_module_enabled(&self, name: &str) -> bool {
        self.module_config(name)
            .map(|m| m.enabled)
            .unwrap_or(false)
    }

    pub fn module_config(&self, name: &str) -> Option<&ModuleConfig> {
        self.modules.get(name)
    }
}
