use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::models::DEFAULT_PLAYERS;

/// 配置文件结构 (config.toml)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_player_count: usize,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_player_count: DEFAULT_PLAYERS,
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// 默认配置文件路径 (~/.config/readysetgo/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("readysetgo").join("config.toml"))
    }

    /// 命令行参数覆盖文件中的值
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(players) = cli.players {
            self.default_player_count = usize::from(players);
        }
        if let Some(file) = &cli.log_file {
            self.log.file = Some(file.clone());
        }
    }

    /// 日志文件路径，未配置时放在数据目录 (~/.local/share/readysetgo/)
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log.file.clone().or_else(|| {
            dirs::data_dir().map(|dir| dir.join("readysetgo").join("readysetgo.log"))
        })
    }
}

/// 从TOML文件加载配置，文件不存在时返回默认值
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}
