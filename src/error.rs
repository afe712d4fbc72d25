//! 错误类型
//!
//! 会话错误只用于日志，界面上一律静默忽略

use derive_more::{Display, Error, From};

use crate::models::Phase;

/// 会话操作被拒绝的原因（状态保持不变）
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    #[display("player count {requested} is outside [1, 8]")]
    OutOfRangeCount { requested: usize },

    #[display("{operation} is not allowed while {phase}")]
    InvalidPhaseOperation {
        operation: &'static str,
        phase: Phase,
    },

    #[display("name slot {index} does not exist ({len} slots)")]
    DraftOutOfBounds { index: usize, len: usize },

    #[display("every player needs a name before the game starts")]
    NamesIncomplete,
}

/// 配置加载错误
#[derive(Debug, Display, Error, From)]
pub enum ConfigError {
    #[display("failed to read config: {_0}")]
    Io(std::io::Error),

    #[display("invalid config: {_0}")]
    Parse(toml::de::Error),
}
