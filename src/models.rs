use std::fmt;

use uuid::Uuid;

/// 玩家唯一标识（创建时生成，从不复用）
pub type PlayerId = Uuid;

/// 玩家人数下限
pub const MIN_PLAYERS: usize = 1;
/// 玩家人数上限
pub const MAX_PLAYERS: usize = 8;
/// 默认玩家人数
pub const DEFAULT_PLAYERS: usize = 2;

/// 会话阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    SettingPlayerCount,
    EnteringNames,
    Playing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::SettingPlayerCount => "setting player count",
            Phase::EnteringNames => "entering names",
            Phase::Playing => "playing",
        };
        f.write_str(name)
    }
}

/// 玩家颜色（固定调色板）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Orange,
    Purple,
    Pink,
    Teal,
    Indigo,
}

impl PlayerColor {
    /// 调色板，按创建顺序分配
    pub const PALETTE: [PlayerColor; 8] = [
        PlayerColor::Red,
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Orange,
        PlayerColor::Purple,
        PlayerColor::Pink,
        PlayerColor::Teal,
        PlayerColor::Indigo,
    ];

    /// 根据下标取颜色，超出调色板长度时循环
    pub fn for_index(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    /// RGB 值，供视图层转换
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            PlayerColor::Red => (255, 59, 48),
            PlayerColor::Blue => (0, 122, 255),
            PlayerColor::Green => (52, 199, 89),
            PlayerColor::Orange => (255, 149, 0),
            PlayerColor::Purple => (175, 82, 222),
            PlayerColor::Pink => (255, 45, 85),
            PlayerColor::Teal => (48, 176, 199),
            PlayerColor::Indigo => (88, 86, 214),
        }
    }
}

/// 玩家
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub color: PlayerColor,
}

impl Player {
    pub fn new(name: String, color: PlayerColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            score: 0,
            color,
        }
    }
}
