//! App 状态定义 (Model)
//!
//! 会话本身之外，只保存界面需要的焦点、选中项和待确认操作

use crate::models::{Player, PlayerId};
use crate::session::Session;

/// 应用状态
#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub mode: AppMode,
    pub focused_draft: usize,  // 命名界面中正在编辑的输入框
    pub selected_index: usize, // 计分板上选中的玩家
    pub message: Option<String>,
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    Confirm(ConfirmAction),
}

/// 需要用户确认的破坏性操作
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    DecrementScore(PlayerId),
    ResetScores,
    NewGame,
}

impl App {
    /// 创建新的应用实例
    pub fn new(session: Session) -> Self {
        Self {
            session,
            mode: AppMode::Normal,
            focused_draft: 0,
            selected_index: 0,
            message: None,
        }
    }

    /// 获取计分板上选中的玩家
    pub fn selected_player(&self) -> Option<&Player> {
        self.session.players().get(self.selected_index)
    }

    /// 当前正在编辑的名字草稿
    pub fn focused_draft_text(&self) -> Option<&str> {
        self.session
            .name_drafts()
            .get(self.focused_draft)
            .map(String::as_str)
    }

    /// 计分板列数：两人及以下一列，否则两列
    pub fn board_columns(&self) -> usize {
        board_columns(self.session.players().len())
    }
}

pub fn board_columns(player_count: usize) -> usize {
    if player_count <= 2 { 1 } else { 2 }
}
