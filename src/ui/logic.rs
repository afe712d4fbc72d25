//! 业务逻辑处理 (Update/Dispatch)
//!
//! 把 Action 翻译成会话操作；破坏性操作先进入确认模式

use tracing::debug;

use super::actions::Action;
use super::state::{App, AppMode, ConfirmAction};
use crate::error::SessionError;

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,

            Action::IncreaseCount => {
                let result = self.session.increment_player_count();
                self.ignore(result);
            }
            Action::DecreaseCount => {
                let result = self.session.decrement_player_count();
                self.ignore(result);
            }
            Action::ProceedToNaming => self.proceed_to_naming(),

            Action::FocusNext => self.focus_next(),
            Action::FocusPrev => self.focus_prev(),
            Action::Input(c) => self.edit_focused_draft(|text| text.push(c)),
            Action::DeleteChar => self.edit_focused_draft(|text| {
                text.pop();
            }),
            Action::SubmitName => self.submit_name(),

            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),
            Action::MoveSelectionLeft => self.move_left(),
            Action::MoveSelectionRight => self.move_right(),
            Action::IncrementSelected => self.increment_selected(),
            Action::IncrementPlayer(index) => {
                if index < self.session.players().len() {
                    self.selected_index = index;
                    self.increment_selected();
                }
            }
            Action::StartDecrement => self.start_decrement(),
            Action::StartResetScores => {
                self.mode = AppMode::Confirm(ConfirmAction::ResetScores);
            }
            Action::StartNewGame => {
                self.mode = AppMode::Confirm(ConfirmAction::NewGame);
            }

            Action::Confirm => self.execute_confirm(),
            Action::Cancel => self.cancel(),
        }
        false
    }

    /// 会话拒绝的操作不打扰用户，只记日志
    fn ignore(&self, result: Result<(), SessionError>) {
        if let Err(err) = result {
            debug!(%err, "Ignored session operation");
        }
    }

    // ============ 人数设置 ============

    pub fn proceed_to_naming(&mut self) {
        let result = self.session.proceed_to_naming();
        self.ignore(result);
        self.focused_draft = 0;
        self.message = None;
    }

    // ============ 命名相关 ============

    pub fn focus_next(&mut self) {
        if self.focused_draft + 1 < self.session.name_drafts().len() {
            self.focused_draft += 1;
        }
    }

    pub fn focus_prev(&mut self) {
        if self.focused_draft > 0 {
            self.focused_draft -= 1;
        }
    }

    fn edit_focused_draft(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(current) = self.focused_draft_text() else {
            return;
        };
        let mut text = current.to_string();
        edit(&mut text);
        let result = self.session.update_name_draft(self.focused_draft, text);
        self.ignore(result);
    }

    /// Enter：跳到下一个输入框，最后一个输入框上尝试开始游戏
    pub fn submit_name(&mut self) {
        if self.focused_draft + 1 < self.session.name_drafts().len() {
            self.focused_draft += 1;
            return;
        }

        if self.session.all_names_entered() {
            let result = self.session.start_game();
            self.ignore(result);
            self.selected_index = 0;
            self.message = None;
        } else {
            if let Some(empty) = self
                .session
                .name_drafts()
                .iter()
                .position(|name| name.trim().is_empty())
            {
                self.focused_draft = empty;
            }
            self.message = Some("Every player needs a name".to_string());
        }
    }

    // ============ 计分板导航 ============

    pub fn move_up(&mut self) {
        let columns = self.board_columns();
        if self.selected_index >= columns {
            self.selected_index -= columns;
        }
    }

    pub fn move_down(&mut self) {
        let columns = self.board_columns();
        if self.selected_index + columns < self.session.players().len() {
            self.selected_index += columns;
        }
    }

    pub fn move_left(&mut self) {
        if self.selected_index % self.board_columns() > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_right(&mut self) {
        let columns = self.board_columns();
        if self.selected_index % columns + 1 < columns
            && self.selected_index + 1 < self.session.players().len()
        {
            self.selected_index += 1;
        }
    }

    // ============ 计分 ============

    pub fn increment_selected(&mut self) {
        if let Some(id) = self.selected_player().map(|p| p.id) {
            let result = self.session.increment_score(id);
            self.ignore(result);
            self.message = None;
        }
    }

    /// 开始扣分：零分的玩家不弹确认框
    pub fn start_decrement(&mut self) {
        let Some(player) = self.selected_player().cloned() else {
            return;
        };
        if player.score > 0 {
            self.mode = AppMode::Confirm(ConfirmAction::DecrementScore(player.id));
        } else {
            self.message = Some(format!("{} has no points to remove", player.name));
        }
    }

    // ============ 确认/取消 ============

    /// 执行确认操作
    pub fn execute_confirm(&mut self) {
        match &self.mode {
            AppMode::Confirm(ConfirmAction::DecrementScore(id)) => {
                let id = *id;
                let result = self.session.decrement_score(id);
                self.ignore(result);
                self.message = self
                    .session
                    .player(id)
                    .map(|p| format!("Removed one point from {}", p.name));
            }
            AppMode::Confirm(ConfirmAction::ResetScores) => {
                let result = self.session.reset_scores();
                self.ignore(result);
                self.message = Some("Scores reset".to_string());
            }
            AppMode::Confirm(ConfirmAction::NewGame) => {
                self.session.reset_all();
                self.focused_draft = 0;
                self.selected_index = 0;
                self.message = None;
            }
            AppMode::Normal => {}
        }
        self.mode = AppMode::Normal;
    }

    /// 取消当前操作
    pub fn cancel(&mut self) {
        self.mode = AppMode::Normal;
        self.message = None;
    }
}
