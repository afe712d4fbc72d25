//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::actions::Action;
use super::state::{App, AppMode};
use crate::models::Phase;

/// 根据当前阶段、模式和按键获取对应的 Action
pub fn get_action(phase: Phase, mode: &AppMode, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if let AppMode::Confirm(_) = mode {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::Confirm),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        };
    }

    match phase {
        Phase::SettingPlayerCount => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char('k') | KeyCode::Char('l') => {
                Some(Action::IncreaseCount)
            }
            KeyCode::Up | KeyCode::Right => Some(Action::IncreaseCount),
            KeyCode::Char('-') | KeyCode::Char('j') | KeyCode::Char('h') => {
                Some(Action::DecreaseCount)
            }
            KeyCode::Down | KeyCode::Left => Some(Action::DecreaseCount),
            KeyCode::Enter => Some(Action::ProceedToNaming),
            _ => None,
        },
        // 命名时所有字符都是输入
        Phase::EnteringNames => match key.code {
            KeyCode::Esc => Some(Action::StartNewGame),
            KeyCode::Enter => Some(Action::SubmitName),
            KeyCode::Tab | KeyCode::Down => Some(Action::FocusNext),
            KeyCode::BackTab | KeyCode::Up => Some(Action::FocusPrev),
            KeyCode::Backspace => Some(Action::DeleteChar),
            // 组合键不是文字输入
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(Action::Input(c))
            }
            _ => None,
        },
        Phase::Playing => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::MoveSelectionLeft),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::MoveSelectionRight),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('+') | KeyCode::Char('=') => {
                Some(Action::IncrementSelected)
            }
            KeyCode::Char(c @ '1'..='8') => Some(Action::IncrementPlayer(c as usize - '1' as usize)),
            KeyCode::Char('-') => Some(Action::StartDecrement),
            KeyCode::Char('r') => Some(Action::StartResetScores),
            KeyCode::Char('n') => Some(Action::StartNewGame),
            _ => None,
        },
    }
}

/// 处理按键事件，返回是否退出
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    match get_action(app.session.phase(), &app.mode, key) {
        Some(action) => app.dispatch(action),
        None => false,
    }
}
