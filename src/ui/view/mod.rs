//! 视图层模块
//!
//! 每个阶段一个界面，均为对 App 状态的纯渲染

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::state::{App, AppMode, ConfirmAction};
use crate::models::{MAX_PLAYERS, MIN_PLAYERS, Phase, PlayerColor};
use components::{render_dialog_framework, render_name_input, render_player_tile};
use layouts::{centered_rect, tile_grid};

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // 当前界面
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    match app.session.phase() {
        Phase::SettingPlayerCount => render_setup(frame, app, chunks[0]),
        Phase::EnteringNames => render_naming(frame, app, chunks[0]),
        Phase::Playing => render_board(frame, app, chunks[0]),
    }
    render_help(frame, app, chunks[1]);

    // 渲染弹窗
    if let AppMode::Confirm(action) = &app.mode {
        render_confirm_dialog(frame, app, action);
    }
}

fn render_setup(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(3), // 标题
            Constraint::Length(2), // 提示
            Constraint::Length(3), // 人数
            Constraint::Length(2),
            Constraint::Length(1), // 下一步
            Constraint::Min(0),
        ])
        .split(area);

    let title = Paragraph::new("Ready, Set, Go!")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, centered_columns(chunks[1], 40));

    frame.render_widget(
        Paragraph::new("How many players?")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray)),
        chunks[2],
    );

    let count = app.session.player_count();
    let stepper_style = |enabled: bool| {
        if enabled {
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let stepper = Line::from(vec![
        Span::styled("[-]", stepper_style(count > MIN_PLAYERS)),
        Span::raw("    "),
        Span::styled(
            count.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("[+]", stepper_style(count < MAX_PLAYERS)),
    ]);
    frame.render_widget(
        Paragraph::new(stepper).alignment(Alignment::Center),
        chunks[3],
    );

    frame.render_widget(
        Paragraph::new("Next ⏎")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
        chunks[5],
    );
}

fn render_naming(frame: &mut Frame, app: &App, area: Rect) {
    let drafts = app.session.name_drafts();

    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(drafts.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(centered_columns(area, 60));

    let title = Paragraph::new("Enter Player Names")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, chunks[0]);

    for (index, draft) in drafts.iter().enumerate() {
        render_name_input(
            frame,
            chunks[index + 1],
            &format!("Player {}", index + 1),
            draft,
            index == app.focused_draft,
            PlayerColor::for_index(index),
        );
    }

    let start_style = if app.session.all_names_entered() {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new("Start Game")
            .alignment(Alignment::Center)
            .style(start_style),
        chunks[drafts.len() + 1],
    );
}

fn render_board(frame: &mut Frame, app: &App, area: Rect) {
    let players = app.session.players();
    let leaders = app.session.leaders();

    for (index, (player, tile)) in players.iter().zip(tile_grid(area, players.len())).enumerate() {
        render_player_tile(
            frame,
            tile,
            player,
            index + 1,
            index == app.selected_index,
            leaders.contains(&player.id),
        );
    }
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match (&app.mode, app.session.phase()) {
        (AppMode::Confirm(_), _) => "[y] Confirm  [n] Cancel",
        (AppMode::Normal, Phase::SettingPlayerCount) => "[-/+] Players  [Enter] Next  [q] Quit",
        (AppMode::Normal, Phase::EnteringNames) => {
            "[Tab/↑↓] Switch field  [Enter] Next / Start Game  [Esc] Start over"
        }
        (AppMode::Normal, Phase::Playing) => {
            "[Enter/1-8] +1  [-] -1  [←↑↓→] Select  [r] Reset Scores  [n] New Game  [q] Quit"
        }
    };

    let text = match app.message.as_deref() {
        Some(message) if !message.is_empty() => format!("{}  |  {}", help_text, message),
        _ => help_text.to_string(),
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_confirm_dialog(frame: &mut Frame, app: &App, action: &ConfirmAction) {
    let area = centered_rect(50, 25, frame.area());

    let (title, message, confirm) = match action {
        ConfirmAction::DecrementScore(id) => {
            let name = app
                .session
                .player(*id)
                .map(|p| p.name.as_str())
                .unwrap_or("this player");
            (
                "Remove Point",
                format!("Remove one point from {}?", name),
                "Remove",
            )
        }
        ConfirmAction::ResetScores => (
            "Reset Scores",
            "Are you sure you want to reset all scores to 0?".to_string(),
            "Reset",
        ),
        ConfirmAction::NewGame => (
            "New Game",
            "This will reset everything and go back to player setup.".to_string(),
            "Reset Everything",
        ),
    };

    let inner = render_dialog_framework(frame, area, title, Color::Red);
    let dialog = Paragraph::new(format!("{}\n\n[y] {}  [n] Cancel", message, confirm))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });
    frame.render_widget(dialog, inner);
}

/// 水平方向居中、限制最大宽度
fn centered_columns(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
