//! 通用 UI 组件
//!
//! 对话框、输入框、玩家格子等通用组件

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::models::{Player, PlayerColor};

/// 调色板颜色转终端颜色
pub fn player_color(color: PlayerColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str, color: Color) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 名字输入框，左侧带玩家颜色标记，空值时显示占位符
pub fn render_name_input(
    frame: &mut Frame,
    area: Rect,
    placeholder: &str,
    value: &str,
    is_focused: bool,
    swatch: PlayerColor,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let title = Line::from(vec![
        Span::styled("● ", Style::default().fg(player_color(swatch))),
        Span::raw(placeholder.to_string()),
    ]);

    let text = if value.is_empty() {
        Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else if is_focused {
        Span::styled(format!("{value}_"), Style::default().fg(Color::White))
    } else {
        Span::raw(value.to_string())
    };

    let input = Paragraph::new(Line::from(text)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(input, area);
}

/// [组件] 计分板上的玩家格子
pub fn render_player_tile(
    frame: &mut Frame,
    area: Rect,
    player: &Player,
    number: usize,
    is_selected: bool,
    is_leader: bool,
) {
    let background = player_color(player.color);
    let (border_type, border_style) = if is_selected {
        (
            BorderType::Thick,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (BorderType::Plain, Style::default().fg(background))
    };

    let block = Block::default()
        .title(format!("[{number}]"))
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .style(Style::default().bg(background));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let name = if is_leader {
        format!("★ {}", player.name)
    } else {
        player.name.clone()
    };
    let text_style = Style::default()
        .fg(Color::White)
        .bg(background)
        .add_modifier(Modifier::BOLD);

    // 垂直居中：名字、空行、分数
    let padding = inner.height.saturating_sub(3) / 2;
    let mut lines: Vec<Line> = (0..padding).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(name, text_style)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(player.score.to_string(), text_style)));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
