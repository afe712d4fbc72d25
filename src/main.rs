mod cli;
mod config;
mod error;
mod models;
mod session;
mod ui;

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::{Config, load_config};
use crate::session::Session;
use crate::ui::{App, render};

/// 打开（追加）日志文件，必要时创建目录
fn open_log_file(log_path: &Path) -> io::Result<File> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(log_path)
}

/// 初始化文件日志（终端界面占用了 stdout），日志文件不可用时不记录日志
fn init_logging(config: &Config) {
    let Some(log_path) = config.log_path() else {
        return;
    };
    let log_file = match open_log_file(&log_path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!(
                "warning: cannot open log file {}: {err}; continuing without logs",
                log_path.display()
            );
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 配置文件 (~/.config/readysetgo/config.toml)
    let mut config = match cli.config.clone().or_else(Config::default_path) {
        Some(path) => load_config(&path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    config.apply_cli(&cli);

    init_logging(&config);
    info!(default_player_count = config.default_player_count, "Starting Ready, Set, Go!");

    // 创建应用状态
    let mut app = App::new(Session::new(config.default_player_count));

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        warn!(%err, "Event loop failed");
    }
    info!("Exiting");

    Ok(result?)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        // 每次操作后重新渲染
        terminal.draw(|f| render(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && ui::handle_key_event(app, key) {
                break;
            }
        }
    }
    Ok(())
}
