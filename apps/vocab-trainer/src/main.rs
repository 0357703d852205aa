//! Vocab Trainer - German/Farsi/English vocabulary drills with weighted card selection.

mod app;
mod config;
mod ui;

use app::App;
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;

fn main() -> anyhow::Result<()> {
    let config = Config::load();
    let first_run = Config::config_path().is_some_and(|p| !p.exists());
    init_logging(&config)?;
    if first_run {
        // Leave an editable config behind.
        if let Err(err) = config.save() {
            tracing::warn!(%err, "could not write default config");
        }
    }
    tracing::info!(data_dir = %config.data_dir().display(), "starting vocab trainer");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(%err, "vocab trainer exited with error");
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file in the data directory; the terminal belongs to the UI.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let path = config.log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(config.log_level())
        .init();
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, config: Config) -> anyhow::Result<()> {
    let mut app = App::new(config)?;

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Char('q') && key.modifiers.is_empty() && app.can_quit() {
                break;
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }
            app.handle_key(key);
        }
    }

    tracing::info!("vocab trainer closed");
    Ok(())
}
