use std::io::stdout;
use std::panic;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use postdeck::app::App;
use postdeck::config::AppConfig;
use postdeck::error::{PostdeckError, Result};
use postdeck::event::{Event, EventHandler};
use postdeck::ui;

#[derive(Parser, Debug)]
#[command(name = "postdeck")]
#[command(author, version, about = "A terminal wizard for scheduling social media posts")]
struct Args {
    /// Path to config file (default: ~/.config/postdeck/config.toml)
    #[arg(long)]
    config: Option<String>,

    /// Simulate all API calls without contacting the backend
    #[arg(long)]
    mock: bool,

    /// Log file path (logging disabled if not specified)
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging only if log file is specified
    if let Some(ref log_path) = args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .ok();

        if let Some(file) = file {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();

            info!("Starting postdeck");
        }
    }

    let config = match args.config {
        Some(ref path) => AppConfig::load_from(path).unwrap_or_default(),
        None => AppConfig::load().unwrap_or_default(),
    };

    // Set up panic handler to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;

    let mut app = App::new(config, args.mock);
    let result = run(&mut terminal, &mut app).await;

    restore_terminal()?;

    if let Err(ref e) = result {
        error!("Application error: {}", e);
    }

    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode().map_err(|e| PostdeckError::Terminal(e.to_string()))?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| PostdeckError::Terminal(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).map_err(|e| PostdeckError::Terminal(e.to_string()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().map_err(|e| PostdeckError::Terminal(e.to_string()))?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)
        .map_err(|e| PostdeckError::Terminal(e.to_string()))?;
    Ok(())
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut events = EventHandler::new(tick_rate);

    loop {
        terminal
            .draw(|frame| ui::draw(frame, app))
            .map_err(|e| PostdeckError::Terminal(e.to_string()))?;

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    app.handle_key(key).await;
                }
                Event::Resize => {
                    // Redrawn at the top of the loop
                }
                Event::Tick => {
                    app.tick();
                }
            }
        }

        if app.should_exit {
            break;
        }
    }

    Ok(())
}
