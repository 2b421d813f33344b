mod app;
mod input;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use stopwatch_core::storage::{get_config_dir, ConfigStorage};
use stopwatch_core::StopwatchConfig;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::info;

fn setup_logging(filter: &str) -> Result<()> {
    let mut log_path = std::env::temp_dir();
    log_path.push("stopwatch-tui.log");

    let log_file = std::fs::File::create(log_path)?;
    let subscriber = tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(filter)
        .json()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        let _ = crossterm::execute!(std::io::stdout(), crossterm::cursor::Show);

        tracing::error!(?panic_info, "Application panicked");

        eprintln!("A fatal error occurred: {}", panic_info);

        original_hook(panic_info);
    }));
}

#[derive(Parser, Debug)]
#[command(name = "stopwatch")]
#[command(about = "Terminal stopwatch", long_about = None)]
struct Args {
    /// Config file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Display refresh interval in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Swap digits without the slide transition
    #[arg(long)]
    no_animation: bool,

    /// Log filter
    #[arg(short, long, default_value = "stopwatch_tui=info,stopwatch_core=info")]
    log_level: String,
}

impl Args {
    /// Apply command line overrides on top of the loaded config and
    /// validate the result.
    fn apply_overrides(&self, mut config: StopwatchConfig) -> Result<StopwatchConfig> {
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.no_animation {
            config.transition_frames = 0;
        }

        config.validate()?;
        Ok(config)
    }
}

fn load_config(args: &Args, config_dir: Option<PathBuf>) -> Result<StopwatchConfig> {
    let storage = match (&args.config, config_dir) {
        (Some(path), _) => Some(ConfigStorage::from_file(path.clone())),
        (None, Some(dir)) => Some(ConfigStorage::new(dir)),
        (None, None) => None,
    };

    let config = match storage {
        Some(storage) => storage.load().with_context(|| {
            format!("Failed to load config from {}", storage.path().display())
        })?,
        None => {
            tracing::debug!("No config directory, using defaults");
            StopwatchConfig::default()
        }
    };

    args.apply_overrides(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_level)?;
    setup_panic_hook();

    let config = load_config(&args, get_config_dir())?;
    info!(
        tick_interval_ms = config.tick_interval_ms,
        frame_interval_ms = config.frame_interval_ms,
        transition_frames = config.transition_frames,
        clock = config.clock.as_str(),
        "Stopwatch starting up"
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &config).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("Stopwatch shut down");
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &StopwatchConfig,
) -> Result<()> {
    let mut app = App::new(config);
    let mut event_rx = app.subscribe();

    let mut tick = interval(Duration::from_millis(config.tick_interval_ms));
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut frame = interval(Duration::from_millis(config.frame_interval_ms));
    frame.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if app.should_quit {
            break;
        }

        tokio::select! {
            received = event_rx.recv() => match received {
                Ok(event) => app.handle_timer_event(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Timer event receiver lagged");
                }
                Err(RecvError::Closed) => break,
            },
            _ = tick.tick() => {
                app.on_tick();
            }
            _ = frame.tick(), if app.display.is_animating() => {
                app.on_frame();
            }
            _ = tokio::time::sleep(Duration::from_millis(16)) => {
                if event::poll(Duration::from_millis(0))? {
                    match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            input::handle_key_event(&mut app, key.code, key.modifiers);
                        }
                        Event::Mouse(mouse) => input::handle_mouse_event(&mut app, mouse),
                        Event::Resize(width, height) => {
                            info!(width, height, "Terminal resized");
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("stopwatch").chain(argv.iter().copied()))
    }

    #[test]
    fn test_overrides_apply_without_config_dir() {
        let args = args(&["--tick-ms", "500", "--no-animation"]);
        let config = load_config(&args, None).unwrap();

        assert_eq!(config.tick_interval_ms, 500);
        assert_eq!(config.transition_frames, 0);
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let config = load_config(&args(&[]), None).unwrap();
        assert_eq!(config, StopwatchConfig::default());
    }

    #[test]
    fn test_invalid_override_rejected_without_config_dir() {
        let args = args(&["--tick-ms", "0"]);
        assert!(load_config(&args, None).is_err());
    }

    #[test]
    fn test_overrides_apply_to_missing_config_file() {
        let path = std::env::temp_dir().join("stopwatch-tui-missing-config.json");
        let _ = std::fs::remove_file(&path);
        let path_arg = path.to_string_lossy().to_string();
        let args = args(&["--config", &path_arg, "--tick-ms", "750"]);

        let config = load_config(&args, None).unwrap();
        assert_eq!(config.tick_interval_ms, 750);
        assert_eq!(config.transition_frames, 8);
    }
}
