use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wardwatch::app::{App, StatusLevel};
use wardwatch::config::{self, Config};
use wardwatch::store::ReportSource;
use wardwatch::{input, ui};

#[derive(Debug, Parser)]
#[command(
    name = "wardwatch",
    version,
    about = "Wardwatch: triage community reports from the terminal"
)]
struct Args {
    /// Report fixture (.json or .csv). Defaults to the built-in sample set.
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Directory that receives reports.csv (default: current directory)
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Config file (default: ~/.config/wardwatch/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let (config, config_err) = match config::load(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    init_logging(&config);
    if let Some(err) = config_err {
        tracing::warn!(error = %err, "ignoring unreadable config");
    }

    let source = args
        .fixture
        .clone()
        .or_else(|| config.fixture_path())
        .map(ReportSource::File)
        .unwrap_or(ReportSource::Builtin);
    let export_dir = args
        .export_dir
        .clone()
        .or_else(|| config.export_dir_path())
        .unwrap_or_else(|| PathBuf::from("."));

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, App::new(export_dir), &source);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

/// Log to a file so output never lands on the TUI. No file, no logging.
fn init_logging(config: &Config) {
    let Some(path) = config.log_file_path() else {
        return;
    };
    let Some(file) = open_log_file(&path) else {
        return;
    };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();
}

fn open_log_file(path: &Path) -> Option<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    source: &ReportSource,
) -> Result<()> {
    // Show the loading screen before the (synchronous) fetch.
    terminal.draw(|f| ui::draw(f, &mut app))?;
    app.load(source);

    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        app.sync_context();
        terminal.draw(|f| ui::draw(f, &mut app))?;
        if app.should_quit {
            tracing::info!("quit");
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => input::handle_key(&mut app, key),
                Event::Mouse(mouse) => {
                    if let Some(size) = terminal_rect() {
                        input::handle_mouse(&mut app, mouse, size);
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }

        pump_clipboard(&mut app);
    }
}

fn pump_clipboard(app: &mut App) {
    let Some(text) = app.take_copy_request() else {
        return;
    };
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
        Ok(()) => app.set_status("Copied to clipboard", StatusLevel::Info),
        Err(err) => {
            tracing::warn!(error = %err, "clipboard unavailable");
            app.set_status(format!("Clipboard error: {err}"), StatusLevel::Warn);
        }
    }
}

fn terminal_rect() -> Option<Rect> {
    let (width, height) = crossterm::terminal::size().ok()?;
    Some(Rect {
        x: 0,
        y: 0,
        width,
        height,
    })
}
