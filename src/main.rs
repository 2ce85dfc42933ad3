mod app;
mod config;
mod convert;
mod theme;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::{App, Popup};
use config::AppConfig;
use convert::{Base, ConversionResult};
use theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "radixform")]
#[command(version)]
#[command(about = "Convert numbers between binary, decimal, octal and hexadecimal")]
struct Args {
    /// Number to convert; prints the result instead of opening the form
    number: Option<String>,

    /// Source base (binary, decimal, octal, hexadecimal or bin/dec/oct/hex)
    #[arg(short, long)]
    base: Option<Base>,

    /// Print the one-shot result as JSON
    #[arg(long, requires = "number")]
    json: bool,

    /// Ignore the config file
    #[arg(long)]
    no_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (config, config_path, warnings) = if args.no_config {
        (AppConfig::default(), None, Vec::new())
    } else {
        let (config, warnings) = AppConfig::load();
        (config, AppConfig::default_path(), warnings)
    };

    init_logging(&args, &config, args.number.is_none())?;

    // Loading happens before a subscriber exists, so report problems now
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    if let Some(number) = &args.number {
        let base = args.base.unwrap_or(config.default_base);
        return print_conversion(number, base, args.json);
    }

    run_tui(args.base, config, config_path)
}

/// RUST_LOG wins over --debug, which wins over the configured level
fn init_logging(args: &Args, config: &AppConfig, tui: bool) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    if !tui {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .with(filter)
            .init();
        return Ok(());
    }

    // The TUI owns the terminal, so logs only go to a file when one is configured
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Could not open log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .with(filter)
            .init();
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    input: &'a str,
    base: Base,
    value: u128,
    conversions: BTreeMap<Base, &'a str>,
    explanation: String,
}

impl<'a> JsonOutput<'a> {
    fn new(result: &'a ConversionResult) -> Self {
        Self {
            input: &result.input,
            base: result.base,
            value: result.value,
            conversions: result
                .conversions
                .iter()
                .map(|c| (c.base, c.digits.as_str()))
                .collect(),
            explanation: result.explanation(),
        }
    }
}

fn print_conversion(number: &str, base: Base, json: bool) -> Result<()> {
    let result = convert::convert(number, base)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&JsonOutput::new(&result))?);
    } else {
        print!("{}", result.explanation());
    }
    Ok(())
}

fn run_tui(base: Option<Base>, config: AppConfig, config_path: Option<PathBuf>) -> Result<()> {
    ui::init_theme(Theme::load(&config.theme));

    let mut app = App::new(config, config_path);
    if let Some(base) = base {
        app.select_base(base);
    }
    tracing::info!(base = %app.base, "Starting radixform");

    // Setup terminal
    enable_raw_mode()?;
    let mut terminal = restore_on_error(setup_terminal, || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match app.save_last_base() {
        Ok(true) => tracing::debug!(base = %app.base, "Saved last base"),
        Ok(false) => {}
        Err(e) => tracing::warn!("Could not save last base: {:#}", e),
    }

    result
}

/// Run `setup`, calling `restore` before returning its error
fn restore_on_error<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| restore())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

/// `q` quits unless it is being typed into the number field; Ctrl-C always quits
fn should_quit(app: &App, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
        KeyCode::Char('q') => app.popup == Popup::None && !app.is_typing(),
        _ => false,
    }
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(app, &key) {
                        return Ok(());
                    }
                    app.handle_key(key);
                }
            }
        }

        app.tick();
    }
}
