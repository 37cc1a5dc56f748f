use anyhow::Result;
use cheukedit::{config::Config, input, ui};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use editcore::{Action, EditorSession, Mode};
use log::LevelFilter;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    env,
    fs::OpenOptions,
    io::{self, Write},
    time::Duration,
};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    init_logging();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    };

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    if let Err(e) = enable_raw_mode() {
        eprintln!("Failed to initialise the terminal: {}", e);
        return Err(e.into());
    }
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        eprintln!("Failed to configure the terminal: {}", e);
        return Err(e.into());
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let args: Vec<String> = env::args().collect();
    let session = match args.get(1) {
        Some(path) => EditorSession::open(path),
        None => {
            log::info!("No file specified, starting with empty buffer");
            EditorSession::new()
        }
    };
    let mut session = session.with_fallback_filename(config.editor.default_filename.clone());

    let res = run_app(&mut terminal, &mut session, &config);

    restore_terminal()?;

    if let Err(err) = res {
        eprintln!("Editor stopped with an error: {}", err);
        log::error!("Application error: {}", err);
        return Err(err);
    }

    Ok(())
}

fn init_logging() {
    let mut logger = env_logger::Builder::from_default_env();
    if env::var_os("RUST_LOG").is_none() {
        logger.filter_level(LevelFilter::Warn);
        logger.filter_module("cheukedit", LevelFilter::Info);
        logger.filter_module("editcore", LevelFilter::Info);
    }

    // stderr would draw over the alternate screen
    if let Some(path) = env::var_os("CHEUKEDIT_LOG_FILE") {
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                logger.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Cannot open log file {:?}: {}", path, e),
        }
    }

    logger.init();
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &mut EditorSession,
    config: &Config,
) -> Result<()> {
    loop {
        session.update_status();

        if let Err(e) = terminal.draw(|f| ui::draw(f, session, config)) {
            log::error!("Terminal draw error: {}", e);
        }

        if session.mode() == Mode::Exiting {
            log::info!("Editor shutdown requested");
            break;
        }

        // Bounded wait so expired notices get cleared
        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key_event) => {
                    let Some(key) = input::key_from_event(key_event) else {
                        continue;
                    };
                    if session.handle_key(key) == Action::InvalidEdit
                        && config.editor.audible_bell
                    {
                        ring_bell();
                    }
                }
                Event::Resize(columns, rows) => {
                    log::debug!("Terminal resized to {}x{}", columns, rows);
                }
                _ => {}
            }
        }
    }

    log::info!("Editor loop ended");
    Ok(())
}

fn ring_bell() {
    let mut stdout = io::stdout();
    if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
        log::debug!("Failed to ring bell: {}", e);
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;
    let _ = execute!(stdout, crossterm::cursor::Show);
    Ok(())
}
