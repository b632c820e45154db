use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use marquee::{
    api::{BackendClient, TrailerClient},
    app::{App, Effect},
    config::{Cli, Config},
    input::{handle_key_event, handle_mouse_event},
    storage::LocalStorage,
    tasks::{AsyncAction, Clients, spawn_task},
    ui,
    watchlist::WatchList,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    fs::OpenOptions,
    io::{self, Stdout},
    sync::Mutex,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const TICK: Duration = Duration::from_millis(100);

// stdout belongs to the TUI, so logs go to a file in the data dir
fn init_tracing(config: &Config) -> Result<()> {
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("Failed to create {}", config.data_dir.display()))?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())
        .context("Failed to open log file")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let config = Config::from_cli(Cli::parse())?;
    init_tracing(&config)?;
    match dotenv {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => info!("No .env file loaded ({})", e),
    }
    if config.tmdb_api_key.is_none() {
        warn!("TMDB_API_KEY is not set; trailer lookups will fail");
    }
    info!(backend = %config.backend_url, data_dir = %config.data_dir.display(), "starting");

    let clients = Clients {
        backend: BackendClient::new(&config.backend_url)?,
        trailer: TrailerClient::new(&config.tmdb_url, config.tmdb_api_key.clone())?,
    };
    let watch_list = WatchList::load(LocalStorage::in_dir(&config.data_dir));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(watch_list);
    let (tx, mut rx) = mpsc::channel::<AsyncAction>(32);
    for task in app.startup(&config.initial_genre) {
        spawn_task(task, &clients, &tx);
    }

    let res = run_app(&mut terminal, &mut app, &clients, tx, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("exiting on error: {:#}", err);
        println!("{:?}", err);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    clients: &Clients,
    tx: mpsc::Sender<AsyncAction>,
    rx: &mut mpsc::Receiver<AsyncAction>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        while let Ok(action) = rx.try_recv() {
            if let Some(Effect::OpenUrl(url)) = app.apply(action) {
                open_in_browser(app, &url);
            }
        }

        if event::poll(TICK)? {
            let task = match event::read()? {
                Event::Key(key) => handle_key_event(app, key),
                Event::Mouse(mouse) => handle_mouse_event(app, mouse, Instant::now()),
                _ => None,
            };
            if let Some(task) = task {
                spawn_task(task, clients, &tx);
            }
        }

        if app.should_quit {
            info!("quit requested");
            return Ok(());
        }
        app.tick = app.tick.wrapping_add(1);
    }
}

fn open_in_browser(app: &mut App, url: &str) {
    info!(url, "opening trailer");
    if let Err(e) = webbrowser::open(url) {
        error!("Failed to open browser for {}: {}", url, e);
        app.alert = Some(format!("Could not open a browser. Trailer: {}", url));
    }
}
