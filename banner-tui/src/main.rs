mod api;
mod app;
mod bootstrap;
mod cli;
mod config;
mod logging;
mod runtime;
mod ui;

use anyhow::Result;
use app::App;
use banner_scheduler::ScheduleStore;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

const TOKEN_ENV: &str = "BANNER_API_TOKEN";
// Lets pending saves show up in dev mode.
const DEV_LATENCY: Duration = Duration::from_millis(400);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::from_filename(".env.tui").ok();

    let cli = cli::Cli::parse();
    let cfg = config::BannerConfig::load()?;

    match cli.command {
        cli::Commands::ConfigPath => {
            let path = config::BannerConfig::config_path()?;
            if !path.exists() {
                cfg.save()?;
                println!("Created default config at: {}", path.display());
            } else {
                println!("{}", path.display());
            }
            Ok(())
        }
        cli::Commands::Dev => {
            logging::init(&cfg)?;
            println!("Running in dev mode with in-memory banners.");
            let store: Arc<dyn ScheduleStore> =
                Arc::new(api::DevBackend::new().with_latency(DEV_LATENCY));
            run(store, &cfg).await
        }
        cli::Commands::Run => {
            logging::init(&cfg)?;
            let token = std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty());
            let client = api::ApiClient::new(&cfg.api_url, token)?;
            println!("Connecting to {}", cfg.api_url);
            let store: Arc<dyn ScheduleStore> = Arc::new(client);
            run(store, &cfg).await
        }
    }
}

async fn run(store: Arc<dyn ScheduleStore>, cfg: &config::BannerConfig) -> Result<()> {
    let mut app = App::new(cfg);
    bootstrap::initialize_app_state(&mut app, store.as_ref()).await;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, store).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("{:?}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
