use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod commands;
mod config;
mod models;
mod services;
mod session;
mod utils;
mod views;

use api::bank::BankClient;
use app::App;
use commands::Flow;
use config::{SessionBackend, Settings};
use models::Route;
use session::{FileSessionStore, MemorySessionStore, SessionContext, SessionStore};

fn print_page(app: &mut App) {
    let mut stdout = std::io::stdout();
    let _ = writeln!(stdout, "\n{}\n", app.render());
    let _ = write!(stdout, "{}> ", app.route());
    let _ = stdout.flush();
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Logs go to stderr, pages to stdout
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("transfer_client=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting transfer client...");

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };
    info!("Using API at {}", settings.api_url);

    let store: Arc<dyn SessionStore> = match settings.session {
        SessionBackend::File { path, key } => {
            info!(
                "Session file: {} ({})",
                path.display(),
                if key.is_some() { "encrypted" } else { "plaintext" }
            );
            Arc::new(FileSessionStore::new(path, key))
        }
        SessionBackend::Memory => {
            info!("Session kept in memory only");
            Arc::new(MemorySessionStore::default())
        }
    };

    let api = Arc::new(BankClient::new(settings.api_url));
    let mut app = App::new(api, SessionContext::new(store));

    // Opening the dashboard falls back to login when there is no session
    app.navigate(Route::Dashboard).await;
    print_page(&mut app);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        if commands::handle_line(&mut app, &line).await == Flow::Quit {
            break;
        }
        print_page(&mut app);
    }

    info!("Bye");
}
