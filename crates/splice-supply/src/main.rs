use anyhow::Result;
use dotenvy::dotenv;
use std::env;
use std::sync::Arc;
use tokio::signal;

use splicecore::api::{FileCategory, IdentityRequest};
use splicecore::catalog;
use splicecore::config::{ApiMode, SessionConfig};
use splicecore::utils::format_file_size;
use splicecore::{init_logger, monitor, Session};

mod cli;
use cli::{Cli, Commands};

/// Entry point for the storefront client shell.
///
/// # Errors
/// Returns an error if initialization fails (logging, transport setup).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present, before any config
    // is read
    let _ = dotenv();

    init_logger(&splicecore::config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Catalog { category, page, search }) => {
            run_catalog(category, page, &search);
            Ok(())
        }
        Some(Commands::Status) => run_status().await,
        Some(Commands::Run { mock }) => run_client(mock).await,
        None => run_client(false).await,
    }
}

/// Reads the Telegram-supplied identity from the environment. Empty when
/// running outside Telegram; the backend (or the mock catalog) fills in
/// defaults.
fn identity_from_env() -> IdentityRequest {
    IdentityRequest {
        user_id: env::var("SUPPLY_USER_ID").ok().and_then(|v| v.parse().ok()),
        username: env::var("SUPPLY_USERNAME").ok(),
        first_name: env::var("SUPPLY_FIRST_NAME").ok(),
        last_name: env::var("SUPPLY_LAST_NAME").ok(),
    }
}

/// Bootstrap, report, then keep the connectivity monitor alive until
/// Ctrl-C.
async fn run_client(force_mock: bool) -> Result<()> {
    let mut config = SessionConfig::from_env();
    if force_mock {
        config.api_mode = ApiMode::Mock;
    }
    log::info!("starting Splice Supply client (mode: {:?})", config.api_mode);

    let session = Arc::new(Session::new(config, identity_from_env())?);

    let outcome = session.bootstrap().await;
    log::info!("bootstrap finished: {outcome:?}");

    if let Some(data) = session.sequencer().data() {
        log::info!(
            "signed in as {} ({:?} data); catalog: {} free / {} premium",
            data.user.username,
            data.source,
            data.counts.free_count,
            data.counts.premium_count
        );
    }

    let monitor_task = monitor::spawn(Arc::clone(&session), splicecore::config::monitor::poll_interval());

    signal::ctrl_c().await?;
    log::info!("shutting down");
    monitor_task.abort();

    Ok(())
}

/// Prints one page of the built-in catalog.
fn run_catalog(category: FileCategory, page: u32, search: &str) {
    let result = catalog::query(category, page, search);

    if result.files.is_empty() {
        println!("No {category} files found");
        return;
    }

    for file in &result.files {
        println!(
            "#{:<3} {:<44} {:>9}  {:>4} downloads",
            file.file_id,
            file.name,
            format_file_size(file.file_size),
            file.download_count
        );
    }

    let p = &result.pagination;
    println!("\nPage {} of {} ({} files total)", p.current_page, p.total_pages, p.total_files);
}

/// One-shot account status fetch over the configured transport.
async fn run_status() -> Result<()> {
    let identity = identity_from_env();
    let session = Session::new(SessionConfig::from_env(), identity.clone())?;

    let status = session.client().user_status(&identity).await?;
    println!("User:     {} (id {})", status.username, status.user_id);
    println!("Premium:  {}", if status.is_premium { "yes" } else { "no" });
    println!(
        "Quota:    {} used, {} remaining",
        status.premium_downloads_used, status.premium_downloads_remaining
    );

    Ok(())
}
