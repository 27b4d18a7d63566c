use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mcdo_catalog::CatalogClient;
use mcdo_core::{ViewMode, ViewState};
use mcdo_store::{FileKvStore, VisitedStore};
use mcdo_tracker::Tracker;
use tracing_subscriber::EnvFilter;

mod commands;
mod terminal;

use terminal::TerminalUi;

#[derive(Debug, Parser)]
#[command(name = "mcdo-cli")]
#[command(about = "Track which McDonald's stores in Japan you have visited")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show how many stores are loaded and how many you have visited
    Status,
    /// List stores as rows
    List {
        /// Case-insensitive substring of the store name or address
        #[arg(long)]
        search: Option<String>,
        /// Hide stores you have not visited
        #[arg(long)]
        visited_only: bool,
    },
    /// Show the map markers and where the map would focus
    Map {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        visited_only: bool,
        /// Focus one store by id and open its popup
        #[arg(long)]
        focus: Option<String>,
    },
    /// Mark a store as visited
    Visit { id: String },
    /// Undo a visit
    Unvisit { id: String },
    /// Erase the entire visit history
    Erase {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Write the visited stores to a dated JSON file
    Export {
        /// Directory to write into (defaults to MCDO_EXPORT_DIR)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Merge visited stores from a JSON file
    Import {
        path: PathBuf,
        /// Declared content type; derived from the file extension if omitted
        #[arg(long)]
        mime: Option<String>,
    },
}

impl Commands {
    /// View state the session should start with for this command.
    fn initial_view(&self) -> ViewState {
        let (mode, search, visited_only) = match self {
            Commands::List {
                search,
                visited_only,
            } => (ViewMode::List, search, *visited_only),
            Commands::Map {
                search,
                visited_only,
                ..
            } => (ViewMode::Map, search, *visited_only),
            _ => return ViewState::default(),
        };
        ViewState {
            mode,
            search_term: search.clone().unwrap_or_default(),
            show_unvisited: !visited_only,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = mcdo_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.unwrap_or(Commands::Status);
    let auto_confirm = matches!(command, Commands::Erase { yes: true });

    let kv = FileKvStore::open(&config.storage_path).with_context(|| {
        format!(
            "failed to open storage at {}",
            config.storage_path.display()
        )
    })?;
    let client = CatalogClient::new(
        &config.catalog_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;

    let mut tracker = Tracker::new(
        VisitedStore::new(kv, config.storage_key.clone()),
        TerminalUi::new(auto_confirm),
        config.map,
    )
    .with_view(command.initial_view());

    tracing::debug!(env = %config.env, url = %client.url(), "starting session");
    let report = tracker.start(&client).await?;
    tracing::debug!(
        stores = report.store_count,
        visited = report.visited_count,
        "session ready"
    );

    match command {
        Commands::Status => commands::run_status(&tracker, &report),
        Commands::List { .. } => commands::run_list(&tracker),
        Commands::Map { focus, .. } => commands::run_map(&mut tracker, focus.as_deref()),
        Commands::Visit { id } => commands::run_visit(&mut tracker, &id)?,
        Commands::Unvisit { id } => commands::run_unvisit(&mut tracker, &id)?,
        Commands::Erase { .. } => commands::run_erase(&mut tracker)?,
        Commands::Export { out_dir } => {
            let dir = out_dir.unwrap_or_else(|| config.export_dir.clone());
            commands::run_export(&tracker, &dir)?;
        }
        Commands::Import { path, mime } => {
            commands::run_import(&mut tracker, &path, mime.as_deref())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
