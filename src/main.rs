mod app;
mod cache;
mod config;
mod error;
mod github;
mod identity;
mod logging;
mod state;
mod ui;

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use cache::{FileStore, MemoryStore, SnapshotStore};
use config::{Args, Config};
use error::Result;
use github::GitHubClient;
use identity::Identity;
use state::{LanguageFilter, PaginationEngine, StarredLoader};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let config = Config::from_args(&args);

    match run(args, config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("gitmarks: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, config: Config) -> Result<ExitCode> {
    // Keep the file writer alive for the whole run.
    let _log_guard = if args.plain {
        logging::init_stderr(args.verbose);
        None
    } else {
        Some(logging::init_file(&config.cache_dir, args.verbose)?)
    };

    let identity = Identity::from_location(&args.location)?;
    info!(%identity, key = %identity.cache_key(), "resolved identity");

    let store: Arc<dyn SnapshotStore> = if args.ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::new(&config.cache_dir))
    };
    let loader = Arc::new(StarredLoader::with_engine(
        store,
        PaginationEngine::with_page_size(config.page_size),
    ));
    let mut client = GitHubClient::from_config(&config)?;
    let filter = args
        .language
        .as_deref()
        .map(LanguageFilter::parse)
        .unwrap_or_default();

    if args.plain {
        let outcome = if args.reload {
            let ticket = loader.begin(&identity);
            loader.reload(&ticket, &mut client, identity, |_| {}).await
        } else {
            loader
                .load_location(&args.location, &mut client, |_| {})
                .await?
        };
        let ok = ui::plain::print_outcome(
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
            &outcome,
            &filter,
        )?;
        return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    let mut terminal = ratatui::init();
    let mut app = app::App::new(identity, loader, client, filter);
    app.start_session(args.reload);
    let result = app.run(&mut terminal);
    ratatui::restore();
    result?;

    Ok(ExitCode::SUCCESS)
}
