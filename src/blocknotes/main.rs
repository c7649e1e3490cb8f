use blocknotes::api::NotesApi;
use blocknotes::config::NotesConfig;
use blocknotes::error::{NotesError, Result};
use blocknotes::http::{self, AppState};
use blocknotes::logging::init_logging;
use blocknotes::store::fs::FileStore;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::path::PathBuf;
use tokio::net::TcpListener;

mod args;
use args::{Cli, Commands};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

struct AppContext {
    data_dir: PathBuf,
    config: NotesConfig,
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Serve) | None => handle_serve(ctx).await,
        Some(Commands::Config { write }) => handle_config(&ctx, write),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "blocknotes", "blocknotes")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                NotesError::Api("Could not determine data dir; pass --data-dir".into())
            })?,
    };

    let mut config = NotesConfig::load(&data_dir)?;
    if let Some(bind) = &cli.bind {
        config.bind = bind.clone();
    }

    Ok(AppContext { data_dir, config })
}

async fn handle_serve(ctx: AppContext) -> Result<()> {
    let store = FileStore::new(&ctx.data_dir);
    tracing::info!(dir = %store.root().display(), "using file store");

    let api = NotesApi::new(store).with_list_limit(ctx.config.list_limit);
    let app = http::router(AppState::new(api));

    let listener = TcpListener::bind(&ctx.config.bind)
        .await
        .map_err(NotesError::Io)?;
    println!(
        "{} http://{}",
        "blocknotes listening on".green(),
        ctx.config.bind
    );
    http::serve(listener, app).await
}

fn handle_config(ctx: &AppContext, write: bool) -> Result<()> {
    println!("{}", ctx.data_dir.display().to_string().dimmed());
    println!("bind = {}", ctx.config.bind);
    println!("list_limit = {}", ctx.config.list_limit);
    println!(
        "save_debounce_ms = {}",
        ctx.config.save_debounce().as_millis()
    );

    if write {
        ctx.config.save(&ctx.data_dir)?;
        println!("{}", "Configuration saved".green());
    }
    Ok(())
}
