use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mural_core::{
    ControllerOptions, HttpRecadosApi, MuralController, RecadosApi, SortCriterion, UiAction,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::{load_settings, Settings};
use render::render_text;

#[derive(Parser, Debug)]
#[command(name = "mural", about = "Read and post recados on the mural")]
struct Args {
    /// Recados endpoint; overrides config file and environment.
    #[arg(long)]
    endpoint: Option<String>,
    /// Path to a TOML config file (defaults to ./mural.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Display timestamps at this UTC offset instead of the local one.
    #[arg(long, allow_hyphen_values = true)]
    utc_offset_minutes: Option<i32>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print the mural.
    List {
        #[arg(long, default_value = "recent")]
        sort: SortCriterion,
    },
    /// Post a recado, then print the refreshed mural.
    Post {
        #[arg(long)]
        author: String,
        #[arg(long)]
        body: String,
    },
}

fn build_api(settings: &Settings) -> Result<Arc<dyn RecadosApi>> {
    let endpoint = settings.endpoint_url()?;
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = settings.request_timeout() {
        builder = builder.timeout(timeout);
    }
    let http = builder.build().context("failed to build http client")?;
    let api = HttpRecadosApi::with_client(http, endpoint);
    info!(endpoint = %api.endpoint(), "using recados endpoint");
    Ok(Arc::new(api))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(minutes) = args.utc_offset_minutes {
        settings.utc_offset_minutes = Some(minutes);
    }

    let mut options = ControllerOptions::default();
    if let Some(offset) = settings.utc_offset()? {
        options.utc_offset = offset;
    }
    let mut controller = MuralController::new(build_api(&settings)?, options);

    match args.command {
        Command::List { sort } => {
            let loaded = controller.handle(UiAction::Load).await;
            if loaded.is_ok() {
                controller.handle(UiAction::ChooseSort(sort)).await?;
            }
            print!("{}", render_text(controller.view()));
            loaded.context("failed to load recados")?;
        }
        Command::Post { author, body } => {
            controller.handle(UiAction::OpenAddDialog).await?;
            controller.handle(UiAction::EditAuthor(author)).await?;
            controller.handle(UiAction::EditBody(body)).await?;
            let submitted = controller.handle(UiAction::SubmitAddDialog).await;
            print!("{}", render_text(controller.view()));
            submitted.context("failed to post recado")?;
        }
    }

    Ok(())
}
