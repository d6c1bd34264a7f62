use anyhow::Context;
use canarycheck::controller::page::PageView;
use canarycheck::controller::theme::ThemeToggle;
use canarycheck::controller::types::{SelectedFile, UiState};
use canarycheck::controller::upload::{SubmitOutcome, UploadController};
use canarycheck::controller::view::UiEvent;
use canarycheck::core::check_client::HttpCheckClient;
use canarycheck::core::theme_store::FileThemeStore;
use canarycheck::utils::config::ClientConfig;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Check a file's extension against its detected type", long_about = None)]
struct Cli {
    /// file to upload
    file: PathBuf,
    /// also request a VirusTotal lookup
    #[arg(long)]
    virustotal: bool,
    /// server base url, overrides CANARY_SERVER_URL
    #[arg(long)]
    server: Option<String>,
    /// where to write the rendered page, overrides CANARY_PAGE_OUT
    #[arg(long)]
    out: Option<PathBuf>,
    /// flip the stored theme before rendering
    #[arg(long)]
    toggle_theme: bool,
    /// request timeout in seconds, overrides CANARY_REQUEST_TIMEOUT_SECS
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, anyhow::Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(server) = &cli.server {
        config = config.with_server(server)?;
    }
    if let Some(out) = cli.out {
        config.page_out = out;
    }
    if let Some(secs) = cli.timeout {
        config.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }

    let view = Arc::new(PageView::new());
    let theme = ThemeToggle::start(FileThemeStore::new(&config.theme_file), view.clone());
    if cli.toggle_theme {
        let now = theme.toggle()?;
        tracing::info!("theme switched to {}", now.as_str());
    }

    let client = Arc::new(HttpCheckClient::new(
        config.check_url.clone(),
        config.request_timeout,
    )?);
    let controller = UploadController::new(client, view.clone());

    let file = SelectedFile::from_path(&cli.file)
        .await
        .with_context(|| format!("reading {}", cli.file.display()))?;
    controller.handle(UiEvent::FilePicked(file)).await;
    controller.handle(UiEvent::ScanToggled(cli.virustotal)).await;

    match controller.handle(UiEvent::Submit).await {
        Some(SubmitOutcome::Shown(result)) => {
            println!("{}: {}", result.filename, result.message);
        }
        Some(SubmitOutcome::Failed(err)) => {
            eprintln!("{}", err.display_message());
        }
        Some(SubmitOutcome::Busy) | None => {}
    }

    tokio::fs::write(&config.page_out, view.render_page())
        .await
        .with_context(|| format!("writing {}", config.page_out.display()))?;
    tracing::info!("page written to {}", config.page_out.display());

    Ok(match controller.state() {
        UiState::ShowingResult => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
