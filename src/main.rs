// Skater comparison entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config (auto-copying defaults on first run)
// 3. Load the season dataset (local file or HTTP fetch)
// 4. Build the comparison session (slots 1 and 2 auto-filled)
// 5. Run the TUI event loop until the user quits

use std::path::Path;

use anyhow::Context;
use tracing::info;

use skater_compare::compare::CompareSession;
use skater_compare::config;
use skater_compare::dataset::Dataset;
use skater_compare::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Skater comparison starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {} team codes, {} position codes, debounce {}ms",
        config.dictionaries.teams.len(),
        config.dictionaries.positions.len(),
        config.ui.debounce_ms
    );

    // 3. Load the season dataset
    let dataset = match &config.dataset.url {
        Some(url) => {
            info!("Fetching dataset from {}", url);
            Dataset::from_url(url)
                .await
                .context("failed to fetch dataset")?
        }
        None => {
            info!("Reading dataset from {}", config.dataset.path);
            Dataset::from_path(Path::new(&config.dataset.path))
                .context("failed to read dataset")?
        }
    };
    info!("Loaded {} skater records", dataset.len());

    // 4. Build the comparison session
    let session = CompareSession::new(
        dataset,
        config.normalization.clone(),
        config.dictionaries.clone(),
        config.ui.dropdown_limit,
    );

    // 5. Run the TUI event loop (blocking until the user quits)
    tui::run(session, config.ui.clone()).await?;

    info!("Skater comparison shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by
/// the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("skater-compare.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("skater_compare=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
