use std::path::PathBuf;

use anyhow::Result;
use tokio::io::BufReader;

use tagged_console::config::{self, ConsoleConfig};
use tagged_console::logging;
use tagged_console::script::run_script;
use tagged_console::Console;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional first argument: path to a config file
    let explicit_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match &explicit_path {
        Some(path) => ConsoleConfig::load_from(path)?,
        None => ConsoleConfig::load()?,
    };

    // Initialize logging BEFORE any tracing calls
    let _guard = logging::init_logging(&config)?;

    if explicit_path.is_none() && config::try_config_dir().is_none() {
        tracing::warn!("Could not determine home directory, using current directory for config");
    }
    let config_path = explicit_path.unwrap_or_else(config::config_file_path);
    if !config_path.exists() {
        tracing::debug!("No config at {}, using defaults", config_path.display());
    }

    tracing::debug!(
        "Console '{}' using {} sink (active: {})",
        config.name,
        config.sink,
        config.active
    );

    let mut console = Console::from_config(&config);
    let reader = BufReader::new(tokio::io::stdin());
    run_script(&mut console, reader).await?;

    Ok(())
}
