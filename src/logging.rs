use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

/// Sends `log` output to a file; stdout belongs to the terminal UI.
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .add_filter_allow_str("reelview")
        .build();

    WriteLogger::init(level, config, file).context("installing logger")?;
    Ok(())
}
