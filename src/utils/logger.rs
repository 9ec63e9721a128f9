use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::Local;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Filter used when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "phish_scoring=info";

/// Installs the global tracing subscriber.
///
/// With a log directory, output goes to a timestamped file inside it;
/// otherwise to stderr.
pub fn init_logger(log_dir: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match log_dir {
        Some(dir) => {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }

            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            let log_file = dir.join(format!("phish_scoring_{}.log", timestamp));

            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(false)
                .with_writer(fs::File::create(&log_file)?)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            info!("Logger initialized at {}", log_file.display());
        }
        None => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}
