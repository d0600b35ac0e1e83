//! Bootstrap entry point.
//!
//! # Responsibility
//! - Create every bookstore table in the configured database, then exit.
//! - Report failures on stderr and exit non-zero.

mod config;

use config::CliConfig;
use log::{error, info};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CliConfig::from_env();

    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = bookstore_core::init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match bookstore_core::create_tables(&config.db_path) {
        Ok(()) => {
            info!(
                "event=create_tables module=cli status=ok db_path={}",
                config.db_path.display()
            );
            println!(
                "bookstore_core {}: tables ready in {}",
                bookstore_core::core_version(),
                config.db_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(
                "event=create_tables module=cli status=error db_path={} error={}",
                config.db_path.display(),
                err
            );
            eprintln!("exiting program... ({err})");
            ExitCode::FAILURE
        }
    }
}
