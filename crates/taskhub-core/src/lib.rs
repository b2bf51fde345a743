pub mod config;
pub mod error;
pub mod session;

pub use config::{ApiConfig, Config, ScheduleConfig, ValidationResult};
pub use error::{AppError, AuthError, ConfigError, NetworkError};
pub use session::Session;

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("TaskHub core initialized");
    Ok(())
}
