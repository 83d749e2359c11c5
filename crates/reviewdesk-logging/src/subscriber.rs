// ABOUTME: Tracing subscriber initialization and layer composition
// ABOUTME: Stacks the configured output layers under one environment filter

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{prelude::*, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::layers::{BoxedLayer, create_console_layer, create_env_filter, create_file_layer};

/// Keeps background log writers alive; dropping it flushes file output.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the global tracing subscriber with the given configuration.
pub fn init_subscriber(config: LoggingConfig) -> Result<LoggingGuard> {
    let env_filter = create_env_filter(&config)?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if let Some(console) = create_console_layer(&config.output) {
        layers.push(console);
    }

    let mut file_guard = None;
    if config.output.file {
        let (file_layer, guard) = create_file_layer(&config.file, config.output.json)?;
        layers.push(file_layer);
        file_guard = Some(guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    tracing::info!(
        log_level = %config.level.0,
        console_output = config.output.console,
        file_output = config.output.file,
        json_output = config.output.json,
        file_path = %config.file.path.display(),
        "Reviewdesk logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputConfig;

    #[test]
    fn test_init_subscriber_twice_fails_second_time() {
        let config = LoggingConfig {
            output: OutputConfig {
                console: true,
                file: false,
                json: false,
            },
            ..Default::default()
        };

        // Another test may already have installed a subscriber
        let first = init_subscriber(config.clone());
        let second = init_subscriber(config);
        assert!(first.is_err() || second.is_err());
    }
}
