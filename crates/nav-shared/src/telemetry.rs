//! Telemetry setup

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingSettings;
use crate::constants::LOG_FILE_NAME;
use crate::error::AppError;

/// Installs the global subscriber. Console output goes to stderr so command
/// output on stdout stays machine readable. When `dir` is set, a daily
/// rolling JSON file is written as well; keep the returned guard alive for
/// the lifetime of the process.
pub fn init_telemetry(settings: &LoggingSettings) -> Result<Option<WorkerGuard>, AppError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let console_json = settings
        .json
        .then(|| fmt::layer().json().with_writer(std::io::stderr));
    let console_plain = (!settings.json).then(|| fmt::layer().with_writer(std::io::stderr));

    let (file_layer, guard) = match &settings.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().json().with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_json)
        .with(console_plain)
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::TelemetryError(e.to_string()))?;

    Ok(guard)
}
