use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

static TRACING_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Initialize tracing.
///
/// - stdout: human logs.
/// - file (only with `log_dir`): JSONL, hourly rolling, `<log_dir>/<service>.jsonl`.
/// - env: RUST_LOG controls level (e.g. `info,path_decoder=debug`).
///
/// The file writer's guard is parked in a static; dropping it loses buffered lines.
pub fn init_tracing(service: &str, cfg: &AppConfig) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true);

    let json_layer = match (&cfg.log_dir, cfg.json_logs()) {
        (Some(log_dir), true) => {
            std::fs::create_dir_all(log_dir)
                .with_context(|| format!("create log_dir failed: {}", log_dir.display()))?;

            let file_appender =
                tracing_appender::rolling::hourly(log_dir, format!("{service}.jsonl"));
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            let _ = TRACING_GUARD.set(guard);

            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true)
                    .with_writer(file_writer),
            )
        }
        _ => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(json_layer)
        .try_init()
        .context("install tracing subscriber")?;

    Ok(())
}
