use clap::Parser;
use path_decoder::config::AppConfig;
use path_decoder::server::{self, AppState};
use path_decoder::{decoder, telemetry};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "path-decoder", version, about = "Normalizes request-target paths before routing")]
struct Args {
    /// Path to config.yaml (relative paths inside config are resolved against this file's directory)
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Decode this request target, print the result and exit. Repeatable.
    #[arg(long, value_name = "TARGET")]
    check: Vec<String>,
}

/// `None`: the default config.yaml isn't anywhere, run with built-in defaults.
fn locate_config(p: PathBuf) -> Option<PathBuf> {
    if p.exists() {
        return Some(p);
    }
    if p != Path::new("config.yaml") {
        // explicitly requested, let the read fail loudly
        return Some(p);
    }

    let exe = std::env::current_exe().ok()?;
    let cand = exe.parent()?.join("config.yaml");
    cand.exists().then_some(cand)
}

fn run_checks(targets: &[String]) -> ExitCode {
    let mut failed = false;
    for target in targets {
        match decoder::decode_target(target) {
            Ok(path) => println!("{target} -> {path}"),
            Err(e) => {
                failed = true;
                println!("{target} -> error: {e}");
            }
        }
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("ctrl-c handler failed: {}", e);
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    if !args.check.is_empty() {
        return Ok(run_checks(&args.check));
    }

    let cfg = match locate_config(args.config) {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::default(),
    };

    telemetry::init_tracing("path-decoder", &cfg)?;
    if let Some(header) = cfg.raw_target_header() {
        tracing::info!("raw request target taken from header {}", header);
    }

    server::service::serve(Arc::new(AppState::new(cfg)), shutdown_signal()).await?;
    Ok(ExitCode::SUCCESS)
}
