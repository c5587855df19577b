use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    pub listen: Option<String>,

    /// Directory for hourly-rolling JSONL logs. Unset: stdout only.
    pub log_dir: Option<PathBuf>,

    /// Write JSONL to `log_dir` (default true when `log_dir` is set).
    pub log_json: Option<bool>,

    /// Rewritten path that serves the prometheus exposition. Default: /metrics
    pub metrics_path: Option<String>,

    /// Take the raw request target from this header instead of the request line,
    /// e.g. `x-original-uri` behind a front proxy that forwards it.
    pub raw_target_header: Option<String>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        let mut cfg: AppConfig = serde_yaml::from_str(&text)
            .with_context(|| format!("parse config: {}", path.display()))?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        cfg.resolve_paths(base_dir);
        Ok(cfg)
    }

    pub fn listen_addr(&self) -> String {
        self.listen
            .clone()
            .unwrap_or_else(|| "0.0.0.0:5000".to_string())
    }

    pub fn metrics_path(&self) -> &str {
        self.metrics_path.as_deref().unwrap_or("/metrics")
    }

    pub fn json_logs(&self) -> bool {
        self.log_dir.is_some() && self.log_json.unwrap_or(true)
    }

    pub fn raw_target_header(&self) -> Option<&str> {
        self.raw_target_header
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }

    /// Resolve relative paths in config against the directory holding the config file.
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        if let Some(p) = &self.log_dir {
            self.log_dir = Some(resolve_path(base_dir, p));
        }
    }
}

fn resolve_path(base_dir: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}
