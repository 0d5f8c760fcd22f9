use std::path::PathBuf;

use anyhow::{Context, Result};

/// Bootstrap configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,
    /// Directory of extra JSON template definitions, registered after the built-ins.
    pub template_dir: Option<PathBuf>,
    /// Fail startup when any template is rejected.
    pub strict_templates: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            template_dir: std::env::var("TEMPLATE_DIR").ok().map(PathBuf::from),
            strict_templates: std::env::var("STRICT_TEMPLATES")
                .ok()
                .map(|v| v.parse::<bool>())
                .transpose()
                .context("STRICT_TEMPLATES must be 'true' or 'false'")?
                .unwrap_or(false),
        })
    }
}
