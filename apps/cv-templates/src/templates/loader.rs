//! Loads template definitions from a directory of JSON files.
//!
//! One file per template. A bad file is reported and skipped; it never
//! prevents the remaining files from loading.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::templates::model::TemplateConfiguration;
use crate::templates::validator::validate_json;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read template directory {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read template file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template file {} is not valid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Template file {} is invalid: {}", .path.display(), .errors.join("; "))]
    Invalid { path: PathBuf, errors: Vec<String> },
}

/// Outcome for a single definition file.
#[derive(Debug)]
pub struct LoadedDefinition {
    pub path: PathBuf,
    pub result: Result<TemplateConfiguration, LoadError>,
}

/// Reads every `*.json` file in `dir`, sorted by file name.
///
/// Only an unreadable directory is an error; per-file failures are carried
/// in each [`LoadedDefinition`].
pub fn load_dir(dir: &Path) -> Result<Vec<LoadedDefinition>, LoadError> {
    let read_dir = std::fs::read_dir(dir).map_err(|source| LoadError::Directory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|source| LoadError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir_entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    debug!(dir = %dir.display(), files = paths.len(), "Loading template definitions");

    Ok(paths
        .into_iter()
        .map(|path| LoadedDefinition {
            result: load_file(&path),
            path,
        })
        .collect())
}

pub fn load_file(path: &Path) -> Result<TemplateConfiguration, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let report = validate_json(&value);
    if !report.is_valid {
        return Err(LoadError::Invalid {
            path: path.to_path_buf(),
            errors: report.errors,
        });
    }

    serde_json::from_value(value).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}
