//! Loading option maps from files and the environment

use super::vertex::{BASE_URL_ENV, PROJECT_ID_ENV, REGION_ENV};
use crate::error::{CirrusError, CirrusResult};
use crate::params::Options;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Load an option map from a `.toml` or `.json` file.
///
/// The file's top level must be a table/object; its entries become the options.
pub fn load_options(path: impl AsRef<Path>) -> CirrusResult<Options> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        CirrusError::io_with_path(
            format!("Failed to read options file: {}", e),
            path.display().to_string(),
        )
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let options: Options = match extension.as_deref() {
        Some("toml") => toml::from_str(&content)?,
        Some("json") => serde_json::from_str(&content).map_err(|e| {
            CirrusError::config_with_context(
                format!("Invalid JSON: {}", e),
                format!("Parsing {}", path.display()),
            )
        })?,
        _ => {
            return Err(CirrusError::config(format!(
                "Unsupported options file '{}': expected .toml or .json",
                path.display()
            )));
        }
    };

    debug!(
        "Loaded {} option(s) from {}",
        options.len(),
        path.display()
    );
    Ok(options)
}

/// Collect the environment-backed client options that are set
pub fn options_from_env() -> Options {
    [
        ("region", REGION_ENV),
        ("project_id", PROJECT_ID_ENV),
        ("base_url", BASE_URL_ENV),
    ]
    .into_iter()
    .filter_map(|(key, var)| {
        std::env::var(var)
            .ok()
            .map(|value| (key.to_string(), Value::String(value)))
    })
    .collect()
}
