//! JSON input loading.

use crate::error::{CliError, CliResult};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read and parse a JSON document from `path`, or from stdin when `path` is `-`.
pub fn read_json<T: DeserializeOwned>(path: &Path, what: &'static str) -> CliResult<T> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::Input {
                path: path.to_path_buf(),
                source,
            })?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|source| CliError::Input {
            path: path.to_path_buf(),
            source,
        })?
    };

    debug!("Read {} bytes of {} input from {:?}", raw.len(), what, path);

    parse_json(&raw, what)
}

pub fn parse_json<T: DeserializeOwned>(raw: &str, what: &'static str) -> CliResult<T> {
    serde_json::from_str(raw).map_err(|source| CliError::Parse { what, source })
}
