//! Source-unit loading — the file-facing collaborator of the extractor.

pub mod go;

pub use go::{DeclBody, FieldEntry, TypeDecl, Unit};

use std::path::PathBuf;
use thiserror::Error;

/// Failure modes while obtaining source units. Both are fatal to the
/// run and carry the offending unit's path; no retries are attempted.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {}", path.display(), source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}:{}: {}", path.display(), line, message)]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

/// Read and parse every file into a [`Unit`], preserving input order.
pub fn load_units(paths: &[PathBuf]) -> Result<Vec<Unit>, SourceError> {
    let mut units = Vec::with_capacity(paths.len());
    for path in paths {
        let content = std::fs::read_to_string(path).map_err(|e| SourceError::Read {
            path: path.clone(),
            source: e,
        })?;
        units.push(go::parse(&content, path)?);
    }
    Ok(units)
}
