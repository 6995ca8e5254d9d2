//! # File I/O
//!
//! JSON loading for requests, engine configuration and material catalogs.
//! Every failure is mapped to a structured [`CalcError`]:
//!
//! - open/read failures → `FileError` with the operation and path
//! - malformed JSON → `SerializationError` naming the file
//! - an unknown `shaft_type` in a request → `InvalidInput`
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use shaft_core::file_io::load_request;
//!
//! let request = load_request(Path::new("request.json")).unwrap();
//! println!("d = {} mm", request.shaft_diameter_mm);
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialCatalog;
use crate::selection::ConnectionRequest;

/// Read a file into a string.
pub fn read_to_string(path: &Path) -> CalcResult<String> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    Ok(contents)
}

/// Read and deserialize a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let contents = read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Load a [`ConnectionRequest`] from a JSON file.
///
/// The request is only parsed here; validation happens when it is run
/// through the engine.
pub fn load_request(path: &Path) -> CalcResult<ConnectionRequest> {
    let contents = read_to_string(path)?;
    ConnectionRequest::from_json_str(&contents).map_err(|e| match e {
        CalcError::SerializationError { reason } => CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), reason),
        },
        other => other,
    })
}

/// Load and validate a material catalog from a JSON array of records.
pub fn load_catalog(path: &Path) -> CalcResult<MaterialCatalog> {
    let contents = read_to_string(path)?;
    MaterialCatalog::from_json_str(&contents)
}
