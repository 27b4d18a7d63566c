//! Export of the visited set to a JSON file and import back from one.
//!
//! Import is two-phase: [`parse_import`] validates the whole file and either
//! rejects it outright or yields an [`ImportBatch`]; [`apply_import`] merges a
//! batch into a visited set. Nothing is mutated for a rejected file.

use chrono::NaiveDate;
use thiserror::Error;

use crate::store::coerce_id;
use crate::visited::VisitedSet;

/// Errors that reject an import (or, rarely, an export) as a whole.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("unsupported file type \"{mime_type}\": please choose a JSON file")]
    UnsupportedMimeType { mime_type: String },

    #[error("file {file_name} is not valid JSON: {source}")]
    InvalidJson {
        file_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("file {file_name} must contain a JSON array of store ids, found {found}")]
    NotAnArray {
        file_name: String,
        found: &'static str,
    },

    #[error("failed to serialize visited stores: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A user-selected file as handed over by the front end.
#[derive(Debug, Clone)]
pub struct ImportFile {
    pub name: String,
    /// Declared content type, e.g. `application/json`.
    pub mime_type: String,
    pub contents: String,
}

/// Ids extracted from a structurally valid import file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBatch {
    /// Every string or number entry, coerced to a string, in file order.
    pub ids: Vec<String>,
    /// Total number of array elements read.
    pub read: usize,
    /// Elements that were neither string nor number.
    pub skipped: usize,
}

/// Counts reported back to the user after an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub read: usize,
    pub added: usize,
    pub skipped: usize,
}

/// Serialize the visited ids as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`TransferError::Serialize`] if serialization fails.
pub fn export_visited(visited: &VisitedSet) -> Result<String, TransferError> {
    Ok(serde_json::to_string_pretty(&visited.to_vec())?)
}

/// Download file name for an export made on `date`.
#[must_use]
pub fn export_file_name(date: NaiveDate) -> String {
    format!("mcdo-visited-jp-{}.json", date.format("%Y%m%d"))
}

/// Validate an import file and extract its ids.
///
/// # Errors
///
/// - [`TransferError::UnsupportedMimeType`] when the declared type is not JSON
///   (checked before the contents are looked at).
/// - [`TransferError::InvalidJson`] when the contents do not parse.
/// - [`TransferError::NotAnArray`] when the top-level value is not an array.
pub fn parse_import(file: &ImportFile) -> Result<ImportBatch, TransferError> {
    if !is_json_mime(&file.mime_type) {
        return Err(TransferError::UnsupportedMimeType {
            mime_type: file.mime_type.clone(),
        });
    }

    let value: serde_json::Value =
        serde_json::from_str(&file.contents).map_err(|e| TransferError::InvalidJson {
            file_name: file.name.clone(),
            source: e,
        })?;

    let serde_json::Value::Array(entries) = value else {
        return Err(TransferError::NotAnArray {
            file_name: file.name.clone(),
            found: json_type_name(&value),
        });
    };

    let mut batch = ImportBatch {
        read: entries.len(),
        ..ImportBatch::default()
    };
    for (index, entry) in entries.iter().enumerate() {
        if let Some(id) = coerce_id(entry) {
            batch.ids.push(id);
        } else {
            tracing::warn!(
                file = %file.name,
                index,
                kind = json_type_name(entry),
                "skipping import entry that is not a string or number"
            );
            batch.skipped += 1;
        }
    }

    Ok(batch)
}

/// Merge `batch` into `visited`, counting ids that were not already present.
pub fn apply_import(batch: &ImportBatch, visited: &mut VisitedSet) -> ImportReport {
    let added = batch
        .ids
        .iter()
        .filter(|id| visited.insert(id.as_str()))
        .count();

    ImportReport {
        read: batch.read,
        added,
        skipped: batch.skipped,
    }
}

/// `application/json`, `text/json`, or any `+json` suffix type. Parameters
/// such as `; charset=utf-8` are ignored.
fn is_json_mime(mime_type: &str) -> bool {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence == "text/json" || essence.ends_with("+json")
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "transfer_test.rs"]
mod tests;
