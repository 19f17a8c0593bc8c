//! Lock document extractor
//!
//! Turns raw `pubspec.lock` text plus the tracked-library list into a
//! `Snapshot`. The document is parsed into a generic YAML tree first,
//! then the required shape (`packages`, per-entry `version` and
//! `description`) is validated and projected explicitly so malformed
//! documents fail fast instead of surfacing deep in the comparison.

use indexmap::IndexMap;
use serde_yaml_ng::{Mapping, Value};

use crate::error::{PubdiffError, PubdiffResult};
use crate::models::{LibraryRecord, Snapshot};

/// Top-level key holding the resolved package entries
const PACKAGES_KEY: &str = "packages";

/// Extract the tracked subset of a lock document.
///
/// Libraries that the document does not pin are skipped silently;
/// libraries the caller did not ask for are never materialized, so the
/// result holds at most `libraries.len()` records, in `libraries`
/// order. Duplicated names resolve to the same record.
///
/// Fails with `MalformedLockfile` when the text is not valid YAML,
/// when the top-level `packages` mapping is absent, or when a tracked
/// entry does not have the expected `version`/`description` shape.
pub fn extract(document: &str, libraries: &[String]) -> PubdiffResult<Snapshot> {
    let root: Value = serde_yaml_ng::from_str(document)
        .map_err(|e| PubdiffError::malformed(format_yaml_error(&e)))?;

    let packages = root
        .as_mapping()
        .and_then(|doc| lookup(doc, PACKAGES_KEY))
        .and_then(Value::as_mapping)
        .ok_or_else(|| {
            PubdiffError::malformed(format!("missing top-level '{PACKAGES_KEY}' mapping"))
        })?;

    let mut snapshot = Snapshot::new();
    for name in libraries {
        // Not pinned in this document: absence, not an error.
        let Some(entry) = lookup(packages, name) else {
            continue;
        };
        snapshot.insert(project_record(name, entry)?);
    }

    Ok(snapshot)
}

/// Validate one package entry and project it into a `LibraryRecord`.
fn project_record(name: &str, entry: &Value) -> PubdiffResult<LibraryRecord> {
    let fields = entry.as_mapping().ok_or_else(|| {
        PubdiffError::malformed(format!("package '{name}' is not a mapping"))
    })?;

    let version = lookup(fields, "version")
        .and_then(scalar_to_string)
        .ok_or_else(|| {
            PubdiffError::malformed(format!("package '{name}' has no scalar 'version'"))
        })?;

    let description = lookup(fields, "description")
        .and_then(Value::as_mapping)
        .ok_or_else(|| {
            PubdiffError::malformed(format!("package '{name}' has no 'description' mapping"))
        })?;

    Ok(LibraryRecord::new(
        name,
        version,
        project_description(name, description)?,
    ))
}

/// Copy a description mapping verbatim, preserving document order.
fn project_description(name: &str, mapping: &Mapping) -> PubdiffResult<IndexMap<String, String>> {
    let mut description = IndexMap::with_capacity(mapping.len());

    for (key, value) in mapping {
        let key = key.as_str().ok_or_else(|| {
            PubdiffError::malformed(format!("package '{name}' has a non-string description key"))
        })?;
        let value = scalar_to_string(value).ok_or_else(|| {
            PubdiffError::malformed(format!(
                "package '{name}' description field '{key}' is not a scalar"
            ))
        })?;
        description.insert(key.to_string(), value);
    }

    Ok(description)
}

/// Look up a string key in a YAML mapping.
fn lookup<'a>(mapping: &'a Mapping, key: &str) -> Option<&'a Value> {
    mapping
        .iter()
        .find(|(k, _)| k.as_str() == Some(key))
        .map(|(_, v)| v)
}

/// Render a scalar YAML node verbatim; `None` for null and nested
/// structures.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn format_yaml_error(err: &serde_yaml_ng::Error) -> String {
    match err.location() {
        Some(loc) => format!("line {}: {}", loc.line(), err),
        None => err.to_string(),
    }
}
