//! Snapshot differ
//!
//! Pure comparison of two extracted snapshots. Walks the
//! tracked-library list in order and classifies each name as added,
//! removed, updated, or unchanged. Assumes both snapshots came out of
//! the extractor; has no failure modes of its own.

use crate::models::{FieldDelta, LibraryChange, LibraryRecord, Snapshot};

/// Field name reported for version changes
const VERSION_FIELD: &str = "version";

/// Compare two snapshots over the tracked-library list.
///
/// Output order follows `libraries`; names with nothing to report are
/// omitted entirely. An `Updated` entry is only emitted with at least
/// one delta.
pub fn diff(libraries: &[String], base: &Snapshot, updated: &Snapshot) -> Vec<LibraryChange> {
    let mut changes = Vec::new();

    for name in libraries {
        match (base.get(name), updated.get(name)) {
            (Some(base_record), Some(updated_record)) => {
                let deltas = field_deltas(base_record, updated_record);
                if !deltas.is_empty() {
                    changes.push(LibraryChange::Updated {
                        name: name.clone(),
                        deltas,
                    });
                }
            }
            (Some(base_record), None) => changes.push(LibraryChange::Removed {
                record: base_record.clone(),
            }),
            (None, Some(updated_record)) => changes.push(LibraryChange::Added {
                record: updated_record.clone(),
            }),
            (None, None) => {}
        }
    }

    changes
}

/// Compute per-field deltas for a library present in both snapshots.
///
/// `version` is compared first, then the description keys of the BASE
/// record in document order. Keys that only exist in the updated
/// description are never inspected and never produce a delta; a key
/// the updated description dropped counts as a mismatch with no
/// updated side.
fn field_deltas(base: &LibraryRecord, updated: &LibraryRecord) -> Vec<FieldDelta> {
    let mut deltas = Vec::new();

    if base.version != updated.version {
        deltas.push(FieldDelta {
            field: VERSION_FIELD.to_string(),
            base: base.version.clone(),
            updated: Some(updated.version.clone()),
        });
    }

    for (key, base_value) in &base.description {
        let updated_value = updated.description.get(key);
        if updated_value != Some(base_value) {
            deltas.push(FieldDelta {
                field: format!("description.{key}"),
                base: base_value.clone(),
                updated: updated_value.cloned(),
            });
        }
    }

    deltas
}
