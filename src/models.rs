//! Core data models for pubdiff
//!
//! Defines the fundamental data structures used throughout pubdiff:
//! - `LibraryRecord`: one tracked library as pinned by a lock document
//! - `Snapshot`: the tracked subset of one lock document
//! - `FieldDelta` and `LibraryChange`: the comparison output

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One tracked library as captured by a single lock document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryRecord {
    /// Library name, unique within a snapshot
    pub name: String,

    /// Declared version at this snapshot
    pub version: String,

    /// Document-defined attribute bag (source url, content hash,
    /// registry name, ...). Keys keep the order the lock document
    /// declared them in; the schema does not fix the key set.
    pub description: IndexMap<String, String>,
}

impl LibraryRecord {
    /// Create a new record
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: IndexMap<String, String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description,
        }
    }
}

/// The tracked subset of one lock document.
///
/// Keyed by library name. Iteration follows insertion order, which the
/// extractor makes the tracked-libraries order; lookup is by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    records: IndexMap<String, LibraryRecord>,
}

impl Snapshot {
    /// Create a new empty snapshot
    pub fn new() -> Self {
        Self {
            records: IndexMap::new(),
        }
    }

    /// Check if the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Get a record by library name
    pub fn get(&self, name: &str) -> Option<&LibraryRecord> {
        self.records.get(name)
    }

    /// Check if a library name is present
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Insert a record, keyed by its name
    pub fn insert(&mut self, record: LibraryRecord) {
        self.records.insert(record.name.clone(), record);
    }

    /// Iterate records in insertion order
    pub fn records(&self) -> impl Iterator<Item = &LibraryRecord> {
        self.records.values()
    }

    /// Iterate library names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(|s| s.as_str())
    }
}

/// A single changed scalar field between two records of the same name.
///
/// Exists only for fields whose value changed; both sides are carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDelta {
    /// The literal `version`, or `description.<key>`
    #[serde(rename = "fieldName")]
    pub field: String,

    /// Value in the base snapshot
    pub base: String,

    /// Value in the updated snapshot. `None` when the updated record's
    /// description no longer has the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

/// Per-library change between a base and an updated snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LibraryChange {
    /// Name present only in the updated snapshot
    Added { record: LibraryRecord },

    /// Name present only in the base snapshot
    Removed { record: LibraryRecord },

    /// Name present in both, with at least one changed field
    Updated { name: String, deltas: Vec<FieldDelta> },
}

impl LibraryChange {
    /// The library name this change is about
    pub fn name(&self) -> &str {
        match self {
            LibraryChange::Added { record } | LibraryChange::Removed { record } => &record.name,
            LibraryChange::Updated { name, .. } => name,
        }
    }
}
