//! pubdiff - pinned-library change reporter for pubspec.lock
//!
//! pubdiff extracts a tracked subset of libraries from two
//! `pubspec.lock` snapshots (working tree files, arbitrary paths, or
//! git revisions) and reports field-level changes, rendered for CI
//! comments or terminal use.

pub mod config;
pub mod diff;
pub mod error;
pub mod models;
pub mod parser;
pub mod report;
pub mod source;

// Re-exports for convenience
pub use config::{Config, ConfigWarning};
pub use diff::diff;
pub use error::{PubdiffError, PubdiffResult};
pub use models::{FieldDelta, LibraryChange, LibraryRecord, Snapshot};
pub use parser::extract;
pub use report::{render_json, render_markdown, render_text, ReportFormat};
pub use source::LockSource;
