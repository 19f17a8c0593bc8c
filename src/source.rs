//! Lock text sources
//!
//! One side of a comparison reads its lock text either from a file on
//! disk or from a git revision via `git show <rev>:<path>`, so CI can
//! compare the working tree against a base branch without checking it
//! out. Acquisition stays outside the extractor; the extractor only
//! ever sees text.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{PubdiffError, PubdiffResult};

/// Where one side of the comparison reads its lock text from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockSource {
    /// Read the file as-is from disk
    File(PathBuf),
    /// Read `path` as stored at `revision`
    GitRev { revision: String, path: PathBuf },
}

impl LockSource {
    /// Read the raw lock document text
    pub fn read(&self) -> PubdiffResult<String> {
        match self {
            LockSource::File(path) => Ok(fs::read_to_string(path)?),
            LockSource::GitRev { revision, path } => git_show(revision, path),
        }
    }
}

impl fmt::Display for LockSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockSource::File(path) => write!(f, "{}", path.display()),
            LockSource::GitRev { revision, path } => {
                write!(f, "{}:{}", revision, path.display())
            }
        }
    }
}

fn git_show(revision: &str, path: &Path) -> PubdiffResult<String> {
    let spec = format!("{}:{}", revision, normalize_git_path(path));
    let output = Command::new("git").arg("show").arg(&spec).output()?;

    if !output.status.success() {
        return Err(PubdiffError::GitShow {
            revision: revision.to_string(),
            path: path.display().to_string(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Git tree paths always use forward slashes, regardless of platform.
fn normalize_git_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
