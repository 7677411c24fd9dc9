//! The two transform stages and the artifact writer.
//!
//! Stage contract: read the entry point, apply the ordered transform passes,
//! hand the finished [`Artifact`] to [`write::write_artifact`]. A stage that
//! fails writes nothing.
//!
//! - [`styles`]: parse → lower/prefix for browser targets → minify (lightningcss)
//! - [`scripts`]: parse → transpile to target → minify → codegen (oxc)

pub mod scripts;
pub mod styles;
pub mod write;

pub use scripts::compile_scripts;
pub use styles::compile_styles;
pub use write::write_artifact;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output of a transform stage, ready for the artifact writer.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Output file name derived from the entry point (e.g. `main.css`).
    pub name: String,
    /// Compiled bytes, without the sourceMappingURL trailer.
    pub code: String,
    /// Source map JSON, present when source maps are enabled.
    pub map: Option<String>,
}

/// Failure modes of a transform stage run.
///
/// `Style` is the only recoverable case: the pipeline logs it and keeps the
/// previous output in place. Everything else aborts the enclosing run.
#[derive(Debug, Error)]
pub enum StageError {
    /// Stylesheet compile diagnostic (syntax error, unresolvable rule).
    #[error("{0}")]
    Style(String),

    /// Entry point could not be read.
    #[error("failed to read `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fatal transform failure (script parse/transpile/minify, CSS printer).
    #[error("{0}")]
    Transform(String),

    /// Artifact or map could not be written.
    #[error("failed to write `{path}`")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StageError {
    /// True for diagnostics the pipeline logs and survives.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Style(_))
    }
}

/// Output file name for an entry point: same stem, forced extension.
pub(crate) fn artifact_name(entry: &Path, ext: &str) -> String {
    let mut name = PathBuf::from(entry.file_name().unwrap_or_else(|| OsStr::new("main")));
    name.set_extension(ext);
    name.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_name() {
        assert_eq!(artifact_name(Path::new("app/styles/main.css"), "css"), "main.css");
        assert_eq!(artifact_name(Path::new("app/js/site.js"), "js"), "site.js");
        // Extension is forced, stem kept
        assert_eq!(artifact_name(Path::new("app/js/site.mjs"), "js"), "site.js");
    }

    #[test]
    fn test_stage_error_severity() {
        assert!(StageError::Style("bad selector".into()).is_recoverable());
        assert!(!StageError::Transform("parse failed".into()).is_recoverable());
        assert!(
            !StageError::Read {
                path: PathBuf::from("missing.css"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            }
            .is_recoverable()
        );
    }
}
