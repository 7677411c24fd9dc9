//! Artifact writer: persist a finished stage output to the destination
//! directory.
//!
//! The writer only ever sees artifacts from stages that succeeded, so a
//! failed compile never clobbers the previous output. The `.map` sidecar and
//! the sourceMappingURL trailer are emitted here, keyed off the map the stage
//! attached.

use super::{Artifact, StageError};
use std::fs;
use std::path::{Path, PathBuf};

/// Write `artifact` into `dest_dir`, creating the directory if needed.
///
/// When the artifact carries a source map, a `<name>.map` sidecar lands next
/// to it and a sourceMappingURL trailer is appended to the code. Returns the
/// path of the written artifact.
pub fn write_artifact(artifact: &Artifact, dest_dir: &Path) -> Result<PathBuf, StageError> {
    fs::create_dir_all(dest_dir).map_err(|source| StageError::Write {
        path: dest_dir.to_path_buf(),
        source,
    })?;

    let out_path = dest_dir.join(&artifact.name);

    // Sidecar first: a failure here leaves the previous artifact untouched
    let code = match &artifact.map {
        Some(map) => {
            let map_name = format!("{}.map", artifact.name);
            let map_path = dest_dir.join(&map_name);
            fs::write(&map_path, map).map_err(|source| StageError::Write {
                path: map_path,
                source,
            })?;
            format!(
                "{}\n{}\n",
                artifact.code.trim_end(),
                map_trailer(&artifact.name, &map_name)
            )
        }
        None => artifact.code.clone(),
    };

    fs::write(&out_path, code).map_err(|source| StageError::Write {
        path: out_path.clone(),
        source,
    })?;

    Ok(out_path)
}

/// sourceMappingURL trailer in the comment syntax of the artifact's language.
fn map_trailer(name: &str, map_name: &str) -> String {
    if name.ends_with(".css") {
        format!("/*# sourceMappingURL={map_name} */")
    } else {
        format!("//# sourceMappingURL={map_name}")
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn artifact(name: &str, map: Option<&str>) -> Artifact {
        Artifact {
            name: name.to_string(),
            code: "body{color:red}".to_string(),
            map: map.map(String::from),
        }
    }

    #[test]
    fn test_write_with_map_sidecar() {
        let dir = TempDir::new().unwrap();
        let out = write_artifact(&artifact("main.css", Some("{\"version\":3}")), dir.path())
            .unwrap();

        assert_eq!(out, dir.path().join("main.css"));
        let code = fs::read_to_string(&out).unwrap();
        assert!(code.ends_with("/*# sourceMappingURL=main.css.map */\n"));

        let map = fs::read_to_string(dir.path().join("main.css.map")).unwrap();
        assert_eq!(map, "{\"version\":3}");
    }

    #[test]
    fn test_js_trailer_syntax() {
        let dir = TempDir::new().unwrap();
        let out = write_artifact(&artifact("main.js", Some("{}")), dir.path()).unwrap();

        let code = fs::read_to_string(out).unwrap();
        assert!(code.ends_with("//# sourceMappingURL=main.js.map\n"));
    }

    #[test]
    fn test_write_without_map() {
        let dir = TempDir::new().unwrap();
        let out = write_artifact(&artifact("main.css", None), dir.path()).unwrap();

        let code = fs::read_to_string(out).unwrap();
        assert_eq!(code, "body{color:red}");
        assert!(!dir.path().join("main.css.map").exists());
    }

    #[test]
    fn test_creates_destination_dir() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("dist/assets");

        write_artifact(&artifact("main.css", None), &dest).unwrap();
        assert!(dest.join("main.css").exists());
    }

    #[test]
    fn test_unwritable_destination_is_write_error() {
        let dir = TempDir::new().unwrap();
        // A file where the destination directory should be
        let blocker = dir.path().join("dist");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_artifact(&artifact("main.css", None), &blocker).unwrap_err();
        assert!(matches!(err, StageError::Write { .. }));
        assert!(!err.is_recoverable());
    }
}
