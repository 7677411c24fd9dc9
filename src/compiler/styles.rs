//! Style transform stage: compile, vendor-prefix, and minify the stylesheet
//! entry point.
//!
//! lightningcss drives all three passes: `parse` accepts modern CSS (nesting,
//! custom media, ...), `minify` lowers it for the configured browser targets
//! and adds vendor prefixes, `to_css` prints the minified result and fills the
//! source map when one is requested.

use super::{Artifact, StageError, artifact_name};
use crate::config::Config;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use parcel_sourcemap::SourceMap;
use std::fs;

/// Run the style stage against the configured entry point.
///
/// Parse and minify diagnostics come back as [`StageError::Style`]: the caller
/// logs them and keeps the previous artifact in place. Read, target, and
/// printer failures are fatal.
pub fn compile_styles(config: &Config) -> Result<Artifact, StageError> {
    let entry = &config.styles.entry;
    let source = fs::read_to_string(entry).map_err(|source| StageError::Read {
        path: entry.clone(),
        source,
    })?;

    let filename = config.root_relative(entry).display().to_string();
    let targets = browser_targets(&config.styles.targets)?;

    let mut stylesheet = StyleSheet::parse(
        &source,
        ParserOptions {
            filename: filename.clone(),
            ..ParserOptions::default()
        },
    )
    .map_err(|err| StageError::Style(err.to_string()))?;

    stylesheet
        .minify(MinifyOptions {
            targets,
            ..MinifyOptions::default()
        })
        .map_err(|err| StageError::Style(err.to_string()))?;

    let mut source_map = config.build.source_maps.then(|| {
        let mut map = SourceMap::new("/");
        map.add_source(&filename);
        let _ = map.set_source_content(0, &source);
        map
    });

    let css = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            targets,
            source_map: source_map.as_mut(),
            ..PrinterOptions::default()
        })
        .map_err(|err| StageError::Transform(format!("failed to print stylesheet: {err}")))?;

    let map = source_map.as_mut().and_then(|map| map.to_json(None).ok());

    Ok(Artifact {
        name: artifact_name(entry, "css"),
        code: css.code,
        map,
    })
}

/// Resolve browserslist queries into lightningcss targets.
fn browser_targets(queries: &[String]) -> Result<Targets, StageError> {
    let browsers = Browsers::from_browserslist(queries)
        .map_err(|err| StageError::Transform(format!("invalid browser targets: {err}")))?;

    Ok(Targets {
        browsers,
        ..Targets::default()
    })
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use tempfile::TempDir;

    fn style_config(dir: &TempDir, source: &str) -> Config {
        let config = test_config_at(dir.path());
        let entry = &config.styles.entry;
        fs::create_dir_all(entry.parent().unwrap()).unwrap();
        fs::write(entry, source).unwrap();
        config
    }

    #[test]
    fn test_compile_minifies() {
        let dir = TempDir::new().unwrap();
        let config = style_config(&dir, "body {\n  color: red;\n  background: blue;\n}\n");

        let artifact = compile_styles(&config).unwrap();

        assert_eq!(artifact.name, "main.css");
        assert!(artifact.code.contains("color:red"));
        assert!(artifact.code.contains("background:blue"));
        assert!(!artifact.code.contains('\n'));
    }

    #[test]
    fn test_source_map_follows_config() {
        let dir = TempDir::new().unwrap();
        let mut config = style_config(&dir, "a { color: green }\n");

        let artifact = compile_styles(&config).unwrap();
        let map = artifact.map.expect("source maps enabled by default");
        assert!(map.contains("main.css"));
        assert!(map.contains("sourcesContent"));

        config.build.source_maps = false;
        let artifact = compile_styles(&config).unwrap();
        assert!(artifact.map.is_none());
    }

    #[test]
    fn test_syntax_error_is_recoverable() {
        let dir = TempDir::new().unwrap();
        let config = style_config(&dir, "..broken { color: red }\n");

        let err = compile_styles(&config).unwrap_err();
        assert!(err.is_recoverable(), "got {err:?}");
    }

    #[test]
    fn test_missing_entry_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = test_config_at(dir.path());

        let err = compile_styles(&config).unwrap_err();
        assert!(matches!(err, StageError::Read { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_invalid_targets_are_fatal() {
        let dir = TempDir::new().unwrap();
        let mut config = style_config(&dir, "a { color: green }\n");
        config.styles.targets = vec!["definitely not a browser".into()];

        let err = compile_styles(&config).unwrap_err();
        assert!(!err.is_recoverable());
    }
}
