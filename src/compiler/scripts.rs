//! Script transform stage: parse, transpile, and minify the script entry
//! point.
//!
//! oxc drives the whole chain: parse as an ES module, lower syntax to the
//! configured target, then minify (mangle + compress) and print. Codegen
//! emits the source map when one is requested.
//!
//! Unlike the style stage, every failure here is fatal to the enclosing run.

use super::{Artifact, StageError, artifact_name};
use crate::config::Config;
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::semantic::SemanticBuilder;
use oxc::span::SourceType;
use oxc::transformer::{TransformOptions, Transformer};
use std::fs;
use std::path::PathBuf;

/// Run the script stage against the configured entry point.
pub fn compile_scripts(config: &Config) -> Result<Artifact, StageError> {
    let entry = &config.scripts.entry;
    let source = fs::read_to_string(entry).map_err(|source| StageError::Read {
        path: entry.clone(),
        source,
    })?;

    let filename = config.root_relative(entry).display().to_string();

    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, &source, SourceType::mjs()).parse();
    if !ret.errors.is_empty() {
        return Err(StageError::Transform(render_errors(&filename, &ret.errors)));
    }
    let mut program = ret.program;

    // Lower syntax newer than the configured target (e.g. `??` for es2018)
    let options = TransformOptions::from_target(&config.scripts.target).map_err(|err| {
        StageError::Transform(format!(
            "invalid script target `{}`: {err}",
            config.scripts.target
        ))
    })?;
    let scoping = SemanticBuilder::new()
        .build(&program)
        .semantic
        .into_scoping();
    let transformed =
        Transformer::new(&allocator, entry, &options).build_with_scoping(scoping, &mut program);
    if !transformed.errors.is_empty() {
        return Err(StageError::Transform(render_errors(
            &filename,
            &transformed.errors,
        )));
    }

    let minified = Minifier::new(MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    })
    .minify(&allocator, &mut program);

    let ret = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            source_map_path: config
                .build
                .source_maps
                .then(|| PathBuf::from(&filename)),
            ..CodegenOptions::default()
        })
        .with_scoping(minified.scoping)
        .build(&program);

    Ok(Artifact {
        name: artifact_name(entry, "js"),
        code: ret.code,
        map: ret.map.map(|map| map.to_json_string()),
    })
}

/// Join parser/transformer diagnostics into one message, prefixed with the
/// entry point they came from.
fn render_errors<D: std::fmt::Display>(filename: &str, errors: &[D]) -> String {
    let rendered = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n  ");
    format!("{filename}: {rendered}")
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use tempfile::TempDir;

    fn script_config(dir: &TempDir, source: &str) -> Config {
        let config = test_config_at(dir.path());
        let entry = &config.scripts.entry;
        fs::create_dir_all(entry.parent().unwrap()).unwrap();
        fs::write(entry, source).unwrap();
        config
    }

    #[test]
    fn test_compile_minifies() {
        let dir = TempDir::new().unwrap();
        let config = script_config(
            &dir,
            "const banner = \"ready\";\nconsole.log(banner, Math.random());\n",
        );

        let artifact = compile_scripts(&config).unwrap();

        assert_eq!(artifact.name, "main.js");
        assert!(artifact.code.contains("console.log"));
        assert!(!artifact.code.contains("banner = "));
    }

    #[test]
    fn test_transpiles_to_target() {
        let dir = TempDir::new().unwrap();
        // `??` is ES2020; the default target (es2018) must lower it
        let config = script_config(&dir, "console.log(globalThis.flag ?? \"off\");\n");

        let artifact = compile_scripts(&config).unwrap();
        assert!(!artifact.code.contains("??"), "got {}", artifact.code);
    }

    #[test]
    fn test_parse_error_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = script_config(&dir, "let let = 1;\n");

        let err = compile_scripts(&config).unwrap_err();
        assert!(matches!(err, StageError::Transform(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_missing_entry_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = test_config_at(dir.path());

        let err = compile_scripts(&config).unwrap_err();
        assert!(matches!(err, StageError::Read { .. }));
    }

    #[test]
    fn test_invalid_target_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut config = script_config(&dir, "console.log(1);\n");
        config.scripts.target = "es9999".into();

        let err = compile_scripts(&config).unwrap_err();
        assert!(matches!(err, StageError::Transform(_)));
    }

    #[test]
    fn test_source_map_follows_config() {
        let dir = TempDir::new().unwrap();
        let mut config = script_config(&dir, "console.log(\"mapped\");\n");

        let artifact = compile_scripts(&config).unwrap();
        assert!(artifact.map.expect("maps on by default").contains("main.js"));

        config.build.source_maps = false;
        let artifact = compile_scripts(&config).unwrap();
        assert!(artifact.map.is_none());
    }
}
