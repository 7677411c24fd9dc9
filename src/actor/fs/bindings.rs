//! Watch bindings: which pipeline a changed path triggers.
//!
//! Two fixed bindings, resolved once per debounced batch:
//! - markup: `*.html` directly in the project root → reload only
//! - sources: style/script files under the source tree → rebuild + reload
//!
//! Paths under the output directory never match a binding; artifacts written
//! by a rebuild must not trigger the next one.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::types::ChangeKind;
use crate::config::Config;

/// The pipeline a changed path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Binding {
    /// Top-level markup: reload connected browsers, nothing to rebuild.
    Markup,
    /// Style/script sources: rebuild styles and scripts, then reload.
    Sources,
}

/// Classify a single path against the fixed bindings.
pub(super) fn classify_path(path: &Path, config: &Config) -> Option<Binding> {
    if path.starts_with(&config.build.output) {
        return None;
    }

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    // Only html sitting directly in the project root counts as markup;
    // nested html belongs to no binding
    if ext == "html" && path.parent() == Some(config.root.as_path()) {
        return Some(Binding::Markup);
    }

    if matches!(ext, "css" | "js" | "mjs") && path.starts_with(&config.build.source) {
        return Some(Binding::Sources);
    }

    None
}

/// One debounced batch, grouped by binding.
pub(super) struct TriggeredBindings {
    pub(super) markup: Vec<PathBuf>,
    pub(super) sources: Vec<PathBuf>,
}

impl TriggeredBindings {
    /// Group a raw batch by binding; `None` when nothing matched.
    pub(super) fn classify(raw: FxHashMap<PathBuf, ChangeKind>, config: &Config) -> Option<Self> {
        let mut markup = Vec::new();
        let mut sources = Vec::new();

        for path in raw.into_keys() {
            match classify_path(&path, config) {
                Some(Binding::Markup) => markup.push(path),
                Some(Binding::Sources) => sources.push(path),
                None => {}
            }
        }

        if markup.is_empty() && sources.is_empty() {
            return None;
        }

        // Stable order for status lines (FxHashMap iteration is arbitrary)
        markup.sort();
        sources.sort();
        Some(Self { markup, sources })
    }
}
