//! Embedded static resources.
//!
//! - `template` - template types for typed variable injection
//! - `dev` - dev server assets (reload client, minified by build.rs)
//!
//! # Usage
//!
//! ```ignore
//! use embed::dev::{HOTRELOAD_JS, HotreloadVars};
//!
//! let js = HOTRELOAD_JS.render(&HotreloadVars { ws_port: 35729 });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod dev {
    use super::{Template, TemplateVars};

    /// Variables for hotreload.js.
    pub struct HotreloadVars {
        pub ws_port: u16,
    }

    impl TemplateVars for HotreloadVars {
        fn apply(&self, content: &str) -> String {
            content.replace("__KILN_WS_PORT__", &self.ws_port.to_string())
        }
    }

    /// Reload client with WebSocket port injection.
    pub const HOTRELOAD_JS: Template<HotreloadVars> =
        Template::new(include_str!(concat!(env!("OUT_DIR"), "/hotreload.min.js")));
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::dev::{HOTRELOAD_JS, HotreloadVars};

    #[test]
    fn test_port_placeholder_survives_minification() {
        let js = HOTRELOAD_JS.render(&HotreloadVars { ws_port: 35730 });
        assert!(js.contains("35730"));
        assert!(!js.contains("__KILN_WS_PORT__"));
    }
}
