//! JSON wire protocol between the dev server and injected reload clients.
//!
//! One-directional: the server sends, the client script parses. Nothing
//! meaningful flows back.

use serde::Serialize;

/// Message sent to reload clients over the WebSocket connection.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReloadMessage {
    /// Ask the browser to reload the page.
    Reload,
    /// Greeting sent once after the handshake.
    Connected { version: String },
}

impl ReloadMessage {
    pub fn connected() -> Self {
        Self::Connected {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Serialize for the wire. Infallible for these variants; falls back to a
    /// plain reload so a serializer bug never silences clients.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"type":"reload"}"#.to_string())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_wire_format() {
        assert_eq!(ReloadMessage::Reload.to_json(), r#"{"type":"reload"}"#);
    }

    #[test]
    fn test_connected_carries_version() {
        let json = ReloadMessage::connected().to_json();
        assert!(json.contains(r#""type":"connected""#));
        assert!(json.contains(env!("CARGO_PKG_VERSION")));
    }
}
