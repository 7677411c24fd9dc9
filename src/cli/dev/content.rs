//! Served-content processing.

use crate::embed::dev::{HOTRELOAD_JS, HotreloadVars};
use crate::reload::server::ws_port;

/// Inject the reload client into HTML bodies; everything else passes through.
pub(super) fn inject_reload_client(body: Vec<u8>, content_type: &str) -> Vec<u8> {
    if !content_type.starts_with("text/html") {
        return body;
    }
    inject_script(&body, ws_port())
}

/// Splice the reload client before `</body>`, appending when the tag is
/// missing (browsers handle trailing scripts gracefully).
fn inject_script(content: &[u8], ws_port: u16) -> Vec<u8> {
    let js = HOTRELOAD_JS.render(&HotreloadVars { ws_port });
    let script = format!("<script>{js}</script>");
    let script_bytes = script.as_bytes();

    // Byte pattern for </body> - scanned from the end, most documents close
    // with it
    const PATTERN: &[u8] = b"</body>";

    if let Some(pos) = content
        .windows(PATTERN.len())
        .rposition(|w| w.eq_ignore_ascii_case(PATTERN))
    {
        let mut result = Vec::with_capacity(content.len() + script_bytes.len());
        result.extend_from_slice(&content[..pos]);
        result.extend_from_slice(script_bytes);
        result.extend_from_slice(&content[pos..]);
        return result;
    }

    let mut result = Vec::with_capacity(content.len() + script_bytes.len());
    result.extend_from_slice(content);
    result.extend_from_slice(script_bytes);
    result
}

// =============================================================================
// Tests
// =============================================================================
