//! HTTP response handlers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use super::content::inject_reload_client;
use super::path::resolve_path;
use crate::config::cfg;
use crate::utils::mime;
use crate::utils::mime::types::PLAIN;

/// Handle a single HTTP request.
pub(super) fn handle_request(request: Request) -> Result<()> {
    if crate::core::is_shutdown() {
        return respond_unavailable(request);
    }

    if !matches!(request.method(), Method::Get | Method::Head) {
        return respond_method_not_allowed(request);
    }

    let config = cfg();
    match resolve_path(request.url(), &config.root) {
        Some(path) => respond_file(request, &path),
        None => respond_not_found(request),
    }
}

/// Respond with a static file, injecting the reload client into HTML.
fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    let body = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let body = inject_reload_client(body, content_type);

    send_body(request, 200, content_type, body)
}

fn respond_not_found(request: Request) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, 404, PLAIN);
    }
    send_body(request, 404, PLAIN, b"404 Not Found".to_vec())
}

/// 503 Service Unavailable (server shutting down).
fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

fn respond_method_not_allowed(request: Request) -> Result<()> {
    send_body(request, 405, PLAIN, b"405 Method Not Allowed".to_vec())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}
