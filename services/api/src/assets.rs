//! Static asset serving: the only HTTP surface the wizard front end needs.
//! Content types come from a fixed extension table, every response carries
//! permissive CORS and no-cache headers, and failures map to plain-text
//! 404/500 bodies.

use std::io::ErrorKind;
use std::path::Path;

use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use tracing::warn;

use crate::infra::AppState;

const DEFAULT_DOCUMENT: &str = "index.html";

/// The fixed extension table; anything else is served as a generic binary.
pub(crate) fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_ascii_lowercase());
    match extension.as_deref() {
        Some("html") => "text/html",
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Relative asset path for a request, or `None` when the path tries to
/// escape the asset root.
pub(crate) fn resolve_request_path(path: &str) -> Option<String> {
    let trimmed = path.trim_start_matches('/');
    let relative = if trimmed.is_empty() {
        DEFAULT_DOCUMENT
    } else {
        trimmed
    };
    let escapes = relative
        .split('/')
        .any(|segment| segment == ".." || segment.contains('\\'));
    if escapes {
        return None;
    }
    Some(relative.to_owned())
}

pub(crate) async fn serve_asset(
    Extension(state): Extension<AppState>,
    method: Method,
    uri: Uri,
) -> Response {
    if method == Method::OPTIONS {
        return with_common_headers(StatusCode::OK.into_response());
    }

    let Some(relative) = resolve_request_path(uri.path()) else {
        warn!(path = uri.path(), "asset path escapes the root");
        return plain(StatusCode::NOT_FOUND, "File not found");
    };

    let full_path = state.asset_root.join(&relative);
    match tokio::fs::read(&full_path).await {
        Ok(bytes) => {
            let content_type = content_type_for(&full_path);
            let mut response = bytes.into_response();
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(content_type),
            );
            with_common_headers(response)
        }
        Err(error) if error.kind() == ErrorKind::NotFound => {
            warn!(path = %full_path.display(), "asset not found");
            plain(StatusCode::NOT_FOUND, "File not found")
        }
        Err(error) => {
            warn!(path = %full_path.display(), %error, "asset read failed");
            plain(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        }
    }
}

fn plain(status: StatusCode, body: &'static str) -> Response {
    let mut response = (status, body).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain"),
    );
    with_common_headers(response)
}

fn with_common_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    response
}
