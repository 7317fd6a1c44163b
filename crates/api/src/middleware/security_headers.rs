//! Security headers middleware.

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Environment switch for `Strict-Transport-Security`. Only enable it behind
/// TLS termination.
pub const HSTS_ENV_VAR: &str = "WS__SECURITY__HSTS_ENABLED";

/// Adds `X-Content-Type-Options`, `X-Frame-Options` and, when enabled,
/// `Strict-Transport-Security` to every response.
///
/// Config responses are additionally marked `Cache-Control: no-store`: editors
/// reload after every save and must never see a cached record.
pub async fn security_headers_middleware(req: Request<Body>, next: Next) -> Response {
    let is_config_read = req.uri().path().starts_with("/api/config");
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    if is_config_read && !headers.contains_key(header::CACHE_CONTROL) {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }

    if hsts_enabled(std::env::var(HSTS_ENV_VAR).ok().as_deref()) {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    response
}

fn hsts_enabled(value: Option<&str>) -> bool {
    value.map(|v| v.eq_ignore_ascii_case("true")).unwrap_or(false)
}
