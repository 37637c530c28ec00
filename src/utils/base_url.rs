//! Base URL resolution for building short links.

use axum::http::{HeaderMap, Uri, header};

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Returns the base URL short links are rendered under.
///
/// When `configured` is set (the `BASE_URL` option) it wins and is returned
/// without a trailing slash. Otherwise the base is derived from the request:
/// `<scheme>://<host>`, where the host is the `Host` header or, when that is
/// missing or unreadable, the authority of the request URI (HTTP/2 sends
/// `:authority` instead of `Host`). The scheme comes from `X-Forwarded-Proto`,
/// then the URI, and defaults to `http`. The port is kept, so `localhost:3000`
/// yields `http://localhost:3000`.
///
/// With neither a `Host` header nor an absolute URI the base is empty, so
/// short links render host-relative (`/<id>`).
pub fn resolve_base_url(configured: Option<&str>, headers: &HeaderMap, uri: &Uri) -> String {
    if let Some(base) = configured {
        return base.trim_end_matches('/').to_string();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|host| !host.is_empty())
        .or_else(|| uri.authority().map(|authority| authority.as_str()));

    let Some(host) = host else {
        return String::new();
    };

    let forwarded = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim);

    let https = match forwarded {
        Some(proto) => proto.eq_ignore_ascii_case("https"),
        None => uri.scheme_str() == Some("https"),
    };

    format!("{}://{}", if https { "https" } else { "http" }, host)
}
