//! Client identity extraction from trusted proxy headers.
//!
//! Priority: rightmost `X-Forwarded-For` (appended by the fronting proxy) ->
//! socket peer address (local dev fallback).

use axum::extract::ConnectInfo;
use axum::extract::Request;
use std::net::{IpAddr, SocketAddr};

pub fn header_str<'a>(headers: &'a http::HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Resolve the client IP for a request, or `None` when neither a forwarding
/// header nor connection info is present (e.g. a service called without
/// `into_make_service_with_connect_info`).
pub fn extract_client_ip(req: &Request) -> Option<IpAddr> {
    // Rightmost X-Forwarded-For -- appended by the edge proxy.
    if let Some(xff) = header_str(req.headers(), "x-forwarded-for")
        && let Some(ip) = xff
            .rsplit(',')
            .next()
            .map(str::trim)
            .and_then(|s| s.parse::<IpAddr>().ok())
    {
        return Some(ip);
    }

    // Socket peer address.
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}
