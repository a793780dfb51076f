//! Inbound admission control: fixed-window, per-identity request counting.
//!
//! One `RateWindow` per client IP. When the window has elapsed the counter
//! resets; while `count < max` a request is admitted and counted; otherwise
//! it is rejected with a fixed 429 body.
//!
//! Cache-hit traffic is never rate limited: when the volatile cache holds a
//! live entry the request bypasses admission entirely, so the quota only
//! guards requests that might reach the upstream. The bypass is tied to the
//! route the layer is mounted on, not to a literal path string.

use crate::cache::TodoCache;
use crate::web::middleware::client_ip::extract_client_ip;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;
use dashmap::DashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use tower::{Layer, Service};
use tracing::{debug, warn};

/// Fixed user-facing rejection message.
pub const REJECTION_MESSAGE: &str = "Too many requests, please try again later.";

/// One client's counter within the current window.
struct RateWindow {
    count: u32,
    started: Instant,
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed { remaining: u32 },
    Rejected,
}

/// Fixed-window request counter keyed by client identity.
#[derive(Clone)]
pub struct AdmissionController {
    inner: Arc<AdmissionInner>,
}

struct AdmissionInner {
    window: Duration,
    max_requests: u32,
    windows: DashMap<IpAddr, RateWindow>,
}

impl AdmissionController {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            inner: Arc::new(AdmissionInner {
                window,
                max_requests,
                windows: DashMap::new(),
            }),
        }
    }

    /// Check and consume quota for one request from `identity`.
    ///
    /// The map entry guard is held across the whole check, so two concurrent
    /// requests from one identity cannot both increment past the limit.
    pub fn admit(&self, identity: IpAddr) -> Admission {
        let now = Instant::now();
        let mut window = self
            .inner
            .windows
            .entry(identity)
            .or_insert_with(|| RateWindow {
                count: 0,
                started: now,
            });

        if now.duration_since(window.started) >= self.inner.window {
            window.count = 0;
            window.started = now;
        }

        if window.count >= self.inner.max_requests {
            Admission::Rejected
        } else {
            window.count += 1;
            Admission::Allowed {
                remaining: self.inner.max_requests - window.count,
            }
        }
    }
}

// -- Tower Layer + Service --

#[derive(Clone)]
pub struct RateLimitLayer {
    admission: AdmissionController,
    cache: TodoCache,
}

impl RateLimitLayer {
    pub fn new(admission: AdmissionController, cache: TodoCache) -> Self {
        Self { admission, cache }
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimitService {
            inner,
            admission: self.admission.clone(),
            cache: self.cache.clone(),
        }
    }
}

#[derive(Clone)]
pub struct RateLimitService<S> {
    inner: S,
    admission: AdmissionController,
    cache: TodoCache,
}

impl<S, ResBody> Service<Request> for RateLimitService<S>
where
    S: Service<Request, Response = Response<ResBody>> + Send + Clone + 'static,
    S::Future: Send + 'static,
    S::Error: std::fmt::Debug + Send,
    ResBody: Send + 'static,
    Body: Into<ResBody>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        // Cache-hit traffic bypasses admission entirely.
        if self.cache.has_live() {
            debug!("live cache entry, admission bypassed");
            return Box::pin(self.inner.call(req));
        }

        match extract_client_ip(&req) {
            Some(ip) => match self.admission.admit(ip) {
                Admission::Allowed { remaining } => {
                    debug!(client_ip = %ip, remaining, "request admitted");
                    Box::pin(self.inner.call(req))
                }
                Admission::Rejected => {
                    warn!(
                        client_ip = %ip,
                        path = %req.uri().path(),
                        "rate limit exceeded"
                    );
                    let resp = rejection_response().map(Into::into);
                    Box::pin(async move { Ok(resp) })
                }
            },
            None => {
                // Cannot determine identity -- allow but log.
                debug!("request admitted without client identity");
                Box::pin(self.inner.call(req))
            }
        }
    }
}

fn rejection_response() -> Response<Body> {
    let body = format!(r#"{{"error":"{REJECTION_MESSAGE}"}}"#);
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = StatusCode::TOO_MANY_REQUESTS;
    response
        .headers_mut()
        .insert("content-type", HeaderValue::from_static("application/json"));
    response
}
