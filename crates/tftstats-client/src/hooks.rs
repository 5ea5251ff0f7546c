//! Request/response observation hooks.

use std::time::Duration;
use tftstats_types::FetchError;

/// Outgoing request, as seen by hooks.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    /// Per-client monotonically increasing request id
    pub id: u64,
    pub method: &'static str,
    pub url: String,
}

/// Completed response, as seen by hooks.
#[derive(Debug, Clone)]
pub struct ResponseInfo {
    pub id: u64,
    pub url: String,
    pub status: u16,
    pub elapsed: Duration,
    pub body_len: usize,
}

/// Observer for every request issued by the client.
///
/// Hooks run inline on the request path and must not block.
pub trait ClientHooks: Send + Sync {
    fn on_request(&self, request: &RequestInfo);

    fn on_response(&self, response: &ResponseInfo);

    fn on_error(&self, request: &RequestInfo, error: &FetchError);
}

/// Default hooks: log through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHooks;

impl ClientHooks for TracingHooks {
    fn on_request(&self, request: &RequestInfo) {
        tracing::debug!(id = request.id, method = request.method, url = %request.url, "request");
    }

    fn on_response(&self, response: &ResponseInfo) {
        tracing::debug!(
            id = response.id,
            url = %response.url,
            status = response.status,
            elapsed_ms = response.elapsed.as_millis() as u64,
            bytes = response.body_len,
            "response"
        );
    }

    fn on_error(&self, request: &RequestInfo, error: &FetchError) {
        tracing::warn!(id = request.id, url = %request.url, "request failed: {}", error);
    }
}
