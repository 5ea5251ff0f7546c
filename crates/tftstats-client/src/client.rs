use crate::error::ClientError;
use crate::hooks::{ClientHooks, RequestInfo, ResponseInfo, TracingHooks};
use crate::types::ClientConfig;
use crate::wire::unwrap_dehydrated;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tftstats_types::{FetchError, RawBundle};
use url::Url;

/// HTTP GET wrapper for the stats site.
///
/// Cheap to clone; clones share the connection pool, hooks, and request
/// counter.
#[derive(Clone)]
pub struct RemoteDataClient {
    client: Client,
    config: Arc<ClientConfig>,
    /// `config.base_url` with a trailing slash, so relative joins keep its path
    base: Arc<Url>,
    hooks: Arc<dyn ClientHooks>,
    next_id: Arc<AtomicU64>,
}

impl RemoteDataClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let base = parse_base_url(&config.base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .tcp_nodelay(true)
            .build()?;
        Ok(Self {
            client,
            config: Arc::new(config),
            base: Arc::new(base),
            hooks: Arc::new(TracingHooks),
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Replace the request/response hooks.
    pub fn with_hooks(mut self, hooks: Arc<dyn ClientHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Download the comps document and unwrap the bundle from it.
    pub async fn fetch_bundle(&self) -> Result<RawBundle, FetchError> {
        let document: serde_json::Value = self.get_json(&self.config.bundle_path).await?;
        unwrap_dehydrated(&document)
    }

    /// GET `path` (relative to the base URL) and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let request = RequestInfo {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method: "GET",
            url: self.url_for(path)?.into(),
        };
        self.hooks.on_request(&request);

        let result = self.get_once(&request).await;
        if let Err(e) = &result {
            self.hooks.on_error(&request, e);
        }
        result
    }

    async fn get_once<T: DeserializeOwned>(&self, request: &RequestInfo) -> Result<T, FetchError> {
        let started = Instant::now();
        let resp = self
            .client
            .get(&request.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| self.classify(e))?;

        self.hooks.on_response(&ResponseInfo {
            id: request.id,
            url: request.url.clone(),
            status: status.as_u16(),
            elapsed: started.elapsed(),
            body_len: body.len(),
        });

        if !status.is_success() {
            let message = String::from_utf8_lossy(&body).chars().take(200).collect::<String>();
            return Err(FetchError::Server { status: status.as_u16(), message });
        }

        serde_json::from_slice(&body)
            .map_err(|e| FetchError::MalformedResponse { message: format!("invalid JSON: {}", e) })
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout { timeout_ms: self.config.timeout_ms }
        } else if e.is_decode() {
            FetchError::MalformedResponse { message: e.to_string() }
        } else {
            FetchError::Network { message: e.to_string() }
        }
    }

    /// Resolve `path` below the base URL. A leading `/` does not escape the
    /// base path.
    fn url_for(&self, path: &str) -> Result<Url, FetchError> {
        self.base.join(path.trim_start_matches('/')).map_err(|e| FetchError::Internal {
            message: format!("cannot build request URL for '{}': {}", path, e),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let mut url = Url::parse(raw).map_err(|_| ClientError::InvalidBaseUrl(raw.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ClientError::InvalidBaseUrl(raw.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

impl std::fmt::Debug for RemoteDataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteDataClient").field("config", &self.config).finish_non_exhaustive()
    }
}
