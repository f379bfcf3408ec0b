//! HTTP access to the Trend Engine API.
//!
//! # Architecture
//!
//! - [`JsonSource`]: the seam every resource accessor is written against
//! - [`ApiClient`]: the `reqwest`-backed implementation, holding the base URL,
//!   default JSON headers and the cookie jar
//! - [`RequestOptions`]: per-call overrides merged over the defaults
//!
//! # Failure model
//!
//! A request fails with [`ApiError`] when the transport fails, when the
//! status is outside `200..=299` (the body is not read in that case), or when
//! the body does not decode. There is no retry; callers see the first failure.

use crate::config::Config;
use crate::error::ApiError;
use crate::utils::truncate_for_log;
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use url::Url;

/// Something that can answer a GET for `path` with a JSON document.
pub trait JsonSource {
    /// Fetch `path` (relative to the source's base URL) and decode the body as `T`.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError>;
}

/// Per-request overrides. Headers given here replace defaults of the same name.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    pub timeout: Option<Duration>,
}

/// Client for the Trend Engine HTTP API.
///
/// Every request carries `Content-Type: application/json` and includes
/// credentials: cookies set by the server are kept in the client's jar, and a
/// configured session cookie is sent up front.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiClient {
    /// Build a client from the viewer configuration.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(cookie) = &config.session_cookie {
            let mut value = HeaderValue::from_str(cookie)?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve `path` against the base URL by plain concatenation.
    pub fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?)
    }

    /// GET `path` with the default options.
    pub async fn api_fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.api_fetch_with(path, &RequestOptions::default()).await
    }

    /// GET `path`, merging `options` over the client defaults.
    ///
    /// # Arguments
    ///
    /// * `path` - Path and query string appended to the base URL
    /// * `options` - Extra headers and an optional per-request timeout
    ///
    /// # Returns
    ///
    /// The decoded body, or an [`ApiError`]: `Transport` when no response
    /// arrived, `Status` for any status outside `200..=299` (body unread),
    /// `Decode` when the body does not match `T`.
    #[instrument(level = "debug", skip(self, options), fields(base_url = %self.base_url))]
    pub async fn api_fetch_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        let url = self.url_for(path)?;
        let t0 = Instant::now();

        let mut request = self.http.get(url).headers(options.headers.clone());
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(path, elapsed_ms = t0.elapsed().as_millis(), error = %e, "Request failed");
                return Err(ApiError::Transport(e));
            }
        };

        let status = response.status();
        debug!(
            path,
            status = status.as_u16(),
            elapsed_ms = t0.elapsed().as_millis(),
            "API response"
        );

        if !status.is_success() {
            warn!(path, status = status.as_u16(), "API returned non-success status");
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!(
                path,
                bytes = body.len(),
                error = %e,
                body_preview = %truncate_for_log(&String::from_utf8_lossy(&body), 200),
                "Response body did not decode"
            );
            ApiError::Decode(e)
        })
    }
}

impl JsonSource for ApiClient {
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.api_fetch(path).await
    }
}
