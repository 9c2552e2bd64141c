//! Live `TrainingApi` over HTTP (reqwest).

use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::future::BoxFuture;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

use super::{ApiError, CourseQuery, TrainingApi};
use crate::models::{Course, CourseList, LoginRequest, LoginResponse};

/// Standard User-Agent header for backend requests.
pub const USER_AGENT: &str = concat!("training/", env!("CARGO_PKG_VERSION"));

const JSON: &str = "application/json";

/// REST client for the training backend.
#[derive(Debug, Clone)]
pub struct HttpTrainingApi {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpTrainingApi {
    /// Creates a client rooted at `base_url`.
    ///
    /// With `timeout` unset the reqwest default applies.
    ///
    /// # Errors
    /// Returns an error if the base URL is malformed or cannot carry a path.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid API base URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL cannot carry a path: {base_url}");
        }

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint<S: AsRef<str>>(&self, segments: &[S]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::new(format!("Invalid API base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments.iter().map(AsRef::as_ref));
        Ok(url)
    }

    async fn fetch_courses(&self, query: CourseQuery) -> Result<Vec<Course>, ApiError> {
        let url = self.endpoint(&query.path_segments())?;
        tracing::debug!(query = query.label(), %url, "fetching courses");

        let response = self
            .http
            .get(url)
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(|e| ApiError::new(format!("Request failed: {e}")))?;

        let list: CourseList = decode(response).await?;
        tracing::debug!(query = query.label(), count = list.courses.len(), "courses received");
        Ok(list.courses)
    }

    async fn post_login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint(&["user", "login"])?;
        tracing::debug!(%url, "posting login");

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::new(format!("Login request failed: {e}")))?;

        decode(response).await
    }
}

impl TrainingApi for HttpTrainingApi {
    fn courses(&self, query: CourseQuery) -> BoxFuture<'_, Result<Vec<Course>, ApiError>> {
        Box::pin(self.fetch_courses(query))
    }

    fn login(&self, request: LoginRequest) -> BoxFuture<'_, Result<LoginResponse, ApiError>> {
        Box::pin(self.post_login(request))
    }
}

/// Checks the status and decodes a JSON body.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::http_status(status.as_u16(), &body));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::new(format!("Failed to read response body: {e}")))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::new(format!("Failed to decode response: {e}")))
}
