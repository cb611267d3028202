use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use standard_error::{Interpolate, StandardError};

use crate::pkg::internal::adaptors::jobs::error::{FetchError, FetchResult};
use crate::pkg::internal::adaptors::jobs::spec::{Envelope, Job};
use crate::prelude::Result;

/// Read-only access to the remote opportunities service.
#[derive(Debug, Clone)]
pub struct JobSelector {
    client: Client,
    base_url: Url,
}

impl JobSelector {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StandardError::new("ERR-CONF-001").interpolate_err(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(StandardError::new("ERR-CONF-001")
                .interpolate_err(format!("{base_url} cannot be used as a base url")));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StandardError::new("ERR-HTTP-001").interpolate_err(e.to_string()))?;
        Ok(JobSelector { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get_all(&self) -> FetchResult<Vec<Job>> {
        let envelope: Envelope<Vec<Job>> =
            self.fetch(self.endpoint(&["opportunities", "search"])).await?;
        let jobs = envelope.data.unwrap_or_default();
        tracing::debug!("fetched {} jobs", jobs.len());
        Ok(jobs)
    }

    pub async fn get_by_id(&self, id: &str) -> FetchResult<Option<Job>> {
        let envelope: Envelope<Job> = self.fetch(self.endpoint(&["opportunities", id])).await?;
        if envelope.data.is_none() {
            tracing::debug!("job {} not found", id);
        }
        Ok(envelope.data)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> FetchResult<Envelope<T>> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        tracing::debug!("{} answered {} with {} bytes", url, status, body.len());
        if !status.is_success() {
            tracing::warn!("{} failed with status {}", url, status);
            return Err(FetchError::http(status.as_u16(), &body));
        }
        if body.trim().is_empty() {
            return Ok(Envelope::empty());
        }
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
