// src/services/transport.rs
// DOCUMENTATION: HTTP transport used by the Places client
// PURPOSE: Isolate network I/O behind a trait so it can be substituted

use crate::errors::PlacesError;
use crate::models::QueryParams;
use futures::future::{BoxFuture, FutureExt};
use reqwest::Client;
use std::time::Duration;

/// GET-with-query capability the client depends on
pub trait Transport: Send + Sync {
    /// Issue a GET to `url` with `query` appended and return the response body.
    fn get<'a>(
        &'a self,
        url: &'a str,
        query: &'a QueryParams,
    ) -> BoxFuture<'a, Result<String, PlacesError>>;
}

/// Transport backed by a reqwest client
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, PlacesError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        url: &'a str,
        query: &'a QueryParams,
    ) -> BoxFuture<'a, Result<String, PlacesError>> {
        reqwest_get(&self.client, url, query).boxed()
    }
}

async fn reqwest_get(client: &Client, url: &str, query: &QueryParams) -> Result<String, PlacesError> {
    let response = client.get(url).query(query).send().await.map_err(|e| {
        log::error!("Google Places API request failed: {}", e);
        PlacesError::TransportError(format!("Request failed: {}", e))
    })?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::error!("Google Places API error {}: {}", status, body);
        return Err(PlacesError::TransportError(format!(
            "HTTP {}: {}",
            status, body
        )));
    }

    response.text().await.map_err(|e| {
        log::error!("Failed to read Google Places response: {}", e);
        PlacesError::TransportError(format!("Read failed: {}", e))
    })
}
