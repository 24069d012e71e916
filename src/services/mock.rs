// src/services/mock.rs
// DOCUMENTATION: Recording transport for tests
// PURPOSE: Serve canned Google responses and capture the requests the client sends

use std::collections::VecDeque;
use std::sync::Mutex;

use futures::future::{BoxFuture, FutureExt};

use crate::errors::PlacesError;
use crate::models::QueryParams;
use crate::services::Transport;

/// Transport that replays canned bodies and records every request.
/// The last body is repeated once the queue is down to one.
#[derive(Default)]
pub(crate) struct MockTransport {
    bodies: Mutex<VecDeque<String>>,
    pub(crate) requests: Mutex<Vec<(String, QueryParams)>>,
}

impl MockTransport {
    pub fn new(body: impl Into<String>) -> Self {
        let transport = MockTransport::default();
        transport.push(body);
        transport
    }

    pub fn push(&self, body: impl Into<String>) {
        self.bodies.lock().unwrap().push_back(body.into());
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_query(&self) -> QueryParams {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|(_, query)| query.clone())
            .unwrap_or_default()
    }

    pub fn last_url(&self) -> String {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|(url, _)| url.clone())
            .unwrap_or_default()
    }
}

impl Transport for MockTransport {
    fn get<'a>(
        &'a self,
        url: &'a str,
        query: &'a QueryParams,
    ) -> BoxFuture<'a, Result<String, PlacesError>> {
        mock_get(self, url, query).boxed()
    }
}

async fn mock_get(
    transport: &MockTransport,
    url: &str,
    query: &QueryParams,
) -> Result<String, PlacesError> {
    transport
        .requests
        .lock()
        .unwrap()
        .push((url.to_string(), query.clone()));

    let mut bodies = transport.bodies.lock().unwrap();
    let body = if bodies.len() > 1 {
        bodies.pop_front()
    } else {
        bodies.front().cloned()
    };

    body.ok_or_else(|| PlacesError::TransportError("no canned response".to_string()))
}
