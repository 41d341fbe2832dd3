//! Executes the core's plain-data requests over the network.
//!
//! # Design
//! The core never performs I/O; this module is the host side of that
//! contract. `Transport` is blocking so implementations can use ureq
//! directly; async handlers go through [`dispatch`], which moves the call
//! onto tokio's blocking pool.

use std::sync::Arc;

use krill_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};
use tracing::debug;

pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking HTTP via ureq. Non-2xx statuses are returned as data so the
/// core can interpret them.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = request.url.as_str();
        let mut response = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => self.agent.get(url).call(),
            (HttpMethod::Delete, _) => self.agent.delete(url).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(url).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(url).send_empty(),
        }
        .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(HttpResponse::new(status, body))
    }
}

/// Run one request on the blocking pool.
pub async fn dispatch(
    transport: Arc<dyn Transport>,
    request: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    debug!(method = %request.method, url = %request.url, "dispatching");
    tokio::task::spawn_blocking(move || transport.execute(request))
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?
}
