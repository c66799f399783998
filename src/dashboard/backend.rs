//! Transports that carry a dashboard run to the scheduling service.
//!
//! A backend only moves bytes: it returns the HTTP status and body as
//! received. Interpreting them (status handling, schema checks) is the
//! controller's job so every transport fails the same way.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::DashboardError;
use crate::model::ErrorBody;
use crate::web::schedule_payload;

/// Path of the scheduling endpoint
pub const SCHEDULE_PATH: &str = "/api/schedule";

/// Body sent to the scheduling endpoint. Elements are passed through as
/// the user typed them; the service validates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DraftRequest {
    pub orders: Vec<Value>,
    pub vehicles: Vec<Value>,
}

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct RawReply {
    pub status: u16,
    pub body: String,
}

impl RawReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait ScheduleBackend: Send + Sync {
    async fn submit(&self, request: &DraftRequest) -> Result<RawReply, DashboardError>;
}

/// Talks to a running service over HTTP
pub struct HttpBackend {
    base_url: String,
    http: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::new();
        Self { base_url, http }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, SCHEDULE_PATH)
    }
}

#[async_trait]
impl ScheduleBackend for HttpBackend {
    async fn submit(&self, request: &DraftRequest) -> Result<RawReply, DashboardError> {
        let url = self.endpoint();
        tracing::debug!(%url, orders = request.orders.len(), vehicles = request.vehicles.len(), "submitting schedule");

        let resp = self.http.post(&url).json(request).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(RawReply { status, body })
    }
}

/// Runs the scheduler in-process, producing the same replies the service would
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalBackend;

#[async_trait]
impl ScheduleBackend for LocalBackend {
    async fn submit(&self, request: &DraftRequest) -> Result<RawReply, DashboardError> {
        let raw = serde_json::to_vec(request).map_err(|e| DashboardError::Network(e.to_string()))?;
        let (status, body) = match schedule_payload(&raw) {
            Ok(response) => (200, serde_json::to_string(&response)),
            Err(e) => (400, serde_json::to_string(&ErrorBody { error: e.to_string() })),
        };
        let body = body.map_err(|e| DashboardError::Network(e.to_string()))?;
        Ok(RawReply { status, body })
    }
}
