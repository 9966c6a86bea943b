//! Audit log and health endpoints.

use tracing::instrument;

use super::{ApiClient, ApiError, Envelope, HealthStatus};
use crate::models::AuditLog;

impl ApiClient {
    /// Recent audit trail entries (`GET /audit-logs`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self))]
    pub async fn list_audit_logs(&self) -> Result<Envelope<Vec<AuditLog>>, ApiError> {
        self.get(&["audit-logs"]).await
    }

    /// Backend liveness (`GET /health`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<Envelope<HealthStatus>, ApiError> {
        self.get(&["health"]).await
    }
}
