use axum::http::StatusCode;

/// `GET /healthz` — liveness probe.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz` — readiness probe. Services that hold connections can mount
/// their own handler instead; the default reports ready once the router is up.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
