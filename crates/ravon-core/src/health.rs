use axum::http::StatusCode;

/// `GET /healthz`: the process is up.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz` — readiness check. Services with external
/// dependencies (database, upstream APIs) define their own instead.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
