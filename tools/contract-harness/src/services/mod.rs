//! Contract runners, one module per service under test.

/// Connection strings for the containers a session started.
pub struct InfraUrls {
    pub database_url: String,
}

pub mod auth;
