//! Shared service plumbing for Ravon: health endpoints, request-id
//! middleware, and tracing initialization.

pub mod health;
pub mod middleware;
pub mod tracing;
