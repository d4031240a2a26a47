//! Client-side session SDK.
//!
//! Exchanges a one-time login code for an identity against the auth service
//! and keeps the resulting session in a single local slot. The public surface
//! is deliberately blunt: login yields a bool, state is a three-way enum, and
//! everything noisier goes to tracing.

pub mod error;
pub mod manager;
pub mod session;
pub mod verify;
