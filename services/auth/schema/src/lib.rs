//! SeaORM entities owned by the auth service.

pub mod auth_codes;
