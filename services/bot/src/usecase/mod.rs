pub mod handle_update;
pub mod membership;
