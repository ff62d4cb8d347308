pub mod auth;
pub mod cors;
pub mod internal;
pub mod rate_limit;
