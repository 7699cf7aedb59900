//! Wire types for the validation endpoint.

pub mod models;
