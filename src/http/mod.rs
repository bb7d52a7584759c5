//! HTTP surface of the bot host

pub mod routes;

pub use routes::{build_router, AppError};
