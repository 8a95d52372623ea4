//! HTTP inbound adapter.

pub mod auth;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;
pub mod student;
pub mod teacher;
#[cfg(test)]
pub(crate) mod test_utils;

pub use error::ApiResult;
