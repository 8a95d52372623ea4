//! Domain model and use-case services, free of transport concerns.

mod error;
pub mod ports;
pub mod reservation;
pub mod rooms;
pub mod schedule;
pub mod session;
pub mod token;
pub mod user;

pub use error::{Error, ErrorCode};
