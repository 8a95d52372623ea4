//! Room slot booking service.
//!
//! Teachers publish rooms with an availability window; the service carves
//! each window into fixed 30-minute slots. Students claim slots with
//! at-most-one-winner semantics and receive a human-readable confirmation
//! token. A hexagonal layout keeps the domain free of transport and storage
//! concerns: `domain` holds the model, services, and ports; `inbound::http`
//! and `outbound::persistence` are the adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::Trace;
