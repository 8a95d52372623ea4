//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they only depend on
//! the driving ports and stay testable with mocked use-cases.

use std::sync::Arc;

use crate::domain::ports::{ReservationCommand, ReservationQuery, RoomAdmin, SessionManager};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub sessions: Arc<dyn SessionManager>,
    pub reservations: Arc<dyn ReservationCommand>,
    pub reservation_queries: Arc<dyn ReservationQuery>,
    pub rooms: Arc<dyn RoomAdmin>,
    /// Whether issued cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}
