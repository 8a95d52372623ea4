//! Helpers for HTTP handler tests.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};

use crate::domain::ports::{
    MockReservationCommand, MockReservationQuery, MockRoomAdmin, MockSessionManager,
};
use crate::inbound::http::routes;
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;

/// Mock port bundle; override the ports a test cares about and leave the
/// rest untouched.
#[derive(Default)]
pub struct TestPorts {
    pub sessions: MockSessionManager,
    pub reservations: MockReservationCommand,
    pub reservation_queries: MockReservationQuery,
    pub rooms: MockRoomAdmin,
}

impl TestPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            sessions: Arc::new(self.sessions),
            reservations: Arc::new(self.reservations),
            reservation_queries: Arc::new(self.reservation_queries),
            rooms: Arc::new(self.rooms),
            cookie_secure: false,
        }
    }
}

/// State whose only live port is the session manager.
pub fn state_with_sessions(sessions: MockSessionManager) -> HttpState {
    TestPorts {
        sessions,
        ..TestPorts::default()
    }
    .into_state()
}

/// An app with the full route table over the given state.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Trace)
        .app_data(web::Data::new(state))
        .configure(routes::configure)
}
