//! Server construction: wires stores into services and services into routes.

mod config;

pub use config::{AppConfig, ConfigError};

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
use mockable::DefaultClock;

use crate::domain::reservation::ReservationService;
use crate::domain::rooms::RoomService;
use crate::domain::session::SessionService;
use crate::inbound::http::routes;
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::persistence::InMemoryStore;

/// Wire the store into the domain services and bundle them for handlers.
#[must_use]
pub fn build_state(store: Arc<InMemoryStore>, cookie_secure: bool) -> HttpState {
    let clock = Arc::new(DefaultClock);
    let sessions = SessionService::new(Arc::clone(&store), Arc::clone(&store), clock.clone());
    let reservations = ReservationService::new(Arc::clone(&store), Arc::clone(&store), clock);
    let rooms = RoomService::new(store);
    HttpState {
        sessions: Arc::new(sessions),
        reservations: Arc::new(reservations.clone()),
        reservation_queries: Arc::new(reservations),
        rooms: Arc::new(rooms),
        cookie_secure,
    }
}

/// Build the application with the full route table and middleware stack.
pub fn build_app(
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

/// Run the HTTP server until shutdown.
pub async fn run(config: AppConfig, store: Arc<InMemoryStore>) -> std::io::Result<()> {
    let state = build_state(store, config.cookie_secure);
    tracing::info!(bind_addr = %config.bind_addr, "starting server");
    HttpServer::new(move || build_app(state.clone()))
        .bind(config.bind_addr)?
        .run()
        .await
}
