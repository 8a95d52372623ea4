//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every HTTP endpoint and the shared error envelope
//! into one OpenAPI specification, consumed by external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::auth::{CheckResponse, LoginBody, LoginResponse, RegisterBody};
use crate::inbound::http::student::{BookBody, BookingView, SlotView};
use crate::inbound::http::teacher::{CreateRoomBody, RoomView, TeacherBookingView};

/// Registers the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "sessionId",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the booking API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Slotbook API",
        description = "Room slot booking: authentication, student reservations, and teacher room administration."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::check,
        crate::inbound::http::student::list_slots,
        crate::inbound::http::student::book,
        crate::inbound::http::student::list_bookings,
        crate::inbound::http::teacher::create_room,
        crate::inbound::http::teacher::list_bookings,
        crate::inbound::http::teacher::list_rooms,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginBody,
        LoginResponse,
        RegisterBody,
        CheckResponse,
        SlotView,
        BookingView,
        BookBody,
        CreateRoomBody,
        TeacherBookingView,
        RoomView,
    )),
    tags(
        (name = "auth", description = "Login, registration, and session lifecycle"),
        (name = "student", description = "Slot discovery and booking"),
        (name = "teacher", description = "Room administration and oversight")
    )
)]
pub struct ApiDoc;
