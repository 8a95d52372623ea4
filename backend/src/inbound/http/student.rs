//! Student API handlers.
//!
//! ```text
//! GET  /api/student/slots
//! POST /api/student/book {"slot_id":"..."}
//! GET  /api/student/bookings
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::{BookingWithContext, OpenSlot};
use crate::domain::schedule::SlotId;
use crate::domain::Error;
use crate::inbound::http::session::SessionCookie;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// One open slot as presented to students.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SlotView {
    pub slot_id: String,
    pub room_no: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`.
    pub time_start: String,
    /// `HH:MM`.
    pub time_end: String,
}

impl From<OpenSlot> for SlotView {
    fn from(slot: OpenSlot) -> Self {
        Self {
            slot_id: slot.slot_id.to_string(),
            room_no: slot.room_no,
            date: slot.start.format("%Y-%m-%d").to_string(),
            time_start: slot.start.format("%H:%M").to_string(),
            time_end: slot.end.format("%H:%M").to_string(),
        }
    }
}

/// One booking row as presented to its holder.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct BookingView {
    pub booking_id: String,
    pub room_no: String,
    pub date: String,
    pub time_start: String,
    pub time_end: String,
    pub token_code: String,
    pub booking_time: String,
}

impl From<BookingWithContext> for BookingView {
    fn from(row: BookingWithContext) -> Self {
        Self {
            booking_id: row.booking_id.to_string(),
            room_no: row.room_no,
            date: row.slot_start.format("%Y-%m-%d").to_string(),
            time_start: row.slot_start.format("%H:%M").to_string(),
            time_end: row.slot_end.format("%H:%M").to_string(),
            token_code: row.token_code,
            booking_time: row.booked_at.to_rfc3339(),
        }
    }
}

/// List every open slot across all rooms.
#[utoipa::path(
    get,
    path = "/api/student/slots",
    responses(
        (status = 200, description = "Open slots", body = [SlotView]),
        (status = 401, description = "Not a student session", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["student"],
    operation_id = "listOpenSlots"
)]
#[get("/slots")]
pub async fn list_slots(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
) -> ApiResult<HttpResponse> {
    let identity = state.sessions.validate(cookie.token()?).await?;
    let slots = state
        .reservation_queries
        .list_open_slots(&identity)
        .await?;
    let views: Vec<SlotView> = slots.into_iter().map(SlotView::from).collect();
    Ok(HttpResponse::Ok().json(json!({ "slots": views })))
}

/// Booking request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct BookBody {
    pub slot_id: String,
}

/// Claim a slot for the calling student.
#[utoipa::path(
    post,
    path = "/api/student/book",
    request_body = BookBody,
    responses(
        (status = 200, description = "Slot booked"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not a student session", body = Error),
        (status = 404, description = "Slot does not exist", body = Error),
        (status = 409, description = "Slot no longer available", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["student"],
    operation_id = "bookSlot"
)]
#[post("/book")]
pub async fn book(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
    payload: web::Json<BookBody>,
) -> ApiResult<HttpResponse> {
    let identity = state.sessions.validate(cookie.token()?).await?;
    let slot_id: SlotId = payload
        .slot_id
        .parse()
        .map_err(|_| {
            Error::invalid_request("Slot ID is required")
                .with_details(json!({ "field": "slot_id" }))
        })?;

    let booking = state.reservations.book(&identity, slot_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "booking_id": booking.id.to_string(),
        "token_code": booking.token_code,
    })))
}

/// List the calling student's own bookings.
#[utoipa::path(
    get,
    path = "/api/student/bookings",
    responses(
        (status = 200, description = "Bookings", body = [BookingView]),
        (status = 401, description = "Not a student session", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["student"],
    operation_id = "listMyBookings"
)]
#[get("/bookings")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
) -> ApiResult<HttpResponse> {
    let identity = state.sessions.validate(cookie.token()?).await?;
    let rows = state
        .reservation_queries
        .list_my_bookings(&identity)
        .await?;
    let views: Vec<BookingView> = rows.into_iter().map(BookingView::from).collect();
    Ok(HttpResponse::Ok().json(json!({ "bookings": views })))
}
