//! Teacher API handlers.
//!
//! ```text
//! POST /api/teacher/create-room {"room_no":"56","date":"2025-01-31","time_from":"09:00","time_to":"17:00"}
//! GET  /api/teacher/bookings
//! GET  /api/teacher/rooms
//! ```

use actix_web::{get, post, web, HttpResponse};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::{BookingWithContext, CreateRoomRequest, RoomOccupancy};
use crate::domain::Error;
use crate::inbound::http::session::SessionCookie;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Room creation request body. Times are wall-clock `HH:MM` on `date`,
/// interpreted as UTC.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateRoomBody {
    pub room_no: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`.
    pub time_from: String,
    /// `HH:MM`.
    pub time_to: String,
}

fn parse_window(body: &CreateRoomBody) -> Result<CreateRoomRequest, Error> {
    let date = NaiveDate::parse_from_str(&body.date, "%Y-%m-%d").map_err(|_| {
        Error::invalid_request("Invalid time format").with_details(json!({ "field": "date" }))
    })?;
    let from = NaiveTime::parse_from_str(&body.time_from, "%H:%M").map_err(|_| {
        Error::invalid_request("Invalid time format").with_details(json!({ "field": "time_from" }))
    })?;
    let to = NaiveTime::parse_from_str(&body.time_to, "%H:%M").map_err(|_| {
        Error::invalid_request("Invalid time format").with_details(json!({ "field": "time_to" }))
    })?;
    Ok(CreateRoomRequest {
        room_no: body.room_no.clone(),
        window_start: date.and_time(from).and_utc(),
        window_end: date.and_time(to).and_utc(),
    })
}

/// Create a room and generate its 30-minute slot grid.
#[utoipa::path(
    post,
    path = "/api/teacher/create-room",
    request_body = CreateRoomBody,
    responses(
        (status = 201, description = "Room created with its slot grid"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not a teacher session", body = Error),
        (status = 409, description = "Identical grid already exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["teacher"],
    operation_id = "createRoom"
)]
#[post("/create-room")]
pub async fn create_room(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
    payload: web::Json<CreateRoomBody>,
) -> ApiResult<HttpResponse> {
    let identity = state.sessions.validate(cookie.token()?).await?;
    let body = payload.into_inner();
    if body.room_no.trim().is_empty() {
        return Err(Error::invalid_request("Missing required fields")
            .with_details(json!({ "field": "room_no" })));
    }
    let request = parse_window(&body)?;

    let created = state.rooms.create_room(&identity, request).await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "room_id": created.room_id.to_string(),
        "slots_created": created.slots_created,
        "message": format!("Room created successfully with {} slots", created.slots_created),
    })))
}

/// One booking row as presented to teachers.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TeacherBookingView {
    pub booking_id: String,
    pub student_id: String,
    pub room_no: String,
    pub date: String,
    pub time_start: String,
    pub time_end: String,
    pub token_code: String,
    pub booking_time: String,
    pub status: String,
}

impl From<BookingWithContext> for TeacherBookingView {
    fn from(row: BookingWithContext) -> Self {
        Self {
            booking_id: row.booking_id.to_string(),
            student_id: row.student_id.to_string(),
            room_no: row.room_no,
            date: row.slot_start.format("%Y-%m-%d").to_string(),
            time_start: row.slot_start.format("%H:%M").to_string(),
            time_end: row.slot_end.format("%H:%M").to_string(),
            token_code: row.token_code,
            booking_time: row.booked_at.to_rfc3339(),
            status: "Booked".to_owned(),
        }
    }
}

/// List every booking across all students and rooms.
#[utoipa::path(
    get,
    path = "/api/teacher/bookings",
    responses(
        (status = 200, description = "All bookings", body = [TeacherBookingView]),
        (status = 401, description = "Not a teacher session", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["teacher"],
    operation_id = "listAllBookings"
)]
#[get("/bookings")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
) -> ApiResult<HttpResponse> {
    let identity = state.sessions.validate(cookie.token()?).await?;
    let rows = state
        .reservation_queries
        .list_all_bookings(&identity)
        .await?;
    let views: Vec<TeacherBookingView> = rows.into_iter().map(TeacherBookingView::from).collect();
    Ok(HttpResponse::Ok().json(json!({ "bookings": views })))
}

/// One room with its occupancy counters.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RoomView {
    pub room_id: String,
    pub room_no: String,
    pub date_available: String,
    pub time_from: String,
    pub time_to: String,
    pub total_slots: usize,
    pub available_slots: usize,
    pub booked_slots: usize,
}

impl From<RoomOccupancy> for RoomView {
    fn from(row: RoomOccupancy) -> Self {
        Self {
            room_id: row.room_id.to_string(),
            room_no: row.room_no,
            date_available: row.window_start.format("%Y-%m-%d").to_string(),
            time_from: row.window_start.format("%H:%M").to_string(),
            time_to: row.window_end.format("%H:%M").to_string(),
            total_slots: row.total_slots,
            available_slots: row.open_slots,
            booked_slots: row.booked_slots,
        }
    }
}

/// List all rooms with slot occupancy counts.
#[utoipa::path(
    get,
    path = "/api/teacher/rooms",
    responses(
        (status = 200, description = "Rooms with occupancy", body = [RoomView]),
        (status = 401, description = "Not a teacher session", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["teacher"],
    operation_id = "listRoomsWithOccupancy"
)]
#[get("/rooms")]
pub async fn list_rooms(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
) -> ApiResult<HttpResponse> {
    let identity = state.sessions.validate(cookie.token()?).await?;
    let rows = state.rooms.list_rooms_with_occupancy(&identity).await?;
    let views: Vec<RoomView> = rows.into_iter().map(RoomView::from).collect();
    Ok(HttpResponse::Ok().json(json!({ "rooms": views })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{CreatedRoom, MockRoomAdmin, MockSessionManager};
    use crate::domain::schedule::RoomId;
    use crate::domain::session::SessionIdentity;
    use crate::domain::user::{Role, UserId};
    use crate::inbound::http::test_utils::{test_app, TestPorts};
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::Value;

    fn teacher_sessions() -> MockSessionManager {
        let mut sessions = MockSessionManager::new();
        sessions.expect_validate().returning(|_| {
            Ok(SessionIdentity {
                user_id: UserId::new("T-1").expect("valid id"),
                role: Role::Teacher,
            })
        });
        sessions
    }

    fn session_cookie() -> Cookie<'static> {
        Cookie::new("sessionId", "token")
    }

    #[actix_web::test]
    async fn create_room_reports_slot_count() {
        let mut rooms = MockRoomAdmin::new();
        rooms
            .expect_create_room()
            .withf(|_, request| {
                request.room_no == "56"
                    && request.window_start.format("%H:%M").to_string() == "09:00"
                    && request.window_end.format("%H:%M").to_string() == "17:00"
            })
            .returning(|_, _| {
                Ok(CreatedRoom {
                    room_id: RoomId::random(),
                    slots_created: 16,
                })
            });
        let state = TestPorts {
            sessions: teacher_sessions(),
            rooms,
            ..TestPorts::default()
        }
        .into_state();
        let app = test::init_service(test_app(state)).await;

        let req = test::TestRequest::post()
            .uri("/api/teacher/create-room")
            .cookie(session_cookie())
            .set_json(json!({
                "room_no": "56",
                "date": "2025-01-31",
                "time_from": "09:00",
                "time_to": "17:00"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["slots_created"], json!(16));
        assert_eq!(
            body["message"],
            json!("Room created successfully with 16 slots")
        );
    }

    #[actix_web::test]
    async fn create_room_with_bad_time_is_bad_request() {
        let state = TestPorts {
            sessions: teacher_sessions(),
            ..TestPorts::default()
        }
        .into_state();
        let app = test::init_service(test_app(state)).await;

        let req = test::TestRequest::post()
            .uri("/api/teacher/create-room")
            .cookie(session_cookie())
            .set_json(json!({
                "room_no": "56",
                "date": "2025-01-31",
                "time_from": "nine",
                "time_to": "17:00"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn student_session_cannot_create_rooms() {
        let mut sessions = MockSessionManager::new();
        sessions.expect_validate().returning(|_| {
            Ok(SessionIdentity {
                user_id: UserId::new("CSE2025001").expect("valid id"),
                role: Role::Student,
            })
        });
        let mut rooms = MockRoomAdmin::new();
        rooms
            .expect_create_room()
            .returning(|identity, _| {
                identity.require_role(Role::Teacher)?;
                unreachable!("role check rejects first")
            });
        let state = TestPorts {
            sessions,
            rooms,
            ..TestPorts::default()
        }
        .into_state();
        let app = test::init_service(test_app(state)).await;

        let req = test::TestRequest::post()
            .uri("/api/teacher/create-room")
            .cookie(session_cookie())
            .set_json(json!({
                "room_no": "56",
                "date": "2025-01-31",
                "time_from": "09:00",
                "time_to": "17:00"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn rooms_render_occupancy_counts() {
        let mut rooms = MockRoomAdmin::new();
        rooms.expect_list_rooms_with_occupancy().returning(|_| {
            use chrono::{TimeZone, Utc};
            Ok(vec![RoomOccupancy {
                room_id: RoomId::random(),
                room_no: "56".to_owned(),
                window_start: Utc
                    .with_ymd_and_hms(2025, 1, 31, 9, 0, 0)
                    .single()
                    .expect("valid timestamp"),
                window_end: Utc
                    .with_ymd_and_hms(2025, 1, 31, 17, 0, 0)
                    .single()
                    .expect("valid timestamp"),
                total_slots: 16,
                open_slots: 15,
                booked_slots: 1,
            }])
        });
        let state = TestPorts {
            sessions: teacher_sessions(),
            rooms,
            ..TestPorts::default()
        }
        .into_state();
        let app = test::init_service(test_app(state)).await;

        let req = test::TestRequest::get()
            .uri("/api/teacher/rooms")
            .cookie(session_cookie())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        let room = &body["rooms"][0];
        assert_eq!(room["date_available"], json!("2025-01-31"));
        assert_eq!(room["time_from"], json!("09:00"));
        assert_eq!(room["total_slots"], json!(16));
        assert_eq!(room["available_slots"], json!(15));
        assert_eq!(room["booked_slots"], json!(1));
    }
}
