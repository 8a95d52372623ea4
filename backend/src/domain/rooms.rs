//! Room administration: grid generation and teacher-facing occupancy reads.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;

use crate::domain::ports::{
    CreateRoomRequest, CreatedRoom, RoomAdmin, RoomOccupancy, RoomRepository, RoomRepositoryError,
};
use crate::domain::schedule::{slot_grid, Room, RoomId, SLOT_MINUTES};
use crate::domain::session::SessionIdentity;
use crate::domain::user::Role;
use crate::domain::Error;

fn map_room_store_error(error: RoomRepositoryError) -> Error {
    match error {
        RoomRepositoryError::DuplicateGrid { room_no } => {
            Error::conflict(format!("room '{room_no}' already has this slot grid"))
        }
        RoomRepositoryError::Store { message } => {
            Error::internal(format!("room store error: {message}"))
        }
    }
}

/// Room administration service over a room store.
pub struct RoomService<R> {
    rooms: Arc<R>,
}

impl<R> Clone for RoomService<R> {
    fn clone(&self) -> Self {
        Self {
            rooms: Arc::clone(&self.rooms),
        }
    }
}

impl<R> RoomService<R> {
    /// Create a new room administration service.
    pub fn new(rooms: Arc<R>) -> Self {
        Self { rooms }
    }
}

#[async_trait]
impl<R> RoomAdmin for RoomService<R>
where
    R: RoomRepository,
{
    async fn create_room(
        &self,
        identity: &SessionIdentity,
        request: CreateRoomRequest,
    ) -> Result<CreatedRoom, Error> {
        identity.require_role(Role::Teacher)?;

        if request.room_no.trim().is_empty() {
            return Err(Error::invalid_request("room number must not be empty"));
        }

        let windows = slot_grid(
            request.window_start,
            request.window_end,
            Duration::minutes(SLOT_MINUTES),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        if windows.is_empty() {
            return Err(Error::invalid_request(format!(
                "availability window is shorter than one {SLOT_MINUTES}-minute slot"
            )));
        }

        let room = Room {
            id: RoomId::random(),
            room_no: request.room_no,
            window_start: request.window_start,
            window_end: request.window_end,
        };
        self.rooms
            .insert_room_with_slots(&room, &windows)
            .await
            .map_err(map_room_store_error)?;

        tracing::info!(
            room_id = %room.id,
            room_no = %room.room_no,
            slots_created = windows.len(),
            "room created",
        );
        Ok(CreatedRoom {
            room_id: room.id,
            slots_created: windows.len(),
        })
    }

    async fn list_rooms_with_occupancy(
        &self,
        identity: &SessionIdentity,
    ) -> Result<Vec<RoomOccupancy>, Error> {
        identity.require_role(Role::Teacher)?;
        self.rooms
            .list_with_occupancy()
            .await
            .map_err(map_room_store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockRoomRepository;
    use crate::domain::user::UserId;
    use crate::domain::ErrorCode;
    use chrono::{TimeZone, Utc};

    fn teacher() -> SessionIdentity {
        SessionIdentity {
            user_id: UserId::new("T-1").expect("valid id"),
            role: Role::Teacher,
        }
    }

    fn student() -> SessionIdentity {
        SessionIdentity {
            user_id: UserId::new("CSE2025001").expect("valid id"),
            role: Role::Student,
        }
    }

    fn request_with_window(hours: u32) -> CreateRoomRequest {
        CreateRoomRequest {
            room_no: "56".to_owned(),
            window_start: Utc
                .with_ymd_and_hms(2025, 1, 31, 9, 0, 0)
                .single()
                .expect("valid timestamp"),
            window_end: Utc
                .with_ymd_and_hms(2025, 1, 31, 9 + hours, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[tokio::test]
    async fn create_room_persists_the_full_grid() {
        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_insert_room_with_slots()
            .times(1)
            .withf(|room, windows| room.room_no == "56" && windows.len() == 16)
            .returning(|_, _| Ok(()));

        let service = RoomService::new(Arc::new(rooms));
        let created = service
            .create_room(&teacher(), request_with_window(8))
            .await
            .expect("creates");
        assert_eq!(created.slots_created, 16);
    }

    #[tokio::test]
    async fn student_cannot_create_rooms() {
        let mut rooms = MockRoomRepository::new();
        rooms.expect_insert_room_with_slots().times(0);
        let service = RoomService::new(Arc::new(rooms));

        let err = service
            .create_room(&student(), request_with_window(8))
            .await
            .expect_err("wrong role");
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn inverted_window_is_invalid_request() {
        let service = RoomService::new(Arc::new(MockRoomRepository::new()));
        let mut request = request_with_window(8);
        std::mem::swap(&mut request.window_start, &mut request.window_end);

        let err = service
            .create_room(&teacher(), request)
            .await
            .expect_err("inverted window");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn duplicate_grid_is_conflict() {
        let mut rooms = MockRoomRepository::new();
        rooms.expect_insert_room_with_slots().returning(|room, _| {
            Err(RoomRepositoryError::DuplicateGrid {
                room_no: room.room_no.clone(),
            })
        });
        let service = RoomService::new(Arc::new(rooms));

        let err = service
            .create_room(&teacher(), request_with_window(8))
            .await
            .expect_err("duplicate");
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn blank_room_number_is_invalid_request() {
        let service = RoomService::new(Arc::new(MockRoomRepository::new()));
        let mut request = request_with_window(8);
        request.room_no = "   ".to_owned();

        let err = service
            .create_room(&teacher(), request)
            .await
            .expect_err("blank label");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }
}
