//! Driving port for teacher-facing room administration.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::RoomOccupancy;
use crate::domain::schedule::RoomId;
use crate::domain::session::SessionIdentity;
use crate::domain::Error;

/// Parameters for creating a room and generating its slot grid.
#[derive(Debug, Clone)]
pub struct CreateRoomRequest {
    pub room_no: String,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

/// Result of room creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRoom {
    pub room_id: RoomId,
    pub slots_created: usize,
}

/// Domain use-case port for room administration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomAdmin: Send + Sync {
    /// Create a room, generate its 30-minute grid, and persist both
    /// all-or-nothing.
    async fn create_room(
        &self,
        identity: &SessionIdentity,
        request: CreateRoomRequest,
    ) -> Result<CreatedRoom, Error>;

    /// All rooms with occupancy counts (teacher view).
    async fn list_rooms_with_occupancy(
        &self,
        identity: &SessionIdentity,
    ) -> Result<Vec<RoomOccupancy>, Error>;
}
