//! Port for room persistence and occupancy reads.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::schedule::{Room, RoomId, SlotWindow};

/// Per-room slot occupancy for the teacher overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomOccupancy {
    pub room_id: RoomId,
    pub room_no: String,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub total_slots: usize,
    pub open_slots: usize,
    pub booked_slots: usize,
}

/// Errors raised by room repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomRepositoryError {
    /// An identical grid for this room label and window already exists.
    #[error("room '{room_no}' already has a slot grid for this window")]
    DuplicateGrid { room_no: String },
    /// The underlying store failed.
    #[error("room store failure: {message}")]
    Store { message: String },
}

/// Port over durable rooms and their slot grids.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Persist a room together with its generated slots as a single unit of
    /// work: if any slot insert fails the whole batch is rejected and no
    /// partial grid survives.
    async fn insert_room_with_slots(
        &self,
        room: &Room,
        windows: &[SlotWindow],
    ) -> Result<(), RoomRepositoryError>;

    /// All rooms with slot occupancy counts, ascending by room label.
    async fn list_with_occupancy(&self) -> Result<Vec<RoomOccupancy>, RoomRepositoryError>;
}
