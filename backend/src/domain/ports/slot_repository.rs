//! Port for slot state reads and the atomic claim primitive.

use async_trait::async_trait;

use crate::domain::schedule::{RoomId, SlotId};
use chrono::{DateTime, Utc};

/// An open slot joined with its room context, ready for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSlot {
    pub slot_id: SlotId,
    pub room_no: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A slot freshly transitioned Open→Booked by [`SlotRepository::claim`].
///
/// Carries the room context the reservation engine needs to derive the
/// confirmation token without a second read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimedSlot {
    pub slot_id: SlotId,
    pub room_id: RoomId,
    pub room_no: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Errors raised by slot repository adapters.
///
/// `NotFound` and `Unavailable` are expected, recoverable outcomes of
/// contention, not faults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotRepositoryError {
    /// No slot exists with the given id.
    #[error("slot {slot_id} does not exist")]
    NotFound { slot_id: SlotId },
    /// The slot is already booked; the caller lost the race.
    #[error("slot {slot_id} is no longer available")]
    Unavailable { slot_id: SlotId },
    /// The underlying store failed.
    #[error("slot store failure: {message}")]
    Store { message: String },
}

/// Port over durable slot state.
///
/// `claim` must be a single atomic conditional update with at-most-one-winner
/// semantics: of N concurrent callers for one slot, exactly one succeeds and
/// the rest observe [`SlotRepositoryError::Unavailable`] with no state
/// change. A read-then-write pair is not an acceptable implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// List open slots, optionally restricted to one room, ascending by
    /// room label then start time.
    async fn list_open(&self, room: Option<RoomId>) -> Result<Vec<OpenSlot>, SlotRepositoryError>;

    /// Atomically transition the slot Open→Booked.
    async fn claim(&self, slot_id: SlotId) -> Result<ClaimedSlot, SlotRepositoryError>;

    /// Compensating rollback: transition the slot Booked→Open. Releasing
    /// a slot that is not booked is a [`SlotRepositoryError::Store`] fault.
    async fn release(&self, slot_id: SlotId) -> Result<(), SlotRepositoryError>;
}
