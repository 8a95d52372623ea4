//! Rooms, slots, and the time-grid generator.
//!
//! A room advertises one availability window. The grid generator partitions
//! that window into contiguous fixed-duration slots; a trailing remainder
//! shorter than the slot duration is dropped, never emitted.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Fixed slot length for every room grid.
pub const SLOT_MINUTES: i64 = 30;

/// Unique room identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomId(Uuid);

impl RoomId {
    /// Mint a fresh identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RoomId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique slot identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(Uuid);

impl SlotId {
    /// Mint a fresh identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SlotId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A room and its availability window.
///
/// Immutable once its slot grid is generated; there is no resize-in-place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    /// Human label, e.g. `"56"`. Feeds the confirmation token.
    pub room_no: String,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

/// Booking state of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Open,
    Booked,
}

/// A fixed-duration interval within a room's availability window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub id: SlotId,
    pub room_id: RoomId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub state: SlotState,
}

/// A half-open `[start, end)` interval produced by the grid generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Invalid inputs to [`slot_grid`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidWindow {
    /// `window_start` is not strictly before `window_end`.
    #[error("availability window must start before it ends")]
    EmptyWindow,
    /// The slot duration is zero or negative.
    #[error("slot duration must be positive")]
    NonPositiveDuration,
}

/// Partition `[window_start, window_end)` into contiguous slots of
/// `duration`, ascending by start.
///
/// Pure and deterministic: identical inputs always yield an identical
/// sequence, so regenerating an already-populated grid surfaces as duplicate
/// work instead of silently overlapping entries.
///
/// # Examples
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use slotbook::domain::schedule::slot_grid;
///
/// let start = Utc.with_ymd_and_hms(2025, 1, 31, 9, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2025, 1, 31, 17, 0, 0).unwrap();
/// let grid = slot_grid(start, end, Duration::minutes(30)).unwrap();
/// assert_eq!(grid.len(), 16);
/// ```
pub fn slot_grid(
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    duration: Duration,
) -> Result<Vec<SlotWindow>, InvalidWindow> {
    if duration <= Duration::zero() {
        return Err(InvalidWindow::NonPositiveDuration);
    }
    if window_start >= window_end {
        return Err(InvalidWindow::EmptyWindow);
    }

    let mut windows = Vec::new();
    let mut cursor = window_start;
    while cursor + duration <= window_end {
        windows.push(SlotWindow {
            start: cursor,
            end: cursor + duration,
        });
        cursor += duration;
    }
    Ok(windows)
}
