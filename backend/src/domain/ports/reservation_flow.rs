//! Driving ports for the reservation engine.

use async_trait::async_trait;

use crate::domain::ports::{BookingWithContext, OpenSlot};
use crate::domain::reservation::Booking;
use crate::domain::schedule::SlotId;
use crate::domain::session::SessionIdentity;
use crate::domain::Error;

/// Command side of the reservation engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationCommand: Send + Sync {
    /// Claim a slot for the calling student and persist the booking.
    ///
    /// Exactly one of any set of concurrent callers for the same slot wins;
    /// the rest receive a conflict and cause no state change.
    async fn book(&self, identity: &SessionIdentity, slot_id: SlotId) -> Result<Booking, Error>;
}

/// Query side of the reservation engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationQuery: Send + Sync {
    /// Open slots across all rooms (student view).
    async fn list_open_slots(&self, identity: &SessionIdentity) -> Result<Vec<OpenSlot>, Error>;

    /// The calling student's own bookings.
    async fn list_my_bookings(
        &self,
        identity: &SessionIdentity,
    ) -> Result<Vec<BookingWithContext>, Error>;

    /// Every booking with slot/room context, most recent first (teacher
    /// view).
    async fn list_all_bookings(
        &self,
        identity: &SessionIdentity,
    ) -> Result<Vec<BookingWithContext>, Error>;
}
