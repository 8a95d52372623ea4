//! Reservation engine: atomic claim, token derivation, booking persistence,
//! and the compensating rollback that keeps slot and booking state aligned.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{
    BookingRepository, BookingRepositoryError, BookingWithContext, ClaimedSlot, OpenSlot,
    ReservationCommand, ReservationQuery, SlotRepository, SlotRepositoryError,
};
use crate::domain::schedule::SlotId;
use crate::domain::session::SessionIdentity;
use crate::domain::token::confirmation_token;
use crate::domain::user::{Role, UserId};
use crate::domain::Error;

/// Unique booking identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(Uuid);

impl BookingId {
    /// Mint a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted reservation of one slot by one student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: BookingId,
    pub slot_id: SlotId,
    pub student_id: UserId,
    pub token_code: String,
    pub booked_at: DateTime<Utc>,
}

fn map_claim_error(error: SlotRepositoryError) -> Error {
    match error {
        SlotRepositoryError::NotFound { slot_id } => {
            Error::not_found(format!("slot {slot_id} does not exist"))
        }
        SlotRepositoryError::Unavailable { slot_id } => {
            Error::conflict(format!("slot {slot_id} is no longer available"))
        }
        SlotRepositoryError::Store { message } => {
            Error::internal(format!("slot store error: {message}"))
        }
    }
}

fn map_slot_store_error(error: SlotRepositoryError) -> Error {
    Error::internal(format!("slot store error: {error}"))
}

fn map_booking_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::DuplicateToken { token_code } => {
            Error::conflict(format!("confirmation token '{token_code}' already exists"))
        }
        BookingRepositoryError::Store { message } => {
            Error::internal(format!("booking store error: {message}"))
        }
    }
}

/// Reservation engine over a slot store, a booking store, and a clock.
pub struct ReservationService<S, B> {
    slots: Arc<S>,
    bookings: Arc<B>,
    clock: Arc<dyn Clock>,
}

impl<S, B> Clone for ReservationService<S, B> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
            bookings: Arc::clone(&self.bookings),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, B> ReservationService<S, B> {
    /// Create a new reservation engine.
    pub fn new(slots: Arc<S>, bookings: Arc<B>, clock: Arc<dyn Clock>) -> Self {
        Self {
            slots,
            bookings,
            clock,
        }
    }
}

impl<S, B> ReservationService<S, B>
where
    S: SlotRepository,
    B: BookingRepository,
{
    /// Undo a claim whose booking could not be persisted.
    ///
    /// When the release itself fails the slot stays Booked with no backing
    /// booking row, which no retry can repair; that state is logged loudly
    /// for operator attention.
    async fn compensate(&self, claimed: &ClaimedSlot, cause: &Error) {
        if let Err(release_error) = self.slots.release(claimed.slot_id).await {
            tracing::error!(
                slot_id = %claimed.slot_id,
                %cause,
                %release_error,
                "fatal inconsistency: slot left Booked without a booking record",
            );
        } else {
            tracing::warn!(
                slot_id = %claimed.slot_id,
                %cause,
                "booking insert failed, claim rolled back",
            );
        }
    }
}

#[async_trait]
impl<S, B> ReservationCommand for ReservationService<S, B>
where
    S: SlotRepository,
    B: BookingRepository,
{
    async fn book(&self, identity: &SessionIdentity, slot_id: SlotId) -> Result<Booking, Error> {
        identity.require_role(Role::Student)?;

        // The claim is the only gate against double booking; everything past
        // it must either persist a booking or put the slot back.
        let claimed = self.slots.claim(slot_id).await.map_err(map_claim_error)?;

        let booking = Booking {
            id: BookingId::random(),
            slot_id: claimed.slot_id,
            student_id: identity.user_id.clone(),
            token_code: confirmation_token(&claimed.room_no, claimed.start),
            booked_at: self.clock.utc(),
        };

        if let Err(insert_error) = self.bookings.insert(&booking).await {
            let cause = map_booking_error(insert_error);
            self.compensate(&claimed, &cause).await;
            return Err(cause);
        }

        tracing::info!(
            booking_id = %booking.id,
            slot_id = %booking.slot_id,
            student_id = %booking.student_id,
            token_code = %booking.token_code,
            "slot booked",
        );
        Ok(booking)
    }
}

#[async_trait]
impl<S, B> ReservationQuery for ReservationService<S, B>
where
    S: SlotRepository,
    B: BookingRepository,
{
    async fn list_open_slots(&self, identity: &SessionIdentity) -> Result<Vec<OpenSlot>, Error> {
        identity.require_role(Role::Student)?;
        self.slots
            .list_open(None)
            .await
            .map_err(map_slot_store_error)
    }

    async fn list_my_bookings(
        &self,
        identity: &SessionIdentity,
    ) -> Result<Vec<BookingWithContext>, Error> {
        identity.require_role(Role::Student)?;
        self.bookings
            .list_for_student(&identity.user_id)
            .await
            .map_err(map_booking_error)
    }

    async fn list_all_bookings(
        &self,
        identity: &SessionIdentity,
    ) -> Result<Vec<BookingWithContext>, Error> {
        identity.require_role(Role::Teacher)?;
        self.bookings.list_all().await.map_err(map_booking_error)
    }
}
