//! Port for booking persistence and booking reads.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::reservation::{Booking, BookingId};
use crate::domain::user::UserId;

/// A booking joined with its slot and room context for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingWithContext {
    pub booking_id: BookingId,
    pub student_id: UserId,
    pub room_no: String,
    pub slot_start: DateTime<Utc>,
    pub slot_end: DateTime<Utc>,
    pub token_code: String,
    pub booked_at: DateTime<Utc>,
}

/// Errors raised by booking repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingRepositoryError {
    /// The unique constraint on stored confirmation tokens fired.
    #[error("confirmation token '{token_code}' already exists")]
    DuplicateToken { token_code: String },
    /// The underlying store failed.
    #[error("booking store failure: {message}")]
    Store { message: String },
}

/// Port over durable booking records.
///
/// Adapters must enforce a unique constraint on `token_code`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a booking row.
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError>;

    /// Bookings held by one student, most recent first.
    async fn list_for_student(
        &self,
        student_id: &UserId,
    ) -> Result<Vec<BookingWithContext>, BookingRepositoryError>;

    /// Every booking with slot/room context, most recent first.
    async fn list_all(&self) -> Result<Vec<BookingWithContext>, BookingRepositoryError>;
}
