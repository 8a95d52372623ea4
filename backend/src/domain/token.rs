//! Confirmation token derivation.
//!
//! Tokens are a pure function of room label and slot start, so uniqueness is
//! a corollary of at-most-one-winner slot claims. The booking store still
//! carries a unique constraint on stored tokens as a defence against grid
//! bugs such as two rooms sharing a label.

use chrono::{DateTime, Utc};

/// Derive the human-readable confirmation token for a claimed slot.
///
/// Shape: `ROOM{room_no}-{YYYYMMDD}-{HHMM}`, taken from the slot's own start
/// time.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use slotbook::domain::token::confirmation_token;
///
/// let start = Utc.with_ymd_and_hms(2025, 1, 31, 10, 0, 0).unwrap();
/// assert_eq!(confirmation_token("56", start), "ROOM56-20250131-1000");
/// ```
#[must_use]
pub fn confirmation_token(room_no: &str, slot_start: DateTime<Utc>) -> String {
    format!("ROOM{room_no}-{}", slot_start.format("%Y%m%d-%H%M"))
}
