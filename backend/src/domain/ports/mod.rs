//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (repositories) are implemented by `outbound::persistence`;
//! driving ports (use-cases) are implemented by the domain services and
//! consumed by `inbound::http`.

mod booking_repository;
mod reservation_flow;
mod room_admin;
mod room_repository;
mod session_manager;
mod session_repository;
mod slot_repository;
mod user_repository;

#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError, BookingWithContext};
#[cfg(test)]
pub use reservation_flow::{MockReservationCommand, MockReservationQuery};
pub use reservation_flow::{ReservationCommand, ReservationQuery};
#[cfg(test)]
pub use room_admin::MockRoomAdmin;
pub use room_admin::{CreateRoomRequest, CreatedRoom, RoomAdmin};
#[cfg(test)]
pub use room_repository::MockRoomRepository;
pub use room_repository::{RoomOccupancy, RoomRepository, RoomRepositoryError};
#[cfg(test)]
pub use session_manager::MockSessionManager;
pub use session_manager::{LoginOutcome, LoginRequest, RegistrationRequest, SessionManager};
#[cfg(test)]
pub use session_repository::MockSessionRepository;
pub use session_repository::{SessionRepository, SessionRepositoryError};
#[cfg(test)]
pub use slot_repository::MockSlotRepository;
pub use slot_repository::{ClaimedSlot, OpenSlot, SlotRepository, SlotRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredCredentials, UserRepository, UserRepositoryError};
