//! In-memory persistence adapter.
//!
//! One `RwLock` guards the whole store, so every mutation is a single
//! critical section. The conditional update inside [`SlotRepository::claim`]
//! therefore observes and transitions slot state atomically, which is what
//! gives concurrent bookings their at-most-one-winner guarantee.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{
    BookingRepository, BookingRepositoryError, BookingWithContext, ClaimedSlot, OpenSlot,
    RoomOccupancy, RoomRepository, RoomRepositoryError, SessionRepository, SessionRepositoryError,
    SlotRepository, SlotRepositoryError, StoredCredentials, UserRepository, UserRepositoryError,
};
use crate::domain::reservation::Booking;
use crate::domain::schedule::{
    slot_grid, Room, RoomId, Slot, SlotId, SlotState, SlotWindow, SLOT_MINUTES,
};
use crate::domain::session::{SessionRecord, SessionToken};
use crate::domain::user::{PasswordDigest, Role, Student, Teacher, UserId};

#[derive(Default)]
struct StoreState {
    rooms: HashMap<RoomId, Room>,
    slots: HashMap<SlotId, Slot>,
    bookings: Vec<Booking>,
    sessions: HashMap<String, SessionRecord>,
    students: HashMap<String, Student>,
    teachers: HashMap<String, Teacher>,
}

impl StoreState {
    fn email_taken(&self, email: &str) -> bool {
        self.students.contains_key(email) || self.teachers.contains_key(email)
    }

    fn booking_context(&self, booking: &Booking) -> Option<BookingWithContext> {
        let slot = self.slots.get(&booking.slot_id)?;
        let room = self.rooms.get(&slot.room_id)?;
        Some(BookingWithContext {
            booking_id: booking.id,
            student_id: booking.student_id.clone(),
            room_no: room.room_no.clone(),
            slot_start: slot.start,
            slot_end: slot.end,
            token_code: booking.token_code.clone(),
            booked_at: booking.booked_at,
        })
    }
}

/// Process-local store backing every repository port.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the store with a small demo data set: one student
    /// (`CSE2025001`), one teacher, and room `56` open 09:00-17:00 UTC.
    pub async fn seed_demo_data(&self) -> Result<(), SeedError> {
        let student = Student {
            id: UserId::new("CSE2025001").map_err(|err| SeedError::Invalid(err.to_string()))?,
            name: "Safin".to_owned(),
            batch: "2025".to_owned(),
            dept: "CSE".to_owned(),
            email: "safin@university.edu".to_owned(),
            password: PasswordDigest::from_raw("password123"),
        };
        self.insert_student(&student).await?;

        let teacher = Teacher {
            id: UserId::new("T-1").map_err(|err| SeedError::Invalid(err.to_string()))?,
            name: "Dr. Smith".to_owned(),
            email: "smith@university.edu".to_owned(),
            password: PasswordDigest::from_raw("password123"),
        };
        self.insert_teacher(&teacher).await?;

        let window_start = Utc
            .with_ymd_and_hms(2025, 1, 31, 9, 0, 0)
            .single()
            .ok_or_else(|| SeedError::Invalid("demo window start".to_owned()))?;
        let window_end = Utc
            .with_ymd_and_hms(2025, 1, 31, 17, 0, 0)
            .single()
            .ok_or_else(|| SeedError::Invalid("demo window end".to_owned()))?;
        let windows = slot_grid(window_start, window_end, Duration::minutes(SLOT_MINUTES))
            .map_err(|err| SeedError::Invalid(err.to_string()))?;
        let room = Room {
            id: RoomId::random(),
            room_no: "56".to_owned(),
            window_start,
            window_end,
        };
        self.insert_room_with_slots(&room, &windows).await?;
        Ok(())
    }
}

/// Failures while seeding demo data.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("invalid seed data: {0}")]
    Invalid(String),
    #[error(transparent)]
    User(#[from] UserRepositoryError),
    #[error(transparent)]
    Room(#[from] RoomRepositoryError),
}

#[async_trait]
impl SlotRepository for InMemoryStore {
    async fn list_open(&self, room: Option<RoomId>) -> Result<Vec<OpenSlot>, SlotRepositoryError> {
        let state = self.state.read().await;
        let mut open: Vec<OpenSlot> = state
            .slots
            .values()
            .filter(|slot| slot.state == SlotState::Open)
            .filter(|slot| room.is_none_or(|room_id| slot.room_id == room_id))
            .filter_map(|slot| {
                let room = state.rooms.get(&slot.room_id)?;
                Some(OpenSlot {
                    slot_id: slot.id,
                    room_no: room.room_no.clone(),
                    start: slot.start,
                    end: slot.end,
                })
            })
            .collect();
        open.sort_by(|a, b| a.room_no.cmp(&b.room_no).then(a.start.cmp(&b.start)));
        Ok(open)
    }

    async fn claim(&self, slot_id: SlotId) -> Result<ClaimedSlot, SlotRepositoryError> {
        let mut state = self.state.write().await;
        // Conditional update under the write lock: check and transition are
        // one critical section, so exactly one concurrent caller wins.
        let slot = state
            .slots
            .get(&slot_id)
            .ok_or(SlotRepositoryError::NotFound { slot_id })?;
        if slot.state == SlotState::Booked {
            return Err(SlotRepositoryError::Unavailable { slot_id });
        }
        let (room_id, start, end) = (slot.room_id, slot.start, slot.end);
        // Resolve the room before transitioning so a dangling room reference
        // fails the claim while the slot is still Open.
        let room_no = state
            .rooms
            .get(&room_id)
            .map(|room| room.room_no.clone())
            .ok_or_else(|| SlotRepositoryError::Store {
                message: format!("slot {slot_id} references missing room {room_id}"),
            })?;
        let slot = state
            .slots
            .get_mut(&slot_id)
            .ok_or(SlotRepositoryError::NotFound { slot_id })?;
        slot.state = SlotState::Booked;
        Ok(ClaimedSlot {
            slot_id,
            room_id,
            room_no,
            start,
            end,
        })
    }

    async fn release(&self, slot_id: SlotId) -> Result<(), SlotRepositoryError> {
        let mut state = self.state.write().await;
        let slot = state
            .slots
            .get_mut(&slot_id)
            .ok_or(SlotRepositoryError::NotFound { slot_id })?;
        // Only a booked slot can be released; anything else means the
        // compensation path is miswired.
        if slot.state != SlotState::Booked {
            return Err(SlotRepositoryError::Store {
                message: format!("slot {slot_id} is not booked"),
            });
        }
        slot.state = SlotState::Open;
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        let mut state = self.state.write().await;
        // Mirrors a UNIQUE constraint on the stored confirmation token.
        if state
            .bookings
            .iter()
            .any(|existing| existing.token_code == booking.token_code)
        {
            return Err(BookingRepositoryError::DuplicateToken {
                token_code: booking.token_code.clone(),
            });
        }
        state.bookings.push(booking.clone());
        Ok(())
    }

    async fn list_for_student(
        &self,
        student_id: &UserId,
    ) -> Result<Vec<BookingWithContext>, BookingRepositoryError> {
        let state = self.state.read().await;
        let mut rows: Vec<BookingWithContext> = state
            .bookings
            .iter()
            .filter(|booking| &booking.student_id == student_id)
            .filter_map(|booking| state.booking_context(booking))
            .collect();
        rows.sort_by(|a, b| b.booked_at.cmp(&a.booked_at));
        Ok(rows)
    }

    async fn list_all(&self) -> Result<Vec<BookingWithContext>, BookingRepositoryError> {
        let state = self.state.read().await;
        let mut rows: Vec<BookingWithContext> = state
            .bookings
            .iter()
            .filter_map(|booking| state.booking_context(booking))
            .collect();
        rows.sort_by(|a, b| b.booked_at.cmp(&a.booked_at));
        Ok(rows)
    }
}

#[async_trait]
impl RoomRepository for InMemoryStore {
    async fn insert_room_with_slots(
        &self,
        room: &Room,
        windows: &[SlotWindow],
    ) -> Result<(), RoomRepositoryError> {
        let mut state = self.state.write().await;
        // Regenerating an identical grid must fail as a batch, leaving no
        // partial grid behind.
        let duplicate = state.rooms.values().any(|existing| {
            existing.room_no == room.room_no
                && existing.window_start == room.window_start
                && existing.window_end == room.window_end
        });
        if duplicate {
            return Err(RoomRepositoryError::DuplicateGrid {
                room_no: room.room_no.clone(),
            });
        }
        state.rooms.insert(room.id, room.clone());
        for window in windows {
            let slot = Slot {
                id: SlotId::random(),
                room_id: room.id,
                start: window.start,
                end: window.end,
                state: SlotState::Open,
            };
            state.slots.insert(slot.id, slot);
        }
        Ok(())
    }

    async fn list_with_occupancy(&self) -> Result<Vec<RoomOccupancy>, RoomRepositoryError> {
        let state = self.state.read().await;
        let mut rows: Vec<RoomOccupancy> = state
            .rooms
            .values()
            .map(|room| {
                let mut total = 0;
                let mut booked = 0;
                for slot in state.slots.values().filter(|slot| slot.room_id == room.id) {
                    total += 1;
                    if slot.state == SlotState::Booked {
                        booked += 1;
                    }
                }
                RoomOccupancy {
                    room_id: room.id,
                    room_no: room.room_no.clone(),
                    window_start: room.window_start,
                    window_end: room.window_end,
                    total_slots: total,
                    open_slots: total - booked,
                    booked_slots: booked,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.room_no.cmp(&b.room_no));
        Ok(rows)
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn insert(&self, record: &SessionRecord) -> Result<(), SessionRepositoryError> {
        let mut state = self.state.write().await;
        state
            .sessions
            .insert(record.token.as_str().to_owned(), record.clone());
        Ok(())
    }

    async fn find(
        &self,
        token: &SessionToken,
    ) -> Result<Option<SessionRecord>, SessionRepositoryError> {
        let state = self.state.read().await;
        Ok(state.sessions.get(token.as_str()).cloned())
    }

    async fn delete(&self, token: &SessionToken) -> Result<(), SessionRepositoryError> {
        let mut state = self.state.write().await;
        state.sessions.remove(token.as_str());
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_credentials(
        &self,
        email: &str,
        role: Role,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError> {
        let state = self.state.read().await;
        let credentials = match role {
            Role::Student => state.students.get(email).map(|student| StoredCredentials {
                user_id: student.id.clone(),
                password: student.password.clone(),
            }),
            Role::Teacher => state.teachers.get(email).map(|teacher| StoredCredentials {
                user_id: teacher.id.clone(),
                password: teacher.password.clone(),
            }),
        };
        Ok(credentials)
    }

    async fn insert_student(&self, student: &Student) -> Result<(), UserRepositoryError> {
        let mut state = self.state.write().await;
        if state.email_taken(&student.email) {
            return Err(UserRepositoryError::DuplicateEmail {
                email: student.email.clone(),
            });
        }
        state
            .students
            .insert(student.email.clone(), student.clone());
        Ok(())
    }

    async fn insert_teacher(&self, teacher: &Teacher) -> Result<(), UserRepositoryError> {
        let mut state = self.state.write().await;
        if state.email_taken(&teacher.email) {
            return Err(UserRepositoryError::DuplicateEmail {
                email: teacher.email.clone(),
            });
        }
        state
            .teachers
            .insert(teacher.email.clone(), teacher.clone());
        Ok(())
    }
}
