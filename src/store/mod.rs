//! Storage abstractions. The stores are pure CRUD with no business
//! logic; seat accounting and referential integrity live in the
//! reservation manager, which is the only writer of seat counters.

pub mod locks;
pub mod memory;
pub mod mysql;

use crate::models::flight::{Flight, NewFlight};
use crate::models::reservation::{NewReservation, Reservation};
use crate::models::user::{NewUser, User};
use crate::utils::error::AppResult;
use async_trait::async_trait;

#[async_trait]
pub trait FlightStore: Send + Sync {
    async fn insert(&self, new: NewFlight) -> AppResult<Flight>;

    async fn get(&self, id: i64) -> AppResult<Option<Flight>>;

    async fn list(&self) -> AppResult<Vec<Flight>>;

    async fn search(&self, origin: &str, destination: &str) -> AppResult<Vec<Flight>>;

    /// Upsert. Implementations MUST reject a negative seat counter with
    /// `InvariantViolation` instead of persisting or clamping it.
    async fn save(&self, flight: &Flight) -> AppResult<()>;

    /// Returns false when the flight did not exist.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn insert(&self, new: NewReservation) -> AppResult<Reservation>;

    async fn get(&self, id: i64) -> AppResult<Option<Reservation>>;

    /// Insertion order, for deterministic listings.
    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Reservation>>;

    async fn list_by_flight(&self, flight_id: i64) -> AppResult<Vec<Reservation>>;

    /// Returns false when the reservation did not exist.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Returns the number of rows removed.
    async fn delete_all(&self) -> AppResult<u64>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, new: NewUser) -> AppResult<User>;

    async fn get(&self, id: i64) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn list(&self) -> AppResult<Vec<User>>;

    async fn save(&self, user: &User) -> AppResult<()>;
}
