//! In-memory backend. Maps are insertion-ordered so listings come back
//! in the order rows were written, and ids are monotonic per store.

use crate::models::flight::{Flight, NewFlight};
use crate::models::reservation::{NewReservation, Reservation};
use crate::models::user::{NewUser, User};
use crate::store::{FlightStore, ReservationStore, UserStore};
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryFlightStore {
    flights: RwLock<IndexMap<i64, Flight>>,
    next_id: AtomicI64,
}

impl MemoryFlightStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlightStore for MemoryFlightStore {
    async fn insert(&self, new: NewFlight) -> AppResult<Flight> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let flight = Flight {
            id,
            origin: new.origin,
            destination: new.destination,
            flight_date: new.flight_date,
            departure_time: new.departure_time,
            arrival_time: new.arrival_time,
            carrier: new.carrier,
            price: new.price,
            available_seats: new.available_seats,
        };
        self.flights.write().await.insert(id, flight.clone());
        Ok(flight)
    }

    async fn get(&self, id: i64) -> AppResult<Option<Flight>> {
        Ok(self.flights.read().await.get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Flight>> {
        Ok(self.flights.read().await.values().cloned().collect())
    }

    async fn search(&self, origin: &str, destination: &str) -> AppResult<Vec<Flight>> {
        Ok(self
            .flights
            .read()
            .await
            .values()
            .filter(|f| f.origin == origin && f.destination == destination)
            .cloned()
            .collect())
    }

    async fn save(&self, flight: &Flight) -> AppResult<()> {
        if flight.available_seats < 0 {
            return Err(AppError::InvariantViolation(format!(
                "refusing to persist flight {} with {} available seats",
                flight.id, flight.available_seats
            )));
        }
        self.flights.write().await.insert(flight.id, flight.clone());
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.flights.write().await.shift_remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct MemoryReservationStore {
    reservations: RwLock<IndexMap<i64, Reservation>>,
    next_id: AtomicI64,
}

impl MemoryReservationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReservationStore for MemoryReservationStore {
    async fn insert(&self, new: NewReservation) -> AppResult<Reservation> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let reservation = Reservation {
            id,
            user_id: new.user_id,
            flight_id: new.flight_id,
            quantity: new.quantity,
            status: new.status,
            reference: new.reference,
        };
        self.reservations
            .write()
            .await
            .insert(id, reservation.clone());
        Ok(reservation)
    }

    async fn get(&self, id: i64) -> AppResult<Option<Reservation>> {
        Ok(self.reservations.read().await.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .read()
            .await
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_by_flight(&self, flight_id: i64) -> AppResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .read()
            .await
            .values()
            .filter(|r| r.flight_id == flight_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.reservations.write().await.shift_remove(&id).is_some())
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let mut reservations = self.reservations.write().await;
        let dropped = reservations.len() as u64;
        reservations.clear();
        Ok(dropped)
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<IndexMap<i64, User>>,
    next_id: AtomicI64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, new: NewUser) -> AppResult<User> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            username: new.username,
            password: new.password,
            full_name: new.full_name,
            role: new.role,
        };
        self.users.write().await.insert(id, user.clone());
        Ok(user)
    }

    async fn get(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(())
    }
}
