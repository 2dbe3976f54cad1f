use crate::models::reservation::{
    NewReservation, Reservation, ReservationDetail, ReservationStatus,
};
use crate::models::user::User;
use crate::store::locks::FlightLockRegistry;
use crate::store::{FlightStore, ReservationStore, UserStore};
use crate::utils::error::{AppError, AppResult};
use std::sync::Arc;
use uuid::Uuid;

/// Orchestrates reservation create/list/cancel against the catalog and
/// the ledger. Every seat-counter mutation happens while the flight's
/// lock is held, and the counter-update/ledger-write pair is applied
/// all-or-nothing: a failed ledger write rolls the counter back before
/// the error is returned.
#[derive(Clone)]
pub struct ReservationService {
    flights: Arc<dyn FlightStore>,
    reservations: Arc<dyn ReservationStore>,
    users: Arc<dyn UserStore>,
    locks: Arc<FlightLockRegistry>,
}

impl ReservationService {
    pub fn new(
        flights: Arc<dyn FlightStore>,
        reservations: Arc<dyn ReservationStore>,
        users: Arc<dyn UserStore>,
        locks: Arc<FlightLockRegistry>,
    ) -> Self {
        ReservationService {
            flights,
            reservations,
            users,
            locks,
        }
    }

    async fn resolve_user(&self, username: &str) -> AppResult<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::IdentityNotFound(username.to_string()))
    }

    /// Reserve `quantity` seats on a flight for the calling user.
    pub async fn create(
        &self,
        flight_id: i64,
        username: &str,
        quantity: i32,
    ) -> AppResult<Reservation> {
        if quantity < 1 {
            return Err(AppError::ValidationError(
                "reservation quantity must be at least 1".to_string(),
            ));
        }

        let user = self.resolve_user(username).await?;

        let _guard = self.locks.acquire(flight_id).await?;

        let mut flight = self
            .flights
            .get(flight_id)
            .await?
            .ok_or(AppError::FlightNotFound(flight_id))?;

        if flight.available_seats < quantity {
            return Err(AppError::InsufficientInventory {
                requested: quantity,
                available: flight.available_seats,
            });
        }

        flight.available_seats -= quantity;
        self.flights.save(&flight).await?;

        let new = NewReservation {
            user_id: user.id,
            flight_id,
            quantity,
            status: ReservationStatus::Confirmed,
            reference: new_reference(),
        };

        match self.reservations.insert(new).await {
            Ok(reservation) => {
                tracing::info!(
                    reservation_id = reservation.id,
                    flight_id,
                    user_id = user.id,
                    quantity,
                    seats_left = flight.available_seats,
                    "reservation confirmed"
                );
                Ok(reservation)
            }
            Err(insert_err) => {
                // ledger write failed after the counter moved; put the
                // seats back while we still hold the flight lock
                flight.available_seats += quantity;
                if let Err(restore_err) = self.flights.save(&flight).await {
                    tracing::error!(
                        flight_id,
                        %insert_err,
                        %restore_err,
                        "seat restore failed after ledger write failure"
                    );
                    return Err(AppError::InvariantViolation(format!(
                        "flight {flight_id}: seats deducted but ledger write and restore both failed"
                    )));
                }
                Err(insert_err)
            }
        }
    }

    /// Cancel a reservation owned by the calling user, returning its
    /// seats to the flight.
    pub async fn cancel(&self, reservation_id: i64, username: &str) -> AppResult<()> {
        let user = self.resolve_user(username).await?;

        let found = self
            .reservations
            .get(reservation_id)
            .await?
            .ok_or(AppError::ReservationNotFound(reservation_id))?;

        if found.user_id != user.id {
            return Err(AppError::Unauthorized(format!(
                "reservation {reservation_id} belongs to another user"
            )));
        }

        let _guard = self.locks.acquire(found.flight_id).await?;

        // the reservation may have been cancelled while we waited
        let reservation = self
            .reservations
            .get(reservation_id)
            .await?
            .ok_or(AppError::ReservationNotFound(reservation_id))?;

        let mut flight = self
            .flights
            .get(reservation.flight_id)
            .await?
            .ok_or(AppError::FlightNotFound(reservation.flight_id))?;

        flight.available_seats += reservation.quantity;
        self.flights.save(&flight).await?;

        let deleted = match self.reservations.delete(reservation_id).await {
            Ok(deleted) => deleted,
            Err(delete_err) => {
                // seats were restored but the row is still there; take
                // them back out so the pair stays all-or-nothing
                flight.available_seats -= reservation.quantity;
                if let Err(restore_err) = self.flights.save(&flight).await {
                    tracing::error!(
                        reservation_id,
                        flight_id = reservation.flight_id,
                        %delete_err,
                        %restore_err,
                        "seat re-deduction failed after ledger delete failure"
                    );
                    return Err(AppError::InvariantViolation(format!(
                        "flight {}: seats restored but ledger delete and re-deduction both failed",
                        reservation.flight_id
                    )));
                }
                return Err(delete_err);
            }
        };

        if !deleted {
            flight.available_seats -= reservation.quantity;
            self.flights.save(&flight).await?;
            return Err(AppError::ReservationNotFound(reservation_id));
        }

        tracing::info!(
            reservation_id,
            flight_id = reservation.flight_id,
            user_id = user.id,
            quantity = reservation.quantity,
            "reservation cancelled"
        );
        Ok(())
    }

    /// All reservations owned by the calling user, joined with catalog
    /// fields, in insertion order.
    pub async fn list_by_user(&self, username: &str) -> AppResult<Vec<ReservationDetail>> {
        let user = self.resolve_user(username).await?;
        let rows = self.reservations.list_by_user(user.id).await?;
        self.with_flight_details(rows).await
    }

    /// Admin view of another user's reservations.
    pub async fn list_for_user_id(&self, user_id: i64) -> AppResult<Vec<ReservationDetail>> {
        let rows = self.reservations.list_by_user(user_id).await?;
        self.with_flight_details(rows).await
    }

    /// All reservations on a flight; feeds the passenger manifest.
    pub async fn list_by_flight(&self, flight_id: i64) -> AppResult<Vec<Reservation>> {
        if self.flights.get(flight_id).await?.is_none() {
            return Err(AppError::FlightNotFound(flight_id));
        }
        self.reservations.list_by_flight(flight_id).await
    }

    /// Delete every reservation WITHOUT reconciling seat counters.
    ///
    /// Maintenance/reset tool only: after this runs, flights keep their
    /// decremented counters and the capacity invariant no longer holds
    /// unless the catalog is re-seeded alongside.
    pub async fn purge_all(&self) -> AppResult<u64> {
        let dropped = self.reservations.delete_all().await?;
        tracing::warn!(
            dropped,
            "purged all reservations without reconciling seat counters"
        );
        Ok(dropped)
    }

    async fn with_flight_details(
        &self,
        rows: Vec<Reservation>,
    ) -> AppResult<Vec<ReservationDetail>> {
        let mut details = Vec::with_capacity(rows.len());
        for reservation in rows {
            match self.flights.get(reservation.flight_id).await? {
                Some(flight) => details.push(ReservationDetail {
                    id: reservation.id,
                    reference: reservation.reference,
                    quantity: reservation.quantity,
                    status: reservation.status,
                    flight_id: flight.id,
                    origin: flight.origin,
                    destination: flight.destination,
                    flight_date: flight.flight_date,
                    departure_time: flight.departure_time,
                    arrival_time: flight.arrival_time,
                    carrier: flight.carrier,
                    price: flight.price,
                }),
                None => {
                    tracing::warn!(
                        reservation_id = reservation.id,
                        flight_id = reservation.flight_id,
                        "reservation references a deleted flight, skipping"
                    );
                }
            }
        }
        Ok(details)
    }
}

/// Six-character record locator, uppercased hex from a v4 UUID.
fn new_reference() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    hex[..6].to_ascii_uppercase()
}
