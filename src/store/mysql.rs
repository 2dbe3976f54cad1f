//! MySQL backend, selected when `DATABASE_URL` is set. Plain row CRUD;
//! per-flight serialization still comes from the lock registry, which
//! is sufficient with a single authoritative store behind one process.

use crate::models::flight::{Flight, NewFlight};
use crate::models::reservation::{NewReservation, Reservation};
use crate::models::user::{NewUser, User};
use crate::store::{FlightStore, ReservationStore, UserStore};
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;

pub async fn connect(database_url: &str) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await
}

/// Idempotent schema bootstrap, run once at startup.
pub async fn migrate(pool: &MySqlPool) -> AppResult<()> {
    let tables = [
        "CREATE TABLE IF NOT EXISTS users (
            id BIGINT AUTO_INCREMENT PRIMARY KEY,
            username VARCHAR(255) NOT NULL,
            password VARCHAR(255) NOT NULL,
            full_name VARCHAR(255) NOT NULL,
            role ENUM('ADMIN', 'USER') DEFAULT 'USER' NOT NULL,
            CONSTRAINT users_username_uindex UNIQUE (username)
        )",
        "CREATE TABLE IF NOT EXISTS flights (
            id BIGINT AUTO_INCREMENT PRIMARY KEY,
            origin VARCHAR(255) NOT NULL,
            destination VARCHAR(255) NOT NULL,
            flight_date DATE NOT NULL,
            departure_time TIME NOT NULL,
            arrival_time TIME NOT NULL,
            carrier VARCHAR(255) NOT NULL,
            price DECIMAL(12, 2) NOT NULL,
            available_seats INT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS reservations (
            id BIGINT AUTO_INCREMENT PRIMARY KEY,
            user_id BIGINT NOT NULL,
            flight_id BIGINT NOT NULL,
            quantity INT NOT NULL,
            status ENUM('CONFIRMED') DEFAULT 'CONFIRMED' NOT NULL,
            reference CHAR(6) NOT NULL,
            CONSTRAINT reservations_user_id_fk
                FOREIGN KEY (user_id) REFERENCES users(id),
            CONSTRAINT reservations_flight_id_fk
                FOREIGN KEY (flight_id) REFERENCES flights(id)
        )",
    ];

    for create_sql in tables {
        sqlx::query(create_sql).execute(pool).await?;
    }

    Ok(())
}

pub struct MySqlFlightStore {
    pool: MySqlPool,
}

impl MySqlFlightStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlFlightStore { pool }
    }
}

const FLIGHT_COLUMNS: &str = "id, origin, destination, flight_date, departure_time, \
     arrival_time, carrier, price, available_seats";

#[async_trait]
impl FlightStore for MySqlFlightStore {
    async fn insert(&self, new: NewFlight) -> AppResult<Flight> {
        let result = sqlx::query(
            "INSERT INTO flights \
             (origin, destination, flight_date, departure_time, arrival_time, \
              carrier, price, available_seats) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.origin)
        .bind(&new.destination)
        .bind(new.flight_date)
        .bind(new.departure_time)
        .bind(new.arrival_time)
        .bind(&new.carrier)
        .bind(new.price)
        .bind(new.available_seats)
        .execute(&self.pool)
        .await?;

        Ok(Flight {
            id: result.last_insert_id() as i64,
            origin: new.origin,
            destination: new.destination,
            flight_date: new.flight_date,
            departure_time: new.departure_time,
            arrival_time: new.arrival_time,
            carrier: new.carrier,
            price: new.price,
            available_seats: new.available_seats,
        })
    }

    async fn get(&self, id: i64) -> AppResult<Option<Flight>> {
        let flight = sqlx::query_as::<_, Flight>(&format!(
            "SELECT {FLIGHT_COLUMNS} FROM flights WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(flight)
    }

    async fn list(&self) -> AppResult<Vec<Flight>> {
        let flights = sqlx::query_as::<_, Flight>(&format!(
            "SELECT {FLIGHT_COLUMNS} FROM flights ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(flights)
    }

    async fn search(&self, origin: &str, destination: &str) -> AppResult<Vec<Flight>> {
        let flights = sqlx::query_as::<_, Flight>(&format!(
            "SELECT {FLIGHT_COLUMNS} FROM flights \
             WHERE origin = ? AND destination = ? ORDER BY id"
        ))
        .bind(origin)
        .bind(destination)
        .fetch_all(&self.pool)
        .await?;

        Ok(flights)
    }

    async fn save(&self, flight: &Flight) -> AppResult<()> {
        if flight.available_seats < 0 {
            return Err(AppError::InvariantViolation(format!(
                "refusing to persist flight {} with {} available seats",
                flight.id, flight.available_seats
            )));
        }

        sqlx::query(
            "INSERT INTO flights \
             (id, origin, destination, flight_date, departure_time, arrival_time, \
              carrier, price, available_seats) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON DUPLICATE KEY UPDATE \
             origin = VALUES(origin), destination = VALUES(destination), \
             flight_date = VALUES(flight_date), departure_time = VALUES(departure_time), \
             arrival_time = VALUES(arrival_time), carrier = VALUES(carrier), \
             price = VALUES(price), available_seats = VALUES(available_seats)",
        )
        .bind(flight.id)
        .bind(&flight.origin)
        .bind(&flight.destination)
        .bind(flight.flight_date)
        .bind(flight.departure_time)
        .bind(flight.arrival_time)
        .bind(&flight.carrier)
        .bind(flight.price)
        .bind(flight.available_seats)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM flights WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub struct MySqlReservationStore {
    pool: MySqlPool,
}

impl MySqlReservationStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlReservationStore { pool }
    }
}

const RESERVATION_COLUMNS: &str = "id, user_id, flight_id, quantity, status, reference";

#[async_trait]
impl ReservationStore for MySqlReservationStore {
    async fn insert(&self, new: NewReservation) -> AppResult<Reservation> {
        let result = sqlx::query(
            "INSERT INTO reservations (user_id, flight_id, quantity, status, reference) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(new.user_id)
        .bind(new.flight_id)
        .bind(new.quantity)
        .bind(new.status.to_string())
        .bind(&new.reference)
        .execute(&self.pool)
        .await?;

        Ok(Reservation {
            id: result.last_insert_id() as i64,
            user_id: new.user_id,
            flight_id: new.flight_id,
            quantity: new.quantity,
            status: new.status,
            reference: new.reference,
        })
    }

    async fn get(&self, id: i64) -> AppResult<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reservation)
    }

    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE user_id = ? ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    async fn list_by_flight(&self, flight_id: i64) -> AppResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE flight_id = ? ORDER BY id"
        ))
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM reservations")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

pub struct MySqlUserStore {
    pool: MySqlPool,
}

impl MySqlUserStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlUserStore { pool }
    }
}

const USER_COLUMNS: &str = "id, username, password, full_name, role";

#[async_trait]
impl UserStore for MySqlUserStore {
    async fn insert(&self, new: NewUser) -> AppResult<User> {
        let result = sqlx::query(
            "INSERT INTO users (username, password, full_name, role) VALUES (?, ?, ?, ?)",
        )
        .bind(&new.username)
        .bind(&new.password)
        .bind(&new.full_name)
        .bind(new.role.to_string())
        .execute(&self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_id() as i64,
            username: new.username,
            password: new.password,
            full_name: new.full_name,
            role: new.role,
        })
    }

    async fn get(&self, id: i64) -> AppResult<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let users =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        Ok(users)
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET username = ?, password = ?, full_name = ?, role = ? WHERE id = ?",
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.full_name)
        .bind(user.role.to_string())
        .bind(user.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
