use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A scheduled route instance with finite seat inventory.
///
/// `available_seats` is the live counter the reservation core protects:
/// it never goes negative, and it is only adjusted through the
/// reservation manager while the flight's lock is held.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
pub struct Flight {
    pub id: i64,
    pub origin: String,
    pub destination: String,
    pub flight_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub carrier: String,
    pub price: Decimal,
    pub available_seats: i32,
}

/// Insert payload for the catalog store; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewFlight {
    pub origin: String,
    pub destination: String,
    pub flight_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub carrier: String,
    pub price: Decimal,
    pub available_seats: i32,
}

#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct FlightCreateRequest {
    #[validate(length(min = 1))]
    pub origin: String,
    #[validate(length(min = 1))]
    pub destination: String,
    pub flight_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    #[validate(length(min = 1))]
    pub carrier: String,
    pub price: Decimal,
    #[validate(range(min = 0))]
    pub available_seats: i32,
}

impl From<FlightCreateRequest> for NewFlight {
    fn from(request: FlightCreateRequest) -> Self {
        NewFlight {
            origin: request.origin,
            destination: request.destination,
            flight_date: request.flight_date,
            departure_time: request.departure_time,
            arrival_time: request.arrival_time,
            carrier: request.carrier,
            price: request.price,
            available_seats: request.available_seats,
        }
    }
}

/// Full-replace update, as catalog administration edits every field.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct FlightUpdateRequest {
    #[validate(length(min = 1))]
    pub origin: String,
    #[validate(length(min = 1))]
    pub destination: String,
    pub flight_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    #[validate(length(min = 1))]
    pub carrier: String,
    pub price: Decimal,
    #[validate(range(min = 0))]
    pub available_seats: i32,
}
