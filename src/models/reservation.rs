use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use validator::Validate;

/// A user's claim on a quantity of seats on a flight. Cancellation
/// deletes the record; there is no cancelled state.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    pub flight_id: i64,
    pub quantity: i32,
    pub status: ReservationStatus,
    pub reference: String,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
    sqlx::Type,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
#[sqlx(type_name = "ENUM")]
pub enum ReservationStatus {
    #[sqlx(rename = "CONFIRMED")]
    Confirmed,
}

/// Insert payload for the ledger; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: i64,
    pub flight_id: i64,
    pub quantity: i32,
    pub status: ReservationStatus,
    pub reference: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct ReservationRequest {
    pub flight_id: i64,
    #[validate(range(min = 1, message = "reservation quantity must be at least 1"))]
    pub quantity: i32,
}

/// Reservation joined with catalog fields, for listing endpoints.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ReservationDetail {
    pub id: i64,
    pub reference: String,
    pub quantity: i32,
    pub status: ReservationStatus,
    pub flight_id: i64,
    pub origin: String,
    pub destination: String,
    pub flight_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub carrier: String,
    pub price: Decimal,
}
