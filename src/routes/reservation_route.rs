use crate::models::reservation::{Reservation, ReservationDetail, ReservationRequest};
use crate::services::reservation_service::ReservationService;
use crate::utils::error::AppError;
use crate::utils::jwt::{AdminUser, AuthenticatedUser};
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use rocket_okapi::openapi;
use validator::Validate;

/// Reserve seats on a flight
#[openapi(tag = "Reservations")]
#[post("/reservations", format = "json", data = "<request>")]
pub async fn create_reservation(
    request: Json<ReservationRequest>,
    auth: AuthenticatedUser,
    reservation_service: &State<ReservationService>,
) -> Result<Json<Reservation>, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let reservation = reservation_service
        .create(request.flight_id, &auth.username, request.quantity)
        .await?;

    Ok(Json(reservation))
}

/// The calling user's reservations
#[openapi(tag = "Reservations")]
#[get("/reservations/me")]
pub async fn my_reservations(
    auth: AuthenticatedUser,
    reservation_service: &State<ReservationService>,
) -> Result<Json<Vec<ReservationDetail>>, AppError> {
    Ok(Json(
        reservation_service.list_by_user(&auth.username).await?,
    ))
}

/// Cancel a reservation owned by the calling user
#[openapi(tag = "Reservations")]
#[delete("/reservations/<id>")]
pub async fn cancel_reservation(
    id: i64,
    auth: AuthenticatedUser,
    reservation_service: &State<ReservationService>,
) -> Result<Json<Value>, AppError> {
    reservation_service.cancel(id, &auth.username).await?;
    Ok(Json(json!({ "status": "cancelled", "reservation_id": id })))
}

/// Any user's reservations, for administration
#[openapi(tag = "Reservations")]
#[get("/reservations/user/<user_id>")]
pub async fn reservations_by_user(
    user_id: i64,
    _admin: AdminUser,
    reservation_service: &State<ReservationService>,
) -> Result<Json<Vec<ReservationDetail>>, AppError> {
    Ok(Json(reservation_service.list_for_user_id(user_id).await?))
}

/// All reservations on a flight
#[openapi(tag = "Reservations")]
#[get("/reservations/flight/<flight_id>")]
pub async fn reservations_by_flight(
    flight_id: i64,
    _admin: AdminUser,
    reservation_service: &State<ReservationService>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    Ok(Json(reservation_service.list_by_flight(flight_id).await?))
}

/// Drop every reservation without touching seat counters.
/// Environment reset only; see the service docs.
#[openapi(tag = "Reservations")]
#[delete("/reservations/all")]
pub async fn purge_reservations(
    _admin: AdminUser,
    reservation_service: &State<ReservationService>,
) -> Result<Json<Value>, AppError> {
    let dropped = reservation_service.purge_all().await?;
    Ok(Json(json!({ "status": "purged", "dropped": dropped })))
}
