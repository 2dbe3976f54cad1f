use crate::models::flight::{Flight, FlightCreateRequest, FlightUpdateRequest};
use crate::services::catalog_service::CatalogService;
use crate::utils::error::AppError;
use crate::utils::jwt::AdminUser;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use rocket_okapi::openapi;

/// List the whole catalog
#[openapi(tag = "Flights")]
#[get("/flights")]
pub async fn list_flights(catalog: &State<CatalogService>) -> Result<Json<Vec<Flight>>, AppError> {
    Ok(Json(catalog.list().await?))
}

/// Search flights by route
#[openapi(tag = "Flights")]
#[get("/flights/search?<origin>&<destination>")]
pub async fn search_flights(
    origin: String,
    destination: String,
    catalog: &State<CatalogService>,
) -> Result<Json<Vec<Flight>>, AppError> {
    Ok(Json(catalog.search(&origin, &destination).await?))
}

/// Add a flight to the catalog
#[openapi(tag = "Flights")]
#[post("/flights", format = "json", data = "<request>")]
pub async fn create_flight(
    request: Json<FlightCreateRequest>,
    _admin: AdminUser,
    catalog: &State<CatalogService>,
) -> Result<Json<Flight>, AppError> {
    Ok(Json(catalog.create(request.into_inner()).await?))
}

/// Replace a flight's catalog fields
#[openapi(tag = "Flights")]
#[put("/flights/<id>", format = "json", data = "<request>")]
pub async fn update_flight(
    id: i64,
    request: Json<FlightUpdateRequest>,
    _admin: AdminUser,
    catalog: &State<CatalogService>,
) -> Result<Json<Flight>, AppError> {
    Ok(Json(catalog.update(id, request.into_inner()).await?))
}

/// Remove a flight from the catalog
#[openapi(tag = "Flights")]
#[delete("/flights/<id>")]
pub async fn delete_flight(
    id: i64,
    _admin: AdminUser,
    catalog: &State<CatalogService>,
) -> Result<Json<Value>, AppError> {
    catalog.delete(id).await?;
    Ok(Json(json!({ "status": "deleted", "flight_id": id })))
}
