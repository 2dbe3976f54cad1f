use crate::models::report::ManifestReport;
use crate::services::report_service::ReportService;
use crate::utils::error::AppError;
use crate::utils::jwt::AdminUser;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// Passenger manifest for a flight
#[openapi(tag = "Reports")]
#[get("/reports/flights/<flight_id>/manifest")]
pub async fn flight_manifest(
    flight_id: i64,
    _admin: AdminUser,
    report_service: &State<ReportService>,
) -> Result<Json<ManifestReport>, AppError> {
    Ok(Json(report_service.passenger_manifest(flight_id).await?))
}

/// Passenger manifest as CSV text
#[openapi(tag = "Reports")]
#[get("/reports/flights/<flight_id>/manifest.csv")]
pub async fn flight_manifest_csv(
    flight_id: i64,
    _admin: AdminUser,
    report_service: &State<ReportService>,
) -> Result<String, AppError> {
    let report = report_service.passenger_manifest(flight_id).await?;
    Ok(report.to_csv())
}
