use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use skybook::models::flight::{FlightCreateRequest, FlightUpdateRequest};
use skybook::utils::error::AppError;
use test_context::{test_context, AsyncTestContext};

mod common {
    pub mod test_utils;
}
use common::test_utils::TestApp;

struct CatalogContext {
    app: TestApp,
}

#[async_trait]
impl AsyncTestContext for CatalogContext {
    async fn setup() -> Self {
        CatalogContext {
            app: TestApp::new(),
        }
    }

    async fn teardown(self) {}
}

fn create_request(origin: &str, destination: &str, seats: i32) -> FlightCreateRequest {
    FlightCreateRequest {
        origin: origin.to_string(),
        destination: destination.to_string(),
        flight_date: NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(),
        departure_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
        arrival_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        carrier: "AndesAir".to_string(),
        price: Decimal::new(420_000_00, 2),
        available_seats: seats,
    }
}

#[test_context(CatalogContext)]
#[tokio::test]
async fn create_and_list_flights(ctx: &CatalogContext) -> Result<(), AppError> {
    let app = &ctx.app;

    let flight = app
        .catalog_service
        .create(create_request("Bogotá", "Medellín", 150))
        .await?;
    assert!(flight.id > 0);
    assert_eq!(flight.available_seats, 150);

    app.catalog_service
        .create(create_request("Cali", "Cartagena", 180))
        .await?;

    let all = app.catalog_service.list().await?;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].origin, "Bogotá");
    assert_eq!(all[1].origin, "Cali");

    Ok(())
}

#[test_context(CatalogContext)]
#[tokio::test]
async fn search_matches_exact_route(ctx: &CatalogContext) -> Result<(), AppError> {
    let app = &ctx.app;
    app.catalog_service
        .create(create_request("Bogotá", "Medellín", 150))
        .await?;
    app.catalog_service
        .create(create_request("Bogotá", "Cali", 120))
        .await?;

    let found = app.catalog_service.search("Bogotá", "Medellín").await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].destination, "Medellín");

    let none = app.catalog_service.search("Medellín", "Bogotá").await?;
    assert!(none.is_empty());

    Ok(())
}

#[test_context(CatalogContext)]
#[tokio::test]
async fn update_replaces_catalog_fields(ctx: &CatalogContext) -> Result<(), AppError> {
    let app = &ctx.app;
    let flight = app
        .catalog_service
        .create(create_request("Bogotá", "Medellín", 150))
        .await?;

    let updated = app
        .catalog_service
        .update(
            flight.id,
            FlightUpdateRequest {
                origin: "Bogotá".to_string(),
                destination: "Santa Marta".to_string(),
                flight_date: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
                departure_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                arrival_time: NaiveTime::from_hms_opt(10, 45, 0).unwrap(),
                carrier: "AndesAir".to_string(),
                price: Decimal::new(510_000_00, 2),
                available_seats: 140,
            },
        )
        .await?;

    assert_eq!(updated.destination, "Santa Marta");
    assert_eq!(updated.available_seats, 140);

    let reloaded = app.catalog_service.get(flight.id).await?;
    assert_eq!(reloaded.destination, "Santa Marta");

    Ok(())
}

#[test_context(CatalogContext)]
#[tokio::test]
async fn update_and_delete_report_missing_flights(ctx: &CatalogContext) {
    let app = &ctx.app;

    let err = app
        .catalog_service
        .update(404, {
            let request = create_request("Bogotá", "Medellín", 10);
            FlightUpdateRequest {
                origin: request.origin,
                destination: request.destination,
                flight_date: request.flight_date,
                departure_time: request.departure_time,
                arrival_time: request.arrival_time,
                carrier: request.carrier,
                price: request.price,
                available_seats: request.available_seats,
            }
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::FlightNotFound(404)));

    let err = app.catalog_service.delete(404).await.unwrap_err();
    assert!(matches!(err, AppError::FlightNotFound(404)));
}

#[test_context(CatalogContext)]
#[tokio::test]
async fn delete_removes_flight(ctx: &CatalogContext) -> Result<(), AppError> {
    let app = &ctx.app;
    let flight = app
        .catalog_service
        .create(create_request("Bogotá", "Medellín", 150))
        .await?;

    app.catalog_service.delete(flight.id).await?;
    assert!(app.catalog_service.list().await?.is_empty());

    let err = app.catalog_service.get(flight.id).await.unwrap_err();
    assert!(matches!(err, AppError::FlightNotFound(_)));

    Ok(())
}

#[test_context(CatalogContext)]
#[tokio::test]
async fn create_validates_input(ctx: &CatalogContext) {
    let app = &ctx.app;

    let mut request = create_request("", "Medellín", 150);
    let err = app.catalog_service.create(request).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    request = create_request("Bogotá", "Medellín", -5);
    let err = app.catalog_service.create(request).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[test_context(CatalogContext)]
#[tokio::test]
async fn store_refuses_negative_seat_counters(ctx: &CatalogContext) -> Result<(), AppError> {
    let app = &ctx.app;
    let mut flight = app
        .catalog_service
        .create(create_request("Bogotá", "Medellín", 3))
        .await?;

    flight.available_seats = -1;
    let err = app.flights.save(&flight).await.unwrap_err();
    assert!(matches!(err, AppError::InvariantViolation(_)));

    // the stored counter is untouched
    assert_eq!(app.seats_left(flight.id).await, 3);

    Ok(())
}
