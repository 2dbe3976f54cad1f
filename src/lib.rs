//! Flight-booking backend: a flight catalog with finite seat inventory,
//! authenticated reservations with a no-oversell guarantee, and
//! administrative reporting, exposed over a Rocket HTTP API.

#[macro_use]
extern crate rocket;
extern crate rocket_okapi;

pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod swagger;
pub mod utils;

use crate::models::flight::FlightCreateRequest;
use crate::services::catalog_service::CatalogService;
use crate::services::report_service::ReportService;
use crate::services::reservation_service::ReservationService;
use crate::services::user_service::UserService;
use crate::store::locks::FlightLockRegistry;
use crate::store::memory::{MemoryFlightStore, MemoryReservationStore, MemoryUserStore};
use crate::store::mysql::{self, MySqlFlightStore, MySqlReservationStore, MySqlUserStore};
use crate::store::{FlightStore, ReservationStore, UserStore};
use crate::utils::config::Config;
use crate::utils::error::AppResult;
use crate::utils::jwt::AuthSettings;
use chrono::NaiveTime;
use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};
use rocket_okapi::openapi_get_routes;
use rocket_okapi::rapidoc::make_rapidoc;
use rocket_okapi::swagger_ui::make_swagger_ui;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Assemble the application: pick the store backend, wire the services
/// and mount the API.
pub async fn build_rocket(config: Config) -> AppResult<Rocket<Build>> {
    let (flights, reservations, users): (
        Arc<dyn FlightStore>,
        Arc<dyn ReservationStore>,
        Arc<dyn UserStore>,
    ) = match &config.database_url {
        Some(url) => {
            let pool = mysql::connect(url).await?;
            mysql::migrate(&pool).await?;
            tracing::info!("using the MySQL store backend");
            (
                Arc::new(MySqlFlightStore::new(pool.clone())),
                Arc::new(MySqlReservationStore::new(pool.clone())),
                Arc::new(MySqlUserStore::new(pool)),
            )
        }
        None => {
            tracing::info!("DATABASE_URL not set, using the in-memory store backend");
            (
                Arc::new(MemoryFlightStore::new()),
                Arc::new(MemoryReservationStore::new()),
                Arc::new(MemoryUserStore::new()),
            )
        }
    };

    let auth = AuthSettings {
        secret: config.jwt_secret.clone(),
        token_ttl_hours: config.token_ttl_hours,
    };
    let locks = Arc::new(FlightLockRegistry::new());

    let user_service = UserService::new(users.clone(), auth);
    let catalog_service = CatalogService::new(flights.clone());
    let reservation_service =
        ReservationService::new(flights.clone(), reservations.clone(), users.clone(), locks);
    let report_service = ReportService::new(
        catalog_service.clone(),
        reservation_service.clone(),
        users.clone(),
    );

    if config.database_url.is_none() {
        seed_demo_catalog(&catalog_service).await?;
    }

    Ok(rocket::build()
        .manage(config)
        .manage(user_service)
        .manage(catalog_service)
        .manage(reservation_service)
        .manage(report_service)
        .mount(
            "/api",
            openapi_get_routes![
                routes::auth_route::register,
                routes::auth_route::login,
                routes::flight_route::list_flights,
                routes::flight_route::search_flights,
                routes::flight_route::create_flight,
                routes::flight_route::update_flight,
                routes::flight_route::delete_flight,
                routes::reservation_route::create_reservation,
                routes::reservation_route::my_reservations,
                routes::reservation_route::cancel_reservation,
                routes::reservation_route::reservations_by_user,
                routes::reservation_route::reservations_by_flight,
                routes::reservation_route::purge_reservations,
                routes::user_route::me,
                routes::user_route::update_me,
                routes::user_route::list_users,
                routes::report_route::flight_manifest,
                routes::report_route::flight_manifest_csv,
            ],
        )
        .mount("/swagger", make_swagger_ui(&swagger::swagger_ui()))
        .mount("/rapidoc", make_rapidoc(&swagger::rapidoc()))
        .attach(AdHoc::on_response("CORS", |_, res| {
            Box::pin(async move {
                res.set_header(rocket::http::Header::new(
                    "Access-Control-Allow-Origin",
                    "*",
                ));
            })
        })))
}

/// Seed a couple of routes when running on the in-memory backend, so a
/// fresh instance is browsable right away.
async fn seed_demo_catalog(catalog: &CatalogService) -> AppResult<()> {
    if !catalog.list().await?.is_empty() {
        return Ok(());
    }

    let next_month = chrono::Utc::now().date_naive() + chrono::Duration::days(30);
    let seeds = [
        ("Bogotá", "Medellín", 300_000_00i64, 12, 14, 150),
        ("Cali", "Cartagena", 350_000_00i64, 15, 17, 180),
    ];

    for (origin, destination, price_cents, departs, arrives, seats) in seeds {
        catalog
            .create(FlightCreateRequest {
                origin: origin.to_string(),
                destination: destination.to_string(),
                flight_date: next_month,
                departure_time: NaiveTime::from_hms_opt(departs, 0, 0)
                    .expect("valid seed departure time"),
                arrival_time: NaiveTime::from_hms_opt(arrives, 0, 0)
                    .expect("valid seed arrival time"),
                carrier: "AndesAir".to_string(),
                price: Decimal::new(price_cents, 2),
                available_seats: seats,
            })
            .await?;
    }

    Ok(())
}
