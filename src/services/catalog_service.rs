use crate::models::flight::{Flight, FlightCreateRequest, FlightUpdateRequest};
use crate::store::FlightStore;
use crate::utils::error::{AppError, AppResult};
use std::sync::Arc;
use validator::Validate;

/// Catalog administration: flight CRUD and route search. Seat counters
/// are owned by the reservation manager once a flight exists; the only
/// catalog path that touches them is the admin full-replace update.
#[derive(Clone)]
pub struct CatalogService {
    flights: Arc<dyn FlightStore>,
}

impl CatalogService {
    pub fn new(flights: Arc<dyn FlightStore>) -> Self {
        CatalogService { flights }
    }

    pub async fn list(&self) -> AppResult<Vec<Flight>> {
        self.flights.list().await
    }

    pub async fn get(&self, id: i64) -> AppResult<Flight> {
        self.flights
            .get(id)
            .await?
            .ok_or(AppError::FlightNotFound(id))
    }

    pub async fn search(&self, origin: &str, destination: &str) -> AppResult<Vec<Flight>> {
        self.flights.search(origin, destination).await
    }

    pub async fn create(&self, request: FlightCreateRequest) -> AppResult<Flight> {
        request.validate()?;
        let flight = self.flights.insert(request.into()).await?;
        tracing::info!(
            flight_id = flight.id,
            origin = %flight.origin,
            destination = %flight.destination,
            seats = flight.available_seats,
            "flight created"
        );
        Ok(flight)
    }

    pub async fn update(&self, id: i64, request: FlightUpdateRequest) -> AppResult<Flight> {
        request.validate()?;

        let mut flight = self
            .flights
            .get(id)
            .await?
            .ok_or(AppError::FlightNotFound(id))?;

        flight.origin = request.origin;
        flight.destination = request.destination;
        flight.flight_date = request.flight_date;
        flight.departure_time = request.departure_time;
        flight.arrival_time = request.arrival_time;
        flight.carrier = request.carrier;
        flight.price = request.price;
        flight.available_seats = request.available_seats;

        self.flights.save(&flight).await?;
        Ok(flight)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.flights.delete(id).await? {
            return Err(AppError::FlightNotFound(id));
        }
        tracing::info!(flight_id = id, "flight deleted");
        Ok(())
    }
}
