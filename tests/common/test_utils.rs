use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use skybook::models::flight::{Flight, NewFlight};
use skybook::models::reservation::{NewReservation, Reservation};
use skybook::models::user::{RegisterRequest, Role};
use skybook::services::catalog_service::CatalogService;
use skybook::services::report_service::ReportService;
use skybook::services::reservation_service::ReservationService;
use skybook::services::user_service::UserService;
use skybook::store::locks::FlightLockRegistry;
use skybook::store::memory::{MemoryFlightStore, MemoryReservationStore, MemoryUserStore};
use skybook::store::{FlightStore, ReservationStore, UserStore};
use skybook::utils::error::{AppError, AppResult};
use skybook::utils::jwt::AuthSettings;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const TEST_PASSWORD: &str = "correct-horse-battery";
pub const TEST_JWT_SECRET: &str = "test-secret";

/// Everything wired over fresh in-memory stores; one per test.
pub struct TestApp {
    pub flights: Arc<dyn FlightStore>,
    pub reservations: Arc<dyn ReservationStore>,
    pub users: Arc<dyn UserStore>,
    pub locks: Arc<FlightLockRegistry>,
    pub user_service: UserService,
    pub catalog_service: CatalogService,
    pub reservation_service: ReservationService,
    pub report_service: ReportService,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_reservation_store(Arc::new(MemoryReservationStore::new()))
    }

    /// Swap in a different ledger, e.g. one that injects failures.
    pub fn with_reservation_store(reservations: Arc<dyn ReservationStore>) -> Self {
        let flights: Arc<dyn FlightStore> = Arc::new(MemoryFlightStore::new());
        let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
        let locks = Arc::new(FlightLockRegistry::new());

        let auth = AuthSettings {
            secret: TEST_JWT_SECRET.to_string(),
            token_ttl_hours: 1,
        };

        let user_service = UserService::new(users.clone(), auth);
        let catalog_service = CatalogService::new(flights.clone());
        let reservation_service = ReservationService::new(
            flights.clone(),
            reservations.clone(),
            users.clone(),
            locks.clone(),
        );
        let report_service = ReportService::new(
            catalog_service.clone(),
            reservation_service.clone(),
            users.clone(),
        );

        TestApp {
            flights,
            reservations,
            users,
            locks,
            user_service,
            catalog_service,
            reservation_service,
            report_service,
        }
    }

    pub async fn seed_flight(&self, origin: &str, destination: &str, seats: i32) -> Flight {
        self.flights
            .insert(NewFlight {
                origin: origin.to_string(),
                destination: destination.to_string(),
                flight_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                departure_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                arrival_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                carrier: "AndesAir".to_string(),
                price: Decimal::new(250_000_00, 2),
                available_seats: seats,
            })
            .await
            .expect("seeding a flight should not fail")
    }

    pub async fn register_user(&self, username: &str) -> i64 {
        self.register_user_with_role(username, None).await
    }

    pub async fn register_admin(&self, username: &str) -> i64 {
        self.register_user_with_role(username, Some(Role::Admin)).await
    }

    async fn register_user_with_role(&self, username: &str, role: Option<Role>) -> i64 {
        self.user_service
            .register(RegisterRequest {
                username: username.to_string(),
                password: TEST_PASSWORD.to_string(),
                full_name: "Test Passenger".to_string(),
                role,
            })
            .await
            .expect("registering a test user should not fail")
    }

    pub async fn seats_left(&self, flight_id: i64) -> i32 {
        self.flights
            .get(flight_id)
            .await
            .expect("flight lookup should not fail")
            .expect("flight should exist")
            .available_seats
    }
}

/// Ledger wrapper that fails on demand, to exercise the all-or-nothing
/// guarantee of the counter-update/ledger-write pair.
pub struct FlakyReservationStore {
    inner: MemoryReservationStore,
    fail_insert: AtomicBool,
    fail_delete: AtomicBool,
}

impl FlakyReservationStore {
    pub fn new() -> Self {
        FlakyReservationStore {
            inner: MemoryReservationStore::new(),
            fail_insert: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
        }
    }

    pub fn fail_inserts(&self, on: bool) {
        self.fail_insert.store(on, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, on: bool) {
        self.fail_delete.store(on, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl ReservationStore for FlakyReservationStore {
    async fn insert(&self, new: NewReservation) -> AppResult<Reservation> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(AppError::StorageError(
                "injected ledger insert failure".to_string(),
            ));
        }
        self.inner.insert(new).await
    }

    async fn get(&self, id: i64) -> AppResult<Option<Reservation>> {
        self.inner.get(id).await
    }

    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Reservation>> {
        self.inner.list_by_user(user_id).await
    }

    async fn list_by_flight(&self, flight_id: i64) -> AppResult<Vec<Reservation>> {
        self.inner.list_by_flight(flight_id).await
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(AppError::StorageError(
                "injected ledger delete failure".to_string(),
            ));
        }
        self.inner.delete(id).await
    }

    async fn delete_all(&self) -> AppResult<u64> {
        self.inner.delete_all().await
    }
}
