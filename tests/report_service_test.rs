use async_trait::async_trait;
use skybook::utils::error::AppError;
use test_context::{test_context, AsyncTestContext};

mod common {
    pub mod test_utils;
}
use common::test_utils::TestApp;

struct ReportContext {
    app: TestApp,
}

#[async_trait]
impl AsyncTestContext for ReportContext {
    async fn setup() -> Self {
        ReportContext {
            app: TestApp::new(),
        }
    }

    async fn teardown(self) {}
}

#[test_context(ReportContext)]
#[tokio::test]
async fn manifest_lists_passengers_in_booking_order(ctx: &ReportContext) -> anyhow::Result<()> {
    let app = &ctx.app;
    let flight = app.seed_flight("Bogotá", "Medellín", 10).await;
    let other = app.seed_flight("Cali", "Cartagena", 10).await;
    app.register_user("ana@example.com").await;
    app.register_user("bruno@example.com").await;

    let first = app
        .reservation_service
        .create(flight.id, "ana@example.com", 2)
        .await?;
    app.reservation_service
        .create(flight.id, "bruno@example.com", 1)
        .await?;
    // a booking on another flight must not leak into the manifest
    app.reservation_service
        .create(other.id, "bruno@example.com", 3)
        .await?;

    let report = app.report_service.passenger_manifest(flight.id).await?;

    assert_eq!(report.flight.id, flight.id);
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].username, "ana@example.com");
    assert_eq!(report.rows[0].quantity, 2);
    assert_eq!(report.rows[0].reference, first.reference);
    assert_eq!(report.rows[1].username, "bruno@example.com");
    assert_eq!(report.rows[1].quantity, 1);

    Ok(())
}

#[test_context(ReportContext)]
#[tokio::test]
async fn manifest_exports_as_csv(ctx: &ReportContext) -> anyhow::Result<()> {
    let app = &ctx.app;
    let flight = app.seed_flight("Bogotá", "Medellín", 10).await;
    app.register_user("ana@example.com").await;

    app.reservation_service
        .create(flight.id, "ana@example.com", 2)
        .await?;

    let report = app.report_service.passenger_manifest(flight.id).await?;
    let csv = report.to_csv();

    let lines: Vec<&str> = csv.trim_end().lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "reference,username,full_name,seats");
    assert!(lines[1].contains("ana@example.com"));
    assert!(lines[1].ends_with(",2"));

    Ok(())
}

#[test_context(ReportContext)]
#[tokio::test]
async fn manifest_for_missing_flight_is_not_found(ctx: &ReportContext) {
    let err = ctx
        .app
        .report_service
        .passenger_manifest(404)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::FlightNotFound(404)));
}

#[test_context(ReportContext)]
#[tokio::test]
async fn cancelled_reservations_leave_the_manifest(ctx: &ReportContext) -> anyhow::Result<()> {
    let app = &ctx.app;
    let flight = app.seed_flight("Bogotá", "Medellín", 10).await;
    app.register_user("ana@example.com").await;

    let reservation = app
        .reservation_service
        .create(flight.id, "ana@example.com", 2)
        .await?;
    app.reservation_service
        .cancel(reservation.id, "ana@example.com")
        .await?;

    let report = app.report_service.passenger_manifest(flight.id).await?;
    assert!(report.rows.is_empty());

    Ok(())
}
