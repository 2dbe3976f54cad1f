use crate::models::report::{ManifestReport, ManifestRow};
use crate::services::catalog_service::CatalogService;
use crate::services::reservation_service::ReservationService;
use crate::store::UserStore;
use crate::utils::error::AppResult;
use std::sync::Arc;

/// Read-only reporting over the reservation ledger and the user
/// directory. PDF rendering is left to downstream consumers; the export
/// here is plain CSV text.
#[derive(Clone)]
pub struct ReportService {
    catalog: CatalogService,
    reservations: ReservationService,
    users: Arc<dyn UserStore>,
}

impl ReportService {
    pub fn new(
        catalog: CatalogService,
        reservations: ReservationService,
        users: Arc<dyn UserStore>,
    ) -> Self {
        ReportService {
            catalog,
            reservations,
            users,
        }
    }

    pub async fn passenger_manifest(&self, flight_id: i64) -> AppResult<ManifestReport> {
        let flight = self.catalog.get(flight_id).await?;
        let reservations = self.reservations.list_by_flight(flight_id).await?;

        let mut rows = Vec::with_capacity(reservations.len());
        for reservation in reservations {
            match self.users.get(reservation.user_id).await? {
                Some(user) => rows.push(ManifestRow {
                    reference: reservation.reference,
                    username: user.username,
                    full_name: user.full_name,
                    quantity: reservation.quantity,
                }),
                None => {
                    tracing::warn!(
                        reservation_id = reservation.id,
                        user_id = reservation.user_id,
                        "reservation references an unknown user, skipping"
                    );
                }
            }
        }

        Ok(ManifestReport { flight, rows })
    }
}
