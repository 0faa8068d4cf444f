//! Periodic hard delete of soft-removed cars.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::services::CarService;
use crate::domain::periodic_task::PeriodicTask;
use crate::error::AppError;

/// Outcome of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub found: usize,
    pub removed: usize,
    pub failed: usize,
}

/// Lists every soft-removed car and removes each one.
///
/// A failed removal is logged and the sweep moves on to the next car.
pub struct SoftRemovedSweep {
    cars: Arc<CarService>,
}

impl SoftRemovedSweep {
    pub fn new(cars: Arc<CarService>) -> Self {
        Self { cars }
    }

    /// # Errors
    ///
    /// Fails only if listing the soft-removed cars fails.
    pub async fn sweep(&self) -> Result<SweepReport, AppError> {
        let pending = self.cars.get_all_soft_removed_cars().await?;
        let mut report = SweepReport {
            found: pending.len(),
            ..SweepReport::default()
        };

        for car in pending {
            match self.cars.remove_car(car.id).await {
                Ok(_) => report.removed += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(
                        car_id = car.id,
                        error = %e,
                        "Failed to remove soft-removed car"
                    );
                }
            }
        }

        Ok(report)
    }
}

#[async_trait]
impl PeriodicTask for SoftRemovedSweep {
    fn name(&self) -> &'static str {
        "soft-removed-sweep"
    }

    async fn run(&self) {
        match self.sweep().await {
            Ok(report) if report.found > 0 => {
                tracing::info!(
                    found = report.found,
                    removed = report.removed,
                    failed = report.failed,
                    "Soft-removed cars swept"
                );
            }
            Ok(_) => tracing::debug!("No soft-removed cars to sweep"),
            Err(e) => tracing::error!(error = %e, "Failed to list soft-removed cars"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::SystemClock;
    use crate::domain::entities::{Brand, Car, Country};
    use crate::domain::repositories::{MockBrandRepo, MockCarRepo, MockCountryRepo};
    use chrono::Utc;

    fn removed_car(id: i64) -> Car {
        let now = Utc::now();
        Car {
            id,
            brand: Brand::new(1, "Corolla", "Toyota"),
            country: Country::new(1, "Japan", "JP"),
            registration: now,
            created_at: now,
            last_updated: now,
            soft_removed: true,
        }
    }

    fn sweep_with(cars: MockCarRepo) -> SoftRemovedSweep {
        SoftRemovedSweep::new(Arc::new(CarService::new(
            Arc::new(cars),
            Arc::new(MockBrandRepo::new()),
            Arc::new(MockCountryRepo::new()),
            Arc::new(SystemClock),
        )))
    }

    #[tokio::test]
    async fn test_sweep_continues_after_failure() {
        let mut cars = MockCarRepo::new();
        cars.expect_find_soft_removed()
            .times(1)
            .returning(|| Ok(vec![removed_car(1), removed_car(2), removed_car(3)]));
        cars.expect_get().returning(|id| Ok(Some(removed_car(id))));
        cars.expect_delete().times(3).returning(|id| {
            if id == 2 {
                Err(AppError::internal("disk on fire"))
            } else {
                Ok(removed_car(id))
            }
        });

        let report = sweep_with(cars).sweep().await.unwrap();

        assert_eq!(
            report,
            SweepReport {
                found: 3,
                removed: 2,
                failed: 1
            }
        );
    }

    #[tokio::test]
    async fn test_sweep_nothing_pending() {
        let mut cars = MockCarRepo::new();
        cars.expect_find_soft_removed().returning(|| Ok(vec![]));
        cars.expect_delete().never();

        let report = sweep_with(cars).sweep().await.unwrap();

        assert_eq!(report, SweepReport::default());
    }

    #[tokio::test]
    async fn test_sweep_listing_failure() {
        let mut cars = MockCarRepo::new();
        cars.expect_find_soft_removed()
            .returning(|| Err(AppError::internal("connection refused")));

        assert!(sweep_with(cars).sweep().await.is_err());
    }
}
