//! Consumer side of the car command queue.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::CarService;
use crate::domain::car_command::CarCommand;
use crate::domain::entities::Car;
use crate::error::AppError;

/// Drains the queue until every sender is dropped.
///
/// A failing command is logged and skipped; the worker keeps consuming.
pub async fn run_car_command_worker(mut rx: mpsc::Receiver<CarCommand>, cars: Arc<CarService>) {
    tracing::info!("Car command worker started");

    while let Some(command) = rx.recv().await {
        let operation = command.operation();

        match handle_car_command(&cars, command).await {
            Ok(car) => {
                tracing::debug!(?operation, car_id = car.id, "Car command applied");
            }
            Err(e) => {
                tracing::warn!(?operation, error = %e, "Car command failed, skipping");
            }
        }
    }

    tracing::info!("Car command queue closed, worker stopped");
}

/// Dispatches one command to the matching [`CarService`] call.
///
/// `Delete` removes the car physically, skipping the soft-remove step.
pub async fn handle_car_command(cars: &CarService, command: CarCommand) -> Result<Car, AppError> {
    match command {
        CarCommand::Create(draft) => cars.add_car(draft).await,
        CarCommand::Update { id, draft } => cars.update_car(id, draft).await,
        CarCommand::Delete { id } => cars.remove_car(id).await,
    }
}
