//! Handler for the car command queue endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::car_command::{CarCommandAccepted, CarCommandRequest};
use crate::api::extract::ValidatedJson;
use crate::domain::car_command::CarCommand;
use crate::error::AppError;
use crate::state::AppState;

/// Enqueues a car mutation for the background consumer.
///
/// # Endpoint
///
/// `POST /api/cars/commands`
///
/// # Request Body
///
/// ```json
/// {"operation":"UPDATE","car":{"id":1,"brand":{"id":2},"country":{"id":3}}}
/// ```
///
/// The command is applied asynchronously; reference errors are only logged by
/// the consumer.
///
/// # Errors
///
/// Returns 400 if an UPDATE or DELETE command has no valid car id.
/// Returns 503 if the queue is full or closed.
pub async fn enqueue_car_command_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CarCommandRequest>,
) -> Result<(StatusCode, Json<CarCommandAccepted>), AppError> {
    let command = CarCommand::try_from(payload)?;

    let accepted = CarCommandAccepted {
        operation: command.operation(),
        car_id: match &command {
            CarCommand::Create(_) => None,
            CarCommand::Update { id, .. } | CarCommand::Delete { id } => Some(*id),
        },
    };

    state.car_commands.send(command).await?;

    Ok((StatusCode::ACCEPTED, Json(accepted)))
}
