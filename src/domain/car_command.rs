//! Car mutation commands delivered through the in-process queue.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::CarDraft;
use crate::error::AppError;

/// Operation discriminator carried by every command on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CarOperation {
    Create,
    Update,
    Delete,
}

/// A car mutation to be applied by the queue consumer.
///
/// Each variant maps onto one [`crate::application::services::CarService`] call.
/// `Delete` is a physical delete, unlike `DELETE /api/cars/{id}` which soft-removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarCommand {
    Create(CarDraft),
    Update { id: i64, draft: CarDraft },
    Delete { id: i64 },
}

impl CarCommand {
    pub fn operation(&self) -> CarOperation {
        match self {
            CarCommand::Create(_) => CarOperation::Create,
            CarCommand::Update { .. } => CarOperation::Update,
            CarCommand::Delete { .. } => CarOperation::Delete,
        }
    }
}

/// Producer side of the car command queue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarCommandSender: Send + Sync {
    /// Enqueues a command without waiting for it to be applied.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ServiceUnavailable`] if the queue is full or closed.
    async fn send(&self, command: CarCommand) -> Result<(), AppError>;

    /// Whether the consumer side is still attached.
    fn is_open(&self) -> bool;
}
