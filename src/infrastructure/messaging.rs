//! In-process car command queue.

use async_trait::async_trait;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::car_command::{CarCommand, CarCommandSender};
use crate::error::AppError;

/// Producer over a bounded `tokio::sync::mpsc` channel.
///
/// Never waits for capacity: a full or closed queue is reported immediately as
/// [`AppError::ServiceUnavailable`].
#[derive(Clone)]
pub struct ChannelCarCommandSender {
    tx: mpsc::Sender<CarCommand>,
}

impl ChannelCarCommandSender {
    pub fn new(tx: mpsc::Sender<CarCommand>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl CarCommandSender for ChannelCarCommandSender {
    async fn send(&self, command: CarCommand) -> Result<(), AppError> {
        let operation = command.operation();

        match self.tx.try_send(command) {
            Ok(()) => {
                tracing::debug!(?operation, "Car command enqueued");
                Ok(())
            }
            Err(TrySendError::Full(_)) => {
                tracing::warn!(?operation, "Car command queue is full");
                Err(AppError::service_unavailable(
                    "The car command queue is full, try again later",
                ))
            }
            Err(TrySendError::Closed(_)) => Err(AppError::service_unavailable(
                "The car command queue is closed",
            )),
        }
    }

    fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}
