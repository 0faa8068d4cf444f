//! DTOs for the car command queue endpoint.
//!
//! Wire shape:
//!
//! ```json
//! {"operation":"UPDATE","car":{"id":1,"brand":{"id":2},"country":{"id":3}}}
//! ```

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::car::EntityRef;
use crate::domain::car_command::{CarCommand, CarOperation};
use crate::domain::entities::CarDraft;
use crate::error::AppError;

#[derive(Debug, Deserialize, Validate)]
pub struct CarCommandRequest {
    pub operation: CarOperation,

    #[validate(nested)]
    pub car: CarPayload,
}

/// Car body of a command. Which fields are required depends on the operation.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CarPayload {
    pub id: Option<i64>,

    #[validate(nested)]
    pub brand: Option<EntityRef>,

    #[validate(nested)]
    pub country: Option<EntityRef>,
}

impl CarPayload {
    fn draft(&self) -> CarDraft {
        CarDraft {
            brand_id: self.brand.map(|b| b.id),
            country_id: self.country.map(|c| c.id),
        }
    }

    fn require_id(&self) -> Result<i64, AppError> {
        match self.id {
            Some(id) if id >= 1 => Ok(id),
            _ => Err(AppError::bad_request(
                "UPDATE and DELETE commands need a car id greater than zero",
            )),
        }
    }
}

impl TryFrom<CarCommandRequest> for CarCommand {
    type Error = AppError;

    /// Reference checks are left to the consumer, which applies the same
    /// validation as the REST endpoints.
    fn try_from(request: CarCommandRequest) -> Result<Self, Self::Error> {
        let car = request.car;
        match request.operation {
            CarOperation::Create => Ok(CarCommand::Create(car.draft())),
            CarOperation::Update => Ok(CarCommand::Update {
                id: car.require_id()?,
                draft: car.draft(),
            }),
            CarOperation::Delete => Ok(CarCommand::Delete {
                id: car.require_id()?,
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarCommandAccepted {
    pub operation: CarOperation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_id: Option<i64>,
}
