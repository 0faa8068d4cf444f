//! Generic persistence facade.

use async_trait::async_trait;

use crate::domain::entities::Entity;
use crate::error::AppError;

/// `NotFound` error naming the entity kind, e.g. `Car with id 7 not found`.
pub fn record_not_found<E: Entity>(id: i64) -> AppError {
    AppError::not_found(format!("{} with id {id} not found", E::KIND))
}

/// Basic storage operations available for every entity type.
///
/// Implementations never apply lifecycle rules: `get_all` and `get` return
/// soft-removed cars like any other row. Filtering is the service layer's job.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Returns every stored record ordered by id.
    async fn get_all(&self) -> Result<Vec<E>, AppError>;

    /// Finds a record by id.
    async fn get(&self, id: i64) -> Result<Option<E>, AppError>;

    /// Inserts a record and returns it with its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AlreadyExists`] on a uniqueness violation.
    async fn add(&self, new: E::New) -> Result<E, AppError>;

    /// Replaces the stored record with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has that id.
    /// Returns [`AppError::AlreadyExists`] on a uniqueness violation.
    async fn update(&self, entity: E) -> Result<E, AppError>;

    /// Deletes a record and returns what was removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has that id.
    /// Returns [`AppError::BadRequest`] if the record is still referenced.
    async fn delete(&self, id: i64) -> Result<E, AppError>;

    /// Cheap liveness check of the backing store, without reading any rows.
    async fn health_check(&self) -> Result<(), AppError>;
}
