//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Lifecycle rules (timestamps, soft removal,
//! reference validation) live in [`crate::application::services`].
//!
//! # Entity Types
//!
//! - [`Car`] - A registered vehicle, owned by a [`Brand`] and registered in a [`Country`]
//! - [`Brand`] - A vehicle brand belonging to a company
//! - [`Country`] - A country of registration
//! - [`Link`] - Transient hypermedia link attached to responses, never persisted
//!
//! # Design Pattern
//!
//! Stored entities carry their generated identifier; creation inputs are separate
//! structs without one (`NewCar`, `NewBrand`, `NewCountry`). [`CarDraft`] is the
//! unvalidated car input handed to the car service by REST and the command queue.

pub mod brand;
pub mod car;
pub mod country;
pub mod link;

pub use brand::{Brand, NewBrand};
pub use car::{Car, CarDraft, NewCar};
pub use country::{Country, NewCountry};
pub use link::Link;

/// Case-insensitive name comparison, folding Unicode the way `LOWER()` does.
pub fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// A persisted record with a generated identifier.
///
/// Implemented by every entity stored through
/// [`crate::domain::repositories::Repository`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// Input used to create a new record of this type.
    type New: Send + 'static;

    /// Capitalized entity name used in error messages.
    const KIND: &'static str;

    fn id(&self) -> i64;
}
