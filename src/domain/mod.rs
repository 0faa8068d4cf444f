//! Domain layer containing business entities and contracts.
//!
//! Nothing here depends on the database, HTTP or the runtime wiring. Repository
//! traits are implemented in `crate::infrastructure`, lifecycle rules live in
//! [`crate::application::services`].
//!
//! # Architecture
//!
//! - [`entities`] - Car, Brand, Country and transient links
//! - [`repositories`] - Persistence facade traits
//! - [`clock`] - Injected time source
//! - [`car_command`] - Queue commands and the producer trait
//! - [`periodic_task`] - Jobs driven by the scheduler

pub mod car_command;
pub mod clock;
pub mod entities;
pub mod periodic_task;
pub mod repositories;
