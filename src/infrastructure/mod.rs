//! Infrastructure layer for external integrations.
//!
//! Implements the contracts defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-memory repositories
//! - [`messaging`] - Bounded in-process car command queue
//! - [`scheduler`] - Periodic task runner

pub mod messaging;
pub mod persistence;
pub mod scheduler;
