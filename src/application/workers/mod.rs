//! Background consumers that re-enter the car service outside of HTTP.
//!
//! - [`car_command_worker`] - Applies queued car commands
//! - [`soft_removed_sweep`] - Periodic hard delete of soft-removed cars

pub mod car_command_worker;
pub mod soft_removed_sweep;

pub use car_command_worker::{handle_car_command, run_car_command_worker};
pub use soft_removed_sweep::{SoftRemovedSweep, SweepReport};
