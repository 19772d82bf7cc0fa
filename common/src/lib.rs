//! Shared building blocks for the WattBox controller.
//!
//! * **[`device`]**: value types describing the device and the command sent to it.
//! * **[`config`]**: run-wide settings handed down from the command line.
//! * **[`macros`]**: logging shortcuts used by every crate in the workspace.

pub mod config;
pub mod device;
pub mod macros;
