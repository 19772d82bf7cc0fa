//! # Device Model
//!
//! Value types describing which WattBox to talk to, how to log in and what
//! to ask of it. Nothing here performs I/O.
//!
//! * [`target::Target`]: base address of the device.
//! * [`credentials::Credentials`]: login pair.
//! * [`auth::AuthScheme`]: authentication mechanism picked from the device's challenge.
//! * [`command::OutletCommand`]: outlet number plus [`command::Action`].

pub mod auth;
pub mod command;
pub mod credentials;
pub mod target;
