//! # WattBox session core
//!
//! Drives one outlet command against one device:
//!
//! 1. **Probe** `/main` without credentials and follow a single HTTP to HTTPS upgrade.
//! 2. **Detect** Basic or Digest from the probe's `WWW-Authenticate` header.
//! 3. **Authenticate** by requesting `/main` again with the chosen scheme.
//! 4. **Dispatch** `/outlet/{action}?o={outlet}` over the same session.
//!
//! Every step runs to completion before the next one starts and any failure
//! ends the run with a [`SessionError`].

pub mod auth;
pub mod client;
pub mod error;
pub mod session;

pub use client::SessionConfig;
pub use error::SessionError;
pub use session::{CommandReport, DeviceSession, Stage};

pub use reqwest::StatusCode;
