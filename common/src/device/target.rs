//! # Device Target Model
//!
//! Defines the base address every request of a run is built from.
//!
//! A target is the scheme and host of the WattBox, optionally with a port or
//! a path prefix, for example:
//! * `http://172.16.19.184`
//! * `https://wattbox.local:8443`
//! * `http://10.0.0.1/`, stored without the trailing slash.
//!
//! The address may be replaced once while negotiating, when the device
//! redirects plain HTTP to HTTPS (see [`Target::upgrade_from_location`]).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::device::command::OutletCommand;

/// Page requested by the probe and the authentication handshake.
pub const LANDING_PATH: &str = "/main";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("device address is empty")]
    Empty,
    #[error("invalid device address '{input}': {source}")]
    Malformed {
        input: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),
    #[error("device address '{0}' has no host")]
    MissingHost(String),
}

/// Base address of a WattBox, kept without trailing slashes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    base: String,
}

impl FromStr for Target {
    type Err = TargetError;

    /// Parses a base address.
    ///
    /// Supported formats:
    /// * **Scheme and host**: "http://10.0.0.1", "https://wattbox.local".
    /// * **With port**: "http://10.0.0.1:8080".
    /// * **With path prefix**: "http://gateway/wattbox".
    ///
    /// Trailing slashes are dropped, only `http` and `https` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(TargetError::Empty);
        }

        let url = Url::parse(trimmed).map_err(|source| TargetError::Malformed {
            input: s.to_string(),
            source,
        })?;

        check_scheme(&url)?;

        if url.host_str().is_none_or(str::is_empty) {
            return Err(TargetError::MissingHost(s.to_string()));
        }

        Ok(Self {
            base: trimmed.to_string(),
        })
    }
}

impl Target {
    pub fn as_str(&self) -> &str {
        &self.base
    }

    pub fn is_https(&self) -> bool {
        self.base.starts_with("https://")
    }

    /// URL of the landing page used by the probe and the handshake.
    pub fn landing_url(&self) -> String {
        format!("{}{}", self.base, LANDING_PATH)
    }

    /// URL that asks the device to run `command`.
    pub fn command_url(&self, command: &OutletCommand) -> String {
        format!(
            "{}/outlet/{}?o={}",
            self.base,
            command.action(),
            command.outlet()
        )
    }

    /// Derives the HTTPS target a redirect points to.
    ///
    /// Only locations starting with `https://` qualify. The new target keeps
    /// the scheme, host and non-default port of the location and drops its
    /// path. Returns `None` for any other location, including relative ones
    /// and ones that do not parse.
    pub fn upgrade_from_location(location: &str) -> Option<Target> {
        if !location.starts_with("https://") {
            return None;
        }

        let url = Url::parse(location).ok()?;
        url.host_str()?;

        Some(Target {
            base: url.origin().ascii_serialization(),
        })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

fn check_scheme(url: &Url) -> Result<(), TargetError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(TargetError::UnsupportedScheme(other.to_string())),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
