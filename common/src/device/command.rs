//! # Outlet Commands
//!
//! An [`OutletCommand`] pairs a 1-based outlet number with the [`Action`] to
//! perform on it. Both parse from the plain strings used on the command line
//! and in environment variables.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown action '{0}', expected one of: on, off, reset")]
    UnknownAction(String),
    #[error("outlet numbers start at 1")]
    OutletZero,
}

/// What to do with an outlet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    On,
    Off,
    Reset,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::On, Action::Off, Action::Reset];

    /// Path segment the device expects for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::On => "on",
            Action::Off => "off",
            Action::Reset => "reset",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();

        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == lower)
            .ok_or_else(|| CommandError::UnknownAction(s.to_string()))
    }
}

/// A single action aimed at a single outlet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutletCommand {
    outlet: NonZeroU32,
    action: Action,
}

impl OutletCommand {
    pub fn new(outlet: u32, action: Action) -> Result<Self, CommandError> {
        let outlet = NonZeroU32::new(outlet).ok_or(CommandError::OutletZero)?;
        Ok(Self { outlet, action })
    }

    pub fn outlet(&self) -> u32 {
        self.outlet.get()
    }

    pub fn action(&self) -> Action {
        self.action
    }
}

impl fmt::Display for OutletCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' on outlet {}", self.action, self.outlet)
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
