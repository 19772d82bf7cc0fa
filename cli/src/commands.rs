pub mod control;

use std::time::Duration;

use clap::{Parser, ValueEnum};
use wattbox_common::device::command::{Action, CommandError, OutletCommand};
use wattbox_common::device::target::Target;
use wattbox_core::SessionConfig;

const AFTER_HELP: &str = "\
Examples:
  wattbox --url http://172.16.19.184 --outlet 3 --action off
  wattbox -u http://172.16.19.184 -o 3 -a on --username admin --password pass

Environment Variables:
  WATTBOX_URL       Base URL of the WattBox (e.g., http://172.16.19.184)
  WATTBOX_USERNAME  Username for HTTP authentication
  WATTBOX_PASSWORD  Password for HTTP authentication
  WATTBOX_OUTLET    Default outlet number
  WATTBOX_ACTION    Default action (on/off/reset)

A .env file in the working directory is read for these variables as well.";

#[derive(Parser)]
#[command(name = "wattbox")]
#[command(version)]
#[command(about = "Control WattBox outlets via HTTP.")]
#[command(after_help = AFTER_HELP)]
pub struct CommandLine {
    /// Base URL of the WattBox
    #[arg(short = 'u', long, env = "WATTBOX_URL", default_value = "http://172.16.19.184")]
    pub url: Target,

    /// Username for HTTP authentication
    #[arg(long, env = "WATTBOX_USERNAME", default_value = "wattbox")]
    pub username: String,

    /// Password for HTTP authentication
    #[arg(long, env = "WATTBOX_PASSWORD", default_value = "wattbox", hide_env_values = true, hide_default_value = true)]
    pub password: String,

    /// Outlet number
    #[arg(short = 'o', long, env = "WATTBOX_OUTLET", value_parser = clap::value_parser!(u32).range(1..))]
    pub outlet: u32,

    /// Action to perform on the outlet
    #[arg(short = 'a', long, env = "WATTBOX_ACTION", value_enum, default_value_t = ActionArg::Off)]
    pub action: ActionArg,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Connect and response budget in milliseconds
    #[arg(long, env = "WATTBOX_TIMEOUT_MS", hide = true, default_value_t = 10_000, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ActionArg {
    On,
    Off,
    Reset,
}

impl From<ActionArg> for Action {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::On => Action::On,
            ActionArg::Off => Action::Off,
            ActionArg::Reset => Action::Reset,
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn outlet_command(&self) -> Result<OutletCommand, CommandError> {
        OutletCommand::new(self.outlet, self.action.into())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            timeout: Duration::from_millis(self.timeout_ms),
            ..SessionConfig::default()
        }
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
