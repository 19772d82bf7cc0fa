use wattbox_common::config::Config;
use wattbox_common::device::credentials::Credentials;
use wattbox_common::success;
use wattbox_core::{CommandReport, DeviceSession, SessionError};

use crate::commands::CommandLine;
use crate::terminal::print;

/// Negotiates with the device and sends the requested outlet command.
pub async fn control(args: &CommandLine, cfg: &Config) -> Result<CommandReport, SessionError> {
    let command = args.outlet_command().map_err(anyhow::Error::from)?;
    let credentials = Credentials::new(&args.username, &args.password);

    let session = DeviceSession::new(args.url.clone(), credentials, &args.session_config())?;
    let report = session.run(command).await?;

    if cfg.verbose {
        print_summary(&report);
    }

    success!("Successfully executed {}", report.command);
    Ok(report)
}

fn print_summary(report: &CommandReport) {
    print::header("session");
    print::aligned_line("Address", report.target.as_str());
    print::aligned_line("Auth", report.scheme.to_string());
    print::aligned_line("Outlet", report.command.outlet().to_string());
    print::aligned_line("Action", report.command.action().as_str());
    print::aligned_line("Status", report.status.to_string());
}
