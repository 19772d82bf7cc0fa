//! Turns a failed run into the lines shown on stderr.

use std::error::Error;

use tracing::error;
use wattbox_common::config::Config;
use wattbox_core::SessionError;

/// Target of the failure headline.
pub const REPORT_TARGET: &str = "wattbox::report";

/// Target of follow-up lines printed under a failure.
pub const DETAIL_TARGET: &str = "wattbox::detail";

const BODY_PREVIEW_CHARS: usize = 500;

pub fn failure(err: &SessionError, cfg: &Config) {
    error!(target: REPORT_TARGET, "{}", headline(err));

    if !cfg.verbose {
        return;
    }

    match err {
        SessionError::Http { body, .. } if !body.is_empty() => {
            detail(&format!("Response: {}", preview(body)));
        }
        SessionError::Connection { source, .. } => {
            detail(&format!("Details: {}", chain(source)));
        }
        SessionError::Unexpected(source) => {
            detail(&format!("{source:?}"));
        }
        _ => {}
    }
}

fn headline(err: &SessionError) -> String {
    match err {
        SessionError::Http { status, url, .. } => format!("HTTP Error: {status} for url: {url}"),
        SessionError::Connection { target, .. } => {
            format!("Connection Error: Could not connect to {target}")
        }
        SessionError::Timeout(_) => "Timeout Error: Request timed out".to_string(),
        SessionError::Request(source) => format!("Request Error: {}", chain(source)),
        SessionError::Unexpected(source) => format!("Unexpected Error: {source}"),
    }
}

fn detail(msg: &str) {
    error!(target: DETAIL_TARGET, "{msg}");
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

/// Joins an error and all of its sources with `": "`.
fn chain(err: &dyn Error) -> String {
    let mut parts: Vec<String> = vec![err.to_string()];
    let mut source = err.source();

    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }

    parts.join(": ")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
