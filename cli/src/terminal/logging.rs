use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::registry::LookupSpan;
use wattbox_common::config::Config;
use wattbox_common::macros::SUCCESS_TARGET;

use crate::terminal::print::PRINT_TARGET;
use crate::terminal::report::{DETAIL_TARGET, REPORT_TARGET};

const DEFAULT_FILTER: &str = "info";
const VERBOSE_FILTER: &str = "info,wattbox=debug";

/// Targets of the result lines, enabled on top of any filter.
const RESULT_TARGETS: [&str; 4] = [SUCCESS_TARGET, PRINT_TARGET, REPORT_TARGET, DETAIL_TARGET];

pub struct WattboxFormatter;

impl<S, N> FormatEvent<S, N> for WattboxFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        let symbol: Option<ColoredString> = match (meta.target(), *meta.level()) {
            (PRINT_TARGET, _) => None,
            (SUCCESS_TARGET, _) => Some("✓".green().bold()),
            (DETAIL_TARGET, _) => Some(" ".normal()),
            (_, Level::TRACE) => Some("[ ]".dimmed()),
            (_, Level::DEBUG) => Some("[?]".blue()),
            (_, Level::INFO) => Some("[+]".green().bold()),
            (_, Level::WARN) => Some("[*]".yellow().bold()),
            _ => Some("✗".red().bold()),
        };

        if let Some(symbol) = symbol {
            write!(writer, "{} ", symbol)?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Installs the global subscriber.
///
/// Errors and warnings go to stderr, everything else to stdout. `RUST_LOG`
/// takes precedence over the verbosity flag for progress lines; result
/// lines are always shown.
pub fn init_logging(cfg: &Config) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::try_new(directives(rust_log.as_deref(), cfg.verbose))
        .unwrap_or_else(|_| EnvFilter::new(directives(None, cfg.verbose)));

    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .event_format(WattboxFormatter)
        .init();
}

fn directives(rust_log: Option<&str>, verbose: bool) -> String {
    let base = match rust_log.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ if verbose => VERBOSE_FILTER,
        _ => DEFAULT_FILTER,
    };

    RESULT_TARGETS
        .iter()
        .fold(base.to_string(), |acc, target| format!("{acc},{target}=info"))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
