use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// One line per event on stderr: `LEVEL module: fields`. The crate prefix
/// is dropped from the target so `credit_sim_core::scoring::model` reads
/// as `scoring::model`.
pub struct CsimFormatter;

fn short_target(target: &str) -> &str {
    target
        .strip_prefix("credit_sim_core::")
        .or_else(|| target.strip_prefix("csim::"))
        .unwrap_or(target)
}

fn level_tag(level: &Level) -> ColoredString {
    match *level {
        Level::TRACE => "TRACE".dimmed(),
        Level::DEBUG => "DEBUG".blue(),
        Level::INFO => " INFO".green(),
        Level::WARN => " WARN".yellow().bold(),
        Level::ERROR => "ERROR".red().bold(),
    }
}

impl<S, N> FormatEvent<S, N> for CsimFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{} {}: ",
            level_tag(meta.level()),
            short_target(meta.target()).dimmed()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// `RUST_LOG` wins over the `--log-level` default.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(CsimFormatter)
        .init();
}
