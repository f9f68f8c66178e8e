use std::backtrace::Backtrace;
use std::env;
use std::panic::PanicHookInfo;

use tracing::Event;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::time::SystemTime;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::FormatFields;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

/// Log to hourly rolling files `<dir>/<app_name>.<hour>`.
///
/// stdout is left to the butler. The returned guard flushes the file writer
/// when dropped and must be kept alive.
pub fn init_logging(app_name: &str, dir: &str, level: &str) -> WorkerGuard {
    set_panic_hook();

    let (g, sub) = file_subscriber(app_name, dir, level);
    tracing::subscriber::set_global_default(sub)
        .expect("error setting global tracing subscriber");

    tracing::info!(
        "{} logging to {}/ at {}",
        app_name,
        dir,
        level
    );
    g
}

fn set_panic_hook() {
    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        log_panic(panic);
        prev_hook(panic);
    }));
}

fn log_panic(panic: &PanicHookInfo) {
    let backtrace = format!("{:?}", Backtrace::force_capture());
    let message = panic.to_string().replace('\n', " ");

    match panic.location() {
        Some(location) => tracing::error!(
            message = %message,
            backtrace = %backtrace,
            panic.file = location.file(),
            panic.line = location.line(),
        ),
        None => tracing::error!(message = %message, backtrace = %backtrace),
    }
}

fn file_subscriber(
    app_name: &str,
    dir: &str,
    level: &str,
) -> (WorkerGuard, impl Subscriber) {
    let appender = RollingFileAppender::new(Rotation::HOURLY, dir, app_name);
    let (writer, writer_guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::Layer::new()
        .with_writer(writer)
        .with_ansi(false)
        .event_format(ScopedFormatter {});

    // RUST_LOG overrides `level`.
    let directives =
        env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| level.to_string());

    let subscriber = Registry::default()
        .with(EnvFilter::new(directives))
        .with(layer);

    (writer_guard, subscriber)
}

/// Formats `<time> <level> <span>:<span>: <fields>`.
///
/// The span scope shows which snapshot key the `Core` span is serving.
struct ScopedFormatter {}

impl<S, N> FormatEvent<S, N> for ScopedFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        SystemTime {}.format_time(&mut writer)?;
        write!(writer, " {:>5} ", event.metadata().level().as_str())?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, "{}", span.name())?;

                let ext = span.extensions();
                if let Some(fields) = ext.get::<fmt::FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write!(writer, "{{{}}}", fields)?;
                    }
                }
                write!(writer, ":")?;
            }
            writer.write_char(' ')?;
        }

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
