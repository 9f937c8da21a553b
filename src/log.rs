use std::sync::Mutex;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::conf::Log;
use crate::erx::{Erx, Layouted, ResultEX};

/// Discard is a writer that discards all data written to it.
struct Discard;

impl std::io::Write for Discard {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// non-blocking writers stop flushing once their guard drops, so guards live for the process
static LOG_WORKER_GUARDS: Mutex<Vec<WorkerGuard>> = Mutex::new(Vec::new());

/// install the global subscriber from the `log` section of the config
/// a second call is a no-op
pub fn logging_initialize() -> ResultEX {
    let (app_name, log_conf) = {
        let clap = crate::conf::clap().read().map_err(crate::erx::smp)?;
        (clap.name.clone(), clap.log.clone().unwrap_or_default())
    };

    logging_initialize_with(&app_name, &log_conf)
}

pub fn logging_initialize_with(app_name: &str, log_conf: &Log) -> ResultEX {
    let mut kept = LOG_WORKER_GUARDS.lock().map_err(crate::erx::smp)?;
    if !kept.is_empty() {
        return Ok(());
    }

    let (nonblocking, discard_guard) = tracing_appender::non_blocking(Discard {});
    let (console, console_reload) =
        tracing_subscriber::reload::Layer::new(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(nonblocking.clone()));
    let (persist, persist_reload) =
        tracing_subscriber::reload::Layer::new(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(nonblocking));

    let mut guards: Vec<WorkerGuard> = vec![discard_guard];
    if log_conf.console {
        let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);
        console_reload
            .reload(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(true))
            .map_err(crate::erx::amp("console log layer"))?;
    }

    let logs_dir = log_conf.dirs.trim();
    if !logs_dir.is_empty() {
        if !std::path::Path::new(logs_dir).is_dir() {
            return Err(Erx::coded(Layouted::config("LOGS", "0001"), &format!("log dir is not a directory: {}", logs_dir)));
        }

        let prefix = format!("{}.log", app_name.to_lowercase());
        let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(logs_dir, prefix));
        guards.push(guard);
        persist_reload
            .reload(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
            .map_err(crate::erx::amp("persist log layer"))?;
    }

    let filter = tracing_subscriber::EnvFilter::new(&log_conf.level);
    tracing_subscriber::registry()
        .with(console)
        .with(persist)
        .with(filter)
        .try_init()
        .map_err(crate::erx::amp("tracing subscriber"))?;

    kept.extend(guards);
    Ok(())
}
