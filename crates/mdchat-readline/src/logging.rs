//! File logging for the interactive binary.
//!
//! The terminal belongs to the chat, so events go to
//! `~/.config/mdchat/logs/mdchat.log.YYYY-MM-DD`. `RUST_LOG` overrides the
//! default filter.

use mdchat_infrastructure::MdchatPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str =
    "mdchat_readline=info,mdchat_infrastructure=info,mdchat_interaction=info";

/// Installs the global subscriber.
///
/// Returns the guard that flushes the background writer on drop, or `None`
/// if logging could not be set up; the chat works either way.
pub fn init_logging() -> Option<WorkerGuard> {
    let logs_dir = MdchatPaths::logs_dir().ok()?;
    std::fs::create_dir_all(&logs_dir).ok()?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("mdchat.log")
        .build(&logs_dir)
        .ok()?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(guard)
}
