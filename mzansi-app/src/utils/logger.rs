//! Tracing setup for the reporting core
//!
//! The level comes from `LOG_LEVEL` (default `info`). When the work
//! directory contains a `logs/` subdirectory, output additionally rolls
//! into a daily file there; otherwise everything goes to stderr.
//!
//! Initialization is idempotent: the first caller installs the
//! subscriber, later calls are no-ops. This lets [`AppContext::initialize`]
//! set logging up unconditionally without fighting test harnesses or a
//! host that installed its own subscriber.
//!
//! [`AppContext::initialize`]: crate::core::context::AppContext::initialize

use std::path::Path;

use crate::core::config::AppConfig;

/// Install the tracing subscriber for this configuration
pub fn init_logger(config: &AppConfig) {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let log_dir = Path::new(&config.work_dir).join("logs");
    if log_dir.is_dir()
        && let Some(dir) = log_dir.to_str()
    {
        let file_appender = tracing_appender::rolling::daily(dir, "mzansi");
        let _ = subscriber.with_writer(file_appender).try_init();
        return;
    }

    let _ = subscriber.try_init();
}
