// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing::dispatcher;

use super::TracingConfig;
use crate::ok;

pub const DEFAULT_LOG_FILE_NAME: &str = "log.txt";

/// Global default subscriber, which once set, can't be unset or changed.
/// - This is great for apps.
/// - Configure this with anything that converts into a [`TracingConfig`], see
///   [`mod@crate::tracing_config_options`].
///
/// Logging is **DISABLED** by **default**.
///
/// If you don't call this function w/ a value other than [`tracing_core::LevelFilter::OFF`],
/// then logging won't be enabled. It won't matter if you use the [`tracing::info!`],
/// [`tracing::debug!`], etc. macros.
///
/// # Errors
///
/// Returns an error if the log file can't be created, or a global subscriber is already
/// set.
pub fn try_initialize_logging_global(
    options: impl Into<TracingConfig>,
) -> miette::Result<()> {
    let it: TracingConfig = options.into();

    // Early return if the level filter is off.
    if matches!(it.get_level_filter(), tracing_core::LevelFilter::OFF) {
        return ok!();
    }

    it.install_global()
}

/// Thread local subscriber, which is thread local, and you can assign different ones to
/// different threads. This is great for tests. Drop the returned guard to uninstall it.
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_initialize_logging_thread_local(
    options: impl Into<TracingConfig>,
) -> miette::Result<Option<dispatcher::DefaultGuard>> {
    let it: TracingConfig = options.into();

    // Early return if the level filter is off.
    if matches!(it.get_level_filter(), tracing_core::LevelFilter::OFF) {
        return Ok(None);
    }

    it.install_thread_local().map(Some)
}

#[cfg(test)]
mod tests {
    use tracing_core::LevelFilter;

    use super::*;
    use crate::WriterConfig;

    #[test]
    fn test_off_installs_nothing() {
        let guard = try_initialize_logging_thread_local(LevelFilter::OFF).unwrap();
        assert!(guard.is_none());
    }

    #[test]
    fn test_thread_local_with_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("thread_local.log");
        let config = WriterConfig::File(file_path.to_str().unwrap().to_string());
        let guard = try_initialize_logging_thread_local(config).unwrap();
        assert!(guard.is_some());
        assert!(file_path.exists());
    }
}
