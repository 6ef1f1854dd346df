// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Logger installation for the boundary.
//!
//! Every entry point resolves its filter the same way:
//!
//! 1. the session filter (`FLATBRIDGE_LOG`, or `log_filter` in YAML)
//! 2. `RUST_LOG`
//! 3. the level supplied by the caller
//!
//! `fb_logging_init` and `fb_logging_init_with_filter` pass their argument as
//! the session filter, so it always wins. Handle creation installs a logger
//! once from the handle's [`Config`], falling back to `error`.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::sync::Once;

use flatbridge::Config;
use log::LevelFilter;

use super::FbError;

/// Log level for flatbridge logging
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FbLogLevel {
    FbLogOff = 0,
    FbLogError = 1,
    FbLogWarn = 2,
    FbLogInfo = 3,
    FbLogDebug = 4,
    FbLogTrace = 5,
}

impl From<FbLogLevel> for LevelFilter {
    fn from(level: FbLogLevel) -> Self {
        match level {
            FbLogLevel::FbLogOff => LevelFilter::Off,
            FbLogLevel::FbLogError => LevelFilter::Error,
            FbLogLevel::FbLogWarn => LevelFilter::Warn,
            FbLogLevel::FbLogInfo => LevelFilter::Info,
            FbLogLevel::FbLogDebug => LevelFilter::Debug,
            FbLogLevel::FbLogTrace => LevelFilter::Trace,
        }
    }
}

/// Directive string for `config`, `RUST_LOG` (`rust_log`) and `fallback`, in
/// that order. Blank values are skipped.
fn resolve_filter(config: &Config, rust_log: Option<String>, fallback: LevelFilter) -> String {
    let non_blank = |filter: &String| !filter.trim().is_empty();
    config
        .log_filter
        .clone()
        .filter(non_blank)
        .or_else(|| rust_log.filter(non_blank))
        .unwrap_or_else(|| fallback.to_string().to_ascii_lowercase())
}

fn builder(filter: &str) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filter).format_timestamp_millis();
    builder
}

fn install(config: &Config, fallback: LevelFilter) -> FbError {
    let rust_log = std::env::var(env_logger::DEFAULT_FILTER_ENV).ok();
    let filter = resolve_filter(config, rust_log, fallback);

    match builder(&filter).try_init() {
        Ok(()) => FbError::FbOk,
        Err(_) => FbError::FbOperationFailed, // Already initialized
    }
}

/// Install the process logger from the first handle's configuration.
pub(crate) fn init_once(config: &Config) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // A host that already installed a logger keeps it.
        let _ = install(config, LevelFilter::Error);
    });
}

/// Initialize flatbridge logging at a fixed level
///
/// `level` overrides `FLATBRIDGE_LOG` and `RUST_LOG`.
///
/// # Safety
/// Must be called from a single thread during initialization.
///
/// # Returns
/// `FbOk` on success, `FbOperationFailed` if a logger is already installed
///
/// # Example (C)
/// ```c
/// fb_logging_init(FB_LOG_INFO);
/// ```
#[no_mangle]
pub unsafe extern "C" fn fb_logging_init(level: FbLogLevel) -> FbError {
    let level = LevelFilter::from(level);
    install(&Config::default().with_log_filter(level.to_string()), level)
}

/// Initialize flatbridge logging from the environment
///
/// Uses `FLATBRIDGE_LOG`, then `RUST_LOG`, then `default_level`: the same
/// order a handle applies when it creates the logger.
///
/// # Safety
/// Must be called from a single thread during initialization.
///
/// # Returns
/// `FbOk` on success, `FbOperationFailed` if a logger is already installed
#[no_mangle]
pub unsafe extern "C" fn fb_logging_init_env(default_level: FbLogLevel) -> FbError {
    install(&Config::from_env(), default_level.into())
}

/// Initialize flatbridge logging with an `env_logger` filter string
///
/// # Safety
/// - `filter` must be a valid null-terminated C string or NULL.
///
/// # Returns
/// `FbOk` on success, `FbInvalidArgument` for NULL or non UTF-8 input,
/// `FbOperationFailed` if a logger is already installed
///
/// # Example (C)
/// ```c
/// fb_logging_init_with_filter("flatbridge=debug,info");
/// ```
#[no_mangle]
pub unsafe extern "C" fn fb_logging_init_with_filter(filter: *const c_char) -> FbError {
    if filter.is_null() {
        return FbError::FbInvalidArgument;
    }

    let Ok(filter_str) = CStr::from_ptr(filter).to_str() else {
        return FbError::FbInvalidArgument;
    };

    install(&Config::default().with_log_filter(filter_str), LevelFilter::Error)
}
