//! Process-wide logger and configuration.
//!
//! The free functions here log through a lazily created logger scoped
//! `"Global"` and configure [`Settings::shared`], which every logger created
//! with [`Logger::new`] (or [`scope`]) observes.

use lazy_static::lazy_static;

use crate::fields::FieldRepresentation;
use crate::level::Level;
use crate::logger::Logger;
use crate::settings::{LogFormat, Settings};
use crate::sink::Sink;
use crate::value::Value;

/// Scope of the process-wide logger
pub const GLOBAL_SCOPE: &str = "Global";

lazy_static! {
    static ref GLOBAL: Logger = Logger::new(GLOBAL_SCOPE);
}

/// The process-wide logger.
pub fn global() -> &'static Logger {
    &GLOBAL
}

/// New root logger bound to the process-wide settings.
pub fn scope(name: impl Into<String>) -> Logger {
    Logger::new(name)
}

#[track_caller]
pub fn info(message: impl Into<Value>, args: &[Value]) -> &'static Logger {
    global().info(message, args)
}

#[track_caller]
pub fn log(message: impl Into<Value>, args: &[Value]) -> &'static Logger {
    global().log(message, args)
}

#[track_caller]
pub fn debug(message: impl Into<Value>, args: &[Value]) -> &'static Logger {
    global().debug(message, args)
}

#[track_caller]
pub fn warn(message: impl Into<Value>, args: &[Value]) -> &'static Logger {
    global().warn(message, args)
}

#[track_caller]
pub fn error(message: impl Into<Value>, args: &[Value]) -> &'static Logger {
    global().error(message, args)
}

#[track_caller]
pub fn log_no_format(message: impl Into<Value>, args: &[Value]) -> &'static Logger {
    global().log_no_format(message, args)
}

/// Log at ERROR through the process-wide logger and panic.
#[track_caller]
pub fn fatal(message: impl Into<Value>, args: &[Value]) -> ! {
    global().fatal(message, args)
}

/// Default output for every logger without a custom writer, including the
/// process-wide one.
pub fn set_default_output(sink: Sink) {
    Settings::shared().set_default_output(sink);
}

pub fn set_debug(enabled: bool) {
    Settings::shared().set_debug(enabled);
}

pub fn set_info(enabled: bool) {
    Settings::shared().set_info(enabled);
}

pub fn set_warning(enabled: bool) {
    Settings::shared().set_warning(enabled);
}

pub fn set_error(enabled: bool) {
    Settings::shared().set_error(enabled);
}

pub fn set_show_lines(enabled: bool) {
    Settings::shared().set_show_lines(enabled);
}

pub fn set_field_representation(representation: FieldRepresentation) {
    Settings::shared().set_field_representation(representation);
}

pub fn set_log_format(format: LogFormat) {
    Settings::shared().set_log_format(format);
}

pub fn set_scope_length(length: usize) {
    Settings::shared().set_scope_length(length);
}

/// Disable DEBUG, INFO, WARN and ERROR.
pub fn set_test_mode() {
    Settings::shared().set_test_mode();
}

/// Enable DEBUG, INFO, WARN and ERROR.
pub fn unset_test_mode() {
    Settings::shared().unset_test_mode();
}

pub fn debug_enabled() -> bool {
    Settings::shared().is_enabled(Level::Debug)
}

pub fn info_enabled() -> bool {
    Settings::shared().is_enabled(Level::Info)
}

pub fn warning_enabled() -> bool {
    Settings::shared().is_enabled(Level::Warn)
}

pub fn error_enabled() -> bool {
    Settings::shared().is_enabled(Level::Error)
}

pub fn show_lines_enabled() -> bool {
    Settings::shared().show_lines()
}

pub fn scope_length() -> usize {
    Settings::shared().scope_length()
}

pub fn field_representation() -> FieldRepresentation {
    Settings::shared().field_representation()
}

pub fn log_format() -> LogFormat {
    Settings::shared().log_format()
}
