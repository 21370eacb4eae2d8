//! Runtime configuration shared by loggers.
//!
//! A [`Settings`] value is the explicit configuration context every
//! [`Logger`](crate::Logger) holds. [`Settings::shared`] is the process-wide
//! one used by default; tests and embedders can build private contexts with
//! [`Settings::new`].

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::ScopelogError;
use crate::fields::FieldRepresentation;
use crate::level::Level;
use crate::sink::Sink;
use crate::style::{AnsiStyler, Styler};

/// Default width of the scope column
pub const DEFAULT_SCOPE_LENGTH: usize = 24;

/// Record layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Colorized pipe-delimited columns
    #[default]
    Pipe,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    /// Lenient parse: unknown names fall back to [`LogFormat::Pipe`].
    pub fn from_name(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ScopelogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pipe" => Ok(LogFormat::Pipe),
            "json" => Ok(LogFormat::Json),
            _ => Err(ScopelogError::UnknownFormat(s.to_string())),
        }
    }
}

lazy_static! {
    static ref SHARED: Arc<Settings> = Arc::new(Settings::new());
}

/// Gates, output and layout knobs. Every setter takes effect immediately
/// for all loggers holding this context.
pub struct Settings {
    debug: AtomicBool,
    info: AtomicBool,
    warn: AtomicBool,
    error: AtomicBool,
    show_lines: AtomicBool,
    scope_length: AtomicUsize,
    field_representation: AtomicU8,
    log_format: AtomicU8,
    default_output: RwLock<Sink>,
    styler: RwLock<Arc<dyn Styler>>,
}

impl Settings {
    /// All levels enabled, JSON fields, pipe layout, stdout.
    pub fn new() -> Self {
        Self {
            debug: AtomicBool::new(true),
            info: AtomicBool::new(true),
            warn: AtomicBool::new(true),
            error: AtomicBool::new(true),
            show_lines: AtomicBool::new(false),
            scope_length: AtomicUsize::new(DEFAULT_SCOPE_LENGTH),
            field_representation: AtomicU8::new(encode_representation(
                FieldRepresentation::default(),
            )),
            log_format: AtomicU8::new(encode_format(LogFormat::default())),
            default_output: RwLock::new(Sink::stdout()),
            styler: RwLock::new(Arc::new(AnsiStyler)),
        }
    }

    /// The process-wide settings.
    pub fn shared() -> Arc<Settings> {
        Arc::clone(&SHARED)
    }

    fn gate(&self, level: Level) -> Option<&AtomicBool> {
        match level {
            Level::Debug => Some(&self.debug),
            Level::Info => Some(&self.info),
            Level::Warn => Some(&self.warn),
            Level::Error => Some(&self.error),
            Level::Fatal => None,
        }
    }

    /// Fatal records are always enabled.
    pub fn is_enabled(&self, level: Level) -> bool {
        self.gate(level)
            .map_or(true, |gate| gate.load(Ordering::Relaxed))
    }

    /// No-op for [`Level::Fatal`].
    pub fn set_enabled(&self, level: Level, enabled: bool) {
        if let Some(gate) = self.gate(level) {
            gate.store(enabled, Ordering::Relaxed);
        }
    }

    pub fn set_debug(&self, enabled: bool) {
        self.set_enabled(Level::Debug, enabled);
    }

    pub fn set_info(&self, enabled: bool) {
        self.set_enabled(Level::Info, enabled);
    }

    pub fn set_warning(&self, enabled: bool) {
        self.set_enabled(Level::Warn, enabled);
    }

    pub fn set_error(&self, enabled: bool) {
        self.set_enabled(Level::Error, enabled);
    }

    /// Disable every gated level.
    pub fn set_test_mode(&self) {
        self.set_all(false);
    }

    /// Enable every gated level.
    pub fn unset_test_mode(&self) {
        self.set_all(true);
    }

    fn set_all(&self, enabled: bool) {
        for level in [Level::Debug, Level::Warn, Level::Info, Level::Error] {
            self.set_enabled(level, enabled);
        }
    }

    pub fn show_lines(&self) -> bool {
        self.show_lines.load(Ordering::Relaxed)
    }

    pub fn set_show_lines(&self, enabled: bool) {
        self.show_lines.store(enabled, Ordering::Relaxed);
    }

    pub fn scope_length(&self) -> usize {
        self.scope_length.load(Ordering::Relaxed)
    }

    pub fn set_scope_length(&self, length: usize) {
        self.scope_length.store(length, Ordering::Relaxed);
    }

    pub fn field_representation(&self) -> FieldRepresentation {
        decode_representation(self.field_representation.load(Ordering::Relaxed))
    }

    pub fn set_field_representation(&self, representation: FieldRepresentation) {
        self.field_representation
            .store(encode_representation(representation), Ordering::Relaxed);
    }

    pub fn log_format(&self) -> LogFormat {
        decode_format(self.log_format.load(Ordering::Relaxed))
    }

    pub fn set_log_format(&self, format: LogFormat) {
        self.log_format
            .store(encode_format(format), Ordering::Relaxed);
    }

    /// Sink used by loggers without a custom writer.
    pub fn default_output(&self) -> Sink {
        match self.default_output.read() {
            Ok(sink) => sink.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_default_output(&self, sink: Sink) {
        match self.default_output.write() {
            Ok(mut current) => *current = sink,
            Err(poisoned) => *poisoned.into_inner() = sink,
        }
    }

    pub fn styler(&self) -> Arc<dyn Styler> {
        match self.styler.read() {
            Ok(styler) => Arc::clone(&styler),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn set_styler(&self, styler: Arc<dyn Styler>) {
        match self.styler.write() {
            Ok(mut current) => *current = styler,
            Err(poisoned) => *poisoned.into_inner() = styler,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("debug", &self.is_enabled(Level::Debug))
            .field("info", &self.is_enabled(Level::Info))
            .field("warn", &self.is_enabled(Level::Warn))
            .field("error", &self.is_enabled(Level::Error))
            .field("show_lines", &self.show_lines())
            .field("scope_length", &self.scope_length())
            .field("field_representation", &self.field_representation())
            .field("log_format", &self.log_format())
            .finish_non_exhaustive()
    }
}

fn encode_representation(representation: FieldRepresentation) -> u8 {
    match representation {
        FieldRepresentation::None => 0,
        FieldRepresentation::Json => 1,
        FieldRepresentation::KeyValue => 2,
    }
}

fn decode_representation(raw: u8) -> FieldRepresentation {
    match raw {
        0 => FieldRepresentation::None,
        2 => FieldRepresentation::KeyValue,
        _ => FieldRepresentation::Json,
    }
}

fn encode_format(format: LogFormat) -> u8 {
    match format {
        LogFormat::Pipe => 0,
        LogFormat::Json => 1,
    }
}

fn decode_format(raw: u8) -> LogFormat {
    match raw {
        1 => LogFormat::Json,
        _ => LogFormat::Pipe,
    }
}
