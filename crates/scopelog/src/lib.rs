//! # scopelog
//!
//! Human-readable console logging with hierarchical scopes, tags, semantic
//! operations and attached fields, rendered as fixed-width colorized
//! columns.
//!
//! ## Key Types
//!
//! - [`Logger`] - Immutable logging handle; every derivation returns a new one
//! - [`Settings`] - Level gates, default output and layout knobs
//! - [`Level`] / [`Operation`] - Severity and semantic category of a record
//! - [`Fields`] / [`Value`] - Attached key/values and dynamic message values
//! - [`LogConfig`] - `scopelog.toml` file configuration
//!
//! ## Record Layout
//!
//! ```text
//! 2026-01-20T10:00:00+01:00|I|AWAIT|REQ001|MAIN > Call0            |Doing some work|{"arg0":"MyArg0"}
//! ```
//!
//! Timestamp, severity, operation, tag, scope, optional caller file:line,
//! message and fields. Continuation lines of multi-line messages are
//! indented to the message column. [`LogFormat::Json`] writes one JSON
//! object per record instead.
//!
//! ## Example
//!
//! ```
//! use scopelog::{fields, values};
//!
//! let log = scopelog::scope("MAIN").tag("REQ001");
//! let call = log.sub_scope("Call0").with_fields(fields! { "arg0" => "MyArg0" });
//! call.awaiting("Doing some work", &[]);
//! call.done("Finished %d items", &values![3]);
//! ```

mod bridge;
mod config;
mod error;
mod fields;
mod format;
mod global;
mod level;
mod logger;
mod operation;
mod settings;
mod sink;
mod style;
mod sugar;
mod text;
mod value;

pub use bridge::{init_tracing, ScopelogLayer};
pub use config::{LogConfig, CONFIG_FILE_NAME};
pub use error::{Result, ScopelogError};
pub use fields::{FieldRepresentation, Fields};
pub use format::{has_format_data, render_message, sprintf};
pub use global::*;
pub use level::{description_for, Level};
pub use logger::{CallSite, Logger, DEFAULT_TAG, SCOPE_SEPARATOR};
pub use operation::{Operation, MAX_OPERATION_WIDTH};
pub use settings::{LogFormat, Settings, DEFAULT_SCOPE_LENGTH};
pub use sink::{SharedBuffer, Sink};
pub use style::{AnsiStyler, PlainStyler, Style, Styler};
pub use text::{
    add_padding, caller_string, pad_continuation_lines, pad_right, strip_colors, visible_len,
};
pub use value::Value;
