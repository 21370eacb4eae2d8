use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use chrono::{DateTime, Local, SecondsFormat};
use serde::Serialize;
use tracing::debug;

use crate::fields::{FieldRepresentation, Fields};
use crate::format::render_message;
use crate::level::Level;
use crate::operation::{Operation, MAX_OPERATION_WIDTH};
use crate::settings::{LogFormat, Settings};
use crate::sink::Sink;
use crate::style::Style;
use crate::text::{caller_string, pad_continuation_lines, pad_right, LINE_BREAK};
use crate::value::Value;

/// Tag of a logger that was never tagged
pub const DEFAULT_TAG: &str = "NONE";

/// Separator between scope path segments
pub const SCOPE_SEPARATOR: &str = " > ";

const COLUMN_SEPARATOR: &str = "|";

/// Source location a record is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    pub const fn unknown() -> Self {
        Self { file: "???", line: 0 }
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&caller_string(self.file, self.line))
    }
}

/// A scoped logging handle.
///
/// Every derivation (`scope`, `sub_scope`, `tag`, `operation`,
/// `with_fields`, `with_custom_writer`) returns a new `Logger` and leaves the
/// receiver as it was, so a logger can be shared freely and specialised per
/// call site.
///
/// Emission methods are `#[track_caller]`: the reported file:line is the
/// first caller outside this crate, or outside any wrapper that is itself
/// `#[track_caller]`.
#[derive(Clone)]
pub struct Logger {
    scope: Vec<String>,
    fields: Option<Fields>,
    tag: String,
    operation: Operation,
    output: Option<Sink>,
    settings: Arc<Settings>,
}

impl Logger {
    /// Root logger bound to the process-wide settings.
    pub fn new(scope: impl Into<String>) -> Self {
        Self::with_settings(scope, Settings::shared())
    }

    /// Root logger bound to an explicit settings context.
    pub fn with_settings(scope: impl Into<String>, settings: Arc<Settings>) -> Self {
        Self {
            scope: vec![scope.into()],
            fields: None,
            tag: DEFAULT_TAG.to_string(),
            operation: Operation::default(),
            output: None,
            settings,
        }
    }

    pub fn scope_path(&self) -> &[String] {
        &self.scope
    }

    /// Scope path joined for display, e.g. `A > B`.
    pub fn scope_name(&self) -> String {
        self.scope.join(SCOPE_SEPARATOR)
    }

    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    pub fn current_operation(&self) -> Operation {
        self.operation
    }

    /// `None` when no fields were ever attached.
    pub fn fields(&self) -> Option<&Fields> {
        self.fields.as_ref()
    }

    pub fn custom_writer(&self) -> Option<&Sink> {
        self.output.as_ref()
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    // ---- derivations ----

    /// Replace the whole scope path with `name`.
    pub fn scope(&self, name: impl Into<String>) -> Logger {
        Logger {
            scope: vec![name.into()],
            ..self.clone()
        }
    }

    /// Append `name` to the scope path.
    pub fn sub_scope(&self, name: impl Into<String>) -> Logger {
        let mut next = self.clone();
        next.scope.push(name.into());
        next
    }

    pub fn tag(&self, tag: impl Into<String>) -> Logger {
        Logger {
            tag: tag.into(),
            ..self.clone()
        }
    }

    pub fn operation(&self, operation: Operation) -> Logger {
        Logger {
            operation,
            ..self.clone()
        }
    }

    /// Attach fields on top of the inherited ones; new keys win.
    pub fn with_fields(&self, fields: impl Into<Fields>) -> Logger {
        let fields = fields.into();
        let merged = match &self.fields {
            Some(parent) => parent.merged(&fields),
            None => fields,
        };
        Logger {
            fields: Some(merged),
            ..self.clone()
        }
    }

    /// Write to `sink` instead of the settings' default output. `None`
    /// goes back to the default.
    pub fn with_custom_writer(&self, sink: impl Into<Option<Sink>>) -> Logger {
        Logger {
            output: sink.into(),
            ..self.clone()
        }
    }

    // ---- emission ----

    /// Log at INFO.
    #[track_caller]
    pub fn info(&self, message: impl Into<Value>, args: &[Value]) -> &Self {
        if self.settings.is_enabled(Level::Info) {
            let text = render_message(&message.into(), args);
            self.emit(Level::Info, &text, Location::caller().into(), false);
        }
        self
    }

    /// Same as [`Logger::info`].
    #[track_caller]
    pub fn log(&self, message: impl Into<Value>, args: &[Value]) -> &Self {
        if self.settings.is_enabled(Level::Info) {
            let text = render_message(&message.into(), args);
            self.emit(Level::Info, &text, Location::caller().into(), false);
        }
        self
    }

    /// Log at DEBUG.
    #[track_caller]
    pub fn debug(&self, message: impl Into<Value>, args: &[Value]) -> &Self {
        if self.settings.is_enabled(Level::Debug) {
            let text = render_message(&message.into(), args);
            self.emit(Level::Debug, &text, Location::caller().into(), false);
        }
        self
    }

    /// Log at WARN.
    #[track_caller]
    pub fn warn(&self, message: impl Into<Value>, args: &[Value]) -> &Self {
        if self.settings.is_enabled(Level::Warn) {
            let text = render_message(&message.into(), args);
            self.emit(Level::Warn, &text, Location::caller().into(), false);
        }
        self
    }

    /// Log at ERROR.
    #[track_caller]
    pub fn error(&self, message: impl Into<Value>, args: &[Value]) -> &Self {
        if self.settings.is_enabled(Level::Error) {
            let text = render_message(&message.into(), args);
            self.emit(Level::Error, &text, Location::caller().into(), false);
        }
        self
    }

    /// Log at INFO with all styling stripped from the written record.
    #[track_caller]
    pub fn log_no_format(&self, message: impl Into<Value>, args: &[Value]) -> &Self {
        if self.settings.is_enabled(Level::Info) {
            let text = render_message(&message.into(), args);
            self.emit(Level::Info, &text, Location::caller().into(), true);
        }
        self
    }

    /// Log at ERROR regardless of gates, then panic with the message.
    ///
    /// Without arguments the message is used verbatim, so a literal `%` is
    /// not treated as a template.
    #[track_caller]
    pub fn fatal(&self, message: impl Into<Value>, args: &[Value]) -> ! {
        let message = message.into();
        let text = if args.is_empty() {
            message.to_string()
        } else {
            render_message(&message, args)
        };
        self.emit(Level::Error, &text, Location::caller().into(), false);
        panic!("{}", text);
    }

    /// Render and write one record. Gates must be checked by the caller.
    pub(crate) fn emit(&self, level: Level, message: &str, caller: CallSite, plain: bool) {
        let now = Local::now();
        let record = match self.settings.log_format() {
            LogFormat::Pipe => self.render_pipe(level, message, caller, now),
            LogFormat::Json => match self.render_json(level, message, caller, now) {
                Some(record) => record,
                None => return,
            },
        };
        let record = if plain {
            self.settings.styler().strip(&record)
        } else {
            record
        };
        self.write(record.as_bytes());
    }

    fn write(&self, bytes: &[u8]) {
        let sink = self
            .output
            .clone()
            .unwrap_or_else(|| self.settings.default_output());
        if let Err(err) = sink.write(bytes) {
            debug!(error = %err, scope = %self.scope_name(), "Dropped log record");
        }
    }

    /// `timestamp|level|operation|tag|scope[|caller]|message[|fields]`
    pub(crate) fn render_pipe(
        &self,
        level: Level,
        message: &str,
        caller: CallSite,
        now: DateTime<Local>,
    ) -> String {
        let styler = self.settings.styler();
        let separator = styler.paint(Style::Bold, COLUMN_SEPARATOR);

        let mut columns = vec![
            styler.paint(Style::Gray, &format_time(now)),
            styler.paint(Style::Bold, &styler.paint(level.style(), level.code())),
            styler.paint(
                self.operation.style(),
                &pad_right(self.operation.label(), MAX_OPERATION_WIDTH),
            ),
            styler.paint(Style::Dimmed, &self.tag),
            styler.paint(
                Style::Bold,
                &pad_right(&self.scope_name(), self.settings.scope_length()),
            ),
        ];
        if self.settings.show_lines() {
            columns.push(styler.paint(Style::Green, &caller.to_string()));
        }

        let mut line = columns.join(&separator);
        line.push_str(&separator);

        // Continuation lines line up under the message column
        let indent = styler.strip(&line).chars().count();
        line.push_str(&styler.paint(level.style(), &pad_continuation_lines(message, indent)));

        let representation = self.settings.field_representation();
        if representation != FieldRepresentation::None {
            let fields = self
                .fields
                .as_ref()
                .and_then(|fields| fields.render(representation))
                .unwrap_or_else(|| "{}".to_string());
            line.push_str(&separator);
            line.push_str(&styler.paint(level.style(), &fields));
        }

        line.push_str(LINE_BREAK);
        line
    }

    pub(crate) fn render_json(
        &self,
        level: Level,
        message: &str,
        caller: CallSite,
        now: DateTime<Local>,
    ) -> Option<String> {
        let representation = self.settings.field_representation();
        let record = JsonRecord {
            timestamp: format_time(now),
            level: level.description(),
            operation: self.operation.label(),
            tag: &self.tag,
            scope: self.scope_name(),
            message: self.settings.styler().strip(message),
            caller: self.settings.show_lines().then(|| caller.to_string()),
            fields: self
                .fields
                .as_ref()
                .filter(|_| representation != FieldRepresentation::None),
        };

        match serde_json::to_string(&record) {
            Ok(mut json) => {
                json.push_str(LINE_BREAK);
                Some(json)
            }
            Err(err) => {
                debug!(error = %err, "Failed to serialize log record");
                None
            }
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("scope", &self.scope)
            .field("tag", &self.tag)
            .field("operation", &self.operation)
            .field("fields", &self.fields)
            .field("custom_writer", &self.output.is_some())
            .finish()
    }
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    timestamp: String,
    level: &'static str,
    operation: &'static str,
    tag: &'a str,
    scope: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    caller: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a Fields>,
}

/// RFC 3339 with second precision, in local time.
fn format_time(t: DateTime<Local>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use crate::sink::SharedBuffer;
    use crate::style::{PlainStyler, Styler};
    use crate::text::strip_colors;
    use chrono::TimeZone;

    /// Bold SGR around every span, independent of terminal detection.
    struct EscapeStyler;

    impl Styler for EscapeStyler {
        fn paint(&self, _style: Style, text: &str) -> String {
            format!("\u{1b}[1m{}\u{1b}[0m", text)
        }
    }

    /// Markup only its own `strip` knows how to remove.
    struct TagStyler;

    impl Styler for TagStyler {
        fn paint(&self, _style: Style, text: &str) -> String {
            format!("<b>{}</b>", text)
        }

        fn strip(&self, text: &str) -> String {
            text.replace("<b>", "").replace("</b>", "")
        }
    }

    fn settings_with(styler: impl Styler + 'static) -> Arc<Settings> {
        let settings = Settings::new();
        settings.set_styler(Arc::new(styler));
        Arc::new(settings)
    }

    fn plain_settings() -> Arc<Settings> {
        settings_with(PlainStyler)
    }

    fn continuation_indent(stripped: &str, message_start: &str) -> (usize, usize) {
        let mut lines = stripped.lines();
        let first = lines.next().unwrap();
        let second = lines.next().unwrap();
        let indent = second.len() - second.trim_start().len();
        (indent, first.find(message_start).unwrap())
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 1, 20, 10, 0, 0).unwrap()
    }

    const HERE: CallSite = CallSite::new("src/app/handler.rs", 12);

    #[test]
    fn test_scope_replaces_and_sub_scope_appends() {
        let root = Logger::with_settings("A", plain_settings());
        let nested = root.sub_scope("B").sub_scope("C");
        assert_eq!(nested.scope_path(), ["A", "B", "C"]);
        assert_eq!(nested.scope("X").scope_path(), ["X"]);
        assert_eq!(root.scope_path(), ["A"]);
    }

    #[test]
    fn test_derivations_leave_parent_untouched() {
        let parent = Logger::with_settings("P", plain_settings()).with_fields(fields! { "a" => 1 });
        let _child = parent
            .sub_scope("C")
            .tag("T")
            .operation(Operation::Io)
            .with_fields(fields! { "a" => 2, "b" => 3 })
            .with_custom_writer(SharedBuffer::new().sink());

        assert_eq!(parent.scope_path(), ["P"]);
        assert_eq!(parent.tag_name(), DEFAULT_TAG);
        assert_eq!(parent.current_operation(), Operation::Msg);
        assert_eq!(parent.fields().unwrap().get("a"), Some(&Value::Int(1)));
        assert!(!parent.fields().unwrap().contains_key("b"));
        assert!(parent.custom_writer().is_none());
    }

    #[test]
    fn test_fields_absent_until_attached() {
        let logger = Logger::with_settings("P", plain_settings());
        assert!(logger.fields().is_none());
        assert!(logger.with_fields(Fields::new()).fields().unwrap().is_empty());
    }

    #[test]
    fn test_pipe_layout_columns() {
        let logger = Logger::with_settings("A", plain_settings())
            .sub_scope("B")
            .tag("REQ001");
        let line = logger.render_pipe(Level::Info, "hello world", HERE, fixed_time());

        let expected_scope = format!("{:<24}", "A > B");
        let columns: Vec<&str> = line.trim_end_matches('\n').split('|').collect();
        assert_eq!(columns.len(), 7);
        assert_eq!(columns[0], format_time(fixed_time()));
        assert_eq!(columns[1], "I");
        assert_eq!(columns[2], "MSG  ");
        assert_eq!(columns[3], "REQ001");
        assert_eq!(columns[4], expected_scope);
        assert_eq!(columns[5], "hello world");
        assert_eq!(columns[6], "{}");
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn test_long_scope_is_not_truncated() {
        let settings = plain_settings();
        settings.set_scope_length(4);
        let logger = Logger::with_settings("LongScopeName", settings);
        let line = logger.render_pipe(Level::Info, "m", HERE, fixed_time());
        assert!(line.contains("|LongScopeName|"), "{}", line);
    }

    #[test]
    fn test_caller_column_when_enabled() {
        let settings = plain_settings();
        settings.set_show_lines(true);
        let logger = Logger::with_settings("A", settings);
        let line = logger.render_pipe(Level::Warn, "m", HERE, fixed_time());
        assert!(line.contains("|handler.rs:12|m|"), "{}", line);
    }

    #[test]
    fn test_fields_column_omitted_for_none() {
        let settings = plain_settings();
        settings.set_field_representation(FieldRepresentation::None);
        let logger = Logger::with_settings("A", settings).with_fields(fields! { "a" => "b" });
        let line = logger.render_pipe(Level::Info, "m", HERE, fixed_time());
        assert!(line.ends_with("|m\n"), "{}", line);
    }

    #[test]
    fn test_multiline_continuation_is_aligned() {
        let logger = Logger::with_settings("A", plain_settings());
        let line = logger.render_pipe(Level::Info, "first\nsecond", HERE, fixed_time());
        let mut lines = line.lines();
        let first = lines.next().unwrap();
        let second = lines.next().unwrap();

        let prefix_len = first.find("first").unwrap();
        let indent = second.len() - second.trim_start().len();
        assert_eq!(indent, prefix_len);
        assert!(second.trim_start().starts_with("second"));
    }

    #[test]
    fn test_multiline_alignment_measures_visible_width() {
        let logger = Logger::with_settings("A", settings_with(EscapeStyler));
        let line = logger.render_pipe(Level::Info, "first\nsecond", HERE, fixed_time());
        assert!(line.contains('\u{1b}'));

        let (indent, prefix_len) = continuation_indent(&strip_colors(&line), "first");
        assert_eq!(indent, prefix_len);
    }

    #[test]
    fn test_multiline_alignment_uses_styler_strip() {
        let logger = Logger::with_settings("A", settings_with(TagStyler));
        let line = logger.render_pipe(Level::Info, "first\nsecond", HERE, fixed_time());

        let (indent, prefix_len) = continuation_indent(&TagStyler.strip(&line), "first");
        assert_eq!(indent, prefix_len);
    }

    #[test]
    fn test_log_no_format_uses_styler_strip() {
        let buffer = SharedBuffer::new();
        let logger =
            Logger::with_settings("A", settings_with(TagStyler)).with_custom_writer(buffer.sink());

        logger.info("styled", &[]);
        assert!(buffer.contents().contains("<b>styled</b>"));

        buffer.clear();
        logger.log_no_format("plain %d", &[Value::from(1)]);
        let out = buffer.contents();
        assert!(!out.contains("<b>"), "{}", out);
        assert!(out.contains("|plain 1|"), "{}", out);
    }

    #[test]
    fn test_log_no_format_strips_embedded_escapes_with_plain_styler() {
        let buffer = SharedBuffer::new();
        let logger = Logger::with_settings("A", plain_settings()).with_custom_writer(buffer.sink());
        logger.log_no_format("\u{1b}[31mred\u{1b}[0m", &[]);
        assert!(!buffer.contents().contains('\u{1b}'));
        assert!(buffer.contents().contains("|red|"));
    }

    #[test]
    fn test_json_message_uses_styler_strip() {
        let logger = Logger::with_settings("A", settings_with(TagStyler));
        let json = logger
            .render_json(Level::Info, "<b>bold</b> text", HERE, fixed_time())
            .unwrap();
        let record: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(record["message"], "bold text");
    }

    #[test]
    fn test_json_record() {
        let settings = plain_settings();
        settings.set_log_format(LogFormat::Json);
        let logger = Logger::with_settings("A", settings)
            .sub_scope("B")
            .operation(Operation::Done)
            .with_fields(fields! { "k" => 5 });
        let json = logger
            .render_json(Level::Warn, "done", HERE, fixed_time())
            .unwrap();
        let record: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(record["level"], "warn");
        assert_eq!(record["operation"], "DONE");
        assert_eq!(record["tag"], DEFAULT_TAG);
        assert_eq!(record["scope"], "A > B");
        assert_eq!(record["message"], "done");
        assert_eq!(record["fields"]["k"], 5);
        assert!(record.get("caller").is_none());
    }

    #[test]
    fn test_json_record_hides_fields_for_none() {
        let settings = plain_settings();
        settings.set_field_representation(FieldRepresentation::None);
        settings.set_show_lines(true);
        let logger = Logger::with_settings("A", settings).with_fields(fields! { "k" => 5 });
        let json = logger
            .render_json(Level::Info, "m", HERE, fixed_time())
            .unwrap();
        let record: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(record.get("fields").is_none());
        assert_eq!(record["caller"], "handler.rs:12");
    }

    #[test]
    fn test_call_site_display() {
        assert_eq!(HERE.to_string(), "handler.rs:12");
    }
}
