//! Record rendering for the two formatter families
//!
//! - Text, coloured: `INFO[2025-01-08T10:30:45Z] Request processed   user=alice`
//! - Text, plain: `time="2025-01-08T10:30:45Z" level=info msg="Request processed" user=alice`
//! - Json: `{"level":"info","msg":"Request processed","time":"2025-01-08T10:30:45Z","user":"alice"}`

use super::entry::Entry;
use super::error::{LoggerError, Result};
use super::fields::FieldValue;
use super::formatter::Formatter;
use super::timestamp::TimestampFormat;
use chrono::Utc;
use colored::Color;

/// Keys the JSON layout writes itself; clashing fields get a `fields.` prefix
const RESERVED_KEYS: [&str; 4] = ["level", "msg", "time", "file"];

/// Messages shorter than this are padded when fields follow them
const MESSAGE_PAD: usize = 44;

/// Renders entries into newline-terminated records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFormatter {
    kind: Formatter,
    timestamp_format: TimestampFormat,
    use_colors: bool,
}

impl Default for RecordFormatter {
    fn default() -> Self {
        Self::new(Formatter::Text)
    }
}

impl RecordFormatter {
    /// Text formatters start coloured, JSON formatters never colour
    pub fn new(kind: Formatter) -> Self {
        Self {
            kind,
            timestamp_format: TimestampFormat::default(),
            use_colors: kind == Formatter::Text,
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Choose between the coloured and the plain key=value text layout
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn kind(&self) -> Formatter {
        self.kind
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    /// Render one entry, including the trailing newline
    pub fn format(&self, entry: &Entry) -> Result<Vec<u8>> {
        match self.kind {
            Formatter::Json => self.format_json(entry),
            Formatter::Text if self.use_colors => Ok(self.format_colored(entry).into_bytes()),
            Formatter::Text => Ok(self.format_logfmt(entry).into_bytes()),
        }
    }

    /// Sanitize log message to prevent log injection attacks
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    fn timestamp(&self, entry: &Entry) -> String {
        self.timestamp_format
            .format(&entry.time().unwrap_or_else(Utc::now))
    }

    /// Wrap `text` in the ANSI foreground escape for `color`, regardless of tty
    fn paint(text: &str, color: Color) -> String {
        format!("\x1b[{}m{}\x1b[0m", color.to_fg_str(), text)
    }

    fn format_colored(&self, entry: &Entry) -> String {
        let level = entry.level();
        let color = level.color_code();
        let message = Self::sanitize_message(entry.message());

        let mut output = format!(
            "{}[{}] ",
            Self::paint(level.short_tag(), color),
            self.timestamp(entry)
        );

        let has_trailer = !entry.data().is_empty() || entry.caller().is_some();
        if has_trailer {
            output.push_str(&format!("{:<width$}", message, width = MESSAGE_PAD));
        } else {
            output.push_str(&message);
        }

        for (key, value) in entry.data() {
            output.push_str(&format!(
                " {}={}",
                Self::paint(key, color),
                self.logfmt_value(value)
            ));
        }
        if let Some(caller) = entry.caller() {
            output.push_str(&format!(
                " {}={}",
                Self::paint("file", color),
                self.escape_logfmt_value(&caller.to_string())
            ));
        }

        output.push('\n');
        output
    }

    fn format_logfmt(&self, entry: &Entry) -> String {
        let mut parts = vec![
            format!("time={}", self.quote_logfmt_value(&self.timestamp(entry))),
            format!("level={}", entry.level()),
            format!("msg={}", self.quote_logfmt_value(entry.message())),
        ];

        for (key, value) in entry.data() {
            parts.push(format!(
                "{}={}",
                self.escape_logfmt_key(key),
                self.logfmt_value(value)
            ));
        }
        if let Some(caller) = entry.caller() {
            parts.push(format!(
                "file={}",
                self.escape_logfmt_value(&caller.to_string())
            ));
        }

        let mut output = parts.join(" ");
        output.push('\n');
        output
    }

    fn format_json(&self, entry: &Entry) -> Result<Vec<u8>> {
        let mut json_obj = serde_json::Map::new();

        for (key, value) in entry.data() {
            let key = if RESERVED_KEYS.contains(&key.as_str()) {
                format!("fields.{}", key)
            } else {
                key.clone()
            };
            json_obj.insert(key, value.to_json_value());
        }

        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(entry.level().as_str().to_string()),
        );
        json_obj.insert(
            "msg".to_string(),
            serde_json::Value::String(entry.message().to_string()),
        );
        json_obj.insert(
            "time".to_string(),
            self.timestamp_format
                .to_json_value(&entry.time().unwrap_or_else(Utc::now)),
        );
        if let Some(caller) = entry.caller() {
            json_obj.insert(
                "file".to_string(),
                serde_json::Value::String(caller.to_string()),
            );
        }

        let mut bytes = serde_json::to_vec(&serde_json::Value::Object(json_obj))
            .map_err(|e| LoggerError::formatter("json", e.to_string()))?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn logfmt_value(&self, value: &FieldValue) -> String {
        match value {
            FieldValue::String(s) => self.escape_logfmt_value(s),
            FieldValue::Error(e) => self.escape_logfmt_value(&e.to_string()),
            other => other.to_string(),
        }
    }

    /// Escape a logfmt key (remove spaces and special chars)
    fn escape_logfmt_key(&self, key: &str) -> String {
        key.chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
            .collect()
    }

    /// Escape a logfmt value (quote if contains spaces)
    fn escape_logfmt_value(&self, value: &str) -> String {
        if value.is_empty() || value.contains([' ', '"', '=', '\n', '\r', '\t']) {
            self.quote_logfmt_value(value)
        } else {
            value.to_string()
        }
    }

    /// Quote a logfmt value, escaping control characters
    fn quote_logfmt_value(&self, value: &str) -> String {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('"');
        for c in value.chars() {
            match c {
                '\\' => quoted.push_str("\\\\"),
                '"' => quoted.push_str("\\\""),
                '\n' => quoted.push_str("\\n"),
                '\r' => quoted.push_str("\\r"),
                '\t' => quoted.push_str("\\t"),
                c => quoted.push(c),
            }
        }
        quoted.push('"');
        quoted
    }
}
