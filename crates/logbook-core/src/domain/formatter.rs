//! Formatter: renders a [`LogRecord`] into the line a handler writes.

use std::fmt;
use std::sync::Arc;

use super::record::LogRecord;

pub const DEFAULT_TEMPLATE: &str = "{levelName} {msg}";

/// How a handler turns a record into text.
///
/// `Template` substitutes `{levelName}`, `{level}`, `{msg}`, `{loggerName}`,
/// `{datetime}` and `{args}`. Unknown placeholders are kept verbatim.
#[derive(Clone)]
pub enum Formatter {
    Template(String),
    Custom(Arc<dyn Fn(&LogRecord) -> String + Send + Sync>),
}

impl Formatter {
    pub fn template(template: impl Into<String>) -> Self {
        Formatter::Template(template.into())
    }

    pub fn custom(f: impl Fn(&LogRecord) -> String + Send + Sync + 'static) -> Self {
        Formatter::Custom(Arc::new(f))
    }

    pub fn format(&self, record: &LogRecord) -> String {
        match self {
            Formatter::Template(template) => render_template(template, record),
            Formatter::Custom(f) => f(record),
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::Template(DEFAULT_TEMPLATE.to_string())
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formatter::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Formatter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn field(record: &LogRecord, key: &str) -> Option<String> {
    let value = match key {
        "levelName" => record.level_name().to_string(),
        "level" => record.level().rank().to_string(),
        "msg" => record.msg().to_string(),
        "loggerName" => record.logger_name().to_string(),
        "datetime" => record.datetime().to_rfc3339(),
        "args" => record.args().join(" "),
        _ => return None,
    };
    Some(value)
}

fn render_template(template: &str, record: &LogRecord) -> String {
    let mut out = String::with_capacity(template.len() + record.msg().len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            // unterminated placeholder
            out.push_str(&rest[open..]);
            return out;
        };

        let key = &after[..close];
        match field(record, key) {
            Some(value) => out.push_str(&value),
            None => {
                out.push('{');
                out.push_str(key);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}
