//! The structured JSON encoder.
//!
//! Every record becomes one single-line JSON document of the form
//!
//! ```text
//! {
//!   "@fields": {
//!     "errno": 0,
//!     "code_file": "main.rs", "code_func": "", "code_line": 17, "code_module": "my_app",
//!     "identifier": "my_app", "message_raw": "{} of {} done",
//!     "pid": 4711, "process_name": "my_app", "thread_name": "main",
//!     "user": "alice",
//!     "argument_0": "3", "argument_1": "4"
//!   },
//!   "msg": "3 of 4 done",
//!   "level": "info",
//!   "@timestamp": 1700000000.123456,
//!   "stackTrace": "..."
//! }
//! ```
//!
//! The field names are a compatibility contract with log ingestion tools.
//!
//! `@fields` holds `errno` (255 if an error is attached, otherwise 0), the fixed set of
//! renamed record attributes, the caller's extra fields, and one `argument_N` entry per
//! positional argument. Extra fields are skipped if their name starts with an underscore,
//! is `args`, or is already taken, or if their value is `null`. They never reach the top
//! level.
//!
//! `@timestamp` is only written if a timestamp format is configured,
//! `stackTrace` only if an error is attached.

use crate::{
    formats::TimestampFormat, record::value_to_string, EncodeError, Record, Severity,
};
use serde_derive::Serialize;
use serde_json::{Map, Value};
use std::{borrow::Cow, fmt::Write as _, io::Write};

type Accessor = fn(&Record) -> Result<Value, EncodeError>;

// The renamed record attributes, in output order.
const FIELD_MAPPING: [(&str, Accessor); 9] = [
    ("code_file", code_file),
    ("code_func", code_func),
    ("code_line", code_line),
    ("code_module", code_module),
    ("identifier", identifier),
    ("message_raw", message_raw),
    ("pid", pid),
    ("process_name", process_name),
    ("thread_name", thread_name),
];

fn code_file(record: &Record) -> Result<Value, EncodeError> {
    Ok(Value::from(record.location().file_name().unwrap_or_default()))
}
fn code_func(record: &Record) -> Result<Value, EncodeError> {
    Ok(Value::from(
        record.location().function.as_deref().unwrap_or_default(),
    ))
}
fn code_line(record: &Record) -> Result<Value, EncodeError> {
    record
        .location()
        .line
        .map(Value::from)
        .ok_or(EncodeError::Coercion {
            field: "code_line",
            expected: "integer",
        })
}
fn code_module(record: &Record) -> Result<Value, EncodeError> {
    Ok(Value::from(
        record.location().module.as_deref().unwrap_or_default(),
    ))
}
fn identifier(record: &Record) -> Result<Value, EncodeError> {
    Ok(Value::from(record.logger()))
}
fn message_raw(record: &Record) -> Result<Value, EncodeError> {
    Ok(Value::from(record.template()))
}
fn pid(record: &Record) -> Result<Value, EncodeError> {
    Ok(Value::from(record.pid()))
}
fn process_name(record: &Record) -> Result<Value, EncodeError> {
    Ok(Value::from(record.process_name()))
}
fn thread_name(record: &Record) -> Result<Value, EncodeError> {
    Ok(Value::from(record.thread_name()))
}

/// The fixed level lexicon of the JSON documents.
///
/// Severities without an entry, like `NOTSET`, `TRACE`, or unnamed values, map to `None`,
/// which is written as `null`.
#[must_use]
pub fn level_name(severity: Severity) -> Option<&'static str> {
    match severity {
        Severity::CRITICAL => Some("fatal"),
        Severity::ERROR => Some("error"),
        Severity::WARNING => Some("warn"),
        Severity::INFO => Some("info"),
        Severity::DEBUG => Some("debug"),
        _ => None,
    }
}

#[derive(Serialize)]
struct Document<'a> {
    #[serde(rename = "@fields")]
    fields: Map<String, Value>,
    msg: Cow<'a, str>,
    level: Option<&'static str>,
    #[serde(rename = "@timestamp", skip_serializing_if = "Option::is_none")]
    timestamp: Option<Value>,
    #[serde(rename = "stackTrace", skip_serializing_if = "Option::is_none")]
    stack_trace: Option<String>,
}

/// Renders the record as a single-line JSON document, without trailing newline.
///
/// # Errors
///
/// [`EncodeError::Coercion`] if a mapped field cannot be produced with its declared type,
/// e.g. if the record has no line number.
pub fn encode(record: &Record, timestamp: Option<&TimestampFormat>) -> Result<String, EncodeError> {
    let mut fields = Map::new();
    fields.insert(
        "errno".to_string(),
        Value::from(if record.error().is_some() { 255 } else { 0 }),
    );

    for (key, accessor) in FIELD_MAPPING {
        fields.insert(key.to_string(), accessor(record)?);
    }

    for (key, value) in record.extras() {
        if key.starts_with('_') || key == "args" || value.is_null() || fields.contains_key(key) {
            continue;
        }
        fields.insert(key.clone(), value.clone());
    }

    // must come after the extras, so that the check above does not shadow them
    for (idx, arg) in record.args().iter().enumerate() {
        fields.insert(
            format!("argument_{idx}"),
            Value::from(value_to_string(arg).into_owned()),
        );
    }

    let document = Document {
        fields,
        msg: record.message(),
        level: level_name(record.severity()),
        timestamp: timestamp.map(|ts| timestamp_value(ts, record)).transpose()?,
        stack_trace: record.error().map(crate::ErrorInfo::stack_trace),
    };
    Ok(serde_json::to_string(&document)?)
}

fn timestamp_value(timestamp: &TimestampFormat, record: &Record) -> Result<Value, EncodeError> {
    match timestamp {
        TimestampFormat::Epoch => Ok(Value::from(record.created_epoch())),
        TimestampFormat::Pattern(pattern) => {
            let mut formatted = String::with_capacity(32);
            write!(formatted, "{}", record.created().format(pattern)).map_err(|_| {
                EncodeError::Coercion {
                    field: "@timestamp",
                    expected: "string",
                }
            })?;
            Ok(Value::from(formatted))
        }
    }
}

/// A logline-formatter that writes the record as a JSON document (see [`encode`]).
///
/// # Errors
///
/// `std::io::Error` with kind `InvalidData` if the record cannot be encoded,
/// or from writing to the given writer.
pub fn json_format(
    w: &mut dyn Write,
    record: &Record,
    timestamp: Option<&TimestampFormat>,
) -> Result<(), std::io::Error> {
    let document = encode(record, timestamp)?;
    w.write_all(document.as_bytes())
}
