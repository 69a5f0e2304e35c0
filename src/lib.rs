// only enables the `doc_cfg` feature when the `docsrs` configuration attribute is defined
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_doctest_main)]
//! Pretty logging for the `log` facade: human-readable colored lines for terminals,
//! plain lines, single-line JSON documents for log shippers, or the local syslog.
//!
//! To get colored log lines on `stderr`, start `prettylog` e.g. like this:
//! ```rust
//! let _handle = prettylog::Logger::try_with_level("info").unwrap().start().unwrap();
//! log::info!("ready");
//! ```
//!
//! See
//!
//! * the builder [`Logger`] for a full description of all configuration options,
//! * [`LogConfig`] and [`basic_config`] for configuration from files or the environment,
//! * the module [`json`] for the exact layout of the JSON documents,
//! * the module [`writers`] for the available outputs,
//! * the module [`error_info`] for the error codes that are printed to stderr
//!   when writing fails.
//!
//! The available formats are
//!
//! * `stream`: `LEVELNAME:name:message` on stderr,
//! * `color` (the default): timestamp, thread name, and a severity-colored level on stderr,
//! * `json`: one JSON document per line on stdout,
//! * `syslog`: one message per record to the local syslog daemon.
//!
//! Records from the `log` macros carry their key-values into the output;
//! an `error` key that is captured with `:err` provides the stack trace:
//!
//! ```rust
//! # let _handle = prettylog::Logger::try_with_level("info").unwrap().start().unwrap();
//! let e = std::io::Error::other("disk full");
//! log::error!(user = "alice", error:err = e; "saving failed");
//! ```
//!
//! Colors need the default feature `colors`; without it the `color` format writes
//! the same layout without escape sequences.

mod formats;
mod log_config;
mod log_format;
mod logger;
mod logger_handle;
mod logging_context;
mod prettylog_error;
mod record;
mod severity;
mod util;

pub mod error_info;
pub mod json;
pub mod writers;

pub use crate::formats::{
    color_format, stream_format, syslog_format, DateFormat, FormatFunction, TimestampFormat,
};
pub use crate::json::{encode, json_format, level_name};
pub use crate::log_config::{
    LogConfig, ENV_BUFFERED, ENV_BUFFER_SIZE, ENV_DATE_FORMAT, ENV_FLUSH_LEVEL, ENV_FORMAT,
    ENV_LEVEL,
};
pub use crate::log_format::{build_writer, LogFormat};
pub use crate::logger::{basic_config, Logger, DEFAULT_BUFFER_SIZE, DEFAULT_FLUSH_LEVEL};
pub use crate::logger_handle::LoggerHandle;
pub use crate::logging_context::LoggingContext;
pub use crate::prettylog_error::{EncodeError, PrettyLogError};
pub use crate::record::{value_to_string, ErrorInfo, Location, Record, RecordBuilder};
pub use crate::severity::Severity;
