//! Error codes of `prettylog`.
//!
//! Logging calls cannot return errors. Whatever goes wrong on the way of a record to its
//! output is therefore reported on stderr, with one of the following error codes.
//! Configuration errors are different: they are returned as
//! [`PrettyLogError`](crate::PrettyLogError) from the configuration methods.
//!
//! ## `Write`
//!
//! Writing the record to the output failed.
//!
//! Example:
//!
//! ```text
//! [prettylog][ERRCODE::Write] writing failed, caused by Connection refused (os error 111)
//! ```
//!
//! With the `syslog` format this usually means that no syslog daemon is listening.
//! The record is lost; subsequent records are tried again.
//!
//! ## `Flush`
//!
//! Explicit or automatic flushing of buffered records failed,
//! e.g. when the [`LoggerHandle`](crate::LoggerHandle) was dropped or the configuration was replaced.
//!
//! Example:
//!
//! ```text
//! [prettylog][ERRCODE::Flush] flushing buffered records failed, caused by ...
//! ```
//!
//! The buffer is emptied nevertheless; the failing records are lost, all others are written.
//!
//! ## `Format`
//!
//! The record could not be rendered in the chosen format.
//!
//! Example:
//!
//! ```text
//! [prettylog][ERRCODE::Format] formatting failed, caused by Field 'code_line' cannot be coerced to integer
//! ```
//!
//! The `json` format requires a line number; records that were created without one
//! (see [`RecordBuilder::line`](crate::RecordBuilder::line)) cannot be encoded.
//! Nothing of the record is written.
//!
//! ## `Poison`
//!
//! Records can be written by all threads of your program. The writers thus keep their
//! mutable parts in `Mutex`es and `RwLock`s. In case that a thread panics
//! while owning one of these locks, the lock is subsequently considered "poisoned".
//!
//! Most likely the root cause for this is a panic in a custom
//! [`LogWriter`](crate::writers::LogWriter) or format function.
//!
//! ## `DateFormat`
//!
//! A date format was configured together with the `syslog` format:
//!
//! ```text
//! [prettylog][ERRCODE::DateFormat] Can not apply "date_format" for syslog
//! ```
//!
//! The syslog daemon adds its own timestamps; the date format is ignored.
//! This notice goes to stderr the same way as the error reports above.
