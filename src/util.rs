use crate::{formats::TimestampFormat, FormatFunction, Record};
use std::{cell::RefCell, io::Write};

#[derive(Copy, Clone, Debug)]
pub(crate) enum ErrorCode {
    Write,
    Flush,
    Format,
    Poison,
    DateFormat,
}
impl ErrorCode {
    fn as_index(self) -> &'static str {
        match self {
            Self::Write => "write",
            Self::Flush => "flush",
            Self::Format => "format",
            Self::Poison => "poison",
            Self::DateFormat => "dateformat",
        }
    }
}

// The error hook: everything that goes wrong while a record is on its way is reported here,
// because the logging call itself has no way to return an error.
pub(crate) fn eprint_err(error_code: ErrorCode, msg: &str, err: &dyn std::error::Error) {
    eprintln!(
        "[prettylog][ERRCODE::{code:?}] {msg}, caused by {err}\n    \
         See https://docs.rs/prettylog/latest/prettylog/error_info/index.html#{code_lc}",
        msg = msg,
        err = err,
        code = error_code,
        code_lc = error_code.as_index(),
    );
}

pub(crate) fn eprint_msg(error_code: ErrorCode, msg: &str) {
    eprintln!(
        "[prettylog][ERRCODE::{code:?}] {msg}\n    \
         See https://docs.rs/prettylog/latest/prettylog/error_info/index.html#{code_lc}",
        msg = msg,
        code = error_code,
        code_lc = error_code.as_index(),
    );
}

#[derive(Debug, thiserror::Error)]
#[error("{0} is poisoned")]
pub(crate) struct Poisoned(&'static str);

pub(crate) fn poison_err(what: &'static str) -> std::io::Error {
    std::io::Error::other(Poisoned(what))
}

// Reports an error of writing a record, with the code that matches its cause.
pub(crate) fn report_write_error(e: &std::io::Error) {
    if e.kind() == std::io::ErrorKind::InvalidData {
        eprint_err(ErrorCode::Format, "formatting failed", e);
    } else if e.get_ref().is_some_and(|inner| inner.is::<Poisoned>()) {
        eprint_err(ErrorCode::Poison, "writing failed", e);
    } else {
        eprint_err(ErrorCode::Write, "writing failed", e);
    }
}

// Thread-local buffer
pub(crate) fn buffer_with<F>(f: F)
where
    F: FnOnce(&RefCell<Vec<u8>>),
{
    thread_local! {
        static BUFFER: RefCell<Vec<u8>> = RefCell::new(Vec::with_capacity(200));
    }
    BUFFER.with(f);
}

// Formats the record completely into the thread-local buffer, and only then writes the line
// into the given writer, so that a formatting error never leaves a partial line behind.
pub(crate) fn write_buffered(
    format_function: FormatFunction,
    record: &Record,
    timestamp: Option<&TimestampFormat>,
    w: &mut dyn Write,
) -> Result<(), std::io::Error> {
    let mut result: Result<(), std::io::Error> = Ok(());

    buffer_with(|tl_buf| match tl_buf.try_borrow_mut() {
        Ok(mut buffer) => {
            result = format_line(format_function, record, timestamp, &mut buffer)
                .and_then(|()| w.write_all(&buffer));
            buffer.clear();
        }
        Err(_e) => {
            // We arrive here in the rare cases of recursive logging
            // (e.g. log calls in Debug or Display implementations of logged values)
            let mut tmp_buf = Vec::<u8>::with_capacity(200);
            result = format_line(format_function, record, timestamp, &mut tmp_buf)
                .and_then(|()| w.write_all(&tmp_buf));
        }
    });
    result
}

fn format_line(
    format_function: FormatFunction,
    record: &Record,
    timestamp: Option<&TimestampFormat>,
    buffer: &mut Vec<u8>,
) -> Result<(), std::io::Error> {
    (format_function)(buffer, record, timestamp).inspect_err(|_| buffer.clear())?;
    buffer.write_all(b"\n")
}
