use crate::Severity;
use chrono::{DateTime, Local};
use serde_json::Value;
use std::{backtrace::Backtrace, backtrace::BacktraceStatus, borrow::Cow, sync::OnceLock};

/// One structured logging event.
///
/// A `Record` owns all its data, so it can be buffered and rendered later.
/// It is either created with [`Record::builder`], or converted from a
/// [`log::Record`] with [`Record::from_log`] (which is what happens with the `log` macros).
#[derive(Clone, Debug)]
pub struct Record {
    severity: Severity,
    logger: String,
    template: String,
    args: Vec<Value>,
    location: Location,
    pid: u32,
    process_name: String,
    thread_name: String,
    created: DateTime<Local>,
    error: Option<ErrorInfo>,
    extras: Vec<(String, Value)>,
}

/// Where in the source code a record was emitted.
#[derive(Clone, Debug, Default)]
pub struct Location {
    /// Path of the source file.
    pub path: Option<String>,
    /// Name of the emitting function.
    pub function: Option<String>,
    /// Line number.
    pub line: Option<u32>,
    /// Module path, like `my_crate::some_module`.
    pub module: Option<String>,
}
impl Location {
    /// The last component of the path.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.path
            .as_deref()
            .map(|path| path.rsplit(['/', '\\']).next().unwrap_or(path))
    }
}

impl Record {
    /// Starts building a record.
    #[must_use]
    pub fn builder() -> RecordBuilder {
        RecordBuilder::new()
    }

    /// Converts a record from the `log` facade.
    ///
    /// The key-value pairs of the record become extra fields, except for a pair with
    /// the key `error` that was captured as an error (`error:err = e`), which becomes the
    /// record's [`ErrorInfo`].
    ///
    /// The `log` macros hand over the message already rendered, so the template of the
    /// resulting record is the final message and it carries no separate arguments.
    #[must_use]
    pub fn from_log(record: &log::Record) -> Self {
        let template = match record.args().as_str() {
            Some(s) => s.to_string(),
            None => record.args().to_string(),
        };
        let mut builder = Self::builder()
            .severity(record.level().into())
            .logger(record.target())
            .template(template);
        builder.location = Location {
            path: record.file().map(ToString::to_string),
            function: None,
            line: record.line(),
            module: record.module_path().map(ToString::to_string),
        };

        let mut collector = KvCollector {
            extras: &mut builder.extras,
            error: &mut builder.error,
        };
        record.key_values().visit(&mut collector).ok();

        builder.build()
    }

    /// The severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Name of the emitting logger; for records from the `log` facade this is the target.
    #[must_use]
    pub fn logger(&self) -> &str {
        &self.logger
    }

    /// The raw message template, without arguments substituted.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The positional arguments.
    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// The rendered message.
    ///
    /// Without arguments, the template is returned as is.
    /// Otherwise each `{}` is replaced with the string form of the next argument,
    /// `{{` and `}}` produce literal braces; placeholders without a matching argument
    /// stay untouched.
    #[must_use]
    pub fn message(&self) -> Cow<'_, str> {
        if self.args.is_empty() {
            Cow::Borrowed(&self.template)
        } else {
            Cow::Owned(render(&self.template, &self.args))
        }
    }

    /// The source location.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Id of the emitting process.
    #[must_use]
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Name of the emitting process.
    #[must_use]
    pub fn process_name(&self) -> &str {
        &self.process_name
    }

    /// Name of the emitting thread.
    #[must_use]
    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    /// Creation time.
    #[must_use]
    pub fn created(&self) -> &DateTime<Local> {
        &self.created
    }

    /// Creation time in seconds since the epoch, with microsecond precision.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn created_epoch(&self) -> f64 {
        self.created.timestamp_micros() as f64 / 1_000_000.0
    }

    /// The attached error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    /// The extra fields, in the order they were added.
    #[must_use]
    pub fn extras(&self) -> &[(String, Value)] {
        &self.extras
    }
}

/// Builder for [`Record`].
///
/// Everything not set explicitly gets a sensible default: severity `INFO`,
/// logger `root`, the current process and thread, and the current time.
#[derive(Debug)]
pub struct RecordBuilder {
    severity: Severity,
    logger: String,
    template: String,
    args: Vec<Value>,
    location: Location,
    thread_name: Option<String>,
    created: Option<DateTime<Local>>,
    error: Option<ErrorInfo>,
    extras: Vec<(String, Value)>,
}
impl RecordBuilder {
    fn new() -> Self {
        Self {
            severity: Severity::INFO,
            logger: String::from("root"),
            template: String::new(),
            args: Vec::new(),
            location: Location::default(),
            thread_name: None,
            created: None,
            error: None,
            extras: Vec::new(),
        }
    }

    /// Sets the severity.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the logger name.
    #[must_use]
    pub fn logger<S: Into<String>>(mut self, logger: S) -> Self {
        self.logger = logger.into();
        self
    }

    /// Sets the message template.
    #[must_use]
    pub fn template<S: Into<String>>(mut self, template: S) -> Self {
        self.template = template.into();
        self
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn arg<V: Into<Value>>(mut self, arg: V) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Sets the path of the source file.
    #[must_use]
    pub fn file<S: Into<String>>(mut self, path: S) -> Self {
        self.location.path = Some(path.into());
        self
    }

    /// Sets the name of the emitting function.
    #[must_use]
    pub fn function<S: Into<String>>(mut self, function: S) -> Self {
        self.location.function = Some(function.into());
        self
    }

    /// Sets the line number.
    #[must_use]
    pub fn line(mut self, line: u32) -> Self {
        self.location.line = Some(line);
        self
    }

    /// Sets the module path.
    #[must_use]
    pub fn module<S: Into<String>>(mut self, module: S) -> Self {
        self.location.module = Some(module.into());
        self
    }

    /// Overrides the thread name, which by default is taken from the current thread.
    #[must_use]
    pub fn thread_name<S: Into<String>>(mut self, thread_name: S) -> Self {
        self.thread_name = Some(thread_name.into());
        self
    }

    /// Overrides the creation time.
    #[must_use]
    pub fn created(mut self, created: DateTime<Local>) -> Self {
        self.created = Some(created);
        self
    }

    /// Attaches an error.
    #[must_use]
    pub fn error(mut self, error: ErrorInfo) -> Self {
        self.error = Some(error);
        self
    }

    /// Adds an extra field.
    #[must_use]
    pub fn extra<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.extras.push((key.into(), value.into()));
        self
    }

    /// Creates the record.
    #[must_use]
    pub fn build(self) -> Record {
        Record {
            severity: self.severity,
            logger: self.logger,
            template: self.template,
            args: self.args,
            location: self.location,
            pid: std::process::id(),
            process_name: process_name().to_string(),
            thread_name: self.thread_name.unwrap_or_else(|| {
                std::thread::current()
                    .name()
                    .unwrap_or("<unnamed>")
                    .to_string()
            }),
            created: self.created.unwrap_or_else(Local::now),
            error: self.error,
            extras: self.extras,
        }
    }
}

/// Error information attached to a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorInfo {
    type_name: Option<String>,
    message: String,
    causes: Vec<String>,
    backtrace: Option<String>,
}
impl ErrorInfo {
    /// Captures the error, its chain of sources, and, if enabled by `RUST_BACKTRACE` or
    /// `RUST_LIB_BACKTRACE`, a backtrace of the current position.
    #[must_use]
    pub fn capture<E: std::error::Error + 'static>(err: &E) -> Self {
        let mut info = Self::capture_dyn(err);
        info.type_name = Some(short_type_name(std::any::type_name::<E>()).to_string());
        info
    }

    /// Like [`ErrorInfo::capture`], for errors whose concrete type is not known.
    #[must_use]
    pub fn capture_dyn(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        let backtrace = Backtrace::capture();
        Self {
            type_name: None,
            message: err.to_string(),
            causes,
            backtrace: if backtrace.status() == BacktraceStatus::Captured {
                Some(backtrace.to_string())
            } else {
                None
            },
        }
    }

    /// Creates the error information from plain text, without backtrace.
    #[must_use]
    pub fn from_message<S: Into<String>>(type_name: Option<&str>, message: S) -> Self {
        Self {
            type_name: type_name.map(ToString::to_string),
            message: message.into(),
            causes: Vec::new(),
            backtrace: None,
        }
    }

    /// The error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The formatted trace: the error, each of its causes, and the backtrace if one was
    /// captured, separated by newlines.
    #[must_use]
    pub fn stack_trace(&self) -> String {
        let mut lines = Vec::with_capacity(2 + self.causes.len());
        lines.push(match self.type_name {
            Some(ref type_name) => format!("{type_name}: {}", self.message),
            None => self.message.clone(),
        });
        for cause in &self.causes {
            lines.push(format!("Caused by: {cause}"));
        }
        if let Some(ref backtrace) = self.backtrace {
            lines.push(format!("Stack backtrace:\n{}", backtrace.trim_end()));
        }
        lines.join("\n")
    }
}

/// The string form of a value, as used for rendered messages and `argument_N` fields:
/// strings without quotes, everything else as JSON.
#[must_use]
pub fn value_to_string(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

fn render(template: &str, args: &[Value]) -> String {
    let mut rendered = String::with_capacity(template.len() + 16 * args.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('{', Some('{')) | ('}', Some('}')) => {
                chars.next();
                rendered.push(c);
            }
            ('{', Some('}')) => {
                chars.next();
                match args.next() {
                    Some(arg) => rendered.push_str(&value_to_string(arg)),
                    None => rendered.push_str("{}"),
                }
            }
            _ => rendered.push(c),
        }
    }
    rendered
}

fn short_type_name(full: &str) -> &str {
    // cut off the module path, but not within generic parameters
    let end = full.find('<').unwrap_or(full.len());
    match full[..end].rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}

fn process_name() -> &'static str {
    static PROCESS_NAME: OnceLock<String> = OnceLock::new();
    PROCESS_NAME.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|path| path.file_stem().map(|s| s.to_string_lossy().to_string()))
            .or_else(|| std::env::args().next())
            .unwrap_or_else(|| String::from("<unknown>"))
    })
}

struct KvCollector<'a> {
    extras: &'a mut Vec<(String, Value)>,
    error: &'a mut Option<ErrorInfo>,
}
impl<'kvs> log::kv::VisitSource<'kvs> for KvCollector<'_> {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        if key.as_str() == "error" {
            if let Some(err) = value.to_borrowed_error() {
                *self.error = Some(ErrorInfo::capture_dyn(err));
                return Ok(());
            }
        }
        let json =
            serde_json::to_value(&value).unwrap_or_else(|_| Value::String(value.to_string()));
        self.extras.push((key.as_str().to_string(), json));
        Ok(())
    }
}
