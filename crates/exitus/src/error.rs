use std::any::Any;
use std::error::Error;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::caught::Caught;
use crate::context::DebugInfo;
use crate::kind::{for_each_kind, ErrorKind, Generic, Kind};
use crate::logger::{self, Severity};
use crate::payload::{Fields, Payload, Value};
use crate::stack;

/// A structured error value: a kind, the payload bound to that kind, and an
/// optional debug block.
///
/// Values are only produced by [`construct`] (or the wrappers around it) and
/// are immutable afterwards. Propagate them with `Result`, never by
/// panicking.
///
/// ```
/// use exitus::{construct, kind::Filesystem, FsPayload, NewError};
///
/// let err = construct(
///     NewError::with_kind(Filesystem)
///         .with_payload(FsPayload::file("/etc/exitus.toml"))
///         .with_message("config missing"),
/// );
/// assert_eq!(err.payload().files.len(), 1);
/// assert_eq!(err.message(), Some("config missing"));
/// ```
pub struct ErrorValue<K: Kind = Generic> {
    marker: bool,
    kind: K,
    payload: K::Payload,
    debug: Option<DebugInfo>,
}

/// Where the stack of a new error comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StackRequest {
    /// Fall back to the caught exception's stack, if any.
    #[default]
    Absent,
    /// Capture a trace at the call site.
    Capture,
    /// No stack, even if the caught exception has one.
    Suppress,
    /// Use this text verbatim.
    Literal(String),
}

impl StackRequest {
    /// Whether this request alone makes a debug block necessary.
    #[inline]
    pub fn is_debug_input(&self) -> bool {
        matches!(self, StackRequest::Capture | StackRequest::Literal(_))
    }
}

impl From<bool> for StackRequest {
    fn from(capture: bool) -> Self {
        if capture {
            StackRequest::Capture
        } else {
            StackRequest::Suppress
        }
    }
}

impl From<&str> for StackRequest {
    fn from(stack: &str) -> Self {
        StackRequest::Literal(stack.to_string())
    }
}

impl From<String> for StackRequest {
    fn from(stack: String) -> Self {
        StackRequest::Literal(stack)
    }
}

/// Whether, and at which severity, a new error is sent to the logger
/// registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogRequest {
    #[default]
    Off,
    /// Log at [`Severity::Error`].
    Default,
    Level(Severity),
    /// A severity given by name; names outside the fixed set are reported
    /// as invalid usage and nothing is logged.
    Named(String),
}

impl LogRequest {
    #[inline]
    pub fn is_requested(&self) -> bool {
        !matches!(self, LogRequest::Off)
    }
}

impl From<bool> for LogRequest {
    fn from(log: bool) -> Self {
        if log {
            LogRequest::Default
        } else {
            LogRequest::Off
        }
    }
}

impl From<Severity> for LogRequest {
    fn from(severity: Severity) -> Self {
        LogRequest::Level(severity)
    }
}

impl From<&str> for LogRequest {
    fn from(name: &str) -> Self {
        LogRequest::Named(name.to_string())
    }
}

/// Inputs to [`construct`]. Every field is optional; the defaults produce a
/// generic error with no debug block.
///
/// Build it with struct-literal syntax and `..Default::default()`, or with
/// the `with_*` methods.
#[derive(Debug)]
pub struct NewError<K: Kind = Generic> {
    pub kind:     K,
    pub payload:  K::Payload,
    pub message:  Option<String>,
    pub stack:    StackRequest,
    pub caught:   Option<Caught>,
    pub context:  Option<Fields>,
    pub log:      LogRequest,
}

/// The kind-less half of [`NewError`], for [`construct_with`].
#[derive(Debug, Default)]
pub struct DebugProps {
    pub message:  Option<String>,
    pub stack:    StackRequest,
    pub caught:   Option<Caught>,
    pub context:  Option<Fields>,
    pub log:      LogRequest,
}

impl<K: Kind + Default> Default for NewError<K> {
    fn default() -> Self {
        Self::with_kind(K::default())
    }
}

impl NewError<Generic> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: Kind> NewError<K> {
    pub fn with_kind(kind: K) -> Self {
        Self {
            kind,
            payload: K::Payload::default(),
            message: None,
            stack: StackRequest::Absent,
            caught: None,
            context: None,
            log: LogRequest::Off,
        }
    }

    pub fn with_payload(mut self, payload: K::Payload) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// `true` captures, `false` suppresses, a string is used verbatim.
    pub fn with_stack(mut self, stack: impl Into<StackRequest>) -> Self {
        self.stack = stack.into();
        self
    }

    pub fn with_caught(mut self, caught: impl Into<Caught>) -> Self {
        self.caught = Some(caught.into());
        self
    }

    /// Absorb any standard error as the caught exception.
    pub fn with_source<E>(self, error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.with_caught(Caught::error(error))
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context
            .get_or_insert_with(Fields::new)
            .insert(key.into(), value.into());
        self
    }

    /// `true` logs at `error`, a [`Severity`] or severity name logs there.
    pub fn with_log(mut self, log: impl Into<LogRequest>) -> Self {
        self.log = log.into();
        self
    }

    pub fn build(self) -> ErrorValue<K> {
        construct(self)
    }
}

// ── Construction ──────────────────────────────────────────────────

/// Build an error value.
///
/// 1. A debug block is assembled only if a debug input was given.
/// 2. A caught exception's message and stack fill in for missing ones.
/// 3. `StackRequest::Capture` records a trace starting at the caller,
///    unless the caught exception already supplied one.
/// 4. A log request looks the severity up in the logger registry. The log
///    function sees the value with `logged == Some(false)`; the flag flips
///    to `true` after it returns.
///
/// Never panics and never fails: a missing or invalid severity, or a log
/// function that panics, is reported as a `tracing` warning and leaves
/// `logged == Some(false)`.
pub fn construct<K: Kind>(props: NewError<K>) -> ErrorValue<K> {
    let NewError { kind, payload, message, stack: stack_request, caught, context, log } = props;

    let has_debug_input = caught.is_some()
        || message.is_some()
        || stack_request.is_debug_input()
        || context.is_some();

    let debug = if has_debug_input {
        let mut message = message;
        let mut fallback_stack = None;
        if let Some(caught) = &caught {
            if message.is_none() {
                message = caught.message();
            }
            fallback_stack = caught.stack();
        }

        let stack = match stack_request {
            StackRequest::Absent => fallback_stack,
            StackRequest::Capture => fallback_stack.or_else(stack::capture),
            StackRequest::Suppress => None,
            StackRequest::Literal(text) => Some(text),
        };

        Some(DebugInfo { message, stack, caught, context, logged: None })
    } else {
        None
    };

    let mut value = ErrorValue { marker: true, kind, payload, debug };

    if log.is_requested() {
        dispatch(&mut value, log);
    }

    value
}

/// Build an error of `kind` with a default payload from kind-less props.
pub fn construct_with<K: Kind>(kind: K, props: DebugProps) -> ErrorValue<K> {
    let DebugProps { message, stack, caught, context, log } = props;
    construct(NewError {
        kind,
        payload: K::Payload::default(),
        message,
        stack,
        caught,
        context,
        log,
    })
}

fn dispatch<K: Kind>(value: &mut ErrorValue<K>, request: LogRequest) {
    value.debug.get_or_insert_with(DebugInfo::default).logged = Some(false);

    let severity = match request {
        LogRequest::Off => return,
        LogRequest::Default => Severity::Error,
        LogRequest::Level(severity) => severity,
        LogRequest::Named(name) => match name.parse::<Severity>() {
            Ok(severity) => severity,
            Err(e) => {
                tracing::warn!(target: "exitus", kind = %value.error_kind(), error = %e,
                    "invalid log request; error value not logged");
                return;
            }
        },
    };

    let Some(log_fn) = logger::get(severity) else {
        tracing::warn!(target: "exitus", kind = %value.error_kind(), %severity,
            "no log function registered for severity; error value not logged");
        return;
    };

    let report: &dyn ErrorReport = &*value;
    if catch_unwind(AssertUnwindSafe(|| log_fn(report))).is_err() {
        tracing::warn!(target: "exitus", kind = %value.error_kind(), %severity,
            "log function panicked; error value not logged");
        return;
    }

    if let Some(debug) = value.debug.as_mut() {
        debug.logged = Some(true);
    }
}

// ── Accessors ─────────────────────────────────────────────────────

impl<K: Kind> ErrorValue<K> {
    /// Always `true` for a constructed value.
    #[inline]
    pub fn is_error_marker(&self) -> bool {
        self.marker
    }

    #[inline]
    pub fn kind(&self) -> &K {
        &self.kind
    }

    /// Runtime discriminant of the kind.
    pub fn error_kind(&self) -> ErrorKind {
        self.kind.error_kind()
    }

    #[inline]
    pub fn payload(&self) -> &K::Payload {
        &self.payload
    }

    /// The debug block. `None` when no debug input was given.
    #[inline]
    pub fn debug(&self) -> Option<&DebugInfo> {
        self.debug.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.debug.as_ref()?.message.as_deref()
    }

    pub fn stack(&self) -> Option<&str> {
        self.debug.as_ref()?.stack.as_deref()
    }

    pub fn caught(&self) -> Option<&Caught> {
        self.debug.as_ref()?.caught.as_ref()
    }

    pub fn context(&self) -> Option<&Fields> {
        self.debug.as_ref()?.context.as_ref()
    }

    /// `None` unless logging was requested.
    pub fn logged(&self) -> Option<bool> {
        self.debug.as_ref()?.logged
    }

    /// Split into kind, payload and debug block.
    pub fn into_parts(self) -> (K, K::Payload, Option<DebugInfo>) {
        (self.kind, self.payload, self.debug)
    }
}

// ── Type guard ────────────────────────────────────────────────────

/// True iff `value` is an error value built by this crate, of any kind.
///
/// Pass the value itself, not a box around it: for a `Box<dyn Any>` call
/// `is_error_value(boxed.as_ref())`. A `Box<dyn ErrorReport>` is recognized.
pub fn is_error_value(value: &dyn Any) -> bool {
    macro_rules! probe {
        ($($k:ty),*) => {
            $(
                if let Some(err) = value.downcast_ref::<ErrorValue<$k>>() {
                    return err.is_error_marker();
                }
            )*
        };
    }
    for_each_kind!(probe);

    if let Some(report) = value.downcast_ref::<Box<dyn ErrorReport>>() {
        return report.is_error_marker();
    }
    false
}

// ── Type-erased view ──────────────────────────────────────────────

/// Object-safe view of an error value of any kind. This is what log
/// functions receive.
pub trait ErrorReport: fmt::Debug + fmt::Display + Send + Sync {
    fn is_error_marker(&self) -> bool;

    fn error_kind(&self) -> ErrorKind;

    /// The payload flattened into a field map.
    fn payload_fields(&self) -> Fields;

    fn debug_info(&self) -> Option<&DebugInfo>;

    /// For downcasting back to the concrete `ErrorValue<K>`.
    fn as_any(&self) -> &dyn Any;
}

impl<K: Kind> ErrorReport for ErrorValue<K> {
    fn is_error_marker(&self) -> bool {
        self.marker
    }

    fn error_kind(&self) -> ErrorKind {
        self.kind.error_kind()
    }

    fn payload_fields(&self) -> Fields {
        self.payload.to_fields()
    }

    fn debug_info(&self) -> Option<&DebugInfo> {
        self.debug.as_ref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ── std::error::Error ─────────────────────────────────────────────

impl<K: Kind> Error for ErrorValue<K> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.caught()?.as_error()
    }
}

// ── Display ───────────────────────────────────────────────────────

impl<K: Kind> fmt::Display for ErrorValue<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.error_kind())?;

        if let Some(message) = self.message() {
            write!(f, " {}", message)?;
        }

        if let Some(caught) = self.caught() {
            if self.message() != caught.message().as_deref() {
                write!(f, "; caused by: {}", caught)?;
            }
        }

        Ok(())
    }
}

// ── Debug ─────────────────────────────────────────────────────────

impl<K: Kind> fmt::Debug for ErrorValue<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("ErrorValue");
        d.field("kind", &self.kind);
        d.field("payload", &self.payload);
        if let Some(debug) = &self.debug {
            d.field("debug", debug);
        }
        d.finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use serde_json::json;
    use serial_test::serial;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;
    use crate::kind::{Filesystem, InvalidParameters, Unexpected, Unknown};
    use crate::payload::{FsPayload, ParamsPayload};
    use crate::{set_logger_config, Fault, KindId, LogConfig};

    const DOOM: KindId = KindId::new("inescapable_doom", 100_001);

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Run `f` under a subscriber that records every event as text.
    fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
        let buf = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buf.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        (out, text)
    }

    #[test]
    fn bare_construct_is_generic_without_debug() {
        let err = construct(NewError::new());
        assert!(err.is_error_marker());
        assert_eq!(err.error_kind(), ErrorKind::Generic);
        assert!(err.payload().is_empty());
        assert!(err.debug().is_none());
        assert!(is_error_value(&err));
    }

    #[test]
    fn message_only() {
        let err = NewError::new().with_message("boom").build();
        let debug = err.debug().expect("debug block");
        assert_eq!(debug.message.as_deref(), Some("boom"));
        assert!(debug.stack.is_none());
        assert!(debug.caught.is_none());
        assert!(debug.logged.is_none());
    }

    #[test]
    fn suppress_alone_adds_no_debug() {
        let err = NewError::new().with_stack(false).build();
        assert!(err.debug().is_none());
    }

    #[test]
    fn literal_stack_is_verbatim() {
        let err = NewError::new().with_stack("at somewhere:1").build();
        assert_eq!(err.stack(), Some("at somewhere:1"));
    }

    #[test]
    fn context_alone_adds_debug() {
        let err = NewError::new().with_context("input", 4124309184571u64).build();
        let context = err.context().expect("context");
        assert_eq!(context["input"], json!(4124309184571u64));
        assert!(err.message().is_none());
    }

    #[test]
    fn caught_error_fills_message() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = NewError::with_kind(Filesystem).with_source(io_err).build();
        assert_eq!(err.message(), Some("denied"));
        assert!(err.source().is_some());
        assert!(err.stack().is_none());
    }

    #[test]
    fn explicit_message_beats_caught() {
        let err = NewError::new()
            .with_message("reading config")
            .with_caught(io::Error::new(io::ErrorKind::NotFound, "gone"))
            .build();
        assert_eq!(err.message(), Some("reading config"));
        assert_eq!(err.to_string(), "[generic] reading config; caused by: gone");
    }

    struct TracedFault;

    impl Fault for TracedFault {
        fn message(&self) -> Option<String> {
            Some("lower level".into())
        }

        fn stack(&self) -> Option<String> {
            Some("at lower::level (lower.rs:7)".into())
        }
    }

    #[test]
    fn caught_stack_is_fallback() {
        let err = NewError::new().with_caught(Caught::fault(TracedFault)).build();
        assert_eq!(err.message(), Some("lower level"));
        assert_eq!(err.stack(), Some("at lower::level (lower.rs:7)"));
        assert_eq!(err.to_string(), "[generic] lower level");
    }

    #[test]
    fn capture_keeps_caught_stack() {
        let err = NewError::new()
            .with_caught(Caught::fault(TracedFault))
            .with_stack(StackRequest::Capture)
            .build();
        assert_eq!(err.stack(), Some("at lower::level (lower.rs:7)"));
    }

    #[test]
    fn literal_overrides_caught_stack() {
        let err = NewError::new()
            .with_caught(Caught::fault(TracedFault))
            .with_stack("at caller (main.rs:1)")
            .build();
        assert_eq!(err.stack(), Some("at caller (main.rs:1)"));
        assert_eq!(err.message(), Some("lower level"));
    }

    #[test]
    fn suppress_drops_caught_stack() {
        let err = NewError::new()
            .with_caught(Caught::fault(TracedFault))
            .with_stack(false)
            .build();
        assert!(err.stack().is_none());
        assert!(err.debug().is_some());
        assert_eq!(err.message(), Some("lower level"));
    }

    #[test]
    fn opaque_caught_keeps_debug_without_message() {
        let err = NewError::new().with_caught(Caught::opaque(vec![1u8, 2])).build();
        assert!(err.message().is_none());
        let caught = err.caught().expect("caught");
        assert_eq!(caught.downcast_ref::<Vec<u8>>(), Some(&vec![1u8, 2]));
    }

    #[test]
    fn recognized_payload_shapes() {
        let fs = NewError::with_kind(Filesystem)
            .with_payload(FsPayload::files(["a.txt", "b.txt"]))
            .build();
        assert_eq!(fs.payload().files.len(), 2);
        assert_eq!(fs.error_kind(), ErrorKind::Filesystem);

        let params = NewError::with_kind(InvalidParameters)
            .with_payload(ParamsPayload::param("port").with_field("min", 1))
            .build();
        assert_eq!(params.payload().params, vec!["port".to_string()]);
        assert_eq!(params.payload().extra["min"], json!(1));

        assert_eq!(construct(NewError::with_kind(Unknown)).error_kind(), ErrorKind::Unknown);
        assert_eq!(construct(NewError::with_kind(Unexpected)).error_kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn custom_kinds() {
        let mut payload = Fields::new();
        payload.insert("retry_after".into(), json!(30));

        let by_id = NewError::with_kind(DOOM).with_payload(payload).build();
        assert_eq!(by_id.kind(), &DOOM);
        assert_eq!(by_id.payload()["retry_after"], json!(30));

        let by_name = construct(NewError::with_kind("rate_limited"));
        assert_eq!(by_name.error_kind(), ErrorKind::Name("rate_limited".into()));

        let by_code = construct(NewError::with_kind(503i32));
        assert_eq!(by_code.error_kind(), ErrorKind::Code(503));
        assert!(is_error_value(&by_code));
    }

    #[test]
    fn construct_with_kind_first() {
        let err = construct_with(
            InvalidParameters,
            DebugProps {
                message: Some("bad port".into()),
                ..Default::default()
            },
        );
        assert_eq!(err.error_kind(), ErrorKind::InvalidParameters);
        assert!(err.payload().params.is_empty());
        assert_eq!(err.message(), Some("bad port"));
    }

    #[test]
    fn struct_literal_props() {
        let err = construct(NewError {
            kind: Filesystem,
            payload: FsPayload::file("/tmp/x"),
            message: Some("cannot open".into()),
            ..Default::default()
        });
        assert_eq!(err.payload().files[0].to_str(), Some("/tmp/x"));
    }

    #[test]
    fn guard_rejects_non_errors() {
        assert!(!is_error_value(&()));
        assert!(!is_error_value(&None::<ErrorValue>));
        assert!(!is_error_value(&42));
        assert!(!is_error_value(&"error"));
        assert!(!is_error_value(&String::from("error")));
        let mut plain: HashMap<&str, bool> = HashMap::new();
        plain.insert("marker", true);
        assert!(!is_error_value(&plain));
    }

    #[test]
    fn guard_accepts_every_kind() {
        assert!(is_error_value(&construct(NewError::with_kind(Unknown))));
        assert!(is_error_value(&construct(NewError::with_kind(Filesystem))));
        assert!(is_error_value(&construct(NewError::with_kind(String::from("x")))));
        assert!(is_error_value(&construct(NewError::with_kind(7i64))));
        assert!(is_error_value(&construct(NewError::with_kind(7u32))));

        let boxed: Box<dyn Any> = Box::new(construct(NewError::with_kind(DOOM)));
        assert!(is_error_value(boxed.as_ref()));

        let report: Box<dyn ErrorReport> = Box::new(construct(NewError::new()));
        assert!(is_error_value(&report));
    }

    #[test]
    fn guard_is_idempotent() {
        let err = construct(NewError::new());
        assert_eq!(is_error_value(&err), is_error_value(&err));
    }

    #[test]
    fn report_view() {
        let err = NewError::with_kind(Filesystem)
            .with_payload(FsPayload::file("x"))
            .with_message("m")
            .build();
        let report: &dyn ErrorReport = &err;
        assert!(report.is_error_marker());
        assert_eq!(report.error_kind(), ErrorKind::Filesystem);
        assert_eq!(report.payload_fields()["files"], json!(["x"]));
        assert_eq!(report.debug_info().and_then(|d| d.message.as_deref()), Some("m"));
        assert!(report.as_any().downcast_ref::<ErrorValue<Filesystem>>().is_some());
    }

    #[test]
    fn debug_format() {
        let err = NewError::with_kind(DOOM).with_message("m").build();
        let s = format!("{:?}", err);
        assert!(s.starts_with("ErrorValue"), "got: {}", s);
        assert!(s.contains("inescapable_doom(100001)"), "got: {}", s);
        assert!(s.contains("\"m\""), "got: {}", s);
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ErrorValue>();
        assert_send_sync::<ErrorValue<Filesystem>>();
        assert_send_sync::<ErrorValue<KindId>>();
    }

    // ── Log dispatch (shares the process-wide registry) ───────────

    #[test]
    #[serial(logger_registry)]
    fn log_without_handler_warns() {
        set_logger_config(LogConfig::new());
        let (err, logs) = capture_logs(|| NewError::new().with_log(true).build());
        assert_eq!(err.logged(), Some(false));
        assert!(logs.contains("no log function registered"), "got: {}", logs);
        assert!(logs.contains("error"), "got: {}", logs);
    }

    #[test]
    #[serial(logger_registry)]
    fn log_request_creates_debug_block() {
        set_logger_config(LogConfig::new());
        let err = NewError::new().with_log(true).build();
        let debug = err.debug().expect("debug block");
        assert!(debug.message.is_none());
        assert_eq!(debug.logged, Some(false));
    }

    #[test]
    #[serial(logger_registry)]
    fn log_with_handler_calls_once_then_flags() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (c, s) = (calls.clone(), seen.clone());
        set_logger_config(LogConfig::new().with(Severity::Error, move |err| {
            c.fetch_add(1, Ordering::SeqCst);
            let logged = err.debug_info().and_then(|d| d.logged);
            s.lock().unwrap().push((err.error_kind(), logged, err.to_string()));
        }));

        let err = NewError::with_kind(Unexpected).with_message("oops").with_log(true).build();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(err.logged(), Some(true));

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].0, ErrorKind::Unexpected);
        assert_eq!(seen[0].1, Some(false));
        assert_eq!(seen[0].2, "[unexpected] oops");
        set_logger_config(LogConfig::new());
    }

    #[test]
    #[serial(logger_registry)]
    fn log_by_severity_and_name() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        set_logger_config(LogConfig::new().with(Severity::Warn, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        }));

        let by_level = NewError::new().with_log(Severity::Warn).build();
        let by_name = NewError::new().with_log("warn").build();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(by_level.logged(), Some(true));
        assert_eq!(by_name.logged(), Some(true));

        let default_level = NewError::new().with_log(true).build();
        assert_eq!(default_level.logged(), Some(false));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        set_logger_config(LogConfig::new());
    }

    #[test]
    #[serial(logger_registry)]
    fn invalid_severity_name_warns() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        set_logger_config(LogConfig::new().with(Severity::Error, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        }));

        let (err, logs) = capture_logs(|| NewError::new().with_log("loud").build());
        assert_eq!(err.logged(), Some(false));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(logs.contains("invalid log request"), "got: {}", logs);
        set_logger_config(LogConfig::new());
    }

    #[test]
    #[serial(logger_registry)]
    fn panicking_log_function_is_contained() {
        set_logger_config(LogConfig::new().with(Severity::Fatal, |_| panic!("logger down")));
        let (err, logs) = capture_logs(|| NewError::new().with_log(Severity::Fatal).build());
        assert_eq!(err.logged(), Some(false));
        assert!(logs.contains("log function panicked"), "got: {}", logs);
        set_logger_config(LogConfig::new());
    }

    #[test]
    #[serial(logger_registry)]
    fn log_off_touches_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        set_logger_config(LogConfig::new().with(Severity::Error, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        let err = NewError::new().with_log(false).build();
        assert!(err.debug().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        set_logger_config(LogConfig::new());
    }
}
