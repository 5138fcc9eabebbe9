use std::io;

use crate::error::{construct, ErrorValue, NewError};
use crate::kind::{Filesystem, Kind};

// ── From<io::Error> ───────────────────────────────────────────────

impl From<io::Error> for ErrorValue<Filesystem> {
    /// Absorb an `io::Error` as a filesystem error. The io error becomes the
    /// caught exception and supplies the message.
    fn from(err: io::Error) -> Self {
        construct(NewError::with_kind(Filesystem).with_caught(err))
    }
}

// ── ResultExt ─────────────────────────────────────────────────────

/// Turn any `Result` with a standard error into one carrying an
/// [`ErrorValue`], keeping the original error as the caught exception.
///
/// ```
/// use exitus::{kind::Filesystem, ResultExt};
///
/// let err = std::fs::read("/definitely/not/here")
///     .err_kind(Filesystem, "reading settings")
///     .unwrap_err();
/// assert_eq!(err.message(), Some("reading settings"));
/// assert!(err.caught().is_some());
/// ```
pub trait ResultExt<T> {
    /// Wrap the error into a generic error value with `msg` as message.
    fn err_context(self, msg: &str) -> Result<T, ErrorValue>;

    /// Wrap the error into an error value of `kind`, default payload.
    fn err_kind<K: Kind>(self, kind: K, msg: &str) -> Result<T, ErrorValue<K>>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn err_context(self, msg: &str) -> Result<T, ErrorValue> {
        self.map_err(|e| construct(NewError::new().with_message(msg).with_source(e)))
    }

    fn err_kind<K: Kind>(self, kind: K, msg: &str) -> Result<T, ErrorValue<K>> {
        self.map_err(|e| construct(NewError::with_kind(kind).with_message(msg).with_source(e)))
    }
}
