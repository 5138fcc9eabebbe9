//! # exitus: errors as values
//!
//! Structured error values in place of panics and ad hoc error strings. An
//! [`ErrorValue`] carries a *kind*, a *payload* whose shape is fixed by the
//! kind, and an optional *debug block* (message, stack, caught exception,
//! context, log flag).
//!
//! ## Design
//!
//! - **Kinds** are types. Five recognized kinds ([`kind::Generic`],
//!   [`kind::Unknown`], [`kind::Unexpected`], [`kind::Filesystem`],
//!   [`kind::InvalidParameters`]) bind a fixed payload through
//!   [`Kind::Payload`]. Caller-defined kinds (`&'static str`, `String`,
//!   integers, [`KindId`]) carry an open [`Fields`] map.
//!
//! - **Construction** goes through [`construct`]. Without debug inputs the
//!   value has no debug block at all. A caught exception lends its message
//!   and stack as fallbacks; `StackRequest::Capture` records a trace that
//!   starts at the caller.
//!
//! - **Logging** is opt-in per value: a log request routes the new value to
//!   the function registered for a [`Severity`] in the process-wide logger
//!   registry ([`set_logger_config`]). Misconfiguration is a `tracing`
//!   warning, never a failure.
//!
//! ## Quick Start
//!
//! ```rust
//! use exitus::{construct, is_error_value, kind::InvalidParameters, ExResult, NewError,
//!              ParamsPayload};
//!
//! fn parse_port(raw: &str) -> ExResult<u16, InvalidParameters> {
//!     raw.parse().map_err(|e| {
//!         construct(
//!             NewError::with_kind(InvalidParameters)
//!                 .with_payload(ParamsPayload::param("port"))
//!                 .with_message("port is not a number")
//!                 .with_source(e),
//!         )
//!     })
//! }
//!
//! let err = parse_port("http").unwrap_err();
//! assert!(is_error_value(&err));
//! assert_eq!(err.payload().params, ["port"]);
//! ```
//!
//! ## Environment
//!
//! | Variable             | Effect |
//! |----------------------|--------|
//! | `EXITUS_LOG_BACKEND` | `tracing`: start with every severity forwarded to `tracing` |
//! | `EXITUS_LOG_LEVEL`   | Least severe level the tracing backend registers |

mod caught;
mod context;
mod convert;
mod env;
mod error;
mod id;
#[macro_use]
mod macros;
mod logger;
mod payload;
mod stack;

pub mod kind;

// ── Public API ────────────────────────────────────────────────────

pub use caught::{Caught, Fault};
pub use context::DebugInfo;
pub use convert::ResultExt;
pub use error::{
    construct, construct_with, is_error_value, DebugProps, ErrorReport, ErrorValue, LogRequest,
    NewError, StackRequest,
};
pub use id::KindId;
pub use kind::{ErrorKind, Kind};
pub use logger::{
    logger_config, set_logger_config, LogConfig, LogFunction, Severity, UnknownSeverity,
};
pub use payload::{Fields, FsPayload, ParamsPayload, Payload, Value};

/// Convenience Result alias.
pub type ExResult<T, K = kind::Generic> = Result<T, ErrorValue<K>>;
