use std::any::Any;
use std::backtrace::BacktraceStatus;
use std::error::Error;
use std::fmt;

/// A lower-level fault absorbed into an error value.
///
/// Kept for inspection. Construction asks it for a message and a stack to use
/// as fallbacks; which of the two a fault can provide depends on its form:
///
/// | Form     | `message()`              | `stack()`                  |
/// |----------|--------------------------|----------------------------|
/// | `Error`  | `Display` output         | none                       |
/// | `Anyhow` | `Display` output         | captured backtrace, if any |
/// | `Panic`  | `&str` / `String` payload| none                       |
/// | `Fault`  | [`Fault::message`]       | [`Fault::stack`]           |
/// | `Opaque` | none                     | none                       |
pub enum Caught {
    Error(Box<dyn Error + Send + Sync>),
    Anyhow(anyhow::Error),
    /// Text of a panic payload recovered with `catch_unwind`.
    Panic(Option<String>),
    /// A caller type implementing [`Fault`]. Its message and stack are read
    /// once, when the fault is absorbed.
    Fault {
        message: Option<String>,
        stack: Option<String>,
        value: Box<dyn Any + Send + Sync>,
    },
    Opaque(Box<dyn Any + Send + Sync>),
}

/// A caller-defined fault that may expose its own message and stack text.
///
/// ```
/// use exitus::{construct, Caught, Fault, NewError};
///
/// struct DriverFault {
///     trace: String,
/// }
///
/// impl Fault for DriverFault {
///     fn message(&self) -> Option<String> {
///         Some("driver reset".into())
///     }
///
///     fn stack(&self) -> Option<String> {
///         Some(self.trace.clone())
///     }
/// }
///
/// let err = construct(
///     NewError::new().with_caught(Caught::fault(DriverFault { trace: "at irq_handler".into() })),
/// );
/// assert_eq!(err.message(), Some("driver reset"));
/// assert_eq!(err.stack(), Some("at irq_handler"));
/// ```
pub trait Fault: Any + Send + Sync {
    fn message(&self) -> Option<String> {
        None
    }

    fn stack(&self) -> Option<String> {
        None
    }
}

impl Caught {
    pub fn error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Caught::Error(Box::new(error))
    }

    pub fn opaque<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Caught::Opaque(Box::new(value))
    }

    /// Absorb a caller fault, reading its message and stack.
    pub fn fault<F: Fault>(fault: F) -> Self {
        Caught::Fault {
            message: fault.message(),
            stack: fault.stack(),
            value: Box::new(fault),
        }
    }

    /// Absorb a `catch_unwind` payload. Only `&str` and `String` payloads
    /// keep their text.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let text = match payload.downcast::<String>() {
            Ok(s) => Some(*s),
            Err(payload) => payload.downcast_ref::<&'static str>().map(|s| s.to_string()),
        };
        Caught::Panic(text)
    }

    /// Message fallback, if this fault exposes one.
    pub fn message(&self) -> Option<String> {
        match self {
            Caught::Error(e) => Some(e.to_string()),
            Caught::Anyhow(e) => Some(e.to_string()),
            Caught::Panic(text) => text.clone(),
            Caught::Fault { message, .. } => message.clone(),
            Caught::Opaque(_) => None,
        }
    }

    /// Stack fallback, if this fault carries a captured trace.
    pub fn stack(&self) -> Option<String> {
        match self {
            Caught::Anyhow(e) => {
                let bt = e.backtrace();
                (bt.status() == BacktraceStatus::Captured).then(|| bt.to_string())
            }
            Caught::Fault { stack, .. } => stack.clone(),
            _ => None,
        }
    }

    /// The fault as a standard error, for the error forms.
    pub fn as_error(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Caught::Error(e) => Some(&**e),
            Caught::Anyhow(e) => Some(&**e),
            Caught::Panic(_) | Caught::Fault { .. } | Caught::Opaque(_) => None,
        }
    }

    /// Downcast an opaque or caller fault back to its concrete type. For the
    /// error forms use `as_error()?.downcast_ref()`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Caught::Fault { value, .. } | Caught::Opaque(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for Caught {
    fn from(error: anyhow::Error) -> Self {
        Caught::Anyhow(error)
    }
}

impl From<std::io::Error> for Caught {
    fn from(error: std::io::Error) -> Self {
        Caught::error(error)
    }
}

impl From<Box<dyn Error + Send + Sync>> for Caught {
    fn from(error: Box<dyn Error + Send + Sync>) -> Self {
        Caught::Error(error)
    }
}

impl fmt::Display for Caught {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Caught::Error(e) => write!(f, "{}", e),
            Caught::Anyhow(e) => write!(f, "{}", e),
            Caught::Panic(Some(text)) => write!(f, "panic: {}", text),
            Caught::Panic(None) => f.write_str("panic"),
            Caught::Fault { message: Some(text), .. } => f.write_str(text),
            Caught::Fault { message: None, .. } => f.write_str("<fault>"),
            Caught::Opaque(_) => f.write_str("<opaque>"),
        }
    }
}

impl fmt::Debug for Caught {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Caught::Error(e) => f.debug_tuple("Caught::Error").field(e).finish(),
            Caught::Anyhow(e) => f.debug_tuple("Caught::Anyhow").field(&e.to_string()).finish(),
            Caught::Panic(text) => f.debug_tuple("Caught::Panic").field(text).finish(),
            Caught::Fault { message, stack, .. } => f
                .debug_struct("Caught::Fault")
                .field("message", message)
                .field("stack", &stack.as_ref().map(|s| s.lines().count()))
                .finish_non_exhaustive(),
            Caught::Opaque(_) => f.write_str("Caught::Opaque(..)"),
        }
    }
}
