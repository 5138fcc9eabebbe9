//! Error kinds and their payload binding.
//!
//! The binding is carried by the type system: every kind type implements
//! [`Kind`], whose associated `Payload` is the shape an error of that kind
//! carries. Five recognized kinds have fixed shapes; caller-defined kinds
//! (`&'static str`, `String`, integers, [`KindId`]) carry an open [`Fields`]
//! map.
//!
//! | Kind                | Payload          |
//! |---------------------|------------------|
//! | `Generic`           | `Fields`         |
//! | `Unknown`           | `Fields`         |
//! | `Unexpected`        | `Fields`         |
//! | `Filesystem`        | `FsPayload`      |
//! | `InvalidParameters` | `ParamsPayload`  |
//! | custom              | `Fields`         |

use std::borrow::Cow;
use std::fmt;

use crate::payload::{Fields, FsPayload, ParamsPayload, Payload};
use crate::KindId;

mod sealed {
    pub trait Sealed {}
}

/// A type usable as an error kind. Sealed: the set of kind types is closed,
/// open-ended categorization goes through strings, integers or [`KindId`].
pub trait Kind: sealed::Sealed + Clone + fmt::Debug + Send + Sync + 'static {
    type Payload: Payload;

    /// Runtime discriminant of this kind.
    fn error_kind(&self) -> ErrorKind;
}

/// Runtime discriminant of an error's kind.
///
/// The recognized variants are the comparable tokens callers branch on;
/// `Name`, `Code` and `Id` carry caller-defined kinds.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Generic,
    Unknown,
    Unexpected,
    Filesystem,
    InvalidParameters,
    Name(Cow<'static, str>),
    Code(i64),
    Id(KindId),
}

impl ErrorKind {
    /// True for the five kinds with a fixed payload shape.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, ErrorKind::Name(_) | ErrorKind::Code(_) | ErrorKind::Id(_))
    }
}

/// Recognized kinds print their snake-case name, custom names print quoted
/// and ids print as `name(code)`, so the two never collide.
impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Generic => f.write_str("generic"),
            ErrorKind::Unknown => f.write_str("unknown"),
            ErrorKind::Unexpected => f.write_str("unexpected"),
            ErrorKind::Filesystem => f.write_str("filesystem"),
            ErrorKind::InvalidParameters => f.write_str("invalid_parameters"),
            ErrorKind::Name(name) => write!(f, "\"{}\"", name),
            ErrorKind::Code(code) => write!(f, "{}", code),
            ErrorKind::Id(id) => write!(f, "{:?}", id),
        }
    }
}

// ── Recognized kinds ──────────────────────────────────────────────

macro_rules! recognized_kind {
    ($(#[$doc:meta])* $name:ident => $payload:ty) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl sealed::Sealed for $name {}

        impl Kind for $name {
            type Payload = $payload;

            #[inline]
            fn error_kind(&self) -> ErrorKind {
                ErrorKind::$name
            }
        }
    };
}

recognized_kind!(
    /// The default kind. No structured payload expectation.
    Generic => Fields
);
recognized_kind!(
    /// A failure whose cause could not be determined.
    Unknown => Fields
);
recognized_kind!(
    /// A state the code did not expect to reach.
    Unexpected => Fields
);
recognized_kind!(
    /// A filesystem failure; the payload lists the files involved.
    Filesystem => FsPayload
);
recognized_kind!(
    /// Bad caller input; the payload lists the offending parameter names.
    InvalidParameters => ParamsPayload
);

// ── Caller-defined kinds ──────────────────────────────────────────

impl sealed::Sealed for &'static str {}

impl Kind for &'static str {
    type Payload = Fields;

    fn error_kind(&self) -> ErrorKind {
        ErrorKind::Name(Cow::Borrowed(*self))
    }
}

impl sealed::Sealed for String {}

impl Kind for String {
    type Payload = Fields;

    fn error_kind(&self) -> ErrorKind {
        ErrorKind::Name(Cow::Owned(self.clone()))
    }
}

impl sealed::Sealed for KindId {}

impl Kind for KindId {
    type Payload = Fields;

    fn error_kind(&self) -> ErrorKind {
        ErrorKind::Id(*self)
    }
}

macro_rules! code_kind {
    ($($int:ty),*) => {$(
        impl sealed::Sealed for $int {}

        impl Kind for $int {
            type Payload = Fields;

            fn error_kind(&self) -> ErrorKind {
                ErrorKind::Code(i64::from(*self))
            }
        }
    )*};
}

code_kind!(i64, i32, u32);

/// Invokes `$mac!(T)` once per kind type. Used where code has to enumerate
/// every `ErrorValue<K>` instantiation.
macro_rules! for_each_kind {
    ($mac:ident) => {
        $mac!(
            $crate::kind::Generic,
            $crate::kind::Unknown,
            $crate::kind::Unexpected,
            $crate::kind::Filesystem,
            $crate::kind::InvalidParameters,
            &'static str,
            String,
            $crate::KindId,
            i64,
            i32,
            u32
        )
    };
}

pub(crate) use for_each_kind;

#[cfg(test)]
mod tests {
    use super::*;

    const DOOM: KindId = KindId::new("doom", 100_001);

    #[test]
    fn recognized_discriminants() {
        assert_eq!(Generic.error_kind(), ErrorKind::Generic);
        assert_eq!(Unknown.error_kind(), ErrorKind::Unknown);
        assert_eq!(Unexpected.error_kind(), ErrorKind::Unexpected);
        assert_eq!(Filesystem.error_kind(), ErrorKind::Filesystem);
        assert_eq!(InvalidParameters.error_kind(), ErrorKind::InvalidParameters);
        assert!(Filesystem.error_kind().is_recognized());
    }

    #[test]
    fn custom_discriminants() {
        assert_eq!("timeout".error_kind(), ErrorKind::Name("timeout".into()));
        assert_eq!(String::from("timeout").error_kind(), "timeout".error_kind());
        assert_eq!(404i32.error_kind(), ErrorKind::Code(404));
        assert_eq!(404u32.error_kind(), 404i64.error_kind());
        assert_eq!(DOOM.error_kind(), ErrorKind::Id(DOOM));
        assert!(!DOOM.error_kind().is_recognized());
    }

    #[test]
    fn display() {
        assert_eq!(ErrorKind::InvalidParameters.to_string(), "invalid_parameters");
        assert_eq!(ErrorKind::Code(-3).to_string(), "-3");
        assert_eq!(DOOM.error_kind().to_string(), "doom(100001)");
        assert_eq!("timeout".error_kind().to_string(), "\"timeout\"");
    }

    #[test]
    fn custom_names_never_read_as_recognized() {
        assert_ne!("generic".error_kind().to_string(), Generic.error_kind().to_string());
        assert_ne!(
            KindId::new("filesystem", 7).error_kind().to_string(),
            Filesystem.error_kind().to_string()
        );
    }
}
