/// Construct an error value in one expression.
///
/// # Forms
///
/// ```ignore
/// // Generic, no debug block:
/// exitus!()
///
/// // Kind only:
/// exitus!(Filesystem)
///
/// // Kind + message:
/// exitus!(InvalidParameters, "port must be non-zero")
///
/// // With a caught exception:
/// exitus!(Filesystem, "opening config", caught = io_err)
///
/// // With field overrides:
/// exitus!(Filesystem, "opening config", {
///     payload: FsPayload::file(path),
///     stack: StackRequest::Capture,
/// })
///
/// // With caught exception + field overrides:
/// exitus!(Filesystem, "opening config", caught = io_err, {
///     log: LogRequest::Default,
/// })
/// ```
#[macro_export]
macro_rules! exitus {
    // ── Generic ───────────────────────────────────────────────
    () => {
        $crate::construct($crate::NewError::new())
    };

    // ── Kind only ─────────────────────────────────────────────
    ($kind:expr) => {
        $crate::construct($crate::NewError::with_kind($kind))
    };

    // ── Kind + message ────────────────────────────────────────
    ($kind:expr, $msg:expr) => {
        $crate::construct($crate::NewError::with_kind($kind).with_message($msg))
    };

    // ── With caught exception ─────────────────────────────────
    ($kind:expr, $msg:expr, caught = $caught:expr) => {
        $crate::construct(
            $crate::NewError::with_kind($kind)
                .with_message($msg)
                .with_caught($caught),
        )
    };

    // ── With field overrides ──────────────────────────────────
    ($kind:expr, $msg:expr, { $($field:ident : $value:expr),* $(,)? }) => {{
        #[allow(unused_mut)]
        let mut props = $crate::NewError::with_kind($kind).with_message($msg);
        $( props.$field = $value; )*
        $crate::construct(props)
    }};

    // ── With caught exception + field overrides ───────────────
    ($kind:expr, $msg:expr, caught = $caught:expr, { $($field:ident : $value:expr),* $(,)? }) => {{
        #[allow(unused_mut)]
        let mut props = $crate::NewError::with_kind($kind)
            .with_message($msg)
            .with_caught($caught);
        $( props.$field = $value; )*
        $crate::construct(props)
    }};
}

/// Early-return an error value if a condition is false.
///
/// ```ignore
/// ensure!(port != 0, InvalidParameters, "port must be non-zero");
/// ```
///
/// The value goes through `From`, so the enclosing function may return any
/// error type that converts from the constructed `ErrorValue`.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $kind:expr, $msg:expr) => {
        if !$cond {
            return Err(::core::convert::From::from($crate::exitus!($kind, $msg)));
        }
    };
    ($cond:expr, $kind:expr, $msg:expr, { $($field:ident : $value:expr),* $(,)? }) => {
        if !$cond {
            return Err(::core::convert::From::from(
                $crate::exitus!($kind, $msg, { $($field : $value),* })
            ));
        }
    };
}
