use crate::caught::Caught;
use crate::payload::Fields;

/// Optional diagnostic block of an error value.
///
/// Present only when construction received a debug input (message, stack
/// request, caught exception, context, or a log request). Meant for
/// debugging and logging, not for handling: branch on the kind and payload.
#[derive(Default)]
pub struct DebugInfo {
    pub message:  Option<String>,
    pub stack:    Option<String>,
    pub caught:   Option<Caught>,
    pub context:  Option<Fields>,
    /// Set only when logging was requested; `true` once a log function ran.
    pub logged:   Option<bool>,
}

impl core::fmt::Debug for DebugInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut d = f.debug_struct("DebugInfo");

        if let Some(message) = &self.message {
            d.field("message", message);
        }
        if let Some(stack) = &self.stack {
            d.field("stack", &format_args!("<{} lines>", stack.lines().count()));
        }
        if let Some(caught) = &self.caught {
            d.field("caught", caught);
        }
        if let Some(context) = &self.context {
            d.field("context", context);
        }
        if let Some(logged) = &self.logged {
            d.field("logged", logged);
        }

        d.finish()
    }
}
