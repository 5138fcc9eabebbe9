/// An opaque, comparable token for caller-defined error kinds.
///
/// Two ids are equal when their numeric `code` matches; the `name` is only
/// carried for display. Declare them as constants next to the code that
/// produces the errors:
///
/// ```
/// use exitus::KindId;
/// const INESCAPABLE_DOOM: KindId = KindId::new("inescapable_doom", 100_001);
/// ```
///
/// The crate reserves no codes; keeping them unique is up to the caller.
#[derive(Clone, Copy)]
pub struct KindId {
    pub name: &'static str,
    pub code: u64,
}

impl KindId {
    /// Construct a new KindId.
    pub const fn new(name: &'static str, code: u64) -> Self {
        Self { name, code }
    }
}

impl PartialEq for KindId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for KindId {}

impl core::hash::Hash for KindId {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl core::fmt::Debug for KindId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}({})", self.name, self.code)
    }
}

impl core::fmt::Display for KindId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOOM: KindId = KindId::new("doom", 100_001);

    #[test]
    fn equality_by_code() {
        let a = KindId::new("alpha", 1010);
        let b = KindId::new("beta", 1010);
        assert_eq!(a, b);
    }

    #[test]
    fn inequality() {
        let a = KindId::new("alpha", 1010);
        let b = KindId::new("alpha", 1011);
        assert_ne!(a, b);
    }

    #[test]
    fn display_shows_name() {
        assert_eq!(format!("{}", DOOM), "doom");
    }

    #[test]
    fn debug_shows_both() {
        assert_eq!(format!("{:?}", DOOM), "doom(100001)");
    }
}
