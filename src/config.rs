//! Construction-time settings for [`RbTree`](crate::RbTree).

/// When to run the red-black checker after a successful `insert` or `delete`.
///
/// A check walks the whole tree, so enabling it turns every mutation into O(n).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Verification {
    /// Never verify.
    Never,
    /// Verify only when compiled with `debug_assertions`.
    #[default]
    DebugOnly,
    /// Always verify.
    Always,
}

impl Verification {
    pub(crate) const fn enabled(self) -> bool {
        match self {
            Verification::Never => false,
            Verification::DebugOnly => cfg!(debug_assertions),
            Verification::Always => true,
        }
    }
}

/// Settings for a new tree.
///
/// # Examples
///
/// ```
/// use rb_index::{Config, RbTree, Verification};
///
/// let config = Config::new().capacity(64).verification(Verification::Always);
/// let tree: RbTree<u32, i64> = RbTree::with_config(config);
/// assert!(tree.capacity() >= 64);
/// assert_eq!(tree.config().verification, Verification::Always);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Config {
    /// Number of nodes to reserve room for up front.
    pub capacity: usize,
    /// Post-mutation verification policy.
    pub verification: Verification,
}

impl Config {
    /// Returns the default settings: no reserved capacity, [`Verification::DebugOnly`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            capacity: 0,
            verification: Verification::DebugOnly,
        }
    }

    /// Sets the reserved capacity.
    #[must_use]
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the verification policy.
    #[must_use]
    pub const fn verification(mut self, verification: Verification) -> Self {
        self.verification = verification;
        self
    }
}
