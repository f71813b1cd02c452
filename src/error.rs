use thiserror::Error;

use crate::Report;

/// Errors returned by the mutating operations of [`RbTree`](crate::RbTree).
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error<I> {
    /// The identifier passed to `insert` already names a node in the tree.
    /// Nothing was changed.
    #[error("identifier {0:?} is already present in the tree")]
    DuplicateId(I),

    /// Post-mutation verification found a broken red-black invariant. This is a bug in
    /// the balancing code, not a caller error; the tree should be discarded.
    #[error("red-black invariant violated: {0}")]
    InvariantViolation(Report<I>),
}

/// Result alias for fallible tree operations.
pub type Result<T, I> = core::result::Result<T, Error<I>>;
