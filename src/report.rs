//! Diagnostics produced by the red-black invariant checker.

use alloc::vec::Vec;
use core::fmt;

/// A single red-black invariant violation found by [`RbTree::check`].
///
/// [`RbTree::check`]: crate::RbTree::check
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Fault<I> {
    /// The red node with this identifier has a red child.
    DoubleRed(I),
    /// A root-to-nil path ending below `parent` crosses `found` black nodes where
    /// `expected` were counted along the right spine.
    Unbalanced { parent: I, expected: usize, found: usize },
}

impl<I> Fault<I> {
    /// Returns the identifier the fault is attributed to.
    pub fn id(&self) -> &I {
        match self {
            Fault::DoubleRed(id) | Fault::Unbalanced { parent: id, .. } => id,
        }
    }
}

/// Classification of a failed check.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FaultKind {
    DoubleRed,
    Unbalanced,
    Both,
}

/// The outcome of a red-black invariant check.
///
/// An empty report means the tree is valid. Faults from every subtree are kept, so a
/// single report can enumerate several offending nodes of both kinds.
///
/// # Examples
///
/// ```
/// use rb_index::RbTree;
///
/// let mut tree = RbTree::new();
/// tree.insert(1, 'a').unwrap();
/// tree.insert(2, 'b').unwrap();
///
/// let report = tree.check();
/// assert!(report.is_valid());
/// assert_eq!(report.kind(), None);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[must_use]
pub struct Report<I> {
    faults: Vec<Fault<I>>,
}

impl<I> Report<I> {
    pub(crate) const fn new() -> Self {
        Self { faults: Vec::new() }
    }

    pub(crate) fn push(&mut self, fault: Fault<I>) {
        self.faults.push(fault);
    }

    /// Returns true if no fault was found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.faults.is_empty()
    }

    /// Returns every fault, in the order the checker met them (pre-order, left first).
    #[must_use]
    pub fn faults(&self) -> &[Fault<I>] {
        &self.faults
    }

    /// Classifies the report, or `None` if it is valid.
    #[must_use]
    pub fn kind(&self) -> Option<FaultKind> {
        let double_red = self.faults.iter().any(|fault| matches!(fault, Fault::DoubleRed(_)));
        let unbalanced = self.faults.iter().any(|fault| matches!(fault, Fault::Unbalanced { .. }));
        match (double_red, unbalanced) {
            (false, false) => None,
            (true, false) => Some(FaultKind::DoubleRed),
            (false, true) => Some(FaultKind::Unbalanced),
            (true, true) => Some(FaultKind::Both),
        }
    }

    /// Iterates over the identifiers of all offending nodes.
    pub fn offenders(&self) -> impl Iterator<Item = &I> + '_ {
        self.faults.iter().map(Fault::id)
    }
}

impl<I: fmt::Debug> fmt::Display for Report<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = match self.kind() {
            None => return f.write_str("tree is a valid red-black tree"),
            Some(FaultKind::DoubleRed) => "tree has double red nodes",
            Some(FaultKind::Unbalanced) => "tree is not balanced",
            Some(FaultKind::Both) => "tree is not balanced and has double red nodes",
        };
        write!(f, "{summary} on ids ")?;
        f.debug_list().entries(self.offenders()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn empty_report_is_valid() {
        let report: Report<u32> = Report::new();
        assert!(report.is_valid());
        assert_eq!(report.kind(), None);
        assert_eq!(report.to_string(), "tree is a valid red-black tree");
    }

    #[test]
    fn merged_faults_are_classified_as_both() {
        let mut report = Report::new();
        report.push(Fault::DoubleRed(4u32));
        report.push(Fault::Unbalanced {
            parent: 9,
            expected: 3,
            found: 2,
        });

        assert_eq!(report.kind(), Some(FaultKind::Both));
        assert_eq!(report.offenders().copied().collect::<Vec<_>>(), [4, 9]);
        assert_eq!(report.to_string(), "tree is not balanced and has double red nodes on ids [4, 9]");
    }
}
