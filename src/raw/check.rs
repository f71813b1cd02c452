use smallvec::SmallVec;

use super::handle::Handle;
use super::raw_rb_tree::RawRbTree;
use crate::report::{Fault, Report};

impl<I: Clone, K> RawRbTree<I, K> {
    /// Checks the two coloring invariants: no red node has a red child, and every
    /// root-to-nil path crosses the same number of black nodes.
    ///
    /// The expected black count is taken from the right spine. Every node is visited
    /// even after a fault, so the report lists all offenders.
    pub(crate) fn check(&self) -> Report<I> {
        let mut report = Report::new();
        let Some(root) = self.root() else {
            return report;
        };

        let mut expected = 0;
        let mut link = Some(root);
        while let Some(handle) = link {
            let node = self.node(handle);
            expected += usize::from(!node.color().is_red());
            link = node.right();
        }

        // Pre-order, left first: push right before left.
        let mut stack: SmallVec<[(Handle, usize); 64]> = SmallVec::new();
        stack.push((root, 0));
        while let Some((handle, above)) = stack.pop() {
            let node = self.node(handle);
            let (left, right) = (node.left(), node.right());
            let blacks = above + usize::from(!node.color().is_red());

            if node.color().is_red() && (self.color(left).is_red() || self.color(right).is_red()) {
                report.push(Fault::DoubleRed(node.id().clone()));
            }
            if (left.is_none() || right.is_none()) && blacks != expected {
                report.push(Fault::Unbalanced {
                    parent: node.id().clone(),
                    expected,
                    found: blacks,
                });
            }

            stack.extend(right.map(|right| (right, blacks)));
            stack.extend(left.map(|left| (left, blacks)));
        }

        report
    }
}
