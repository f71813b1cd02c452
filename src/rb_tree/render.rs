use alloc::string::String;
use core::fmt::{self, Debug, Write};

use smallvec::SmallVec;

use super::{NodeRef, RbTree};

impl<I: Clone + Debug, K: Debug> RbTree<I, K> {
    /// Renders the tree as indented text, one node per line in pre-order.
    ///
    /// The first line gives the size and whether [`check`](Self::check) passes. Each
    /// node line lists its id, key, the ids of its parent and children (`nil` when
    /// absent) and its color; children sit two spaces deeper than their parent.
    /// Meant for debugging and test failure output.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_index::RbTree;
    ///
    /// let tree = RbTree::from([(1, 10), (2, 20)]);
    /// assert_eq!(
    ///     tree.render(),
    ///     "(size = 2, rbt = true)\n\
    ///      node(id=2, key=20, parent=nil, left=1, right=nil, black)\n  \
    ///      node(id=1, key=10, parent=2, left=nil, right=nil, red)"
    /// );
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_render(&mut out);
        out
    }

    fn write_render(&self, out: &mut String) -> fmt::Result {
        write!(out, "(size = {}, rbt = {})", self.len(), self.is_rbt())?;
        let Some(root) = self.root() else {
            return out.write_str("\n(empty tree)");
        };

        let mut stack: SmallVec<[(NodeRef<'_, I, K>, usize); 64]> = SmallVec::new();
        stack.push((root, 0));
        while let Some((node, depth)) = stack.pop() {
            out.push('\n');
            for _ in 0..depth {
                out.push_str("  ");
            }
            write!(
                out,
                "node(id={:?}, key={:?}, parent={}, left={}, right={}, {})",
                node.id(),
                node.key(),
                Label(node.parent()),
                Label(node.left()),
                Label(node.right()),
                if node.is_red() { "red" } else { "black" },
            )?;

            stack.extend(node.right().map(|right| (right, depth + 1)));
            stack.extend(node.left().map(|left| (left, depth + 1)));
        }
        Ok(())
    }
}

// Prints a linked node's id, or `nil`.
struct Label<'a, I, K>(Option<NodeRef<'a, I, K>>);

impl<I: Debug, K> fmt::Display for Label<'_, I, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(node) => write!(f, "{:?}", node.id()),
            None => f.write_str("nil"),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_renders_a_placeholder() {
        let tree: RbTree<u8, u8> = RbTree::new();
        assert_eq!(tree.render(), "(size = 0, rbt = true)\n(empty tree)");
    }

    #[test]
    fn children_are_indented_under_their_parent() {
        let tree = RbTree::from([(1, 10), (2, 20), (3, 30)]);
        let rendered = tree.render();
        let lines: alloc::vec::Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "node(id=2, key=20, parent=nil, left=1, right=3, black)");
        assert_eq!(lines[2], "  node(id=1, key=10, parent=2, left=nil, right=nil, black)");
        assert_eq!(lines[3], "  node(id=3, key=30, parent=2, left=nil, right=nil, black)");
    }
}
