use alloc::collections::BTreeMap;

use log::{debug, trace};
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::{Handle, Link};
use super::node::{Color, Node};

/// The red-black engine backing `RbTree`.
///
/// Insertion keeps the left-leaning discipline (no red right child survives a
/// mutation). Deletion is the classic six-case bottom-up fixup, with two extra
/// red-link rotations so that the left lean holds after it too.
#[derive(Clone)]
pub(crate) struct RawRbTree<I, K> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<I, K>>,
    /// Root link; `None` when the tree is empty.
    root: Link,
    /// Number of live nodes.
    len: usize,
    /// Maps each present identifier to the node currently holding it.
    index: BTreeMap<I, Handle>,
}

impl<I, K> RawRbTree<I, K> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            index: BTreeMap::new(),
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            index: BTreeMap::new(),
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn root(&self) -> Link {
        self.root
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns a reference to a node by handle.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<I, K> {
        &self.nodes[handle]
    }

    #[cfg(test)]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<I, K> {
        &mut self.nodes[handle]
    }

    /// Color of a link; nil is black.
    #[inline]
    pub(crate) fn color(&self, link: Link) -> Color {
        link.map_or(Color::Black, |handle| self.nodes[handle].color())
    }

    #[inline]
    fn is_red(&self, link: Link) -> bool {
        self.color(link).is_red()
    }

    #[inline]
    fn left_of(&self, link: Link) -> Link {
        link.and_then(|handle| self.nodes[handle].left())
    }

    fn set_color(&mut self, link: Link, color: Color) {
        if let Some(handle) = link {
            self.nodes[handle].set_color(color);
        }
    }

    /// Returns the leftmost node of the subtree rooted at `handle`.
    pub(crate) fn minimum(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.nodes[handle].left() {
            handle = left;
        }
        handle
    }

    /// Returns the rightmost node of the subtree rooted at `handle`.
    pub(crate) fn maximum(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.nodes[handle].right() {
            handle = right;
        }
        handle
    }

    pub(crate) fn first(&self) -> Link {
        self.root.map(|root| self.minimum(root))
    }

    pub(crate) fn last(&self) -> Link {
        self.root.map(|root| self.maximum(root))
    }

    /// Returns the next node in key order.
    pub(crate) fn successor(&self, handle: Handle) -> Link {
        if let Some(right) = self.nodes[handle].right() {
            return Some(self.minimum(right));
        }

        let mut node = handle;
        let mut up = self.nodes[node].parent();
        while let Some(parent) = up {
            if self.nodes[parent].right() != Some(node) {
                break;
            }
            node = parent;
            up = self.nodes[parent].parent();
        }
        up
    }

    /// Returns the previous node in key order.
    pub(crate) fn predecessor(&self, handle: Handle) -> Link {
        if let Some(left) = self.nodes[handle].left() {
            return Some(self.maximum(left));
        }

        let mut node = handle;
        let mut up = self.nodes[node].parent();
        while let Some(parent) = up {
            if self.nodes[parent].left() != Some(node) {
                break;
            }
            node = parent;
            up = self.nodes[parent].parent();
        }
        up
    }

    /// Number of nodes on the longest root-to-nil path.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: SmallVec<[(Handle, usize); 64]> = SmallVec::new();
        stack.extend(self.root.map(|root| (root, 1)));

        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[handle];
            stack.extend(node.left().map(|left| (left, depth + 1)));
            stack.extend(node.right().map(|right| (right, depth + 1)));
        }
        height
    }

    /// Number of black nodes on the left spine, i.e. on every root-to-nil path of a
    /// valid tree. The nil sentinel is not counted.
    pub(crate) fn black_height(&self) -> usize {
        let mut blacks = 0;
        let mut link = self.root;
        while let Some(handle) = link {
            let node = &self.nodes[handle];
            blacks += usize::from(!node.color().is_red());
            link = node.left();
        }
        blacks
    }

    /// Points `parent`'s child slot that held `old` at `new`, or the root if `old`
    /// had no parent. Does not touch `new`'s own parent link.
    fn replace_child(&mut self, parent: Link, old: Handle, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let node = &mut self.nodes[parent];
                if node.left() == Some(old) {
                    node.set_left(new);
                } else {
                    debug_assert_eq!(node.right(), Some(old), "`replace_child()` - not a child of `parent`");
                    node.set_right(new);
                }
            }
        }
    }

    /// Promotes the right child of `handle` into its place. The promoted node takes
    /// `handle`'s color and `handle` turns red. Returns the new subtree root.
    fn rotate_left(&mut self, handle: Handle) -> Handle {
        let promoted = self.nodes[handle].right().expect("`rotate_left()` - node has no right child!");
        let moved = self.nodes[promoted].left();
        let parent = self.nodes[handle].parent();

        self.nodes[handle].set_right(moved);
        if let Some(moved) = moved {
            self.nodes[moved].set_parent(Some(handle));
        }

        self.replace_child(parent, handle, Some(promoted));
        self.nodes[promoted].set_parent(parent);
        self.nodes[promoted].set_left(Some(handle));
        self.nodes[handle].set_parent(Some(promoted));

        let color = self.nodes[handle].color();
        self.nodes[promoted].set_color(color);
        self.nodes[handle].set_color(Color::Red);

        trace!("rotate_left: slot {} over slot {}", promoted.slot(), handle.slot());
        promoted
    }

    /// Mirror of [`Self::rotate_left`].
    fn rotate_right(&mut self, handle: Handle) -> Handle {
        let promoted = self.nodes[handle].left().expect("`rotate_right()` - node has no left child!");
        let moved = self.nodes[promoted].right();
        let parent = self.nodes[handle].parent();

        self.nodes[handle].set_left(moved);
        if let Some(moved) = moved {
            self.nodes[moved].set_parent(Some(handle));
        }

        self.replace_child(parent, handle, Some(promoted));
        self.nodes[promoted].set_parent(parent);
        self.nodes[promoted].set_right(Some(handle));
        self.nodes[handle].set_parent(Some(promoted));

        let color = self.nodes[handle].color();
        self.nodes[promoted].set_color(color);
        self.nodes[handle].set_color(Color::Red);

        trace!("rotate_right: slot {} over slot {}", promoted.slot(), handle.slot());
        promoted
    }

    /// Toggles the color of `handle` and of both its children.
    fn flip_colors(&mut self, handle: Handle) {
        let node = &self.nodes[handle];
        let (left, right) = (node.left(), node.right());
        for link in [Some(handle), left, right] {
            let color = self.color(link).flipped();
            self.set_color(link, color);
        }
    }

    /// Restores the left lean when `top` is a red right child.
    fn lean_left(&mut self, top: Handle) {
        if !self.is_red(Some(top)) {
            return;
        }
        if let Some(parent) = self.nodes[top].parent()
            && self.nodes[parent].right() == Some(top)
            && !self.is_red(self.nodes[parent].left())
        {
            trace!("delete fixup: re-leaning slot {}", top.slot());
            self.rotate_left(parent);
        }
    }

    /// Walks from `link` to the root, fixing each ancestor of a freshly inserted red
    /// node in the left-leaning order: lean left, split a left double red, flip.
    fn fixup_insert(&mut self, mut link: Link) {
        while let Some(mut handle) = link {
            if self.is_red(self.nodes[handle].right()) && !self.is_red(self.nodes[handle].left()) {
                handle = self.rotate_left(handle);
            }
            let left = self.nodes[handle].left();
            if self.is_red(left) && self.is_red(self.left_of(left)) {
                handle = self.rotate_right(handle);
            }
            if self.is_red(self.nodes[handle].left()) && self.is_red(self.nodes[handle].right()) {
                self.flip_colors(handle);
            }
            link = self.nodes[handle].parent();
        }
    }

    /// Repairs a black-height deficit at `link`, whose parent is `parent`. `link` may be
    /// nil, which is why the parent travels separately.
    fn fixup_delete(&mut self, mut link: Link, mut parent: Link) {
        while let Some(up) = parent {
            if self.is_red(link) {
                break;
            }

            if self.nodes[up].left() == link {
                let mut sibling = self.nodes[up].right().expect("deficient subtree must have a sibling");
                if self.is_red(Some(sibling)) {
                    trace!("delete fixup: case 2 (left) at slot {}", up.slot());
                    self.rotate_left(up);
                    sibling = self.nodes[up].right().expect("deficient subtree must have a sibling");
                }

                let node = &self.nodes[sibling];
                if !self.is_red(node.left()) && !self.is_red(node.right()) {
                    trace!("delete fixup: case 3 (left) at slot {}", up.slot());
                    self.nodes[sibling].set_color(Color::Red);
                    // The red sibling is a right child; lifting it keeps the lean and
                    // leaves it in the parent's place to carry the deficit upward.
                    let top = self.rotate_left(up);
                    link = Some(top);
                    parent = self.nodes[top].parent();
                    continue;
                }

                if !self.is_red(self.nodes[sibling].right()) {
                    trace!("delete fixup: case 5 (left) at slot {}", sibling.slot());
                    self.rotate_right(sibling);
                }

                trace!("delete fixup: case 6 (left) at slot {}", up.slot());
                let top = self.rotate_left(up);
                let node = &self.nodes[top];
                let (left, right) = (node.left(), node.right());
                self.set_color(left, Color::Black);
                self.set_color(right, Color::Black);
                self.lean_left(top);
                return;
            }

            let mut sibling = self.nodes[up].left().expect("deficient subtree must have a sibling");
            if self.is_red(Some(sibling)) {
                trace!("delete fixup: case 2 (right) at slot {}", up.slot());
                self.rotate_right(up);
                sibling = self.nodes[up].left().expect("deficient subtree must have a sibling");
            }

            let node = &self.nodes[sibling];
            if !self.is_red(node.left()) && !self.is_red(node.right()) {
                trace!("delete fixup: case 3 (right) at slot {}", up.slot());
                self.nodes[sibling].set_color(Color::Red);
                link = Some(up);
                parent = self.nodes[up].parent();
                continue;
            }

            if !self.is_red(self.nodes[sibling].left()) {
                trace!("delete fixup: case 5 (right) at slot {}", sibling.slot());
                self.rotate_left(sibling);
            }

            trace!("delete fixup: case 6 (right) at slot {}", up.slot());
            let top = self.rotate_right(up);
            let node = &self.nodes[top];
            let (left, right) = (node.left(), node.right());
            self.set_color(left, Color::Black);
            self.set_color(right, Color::Black);
            self.lean_left(top);
            return;
        }

        // Case 1: the root, or a red node absorbing the deficit.
        self.set_color(link, Color::Black);
    }
}

impl<I: Ord + Clone, K: Ord> RawRbTree<I, K> {
    /// Returns the node holding `id`.
    pub(crate) fn get(&self, id: &I) -> Link {
        self.index.get(id).copied()
    }

    pub(crate) fn contains(&self, id: &I) -> bool {
        self.index.contains_key(id)
    }

    /// Points the index entry for the identifier stored in `handle` at `handle`.
    fn bind(&mut self, handle: Handle) {
        let id = self.nodes[handle].id().clone();
        self.index.insert(id, handle);
    }

    fn unbind(&mut self, id: &I) {
        let removed = self.index.remove(id);
        debug_assert!(removed.is_some(), "`unbind()` - identifier was not bound");
    }

    /// Inserts a new red node and rebalances. Hands `id` back if it is already present.
    pub(crate) fn insert(&mut self, id: I, key: K) -> Result<Handle, I> {
        if self.contains(&id) {
            return Err(id);
        }

        let mut parent = None;
        let mut link = self.root;
        let mut go_left = false;
        while let Some(handle) = link {
            let node = &self.nodes[handle];
            parent = Some(handle);
            // Ties go right.
            go_left = key < *node.key();
            link = if go_left { node.left() } else { node.right() };
        }

        let handle = self.nodes.alloc(Node::new(id, key));
        self.nodes[handle].set_parent(parent);
        match parent {
            None => self.root = Some(handle),
            Some(parent) if go_left => self.nodes[parent].set_left(Some(handle)),
            Some(parent) => self.nodes[parent].set_right(Some(handle)),
        }
        self.bind(handle);
        self.len += 1;

        self.fixup_insert(parent);
        let root = self.root;
        self.set_color(root, Color::Black);

        debug!("insert: slot {}, len {}", handle.slot(), self.len);
        Ok(handle)
    }

    /// Removes the node holding `id`, returning the removed `(id, key)`.
    pub(crate) fn delete(&mut self, id: &I) -> Option<(I, K)> {
        let target = self.get(id)?;

        // A node with two children trades payloads with its successor, which has no
        // left child, and the successor's slot is the one unlinked.
        let spliced = match (self.nodes[target].left(), self.nodes[target].right()) {
            (Some(_), Some(right)) => {
                let successor = self.minimum(right);
                let (node, next) = self.nodes.pair_mut(target, successor);
                node.swap_payload(next);
                self.bind(target);
                successor
            }
            _ => target,
        };

        let child = self.nodes[spliced].only_child();
        let parent = self.nodes[spliced].parent();
        if let Some(child) = child {
            self.nodes[child].set_parent(parent);
        }
        self.replace_child(parent, spliced, child);

        if !self.nodes[spliced].color().is_red() {
            if self.is_red(child) {
                self.set_color(child, Color::Black);
            } else {
                self.fixup_delete(child, parent);
            }
        }

        let node = self.nodes.take(spliced);
        self.unbind(node.id());
        self.len -= 1;

        debug!("delete: slot {} freed, len {}", spliced.slot(), self.len);
        Some(node.into_payload())
    }
}
