use super::handle::Link;

/// The color of a tree node.
///
/// The nil sentinel has no node record; it reads as [`Color::Black`] everywhere.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// Returns the opposite color.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// Returns true for [`Color::Red`].
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Color::Red)
    }
}

// A live node. Links are arena handles; `None` is the sentinel.
#[derive(Clone)]
pub(crate) struct Node<I, K> {
    id: I,
    key: K,
    color: Color,
    left: Link,
    right: Link,
    parent: Link,
}

impl<I, K> Node<I, K> {
    /// Creates a detached red node.
    pub(crate) const fn new(id: I, key: K) -> Self {
        Self {
            id,
            key,
            color: Color::Red,
            left: None,
            right: None,
            parent: None,
        }
    }

    #[inline]
    pub(crate) const fn id(&self) -> &I {
        &self.id
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Link {
        self.left
    }

    #[inline]
    pub(crate) fn set_left(&mut self, left: Link) {
        self.left = left;
    }

    #[inline]
    pub(crate) const fn right(&self) -> Link {
        self.right
    }

    #[inline]
    pub(crate) fn set_right(&mut self, right: Link) {
        self.right = right;
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Link {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Link) {
        self.parent = parent;
    }

    /// Returns the single child of a node with at most one child.
    pub(crate) fn only_child(&self) -> Link {
        debug_assert!(self.left.is_none() || self.right.is_none(), "node has two children");
        self.left.or(self.right)
    }

    /// Exchanges the `(id, key)` payloads of two nodes, leaving colors and links alone.
    pub(crate) fn swap_payload(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.id, &mut other.id);
        core::mem::swap(&mut self.key, &mut other.key);
    }

    /// Consumes the node, returning its payload.
    pub(crate) fn into_payload(self) -> (I, K) {
        (self.id, self.key)
    }
}
