use core::fmt;
use core::iter::FusedIterator;
use core::ptr;

use log::error;

use crate::raw::{Handle, RawRbTree};
use crate::{Color, Config, Error, Report, Result};

mod capacity;
mod render;

/// An ordered index based on a red-black tree, with elements addressed by a stable
/// identifier.
///
/// Every element is an `(id, key)` pair. Elements are ordered by key; keys may repeat,
/// and equal keys keep their insertion order. The identifier is what callers use to
/// find or delete an element later, no matter how its key compares to others, which is
/// what a sweep-line status structure needs: segments move through the order while
/// their ids stay put.
///
/// Insertion uses the left-leaning discipline and deletion the bottom-up six-case
/// fixup; both run in O(log n). The identifier lookup goes through an ordered index,
/// also O(log n).
///
/// # Examples
///
/// ```
/// use rb_index::RbTree;
///
/// let mut status = RbTree::new();
/// status.insert("s1", 4).unwrap();
/// status.insert("s2", 1).unwrap();
/// status.insert("s3", 9).unwrap();
///
/// // Neighbors of a segment in key order.
/// assert_eq!(status.predecessor(&"s1").map(|node| *node.id()), Some("s2"));
/// assert_eq!(status.successor(&"s1").map(|node| *node.id()), Some("s3"));
///
/// // Deleting by identity hands back the element.
/// assert_eq!(status.delete(&"s1").unwrap(), Some(("s1", 4)));
/// assert_eq!(status.delete(&"s1").unwrap(), None);
///
/// let keys: Vec<_> = status.keys().copied().collect();
/// assert_eq!(keys, [1, 9]);
/// assert!(status.is_rbt());
/// ```
#[derive(Clone)]
pub struct RbTree<I, K> {
    raw: RawRbTree<I, K>,
    config: Config,
}

/// A shared view of one node of an [`RbTree`].
///
/// Obtained from [`RbTree::get`], [`RbTree::minimum`], [`RbTree::root`] and friends, and
/// used to walk the tree in key order or structurally.
pub struct NodeRef<'a, I, K> {
    raw: &'a RawRbTree<I, K>,
    handle: Handle,
}

impl<I, K> RbTree<I, K> {
    /// Makes a new, empty tree with the default [`Config`].
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_index::RbTree;
    ///
    /// let tree: RbTree<u32, f64> = RbTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        RbTree {
            raw: RawRbTree::new(),
            config: Config::new(),
        }
    }

    /// Returns the number of elements in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_index::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// assert!(tree.is_empty());
    /// tree.insert(1, "a").unwrap();
    /// assert!(!tree.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the root node, or `None` if the tree is empty.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, I, K>> {
        self.node_ref(self.raw.root())
    }

    /// Returns the node with the smallest key, or `None` if the tree is empty.
    ///
    /// Among equal keys this is the one inserted first.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn minimum(&self) -> Option<NodeRef<'_, I, K>> {
        self.node_ref(self.raw.first())
    }

    /// Returns the node with the largest key, or `None` if the tree is empty.
    ///
    /// Among equal keys this is the one inserted last.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn maximum(&self) -> Option<NodeRef<'_, I, K>> {
        self.node_ref(self.raw.last())
    }

    /// Number of nodes on the longest root-to-leaf path; 0 for an empty tree.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Number of black nodes on a root-to-leaf path, not counting the nil leaf.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn black_height(&self) -> usize {
        self.raw.black_height()
    }

    /// Gets an iterator over the elements of the tree, in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_index::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert('c', 3).unwrap();
    /// tree.insert('a', 1).unwrap();
    /// tree.insert('b', 1).unwrap();
    ///
    /// let elements: Vec<_> = tree.iter().collect();
    /// assert_eq!(elements, [(&'a', &1), (&'b', &1), (&'c', &3)]);
    /// ```
    pub fn iter(&self) -> Iter<'_, I, K> {
        Iter {
            raw: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Gets an iterator over the identifiers of the tree, in key order.
    pub fn ids(&self) -> Ids<'_, I, K> {
        Ids { inner: self.iter() }
    }

    /// Gets an iterator over the keys of the tree, in sorted order.
    pub fn keys(&self) -> Keys<'_, I, K> {
        Keys { inner: self.iter() }
    }

    fn node_ref(&self, link: Option<Handle>) -> Option<NodeRef<'_, I, K>> {
        link.map(|handle| NodeRef { raw: &self.raw, handle })
    }
}

impl<I: Clone, K> RbTree<I, K> {
    /// Checks the red-black coloring invariants and reports every violation.
    ///
    /// The expected black-height is counted once along the right spine; then every
    /// node is visited. A red node with a red child is a [`Fault::DoubleRed`]; a path
    /// with a different black count is a [`Fault::Unbalanced`]. The check itself never
    /// fails, and an empty tree is valid.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// [`Fault::DoubleRed`]: crate::Fault::DoubleRed
    /// [`Fault::Unbalanced`]: crate::Fault::Unbalanced
    pub fn check(&self) -> Report<I> {
        self.raw.check()
    }

    /// Returns `true` if [`check`](Self::check) finds no fault.
    #[must_use]
    pub fn is_rbt(&self) -> bool {
        self.check().is_valid()
    }

    fn verify(&self, operation: &str) -> Result<(), I> {
        if !self.config.verification.enabled() {
            return Ok(());
        }
        let report = self.check();
        if report.is_valid() {
            return Ok(());
        }
        error!("red-black check failed after {operation}: {} fault(s)", report.faults().len());
        Err(Error::InvariantViolation(report))
    }
}

impl<I: Ord + Clone, K: Ord> RbTree<I, K> {
    /// Inserts `key` under the identifier `id`.
    ///
    /// Equal keys are allowed and are placed after the ones already present.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateId`] if `id` is already in the tree; the tree is left as it was.
    /// [`Error::InvariantViolation`] if post-mutation verification is enabled and
    /// fails (see [`Verification`](crate::Verification)).
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_index::{Error, RbTree};
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(7, 105).unwrap();
    /// assert_eq!(tree.insert(7, 30), Err(Error::DuplicateId(7)));
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, id: I, key: K) -> Result<(), I> {
        self.raw.insert(id, key).map_err(Error::DuplicateId)?;
        self.verify("insert")
    }

    /// Deletes the element with identifier `id`, returning its `(id, key)`.
    ///
    /// Returns `Ok(None)` if `id` is not in the tree.
    ///
    /// # Errors
    ///
    /// [`Error::InvariantViolation`] if post-mutation verification is enabled and
    /// fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_index::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(1, 'x').unwrap();
    /// assert_eq!(tree.delete(&1).unwrap(), Some((1, 'x')));
    /// assert_eq!(tree.delete(&1).unwrap(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn delete(&mut self, id: &I) -> Result<Option<(I, K)>, I> {
        let Some(removed) = self.raw.delete(id) else {
            return Ok(None);
        };
        self.verify("delete")?;
        Ok(Some(removed))
    }

    /// Returns the node holding `id`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get(&self, id: &I) -> Option<NodeRef<'_, I, K>> {
        self.node_ref(self.raw.get(id))
    }

    /// Returns `true` if an element with identifier `id` is present.
    #[must_use]
    pub fn contains_id(&self, id: &I) -> bool {
        self.raw.contains(id)
    }

    /// Returns the key stored under `id`.
    #[must_use]
    pub fn key_of(&self, id: &I) -> Option<&K> {
        self.raw.get(id).map(|handle| self.raw.node(handle).key())
    }

    /// Returns the element that follows `id` in key order.
    ///
    /// `None` if `id` is absent or holds the largest key.
    #[must_use]
    pub fn successor(&self, id: &I) -> Option<NodeRef<'_, I, K>> {
        self.get(id)?.successor()
    }

    /// Returns the element that precedes `id` in key order.
    ///
    /// `None` if `id` is absent or holds the smallest key.
    #[must_use]
    pub fn predecessor(&self, id: &I) -> Option<NodeRef<'_, I, K>> {
        self.get(id)?.predecessor()
    }
}

impl<I, K> Default for RbTree<I, K> {
    /// Creates an empty `RbTree`.
    fn default() -> RbTree<I, K> {
        RbTree::new()
    }
}

impl<I: fmt::Debug, K: fmt::Debug> fmt::Debug for RbTree<I, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<I: Ord + Clone + fmt::Debug, K: Ord> Extend<(I, K)> for RbTree<I, K> {
    /// Inserts every element of the iterator.
    ///
    /// # Panics
    ///
    /// Panics if an identifier is already present, or if verification fails.
    #[inline]
    fn extend<T: IntoIterator<Item = (I, K)>>(&mut self, iter: T) {
        for (id, key) in iter {
            if let Err(err) = self.insert(id, key) {
                panic!("`RbTree::extend()` - {err}");
            }
        }
    }
}

impl<I: Ord + Clone + fmt::Debug, K: Ord> FromIterator<(I, K)> for RbTree<I, K> {
    /// # Panics
    ///
    /// Panics if the iterator yields the same identifier twice.
    fn from_iter<T: IntoIterator<Item = (I, K)>>(iter: T) -> RbTree<I, K> {
        let mut tree = RbTree::new();
        tree.extend(iter);
        tree
    }
}

impl<I: Ord + Clone + fmt::Debug, K: Ord, const N: usize> From<[(I, K); N]> for RbTree<I, K> {
    /// Builds a tree from an array of `(id, key)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if the array repeats an identifier.
    ///
    /// ```
    /// use rb_index::RbTree;
    ///
    /// let tree = RbTree::from([(1, 50), (2, 30), (3, 70)]);
    /// assert_eq!(tree.minimum().map(|node| *node.id()), Some(2));
    /// ```
    fn from(arr: [(I, K); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, I, K> IntoIterator for &'a RbTree<I, K> {
    type Item = (&'a I, &'a K);
    type IntoIter = Iter<'a, I, K>;

    fn into_iter(self) -> Iter<'a, I, K> {
        self.iter()
    }
}

impl<'a, I, K> NodeRef<'a, I, K> {
    /// The identifier stored in this node.
    #[must_use]
    pub fn id(&self) -> &'a I {
        self.raw.node(self.handle).id()
    }

    /// The key stored in this node.
    #[must_use]
    pub fn key(&self) -> &'a K {
        self.raw.node(self.handle).key()
    }

    /// The color of this node.
    #[must_use]
    pub fn color(&self) -> Color {
        self.raw.node(self.handle).color()
    }

    /// Returns `true` if this node is red.
    #[must_use]
    pub fn is_red(&self) -> bool {
        self.color().is_red()
    }

    /// The parent node, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.at(self.raw.node(self.handle).parent())
    }

    /// The left child, or `None` for nil.
    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.at(self.raw.node(self.handle).left())
    }

    /// The right child, or `None` for nil.
    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.at(self.raw.node(self.handle).right())
    }

    /// Returns the next node in key order, or `None` if this is the last one.
    ///
    /// # Complexity
    ///
    /// O(log n) worst case, O(1) amortized over a full walk.
    #[must_use]
    pub fn successor(&self) -> Option<Self> {
        self.at(self.raw.successor(self.handle))
    }

    /// Returns the previous node in key order, or `None` if this is the first one.
    #[must_use]
    pub fn predecessor(&self) -> Option<Self> {
        self.at(self.raw.predecessor(self.handle))
    }

    /// Returns the node with the smallest key in the subtree rooted here.
    #[must_use]
    pub fn minimum(&self) -> Self {
        Self {
            raw: self.raw,
            handle: self.raw.minimum(self.handle),
        }
    }

    /// Returns the node with the largest key in the subtree rooted here.
    #[must_use]
    pub fn maximum(&self) -> Self {
        Self {
            raw: self.raw,
            handle: self.raw.maximum(self.handle),
        }
    }

    fn at(&self, link: Option<Handle>) -> Option<Self> {
        link.map(|handle| Self { raw: self.raw, handle })
    }
}

impl<I, K> Clone for NodeRef<'_, I, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, K> Copy for NodeRef<'_, I, K> {}

impl<I, K> PartialEq for NodeRef<'_, I, K> {
    /// Two views are equal when they point at the same node of the same tree.
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.raw, other.raw) && self.handle == other.handle
    }
}

impl<I, K> Eq for NodeRef<'_, I, K> {}

impl<I: fmt::Debug, K: fmt::Debug> fmt::Debug for NodeRef<'_, I, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", self.id())
            .field("key", self.key())
            .field("color", &self.color())
            .finish()
    }
}

/// An iterator over the elements of an [`RbTree`], in key order.
///
/// This `struct` is created by the [`iter`] method on [`RbTree`].
///
/// [`iter`]: RbTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, I, K> {
    raw: &'a RawRbTree<I, K>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, I: 'a, K: 'a> Iterator for Iter<'a, I, K> {
    type Item = (&'a I, &'a K);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = self.raw.successor(handle);

        let node = self.raw.node(handle);
        Some((node.id(), node.key()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, I: 'a, K: 'a> DoubleEndedIterator for Iter<'a, I, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = self.raw.predecessor(handle);

        let node = self.raw.node(handle);
        Some((node.id(), node.key()))
    }
}

impl<I, K> ExactSizeIterator for Iter<'_, I, K> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<I, K> FusedIterator for Iter<'_, I, K> {}

impl<I, K> Clone for Iter<'_, I, K> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<I: fmt::Debug, K: fmt::Debug> fmt::Debug for Iter<'_, I, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the identifiers of an [`RbTree`], in key order.
///
/// This `struct` is created by the [`ids`] method on [`RbTree`].
///
/// [`ids`]: RbTree::ids
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Ids<'a, I, K> {
    inner: Iter<'a, I, K>,
}

impl<'a, I: 'a, K: 'a> Iterator for Ids<'a, I, K> {
    type Item = &'a I;

    fn next(&mut self) -> Option<&'a I> {
        self.inner.next().map(|(id, _)| id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, I: 'a, K: 'a> DoubleEndedIterator for Ids<'a, I, K> {
    fn next_back(&mut self) -> Option<&'a I> {
        self.inner.next_back().map(|(id, _)| id)
    }
}

impl<I, K> ExactSizeIterator for Ids<'_, I, K> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<I, K> FusedIterator for Ids<'_, I, K> {}

/// An iterator over the keys of an [`RbTree`], in sorted order.
///
/// This `struct` is created by the [`keys`] method on [`RbTree`].
///
/// [`keys`]: RbTree::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, I, K> {
    inner: Iter<'a, I, K>,
}

impl<'a, I: 'a, K: 'a> Iterator for Keys<'a, I, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(_, key)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, I: 'a, K: 'a> DoubleEndedIterator for Keys<'a, I, K> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(_, key)| key)
    }
}

impl<I, K> ExactSizeIterator for Keys<'_, I, K> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<I, K> FusedIterator for Keys<'_, I, K> {}
