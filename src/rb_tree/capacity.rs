use super::RbTree;
use crate::Config;
use crate::raw::RawRbTree;

impl<I, K> RbTree<I, K> {
    /// Creates an empty tree with room for at least `capacity` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_index::RbTree;
    ///
    /// let tree: RbTree<u32, i32> = RbTree::with_capacity(32);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(Config::new().capacity(capacity))
    }

    /// Creates an empty tree with the given settings.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        RbTree {
            raw: RawRbTree::with_capacity(config.capacity),
            config,
        }
    }

    /// Returns the number of elements the tree can hold without reallocating its
    /// node storage.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the settings this tree was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}
