//! An ordered set backed by an arena-allocated red-black tree.

use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;

use crate::raw::RawRbTree;

/// An ordered set based on a red-black tree.
///
/// Nodes live in a flat arena and refer to each other by index, so the tree
/// needs no per-node heap allocation and no unsafe pointer juggling. Lookups,
/// insertions, and removals are O(log n): the coloring rules keep the height
/// within 2 * log2(n + 1) regardless of insertion order.
///
/// It is a logic error for an item to be modified in such a way that the
/// item's ordering relative to any other item, as determined by the [`Ord`]
/// trait, changes while it is in the set. This is normally only possible
/// through [`Cell`], [`RefCell`], global state, I/O, or unsafe code. The
/// behavior resulting from such a logic error is not specified, but will not
/// result in undefined behavior.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use rubi_tree::RbTreeSet;
///
/// let mut primes = RbTreeSet::new();
///
/// primes.insert(5);
/// primes.insert(2);
/// primes.insert(3);
///
/// assert!(primes.contains(&3));
/// assert!(!primes.contains(&4));
///
/// // Traversal output is always sorted.
/// assert_eq!(primes.inorder(), [&2, &3, &5]);
/// ```
///
/// A `RbTreeSet` with a known list of items can be initialized from an array:
///
/// ```
/// use rubi_tree::RbTreeSet;
///
/// let set = RbTreeSet::from([1, 2, 3]);
/// ```
#[derive(Clone)]
pub struct RbTreeSet<T> {
    tree: RawRbTree<T>,
}

impl<T> RbTreeSet<T> {
    /// Makes a new, empty `RbTreeSet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// let mut set = RbTreeSet::new();
    ///
    /// // entries can now be inserted into the empty set
    /// set.insert(1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> RbTreeSet<T> {
        RbTreeSet { tree: RawRbTree::new() }
    }

    /// Makes a new, empty `RbTreeSet` with room for at least `capacity`
    /// elements before the node arena reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// let mut set = RbTreeSet::with_capacity(100);
    /// assert!(set.capacity() >= 100);
    /// set.insert(1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> RbTreeSet<T> {
        RbTreeSet {
            tree: RawRbTree::with_capacity(capacity),
        }
    }

    /// Returns the number of elements the node arena can hold without
    /// reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// let mut a = RbTreeSet::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1);
    /// assert_eq!(a.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// let mut a = RbTreeSet::new();
    /// assert!(a.is_empty());
    /// a.insert(1);
    /// assert!(!a.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the set, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// let mut v = RbTreeSet::new();
    /// v.insert(1);
    /// v.clear();
    /// assert!(v.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the elements in sorted (in-order) order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// let set = RbTreeSet::from([13, 8, 17, 1, 11, 15, 25, 6]);
    /// assert_eq!(set.inorder(), [&1, &6, &8, &11, &13, &15, &17, &25]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn inorder(&self) -> Vec<&T> {
        self.tree.inorder()
    }

    /// Returns the elements in pre-order (each node before its subtrees).
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// let set = RbTreeSet::from([13, 8, 17, 1, 11, 15, 25, 6]);
    /// assert_eq!(set.preorder(), [&13, &8, &1, &6, &11, &17, &15, &25]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn preorder(&self) -> Vec<&T> {
        self.tree.preorder()
    }

    /// Returns the elements in post-order (each node after its subtrees).
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// let set = RbTreeSet::from([13, 8, 17, 1, 11, 15, 25, 6]);
    /// assert_eq!(set.postorder(), [&6, &1, &11, &8, &15, &25, &17, &13]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn postorder(&self) -> Vec<&T> {
        self.tree.postorder()
    }

    /// Returns the elements level by level, left to right within a level.
    /// The first element, if any, is the tree's root.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// let set = RbTreeSet::from([13, 8, 17, 1, 11, 15, 25, 6]);
    /// assert_eq!(set.breadth_first(), [&13, &8, &17, &1, &11, &15, &25, &6]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn breadth_first(&self) -> Vec<&T> {
        self.tree.breadth_first()
    }

    /// Returns the number of edges on the longest path from the root down to
    /// a leaf; 0 for an empty or single-element set.
    ///
    /// The balancing rules bound this by 2 * log2(n + 1).
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// // Sorted input degrades a plain binary search tree to a list; here
    /// // the height stays logarithmic.
    /// let set: RbTreeSet<i32> = (1..=100).collect();
    /// assert!(set.height() <= 13);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Returns the number of black nodes crossed walking from the root down
    /// to any absent child, counting the absent child but not the root; 0
    /// for an empty set.
    ///
    /// Every such path crosses the same number, so the choice of path does
    /// not matter.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// let set = RbTreeSet::from([13, 8, 17, 1, 11, 15, 25, 6]);
    /// assert_eq!(set.black_height(), 2);
    /// assert_eq!(RbTreeSet::<i32>::new().black_height(), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn black_height(&self) -> usize {
        self.tree.black_height()
    }
}

impl<T: Ord> RbTreeSet<T> {
    /// Returns `true` if the set contains a value.
    ///
    /// The value may be any borrowed form of the set's element type, but the
    /// ordering on the borrowed form *must* match the ordering on the
    /// element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// let set = RbTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.get(value).is_some()
    }

    /// Returns a reference to the value in the set, if any, that is equal to
    /// the given value.
    ///
    /// The value may be any borrowed form of the set's element type, but the
    /// ordering on the borrowed form *must* match the ordering on the
    /// element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// let set = RbTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.get(&2), Some(&2));
    /// assert_eq!(set.get(&4), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.get(value)
    }

    /// Returns the minimum element in the set, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// let mut set = RbTreeSet::new();
    /// assert_eq!(set.min(), None);
    /// set.insert(2);
    /// assert_eq!(set.min(), Some(&2));
    /// set.insert(1);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn min(&self) -> Option<&T> {
        self.tree.min()
    }

    /// Returns the maximum element in the set, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// let mut set = RbTreeSet::new();
    /// assert_eq!(set.max(), None);
    /// set.insert(1);
    /// assert_eq!(set.max(), Some(&1));
    /// set.insert(2);
    /// assert_eq!(set.max(), Some(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn max(&self) -> Option<&T> {
        self.tree.max()
    }

    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the set did not previously contain an equal value, `true` is
    ///   returned.
    /// - If the set already contained an equal value, `false` is returned,
    ///   and the entry is not updated.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// let mut set = RbTreeSet::new();
    ///
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n), with at most two rotations.
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.insert(value)
    }

    /// If the set contains an element equal to the value, removes it from
    /// the set and drops it. Returns whether such an element was present.
    ///
    /// The value may be any borrowed form of the set's element type, but the
    /// ordering on the borrowed form *must* match the ordering on the
    /// element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// let mut set = RbTreeSet::new();
    /// set.insert(2);
    /// assert_eq!(set.remove(&2), true);
    /// assert_eq!(set.remove(&2), false);
    /// ```
    ///
    /// Removing an interior element relocates a neighbor's value instead of
    /// rewiring the tree around it:
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// let mut set = RbTreeSet::from([13, 8, 17, 1, 11, 15, 25, 6]);
    /// assert!(set.remove(&13));
    /// // The in-order successor 15 took over the root position.
    /// assert_eq!(set.breadth_first()[0], &15);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n), with at most three rotations.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.remove(value)
    }

    /// Checks every structural and coloring rule of the underlying tree,
    /// panicking on the first violation.
    ///
    /// Intended for tests and debugging; a set that is only mutated through
    /// this API always passes.
    ///
    /// # Panics
    ///
    /// Panics if a red node has a red child, if paths disagree on their
    /// black counts, if the root is red, if the stored length disagrees with
    /// the node count, or if any link or ordering rule is broken.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RbTreeSet;
    ///
    /// let set: RbTreeSet<i32> = (1..=100).collect();
    /// set.validate();
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn validate(&self) {
        self.tree.validate();
    }
}

impl<T> Default for RbTreeSet<T> {
    fn default() -> Self {
        RbTreeSet::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for RbTreeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.inorder()).finish()
    }
}

impl<T: PartialEq> PartialEq for RbTreeSet<T> {
    /// Two sets are equal when they contain the same elements; the internal
    /// tree shapes may differ.
    fn eq(&self, other: &RbTreeSet<T>) -> bool {
        self.len() == other.len() && self.inorder() == other.inorder()
    }
}

impl<T: Eq> Eq for RbTreeSet<T> {}

impl<T: Ord> FromIterator<T> for RbTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = RbTreeSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for RbTreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for RbTreeSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for RbTreeSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}
