use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node, Side};

/// Working stack for the iterative traversals. Sixteen inline slots cover a
/// balanced tree of tens of thousands of elements without spilling.
type TraversalStack = SmallVec<[Handle; 16]>;

/// The ordered-tree substrate: plain binary-search-tree mechanics over the
/// arena, with no knowledge of the coloring discipline.
///
/// Everything here preserves in-order value sequence and structural link
/// consistency; the red-black layer on top is the only code that reads or
/// writes colors to make balancing decisions. (Node creation tags new leaves
/// red, but that is a lifecycle default, not a decision.)
#[derive(Clone)]
pub(crate) struct BstCore<T> {
    nodes: Arena<Node<T>>,
    root: Option<Handle>,
}

impl<T> BstCore<T> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Every live arena slot is a linked tree node, so the arena's live
    /// count is the tree's element count.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn value(&self, handle: Handle) -> &T {
        self.nodes.get(handle).value()
    }

    #[inline]
    pub(crate) fn parent(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).parent()
    }

    #[inline]
    pub(crate) fn child(&self, handle: Handle, side: Side) -> Option<Handle> {
        self.nodes.get(handle).child(side)
    }

    #[inline]
    pub(crate) fn set_color(&mut self, handle: Handle, color: Color) {
        self.nodes.get_mut(handle).set_color(color);
    }

    /// The parent slot a node hangs from, or `None` for the root.
    pub(crate) fn slot_of(&self, node: Handle) -> Option<(Handle, Side)> {
        let parent = self.parent(node)?;
        let side = if self.child(parent, Side::Left) == Some(node) {
            Side::Left
        } else {
            debug_assert_eq!(self.child(parent, Side::Right), Some(node));
            Side::Right
        };
        Some((parent, side))
    }

    /// Hangs `child` from the given parent slot, or makes it the root, and
    /// fixes the back-reference. Used to reattach rotated subtrees.
    fn attach(&mut self, slot: Option<(Handle, Side)>, child: Handle) {
        match slot {
            Some((parent, side)) => self.nodes.get_mut(parent).set_child(side, Some(child)),
            None => self.root = Some(child),
        }
        self.nodes.get_mut(child).set_parent(slot.map(|(parent, _)| parent));
    }

    /// Empties the given parent slot, or clears the root.
    fn detach(&mut self, slot: Option<(Handle, Side)>) {
        match slot {
            Some((parent, side)) => self.nodes.get_mut(parent).set_child(side, None),
            None => self.root = None,
        }
    }
}

impl<T: Ord> BstCore<T> {
    /// Finds the node holding a value equal to `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            current = match key.cmp(self.value(handle).borrow()) {
                Ordering::Less => self.child(handle, Side::Left),
                Ordering::Equal => return Some(handle),
                Ordering::Greater => self.child(handle, Side::Right),
            };
        }
        None
    }

    /// Inserts `value` at its sorted leaf position and returns the new node,
    /// or `None` without mutating if an equal value is already stored.
    ///
    /// The new node is red (or the red default on a fresh root; the caller is
    /// expected to rebalance and blacken the root afterwards).
    pub(crate) fn insert_leaf(&mut self, value: T) -> Option<Handle> {
        let Some(root) = self.root else {
            let handle = self.nodes.alloc(Node::new(value));
            self.root = Some(handle);
            return Some(handle);
        };

        let mut current = root;
        let side = loop {
            let side = match value.cmp(self.value(current)) {
                Ordering::Less => Side::Left,
                Ordering::Equal => return None,
                Ordering::Greater => Side::Right,
            };
            match self.child(current, side) {
                Some(child) => current = child,
                None => break side,
            }
        };

        let handle = self.nodes.alloc(Node::new(value));
        self.nodes.get_mut(handle).set_parent(Some(current));
        self.nodes.get_mut(current).set_child(side, Some(handle));
        Some(handle)
    }

    /// The minimum of the subtree rooted at `subtree`.
    pub(crate) fn min_of(&self, subtree: Handle) -> Handle {
        let mut current = subtree;
        while let Some(left) = self.child(current, Side::Left) {
            current = left;
        }
        current
    }

    /// The maximum of the subtree rooted at `subtree`.
    pub(crate) fn max_of(&self, subtree: Handle) -> Handle {
        let mut current = subtree;
        while let Some(right) = self.child(current, Side::Right) {
            current = right;
        }
        current
    }

    /// Rotates so that `node` descends to the `down` side; the child on the
    /// opposite side is promoted into `node`'s slot. In-order sequence is
    /// preserved; colors are untouched.
    ///
    /// Rotating down to the left:
    ///
    /// ```text
    ///    p                      p
    ///    |                      |
    /// +-node-+              +-pivot-+
    /// |      |      -->     |       |
    /// a  +-pivot-+      +-node-+    c
    ///    |       |      |      |
    ///    b       c      a      b
    /// ```
    pub(crate) fn rotate(&mut self, node: Handle, down: Side) {
        let up = down.opposite();
        let pivot = self.child(node, up).expect("`BstCore::rotate()` - no child to promote!");
        let slot = self.slot_of(node);

        // The pivot's inner subtree changes sides: it hangs off `node` now.
        let inner = self.child(pivot, down);
        self.nodes.get_mut(node).set_child(up, inner);
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).set_parent(Some(node));
        }

        self.attach(slot, pivot);
        self.nodes.get_mut(pivot).set_child(down, Some(node));
        self.nodes.get_mut(node).set_parent(Some(pivot));
    }

    /// Removes the value held by `node`, relocating `replacement`'s value
    /// into its place, and returns the removed value.
    ///
    /// With no replacement, `node` must be a non-root leaf and its slot is
    /// simply emptied. With a replacement (an in-order neighbor, so it has at
    /// most one child), the replacement is spliced out of its own slot --
    /// its lone child, if any, moves up -- and its value moves into `node`.
    /// Exactly one arena slot is freed either way; colors are untouched.
    pub(crate) fn transplant(&mut self, node: Handle, replacement: Option<Handle>) -> T {
        match replacement {
            None => {
                debug_assert!(self.node(node).is_leaf());
                let slot = self.slot_of(node);
                self.detach(slot);
                self.nodes.take(node).into_value()
            }
            Some(replacement) => {
                debug_assert_ne!(node, replacement);
                let lone_child = self.node(replacement).left().or(self.node(replacement).right());
                let (parent, side) = self
                    .slot_of(replacement)
                    .expect("`BstCore::transplant()` - replacement cannot be the root!");

                self.nodes.get_mut(parent).set_child(side, lone_child);
                if let Some(child) = lone_child {
                    self.nodes.get_mut(child).set_parent(Some(parent));
                }

                let relocated = self.nodes.take(replacement).into_value();
                self.nodes.get_mut(node).replace_value(relocated)
            }
        }
    }
}

impl<T> BstCore<T> {
    /// Left subtree, node, right subtree. Always sorted for a search tree.
    pub(crate) fn inorder(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack = TraversalStack::new();
        let mut current = self.root;
        while current.is_some() || !stack.is_empty() {
            while let Some(handle) = current {
                stack.push(handle);
                current = self.node(handle).left();
            }
            let handle = stack.pop().expect("loop condition guarantees a stacked node");
            out.push(self.value(handle));
            current = self.node(handle).right();
        }
        out
    }

    /// Node, left subtree, right subtree.
    pub(crate) fn preorder(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack = TraversalStack::new();
        stack.extend(self.root);
        while let Some(handle) = stack.pop() {
            out.push(self.value(handle));
            // Right first so the left subtree pops (and prints) first.
            stack.extend(self.node(handle).right());
            stack.extend(self.node(handle).left());
        }
        out
    }

    /// Left subtree, right subtree, node.
    pub(crate) fn postorder(&self) -> Vec<&T> {
        // Emit node-right-left with a stack, then reverse.
        let mut out = Vec::with_capacity(self.len());
        let mut stack = TraversalStack::new();
        stack.extend(self.root);
        while let Some(handle) = stack.pop() {
            out.push(self.value(handle));
            stack.extend(self.node(handle).left());
            stack.extend(self.node(handle).right());
        }
        out.reverse();
        out
    }

    /// Level by level, left to right within a level.
    pub(crate) fn breadth_first(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len());
        let mut queue: VecDeque<Handle> = VecDeque::new();
        queue.extend(self.root);
        while let Some(handle) = queue.pop_front() {
            out.push(self.value(handle));
            queue.extend(self.node(handle).left());
            queue.extend(self.node(handle).right());
        }
        out
    }

    /// Edges on the longest root-to-leaf path; 0 for an empty or single-node
    /// tree.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: SmallVec<[(Handle, usize); 16]> = SmallVec::new();
        stack.extend(self.root.map(|root| (root, 0)));
        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(self.node(handle).left().map(|left| (left, depth + 1)));
            stack.extend(self.node(handle).right().map(|right| (right, depth + 1)));
        }
        height
    }
}
