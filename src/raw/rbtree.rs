use alloc::vec::Vec;
use core::borrow::Borrow;

use super::bst::BstCore;
use super::handle::Handle;
use super::node::{Color, Side};

/// What the insertion fixup sees when it looks up from a red node.
enum InsertCase {
    /// The node is the root; blackening it ends the pass.
    RootReached,
    /// A black parent absorbs the new red node as-is.
    ParentBlack,
    /// Red parent, red uncle: recolor and re-examine from the grandparent.
    UncleRed {
        parent: Handle,
        uncle: Handle,
        grandparent: Handle,
    },
    /// Red parent, black (possibly absent) uncle: rotate. `node_side !=
    /// parent_side` is the zig-zag shape that needs a preliminary rotation.
    UncleBlack {
        parent: Handle,
        grandparent: Handle,
        parent_side: Side,
        node_side: Side,
    },
}

/// What the removal fixup sees across from the black-deficient slot.
///
/// `near` is the sibling child on the deficient side, `far` the one away
/// from it.
enum DeleteCase {
    /// Rotate the red sibling up; the new sibling underneath is black.
    SiblingRed,
    /// Nothing to borrow: push the deficiency up to the parent.
    SiblingBlackChildrenBlack,
    /// Rotate the near red child up to become a sibling with a red far child.
    NearChildRed { near: Handle },
    /// Terminal case: borrow a black from the sibling's far red child.
    FarChildRed { far: Handle },
}

/// A red-black tree over the arena substrate.
///
/// This layer owns the coloring discipline: every node is red or black, the
/// root and absent children are black, a red node has no red child, and every
/// path from a node down to an absent child crosses the same number of black
/// nodes. Search, rotation, and transplant mechanics live in [`BstCore`];
/// this type decides when to apply them and how to recolor.
#[derive(Clone)]
pub(crate) struct RawRbTree<T> {
    core: BstCore<T>,
}

impl<T> RawRbTree<T> {
    pub(crate) const fn new() -> Self {
        Self { core: BstCore::new() }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            core: BstCore::with_capacity(capacity),
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.core.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.core.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.core.clear();
    }

    pub(crate) fn inorder(&self) -> Vec<&T> {
        self.core.inorder()
    }

    pub(crate) fn preorder(&self) -> Vec<&T> {
        self.core.preorder()
    }

    pub(crate) fn postorder(&self) -> Vec<&T> {
        self.core.postorder()
    }

    pub(crate) fn breadth_first(&self) -> Vec<&T> {
        self.core.breadth_first()
    }

    pub(crate) fn height(&self) -> usize {
        self.core.height()
    }

    /// Black nodes crossed walking from the root down to an absent child,
    /// counting the absent child but not the root. 0 for an empty tree.
    ///
    /// Any root-to-leaf path gives the same answer; the left spine is used.
    pub(crate) fn black_height(&self) -> usize {
        let Some(root) = self.core.root() else {
            return 0;
        };
        let mut height = 1;
        let mut current = self.core.node(root).left();
        while let Some(handle) = current {
            if self.core.node(handle).color().is_black() {
                height += 1;
            }
            current = self.core.node(handle).left();
        }
        height
    }
}

impl<T: Ord> RawRbTree<T> {
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.core.search(key).map(|handle| self.core.value(handle))
    }

    pub(crate) fn min(&self) -> Option<&T> {
        self.core.root().map(|root| self.core.value(self.core.min_of(root)))
    }

    pub(crate) fn max(&self) -> Option<&T> {
        self.core.root().map(|root| self.core.value(self.core.max_of(root)))
    }

    /// Inserts `value`; returns `false` without mutating if an equal value is
    /// already stored.
    pub(crate) fn insert(&mut self, value: T) -> bool {
        let Some(node) = self.core.insert_leaf(value) else {
            return false;
        };
        self.insert_fixup(node);
        self.blacken_root();
        true
    }

    /// Removes the value equal to `key`; returns `false` if it is absent.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(node) = self.core.search(key) else {
            return false;
        };
        if self.core.len() == 1 {
            self.core.clear();
            return true;
        }

        // Only one arena slot is physically vacated: the target's own slot
        // for a leaf, otherwise the replacement's (its value moves into the
        // target). Vacating a black slot leaves one path a black short.
        let replacement = self.find_replacement(node);
        let vacated = replacement.unwrap_or(node);
        let lost_black = self.core.node(vacated).color().is_black();
        let fixup_slot = self
            .core
            .slot_of(vacated)
            .expect("`RawRbTree::remove()` - a root leaf is handled by the `len == 1` path!");

        self.core.transplant(node, replacement);
        if lost_black {
            self.delete_fixup(fixup_slot.0, fixup_slot.1);
        }
        self.blacken_root();
        true
    }

    /// Picks the in-order neighbor whose value relocates into `node`, or
    /// `None` for a leaf. A red neighbor is preferred (vacating a red slot
    /// needs no fixup), successor before predecessor.
    fn find_replacement(&self, node: Handle) -> Option<Handle> {
        let successor = self.core.node(node).right().map(|right| self.core.min_of(right));
        let predecessor = self.core.node(node).left().map(|left| self.core.max_of(left));
        match (successor, predecessor) {
            (Some(s), _) if self.core.node(s).color().is_red() => Some(s),
            (_, Some(p)) if self.core.node(p).color().is_red() => Some(p),
            (Some(s), _) => Some(s),
            (None, fallback) => fallback,
        }
    }

    fn blacken_root(&mut self) {
        if let Some(root) = self.core.root() {
            self.core.set_color(root, Color::Black);
        }
    }

    /// The color of a possibly-absent node; absence counts as black.
    fn color_of(&self, node: Option<Handle>) -> Color {
        node.map_or(Color::Black, |handle| self.core.node(handle).color())
    }

    fn classify_insert(&self, node: Handle) -> InsertCase {
        let Some((parent, node_side)) = self.core.slot_of(node) else {
            return InsertCase::RootReached;
        };
        if self.core.node(parent).color().is_black() {
            return InsertCase::ParentBlack;
        }
        // A red parent cannot be the (black) root, so a grandparent exists.
        let (grandparent, parent_side) = self
            .core
            .slot_of(parent)
            .expect("`RawRbTree::classify_insert()` - a red node cannot be the root!");
        match self.core.child(grandparent, parent_side.opposite()) {
            Some(uncle) if self.core.node(uncle).color().is_red() => InsertCase::UncleRed {
                parent,
                uncle,
                grandparent,
            },
            _ => InsertCase::UncleBlack {
                parent,
                grandparent,
                parent_side,
                node_side,
            },
        }
    }

    /// Restores the coloring rules after `node` was inserted red.
    ///
    /// The recoloring case walks up two levels per round; the rotation case
    /// terminates, so the pass is O(log n) with at most two rotations.
    fn insert_fixup(&mut self, node: Handle) {
        let mut node = node;
        loop {
            match self.classify_insert(node) {
                InsertCase::RootReached | InsertCase::ParentBlack => break,
                InsertCase::UncleRed {
                    parent,
                    uncle,
                    grandparent,
                } => {
                    self.core.set_color(parent, Color::Black);
                    self.core.set_color(uncle, Color::Black);
                    self.core.set_color(grandparent, Color::Red);
                    node = grandparent;
                }
                InsertCase::UncleBlack {
                    mut parent,
                    grandparent,
                    parent_side,
                    node_side,
                } => {
                    if node_side != parent_side {
                        // Zig-zag: straighten it so node and parent line up.
                        self.core.rotate(parent, parent_side);
                        parent = node;
                    }
                    self.core.set_color(parent, Color::Black);
                    self.core.set_color(grandparent, Color::Red);
                    self.core.rotate(grandparent, parent_side.opposite());
                    break;
                }
            }
        }
    }

    fn classify_delete(&self, sibling: Handle, side: Side) -> DeleteCase {
        if self.core.node(sibling).color().is_red() {
            return DeleteCase::SiblingRed;
        }
        let near = self.core.child(sibling, side);
        let far = self.core.child(sibling, side.opposite());
        if self.color_of(far).is_red() {
            DeleteCase::FarChildRed {
                far: far.expect("`RawRbTree::classify_delete()` - a red node cannot be absent!"),
            }
        } else if self.color_of(near).is_red() {
            DeleteCase::NearChildRed {
                near: near.expect("`RawRbTree::classify_delete()` - a red node cannot be absent!"),
            }
        } else {
            DeleteCase::SiblingBlackChildrenBlack
        }
    }

    /// Restores equal black counts after a black node was removed from the
    /// `side` subtree of `parent`.
    ///
    /// The deficient slot may be empty or hold a subtree; a red occupant
    /// simply absorbs the missing black. Otherwise a black is borrowed from
    /// the sibling side, or the deficiency is pushed up one level. Both
    /// mirror shapes run through the same arms via [`Side`].
    fn delete_fixup(&mut self, parent: Handle, side: Side) {
        let mut parent = parent;
        let mut side = side;
        loop {
            let occupant = self.core.child(parent, side);
            if self.color_of(occupant).is_red() {
                let occupant =
                    occupant.expect("`RawRbTree::delete_fixup()` - a red node cannot be absent!");
                self.core.set_color(occupant, Color::Black);
                return;
            }
            let sibling = self
                .core
                .child(parent, side.opposite())
                .expect("`RawRbTree::delete_fixup()` - the non-deficient side cannot be empty!");
            match self.classify_delete(sibling, side) {
                DeleteCase::SiblingRed => {
                    // Exchange colors and rotate the sibling up; the next
                    // round sees a black sibling.
                    self.core.set_color(sibling, Color::Black);
                    self.core.set_color(parent, Color::Red);
                    self.core.rotate(parent, side);
                }
                DeleteCase::SiblingBlackChildrenBlack => {
                    self.core.set_color(sibling, Color::Red);
                    match self.core.slot_of(parent) {
                        Some((grandparent, parent_side)) => {
                            parent = grandparent;
                            side = parent_side;
                        }
                        // The whole tree is one black shorter; still balanced.
                        None => return,
                    }
                }
                DeleteCase::NearChildRed { near } => {
                    self.core.set_color(near, Color::Black);
                    self.core.set_color(sibling, Color::Red);
                    self.core.rotate(sibling, side.opposite());
                }
                DeleteCase::FarChildRed { far } => {
                    let parent_color = self.core.node(parent).color();
                    self.core.set_color(sibling, parent_color);
                    self.core.set_color(parent, Color::Black);
                    self.core.set_color(far, Color::Black);
                    self.core.rotate(parent, side);
                    return;
                }
            }
        }
    }

    /// Panics unless the tree satisfies every red-black and search-tree rule.
    pub(crate) fn validate(&self) {
        let Some(root) = self.core.root() else {
            assert_eq!(self.core.len(), 0, "empty tree with a nonzero length");
            return;
        };
        assert!(self.core.parent(root).is_none(), "the root has a parent link");
        assert!(self.core.node(root).color().is_black(), "the root is red");
        let (count, _) = self.check_subtree(root, None, None);
        assert_eq!(count, self.core.len(), "length disagrees with the node count");
    }

    /// Checks the subtree at `node` against the exclusive `(min, max)` value
    /// bounds; returns its node count and black height.
    fn check_subtree(&self, node: Handle, min: Option<&T>, max: Option<&T>) -> (usize, usize) {
        let value = self.core.value(node);
        if let Some(min) = min {
            assert!(value > min, "in-order sequence violated");
        }
        if let Some(max) = max {
            assert!(value < max, "in-order sequence violated");
        }

        let color = self.core.node(node).color();
        for side in [Side::Left, Side::Right] {
            if let Some(child) = self.core.child(node, side) {
                assert_eq!(self.core.parent(child), Some(node), "broken parent back-link");
                if color.is_red() {
                    assert!(self.core.node(child).color().is_black(), "a red node has a red child");
                }
            }
        }

        let (left_count, left_black) = self
            .core
            .node(node)
            .left()
            .map_or((0, 1), |left| self.check_subtree(left, min, Some(value)));
        let (right_count, right_black) = self
            .core
            .node(node)
            .right()
            .map_or((0, 1), |right| self.check_subtree(right, Some(value), max));
        assert_eq!(left_black, right_black, "unequal black heights");

        (left_count + right_count + 1, left_black + usize::from(color.is_black()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec;
    use pretty_assertions::assert_eq;

    fn tree_from(values: &[i32]) -> RawRbTree<i32> {
        let mut tree = RawRbTree::new();
        for &value in values {
            assert!(tree.insert(value));
        }
        tree.validate();
        tree
    }

    /// (value, color) pairs in breadth-first order.
    fn colors(tree: &RawRbTree<i32>) -> Vec<(i32, Color)> {
        let mut out = Vec::new();
        let mut queue: alloc::collections::VecDeque<Handle> = alloc::collections::VecDeque::new();
        queue.extend(tree.core.root());
        while let Some(handle) = queue.pop_front() {
            out.push((*tree.core.value(handle), tree.core.node(handle).color()));
            queue.extend(tree.core.node(handle).left());
            queue.extend(tree.core.node(handle).right());
        }
        out
    }

    #[test]
    fn recoloring_and_rotation_during_inserts() {
        use Color::{Black, Red};
        let tree = tree_from(&[13, 8, 17, 1, 11, 15, 25, 6]);
        assert_eq!(
            colors(&tree),
            vec![
                (13, Black),
                (8, Red),
                (17, Black),
                (1, Black),
                (11, Black),
                (15, Red),
                (25, Red),
                (6, Red),
            ]
        );
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.black_height(), 2);
    }

    #[test]
    fn duplicate_insert_leaves_the_tree_alone() {
        let mut tree = tree_from(&[13, 8, 17]);
        let before = colors(&tree);
        assert!(!tree.insert(8));
        assert_eq!(colors(&tree), before);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let tree = tree_from(&(1..=64).collect::<Vec<_>>());
        assert_eq!(tree.len(), 64);
        // height <= 2 * log2(n + 1)
        assert!(tree.height() <= 12, "height {} too large", tree.height());
    }

    #[test]
    fn removing_the_root_relocates_the_successor_value() {
        use Color::{Black, Red};
        let mut tree = tree_from(&[13, 8, 17, 1, 11, 15, 25, 6]);
        assert!(tree.remove(&13));
        tree.validate();
        // The red successor 15 takes over the root slot; no fixup needed.
        assert_eq!(
            colors(&tree),
            vec![(15, Black), (8, Red), (17, Black), (1, Black), (11, Black), (25, Red), (6, Red)]
        );
    }

    #[test]
    fn removing_a_red_node_with_black_neighbors_rebalances() {
        // 5 is red with two black children, so both in-order neighbors are
        // black and vacating one costs a black that must be restored.
        let mut tree = tree_from(&[10, 5, 20, 3, 7, 1]);
        assert_eq!(
            colors(&tree),
            vec![
                (10, Color::Black),
                (5, Color::Red),
                (20, Color::Black),
                (3, Color::Black),
                (7, Color::Black),
                (1, Color::Red),
            ]
        );
        assert!(tree.remove(&5));
        tree.validate();
        assert_eq!(tree.inorder(), [&1, &3, &7, &10, &20]);
    }

    #[test]
    fn removing_a_black_node_with_a_red_child_recolors_it() {
        // Removing the root relocates 20 and splices 20's red child up; that
        // child absorbs the lost black.
        let mut tree = tree_from(&[10, 5, 20, 25]);
        assert!(tree.remove(&10));
        tree.validate();
        assert_eq!(colors(&tree), vec![(20, Color::Black), (5, Color::Black), (25, Color::Black)]);
    }

    #[test]
    fn remove_drains_to_empty() {
        let mut tree = tree_from(&[4, 2, 6, 1, 3, 5, 7]);
        for value in [4, 1, 7, 3, 5, 2, 6] {
            assert!(tree.remove(&value));
            tree.validate();
        }
        assert!(tree.is_empty());
        assert_eq!(tree.black_height(), 0);
        assert_eq!(tree.min(), None);
    }

    #[test]
    fn removing_an_absent_value_is_a_no_op() {
        let mut tree = tree_from(&[13, 8, 17]);
        assert!(!tree.remove(&99));
        assert_eq!(tree.len(), 3);
        tree.validate();
    }

    #[test]
    fn min_max_and_get() {
        let tree = tree_from(&[13, 8, 17, 1, 25]);
        assert_eq!(tree.min(), Some(&1));
        assert_eq!(tree.max(), Some(&25));
        assert_eq!(tree.get(&17), Some(&17));
        assert_eq!(tree.get(&2), None);
    }

    #[test]
    fn black_height_of_small_trees() {
        assert_eq!(RawRbTree::<i32>::new().black_height(), 0);
        assert_eq!(tree_from(&[1]).black_height(), 1);
        assert_eq!(tree_from(&[2, 1, 3]).black_height(), 1);
        assert_eq!(tree_from(&(1..=15).collect::<Vec<_>>()).black_height(), 3);
    }
}
