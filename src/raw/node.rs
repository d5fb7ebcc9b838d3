use super::handle::Handle;

/// Node color. An absent child always counts as [`Black`].
///
/// [`Black`]: Color::Black
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    /// Returns `true` if the color is [`Red`].
    ///
    /// [`Red`]: Color::Red
    #[must_use]
    pub(crate) fn is_red(self) -> bool {
        matches!(self, Self::Red)
    }

    /// Returns `true` if the color is [`Black`].
    ///
    /// [`Black`]: Color::Black
    #[must_use]
    pub(crate) fn is_black(self) -> bool {
        matches!(self, Self::Black)
    }
}

/// Which child slot of a parent a node occupies.
///
/// Both fixup state machines are written once and mirrored through this type
/// instead of duplicating a left and a right branch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[must_use]
    pub(crate) fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// One stored value plus its color and structural links.
///
/// `left`/`right` are owning in the sense that the subtree below is reachable
/// only through them; `parent` is a plain back-index with no ownership.
#[derive(Clone)]
pub(crate) struct Node<T> {
    value: T,
    color: Color,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<T> Node<T> {
    /// Creates a detached leaf. New nodes are born red; only the fixup
    /// routines (and the forced-black root) recolor them.
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn value(&self) -> &T {
        &self.value
    }

    pub(crate) fn replace_value(&mut self, value: T) -> T {
        core::mem::replace(&mut self.value, value)
    }

    pub(crate) fn into_value(self) -> T {
        self.value
    }

    #[inline]
    pub(crate) fn color(&self) -> Color {
        self.color
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_nodes_are_red_leaves() {
        let node = Node::new(42);
        assert!(node.color().is_red());
        assert!(node.is_leaf());
        assert_eq!(node.parent(), None);
    }

    #[test]
    fn side_opposite_is_involutive() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert_eq!(Side::Left.opposite().opposite(), Side::Left);
    }

    #[test]
    fn child_slots_are_independent() {
        let mut node = Node::new(1);
        let handle = Handle::from_index(5);
        node.set_child(Side::Left, Some(handle));
        assert_eq!(node.left(), Some(handle));
        assert_eq!(node.right(), None);
        assert_eq!(node.child(Side::Left), Some(handle));
        node.set_child(Side::Left, None);
        assert!(node.is_leaf());
    }
}
