//! A self-balancing BST (specifically, an AVL tree) where every node is owned by its parent.
//!
//! All structural changes are made by functions that take ownership of a subtree root and return
//! the (possibly different) root of the rebuilt subtree, which the caller stores back into its
//! own child link. That means there are no parent pointers and no `unsafe`.
//!
//! # Examples
//!
//! ```
//! use avl::balanced::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! assert!(tree.insert(1));
//! assert!(tree.contains(&1));
//!
//! // Inserting the same value again changes nothing.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//!
//! // Deleting a value returns it.
//! assert_eq!(tree.delete(&1), Some(1));
//! assert!(!tree.contains(&1));
//!
//! // Deleting a missing value is a no-op.
//! assert_eq!(tree.delete(&1), None);
//! ```

use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace};

use crate::invariant::InvariantViolation;
use crate::traverse::{Order, Traverse};

/// An owned, possibly empty, subtree.
type Link<T> = Option<Box<Node<T>>>;

/// The height of a possibly empty subtree. An empty subtree has a height of 0.
fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

/// A self-balancing Binary Search Tree (specifically, an AVL tree). This can be used for
/// inserting, finding, and deleting values. Each value is stored at most once.
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    // Tear down with an explicit stack rather than recursing once per level.
    fn drop(&mut self) {
        let mut stack: Vec<_> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Two trees are equal when they hold the same values, whatever their shapes.
impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T> Eq for Tree<T> where T: Eq {}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Traverse<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of values stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// The number of levels in the tree. An empty tree has height 0 and a tree with only a root
    /// has height 1.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// A read-only view of the root node, for walking the shape of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::balanced::Tree;
    ///
    /// // Inserting in ascending order rotates 20 up to the root.
    /// let tree: Tree<_> = [10, 20, 30].into_iter().collect();
    /// let root = tree.root().unwrap();
    ///
    /// assert_eq!(root.value(), &20);
    /// assert_eq!(root.left().map(|n| *n.value()), Some(10));
    /// assert_eq!(root.right().map(|n| *n.value()), Some(30));
    /// ```
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.as_deref().map(NodeRef)
    }

    /// The smallest value in the tree.
    pub fn first(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    /// The largest value in the tree.
    pub fn last(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }

    /// Lazily visits every value in the given [`Order`].
    pub fn traverse(&self, order: Order) -> Traverse<'_, T> {
        Traverse::new(self.root.as_deref(), self.len, order)
    }

    /// Lazily visits every value in ascending order.
    pub fn iter(&self) -> Traverse<'_, T> {
        self.traverse(Order::InOrder)
    }

    /// Collects the values in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::balanced::Tree;
    ///
    /// let tree: Tree<_> = [3, 1, 2, 1].into_iter().collect();
    ///
    /// assert_eq!(tree.to_ordered_vec(), vec![1, 2, 3]);
    /// ```
    pub fn to_ordered_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Inserts the given value into the tree. Returns `true` if the value was newly stored and
    /// `false` if it was already present, in which case the tree is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::balanced::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let (root, inserted) = Node::insert_into(self.root.take(), value);
        self.root = Some(root);

        if inserted {
            self.len += 1;
        } else {
            debug!("Ignoring insert of a value already in the tree");
        }
        inserted
    }

    /// Deletes the given value from the tree and returns it. If the tree does not contain the
    /// value, nothing happens and `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::balanced::Tree;
    ///
    /// let mut tree: Tree<_> = [1, 2, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.delete(&2), Some(2));
    /// assert_eq!(tree.delete(&999), None);
    /// assert_eq!(tree.to_ordered_vec(), vec![1, 3]);
    /// ```
    pub fn delete(&mut self, value: &T) -> Option<T> {
        let Some(root) = self.root.take() else {
            debug!("Ignoring delete from an empty tree");
            return None;
        };

        let (root, removed) = root.delete(value);
        self.root = root;

        if removed.is_some() {
            self.len -= 1;
        } else {
            debug!("Ignoring delete of a value not in the tree");
        }
        removed
    }

    /// Potentially finds the stored value equal to the given one. If no node holds it, `None` is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::balanced::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, value: &T) -> Option<&T> {
        self.find_node(value).map(|n| &n.value)
    }

    /// Whether the tree holds the given value.
    pub fn contains(&self, value: &T) -> bool {
        self.find_node(value).is_some()
    }

    /// The height of the subtree rooted at the node holding `value`, if there is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::balanced::Tree;
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.height_of(&2), Some(2));
    /// assert_eq!(tree.height_of(&1), Some(1));
    /// assert_eq!(tree.height_of(&4), None);
    /// ```
    pub fn height_of(&self, value: &T) -> Option<usize> {
        self.find_node(value).map(|n| n.height)
    }

    /// Whether every AVL invariant holds for the whole tree. See [`Tree::check_invariants`].
    pub fn is_balanced(&self) -> bool {
        self.check_invariants().is_ok()
    }

    /// Walks the whole tree checking that values are strictly increasing in order, that every
    /// recorded height is correct, that no node is unbalanced, and that the recorded length
    /// matches the number of nodes. Returns the first violation found.
    ///
    /// A tree only ever modified through its public methods always passes.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut previous = None;
        let mut counted = 0;
        if let Some(root) = self.root.as_deref() {
            root.check(&mut previous, &mut counted)?;
        }

        if counted != self.len {
            return Err(InvariantViolation::LengthMismatch {
                recorded: self.len,
                counted,
            });
        }
        Ok(())
    }

    fn find_node(&self, value: &T) -> Option<&Node<T>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }
}

/// A read-only view of one node of a [`Tree`].
pub struct NodeRef<'a, T>(&'a Node<T>);

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for NodeRef<'_, T> {}

impl<T> fmt::Debug for NodeRef<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.0.value)
            .field("height", &self.0.height)
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<'a, T> NodeRef<'a, T> {
    /// The value stored at this node.
    pub fn value(&self) -> &'a T {
        &self.0.value
    }

    /// How many levels are in the subtree rooted at this node.
    pub fn height(&self) -> usize {
        self.0.height
    }

    /// `height(left) - height(right)`. Always in `-1..=1`.
    pub fn balance_factor(&self) -> isize {
        self.0.balance_factor()
    }

    /// The left child, if any.
    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.0.left.as_deref().map(NodeRef)
    }

    /// The right child, if any.
    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.0.right.as_deref().map(NodeRef)
    }
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    /// Consumes a node whose children have already been taken and returns its value.
    fn into_value(self: Box<Self>) -> T {
        let Self { value, .. } = *self;
        value
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn update_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    /// The difference in height between the left and right subtrees. Positive means left-heavy.
    /// See [the Wikipedia page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    /// Rotate `self` to the right. This moves the left child up and `self` down. Used to
    /// rebalance the tree when the left child is too tall. As such, it must only be called
    /// when there _is_ a left child.
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///       old_root (i.e. "self")      new_root
    ///        /     \                    /     \
    ///   new_root    z     rotate ->    x    old_root
    ///    /  \                                /  \
    ///   x    y                              y    z
    /// ```
    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        trace!("Rotating right at a subtree of height {}", self.height);
        let mut new_root = self.left.take().expect("Rotate right => left child");

        self.left = new_root.right.take();
        // `self` is now below `new_root` so its height has to be right first.
        self.update_height();

        new_root.right = Some(self);
        new_root.update_height();
        new_root
    }

    /// Mirror image of [`Node::rotate_right`].
    ///
    /// ```text
    ///   old_root (i.e. "self")            new_root
    ///    /     \                          /     \
    ///   x    new_root     rotate ->   old_root   z
    ///         /  \                     /  \
    ///        y    z                   x    y
    /// ```
    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        trace!("Rotating left at a subtree of height {}", self.height);
        let mut new_root = self.right.take().expect("Rotate left => right child");

        self.right = new_root.left.take();
        self.update_height();

        new_root.left = Some(self);
        new_root.update_height();
        new_root
    }
}

impl<T> Node<T>
where
    T: Ord,
{
    /// Inserts `value` into the possibly empty subtree and returns the new subtree root along
    /// with whether anything was inserted.
    fn insert_into(link: Link<T>, value: T) -> (Box<Self>, bool) {
        match link {
            Some(node) => node.insert(value),
            None => (Self::new_boxed(value), true),
        }
    }

    fn insert(mut self: Box<Self>, value: T) -> (Box<Self>, bool) {
        let inserted = match value.cmp(&self.value) {
            Ordering::Less => {
                let (left, inserted) = Self::insert_into(self.left.take(), value);
                self.left = Some(left);
                inserted
            }
            Ordering::Equal => false,
            Ordering::Greater => {
                let (right, inserted) = Self::insert_into(self.right.take(), value);
                self.right = Some(right);
                inserted
            }
        };

        // A duplicate changes no heights so there's nothing to rebalance on the way up.
        if !inserted {
            return (self, false);
        }
        (self.rebalance(), true)
    }

    /// Deletes `value` from this subtree. Returns the new subtree root (which is `None` if this
    /// was the only node) and the deleted value, if it was found.
    fn delete(mut self: Box<Self>, value: &T) -> (Link<T>, Option<T>) {
        let removed = match value.cmp(&self.value) {
            Ordering::Less => {
                let Some(left) = self.left.take() else {
                    return (Some(self), None);
                };
                let (left, removed) = left.delete(value);
                self.left = left;
                removed
            }
            Ordering::Greater => {
                let Some(right) = self.right.take() else {
                    return (Some(self), None);
                };
                let (right, removed) = right.delete(value);
                self.right = right;
                removed
            }
            Ordering::Equal => match (self.left.take(), self.right.take()) {
                (None, None) => return (None, Some(self.into_value())),
                (Some(child), None) | (None, Some(child)) => {
                    return (Some(child), Some(self.into_value()))
                }

                // If we have two children we have to figure out which value to promote. We
                // choose here this node's successor. That is, the smallest value in this node's
                // right subtree.
                (Some(left), Some(right)) => {
                    let (right, successor) = right.take_min();
                    self.left = Some(left);
                    self.right = right;
                    Some(std::mem::replace(&mut self.value, successor))
                }
            },
        };

        if removed.is_none() {
            return (Some(self), None);
        }
        (Some(self.rebalance()), removed)
    }

    /// Removes the smallest node of this subtree. Returns the new subtree root and the smallest
    /// value.
    fn take_min(mut self: Box<Self>) -> (Link<T>, T) {
        match self.left.take() {
            Some(left) => {
                let (left, min) = left.take_min();
                self.left = left;
                (Some(self.rebalance()), min)
            }
            None => {
                let right = self.right.take();
                (right, self.into_value())
            }
        }
    }

    /// Balances a subtree using the heights of the children and returns the new subtree root.
    /// The children must already be balanced with correct heights.
    ///
    /// See <https://en.wikipedia.org/wiki/AVL_tree#Rebalancing> for terminology.
    fn rebalance(mut self: Box<Self>) -> Box<Self> {
        self.update_height();

        let node = match self.balance_factor() {
            // Left-heavy. `> 1` means there's a left child.
            n if n > 1 => {
                if self.left.as_ref().map_or(0, |l| l.balance_factor()) < 0 {
                    // Left-right case.
                    self.left = self.left.take().map(Self::rotate_left);
                }
                self.rotate_right()
            }
            // Right-heavy. `< -1` means there's a right child.
            n if n < -1 => {
                if self.right.as_ref().map_or(0, |r| r.balance_factor()) > 0 {
                    // Right-left case.
                    self.right = self.right.take().map(Self::rotate_right);
                }
                self.rotate_left()
            }
            _ => self,
        };

        // In debug builds, after balancing, assert that we've restored/maintained the AVL
        // invariant at this node.
        if cfg!(debug_assertions) {
            let left_height = height(&node.left);
            let right_height = height(&node.right);
            assert_eq!(node.height, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);

            if let Some(left) = &node.left {
                assert!(node.value > left.value);
            }
            if let Some(right) = &node.right {
                assert!(node.value < right.value);
            }
        }
        node
    }

    /// Recursive helper for [`Tree::check_invariants`]. `previous` is the last value seen in
    /// order and `index` the number of nodes seen so far. Returns the actual height of the
    /// subtree.
    fn check<'a>(
        &'a self,
        previous: &mut Option<&'a T>,
        index: &mut usize,
    ) -> Result<usize, InvariantViolation> {
        let left_height = match self.left.as_deref() {
            Some(left) => left.check(previous, index)?,
            None => 0,
        };

        let own_index = *index;
        if previous.is_some_and(|p| p >= &self.value) {
            return Err(InvariantViolation::Unordered { index: own_index });
        }
        *previous = Some(&self.value);
        *index += 1;

        let right_height = match self.right.as_deref() {
            Some(right) => right.check(previous, index)?,
            None => 0,
        };

        let expected = left_height.max(right_height) + 1;
        if self.height != expected {
            return Err(InvariantViolation::StaleHeight {
                index: own_index,
                recorded: self.height,
                expected,
            });
        }

        let balance_factor = left_height as isize - right_height as isize;
        if balance_factor.abs() > 1 {
            return Err(InvariantViolation::Unbalanced {
                index: own_index,
                balance_factor,
            });
        }
        Ok(expected)
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::init_logging;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeSet`.
    /// This way we can ensure that after a random smattering of inserts
    /// and deletes we have the same set of values in both, and that the tree
    /// is still a valid AVL tree after every step.
    fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, set: &mut BTreeSet<T>)
    where
        T: Ord + Clone + std::fmt::Debug,
    {
        init_logging();
        for op in ops {
            match op {
                Op::Insert(v) => {
                    assert_eq!(bst.insert(v.clone()), set.insert(v.clone()));
                }
                Op::Delete(v) => {
                    assert_eq!(bst.delete(v), set.take(v));
                }
                Op::Iter => {
                    assert!(bst.iter().eq(set.iter()));
                }
            }
            assert_eq!(bst.check_invariants(), Ok(()));
            assert_eq!(bst.len(), set.len());
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            set.iter().all(|v| tree.find(v) == Some(v))
        }
    }

    quickcheck::quickcheck! {
        fn contains(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x);
            }

            xs.iter().all(|x| tree.contains(x))
        }
    }
}
