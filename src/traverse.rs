//! Lazy traversals of a [`Tree`][crate::balanced::Tree].
//!
//! # Examples
//!
//! ```
//! use avl::balanced::Tree;
//! use avl::traverse::Order;
//!
//! let tree: Tree<_> = [2, 1, 3].into_iter().collect();
//!
//! assert_eq!(tree.traverse(Order::InOrder).collect::<Vec<_>>(), [&1, &2, &3]);
//! assert_eq!(tree.traverse(Order::PreOrder).collect::<Vec<_>>(), [&2, &1, &3]);
//! assert_eq!(tree.traverse(Order::PostOrder).collect::<Vec<_>>(), [&1, &3, &2]);
//! ```

use std::iter::FusedIterator;

use crate::balanced::Node;

/// The order in which a traversal visits each node relative to its subtrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Left subtree, node, right subtree. Yields values in ascending order.
    InOrder,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
}

/// Work still to do for a traversal. A `Visit` expands into the frames for a
/// node and its children (in an order depending on the [`Order`]) while a
/// `Yield` hands the node's value out.
enum Frame<'a, T> {
    Visit(&'a Node<T>),
    Yield(&'a Node<T>),
}

impl<T> Clone for Frame<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Frame<'_, T> {}

/// An iterator over references to the values of a tree in a given [`Order`].
///
/// This is created by [`Tree::traverse`][crate::balanced::Tree::traverse] and
/// [`Tree::iter`][crate::balanced::Tree::iter]. It uses an explicit stack
/// whose size is proportional to the height of the tree. Cloning it gives an
/// independent iterator that resumes from the same point.
pub struct Traverse<'a, T> {
    order: Order,
    stack: Vec<Frame<'a, T>>,
    remaining: usize,
}

impl<T> Clone for Traverse<'_, T> {
    fn clone(&self) -> Self {
        Self {
            order: self.order,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Traverse<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize, order: Order) -> Self {
        Self {
            order,
            stack: root.map(Frame::Visit).into_iter().collect(),
            remaining: len,
        }
    }

    /// The order this traversal visits nodes in.
    pub fn order(&self) -> Order {
        self.order
    }

    /// Pushes the frames for `node` so that popping them produces the right order.
    /// The stack is LIFO so everything is pushed in reverse.
    fn expand(&mut self, node: &'a Node<T>) {
        let left = node.left.as_deref().map(Frame::Visit);
        let right = node.right.as_deref().map(Frame::Visit);
        let this = Some(Frame::Yield(node));

        let frames = match self.order {
            Order::InOrder => [right, this, left],
            Order::PreOrder => [right, left, this],
            Order::PostOrder => [this, right, left],
        };
        self.stack.extend(frames.into_iter().flatten());
    }
}

impl<'a, T> Iterator for Traverse<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Visit(node) => self.expand(node),
                Frame::Yield(node) => {
                    self.remaining -= 1;
                    return Some(&node.value);
                }
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Traverse<'_, T> {}
impl<T> FusedIterator for Traverse<'_, T> {}
