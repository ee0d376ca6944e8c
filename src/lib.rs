//! This crate exposes a self-balancing Binary Search Tree (an AVL tree),
//! mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is the
//! longest path from the root `Node` to a leaf `Node`). BSTs also naturally
//! support sorted iteration by visiting the left subtree, then the subtree
//! root, then the right subtree.
//!
//! ## AVL Tree
//!
//! Without any care, inserting sorted values produces a "tree" that is really
//! a linked list and searching degrades to `O(N)`. An AVL tree records the
//! height of every `Node` and, after every insert or delete, restores the
//! third invariant:
//!
//! 3. For every `Node`, the heights of its two subtrees differ by at most one.
//!
//! This is done with "rotations", local restructurings of a few `Node`s that
//! keep the BST ordering while moving a taller subtree up. With this
//! invariant the height of the tree is at most `~1.44 * lg(N + 2)`.
//!
//! See [`balanced::Tree`] for the tree itself.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod balanced;
pub mod invariant;
pub mod traverse;

#[cfg(test)]
mod test;
