//! Reports produced by [`Tree::check_invariants`][crate::balanced::Tree::check_invariants].
//!
//! None of these can be produced by a correct tree. They exist so tests (and
//! a curious visualization layer) can get a description of what went wrong
//! instead of a bare `false` from
//! [`Tree::is_balanced`][crate::balanced::Tree::is_balanced].
//!
//! Nodes are identified by their position in the in-order sequence, which
//! avoids requiring `Debug` on the stored values.

use thiserror::Error;

/// The first invariant found broken while walking a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A node's value is not strictly greater than the in-order value before it.
    /// This covers both out-of-order subtrees and duplicated values.
    #[error("node {index} (in order) is not greater than its in-order predecessor")]
    Unordered {
        /// In-order position of the offending node.
        index: usize,
    },

    /// A node's recorded height disagrees with the heights of its children.
    #[error("node {index} (in order) records height {recorded} but its children give {expected}")]
    StaleHeight {
        /// In-order position of the offending node.
        index: usize,
        /// The height stored on the node.
        recorded: usize,
        /// `1 + max(height(left), height(right))`.
        expected: usize,
    },

    /// A node's subtrees differ in height by more than one.
    #[error("node {index} (in order) has balance factor {balance_factor}")]
    Unbalanced {
        /// In-order position of the offending node.
        index: usize,
        /// `height(left) - height(right)`.
        balance_factor: isize,
    },

    /// The tree's length disagrees with the number of reachable nodes.
    #[error("tree records {recorded} values but {counted} nodes are reachable")]
    LengthMismatch {
        /// The length stored on the tree.
        recorded: usize,
        /// The number of nodes actually found.
        counted: usize,
    },
}
