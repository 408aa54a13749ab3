//! Error types for the subdivision core.
//!
//! Only two conditions are recoverable: splitting past the depth bound and
//! constructing a tree deeper than the supported maximum. An absent neighbor
//! during a cascade is NOT an error - it terminates the cascade normally.
//! Inconsistent reduced counts are a programming error and are only checked
//! by debug assertions and the test suite.

use thiserror::Error;

/// Errors that can occur when mutating a compact binary tree.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CbtError {
  /// Attempted to split a node that already sits at the depth bound.
  #[error("max depth exceeded: node {node} is at depth {max_depth}")]
  MaxDepthExceeded {
    /// Heap index of the offending node.
    node: u32,
    /// Depth bound of the tree.
    max_depth: u32,
  },

  /// Requested tree depth is outside the supported range.
  #[error("unsupported depth {requested}, maximum is {maximum}")]
  DepthOutOfRange {
    /// Depth requested at construction.
    requested: u32,
    /// Largest depth the heap encoding supports.
    maximum: u32,
  },
}
