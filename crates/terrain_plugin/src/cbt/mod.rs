//! Compact binary tree (CBT) - array-backed subdivision state.
//!
//! The tree is a flat integer heap of fixed maximum depth D. Slot 0 stores D;
//! slots `[1, 2^(D+1))` are nodes addressed by 1-based heap index, where a
//! node's binary representation encodes its path from the root. The deepest
//! level `[2^D, 2^(D+1))` doubles as the bit-field: a 1 marks an active leaf
//! whose leftmost depth-D descendant lands in that slot. After sum-reduction
//! every internal slot holds the number of active leaves in its subtree.
//!
//! No explicit tree nodes are maintained - parent/child relationships are
//! index arithmetic (`2k`, `2k+1`, `k/2`) computed on demand.
//!
//! # Module Structure
//!
//! - [`node`]: `CbtNode` - immutable value type for heap positions
//! - [`heap`]: `Cbt` - the heap itself: reduction, split/merge, enumeration

pub mod heap;
pub mod node;

// Re-exports
pub use heap::Cbt;
pub use node::CbtNode;
