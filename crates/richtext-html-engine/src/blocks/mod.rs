//! # Block Structure
//!
//! Turns the flat block sequence into a tree and renders each leaf.
//!
//! ## Phases
//!
//! 1. **Grouping** (`grouper`): a `BlockGrouper` scans the blocks once with an
//!    explicit stack of open list containers and emits [`BlockNode`]s
//! 2. **Rendering** (`render`): each leaf becomes a [`RenderedBlock`], either
//!    the verbatim output of a custom renderer or a wrapper element around the
//!    inline content
//!
//! ## Modules
//!
//! - **`types`**: `BlockNode`, `ListContainer`
//! - **`grouper`**: `BlockGrouper` state machine and the `ListRules` it consults
//! - **`render`**: `render_block` and `RenderedBlock`
//!
//! ## Key Invariants
//!
//! - Traversal order of the tree equals the input block order
//! - Leaves directly inside a container share its list type and depth

pub mod grouper;
pub mod render;
pub mod types;

pub use grouper::{BlockGrouper, ListRules, group_blocks};
pub use render::{RenderedBlock, render_block};
pub use types::{BlockNode, ListContainer};
