//! # Range Resolution
//!
//! Turns a block's overlapping style and entity ranges into a flat list of
//! [`StyledSegment`]s that partition the text.
//!
//! ## Approach
//!
//! 1. **Validation** (`annotated_ranges`): ranges are converted to
//!    [`AnnotatedRange`]s; zero-length, inverted or out-of-bounds ranges are
//!    dropped here and never seen again
//! 2. **Sweep** (`resolve_ranges`): every start and end offset, plus the text
//!    bounds, forms the boundary set. Walking consecutive boundaries while
//!    applying start/end events yields the active annotations of each segment
//!
//! ## Modules
//!
//! - **`index`**: `TextIndex` maps offsets in the configured [`OffsetUnit`] to byte offsets
//! - **`types`**: `AnnotatedRange`, `Annotation`, `StyledSegment`
//! - **`resolve`**: validation and the boundary sweep
//!
//! ## Key Invariants
//!
//! - Segments are non-empty, ordered, and cover `[0, len)` with no gaps
//! - When several entity ranges cover a segment, the one with the lowest
//!   start wins, then the one registered first

pub mod index;
pub mod resolve;
pub mod types;

pub use index::{OffsetUnit, TextIndex};
pub use resolve::{annotated_ranges, resolve_block, resolve_ranges};
pub use types::{AnnotatedRange, Annotation, StyledSegment};
