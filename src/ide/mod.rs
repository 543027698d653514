//! IDE features: token correlation for cursor, hover and selection.
//!
//! This module sits between the analysis result and an editor surface.
//!
//! ## Design Principles
//!
//! 1. **Rebuilt, never patched**: a [`HighlightIndex`] belongs to exactly one result
//! 2. **No editor types**: offsets are [`TextSize`](crate::base::TextSize), cursors are
//!    [`LineCol`](crate::base::LineCol)
//! 3. **Cheap lookups**: binary search by offset, hash lookup by line
//!
//! ## Usage
//!
//! ```ignore
//! let index = HighlightIndex::build(source, Arc::new(result));
//!
//! let under_cursor = index.token_at(offset);
//! let emphasized: Vec<_> = index.tokens_on_line(selected_line).collect();
//! ```

mod highlight_index;
mod hover;

pub use highlight_index::HighlightIndex;
pub use hover::HighlightInfo;
