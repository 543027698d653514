//! Foundation types for the Glyph analysis core.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Source spans (byte offsets, half-open)
//! - [`LineIndex`], [`LineCol`] - Offset to line/column conversion
//!
//! This module has NO dependencies on other glyph modules.

mod line_index;

pub use line_index::{LineCol, LineIndex};
pub use text_size::{TextRange, TextSize};

// Re-export text-size for convenience
pub use text_size;
