//! Offset and line correlation over an analysis result.
//!
//! The index answers "which token is under this cursor" and "which tokens sit on
//! this line". It is built from one [`AnalysisResult`] and never updated; a new
//! result gets a new index.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use text_size::TextSize;

use crate::base::{LineCol, LineIndex};
use crate::model::{AnalysisResult, Token};

/// Token lookup by offset and by line.
#[derive(Debug, Clone, Default)]
pub struct HighlightIndex {
    result: Arc<AnalysisResult>,
    /// Line number → positions in `result.tokens`, ordered by start.
    by_line: FxHashMap<u32, Vec<usize>>,
    /// Line starts of the analyzed source.
    line_index: LineIndex,
}

impl HighlightIndex {
    /// Build the index for `result`, whose tokens were computed from `source`.
    ///
    /// Expects the result's tokens sorted by start and non-overlapping, which
    /// [`AnalysisResult::from_output`] guarantees.
    pub fn build(source: &str, result: Arc<AnalysisResult>) -> Self {
        debug_assert!(
            result
                .tokens
                .windows(2)
                .all(|w| w[0].end() <= w[1].start())
        );

        let mut by_line: FxHashMap<u32, Vec<usize>> = FxHashMap::default();
        for (idx, token) in result.tokens.iter().enumerate() {
            by_line.entry(token.line).or_default().push(idx);
        }

        Self {
            result,
            by_line,
            line_index: LineIndex::new(source),
        }
    }

    /// The result this index was built from.
    pub fn result(&self) -> &Arc<AnalysisResult> {
        &self.result
    }

    /// Position of the token whose `[start, end)` span contains `offset`.
    pub fn position_at(&self, offset: TextSize) -> Option<usize> {
        let tokens = &self.result.tokens;
        // Last token starting at or before the offset.
        let idx = tokens
            .partition_point(|t| t.start() <= offset)
            .checked_sub(1)?;
        tokens[idx].contains(offset).then_some(idx)
    }

    /// The token under `offset`, if any.
    pub fn token_at(&self, offset: TextSize) -> Option<&Token> {
        self.position_at(offset).map(|idx| &self.result.tokens[idx])
    }

    /// The token under an editor cursor (0-indexed line and column).
    pub fn token_at_position(&self, pos: LineCol) -> Option<&Token> {
        let offset = self.line_index.offset(pos)?;
        self.token_at(offset)
    }

    /// Tokens on a 1-indexed line, ordered by start.
    pub fn tokens_on_line(&self, line: u32) -> impl Iterator<Item = &Token> + '_ {
        self.by_line
            .get(&line)
            .into_iter()
            .flatten()
            .map(|&idx| &self.result.tokens[idx])
    }

    /// Lines that carry at least one token, ascending.
    pub fn lines(&self) -> Vec<u32> {
        let mut lines: Vec<u32> = self.by_line.keys().copied().collect();
        lines.sort_unstable();
        lines
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn len(&self) -> usize {
        self.result.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.result.tokens.is_empty()
    }
}
