//! Observable coordinator state.
//!
//! Every committed change produces a new [`CoordinatorState`] value. Cloning one
//! is cheap: text and results are shared behind `Arc`s.

use std::fmt;
use std::sync::Arc;

use text_size::TextSize;

use crate::base::LineCol;
use crate::ide::{HighlightIndex, HighlightInfo};
use crate::model::{AnalysisResult, LineAnalysis, SymbolTable, Token};

/// Where the analysis state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnalysisState {
    /// Nothing analyzed yet, or cleared.
    #[default]
    Idle,
    /// An analyzer call is in flight. The previous result stays visible.
    Loading,
    Ready,
    Error,
}

impl AnalysisState {
    /// Whether a run has settled (`Ready` or `Error`).
    pub fn is_settled(self) -> bool {
        matches!(self, AnalysisState::Ready | AnalysisState::Error)
    }
}

impl fmt::Display for AnalysisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisState::Idle => write!(f, "idle"),
            AnalysisState::Loading => write!(f, "loading"),
            AnalysisState::Ready => write!(f, "ready"),
            AnalysisState::Error => write!(f, "error"),
        }
    }
}

/// The presentation tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActiveView {
    #[default]
    Load,
    Tokens,
    Symbols,
}

/// Current source text and where it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceBuffer {
    pub text: Arc<str>,
    pub filename: Option<Arc<str>>,
}

impl SourceBuffer {
    /// Whether there is anything worth analyzing.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// An accepted analysis result together with its correlation index.
#[derive(Debug, Clone)]
pub struct ResultSnapshot {
    /// Generation of the run that produced this result.
    pub generation: u64,
    /// The exact text that was analyzed.
    pub analyzed_text: Arc<str>,
    pub index: HighlightIndex,
}

impl ResultSnapshot {
    pub(crate) fn new(generation: u64, analyzed_text: Arc<str>, result: AnalysisResult) -> Self {
        let index = HighlightIndex::build(&analyzed_text, Arc::new(result));
        Self {
            generation,
            analyzed_text,
            index,
        }
    }

    pub fn result(&self) -> &AnalysisResult {
        self.index.result()
    }
}

/// A consistent view of everything the coordinator owns.
#[derive(Debug, Clone, Default)]
pub struct CoordinatorState {
    pub(crate) source: SourceBuffer,
    pub(crate) analysis_state: AnalysisState,
    pub(crate) last_error: Option<Arc<str>>,
    pub(crate) last_result: Option<Arc<ResultSnapshot>>,
    pub(crate) selected_line: Option<u32>,
    pub(crate) highlight: Option<HighlightInfo>,
    pub(crate) active_view: ActiveView,
    /// Generation of the newest run; completions from older runs are discarded.
    pub(crate) generation: u64,
}

impl CoordinatorState {
    pub fn source(&self) -> &SourceBuffer {
        &self.source
    }

    pub fn source_text(&self) -> &str {
        &self.source.text
    }

    pub fn filename(&self) -> Option<&str> {
        self.source.filename.as_deref()
    }

    pub fn analysis_state(&self) -> AnalysisState {
        self.analysis_state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_result(&self) -> Option<&Arc<ResultSnapshot>> {
        self.last_result.as_ref()
    }

    pub fn selected_line(&self) -> Option<u32> {
        self.selected_line
    }

    pub fn highlight(&self) -> Option<&HighlightInfo> {
        self.highlight.as_ref()
    }

    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether there is source worth analyzing. A filename is not required:
    /// text typed directly into the editor counts.
    pub fn has_source(&self) -> bool {
        !self.source.is_blank()
    }

    /// Whether the latest run succeeded and its result is available.
    pub fn is_analyzed(&self) -> bool {
        self.analysis_state == AnalysisState::Ready && self.last_result.is_some()
    }

    pub fn tokens(&self) -> &[Token] {
        self.last_result
            .as_ref()
            .map(|r| r.result().tokens.as_slice())
            .unwrap_or_default()
    }

    pub fn token_count(&self) -> usize {
        self.tokens().len()
    }

    pub fn symbol_table(&self) -> Option<&SymbolTable> {
        self.last_result.as_ref().map(|r| &r.result().symbol_table)
    }

    pub fn lines(&self) -> &[LineAnalysis] {
        self.last_result
            .as_ref()
            .map(|r| r.result().lines.as_slice())
            .unwrap_or_default()
    }

    pub fn diagnostics(&self) -> &[String] {
        self.last_result
            .as_ref()
            .map(|r| r.result().diagnostics.as_slice())
            .unwrap_or_default()
    }

    /// The token under `offset` in the last analyzed text.
    pub fn token_at(&self, offset: TextSize) -> Option<&Token> {
        self.last_result.as_ref()?.index.token_at(offset)
    }

    /// The token under an editor cursor in the last analyzed text.
    pub fn token_at_position(&self, pos: LineCol) -> Option<&Token> {
        self.last_result.as_ref()?.index.token_at_position(pos)
    }

    /// Tokens on a 1-indexed line of the last analyzed text.
    pub fn tokens_on_line(&self, line: u32) -> Vec<&Token> {
        match &self.last_result {
            Some(snapshot) => snapshot.index.tokens_on_line(line).collect(),
            None => Vec::new(),
        }
    }

    /// Tokens to emphasize for the current line selection.
    pub fn selected_line_tokens(&self) -> Vec<&Token> {
        self.selected_line
            .map(|line| self.tokens_on_line(line))
            .unwrap_or_default()
    }

    /// Whether nothing observable differs from a freshly created state.
    pub(crate) fn is_pristine(&self) -> bool {
        self.source.text.is_empty()
            && self.source.filename.is_none()
            && self.analysis_state == AnalysisState::Idle
            && self.last_error.is_none()
            && self.last_result.is_none()
            && self.selected_line.is_none()
            && self.highlight.is_none()
            && self.active_view == ActiveView::Load
    }

    /// Whether the last result was computed from the text currently displayed.
    pub fn is_result_current(&self) -> bool {
        self.last_result
            .as_ref()
            .is_some_and(|r| r.analyzed_text == self.source.text)
    }
}
