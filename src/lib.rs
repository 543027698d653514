//! # glyph-core
//!
//! Reactive core of an assembly source analysis tool: owns the source buffer,
//! re-analyzes on every edit and correlates editor offsets with tokens.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! coordinator → AnalysisCoordinator: state machine, debounce, result lifecycle
//!   ↓
//! ide         → HighlightIndex, HighlightInfo: offset/line correlation
//!   ↓
//! analyzer    → AnalyzerAdapter contract for the external analysis engine
//!   ↓
//! model       → Token, SymbolTable, LineAnalysis, AnalysisResult
//!   ↓
//! base        → Primitives (TextRange, TextSize, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → model → analyzer → ide → coordinator)
// ============================================================================

/// Foundation types: TextRange, TextSize, LineIndex
pub mod base;

/// Data model: tokens, symbols, per-line verdicts, analysis results
pub mod model;

/// Analyzer contract: the single call into the external analysis engine
pub mod analyzer;

/// IDE features: token lookup by offset and line, hover targets
pub mod ide;

/// Analysis coordination: source buffer, state machine, debounce
pub mod coordinator;

/// Error types for loading and analysis
pub mod error;

// Re-export the types most callers need
pub use analyzer::{AnalyzerAdapter, FnAnalyzer};
pub use base::{LineCol, LineIndex, TextRange, TextSize};
pub use coordinator::{
    ActiveView, AnalysisCoordinator, AnalysisState, CoordinatorConfig, CoordinatorState,
};
pub use error::{AdapterError, CoordinatorError};
pub use ide::{HighlightIndex, HighlightInfo};
pub use model::{AnalysisResult, AnalyzerOutput, Token, TokenCategory};
