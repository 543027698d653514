//! Data model shared by the analyzer contract, the correlation index and the coordinator.
//!
//! - [`Token`], [`TokenCategory`] - Lexical units with spans
//! - [`SymbolRecord`], [`SymbolTable`] - Declared names, unique per segment
//! - [`LineAnalysis`] - Per-line verdicts
//! - [`AnalyzerOutput`] - Raw adapter output
//! - [`AnalysisResult`] - Normalized output, replaced whole on every run

mod line;
mod result;
mod symbol;
mod token;

pub use line::LineAnalysis;
pub use result::{AnalysisResult, AnalyzerOutput, Program};
pub use symbol::{DataType, SymbolKind, SymbolRecord, SymbolTable};
pub use token::{Token, TokenCategory};
