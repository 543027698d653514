//! Analyzer output and the normalized analysis result.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use text_size::TextSize;
use tracing::warn;

use super::{LineAnalysis, SymbolRecord, SymbolTable, Token};

/// The analyzer's compiled program. Opaque to this crate and carried through untouched.
#[derive(Clone)]
pub struct Program(Arc<dyn Any + Send + Sync>);

impl Program {
    pub fn new<T: Any + Send + Sync>(program: T) -> Self {
        Self(Arc::new(program))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Program(..)")
    }
}

/// What an analyzer returns for one source text.
///
/// `tokens` and `errors` may both be non-empty: a failed run can still carry
/// usable tokens for partial rendering.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerOutput {
    pub success: bool,
    pub tokens: Option<Vec<Token>>,
    pub errors: Vec<String>,
    pub symbol_table: Vec<SymbolRecord>,
    pub lines: Vec<LineAnalysis>,
    pub program: Option<Program>,
}

impl AnalyzerOutput {
    /// A successful output with the given tokens.
    pub fn success(tokens: Vec<Token>) -> Self {
        Self {
            success: true,
            tokens: Some(tokens),
            ..Self::default()
        }
    }

    /// A failed output with the given diagnostics.
    pub fn failure<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            success: false,
            errors: errors.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_tokens(mut self, tokens: Vec<Token>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn with_symbols(mut self, symbols: Vec<SymbolRecord>) -> Self {
        self.symbol_table = symbols;
        self
    }

    pub fn with_lines(mut self, lines: Vec<LineAnalysis>) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_program(mut self, program: Program) -> Self {
        self.program = Some(program);
        self
    }
}

/// The complete, normalized outcome of one analysis run.
///
/// Results are replaced as a whole; nothing patches one in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisResult {
    /// Tokens ordered by start offset, pairwise non-overlapping.
    pub tokens: Vec<Token>,
    pub symbol_table: SymbolTable,
    /// At most one record per line, ordered by line number.
    pub lines: Vec<LineAnalysis>,
    pub diagnostics: Vec<String>,
    pub succeeded: bool,
}

impl AnalysisResult {
    /// Normalize an analyzer output against the source it was computed from.
    ///
    /// Tokens are sorted by start. Tokens that reach past the end of `source`,
    /// are inverted, or overlap the previous kept token are dropped. Duplicate
    /// symbols and repeated line records keep their first occurrence.
    pub fn from_output(source: &str, output: AnalyzerOutput) -> Self {
        let source_len = TextSize::of(source);

        let mut tokens = output.tokens.unwrap_or_default();
        tokens.sort_by_key(|t| t.start());

        let mut kept: Vec<Token> = Vec::with_capacity(tokens.len());
        for token in tokens {
            if token.end() > source_len {
                warn!(
                    "Dropping token {:?} at {:?}: span exceeds source length {:?}",
                    token.text, token.range, source_len
                );
                continue;
            }
            if let Some(prev) = kept.last() {
                if token.start() < prev.end() {
                    warn!(
                        "Dropping token {:?} at {:?}: overlaps {:?} at {:?}",
                        token.text, token.range, prev.text, prev.range
                    );
                    continue;
                }
            }
            kept.push(token);
        }

        let symbol_table = SymbolTable::from(output.symbol_table);

        let mut lines = output.lines;
        lines.sort_by_key(|l| l.line_number);
        lines.dedup_by_key(|l| l.line_number);

        Self {
            tokens: kept,
            symbol_table,
            lines,
            diagnostics: output.errors,
            succeeded: output.success,
        }
    }

    /// The record for a line, if the analyzer produced one.
    pub fn line(&self, line_number: u32) -> Option<&LineAnalysis> {
        self.lines
            .binary_search_by_key(&line_number, |l| l.line_number)
            .ok()
            .map(|idx| &self.lines[idx])
    }

    /// Lines the analyzer flagged as incorrect.
    pub fn error_lines(&self) -> impl Iterator<Item = &LineAnalysis> {
        self.lines.iter().filter(|l| !l.is_correct)
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}
