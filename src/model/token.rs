//! Lexical tokens produced by the analyzer.

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenCategory {
    Instruction,
    Directive,
    Register,
    Constant,
    String,
    Symbol,
    Punctuation,
    Invalid,
}

impl TokenCategory {
    /// The lowercase wire name of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenCategory::Instruction => "instruction",
            TokenCategory::Directive => "directive",
            TokenCategory::Register => "register",
            TokenCategory::Constant => "constant",
            TokenCategory::String => "string",
            TokenCategory::Symbol => "symbol",
            TokenCategory::Punctuation => "punctuation",
            TokenCategory::Invalid => "invalid",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenCategory {
    type Err = ();

    /// Parse a category name, case-insensitively. Analyzers historically reported
    /// directives as "pseudoinstruction", so that spelling is accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "instruction" => Ok(TokenCategory::Instruction),
            "directive" | "pseudoinstruction" => Ok(TokenCategory::Directive),
            "register" => Ok(TokenCategory::Register),
            "constant" => Ok(TokenCategory::Constant),
            "string" => Ok(TokenCategory::String),
            "symbol" => Ok(TokenCategory::Symbol),
            "punctuation" => Ok(TokenCategory::Punctuation),
            "invalid" => Ok(TokenCategory::Invalid),
            _ => Err(()),
        }
    }
}

/// A single token with its span into the analyzed source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// The token text as it appears in the source.
    pub text: SmolStr,
    pub category: TokenCategory,
    /// Human-readable classification detail (e.g. "Data transfer").
    pub detail: SmolStr,
    /// Line number (1-indexed).
    pub line: u32,
    /// Half-open byte span `[start, end)`.
    pub range: TextRange,
}

impl Token {
    pub fn new(
        text: impl Into<SmolStr>,
        category: TokenCategory,
        detail: impl Into<SmolStr>,
        line: u32,
        range: TextRange,
    ) -> Self {
        Self {
            text: text.into(),
            category,
            detail: detail.into(),
            line,
            range,
        }
    }

    pub fn start(&self) -> TextSize {
        self.range.start()
    }

    pub fn end(&self) -> TextSize {
        self.range.end()
    }

    /// Whether `offset` lies within `[start, end)`.
    pub fn contains(&self, offset: TextSize) -> bool {
        self.range.contains(offset)
    }
}
