//! Hover and selection targets.

use smol_str::SmolStr;
use text_size::TextRange;

use crate::model::Token;

/// A transient hover/selection target.
///
/// Lives independently of the analysis result: it is set and cleared by user
/// interaction only, and is not shifted when edits move offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighlightInfo {
    /// Line number (1-indexed).
    pub line: u32,
    pub token_text: SmolStr,
    pub detail: SmolStr,
    /// Span of the highlighted token, when it came from a token.
    pub range: Option<TextRange>,
}

impl HighlightInfo {
    /// A highlight covering a whole line, with no span.
    pub fn line(line: u32, token_text: impl Into<SmolStr>, detail: impl Into<SmolStr>) -> Self {
        Self {
            line,
            token_text: token_text.into(),
            detail: detail.into(),
            range: None,
        }
    }

    pub fn from_token(token: &Token) -> Self {
        Self {
            line: token.line,
            token_text: token.text.clone(),
            detail: token.detail.clone(),
            range: Some(token.range),
        }
    }

    /// Whether `token` is the one this highlight points at.
    ///
    /// Span-less highlights match any token on the same line with the same text.
    pub fn matches(&self, token: &Token) -> bool {
        match self.range {
            Some(range) => range == token.range,
            None => self.line == token.line && self.token_text == token.text,
        }
    }
}
