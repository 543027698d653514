//! JSON wire format of the analysis engine.
//!
//! Engines compiled to a separate module (e.g. WebAssembly) hand their result
//! back as a JSON document:
//!
//! ```text
//! { "success": bool,
//!   "tokens": [{ "element", "category", "detail", "line", "start", "end" }] | null,
//!   "errors": [string],
//!   "symbol_table": [{ "name", "type_", "data_type", "value", "segment" }],
//!   "lines": [{ "line_number", "is_correct", "error_message", "instruction",
//!               "address", "machine_code" }] }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::AnalyzerAdapter;
use crate::error::AdapterError;
use crate::model::{
    AnalyzerOutput, DataType, LineAnalysis, SymbolKind, SymbolRecord, Token, TokenCategory,
};

#[derive(Debug, Deserialize)]
struct WireOutput {
    success: bool,
    #[serde(default)]
    tokens: Option<Vec<WireToken>>,
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    symbol_table: Vec<WireSymbol>,
    #[serde(default)]
    lines: Vec<WireLine>,
}

#[derive(Debug, Deserialize)]
struct WireToken {
    element: SmolStr,
    category: String,
    #[serde(default)]
    detail: SmolStr,
    line: u32,
    start: u32,
    end: u32,
}

#[derive(Debug, Deserialize)]
struct WireSymbol {
    name: SmolStr,
    #[serde(rename = "type_")]
    kind: SymbolKind,
    data_type: DataType,
    value: u64,
    segment: SmolStr,
}

#[derive(Debug, Deserialize)]
struct WireLine {
    line_number: u32,
    is_correct: bool,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    instruction: SmolStr,
    #[serde(default)]
    address: Option<u64>,
    #[serde(default)]
    machine_code: Option<Vec<u8>>,
}

impl WireToken {
    fn into_token(self) -> Result<Token, AdapterError> {
        if self.start > self.end {
            return Err(AdapterError::decode(format!(
                "token {:?} has start {} after end {}",
                self.element, self.start, self.end
            )));
        }
        // Unknown categories are rendered as invalid tokens rather than rejected.
        let category = self.category.parse().unwrap_or(TokenCategory::Invalid);
        Ok(Token::new(
            self.element,
            category,
            self.detail,
            self.line,
            TextRange::new(TextSize::from(self.start), TextSize::from(self.end)),
        ))
    }
}

/// Decode an engine's JSON payload.
pub fn decode_output(payload: &str) -> Result<AnalyzerOutput, AdapterError> {
    let wire: WireOutput =
        serde_json::from_str(payload).map_err(|e| AdapterError::decode(e.to_string()))?;

    let tokens = wire
        .tokens
        .map(|tokens| {
            tokens
                .into_iter()
                .map(WireToken::into_token)
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    let symbol_table = wire
        .symbol_table
        .into_iter()
        .map(|s| SymbolRecord::new(s.name, s.kind, s.data_type, s.value, s.segment))
        .collect();

    let lines = wire
        .lines
        .into_iter()
        .map(|l| LineAnalysis {
            line_number: l.line_number,
            is_correct: l.is_correct,
            error_message: l.error_message,
            instruction: l.instruction,
            address: l.address,
            machine_code: l.machine_code,
        })
        .collect();

    Ok(AnalyzerOutput {
        success: wire.success,
        tokens,
        errors: wire.errors,
        symbol_table,
        lines,
        program: None,
    })
}

/// Adapts an engine entry point that returns the JSON payload.
///
/// Like [`FnAnalyzer`](super::FnAnalyzer), the entry point runs on the blocking
/// thread pool.
pub struct JsonAnalyzer<F> {
    analyze: Arc<F>,
}

impl<F> JsonAnalyzer<F>
where
    F: Fn(&str) -> Result<String, AdapterError> + Send + Sync + 'static,
{
    pub fn new(analyze: F) -> Self {
        Self {
            analyze: Arc::new(analyze),
        }
    }
}

#[async_trait]
impl<F> AnalyzerAdapter for JsonAnalyzer<F>
where
    F: Fn(&str) -> Result<String, AdapterError> + Send + Sync + 'static,
{
    async fn analyze(&self, source: &str) -> Result<AnalyzerOutput, AdapterError> {
        let analyze = Arc::clone(&self.analyze);
        let source = source.to_owned();
        let payload = match tokio::task::spawn_blocking(move || analyze(&source)).await {
            Ok(payload) => payload?,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => return Err(AdapterError::message(err.to_string())),
        };
        decode_output(&payload)
    }
}
