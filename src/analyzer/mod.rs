//! The analyzer contract.
//!
//! Lexing, parsing and semantic validation live in an external engine. The
//! coordinator only sees it through [`AnalyzerAdapter`]: one call, one answer.
//!
//! An adapter must be a pure function of the source text. The coordinator awaits
//! every call to completion and never retries; newer edits supersede older
//! requests instead.

#[cfg(feature = "serde")]
pub mod json;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AdapterError;
use crate::model::AnalyzerOutput;

/// An analysis engine.
///
/// `Ok` carries a structured result, including failed analyses with their
/// diagnostics. `Err` means the engine itself raised.
#[async_trait]
pub trait AnalyzerAdapter: Send + Sync {
    async fn analyze(&self, source: &str) -> Result<AnalyzerOutput, AdapterError>;
}

#[async_trait]
impl<T: AnalyzerAdapter + ?Sized> AnalyzerAdapter for Arc<T> {
    async fn analyze(&self, source: &str) -> Result<AnalyzerOutput, AdapterError> {
        (**self).analyze(source).await
    }
}

/// Adapts a synchronous, in-process analysis function.
///
/// The function runs on the blocking thread pool, so a stalled engine leaves
/// the runtime free and the coordinator's timeout still fires.
pub struct FnAnalyzer<F> {
    analyze: Arc<F>,
}

impl<F> FnAnalyzer<F>
where
    F: Fn(&str) -> Result<AnalyzerOutput, AdapterError> + Send + Sync + 'static,
{
    pub fn new(analyze: F) -> Self {
        Self {
            analyze: Arc::new(analyze),
        }
    }
}

#[async_trait]
impl<F> AnalyzerAdapter for FnAnalyzer<F>
where
    F: Fn(&str) -> Result<AnalyzerOutput, AdapterError> + Send + Sync + 'static,
{
    async fn analyze(&self, source: &str) -> Result<AnalyzerOutput, AdapterError> {
        let analyze = Arc::clone(&self.analyze);
        let source = source.to_owned();
        match tokio::task::spawn_blocking(move || analyze(&source)).await {
            Ok(result) => result,
            // Surface engine panics to the caller unchanged.
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => Err(AdapterError::message(err.to_string())),
        }
    }
}
