//! AnalysisCoordinator: owns the source buffer and drives re-analysis.
//!
//! The coordinator holds the analysis state machine:
//!
//! ```text
//! idle ──load/edit/run──▶ loading ──success──▶ ready
//!                           │  ▲                 │
//!                  failure  │  └──edit+debounce──┤
//!                           ▼                    │
//!                         error ◀────────────────┘
//!
//! any state ──clear──▶ idle
//! ```
//!
//! Every committed change publishes a fresh [`CoordinatorState`] to subscribers.
//!
//! ## Usage
//!
//! ```ignore
//! let coordinator = AnalysisCoordinator::new(FnAnalyzer::new(engine::analyze));
//! let mut changes = coordinator.subscribe();
//!
//! coordinator.load_source(text, "program.asm").await?;
//! coordinator.edit_source("MOV AX, 10h");   // analyzed after the debounce window
//!
//! changes.changed().await?;
//! let state = coordinator.state();
//! let hovered = state.token_at(offset);
//! ```

mod config;
mod debounce;
mod state;

pub use config::CoordinatorConfig;
pub use state::{ActiveView, AnalysisState, CoordinatorState, ResultSnapshot, SourceBuffer};

use std::sync::{Arc, Weak};

use tokio::sync::watch;
use tracing::{debug, trace, warn};

use crate::analyzer::AnalyzerAdapter;
use crate::error::CoordinatorError;
use crate::ide::HighlightInfo;
use crate::model::{AnalysisResult, AnalyzerOutput};

use debounce::DebounceSlot;

/// Message surfaced when a failed run reports no diagnostics of its own.
const GENERIC_FAILURE: &str = "Analysis failed";

/// Owns the current source, the latest analysis result and the presentation state.
///
/// Cloning yields another handle to the same coordinator.
#[derive(Clone)]
pub struct AnalysisCoordinator {
    inner: Arc<Inner>,
}

struct Inner {
    adapter: Arc<dyn AnalyzerAdapter>,
    config: CoordinatorConfig,
    state: watch::Sender<CoordinatorState>,
    debounce: DebounceSlot,
}

impl AnalysisCoordinator {
    /// Create a coordinator with the default configuration.
    pub fn new<A: AnalyzerAdapter + 'static>(adapter: A) -> Self {
        Self::with_config(Arc::new(adapter), CoordinatorConfig::default())
    }

    pub fn with_config(adapter: Arc<dyn AnalyzerAdapter>, config: CoordinatorConfig) -> Self {
        let (state, _) = watch::channel(CoordinatorState::default());
        Self {
            inner: Arc::new(Inner {
                adapter,
                config,
                state,
                debounce: DebounceSlot::new(),
            }),
        }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.inner.config
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> CoordinatorState {
        self.inner.state.borrow().clone()
    }

    /// Receive a notification on every committed change.
    pub fn subscribe(&self) -> watch::Receiver<CoordinatorState> {
        self.inner.state.subscribe()
    }

    /// Whether a debounced analysis is scheduled but has not fired yet.
    pub fn has_pending_analysis(&self) -> bool {
        self.inner.debounce.is_pending()
    }

    // ==================== Source mutations ====================

    /// Load a file and analyze it immediately.
    ///
    /// A filename without the required suffix is rejected: the rejection is
    /// recorded as `last_error`, nothing else changes and the analyzer is not
    /// called. An accepted load bypasses the edit debounce and cancels any
    /// pending debounced run.
    pub async fn load_source(
        &self,
        content: impl Into<Arc<str>>,
        filename: impl Into<Arc<str>>,
    ) -> Result<AnalysisState, CoordinatorError> {
        let filename: Arc<str> = filename.into();
        let config = &self.inner.config;

        if !config.accepts_filename(&filename) {
            let err = CoordinatorError::invalid_file(&*filename, config.required_suffix.as_str());
            warn!("Rejected load: {}", err);
            let message: Arc<str> = err.to_string().into();
            self.commit(|s| {
                s.last_error = Some(message);
                true
            });
            return Err(err);
        }

        self.inner.debounce.cancel();
        let content: Arc<str> = content.into();
        debug!("Loading {} ({} bytes)", filename, content.len());

        self.commit(|s| {
            s.source = SourceBuffer {
                text: content,
                filename: Some(filename),
            };
            s.last_error = None;
            s.active_view = ActiveView::Tokens;
            // Results still in flight belong to the previous document.
            s.generation += 1;
            if s.analysis_state == AnalysisState::Loading {
                s.analysis_state = AnalysisState::Idle;
            }
            true
        });

        Ok(self.run_analysis().await)
    }

    /// Replace the source text and schedule analysis after the debounce window.
    ///
    /// Edits arriving within the window coalesce into one analyzer call that sees
    /// only the final text. `last_error` is kept until a new result replaces it.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn edit_source(&self, text: impl Into<Arc<str>>) {
        let text: Arc<str> = text.into();
        self.commit(|s| {
            if s.source.text == text {
                return false;
            }
            s.source.text = text;
            true
        });
        self.schedule_analysis();
    }

    /// Reset to the initial state, dropping the source and any result.
    ///
    /// Pending and in-flight analyses are discarded. Clearing an already idle,
    /// empty coordinator does not notify subscribers.
    pub fn clear(&self) {
        self.inner.debounce.cancel();
        let changed = self.commit(|s| {
            if s.is_pristine() {
                return false;
            }
            *s = CoordinatorState {
                generation: s.generation + 1,
                ..CoordinatorState::default()
            };
            true
        });
        if changed {
            debug!("Cleared source and analysis");
        }
    }

    // ==================== Analysis ====================

    /// Analyze the current source now.
    ///
    /// Does nothing if the source is blank. Otherwise the state moves to
    /// `Loading` (the previous result stays visible) and, once the analyzer
    /// answers, to `Ready` or `Error`. Adapter failures, panics and timeouts are
    /// absorbed into the state; nothing escapes to the caller.
    ///
    /// Returns the state this run settled in. A run superseded by a newer run or
    /// by [`clear`](Self::clear) discards its result and returns the current
    /// state, which is `Loading` while the newer run is still in flight.
    ///
    /// The run settles on its own task: dropping the returned future stops the
    /// wait, not the run.
    pub async fn run_analysis(&self) -> AnalysisState {
        let mut started = None;
        self.commit(|s| {
            if s.source.is_blank() {
                return false;
            }
            s.generation += 1;
            s.analysis_state = AnalysisState::Loading;
            started = Some((s.generation, s.source.text.clone()));
            true
        });

        let Some((generation, text)) = started else {
            trace!("Skipping analysis: source is blank");
            return self.inner.state.borrow().analysis_state;
        };

        debug!("Analysis {} started ({} bytes)", generation, text.len());
        let coordinator = self.clone();
        let run = tokio::spawn(async move {
            let outcome = coordinator.invoke_adapter(Arc::clone(&text)).await;
            coordinator.apply_outcome(generation, text, outcome)
        });

        match run.await {
            Ok(settled) => settled,
            Err(err) => {
                warn!("Analysis {} task failed: {}", generation, err);
                self.inner.state.borrow().analysis_state
            }
        }
    }

    /// Call the adapter on its own task so a panic or a stall cannot take the
    /// coordinator down with it.
    async fn invoke_adapter(&self, text: Arc<str>) -> Result<AnalyzerOutput, CoordinatorError> {
        let adapter = Arc::clone(&self.inner.adapter);
        let mut call = tokio::spawn(async move { adapter.analyze(&text).await });

        let joined = match self.inner.config.analysis_timeout {
            Some(limit) => match tokio::time::timeout(limit, &mut call).await {
                Ok(joined) => joined,
                Err(_) => {
                    call.abort();
                    return Err(CoordinatorError::Timeout(limit));
                }
            },
            None => call.await,
        };

        match joined {
            Ok(result) => result.map_err(CoordinatorError::from),
            Err(err) => {
                warn!("Analyzer task failed: {}", err);
                Err(CoordinatorError::Panicked)
            }
        }
    }

    fn apply_outcome(
        &self,
        generation: u64,
        text: Arc<str>,
        outcome: Result<AnalyzerOutput, CoordinatorError>,
    ) -> AnalysisState {
        // Build the replacement outside the state lock.
        let update = match outcome {
            Ok(output) => {
                let result = AnalysisResult::from_output(&text, output);
                let error = if result.succeeded {
                    None
                } else {
                    let message = self
                        .inner
                        .config
                        .surface_diagnostics(&result.diagnostics)
                        .unwrap_or_else(|| GENERIC_FAILURE.to_string());
                    Some(Arc::<str>::from(message))
                };
                Ok((Arc::new(ResultSnapshot::new(generation, text, result)), error))
            }
            Err(err) => {
                warn!("Analysis {} failed: {}", generation, err);
                Err(Arc::<str>::from(err.to_string()))
            }
        };

        let mut settled = None;
        self.commit(|s| {
            if s.generation != generation {
                return false;
            }
            match update {
                Ok((snapshot, error)) => {
                    s.analysis_state = if error.is_none() {
                        AnalysisState::Ready
                    } else {
                        AnalysisState::Error
                    };
                    s.last_error = error;
                    s.last_result = Some(snapshot);
                }
                // Keep the previous tokens and symbols on screen.
                Err(message) => {
                    s.analysis_state = AnalysisState::Error;
                    s.last_error = Some(message);
                }
            }
            settled = Some(s.analysis_state);
            true
        });

        match settled {
            Some(state) => {
                debug!("Analysis {} settled: {}", generation, state);
                state
            }
            None => {
                trace!("Discarding result of superseded analysis {}", generation);
                self.inner.state.borrow().analysis_state
            }
        }
    }

    fn schedule_analysis(&self) {
        let (ticket, cancelled) = self.inner.debounce.schedule();
        let delay = self.inner.config.debounce;
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        trace!("Debounce: ticket {} scheduled in {:?}", ticket, delay);

        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if !inner.debounce.fire(ticket) {
                return;
            }
            AnalysisCoordinator { inner }.run_analysis().await;
        });
    }

    // ==================== Presentation ====================

    /// Select a line, or clear the selection. Selecting a line clears any hover
    /// highlight: selection takes visual precedence.
    pub fn set_selected_line(&self, line: Option<u32>) {
        self.commit(|s| {
            let highlight_cleared = line.is_some() && s.highlight.take().is_some();
            let changed = s.selected_line != line;
            s.selected_line = line;
            changed || highlight_cleared
        });
    }

    pub fn set_highlight(&self, info: Option<HighlightInfo>) {
        self.commit(|s| {
            if s.highlight == info {
                return false;
            }
            s.highlight = info;
            true
        });
    }

    pub fn set_active_view(&self, view: ActiveView) {
        self.commit(|s| {
            if s.active_view == view {
                return false;
            }
            s.active_view = view;
            true
        });
    }

    /// Apply `update` atomically and notify subscribers if it reports a change.
    fn commit(&self, update: impl FnOnce(&mut CoordinatorState) -> bool) -> bool {
        self.inner.state.send_if_modified(update)
    }
}
