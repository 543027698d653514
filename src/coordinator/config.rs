use std::time::Duration;

/// Tuning knobs for an [`AnalysisCoordinator`](super::AnalysisCoordinator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Quiet period after the last edit before analysis runs.
    pub debounce: Duration,
    /// Upper bound on a single analyzer call. `None` waits forever.
    pub analysis_timeout: Option<Duration>,
    /// Filename suffix a loaded file must carry, matched case-insensitively.
    pub required_suffix: String,
    /// How many diagnostics of a failed run are surfaced as the error message.
    pub max_surfaced_diagnostics: usize,
    /// Joins surfaced diagnostics.
    pub diagnostic_separator: String,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            analysis_timeout: Some(Duration::from_secs(10)),
            required_suffix: ".asm".to_string(),
            max_surfaced_diagnostics: 2,
            diagnostic_separator: "; ".to_string(),
        }
    }
}

impl CoordinatorConfig {
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_analysis_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.analysis_timeout = timeout;
        self
    }

    pub fn with_required_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.required_suffix = suffix.into();
        self
    }

    pub fn with_max_surfaced_diagnostics(mut self, max: usize) -> Self {
        self.max_surfaced_diagnostics = max.max(1);
        self
    }

    /// Whether `filename` ends with the required suffix, ignoring ASCII case.
    pub fn accepts_filename(&self, filename: &str) -> bool {
        let suffix = self.required_suffix.as_bytes();
        let name = filename.as_bytes();
        name.len() >= suffix.len() && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
    }

    /// The error message for a failed run: the first diagnostics, joined.
    pub(crate) fn surface_diagnostics(&self, diagnostics: &[String]) -> Option<String> {
        if diagnostics.is_empty() {
            return None;
        }
        let surfaced: Vec<&str> = diagnostics
            .iter()
            .take(self.max_surfaced_diagnostics)
            .map(String::as_str)
            .collect();
        Some(surfaced.join(&self.diagnostic_separator))
    }
}
