//! Per-run collection of non-fatal setup failures.
//!
//! The collector is an explicit object the caller constructs and passes into
//! `create_project` — deliberately not a module-level global, so test suites
//! can inspect and reset it deterministically between cases.

use std::fmt;

/// One recorded enrichment-step failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupFailure {
    /// The step's fixed display name, e.g. `"Database configuration setup"`.
    pub step: String,
    /// Rendered error message.
    pub error: String,
}

impl fmt::Display for SetupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.step, self.error)
    }
}

/// Accumulates enrichment-step failures for one project-creation run.
#[derive(Debug, Default)]
pub struct SetupErrorCollector {
    failures: Vec<SetupFailure>,
}

impl SetupErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure under a step name.
    pub fn record(&mut self, step: impl Into<String>, error: impl fmt::Display) {
        self.failures.push(SetupFailure {
            step: step.into(),
            error: error.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[SetupFailure] {
        &self.failures
    }

    /// Whether any failure was recorded under the given step name.
    pub fn has_step(&self, step: &str) -> bool {
        self.failures.iter().any(|f| f.step == step)
    }

    /// Drop all recorded failures (test isolation between cases).
    pub fn clear(&mut self) {
        self.failures.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order_and_clears() {
        let mut collector = SetupErrorCollector::new();
        assert!(collector.is_empty());

        collector.record("Docker compose setup", "compose write failed");
        collector.record("Authentication setup", "provider unavailable");

        assert_eq!(collector.len(), 2);
        assert_eq!(collector.failures()[0].step, "Docker compose setup");
        assert!(collector.has_step("Authentication setup"));
        assert!(!collector.has_step("Environment files"));

        collector.clear();
        assert!(collector.is_empty());
    }

    #[test]
    fn failure_displays_step_and_message() {
        let failure = SetupFailure {
            step: "Color palette".into(),
            error: "palette not found".into(),
        };
        assert_eq!(failure.to_string(), "Color palette: palette not found");
    }
}
