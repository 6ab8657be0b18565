use chrono::{DateTime, Local};

/// Outcome of one finished test
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    pub wpm: u32,
    pub accuracy_percent: f64,
    pub completed_at: DateTime<Local>,
}

impl TestResult {
    pub fn summary(&self) -> String {
        format!(
            "Test Complete! {} WPM • {:.0}% Accuracy",
            self.wpm, self.accuracy_percent
        )
    }
}

/// Finished tests in completion order. Lives for the process only.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    results: Vec<TestResult>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, result: TestResult) {
        self.results.push(result);
    }

    pub fn all(&self) -> &[TestResult] {
        &self.results
    }

    pub fn last(&self) -> Option<&TestResult> {
        self.results.last()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(wpm: u32, accuracy_percent: f64) -> TestResult {
        TestResult {
            wpm,
            accuracy_percent,
            completed_at: Local::now(),
        }
    }

    #[test]
    fn test_new_log_is_empty() {
        let log = HistoryLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert!(log.last().is_none());
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut log = HistoryLog::new();
        log.append(result(40, 90.0));
        log.append(result(55, 75.5));
        log.append(result(12, 100.0));

        let wpms: Vec<u32> = log.all().iter().map(|r| r.wpm).collect();
        assert_eq!(wpms, vec![40, 55, 12]);
        assert_eq!(log.last().map(|r| r.wpm), Some(12));
        assert!(!log.is_empty());
    }

    #[test]
    fn test_summary_rounds_accuracy() {
        let r = result(42, 60.869);
        assert_eq!(r.summary(), "Test Complete! 42 WPM • 61% Accuracy");
    }
}
