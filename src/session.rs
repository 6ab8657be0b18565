use crate::clock::{Clock, SystemClock};
use crate::config::TestDuration;
use crate::history::{HistoryLog, TestResult};
use crate::pace::compute_wpm;
use crate::scoring::{score, CharMark};
use crate::sentences::{Sentence, SentenceProvider};
use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Status {
    Idle,
    Running,
    Finished,
}

/// Snapshot of the current attempt, recomputed on every input
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LiveStats {
    pub wpm: u32,
    pub accuracy_percent: f64,
    pub diff: Vec<CharMark>,
}

/// What a countdown tick did
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub remaining_secs: u32,
    pub finished: bool,
    /// Set only on the tick that ran the countdown out
    pub result: Option<TestResult>,
}

/// One timed typing attempt and the history of the ones before it.
///
/// The session never schedules anything itself. The driver calls
/// [`TestSession::on_tick`] once per second while [`Status::Running`] and
/// stops as soon as the status changes. Calls made in the wrong state are
/// ignored.
#[derive(Debug)]
pub struct TestSession<C: Clock = SystemClock, R: Rng = ThreadRng> {
    clock: C,
    provider: SentenceProvider<R>,
    history: HistoryLog,
    sentence: Option<Sentence>,
    duration: Option<TestDuration>,
    started_at_ms: Option<u64>,
    remaining_secs: u32,
    status: Status,
    typed: String,
    stats: LiveStats,
}

impl TestSession<SystemClock, ThreadRng> {
    pub fn new() -> Self {
        Self::with_parts(SystemClock::new(), SentenceProvider::new())
    }
}

impl Default for TestSession<SystemClock, ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, R: Rng> TestSession<C, R> {
    pub fn with_parts(clock: C, provider: SentenceProvider<R>) -> Self {
        Self {
            clock,
            provider,
            history: HistoryLog::new(),
            sentence: None,
            duration: None,
            started_at_ms: None,
            remaining_secs: 0,
            status: Status::Idle,
            typed: String::new(),
            stats: LiveStats::default(),
        }
    }

    pub fn start(&mut self, duration: TestDuration) {
        if self.status == Status::Running {
            debug!("start ignored, test already running");
            return;
        }

        self.sentence = Some(self.provider.next());
        self.typed.clear();
        self.duration = Some(duration);
        self.remaining_secs = duration.secs();
        self.started_at_ms = Some(self.clock.now_ms());
        self.status = Status::Running;
        self.stats = self.compute_stats();

        debug!(duration = %duration, sentence = ?self.sentence.map(|s| s.as_str()), "test started");
    }

    /// Replace the typed text and recompute live stats. Outside a running
    /// test this returns the last snapshot untouched.
    pub fn on_input(&mut self, text: &str) -> LiveStats {
        if self.status != Status::Running {
            debug!(status = %self.status, "input ignored outside a running test");
            return self.stats.clone();
        }

        self.typed.clear();
        self.typed.push_str(text);
        self.stats = self.compute_stats();
        self.stats.clone()
    }

    pub fn on_tick(&mut self) -> Tick {
        if self.status != Status::Running {
            debug!(status = %self.status, "tick ignored outside a running test");
            return Tick {
                remaining_secs: self.remaining_secs,
                finished: self.status == Status::Finished,
                result: None,
            };
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return Tick {
                remaining_secs: self.remaining_secs,
                finished: false,
                result: None,
            };
        }

        let result = self.complete();
        Tick {
            remaining_secs: 0,
            finished: true,
            result: Some(result),
        }
    }

    /// End a running test early. `None` if no test is running.
    pub fn finish(&mut self) -> Option<TestResult> {
        if self.status != Status::Running {
            debug!(status = %self.status, "finish ignored outside a running test");
            return None;
        }
        Some(self.complete())
    }

    pub fn reset(&mut self) {
        self.sentence = None;
        self.started_at_ms = None;
        self.remaining_secs = 0;
        self.status = Status::Idle;
        self.typed.clear();
        self.stats = LiveStats::default();
    }

    /// Pick a different target sentence. Typed progress is discarded, the
    /// countdown (if any) keeps going.
    pub fn refresh_sentence(&mut self) {
        self.sentence = Some(self.provider.next());
        self.typed.clear();
        self.stats = self.compute_stats();
        debug!(status = %self.status, sentence = ?self.sentence.map(|s| s.as_str()), "sentence refreshed");
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn sentence(&self) -> Option<&Sentence> {
        self.sentence.as_ref()
    }

    pub fn typed_text(&self) -> &str {
        &self.typed
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Duration of the current or most recent test
    pub fn duration(&self) -> Option<TestDuration> {
        self.duration
    }

    pub fn started_at_ms(&self) -> Option<u64> {
        self.started_at_ms
    }

    pub fn live_stats(&self) -> &LiveStats {
        &self.stats
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    fn elapsed_ms(&self) -> u64 {
        self.started_at_ms
            .map(|start| self.clock.now_ms().saturating_sub(start))
            .unwrap_or(0)
    }

    fn compute_stats(&self) -> LiveStats {
        let target = self.sentence.map(|s| s.as_str()).unwrap_or("");
        let accuracy = score(&self.typed, target);
        LiveStats {
            wpm: compute_wpm(&self.typed, self.elapsed_ms()),
            accuracy_percent: accuracy.percent,
            diff: accuracy.diff,
        }
    }

    fn complete(&mut self) -> TestResult {
        self.stats = self.compute_stats();
        self.status = Status::Finished;

        let result = TestResult {
            wpm: self.stats.wpm,
            accuracy_percent: self.stats.accuracy_percent,
            completed_at: self.clock.wall_time(),
        };
        self.history.append(result.clone());

        info!(
            wpm = result.wpm,
            accuracy = result.accuracy_percent,
            elapsed_ms = self.elapsed_ms(),
            "test finished"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::sentences::SENTENCES;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;

    fn session() -> (TestSession<ManualClock, StdRng>, ManualClock) {
        let clock = ManualClock::new();
        let s = TestSession::with_parts(clock.clone(), SentenceProvider::seeded(1));
        (s, clock)
    }

    #[test]
    fn test_new_session_is_idle() {
        let (s, _) = session();
        assert_eq!(s.status(), Status::Idle);
        assert_eq!(s.remaining_secs(), 0);
        assert!(s.sentence().is_none());
        assert!(s.started_at_ms().is_none());
        assert!(s.history().is_empty());
    }

    #[test]
    fn test_start_enters_running() {
        let (mut s, clock) = session();
        clock.set(500);
        s.start(TestDuration::Thirty);

        assert_eq!(s.status(), Status::Running);
        assert_eq!(s.remaining_secs(), 30);
        assert_eq!(s.started_at_ms(), Some(500));
        assert_eq!(s.duration(), Some(TestDuration::Thirty));
        let sentence = s.sentence().unwrap();
        assert!(SENTENCES.contains(&sentence.as_str()));
        assert_eq!(s.live_stats().diff.len(), sentence.len());
        assert!(s.live_stats().diff.iter().all(CharMark::is_untyped));
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let (mut s, clock) = session();
        s.start(TestDuration::Fifteen);
        s.on_input("The");
        let sentence = *s.sentence().unwrap();

        clock.advance(3_000);
        s.start(TestDuration::Sixty);

        assert_eq!(s.remaining_secs(), 15);
        assert_eq!(s.started_at_ms(), Some(0));
        assert_eq!(*s.sentence().unwrap(), sentence);
        assert_eq!(s.typed_text(), "The");
    }

    #[test]
    fn test_ticks_exhaust_countdown() {
        let (mut s, _) = session();
        s.start(TestDuration::Fifteen);

        for expected in (1..15).rev() {
            let tick = s.on_tick();
            assert_eq!(tick.remaining_secs, expected);
            assert!(!tick.finished);
            assert!(tick.result.is_none());
            assert_eq!(s.status(), Status::Running);
        }

        let last = s.on_tick();
        assert!(last.finished);
        assert_eq!(last.remaining_secs, 0);
        assert!(last.result.is_some());
        assert_eq!(s.status(), Status::Finished);
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn test_input_scores_against_sentence() {
        let (mut s, clock) = session();
        s.start(TestDuration::Sixty);
        let target = s.sentence().unwrap().as_str();
        let first_word: String = target.chars().take_while(|c| *c != ' ').collect();

        clock.advance(30_000);
        let stats = s.on_input(&first_word);

        let expected =
            100.0 * first_word.chars().count() as f64 / target.chars().count() as f64;
        assert!((stats.accuracy_percent - expected).abs() < 1e-9);
        assert_eq!(stats.wpm, 2);
        assert_eq!(&stats, s.live_stats());
    }

    #[test]
    fn test_input_while_idle_is_neutral() {
        let (mut s, _) = session();
        let stats = s.on_input("hello");

        assert_eq!(stats, LiveStats::default());
        assert_eq!(s.typed_text(), "");
        assert!(s.history().is_empty());
    }

    #[test]
    fn test_input_after_finish_keeps_final_stats() {
        let (mut s, clock) = session();
        s.start(TestDuration::Fifteen);
        clock.advance(2_000);
        let live = s.on_input("The");
        s.finish();

        let after = s.on_input("The quick brown");
        assert_eq!(after.wpm, live.wpm);
        assert_eq!(s.typed_text(), "The");
    }

    #[test]
    fn test_finish_early_records_result() {
        let (mut s, clock) = session();
        s.start(TestDuration::Sixty);
        clock.advance(30_000);
        s.on_input("go go go go");

        let result = s.finish().unwrap();
        assert_eq!(result.wpm, 8);
        assert_eq!(s.status(), Status::Finished);
        assert_eq!(s.history().all(), &[result]);
    }

    #[test]
    fn test_finish_when_not_running_is_ignored() {
        let (mut s, _) = session();
        assert!(s.finish().is_none());

        s.start(TestDuration::Fifteen);
        s.finish();
        assert!(s.finish().is_none());
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn test_tick_after_finish_is_ignored() {
        let (mut s, _) = session();
        s.start(TestDuration::Fifteen);
        s.on_tick();
        s.finish();

        let tick = s.on_tick();
        assert_eq!(tick.remaining_secs, 14);
        assert!(tick.finished);
        assert!(tick.result.is_none());
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (mut s, _) = session();
        s.reset();
        assert_eq!(s.status(), Status::Idle);

        s.start(TestDuration::Thirty);
        s.on_input("Typ");
        s.reset();
        s.reset();

        assert_eq!(s.status(), Status::Idle);
        assert_eq!(s.remaining_secs(), 0);
        assert_eq!(s.typed_text(), "");
        assert!(s.sentence().is_none());

        s.start(TestDuration::Fifteen);
        s.finish();
        s.reset();
        assert_eq!(s.status(), Status::Idle);
        assert_eq!(s.remaining_secs(), 0);
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn test_tick_while_idle_is_ignored() {
        let (mut s, _) = session();
        let tick = s.on_tick();
        assert_matches!(
            tick,
            Tick {
                remaining_secs: 0,
                finished: false,
                result: None
            }
        );
    }

    #[test]
    fn test_restart_after_finish() {
        let (mut s, _) = session();
        s.start(TestDuration::Fifteen);
        s.on_input("abc");
        s.finish();

        s.start(TestDuration::Thirty);
        assert_eq!(s.status(), Status::Running);
        assert_eq!(s.remaining_secs(), 30);
        assert_eq!(s.typed_text(), "");
    }

    #[test]
    fn test_refresh_sentence_while_running() {
        let (mut s, clock) = session();
        s.start(TestDuration::Thirty);
        clock.advance(4_000);
        s.on_input("Some progress");
        s.on_tick();

        s.refresh_sentence();

        assert_eq!(s.status(), Status::Running);
        assert_eq!(s.remaining_secs(), 29);
        assert_eq!(s.typed_text(), "");
        assert_eq!(s.live_stats().accuracy_percent, 0.0);
        assert_eq!(s.live_stats().wpm, 0);
        let sentence = s.sentence().unwrap();
        assert_eq!(s.live_stats().diff.len(), sentence.len());
    }

    #[test]
    fn test_refresh_sentence_while_idle_stays_idle() {
        let (mut s, _) = session();
        s.refresh_sentence();
        assert_eq!(s.status(), Status::Idle);
        assert!(s.sentence().is_some());

        s.on_input("ignored");
        assert_eq!(s.typed_text(), "");
    }

    #[test]
    fn test_interleaved_ticks_and_input() {
        let (mut s, clock) = session();
        s.start(TestDuration::Fifteen);
        let target = s.sentence().unwrap().as_str().to_string();

        for (i, _) in target.char_indices().take(10) {
            clock.advance(1_000);
            s.on_tick();
            s.on_input(&target[..=i]);
        }

        assert_eq!(s.remaining_secs(), 5);
        assert!(s.is_running());
        assert!(s.live_stats().diff[..10].iter().all(CharMark::is_correct));
    }

    #[test]
    fn test_history_survives_later_activity() {
        let (mut s, _) = session();
        for d in TestDuration::ALL {
            s.start(d);
            s.on_input("x");
            s.finish();
        }
        let snapshot = s.history().all().to_vec();

        s.on_input("more");
        s.on_tick();
        s.reset();

        assert_eq!(s.history().all(), snapshot.as_slice());
        assert_eq!(s.history().len(), 3);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Idle.to_string(), "Idle");
        assert_eq!(Status::Running.to_string(), "Running");
        assert_eq!(Status::Finished.to_string(), "Finished");
    }
}
