/// Lower bound on elapsed time (about one second) so the first keystrokes
/// don't produce absurd spikes.
pub const MIN_ELAPSED_MINUTES: f64 = 0.0167;

/// Number of whitespace-separated words in `typed`.
pub fn word_count(typed: &str) -> usize {
    typed.split_whitespace().count()
}

/// Words per minute, floored to a whole number.
pub fn compute_wpm(typed: &str, elapsed_ms: u64) -> u32 {
    let words = word_count(typed);
    if words == 0 {
        return 0;
    }

    let elapsed_minutes = (elapsed_ms as f64 / 60_000.0).max(MIN_ELAPSED_MINUTES);
    (words as f64 / elapsed_minutes).floor() as u32
}
