#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// One target character in the highlighted diff.
/// `outcome` is `None` for characters the user has not reached yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharMark {
    pub char: char,
    pub outcome: Option<Outcome>,
}

impl CharMark {
    pub fn is_correct(&self) -> bool {
        self.outcome == Some(Outcome::Correct)
    }

    pub fn is_untyped(&self) -> bool {
        self.outcome.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Accuracy {
    pub percent: f64,
    pub diff: Vec<CharMark>,
}

impl Accuracy {
    pub fn correct_count(&self) -> usize {
        self.diff.iter().filter(|m| m.is_correct()).count()
    }
}

/// Position-by-position comparison of `typed` against `target`.
///
/// The denominator is always the full target length, so a partial attempt can
/// not reach 100%, and characters typed past the end of the target are ignored.
/// The diff covers every target character; positions past the end of `typed`
/// are left unmarked.
pub fn score(typed: &str, target: &str) -> Accuracy {
    let target_len = target.chars().count();
    let mut typed_chars = typed.chars();
    let mut correct = 0usize;

    let diff: Vec<CharMark> = target
        .chars()
        .map(|expected| {
            let outcome = typed_chars.next().map(|c| {
                if c == expected {
                    correct += 1;
                    Outcome::Correct
                } else {
                    Outcome::Incorrect
                }
            });
            CharMark {
                char: expected,
                outcome,
            }
        })
        .collect();

    let percent = if typed.is_empty() || target_len == 0 {
        0.0
    } else {
        (correct as f64 * 100.0) / target_len as f64
    };

    Accuracy { percent, diff }
}
