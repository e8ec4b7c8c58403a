use std::time::{Duration, Instant};

/// Placeholder alphabet for unrevealed positions.
const LETTERS: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

fn random_letter() -> char {
    LETTERS[fastrand::usize(..LETTERS.len())]
}

/// Produce a same-length random-letter rendition of `text`. Used for the
/// frozen headline texture before a slot's first reveal runs.
pub(crate) fn scramble_string(text: &str) -> String {
    text.chars().map(|_| random_letter()).collect()
}

/// Progressive left-to-right reveal of a final string from random letters.
///
/// The reveal counter advances by 1/3 per tick, so each position locks in
/// after three ticks. Once the counter reaches the string length the display
/// is forced to the exact final text, regardless of timing drift.
#[derive(Debug)]
pub(crate) struct ScrambleEffect {
    final_chars: Vec<char>,
    revealed: f32,
    display: String,
    done: bool,
}

impl ScrambleEffect {
    pub(crate) fn new(final_text: &str) -> Self {
        let final_chars: Vec<char> = final_text.chars().collect();
        let display = final_chars.iter().map(|_| random_letter()).collect();
        let done = final_chars.is_empty();
        Self { final_chars, revealed: 0.0, display, done }
    }

    /// Advance one tick. Returns `true` once the effect has finished and the
    /// display holds the exact final text.
    pub(crate) fn tick(&mut self) -> bool {
        if self.done {
            return true;
        }
        let confirmed = self.revealed.floor() as usize;
        self.display = self
            .final_chars
            .iter()
            .enumerate()
            .map(|(index, ch)| if index < confirmed { *ch } else { random_letter() })
            .collect();

        self.revealed += 1.0 / 3.0;
        if self.revealed >= self.final_chars.len() as f32 {
            self.display = self.final_chars.iter().collect();
            self.done = true;
        }
        self.done
    }

    pub(crate) fn display(&self) -> &str {
        &self.display
    }

    pub(crate) fn is_done(&self) -> bool {
        self.done
    }
}

/// A cancellable fixed-interval ticker. The scramble effect owns one and the
/// showcase stops it on natural completion and on teardown, so no ticker ever
/// outlives the view.
#[derive(Debug)]
pub(crate) struct Ticker {
    interval: Duration,
    next_due: Instant,
    cancelled: bool,
}

impl Ticker {
    pub(crate) fn new(interval: Duration, now: Instant) -> Self {
        Self { interval, next_due: now + interval, cancelled: false }
    }

    /// Number of ticks due at `now`. Late polls catch up so reveal pacing is
    /// duration-based rather than frame-based.
    pub(crate) fn due_ticks(&mut self, now: Instant) -> u32 {
        if self.cancelled {
            return 0;
        }
        let mut ticks = 0;
        while self.next_due <= now {
            self.next_due += self.interval;
            ticks += 1;
        }
        ticks
    }

    pub(crate) fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("WRAITH")]
    #[case("A")]
    #[case("BEAST OF THE HUNT")]
    fn test_initial_display_has_final_length(#[case] text: &str) {
        let effect = ScrambleEffect::new(text);
        assert_eq!(effect.display().chars().count(), text.chars().count());
    }

    #[test]
    fn test_initial_display_is_uppercase_letters() {
        let effect = ScrambleEffect::new("BLOODHOUND");
        assert!(effect.display().chars().all(|c| c.is_ascii_uppercase()));
    }

    #[rstest]
    #[case("WRAITH")]
    #[case("X")]
    #[case("NOW YOU SEE ME...")]
    #[case("D.O.C. HEAL DRONE")]
    fn test_final_display_is_exact(#[case] text: &str) {
        let mut effect = ScrambleEffect::new(text);
        let mut ticks = 0;
        while !effect.tick() {
            ticks += 1;
            assert!(ticks < 10_000, "scramble for {text:?} never converged");
        }
        assert_eq!(effect.display(), text);
        // Re-ticking a finished effect is a no-op.
        assert!(effect.tick());
        assert_eq!(effect.display(), text);
    }

    #[test]
    fn test_converges_within_bounded_ticks() {
        let text = "DIMENSIONAL RIFT";
        let mut effect = ScrambleEffect::new(text);
        let bound = text.chars().count() * 3 + 3;
        let mut ticks = 0;
        while !effect.tick() {
            ticks += 1;
        }
        assert!(ticks <= bound, "took {ticks} ticks, bound was {bound}");
    }

    #[test]
    fn test_empty_string_is_immediately_done() {
        let effect = ScrambleEffect::new("");
        assert!(effect.is_done());
        assert_eq!(effect.display(), "");
    }

    #[test]
    fn test_scramble_string_length() {
        assert_eq!(scramble_string("OCTANE").chars().count(), 6);
    }

    #[test]
    fn test_ticker_due_ticks() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(Duration::from_millis(30), t0);
        assert_eq!(ticker.due_ticks(t0), 0);
        assert_eq!(ticker.due_ticks(t0 + Duration::from_millis(30)), 1);
        // A late poll catches up on all missed ticks.
        assert_eq!(ticker.due_ticks(t0 + Duration::from_millis(150)), 4);
    }

    #[test]
    fn test_ticker_cancel() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(Duration::from_millis(30), t0);
        ticker.cancel();
        assert!(ticker.is_cancelled());
        assert_eq!(ticker.due_ticks(t0 + Duration::from_secs(1)), 0);
    }
}
