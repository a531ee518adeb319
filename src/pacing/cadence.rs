//! Per-character delay model.
//!
//! [`Cadence`] turns a target speed into a stream of inter-character delays
//! that look like a person typing. Each delay is jittered around the nominal
//! interval; on top of that come short fast bursts and irregular pauses.
//!
//! | Step | Effect |
//! |------|--------|
//! | Jitter | `base * U[0.8, 1.4)`, or `base * U[0.55, 0.85)` during a burst |
//! | Burst arming | p = 0.06, only when no burst is active; 3–6 characters |
//! | Micro-pause | `+ U[0.18, 0.55)` s when `i > 0` and `i % U{7..=14} == 0` |
//! | Punctuation | `+ U[0.4, 1.2)` s with p = 0.35 after `. , ! ? ; :` or `\n` |
//! | Floor | never below 1 ms |

use std::time::Duration;

use rand::Rng;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowest speed used for timing; anything below is clamped up to this.
pub const MIN_WPM: u32 = 10;

/// Characters counted as one "word" for WPM purposes.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Lower bound on any computed delay, in seconds.
pub const MIN_DELAY_SECS: f64 = 0.001;

/// Characters that may be followed by a longer "thinking" pause.
pub const PAUSE_CHARS: [char; 7] = ['.', ',', '!', '?', ';', ':', '\n'];

const JITTER: (f64, f64) = (0.8, 1.4);
const BURST_JITTER: (f64, f64) = (0.55, 0.85);
const BURST_CHANCE: f64 = 0.06;
const BURST_LEN: (u32, u32) = (3, 6);
const MICRO_PAUSE_PERIOD: (usize, usize) = (7, 14);
const MICRO_PAUSE_SECS: (f64, f64) = (0.18, 0.55);
const PUNCT_PAUSE_CHANCE: f64 = 0.35;
const PUNCT_PAUSE_SECS: (f64, f64) = (0.4, 1.2);

// ---------------------------------------------------------------------------
// Speed helpers
// ---------------------------------------------------------------------------

/// The speed actually used for timing: `max(MIN_WPM, wpm)`.
pub fn effective_wpm(wpm: u32) -> u32 {
    wpm.max(MIN_WPM)
}

/// Nominal seconds per character before jitter.
///
/// ```
/// use typing_buddy::pacing::base_interval_secs;
///
/// assert_eq!(base_interval_secs(120), 0.1);
/// assert_eq!(base_interval_secs(60), 0.2);
/// ```
pub fn base_interval_secs(wpm: u32) -> f64 {
    let cps = effective_wpm(wpm) as f64 * CHARS_PER_WORD / 60.0;
    1.0 / cps
}

/// Returns `true` for characters that can trigger a punctuation pause.
#[inline]
pub fn is_pause_char(ch: char) -> bool {
    PAUSE_CHARS.contains(&ch)
}

// ---------------------------------------------------------------------------
// Cadence
// ---------------------------------------------------------------------------

/// Delay generator for a single run.
///
/// Holds the only mutable timing state, the burst counter. A `Cadence` is
/// built fresh for every run and dropped with it.
#[derive(Debug)]
pub struct Cadence<R> {
    base_interval: f64,
    burst_remaining: u32,
    rng: R,
}

impl<R: Rng> Cadence<R> {
    /// Build a cadence for `wpm` (clamped to [`MIN_WPM`]) drawing from `rng`.
    pub fn new(wpm: u32, rng: R) -> Self {
        Self {
            base_interval: base_interval_secs(wpm),
            burst_remaining: 0,
            rng,
        }
    }

    /// Nominal per-character delay in seconds.
    pub fn base_interval(&self) -> f64 {
        self.base_interval
    }

    /// Fast characters left in the current burst (0 when none is active).
    pub fn burst_remaining(&self) -> u32 {
        self.burst_remaining
    }

    /// Compute the delay to apply after emitting `ch` at zero-based `index`.
    ///
    /// A burst armed by this call only affects the following characters.
    pub fn next_delay(&mut self, index: usize, ch: char) -> Duration {
        let multiplier = if self.burst_remaining > 0 {
            self.burst_remaining -= 1;
            self.rng.gen_range(BURST_JITTER.0..BURST_JITTER.1)
        } else {
            self.rng.gen_range(JITTER.0..JITTER.1)
        };

        let mut delay = self.base_interval * multiplier;

        if self.rng.gen_bool(BURST_CHANCE) && self.burst_remaining == 0 {
            self.burst_remaining = self.rng.gen_range(BURST_LEN.0..=BURST_LEN.1);
        }

        let period = self
            .rng
            .gen_range(MICRO_PAUSE_PERIOD.0..=MICRO_PAUSE_PERIOD.1);
        if index > 0 && index % period == 0 {
            delay += self.rng.gen_range(MICRO_PAUSE_SECS.0..MICRO_PAUSE_SECS.1);
        }

        if is_pause_char(ch) && self.rng.gen_bool(PUNCT_PAUSE_CHANCE) {
            delay += self.rng.gen_range(PUNCT_PAUSE_SECS.0..PUNCT_PAUSE_SECS.1);
        }

        Duration::from_secs_f64(delay.max(MIN_DELAY_SECS))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cadence(wpm: u32, seed: u64) -> Cadence<StdRng> {
        Cadence::new(wpm, StdRng::seed_from_u64(seed))
    }

    /// Smallest index that every micro-pause period (7..=14) divides.
    const ALWAYS_PAUSE_INDEX: usize = 360_360;

    // --- Speed derivation ---------------------------------------------------

    #[test]
    fn base_interval_at_120_wpm_is_a_tenth_of_a_second() {
        assert_eq!(base_interval_secs(120), 0.1);
    }

    #[test]
    fn base_interval_other_speeds() {
        assert_eq!(base_interval_secs(60), 0.2);
        assert_eq!(base_interval_secs(240), 0.05);
        assert_eq!(base_interval_secs(600), 0.02);
    }

    #[test]
    fn slow_speeds_clamp_to_minimum() {
        assert_eq!(effective_wpm(0), MIN_WPM);
        assert_eq!(effective_wpm(3), MIN_WPM);
        assert_eq!(effective_wpm(10), 10);
        assert_eq!(effective_wpm(11), 11);

        let floor = base_interval_secs(MIN_WPM);
        assert!((floor - 1.2).abs() < 1e-12);
        assert_eq!(base_interval_secs(0), floor);
        assert_eq!(base_interval_secs(9), floor);
    }

    #[test]
    fn cadence_uses_clamped_interval() {
        assert_eq!(cadence(120, 1).base_interval(), 0.1);
        assert_eq!(cadence(1, 1).base_interval(), base_interval_secs(MIN_WPM));
    }

    #[test]
    fn pause_chars() {
        for ch in ['.', ',', '!', '?', ';', ':', '\n'] {
            assert!(is_pause_char(ch), "{ch:?} should pause");
        }
        for ch in ['a', ' ', '-', '\t', '\'', '"'] {
            assert!(!is_pause_char(ch), "{ch:?} should not pause");
        }
    }

    // --- Delay bounds -------------------------------------------------------

    #[test]
    fn delays_never_drop_below_floor() {
        let mut c = cadence(u32::MAX, 7);
        for (i, ch) in "Hello, world.\nThis is fast!".chars().cycle().take(5_000).enumerate() {
            assert!(c.next_delay(i, ch) >= Duration::from_secs_f64(MIN_DELAY_SECS));
        }
    }

    #[test]
    fn delays_stay_within_the_widest_envelope() {
        let mut c = cadence(120, 11);
        let max = 0.1 * JITTER.1 + MICRO_PAUSE_SECS.1 + PUNCT_PAUSE_SECS.1;
        for (i, ch) in "a.b,c!d?e;f:g\n".chars().cycle().take(5_000).enumerate() {
            let d = c.next_delay(i, ch).as_secs_f64();
            assert!(d >= 0.1 * BURST_JITTER.0 - 1e-9, "delay {d} too short");
            assert!(d < max + 1e-9, "delay {d} too long");
        }
    }

    #[test]
    fn first_character_never_gets_a_micro_pause() {
        let mut c = cadence(120, 3);
        for _ in 0..2_000 {
            let d = c.next_delay(0, 'a').as_secs_f64();
            assert!(d < 0.1 * JITTER.1 + 1e-9);
        }
    }

    #[test]
    fn index_divisible_by_every_period_always_micro_pauses() {
        let mut c = cadence(120, 5);
        for _ in 0..500 {
            let d = c.next_delay(ALWAYS_PAUSE_INDEX, 'a').as_secs_f64();
            assert!(d >= 0.1 * BURST_JITTER.0 + MICRO_PAUSE_SECS.0 - 1e-9);
            assert!(d < 0.1 * JITTER.1 + MICRO_PAUSE_SECS.1 + 1e-9);
        }
    }

    #[test]
    fn index_one_never_micro_pauses() {
        let mut c = cadence(120, 9);
        for _ in 0..2_000 {
            assert!(c.next_delay(1, 'x').as_secs_f64() < 0.1 * JITTER.1 + 1e-9);
        }
    }

    #[test]
    fn punctuation_pauses_about_a_third_of_the_time() {
        // Base interval is far below the floor, so any delay above 0.4 s
        // comes from the punctuation pause alone.
        let mut c = cadence(u32::MAX, 21);
        let draws = 4_000;
        let paused = (0..draws)
            .filter(|_| c.next_delay(0, '.').as_secs_f64() >= PUNCT_PAUSE_SECS.0)
            .count();
        let ratio = paused as f64 / draws as f64;
        assert!((0.28..0.42).contains(&ratio), "ratio {ratio}");
    }

    #[test]
    fn letters_never_get_a_punctuation_pause() {
        let mut c = cadence(u32::MAX, 22);
        for _ in 0..2_000 {
            assert!(c.next_delay(0, 'q').as_secs_f64() < PUNCT_PAUSE_SECS.0);
        }
    }

    // --- Burst state --------------------------------------------------------

    #[test]
    fn burst_starts_inactive() {
        assert_eq!(cadence(120, 1).burst_remaining(), 0);
    }

    #[test]
    fn burst_counter_transitions() {
        let mut c = cadence(120, 42);
        let mut bursts_seen = 0;

        for _ in 0..5_000 {
            let before = c.burst_remaining();
            let d = c.next_delay(0, 'a').as_secs_f64();
            let after = c.burst_remaining();

            if before > 0 {
                bursts_seen += 1;
                assert!(d >= 0.1 * BURST_JITTER.0 - 1e-9 && d < 0.1 * BURST_JITTER.1 + 1e-9);
                if before > 1 {
                    assert_eq!(after, before - 1);
                } else {
                    // Drained to zero, then possibly re-armed in the same call.
                    assert!(after == 0 || (BURST_LEN.0..=BURST_LEN.1).contains(&after));
                }
            } else {
                assert!(d >= 0.1 * JITTER.0 - 1e-9 && d < 0.1 * JITTER.1 + 1e-9);
                assert!(after == 0 || (BURST_LEN.0..=BURST_LEN.1).contains(&after));
            }
        }

        assert!(bursts_seen > 0, "5000 characters without a single burst");
    }

    #[test]
    fn newly_armed_burst_applies_from_the_next_character() {
        let mut c = cadence(120, 1234);
        // Walk until a call arms a burst from an idle state.
        for _ in 0..10_000 {
            let before = c.burst_remaining();
            let d = c.next_delay(0, 'a').as_secs_f64();
            if before == 0 && c.burst_remaining() > 0 {
                // The arming call itself used the normal jitter.
                assert!(d >= 0.1 * JITTER.0 - 1e-9);
                let armed = c.burst_remaining();
                let next = c.next_delay(0, 'a').as_secs_f64();
                assert!(next < 0.1 * BURST_JITTER.1 + 1e-9);
                assert_eq!(c.burst_remaining(), armed - 1);
                return;
            }
        }
        panic!("no burst armed in 10000 characters");
    }
}
