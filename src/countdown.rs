//! Countdown engine for the stage clock.
//!
//! The engine is a plain state machine: transitions mutate the owned
//! state and return the side effects the caller must perform (speak a
//! number, play the expiry cue). Scheduling lives in the UI layer, which
//! pairs every scheduled tick with a cancellation path.

use std::collections::HashSet;

/// Tick interval while more than [`SLOW_TICK_THRESHOLD`] seconds remain.
pub const BASE_TICK_MS: u32 = 1_000;
/// Tick interval for the final stretch. The countdown deliberately slows
/// down so the spoken numbers read more dramatically.
pub const SLOW_TICK_MS: u32 = 1_500;
/// Remaining-seconds boundary between the two tick cadences.
pub const SLOW_TICK_THRESHOLD: u32 = 10;

// The one value announced with a full phrase instead of a bare number.
const PHRASE_ANNOUNCE_AT: u32 = 15;

/// Coarse view of the engine state, for display decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Paused,
    Running,
    Editing,
    Expired,
}

/// A narration request produced by a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceCue {
    FifteenSeconds,
    Number(u32),
}

impl VoiceCue {
    /// The text handed to speech synthesis.
    pub fn phrase(&self) -> String {
        match self {
            VoiceCue::FifteenSeconds => "15 seconds remaining".to_string(),
            VoiceCue::Number(value) => value.to_string(),
        }
    }
}

/// Side effects a tick asks the caller to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEffect {
    Speak(VoiceCue),
    /// The countdown reached zero; play the expiry cue exactly once.
    TimeUp,
}

/// State machine owning the remaining time, run/edit flags, and the set
/// of values already narrated this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownEngine {
    initial: u32,
    remaining: u32,
    running: bool,
    editing: bool,
    announced: HashSet<u32>,
}

impl CountdownEngine {
    pub fn new(initial_seconds: u32) -> Self {
        Self {
            initial: initial_seconds,
            remaining: initial_seconds,
            running: false,
            editing: false,
            announced: HashSet::new(),
        }
    }

    pub fn initial(&self) -> u32 {
        self.initial
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn phase(&self) -> Phase {
        if self.editing {
            Phase::Editing
        } else if self.running {
            Phase::Running
        } else if self.remaining == 0 {
            Phase::Expired
        } else {
            Phase::Paused
        }
    }

    /// Begin counting down. A no-op at zero remaining or while editing.
    /// Clears the announced set so every value can be narrated again.
    pub fn start(&mut self) -> bool {
        if self.running || self.editing || self.remaining == 0 {
            return false;
        }
        self.announced.clear();
        self.running = true;
        true
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Play/pause toggle used by the single transport button.
    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Back to the configured duration, paused, nothing announced.
    pub fn reset(&mut self) {
        self.running = false;
        self.editing = false;
        self.remaining = self.initial;
        self.announced.clear();
    }

    /// Enter duration-edit mode. Rejected while running.
    pub fn begin_edit(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.editing = true;
        true
    }

    /// Commit a new duration from the two edit fields. Each field is
    /// coerced to 0 on invalid input; the result becomes both the new
    /// initial duration and the remaining time. The combination
    /// saturates, so an absurd minutes entry cannot overflow.
    pub fn commit_edit(&mut self, minutes: &str, seconds: &str) {
        if !self.editing {
            return;
        }
        let minutes = crate::coerce_clock_field(minutes);
        let seconds = crate::coerce_clock_field(seconds);
        self.initial = minutes.saturating_mul(60).saturating_add(seconds);
        self.remaining = self.initial;
        self.editing = false;
    }

    /// Delay before the next scheduled tick, based on the current
    /// remaining time.
    pub fn interval_ms(&self) -> u32 {
        if self.remaining <= SLOW_TICK_THRESHOLD {
            SLOW_TICK_MS
        } else {
            BASE_TICK_MS
        }
    }

    /// One scheduled decrement. Ignored unless running, so a stale timer
    /// firing after pause or reset cannot move the clock.
    pub fn tick(&mut self) -> Vec<TickEffect> {
        if !self.running {
            return Vec::new();
        }
        if self.remaining <= 1 {
            self.remaining = 0;
            self.running = false;
            return vec![TickEffect::TimeUp];
        }
        self.remaining -= 1;
        let mut effects = Vec::new();
        if let Some(cue) = cue_for(self.remaining) {
            // at most once per run, even across overlapping re-renders
            if self.announced.insert(self.remaining) {
                effects.push(TickEffect::Speak(cue));
            }
        }
        effects
    }
}

fn cue_for(remaining: u32) -> Option<VoiceCue> {
    match remaining {
        PHRASE_ANNOUNCE_AT => Some(VoiceCue::FifteenSeconds),
        1..=10 => Some(VoiceCue::Number(remaining)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_exhaustion(engine: &mut CountdownEngine) -> Vec<TickEffect> {
        let mut all = Vec::new();
        while engine.is_running() {
            all.extend(engine.tick());
        }
        all
    }

    #[test]
    fn commit_edit_then_reset_restores_duration() {
        for (minutes, seconds) in [(0u32, 0u32), (0, 59), (5, 0), (59, 59), (1, 30)] {
            let mut engine = CountdownEngine::new(300);
            engine.begin_edit();
            engine.commit_edit(&minutes.to_string(), &seconds.to_string());
            engine.reset();
            assert_eq!(engine.remaining(), minutes * 60 + seconds);
            assert_eq!(engine.initial(), minutes * 60 + seconds);
        }
    }

    #[test]
    fn commit_edit_coerces_invalid_fields() {
        let mut engine = CountdownEngine::new(300);
        engine.begin_edit();
        engine.commit_edit("ab", "30");
        assert_eq!(engine.remaining(), 30);

        engine.begin_edit();
        engine.commit_edit("2", "xyz");
        assert_eq!(engine.remaining(), 120);
    }

    #[test]
    fn commit_edit_saturates_on_oversized_fields() {
        // The edit inputs carry max="59", but that is advisory only.
        let mut engine = CountdownEngine::new(300);
        engine.begin_edit();
        engine.commit_edit("4294967295", "59");
        assert_eq!(engine.remaining(), u32::MAX);
        assert_eq!(engine.initial(), u32::MAX);
    }

    #[test]
    fn commit_edit_requires_edit_mode() {
        let mut engine = CountdownEngine::new(300);
        engine.commit_edit("1", "0");
        assert_eq!(engine.remaining(), 300);
    }

    #[test]
    fn start_at_zero_is_a_noop() {
        let mut engine = CountdownEngine::new(0);
        assert!(!engine.start());
        assert!(!engine.is_running());
        assert_eq!(engine.phase(), Phase::Expired);
        assert!(engine.tick().is_empty());
    }

    #[test]
    fn begin_edit_rejected_while_running() {
        let mut engine = CountdownEngine::new(60);
        engine.start();
        assert!(!engine.begin_edit());
        assert!(!engine.is_editing());
        assert!(engine.is_running());
    }

    #[test]
    fn editing_and_running_never_overlap() {
        let mut engine = CountdownEngine::new(60);
        assert!(engine.begin_edit());
        assert!(!engine.start());
        assert!(!engine.is_running());
        engine.commit_edit("1", "0");
        assert!(engine.start());
        assert!(!engine.begin_edit());
    }

    #[test]
    fn remaining_is_non_increasing_and_never_negative() {
        let mut engine = CountdownEngine::new(25);
        engine.start();
        let mut previous = engine.remaining();
        for _ in 0..100 {
            engine.tick();
            assert!(engine.remaining() <= previous);
            previous = engine.remaining();
        }
        assert_eq!(engine.remaining(), 0);
    }

    #[test]
    fn full_run_from_twenty_narrates_each_value_once() {
        let mut engine = CountdownEngine::new(20);
        engine.start();
        let effects = run_to_exhaustion(&mut engine);

        let mut spoken = Vec::new();
        let mut time_ups = 0;
        for effect in effects {
            match effect {
                TickEffect::Speak(VoiceCue::FifteenSeconds) => spoken.push(15),
                TickEffect::Speak(VoiceCue::Number(n)) => spoken.push(n),
                TickEffect::TimeUp => time_ups += 1,
            }
        }
        assert_eq!(spoken, vec![15, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(time_ups, 1);
        assert_eq!(engine.phase(), Phase::Expired);
    }

    #[test]
    fn restart_clears_the_announced_set() {
        let mut engine = CountdownEngine::new(12);
        engine.start();
        engine.tick(); // 11
        engine.tick(); // 10, spoken
        engine.pause();

        // A fresh run must narrate everything again.
        engine.reset();
        engine.start();
        let effects = run_to_exhaustion(&mut engine);
        let spoken = effects
            .iter()
            .filter(|e| matches!(e, TickEffect::Speak(_)))
            .count();
        assert_eq!(spoken, 10);
    }

    #[test]
    fn stray_tick_after_reset_is_ignored() {
        let mut engine = CountdownEngine::new(5);
        engine.start();
        engine.tick();
        engine.tick();
        assert_eq!(engine.remaining(), 3);

        engine.reset();
        // Simulates a timer that was pending when reset ran.
        assert!(engine.tick().is_empty());
        assert_eq!(engine.remaining(), 5);
        assert!(!engine.is_running());
    }

    #[test]
    fn cadence_slows_for_the_final_stretch() {
        let mut engine = CountdownEngine::new(11);
        assert_eq!(engine.interval_ms(), BASE_TICK_MS);
        engine.start();
        engine.tick(); // 10 left
        assert_eq!(engine.interval_ms(), SLOW_TICK_MS);
    }

    #[test]
    fn toggle_flips_between_running_and_paused() {
        let mut engine = CountdownEngine::new(30);
        engine.toggle();
        assert!(engine.is_running());
        engine.toggle();
        assert!(!engine.is_running());
        assert_eq!(engine.phase(), Phase::Paused);
    }

    #[test]
    fn expiry_fires_exactly_once() {
        let mut engine = CountdownEngine::new(2);
        engine.start();
        let first = engine.tick();
        assert_eq!(first, vec![TickEffect::Speak(VoiceCue::Number(1))]);
        let second = engine.tick();
        assert_eq!(second, vec![TickEffect::TimeUp]);
        // Any further stray tick does nothing.
        assert!(engine.tick().is_empty());
        assert_eq!(engine.remaining(), 0);
    }
}
