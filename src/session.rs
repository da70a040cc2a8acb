//! Game session state machine.
//!
//! A `Session` owns everything that changes during one play-through: the
//! prompt on screen, the typing buffer, score, countdown and feedback. It has
//! no notion of wall-clock time; the browser shell calls [`Session::tick`]
//! once per second and hands back [`PendingAdvance`] tickets after the
//! configured delay. Both paths are guarded so a session that has ended (or a
//! prompt that has moved on) is never mutated by a late callback.

use crate::config::{ExpiredInput, GameConfig};
use crate::cue::{Cue, CueSink};
use crate::rng::Rng;
use crate::vocab::{Mode, VocabEntry};

/// Match status shown under the input field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Feedback {
    #[default]
    None,
    Correct,
    Incorrect,
}

/// Derived from the clock: `Expired` once it reads zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Expired,
}

/// Deferred "clear input and draw the next prompt" transition issued on a
/// correct match. Only valid for the prompt it was issued against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct PendingAdvance {
    epoch: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// Exact match; schedule the ticket after `advance_delay_ms`.
    Matched(PendingAdvance),
    /// As long as the answer (or longer) but wrong.
    Mismatched,
    /// Shorter than the answer; feedback kept unless it was a stale `Correct`.
    Partial,
    /// Dropped: session ended, or clock expired under `ExpiredInput::Lock`.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    /// This tick brought the clock to zero.
    Expired,
    /// Nothing left to count (or the session has ended).
    Stopped,
}

/// Observable per-session state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub current: VocabEntry,
    pub reveal_transcription: bool,
    pub input: String,
    pub score: u32,
    pub remaining_secs: u32,
    pub feedback: Feedback,
}

pub struct Session<C: CueSink> {
    config: GameConfig,
    mode: Mode,
    state: SessionState,
    rng: Rng,
    cues: C,
    // Bumped on every prompt draw; advance tickets carry the value they saw.
    epoch: u64,
    active: bool,
}

impl<C: CueSink> Session<C> {
    /// Enter a session in `mode`: fresh prompt, zero score, full clock.
    pub fn new(mode: Mode, config: GameConfig, rng: Rng, cues: C) -> Self {
        let first = mode.entries()[0];
        let mut s = Self {
            state: SessionState {
                current: first,
                reveal_transcription: false,
                input: String::new(),
                score: 0,
                remaining_secs: config.time_budget_secs,
                feedback: Feedback::None,
            },
            config,
            mode,
            rng,
            cues,
            epoch: 0,
            active: true,
        };
        s.initialize(mode);
        s
    }

    fn initialize(&mut self, mode: Mode) {
        self.mode = mode;
        self.state.score = 0;
        self.state.remaining_secs = self.config.time_budget_secs;
        self.state.input.clear();
        self.draw_next_prompt();
    }

    /// Switch difficulty. Restarts the session when the mode actually changes.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            self.initialize(mode);
        }
    }

    /// Draw uniformly (with replacement) from the active mode's set.
    /// The typing buffer is left alone; see [`Session::skip`].
    pub fn draw_next_prompt(&mut self) {
        let pool = self.mode.entries();
        self.state.current = pool[self.rng.index(pool.len())];
        self.state.reveal_transcription = false;
        self.state.feedback = Feedback::None;
        self.epoch += 1;
    }

    /// Player-requested skip.
    pub fn skip(&mut self) {
        if !self.active {
            return;
        }
        self.draw_next_prompt();
        if self.config.clear_input_on_skip {
            self.state.input.clear();
        }
    }

    pub fn reveal_hint(&mut self) {
        if self.active {
            self.state.reveal_transcription = true;
        }
    }

    pub fn on_input_changed(&mut self, text: &str) -> InputOutcome {
        if !self.active {
            return InputOutcome::Ignored;
        }
        if self.phase() == Phase::Expired && self.config.expired_input == ExpiredInput::Lock {
            return InputOutcome::Ignored;
        }
        self.state.input = text.to_lowercase();
        let target = self.state.current.transcription;
        if self.state.input == target {
            self.state.feedback = Feedback::Correct;
            self.state.score = self.state.score.saturating_add(self.config.reward);
            self.cues.notify(Cue::Correct);
            InputOutcome::Matched(PendingAdvance { epoch: self.epoch })
        } else if self.state.input.chars().count() >= target.chars().count() {
            self.state.feedback = Feedback::Incorrect;
            self.cues.notify(Cue::Incorrect);
            InputOutcome::Mismatched
        } else {
            // A "correct" left over from before a backspace no longer holds.
            if self.state.feedback == Feedback::Correct {
                self.state.feedback = Feedback::None;
            }
            InputOutcome::Partial
        }
    }

    /// Run a deferred advance. Returns whether it applied.
    pub fn complete_advance(&mut self, ticket: PendingAdvance) -> bool {
        if !self.active || ticket.epoch != self.epoch {
            return false;
        }
        self.state.input.clear();
        self.draw_next_prompt();
        true
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.active || self.state.remaining_secs == 0 {
            return TickOutcome::Stopped;
        }
        self.state.remaining_secs -= 1;
        if self.state.remaining_secs == 0 {
            TickOutcome::Expired
        } else {
            TickOutcome::Running
        }
    }

    /// Leave the session. Later ticks, input and deferred advances are no-ops.
    pub fn end(&mut self) {
        self.active = false;
    }

    pub fn phase(&self) -> Phase {
        if self.state.remaining_secs == 0 {
            Phase::Expired
        } else {
            Phase::Playing
        }
    }

    /// Whether the input field should currently accept typing.
    pub fn accepts_input(&self) -> bool {
        self.active
            && (self.phase() == Phase::Playing || self.config.expired_input == ExpiredInput::Accept)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn clock_label(&self) -> String {
        format_clock(self.state.remaining_secs)
    }
}

/// `m:ss`, seconds zero-padded.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::NullCues;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<Cue>>);

    impl CueSink for Recorder {
        fn notify(&self, cue: Cue) {
            self.0.borrow_mut().push(cue);
        }
    }

    fn session(mode: Mode) -> Session<NullCues> {
        Session::new(mode, GameConfig::default(), Rng::new(1), NullCues)
    }

    // Pin the prompt so comparisons don't depend on the draw.
    fn pin(s: &mut Session<impl CueSink>, text: &'static str, transcription: &'static str) {
        s.state.current = VocabEntry { text, transcription };
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(180), "3:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(0), "0:00");
    }

    #[test]
    fn test_new_session_defaults() {
        let s = session(Mode::Beginner);
        assert_eq!(s.state().score, 0);
        assert_eq!(s.state().remaining_secs, 180);
        assert_eq!(s.state().feedback, Feedback::None);
        assert!(!s.state().reveal_transcription);
        assert!(s.state().input.is_empty());
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.clock_label(), "3:00");
    }

    #[test]
    fn test_partial_input_keeps_feedback() {
        let mut s = session(Mode::Beginner);
        pin(&mut s, "天", "tian");
        assert_eq!(s.on_input_changed("tiax"), InputOutcome::Mismatched);
        assert_eq!(s.state().feedback, Feedback::Incorrect);
        // Backspacing to a prefix doesn't reset the flag.
        assert_eq!(s.on_input_changed("ti"), InputOutcome::Partial);
        assert_eq!(s.state().feedback, Feedback::Incorrect);
        assert_eq!(s.state().input, "ti");
    }

    #[test]
    fn test_backspace_after_match_clears_correct() {
        let mut s = session(Mode::Beginner);
        pin(&mut s, "我", "wo");
        assert!(matches!(s.on_input_changed("wo"), InputOutcome::Matched(_)));
        assert_eq!(s.on_input_changed("w"), InputOutcome::Partial);
        assert_eq!(s.state().feedback, Feedback::None);
        assert_eq!(s.state().score, 10);
    }

    #[test]
    fn test_input_is_case_folded() {
        let mut s = session(Mode::Beginner);
        pin(&mut s, "好", "hao");
        assert!(matches!(s.on_input_changed("HaO"), InputOutcome::Matched(_)));
        assert_eq!(s.state().input, "hao");
        assert_eq!(s.state().feedback, Feedback::Correct);
    }

    #[test]
    fn test_cues_follow_outcomes() {
        let rec = Rc::new(Recorder::default());
        let mut s = Session::new(Mode::Beginner, GameConfig::default(), Rng::new(3), rec.clone());
        pin(&mut s, "我", "wo");
        let _ = s.on_input_changed("w");
        let _ = s.on_input_changed("wx");
        let _ = s.on_input_changed("wo");
        assert_eq!(*rec.0.borrow(), vec![Cue::Incorrect, Cue::Correct]);
    }

    #[test]
    fn test_stale_ticket_after_skip() {
        let mut s = session(Mode::Beginner);
        pin(&mut s, "我", "wo");
        let InputOutcome::Matched(ticket) = s.on_input_changed("wo") else {
            panic!("expected a match");
        };
        s.skip();
        let after_skip = s.state().current;
        assert!(!s.complete_advance(ticket));
        assert_eq!(s.state().current, after_skip);
    }

    #[test]
    fn test_ticket_ignored_after_end() {
        let mut s = session(Mode::Beginner);
        pin(&mut s, "我", "wo");
        let InputOutcome::Matched(ticket) = s.on_input_changed("wo") else {
            panic!("expected a match");
        };
        s.end();
        assert!(!s.complete_advance(ticket));
        assert_eq!(s.state().input, "wo");
        assert_eq!(s.tick(), TickOutcome::Stopped);
        assert_eq!(s.state().remaining_secs, 180);
        assert_eq!(s.on_input_changed("x"), InputOutcome::Ignored);
    }

    #[test]
    fn test_ticket_applies_once() {
        let mut s = session(Mode::Beginner);
        pin(&mut s, "我", "wo");
        let InputOutcome::Matched(ticket) = s.on_input_changed("wo") else {
            panic!("expected a match");
        };
        assert!(s.complete_advance(ticket));
        assert!(!s.complete_advance(ticket));
    }

    #[test]
    fn test_skip_input_policy() {
        let mut s = session(Mode::Beginner);
        pin(&mut s, "天", "tian");
        let _ = s.on_input_changed("ti");
        s.skip();
        assert!(s.state().input.is_empty());

        let cfg = GameConfig { clear_input_on_skip: false, ..GameConfig::default() };
        let mut keep = Session::new(Mode::Beginner, cfg, Rng::new(5), NullCues);
        pin(&mut keep, "天", "tian");
        let _ = keep.on_input_changed("ti");
        keep.skip();
        assert_eq!(keep.state().input, "ti");
        assert_eq!(keep.state().feedback, Feedback::None);
    }

    #[test]
    fn test_expired_lock_and_accept() {
        let mut s = session(Mode::Beginner);
        s.state.remaining_secs = 1;
        assert_eq!(s.tick(), TickOutcome::Expired);
        assert_eq!(s.phase(), Phase::Expired);
        assert!(!s.accepts_input());
        pin(&mut s, "我", "wo");
        assert_eq!(s.on_input_changed("wo"), InputOutcome::Ignored);
        assert_eq!(s.state().score, 0);
        assert!(s.state().input.is_empty());

        let cfg = GameConfig { expired_input: ExpiredInput::Accept, ..GameConfig::default() };
        let mut open = Session::new(Mode::Beginner, cfg, Rng::new(9), NullCues);
        open.state.remaining_secs = 0;
        assert!(open.accepts_input());
        pin(&mut open, "我", "wo");
        assert!(matches!(open.on_input_changed("wo"), InputOutcome::Matched(_)));
        assert_eq!(open.state().score, 10);
    }

    #[test]
    fn test_set_mode_reinitializes() {
        let mut s = session(Mode::Beginner);
        pin(&mut s, "我", "wo");
        let _ = s.on_input_changed("wo");
        let _ = s.tick();
        s.set_mode(Mode::Beginner);
        assert_eq!(s.state().score, 10);
        s.set_mode(Mode::Intermediate);
        assert_eq!(s.mode(), Mode::Intermediate);
        assert_eq!(s.state().score, 0);
        assert_eq!(s.state().remaining_secs, 180);
        assert!(Mode::Intermediate.entries().contains(&s.state().current));
    }

    #[test]
    fn test_reveal_hint_is_sticky_until_next_prompt() {
        let mut s = session(Mode::Intermediate);
        s.reveal_hint();
        s.reveal_hint();
        assert!(s.state().reveal_transcription);
        let _ = s.on_input_changed("x");
        assert!(s.state().reveal_transcription);
        s.draw_next_prompt();
        assert!(!s.state().reveal_transcription);
    }
}
