//! Review Session Orchestration
//!
//! Ties selection and mastery updates together for one review flow:
//!
//! 1. [`ReviewSession::begin`] starts the session and selects cards
//! 2. the caller presents cards and reports each answer via
//!    [`ReviewSession::grade`], which updates the card and excludes it from
//!    later selections when the answer was wrong
//! 3. [`ReviewSession::finish`] ends the session and clears exclusions
//!
//! Persisting graded cards is the caller's job, e.g. through a
//! [`crate::store::CardStore`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::LearningConfig;
use crate::mastery::{record_answer, AnswerOutcome};
use crate::selector::{SessionState, Selector};
use crate::stats::{understanding_rate, ActivityLog};
use crate::types::Card;

/// Result of a finished session
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub graded: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// Distinct cards excluded after a wrong answer
    pub excluded: usize,
    /// Percentage of correct answers, 0..=100
    pub understanding_rate: u8,
    pub activity: ActivityLog,
}

/// One review flow over an injected clock and random source
pub struct ReviewSession<C, R> {
    selector: Selector,
    clock: C,
    rng: R,
    correct: usize,
    incorrect: usize,
    activity: ActivityLog,
}

impl<C: Clock, R: Rng> ReviewSession<C, R> {
    pub fn new(config: LearningConfig, clock: C, rng: R) -> Self {
        Self {
            selector: Selector::new(config),
            clock,
            rng,
            correct: 0,
            incorrect: 0,
            activity: ActivityLog::new(),
        }
    }

    /// Start (or restart) the session and select its cards
    pub fn begin(&mut self, cards: &[Card]) -> Vec<Card> {
        self.selector.start_session();
        self.correct = 0;
        self.incorrect = 0;
        self.activity = ActivityLog::new();
        self.reselect(cards)
    }

    /// Select again within the running session, honouring exclusions
    pub fn reselect(&mut self, cards: &[Card]) -> Vec<Card> {
        let now = self.clock.now();
        self.selector.select_for_review(cards, now, &mut self.rng)
    }

    /// Apply an answer to `card` and update session bookkeeping
    ///
    /// Outside an active session the card is still updated and counted, but a
    /// wrong answer is not excluded from later selections.
    pub fn grade(&mut self, card: &mut Card, correct: bool) -> AnswerOutcome {
        let now = self.clock.now();
        if !self.selector.is_active() {
            debug!(card_id = %card.id, correct, "grading outside an active session");
        }
        let config = self.selector.config();
        let outcome = record_answer(card, correct, now, &config.levels, config.failed_cap());

        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
            self.selector.exclude(card.id);
        }
        self.activity.record(now);

        outcome
    }

    /// End the session, returning its summary
    pub fn finish(&mut self) -> SessionSummary {
        let graded = self.correct + self.incorrect;
        let summary = SessionSummary {
            graded,
            correct: self.correct,
            incorrect: self.incorrect,
            excluded: self.selector.excluded_count(),
            understanding_rate: understanding_rate(self.correct, graded),
            activity: std::mem::take(&mut self.activity),
        };

        info!(
            graded = summary.graded,
            correct = summary.correct,
            understanding_rate = summary.understanding_rate,
            "review session summary"
        );

        self.selector.end_session();
        self.correct = 0;
        self.incorrect = 0;
        summary
    }

    pub fn state(&self) -> SessionState {
        self.selector.state()
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
