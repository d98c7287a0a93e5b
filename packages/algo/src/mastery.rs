//! Mastery Updates
//!
//! Applies one graded answer to a card:
//! - correct -> level + 1 (max `Expert`)
//! - incorrect -> level - 1 (min `New`), interval capped so the card comes
//!   back soon
//!
//! Next review is `now + interval`, where the interval comes from the level
//! reached. Adding a failed card to the session exclusion set is left to the
//! caller (see [`crate::session::ReviewSession::grade`]).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sanitize::sanitize_interval_secs;
use crate::types::{Card, MasteryLevel, MasteryTable};

/// What a graded answer did to a card
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub previous_level: MasteryLevel,
    pub new_level: MasteryLevel,
    pub interval_secs: i64,
    pub next_review_at: DateTime<Utc>,
}

impl AnswerOutcome {
    /// Interval until the next review, clamped to what `Duration` can hold
    pub fn interval(&self) -> Duration {
        Duration::seconds(sanitize_interval_secs(self.interval_secs))
    }
}

/// Record a graded answer, mutating the card in place.
///
/// `failed_cap` bounds the interval after an incorrect answer.
pub fn record_answer(
    card: &mut Card,
    correct: bool,
    now: DateTime<Utc>,
    table: &MasteryTable,
    failed_cap: Duration,
) -> AnswerOutcome {
    let previous_level = card.mastery_level;
    let new_level = if correct {
        previous_level.promoted()
    } else {
        previous_level.demoted()
    };

    let mut interval = table.review_interval(new_level);
    if !correct {
        interval = interval.min(failed_cap.max(Duration::zero()));
    }

    let next_review_at = now
        .checked_add_signed(interval)
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    card.mastery_level = new_level;
    card.next_review_at = Some(next_review_at);
    card.last_reviewed_at = Some(now);
    card.review_count = card.review_count.saturating_add(1);

    debug!(
        card_id = %card.id,
        correct,
        from = %previous_level,
        to = %new_level,
        interval_secs = interval.num_seconds(),
        "mastery updated"
    );

    AnswerOutcome {
        correct,
        previous_level,
        new_level,
        interval_secs: interval.num_seconds(),
        next_review_at,
    }
}

/// Value-semantics variant of [`record_answer`]: returns the updated card
/// and leaves the input untouched.
pub fn answered(
    card: &Card,
    correct: bool,
    now: DateTime<Utc>,
    table: &MasteryTable,
    failed_cap: Duration,
) -> (Card, AnswerOutcome) {
    let mut next = card.clone();
    let outcome = record_answer(&mut next, correct, now, table, failed_cap);
    (next, outcome)
}
