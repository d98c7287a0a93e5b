//! Review Card Selection
//!
//! Picks the cards presented in one review session.
//!
//! Core rules:
//! - A card is eligible when it is not session-excluded and its next review
//!   time has passed (or was never set)
//! - If no card is eligible, or fewer than the session size, the whole pool
//!   is shuffled instead, so a non-empty deck never yields an empty session
//! - Otherwise eligible cards are scanned in random order and admitted with
//!   probability `min(1, 2 * weight / total_weight)`; the first half of the
//!   slots are filled unconditionally
//! - Any remaining slots are topped up from the unselected eligible cards
//!
//! The [`Selector`] owns the per-session exclusion set: cards answered
//! incorrectly are kept out of later selections until the session ends.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::LearningConfig;
use crate::types::{Card, CardId, MasteryTable};

// ==================== Selection ====================

/// Select at most `max_count` distinct cards for review.
///
/// The result length is exactly `min(max_count, cards.len())`. Order is
/// random. Never fails: an empty pool or a zero limit yields an empty list.
pub fn select_for_review<R: Rng + ?Sized>(
    cards: &[Card],
    now: DateTime<Utc>,
    excluded: &HashSet<CardId>,
    max_count: usize,
    table: &MasteryTable,
    rng: &mut R,
) -> Vec<Card> {
    let max_count = max_count.min(cards.len());
    if max_count == 0 {
        return Vec::new();
    }

    let eligible: Vec<&Card> = cards
        .iter()
        .filter(|card| !excluded.contains(&card.id) && card.is_due(now))
        .collect();

    debug!(
        pool = cards.len(),
        eligible = eligible.len(),
        excluded = excluded.len(),
        max_count,
        "selecting review cards"
    );

    if eligible.is_empty() {
        debug!("no eligible cards, sampling the whole pool");
        return shuffled_prefix(cards.iter().collect(), max_count, rng);
    }

    if eligible.len() < max_count {
        debug!(
            eligible = eligible.len(),
            "too few eligible cards, sampling the whole pool"
        );
        return shuffled_prefix(cards.iter().collect(), max_count, rng);
    }

    let selected = weighted_select(eligible, max_count, table, rng);
    debug!(selected = selected.len(), "weighted selection finished");
    selected
}

/// Admission probability for one card in the weighted scan
fn admission_probability(weight: u32, total_weight: u64) -> f64 {
    if total_weight == 0 {
        return 0.0;
    }
    (2.0 * weight as f64 / total_weight as f64).min(1.0)
}

fn weighted_select<R: Rng + ?Sized>(
    mut eligible: Vec<&Card>,
    max_count: usize,
    table: &MasteryTable,
    rng: &mut R,
) -> Vec<Card> {
    let total_weight: u64 = eligible
        .iter()
        .map(|card| table.weight(card.mastery_level) as u64)
        .sum();
    let guaranteed = max_count / 2;

    eligible.shuffle(rng);

    let mut chosen: Vec<&Card> = Vec::with_capacity(max_count);
    let mut passed_over: Vec<&Card> = Vec::new();

    for card in eligible {
        if chosen.len() >= max_count {
            break;
        }

        let admit = chosen.len() < guaranteed || {
            let p = admission_probability(table.weight(card.mastery_level), total_weight);
            rng.gen::<f64>() < p
        };

        if admit {
            chosen.push(card);
        } else {
            passed_over.push(card);
        }
    }

    // Top up from cards the probabilistic gate skipped
    if chosen.len() < max_count {
        let missing = max_count - chosen.len();
        debug!(missing, "topping up selection");
        passed_over.shuffle(rng);
        chosen.extend(passed_over.into_iter().take(missing));
    }

    chosen.into_iter().cloned().collect()
}

fn shuffled_prefix<R: Rng + ?Sized>(mut pool: Vec<&Card>, count: usize, rng: &mut R) -> Vec<Card> {
    pool.shuffle(rng);
    pool.into_iter().take(count).cloned().collect()
}

// ==================== Session Lifecycle ====================

/// Whether a selector is between `start_session` and `end_session`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Idle,
    Active,
}

/// Per-session card selector.
///
/// One instance per review flow; concurrent sessions over the same deck each
/// need their own selector.
#[derive(Clone, Debug, Default)]
pub struct Selector {
    config: LearningConfig,
    excluded: HashSet<CardId>,
    state: SessionState,
}

impl Selector {
    pub fn new(config: LearningConfig) -> Self {
        Self {
            config,
            excluded: HashSet::new(),
            state: SessionState::Idle,
        }
    }

    /// Clear the exclusion set and become active. Calling it again while
    /// active just resets the set.
    pub fn start_session(&mut self) {
        if self.state == SessionState::Active {
            debug!(
                excluded = self.excluded.len(),
                "session restarted, clearing exclusions"
            );
        }
        self.excluded.clear();
        self.state = SessionState::Active;
        info!("review session started");
    }

    /// Clear the exclusion set and become idle. Safe to call when idle.
    pub fn end_session(&mut self) {
        if self.state == SessionState::Active {
            info!(excluded = self.excluded.len(), "review session ended");
        }
        self.excluded.clear();
        self.state = SessionState::Idle;
    }

    /// Keep a card out of later selections in this session.
    ///
    /// Ignored while idle, since exclusions only live inside a session.
    /// Returns whether the id was newly added.
    pub fn exclude(&mut self, id: CardId) -> bool {
        if self.state != SessionState::Active {
            debug!(card_id = %id, "exclusion ignored outside a session");
            return false;
        }
        let added = self.excluded.insert(id);
        if added {
            debug!(card_id = %id, "card excluded for this session");
        }
        added
    }

    pub fn is_excluded(&self, id: &CardId) -> bool {
        self.excluded.contains(id)
    }

    pub fn excluded(&self) -> &HashSet<CardId> {
        &self.excluded
    }

    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    /// Select cards using this session's exclusions and configured size
    pub fn select_for_review<R: Rng + ?Sized>(
        &self,
        cards: &[Card],
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<Card> {
        select_for_review(
            cards,
            now,
            &self.excluded,
            self.config.max_count(),
            &self.config.levels,
            rng,
        )
    }
}

// ==================== Unit Tests ====================
