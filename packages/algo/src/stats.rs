//! Review Statistics
//!
//! Read-only insights over cards and decks:
//! - countdown until a card is due
//! - understanding rate of a finished session
//! - per-deck level distribution and due counts
//! - per-day activity counts

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::deck::Deck;
use crate::types::{Card, DeckId, LEVEL_COUNT, SECS_PER_DAY, SECS_PER_HOUR, SECS_PER_MINUTE};

// ==================== Countdown ====================

/// Coarse time remaining until a card becomes eligible
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewCountdown {
    Now,
    Minutes(i64),
    Hours(i64),
    Days(i64),
}

impl ReviewCountdown {
    pub fn for_card(card: &Card, now: DateTime<Utc>) -> Self {
        let Some(next) = card.next_review_at else {
            return ReviewCountdown::Now;
        };

        let remaining = (next - now).num_seconds();
        if remaining <= 0 {
            ReviewCountdown::Now
        } else if remaining < SECS_PER_HOUR {
            ReviewCountdown::Minutes(remaining / SECS_PER_MINUTE)
        } else if remaining < SECS_PER_DAY {
            ReviewCountdown::Hours(remaining / SECS_PER_HOUR)
        } else {
            ReviewCountdown::Days(remaining / SECS_PER_DAY)
        }
    }
}

// ==================== Understanding Rate ====================

/// Percentage of correct answers, floored and capped at 100
pub fn understanding_rate(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rate = (correct as f64 / total as f64 * 100.0).floor();
    rate.clamp(0.0, 100.0) as u8
}

// ==================== Deck Summary ====================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSummary {
    pub deck_id: DeckId,
    pub total: usize,
    /// Cards whose next review time has passed or was never set
    pub due: usize,
    /// Card count per mastery level, indexed by level
    pub per_level: [usize; LEVEL_COUNT],
    pub total_reviews: u64,
}

pub fn summarize_deck(deck: &Deck, now: DateTime<Utc>) -> DeckSummary {
    let mut per_level = [0usize; LEVEL_COUNT];
    let mut due = 0;
    let mut total_reviews = 0u64;

    for card in &deck.cards {
        per_level[card.mastery_level.index()] += 1;
        if card.is_due(now) {
            due += 1;
        }
        total_reviews += card.review_count as u64;
    }

    DeckSummary {
        deck_id: deck.id,
        total: deck.cards.len(),
        due,
        per_level,
        total_reviews,
    }
}

/// Summarize many decks in parallel, preserving input order
pub fn summarize_decks(decks: &[Deck], now: DateTime<Utc>) -> Vec<DeckSummary> {
    decks.par_iter().map(|deck| summarize_deck(deck, now)).collect()
}

// ==================== Activity Log ====================

/// Number of graded reviews per UTC calendar day
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLog {
    counts: BTreeMap<NaiveDate, u32>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, at: DateTime<Utc>) {
        let entry = self.counts.entry(at.date_naive()).or_insert(0);
        *entry = entry.saturating_add(1);
    }

    pub fn count_on(&self, date: NaiveDate) -> u32 {
        self.counts.get(&date).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    /// `(yyyy-MM-dd, count)` pairs in date order
    pub fn days(&self) -> Vec<(String, u32)> {
        self.counts
            .iter()
            .map(|(date, count)| (date.format("%Y-%m-%d").to_string(), *count))
            .collect()
    }

    pub fn merge(&mut self, other: &ActivityLog) {
        for (date, count) in &other.counts {
            let entry = self.counts.entry(*date).or_insert(0);
            *entry = entry.saturating_add(*count);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MasteryLevel;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 15, 23, 30, 0).unwrap()
    }

    fn card_due_in(secs: Option<i64>) -> Card {
        let mut card = Card::new("defer", "Runs code when leaving the scope", now());
        card.next_review_at = secs.map(|s| now() + Duration::seconds(s));
        card
    }

    #[test]
    fn test_countdown_buckets() {
        assert_eq!(ReviewCountdown::for_card(&card_due_in(None), now()), ReviewCountdown::Now);
        assert_eq!(ReviewCountdown::for_card(&card_due_in(Some(-60)), now()), ReviewCountdown::Now);
        assert_eq!(
            ReviewCountdown::for_card(&card_due_in(Some(59)), now()),
            ReviewCountdown::Minutes(0)
        );
        assert_eq!(
            ReviewCountdown::for_card(&card_due_in(Some(3_599)), now()),
            ReviewCountdown::Minutes(59)
        );
        assert_eq!(
            ReviewCountdown::for_card(&card_due_in(Some(3_600)), now()),
            ReviewCountdown::Hours(1)
        );
        assert_eq!(
            ReviewCountdown::for_card(&card_due_in(Some(3 * 86_400 + 10)), now()),
            ReviewCountdown::Days(3)
        );
    }

    #[test]
    fn test_understanding_rate() {
        assert_eq!(understanding_rate(0, 0), 0);
        assert_eq!(understanding_rate(7, 10), 70);
        assert_eq!(understanding_rate(2, 3), 66);
        assert_eq!(understanding_rate(12, 10), 100);
    }

    #[test]
    fn test_summarize_deck() {
        let mut deck = Deck::new("Concurrency", now()).unwrap();
        deck.add_card("Task", "A unit of async work", now()).unwrap();
        deck.add_card("Sendable", "Safe to share across actors", now()).unwrap();

        let later = now() + Duration::days(2);
        {
            let card = &mut deck.cards[1];
            card.mastery_level = MasteryLevel::Familiar;
            card.next_review_at = Some(later);
            card.review_count = 4;
        }

        let summary = summarize_deck(&deck, now());
        assert_eq!(summary.total, 2);
        assert_eq!(summary.due, 1);
        assert_eq!(summary.per_level, [1, 0, 0, 1, 0, 0]);
        assert_eq!(summary.total_reviews, 4);

        assert_eq!(summarize_deck(&deck, later).due, 2);
    }

    #[test]
    fn test_summarize_decks_keeps_order() {
        let decks: Vec<Deck> = (0..8)
            .map(|i| {
                let mut deck = Deck::new(format!("deck-{i}"), now()).unwrap();
                for j in 0..i {
                    deck.add_card(format!("t{j}"), "d", now()).unwrap();
                }
                deck
            })
            .collect();

        let summaries = summarize_decks(&decks, now());
        assert_eq!(summaries.len(), 8);
        for (i, (deck, summary)) in decks.iter().zip(&summaries).enumerate() {
            assert_eq!(summary.deck_id, deck.id);
            assert_eq!(summary.total, i);
        }
    }

    #[test]
    fn test_activity_log_counts_per_day() {
        let mut log = ActivityLog::new();
        log.record(now());
        log.record(now());
        log.record(now() + Duration::hours(1)); // next UTC day

        assert_eq!(log.count_on(now().date_naive()), 2);
        assert_eq!(log.total(), 3);
        assert_eq!(
            log.days(),
            vec![("2025-10-15".to_string(), 2), ("2025-10-16".to_string(), 1)]
        );
    }

    #[test]
    fn test_activity_log_merge() {
        let mut a = ActivityLog::new();
        a.record(now());
        let mut b = ActivityLog::new();
        b.record(now());
        b.record(now() - Duration::days(1));

        a.merge(&b);
        assert_eq!(a.total(), 3);
        assert_eq!(a.count_on(now().date_naive()), 2);
    }
}
