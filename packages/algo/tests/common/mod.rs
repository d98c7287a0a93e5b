#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use tango_algo::{Card, MasteryLevel};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

pub fn session_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 15, 9, 0, 0).unwrap()
}

pub fn card(term: &str, level: MasteryLevel, next_review_in: Option<Duration>) -> Card {
    let mut card = Card::new(term, format!("definition of {term}"), session_start());
    card.mastery_level = level;
    card.next_review_at = next_review_in.map(|d| session_start() + d);
    card
}

pub fn new_cards(n: usize) -> Vec<Card> {
    (0..n)
        .map(|i| card(&format!("term-{i}"), MasteryLevel::New, None))
        .collect()
}
