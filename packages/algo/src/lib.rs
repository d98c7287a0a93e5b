//! # tango-algo - iDev Tango 复习调度库
//!
//! Review scheduling for term/definition flashcards:
//!
//! - **Mastery levels** - six levels from `New` to `Expert`, each with a
//!   review interval and a selection weight
//! - **Selection** - due cards first, weighted toward low mastery, with a
//!   per-session exclusion set for cards answered incorrectly
//! - **Mastery updates** - one level up or down per answer, failed cards
//!   come back within the hour
//!
//! ## 设计理念
//!
//! - **No ambient state** - time comes from a [`Clock`], randomness from any
//!   [`rand::Rng`], so every decision is reproducible in tests
//! - **Infallible core** - degenerate input is normalized, never rejected
//! - **Storage outside** - [`CardStore`] is an interface; the engine never
//!   persists anything itself
//!
//! ## 模块结构
//!
//! - [`types`] - cards, identifiers, mastery levels and the level table
//! - [`selector`] - card selection and session lifecycle
//! - [`mastery`] - answer grading
//! - [`session`] - orchestration of one review flow
//! - [`stats`] - countdowns, understanding rate, deck summaries, activity log
//! - [`deck`] - card authoring
//! - [`store`] - storage interface and in-memory store
//! - [`config`] - tunable parameters
//! - [`clock`] / [`rng`] - injectable time and randomness
//! - [`sanitize`] - input normalization
//!
//! ## 使用示例
//!
//! ```rust
//! use chrono::Utc;
//! use tango_algo::{Deck, LearningConfig, ManualClock, ReviewSession, seeded_rng};
//!
//! let now = Utc::now();
//! let mut deck = Deck::new("Swift", now).unwrap();
//! deck.add_card("optional", "A value that may be absent", now).unwrap();
//!
//! let mut session = ReviewSession::new(LearningConfig::default(), ManualClock::new(now), seeded_rng(42));
//! let mut cards = session.begin(&deck.cards);
//! session.grade(&mut cards[0], true);
//! let summary = session.finish();
//! assert_eq!(summary.understanding_rate, 100);
//! ```

// ============================================================================
// 模块声明
// ============================================================================

pub mod clock;
pub mod config;
pub mod deck;
pub mod mastery;
pub mod rng;
pub mod sanitize;
pub mod selector;
pub mod session;
pub mod stats;
pub mod store;
pub mod types;

// ============================================================================
// 重新导出
// ============================================================================

/// 重新导出所有公共类型
pub use types::*;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, LearningConfig};
pub use deck::{Deck, DeckError, DeckResult};
pub use mastery::{answered, record_answer, AnswerOutcome};
pub use rng::{entropy_rng, seeded_rng};
pub use selector::{select_for_review, SessionState, Selector};
pub use session::{ReviewSession, SessionSummary};
pub use stats::{
    summarize_deck, summarize_decks, understanding_rate, ActivityLog, DeckSummary, ReviewCountdown,
};
pub use store::{CardStore, MemoryStore, StoreError, StoreResult};
