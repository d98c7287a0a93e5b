//! Common Types and Constants
//!
//! Shared data structures used across the scheduling modules.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==================== Constants ====================

/// Default number of cards presented in one review session
pub const DEFAULT_MAX_QUESTIONS: usize = 10;

/// Upper bound for the interval after a failed answer (seconds)
pub const FAILED_REVIEW_CAP_SECS: i64 = 3_600;

/// Number of mastery levels
pub const LEVEL_COUNT: usize = 6;

pub const SECS_PER_MINUTE: i64 = 60;
pub const SECS_PER_HOUR: i64 = 3_600;
pub const SECS_PER_DAY: i64 = 86_400;

// ==================== Identifiers ====================

/// Opaque card identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(Uuid);

impl CardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque deck identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(Uuid);

impl DeckId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for DeckId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ==================== Mastery Levels ====================

/// How well a card is known, from `New` (0) to `Expert` (5).
///
/// Any integer converts by clamping into range, and serde goes through the
/// same conversion, so a stored level can never leave [0, 5].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub enum MasteryLevel {
    #[default]
    New = 0,
    Difficult = 1,
    Learning = 2,
    Familiar = 3,
    Mastered = 4,
    Expert = 5,
}

impl MasteryLevel {
    pub const ALL: [MasteryLevel; LEVEL_COUNT] = [
        MasteryLevel::New,
        MasteryLevel::Difficult,
        MasteryLevel::Learning,
        MasteryLevel::Familiar,
        MasteryLevel::Mastered,
        MasteryLevel::Expert,
    ];

    pub fn raw(self) -> u8 {
        self as u8
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            MasteryLevel::New => "new",
            MasteryLevel::Difficult => "difficult",
            MasteryLevel::Learning => "learning",
            MasteryLevel::Familiar => "familiar",
            MasteryLevel::Mastered => "mastered",
            MasteryLevel::Expert => "expert",
        }
    }

    /// One level up, saturating at `Expert`
    pub fn promoted(self) -> Self {
        Self::from(self.raw() as i64 + 1)
    }

    /// One level down, saturating at `New`
    pub fn demoted(self) -> Self {
        Self::from(self.raw() as i64 - 1)
    }
}

impl From<i64> for MasteryLevel {
    fn from(raw: i64) -> Self {
        Self::ALL[crate::sanitize::clamp_level(raw) as usize]
    }
}

impl From<MasteryLevel> for u8 {
    fn from(level: MasteryLevel) -> Self {
        level.raw()
    }
}

impl fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scheduling constants attached to one mastery level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProfile {
    /// Delay before the card is eligible again (seconds)
    pub review_interval_secs: i64,
    /// Relative selection weight; 0 means never preferred
    pub weight: u32,
}

impl LevelProfile {
    pub const fn new(review_interval_secs: i64, weight: u32) -> Self {
        Self {
            review_interval_secs,
            weight,
        }
    }

    pub fn review_interval(&self) -> Duration {
        Duration::seconds(crate::sanitize::sanitize_interval_secs(self.review_interval_secs))
    }
}

/// Lookup table of level profiles, indexed by `MasteryLevel::index()`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryTable {
    pub levels: [LevelProfile; LEVEL_COUNT],
}

impl MasteryTable {
    pub const DEFAULT_LEVELS: [LevelProfile; LEVEL_COUNT] = [
        LevelProfile::new(0, 5),
        LevelProfile::new(SECS_PER_HOUR, 4),
        LevelProfile::new(SECS_PER_DAY, 3),
        LevelProfile::new(3 * SECS_PER_DAY, 2),
        LevelProfile::new(7 * SECS_PER_DAY, 1),
        LevelProfile::new(30 * SECS_PER_DAY, 0),
    ];

    pub fn profile(&self, level: MasteryLevel) -> &LevelProfile {
        &self.levels[level.index()]
    }

    pub fn weight(&self, level: MasteryLevel) -> u32 {
        self.profile(level).weight
    }

    pub fn review_interval(&self, level: MasteryLevel) -> Duration {
        self.profile(level).review_interval()
    }
}

impl Default for MasteryTable {
    fn default() -> Self {
        Self {
            levels: Self::DEFAULT_LEVELS,
        }
    }
}

// ==================== Cards ====================

/// A term/definition pair with its review state
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub term: String,
    pub definition: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub mastery_level: MasteryLevel,
    #[serde(default)]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// `None` means never reviewed, always eligible
    #[serde(default)]
    pub next_review_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub review_count: u32,
    /// Seeded from the bundled glossary rather than authored by the user
    #[serde(default)]
    pub is_default: bool,
}

impl Card {
    pub fn new(term: impl Into<String>, definition: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: CardId::new(),
            term: term.into(),
            definition: definition.into(),
            created_at: now,
            mastery_level: MasteryLevel::New,
            last_reviewed_at: None,
            next_review_at: None,
            review_count: 0,
            is_default: false,
        }
    }

    /// Whether the card's next-review time has passed (or was never set)
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at.map_or(true, |next| next <= now)
    }
}
