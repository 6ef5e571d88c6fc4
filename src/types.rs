use serde::{Deserialize, Serialize};

use crate::config::ScoreConfig;

/// A vocabulary item as supplied by the word store. The engine never
/// creates or deletes words; it only writes the display level back through
/// the store callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: String,
    pub native: String,
    pub foreign: String,
    /// Discrete display difficulty, 1..=5.
    pub level: u8,
    pub is_evaluated: bool,
}

/// Difficulty band of the current internal score. Cutoffs come from
/// `ScoreConfig`; the three bands are exhaustive over the legal range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyCategory {
    Easy,
    Medium,
    Hard,
}

impl DifficultyCategory {
    pub fn from_score(score: f64, config: &ScoreConfig) -> Self {
        if score <= config.easy_max {
            Self::Easy
        } else if score >= config.hard_min {
            Self::Hard
        } else {
            Self::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// One non-skipped answer. Appended to both the word history and the
/// session log; removed from both only by rollback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyResponse {
    pub word_id: String,
    pub is_known: bool,
    pub response_time_ms: i64,
    pub previous_score: f64,
    pub new_score: f64,
    pub timestamp: i64,
}

/// Engine-owned per-word record. `internal_score` stays inside
/// `[score_floor, score_ceiling]`; the display level shown to the learner
/// is the rounded, clamped projection of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordProgress {
    pub word_id: String,
    pub internal_score: f64,
    pub consecutive_correct: u32,
    pub history: Vec<StudyResponse>,
    pub last_studied_at: Option<i64>,
}

impl WordProgress {
    /// Seed progress from the imported display level so the first
    /// projection round-trips to the level the learner already sees.
    pub fn from_level(word_id: &str, level: u8) -> Self {
        Self {
            word_id: word_id.to_string(),
            internal_score: f64::from(level.clamp(1, 5)),
            consecutive_correct: 0,
            history: Vec::new(),
            last_studied_at: None,
        }
    }

    /// Mean response time over the word's own history, in milliseconds.
    pub fn average_response_ms(&self, baseline_ms: i64) -> f64 {
        if self.history.is_empty() {
            return baseline_ms as f64;
        }
        let sum: i64 = self.history.iter().map(|r| r.response_time_ms).sum();
        sum as f64 / self.history.len() as f64
    }

    /// Misses within the trailing `window` entries of the history.
    pub fn recent_failures(&self, window: usize) -> usize {
        self.history
            .iter()
            .rev()
            .take(window)
            .filter(|r| !r.is_known)
            .count()
    }
}

/// Rounded, clamped projection of an internal score onto the 1..=5 display
/// scale persisted by the word store.
pub fn display_level(score: f64) -> u8 {
    (score.round() as i64).clamp(1, 5) as u8
}

/// One study pass over a fixed deck. The deck order is caller-supplied and
/// never reordered; `current_index` may equal `deck.len()` only when the
/// deck is exhausted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    pub started_at: i64,
    pub deck: Vec<Word>,
    pub current_index: usize,
    pub responses: Vec<StudyResponse>,
    pub ended_at: Option<i64>,
}

/// Controller lifecycle. `Complete` is reached either by exhausting the
/// deck or by an explicit `end_session`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Active,
    Complete,
}

/// Running counters derived from the session log. Recomputed on every
/// query; never cached.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub total_words: usize,
    pub correct_answers: usize,
    pub incorrect_answers: usize,
    /// Percentage in 0..=100; 0.0 before the first answer.
    pub accuracy: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub avg_score_change: f64,
}

/// Terminal snapshot handed to the result view by `end_session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub started_at: i64,
    pub ended_at: i64,
    pub duration_ms: i64,
    pub stats: SessionStats,
}

/// Full explanation of one score change. Every term is present with an
/// explicit zero when it did not apply, so consumers never branch on
/// field presence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub category: DifficultyCategory,
    pub is_known: bool,
    /// Base magnitude selected by category and correctness.
    pub learning_rate: f64,
    pub session_streak_multiplier: f64,
    pub word_streak_bonus: f64,
    pub mastery_bonus: f64,
    pub recent_failure_penalty: f64,
    pub time_ratio: f64,
    pub timing_factor: f64,
    pub recency_factor: f64,
    pub hours_since_studied: f64,
    pub is_likely_away: bool,
    /// Signed composed adjustment before clamping.
    pub total_adjustment: f64,
    pub previous_score: f64,
    /// Clamped result actually applied to the word.
    pub new_score: f64,
}
