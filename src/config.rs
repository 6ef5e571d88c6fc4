use serde::{Deserialize, Serialize};

/// Base adjustment magnitude per difficulty category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRates {
    pub easy: f64,
    pub medium: f64,
    pub hard: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasteryParams {
    /// Scores at or below this count as mastered.
    pub threshold: f64,
    /// Flat reinforcement bonus for a correct answer on a mastered word.
    pub bonus: f64,
    /// Multiplier applied to the composed base adjustment for mastered
    /// words, so they are not depressed further at full strength.
    pub damping: f64,
}

impl Default for MasteryParams {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            bonus: 0.05,
            damping: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakParams {
    /// Exponent base for the session-wide streak multiplier.
    pub session_base: f64,
    /// Ceiling for the session streak multiplier.
    pub session_cap: f64,
    /// Linear per-word streak bonus per consecutive correct answer.
    pub word_bonus_step: f64,
    pub word_bonus_cap: f64,
}

impl Default for StreakParams {
    fn default() -> Self {
        Self {
            session_base: 1.15,
            session_cap: 2.0,
            word_bonus_step: 0.03,
            word_bonus_cap: 0.15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingParams {
    /// Assumed average response time until a word has history of its own.
    pub baseline_response_ms: i64,
    /// How strongly the time ratio bends the timing factor around 1.0.
    pub speed_weight: f64,
    pub factor_floor: f64,
    pub factor_ceiling: f64,
    /// Responses slower than this are treated as an idle tab rather than
    /// hesitation; only the penalty side of the timing factor is kept.
    pub away_threshold_ms: i64,
    /// Fraction of the timing penalty that survives away detection.
    pub away_damping: f64,
}

impl Default for TimingParams {
    fn default() -> Self {
        Self {
            baseline_response_ms: 3000,
            speed_weight: 0.3,
            factor_floor: 0.7,
            factor_ceiling: 1.3,
            away_threshold_ms: 30_000,
            away_damping: 0.25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecencyParams {
    /// Hours after which the recency factor reaches 1.0.
    pub reference_hours: f64,
    pub floor: f64,
    /// Ceiling for a correct answer after a long gap.
    pub ceiling: f64,
    /// Starting factor for an incorrect answer given immediately after the
    /// word was last seen; ramps down toward `floor` as the gap grows.
    pub incorrect_ceiling: f64,
}

impl Default for RecencyParams {
    fn default() -> Self {
        Self {
            reference_hours: 24.0,
            floor: 0.75,
            ceiling: 1.5,
            incorrect_ceiling: 1.25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureParams {
    /// Sliding window of recent responses inspected for misses.
    pub window: usize,
    /// Additive penalty per recent miss.
    pub penalty_step: f64,
    pub penalty_cap: f64,
}

impl Default for FailureParams {
    fn default() -> Self {
        Self {
            window: 5,
            penalty_step: 0.10,
            penalty_cap: 0.40,
        }
    }
}

/// Full tuning surface of the score model. Every constant the algorithm
/// uses lives here; the defaults are the shipped behavior and none of them
/// is a hard invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreConfig {
    /// Legal range of the internal score.
    pub score_floor: f64,
    pub score_ceiling: f64,
    /// Category cutoffs: `Easy` at or below `easy_max`, `Hard` at or above
    /// `hard_min`, `Medium` between.
    pub easy_max: f64,
    pub hard_min: f64,
    pub correct_rates: CategoryRates,
    pub incorrect_rates: CategoryRates,
    pub mastery: MasteryParams,
    pub streak: StreakParams,
    pub timing: TimingParams,
    pub recency: RecencyParams,
    pub failure: FailureParams,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            score_floor: 0.5,
            score_ceiling: 5.5,
            easy_max: 2.0,
            hard_min: 4.0,
            // Harder words move more per correct answer (faster mastery)
            // and less per incorrect answer (resist runaway hardening).
            correct_rates: CategoryRates {
                easy: 0.30,
                medium: 0.40,
                hard: 0.50,
            },
            incorrect_rates: CategoryRates {
                easy: 0.45,
                medium: 0.35,
                hard: 0.25,
            },
            mastery: MasteryParams::default(),
            streak: StreakParams::default(),
            timing: TimingParams::default(),
            recency: RecencyParams::default(),
            failure: FailureParams::default(),
        }
    }
}

impl ScoreConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("LEXIO_AWAY_THRESHOLD_MS") {
            config.timing.away_threshold_ms =
                val.parse().unwrap_or(config.timing.away_threshold_ms);
        }
        if let Ok(val) = std::env::var("LEXIO_MASTERY_THRESHOLD") {
            config.mastery.threshold = val.parse().unwrap_or(config.mastery.threshold);
        }
        if let Ok(val) = std::env::var("LEXIO_SESSION_STREAK_CAP") {
            config.streak.session_cap = val.parse().unwrap_or(config.streak.session_cap);
        }
        if let Ok(val) = std::env::var("LEXIO_BASELINE_RESPONSE_MS") {
            config.timing.baseline_response_ms =
                val.parse().unwrap_or(config.timing.baseline_response_ms);
        }

        config
    }
}
