//! Score model: pure re-estimation of a word's internal difficulty from a
//! single answer event plus the word's own history.
//!
//! The composition is base rate (by difficulty category) x session-streak
//! multiplier x timing factor x recency factor, plus the flat bonus and
//! penalty terms. The result is clamped to the legal score range and every
//! intermediate term is reported in the returned `ScoreBreakdown`, which
//! is part of the UI contract rather than a debug artifact.

pub mod timing;

use crate::config::ScoreConfig;
use crate::error::EngineError;
use crate::types::{DifficultyCategory, ScoreBreakdown, WordProgress};

use timing::{recency_factor, timing_signal};

/// A single answer as seen by the score model. `hours_since_studied` is
/// `None` for a word that has never been answered.
#[derive(Debug, Clone, Copy)]
pub struct AnswerEvent {
    pub is_known: bool,
    pub response_time_ms: i64,
    pub hours_since_studied: Option<f64>,
}

/// Compute the next internal score and its full explanation. Pure and
/// deterministic: no mutation, no I/O, total over all in-range inputs.
pub fn evaluate(
    progress: &WordProgress,
    answer: &AnswerEvent,
    session_streak: u32,
    config: &ScoreConfig,
) -> Result<ScoreBreakdown, EngineError> {
    let previous = progress.internal_score;
    if !(config.score_floor..=config.score_ceiling).contains(&previous) {
        return Err(EngineError::InvalidState(format!(
            "score {previous} outside [{}, {}] for word {}",
            config.score_floor, config.score_ceiling, progress.word_id
        )));
    }
    if answer.response_time_ms < 0 {
        return Err(EngineError::InvalidInput(format!(
            "negative response time {}ms",
            answer.response_time_ms
        )));
    }

    let category = DifficultyCategory::from_score(previous, config);
    let learning_rate = base_rate(category, answer.is_known, config);

    let average = progress.average_response_ms(config.timing.baseline_response_ms);
    let signal = timing_signal(answer.response_time_ms, average, &config.timing);
    let recency = recency_factor(answer.hours_since_studied, answer.is_known, &config.recency);

    let breakdown = if answer.is_known {
        let multiplier = config
            .streak
            .session_base
            .powi(session_streak as i32)
            .min(config.streak.session_cap);
        let word_streak_bonus = (config.streak.word_bonus_step
            * f64::from(progress.consecutive_correct))
        .min(config.streak.word_bonus_cap);

        let mut base = learning_rate * multiplier * signal.timing_factor * recency;
        let mastery_bonus = if previous <= config.mastery.threshold {
            base *= config.mastery.damping;
            config.mastery.bonus
        } else {
            0.0
        };
        let total_adjustment = -(base + word_streak_bonus + mastery_bonus);

        ScoreBreakdown {
            category,
            is_known: true,
            learning_rate,
            session_streak_multiplier: multiplier,
            word_streak_bonus,
            mastery_bonus,
            recent_failure_penalty: 0.0,
            time_ratio: signal.time_ratio,
            timing_factor: signal.timing_factor,
            recency_factor: recency,
            hours_since_studied: answer.hours_since_studied.unwrap_or(0.0),
            is_likely_away: signal.is_likely_away,
            total_adjustment,
            previous_score: previous,
            new_score: 0.0,
        }
    } else {
        let recent = progress.recent_failures(config.failure.window);
        let recent_failure_penalty =
            (config.failure.penalty_step * recent as f64).min(config.failure.penalty_cap);
        let total_adjustment =
            learning_rate * signal.timing_factor * recency + recent_failure_penalty;

        ScoreBreakdown {
            category,
            is_known: false,
            learning_rate,
            session_streak_multiplier: 1.0,
            word_streak_bonus: 0.0,
            mastery_bonus: 0.0,
            recent_failure_penalty,
            time_ratio: signal.time_ratio,
            timing_factor: signal.timing_factor,
            recency_factor: recency,
            hours_since_studied: answer.hours_since_studied.unwrap_or(0.0),
            is_likely_away: signal.is_likely_away,
            total_adjustment,
            previous_score: previous,
            new_score: 0.0,
        }
    };

    let new_score =
        (previous + breakdown.total_adjustment).clamp(config.score_floor, config.score_ceiling);
    Ok(ScoreBreakdown {
        new_score,
        ..breakdown
    })
}

fn base_rate(category: DifficultyCategory, is_known: bool, config: &ScoreConfig) -> f64 {
    let rates = if is_known {
        &config.correct_rates
    } else {
        &config.incorrect_rates
    };
    match category {
        DifficultyCategory::Easy => rates.easy,
        DifficultyCategory::Medium => rates.medium,
        DifficultyCategory::Hard => rates.hard,
    }
}
