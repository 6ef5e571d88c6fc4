//! Property-based tests for the score model and the stats projection.
//!
//! Invariants covered:
//! - Clamping: every valid input yields a score inside the legal range
//! - Direction: correct answers never raise a score, misses never lower one
//! - Determinism: identical inputs reproduce the identical breakdown
//! - Term bounds: every multiplier and bonus respects its configured cap
//! - Stats laws: longest streak dominates the current one, accuracy exact

use proptest::prelude::*;

use lexio_engine::score::{evaluate, AnswerEvent};
use lexio_engine::{stats, ScoreConfig, StudyResponse, WordProgress};

fn arb_score() -> impl Strategy<Value = f64> {
    (0u64..=1000u64).prop_map(|v| 0.5 + v as f64 * 5.0 / 1000.0)
}

fn arb_response_time() -> impl Strategy<Value = i64> {
    0i64..=120_000
}

fn arb_hours() -> impl Strategy<Value = Option<f64>> {
    proptest::option::of((0u32..=2000u32).prop_map(|v| v as f64 / 10.0))
}

fn arb_history() -> impl Strategy<Value = Vec<(bool, i64)>> {
    prop::collection::vec((any::<bool>(), 500i64..=20_000), 0..12)
}

fn progress_with(score: f64, streak: u32, history: Vec<(bool, i64)>) -> WordProgress {
    let mut progress = WordProgress::from_level("w1", 3);
    progress.internal_score = score;
    progress.consecutive_correct = streak;
    for (is_known, rt) in history {
        progress.history.push(StudyResponse {
            word_id: "w1".to_string(),
            is_known,
            response_time_ms: rt,
            previous_score: score,
            new_score: score,
            timestamp: 0,
        });
    }
    progress
}

fn arb_log() -> impl Strategy<Value = Vec<StudyResponse>> {
    prop::collection::vec((any::<bool>(), arb_score(), arb_score()), 0..40).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(is_known, previous, new)| StudyResponse {
                word_id: "w".to_string(),
                is_known,
                response_time_ms: 2000,
                previous_score: previous,
                new_score: new,
                timestamp: 0,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn new_score_stays_in_range(
        score in arb_score(),
        is_known in any::<bool>(),
        response_time in arb_response_time(),
        hours in arb_hours(),
        session_streak in 0u32..=40,
        word_streak in 0u32..=20,
        history in arb_history(),
    ) {
        let config = ScoreConfig::default();
        let progress = progress_with(score, word_streak, history);
        let event = AnswerEvent {
            is_known,
            response_time_ms: response_time,
            hours_since_studied: hours,
        };

        let breakdown = evaluate(&progress, &event, session_streak, &config).unwrap();
        prop_assert!(
            breakdown.new_score >= config.score_floor
                && breakdown.new_score <= config.score_ceiling,
            "score {} escaped the legal range", breakdown.new_score
        );
    }

    #[test]
    fn adjustment_direction_follows_correctness(
        score in arb_score(),
        is_known in any::<bool>(),
        response_time in arb_response_time(),
        hours in arb_hours(),
        session_streak in 0u32..=40,
        history in arb_history(),
    ) {
        let config = ScoreConfig::default();
        let progress = progress_with(score, 0, history);
        let event = AnswerEvent {
            is_known,
            response_time_ms: response_time,
            hours_since_studied: hours,
        };

        let breakdown = evaluate(&progress, &event, session_streak, &config).unwrap();
        if is_known {
            prop_assert!(breakdown.new_score <= score);
        } else {
            prop_assert!(breakdown.new_score >= score);
        }
    }

    #[test]
    fn evaluation_is_deterministic(
        score in arb_score(),
        is_known in any::<bool>(),
        response_time in arb_response_time(),
        hours in arb_hours(),
        session_streak in 0u32..=40,
        word_streak in 0u32..=20,
        history in arb_history(),
    ) {
        let config = ScoreConfig::default();
        let progress = progress_with(score, word_streak, history);
        let event = AnswerEvent {
            is_known,
            response_time_ms: response_time,
            hours_since_studied: hours,
        };

        let first = evaluate(&progress, &event, session_streak, &config).unwrap();
        let second = evaluate(&progress, &event, session_streak, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_term_respects_its_cap(
        score in arb_score(),
        is_known in any::<bool>(),
        response_time in arb_response_time(),
        hours in arb_hours(),
        session_streak in 0u32..=40,
        word_streak in 0u32..=20,
        history in arb_history(),
    ) {
        let config = ScoreConfig::default();
        let progress = progress_with(score, word_streak, history);
        let event = AnswerEvent {
            is_known,
            response_time_ms: response_time,
            hours_since_studied: hours,
        };

        let b = evaluate(&progress, &event, session_streak, &config).unwrap();
        prop_assert!(b.session_streak_multiplier >= 1.0);
        prop_assert!(b.session_streak_multiplier <= config.streak.session_cap);
        prop_assert!(b.word_streak_bonus <= config.streak.word_bonus_cap);
        prop_assert!(b.recent_failure_penalty <= config.failure.penalty_cap);
        prop_assert!(b.timing_factor <= config.timing.factor_ceiling);
        prop_assert!(b.timing_factor >= config.timing.factor_floor);
        prop_assert!(b.recency_factor >= config.recency.floor);
        prop_assert!(b.recency_factor <= config.recency.ceiling);
    }

    #[test]
    fn mastered_words_never_jump_categories_on_a_correct_answer(
        score in (0u64..=100u64).prop_map(|v| 0.5 + v as f64 / 200.0),
        response_time in arb_response_time(),
        session_streak in 0u32..=40,
    ) {
        let config = ScoreConfig::default();
        let progress = progress_with(score, 5, Vec::new());
        let event = AnswerEvent {
            is_known: true,
            response_time_ms: response_time,
            hours_since_studied: None,
        };

        let breakdown = evaluate(&progress, &event, session_streak, &config).unwrap();
        prop_assert!(breakdown.new_score <= score);
        prop_assert!(breakdown.new_score <= config.easy_max);
    }

    #[test]
    fn longest_streak_dominates_current(log in arb_log()) {
        let current = stats::current_streak(&log);
        let longest = stats::longest_streak(&log);
        prop_assert!(longest >= current);
    }

    #[test]
    fn accuracy_is_exactly_correct_over_total(log in arb_log()) {
        let computed = stats::compute(log.len(), &log);
        let correct = log.iter().filter(|r| r.is_known).count();
        if log.is_empty() {
            prop_assert_eq!(computed.accuracy, 0.0);
        } else {
            let expected = correct as f64 / log.len() as f64 * 100.0;
            prop_assert!((computed.accuracy - expected).abs() < 1e-9);
        }
    }
}
