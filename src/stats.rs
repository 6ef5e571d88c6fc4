//! Pure projections of the session response log. Everything here is
//! recomputed on demand from the slice it is handed, so the counters can
//! never go stale relative to the log.

use crate::types::{SessionStats, StudyResponse};

/// Length of the trailing run of correct responses.
pub fn current_streak(responses: &[StudyResponse]) -> u32 {
    responses
        .iter()
        .rev()
        .take_while(|r| r.is_known)
        .count() as u32
}

/// Longest run of correct responses anywhere in the log.
pub fn longest_streak(responses: &[StudyResponse]) -> u32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    for response in responses {
        if response.is_known {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

pub fn compute(total_words: usize, responses: &[StudyResponse]) -> SessionStats {
    let correct_answers = responses.iter().filter(|r| r.is_known).count();
    let incorrect_answers = responses.len() - correct_answers;

    let accuracy = if responses.is_empty() {
        0.0
    } else {
        correct_answers as f64 / responses.len() as f64 * 100.0
    };

    let avg_score_change = if responses.is_empty() {
        0.0
    } else {
        responses
            .iter()
            .map(|r| r.new_score - r.previous_score)
            .sum::<f64>()
            / responses.len() as f64
    };

    SessionStats {
        total_words,
        correct_answers,
        incorrect_answers,
        accuracy,
        current_streak: current_streak(responses),
        longest_streak: longest_streak(responses),
        avg_score_change,
    }
}
