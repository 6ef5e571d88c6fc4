//! Time-derived scoring terms: the response-timing factor with its away
//! guard, and the recency factor from the gap since the word was last
//! studied.

use crate::config::{RecencyParams, TimingParams};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSignal {
    pub time_ratio: f64,
    pub timing_factor: f64,
    pub is_likely_away: bool,
}

/// Compare the response time against the word's own historical average and
/// map the ratio onto a clamped multiplier around 1.0. Faster than usual
/// reads as confidence (factor above 1), slower as hesitation (below 1).
/// An abnormally long pause trips the away guard, which keeps only a
/// fraction of the hesitation penalty: an idle tab is not evidence.
pub fn timing_signal(
    response_time_ms: i64,
    average_response_ms: f64,
    params: &TimingParams,
) -> TimingSignal {
    let time_ratio = response_time_ms as f64 / average_response_ms.max(1.0);
    let raw = 1.0 + (1.0 - time_ratio) * params.speed_weight;
    let mut timing_factor = raw.clamp(params.factor_floor, params.factor_ceiling);

    let is_likely_away = response_time_ms > params.away_threshold_ms;
    if is_likely_away && timing_factor < 1.0 {
        timing_factor = 1.0 - (1.0 - timing_factor) * params.away_damping;
    }

    TimingSignal {
        time_ratio,
        timing_factor,
        is_likely_away,
    }
}

/// Weight the adjustment by how overdue the answer was. A correct answer
/// after a long gap is strong retention evidence and ramps up; one given
/// seconds after the last sighting is weak evidence and stays near the
/// floor. For incorrect answers the ramp inverts: an immediate miss
/// signals real difficulty, an overdue miss is ordinary forgetting.
/// `None` (never studied) is neutral.
pub fn recency_factor(
    hours_since_studied: Option<f64>,
    is_known: bool,
    params: &RecencyParams,
) -> f64 {
    let Some(hours) = hours_since_studied else {
        return 1.0;
    };
    let hours = hours.max(0.0);
    let ramp = hours / params.reference_hours;

    if is_known {
        (params.floor + (1.0 - params.floor) * ramp).clamp(params.floor, params.ceiling)
    } else {
        (params.incorrect_ceiling - (params.incorrect_ceiling - 1.0) * ramp)
            .clamp(params.floor, params.incorrect_ceiling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> TimingParams {
        TimingParams::default()
    }

    #[test]
    fn fast_answer_earns_a_bonus() {
        let signal = timing_signal(1500, 3000.0, &params());
        assert!((signal.time_ratio - 0.5).abs() < 1e-9);
        assert!(signal.timing_factor > 1.0);
        assert!(!signal.is_likely_away);
    }

    #[test]
    fn slow_answer_is_penalized_within_bounds() {
        let signal = timing_signal(9000, 3000.0, &params());
        assert!(signal.timing_factor < 1.0);
        assert!(signal.timing_factor >= params().factor_floor);
    }

    #[test]
    fn away_guard_dampens_the_penalty_only() {
        let p = params();
        let away = timing_signal(45_000, 3000.0, &p);
        assert!(away.is_likely_away);

        // The un-dampened mapping would sit at the floor.
        let undamped_penalty = 1.0 - p.factor_floor;
        let applied_penalty = 1.0 - away.timing_factor;
        assert!(
            applied_penalty < undamped_penalty,
            "away penalty {applied_penalty} should be smaller than {undamped_penalty}"
        );
        assert!(away.timing_factor < 1.0);
    }

    #[test]
    fn away_guard_never_touches_a_bonus() {
        let mut p = params();
        p.away_threshold_ms = 1000;
        // Slow in absolute terms but fast against a huge personal average.
        let signal = timing_signal(2000, 60_000.0, &p);
        assert!(signal.is_likely_away);
        assert!(signal.timing_factor > 1.0);
    }

    #[test]
    fn recency_ramps_up_for_correct_and_down_for_incorrect() {
        let p = RecencyParams::default();
        assert_eq!(recency_factor(None, true, &p), 1.0);
        assert!(recency_factor(Some(0.0), true, &p) < 1.0);
        assert!((recency_factor(Some(24.0), true, &p) - 1.0).abs() < 1e-9);
        assert_eq!(recency_factor(Some(1000.0), true, &p), p.ceiling);

        assert!(recency_factor(Some(0.0), false, &p) > 1.0);
        assert!((recency_factor(Some(24.0), false, &p) - 1.0).abs() < 1e-9);
        assert_eq!(recency_factor(Some(1000.0), false, &p), p.floor);
    }
}
