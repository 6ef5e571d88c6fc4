//! Session controller: the state machine that walks a learner through a
//! fixed deck, dispatches every answer into the score model, and keeps the
//! per-word progress map consistent with the external word store.
//!
//! Single-threaded by contract: every method is called from a discrete UI
//! action and runs to completion. The controller owns the only mutable
//! state (the session and the progress map) and performs no locking.

use std::collections::HashMap;

use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::config::ScoreConfig;
use crate::error::EngineError;
use crate::score::{self, AnswerEvent};
use crate::stats;
use crate::types::{
    display_level, ScoreBreakdown, SessionState, SessionStats, SessionSummary, StudyResponse,
    StudySession, Word, WordProgress,
};

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Write-back seam to the externally owned word store. Invoked exactly
/// once per scored answer with the new display level, and once more on
/// rollback with the restored level.
pub trait WordStore {
    fn update_difficulty(&mut self, word_id: &str, level: u8);
}

/// Everything needed to undo the single most recent `respond` call.
#[derive(Debug, Clone)]
struct RollbackPoint {
    word_id: String,
    previous_score: f64,
    previous_streak: u32,
    previous_last_studied: Option<i64>,
    previous_level: u8,
}

pub struct SessionController<S: WordStore, C: Clock = SystemClock> {
    config: ScoreConfig,
    store: S,
    clock: C,
    state: SessionState,
    session: Option<StudySession>,
    progress: HashMap<String, WordProgress>,
    rollback: Option<RollbackPoint>,
}

impl<S: WordStore> SessionController<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock, ScoreConfig::default())
    }
}

impl<S: WordStore, C: Clock> SessionController<S, C> {
    pub fn with_clock(store: S, clock: C, config: ScoreConfig) -> Self {
        Self {
            config,
            store,
            clock,
            state: SessionState::Idle,
            session: None,
            progress: HashMap::new(),
            rollback: None,
        }
    }

    /// Begin a session over a caller-ordered deck. Word progress from
    /// earlier sessions of this controller is kept; the response log and
    /// the undo token start fresh. Returns the new session id.
    pub fn start_session(&mut self, deck: Vec<Word>) -> Result<String, EngineError> {
        if deck.is_empty() {
            return Err(EngineError::EmptyDeck);
        }
        if self.state == SessionState::Active {
            return Err(EngineError::InvalidState(
                "a session is already active".to_string(),
            ));
        }

        let session = StudySession {
            id: Uuid::new_v4().to_string(),
            started_at: self.clock.now_ms(),
            deck,
            current_index: 0,
            responses: Vec::new(),
            ended_at: None,
        };
        tracing::info!(
            session_id = %session.id,
            deck_size = session.deck.len(),
            "study session started"
        );

        let id = session.id.clone();
        self.session = Some(session);
        self.state = SessionState::Active;
        self.rollback = None;
        Ok(id)
    }

    /// Score the current word, apply the result, notify the word store,
    /// and advance. Exhausting the deck completes the session. The
    /// returned breakdown explains every term of the change.
    pub fn respond(
        &mut self,
        is_known: bool,
        response_time_ms: i64,
    ) -> Result<ScoreBreakdown, EngineError> {
        if self.state != SessionState::Active {
            return Err(EngineError::NoActiveSession);
        }
        let Some(session) = self.session.as_mut() else {
            return Err(EngineError::NoActiveSession);
        };
        let word = match session.deck.get(session.current_index) {
            Some(word) => word.clone(),
            None => {
                return Err(EngineError::InvalidState(
                    "cursor past the end of the deck".to_string(),
                ))
            }
        };
        // A word revisited through go_to_previous is read-only; it can
        // only be re-entered by rolling its response back first.
        if session.responses.iter().any(|r| r.word_id == word.id) {
            return Err(EngineError::InvalidState(format!(
                "word {} already answered this session",
                word.id
            )));
        }

        let now = self.clock.now_ms();
        let progress = self
            .progress
            .entry(word.id.clone())
            .or_insert_with(|| WordProgress::from_level(&word.id, word.level));

        let hours_since_studied = progress
            .last_studied_at
            .map(|last| (now - last).max(0) as f64 / MS_PER_HOUR);
        let session_streak = stats::current_streak(&session.responses);

        let breakdown = score::evaluate(
            progress,
            &AnswerEvent {
                is_known,
                response_time_ms,
                hours_since_studied,
            },
            session_streak,
            &self.config,
        )?;

        self.rollback = Some(RollbackPoint {
            word_id: word.id.clone(),
            previous_score: progress.internal_score,
            previous_streak: progress.consecutive_correct,
            previous_last_studied: progress.last_studied_at,
            previous_level: display_level(progress.internal_score),
        });

        progress.internal_score = breakdown.new_score;
        progress.consecutive_correct = if is_known {
            progress.consecutive_correct + 1
        } else {
            0
        };
        progress.last_studied_at = Some(now);

        let response = StudyResponse {
            word_id: word.id.clone(),
            is_known,
            response_time_ms,
            previous_score: breakdown.previous_score,
            new_score: breakdown.new_score,
            timestamp: now,
        };
        progress.history.push(response.clone());
        session.responses.push(response);
        session.current_index += 1;

        self.store
            .update_difficulty(&word.id, display_level(breakdown.new_score));

        tracing::debug!(
            word_id = %word.id,
            is_known,
            previous_score = breakdown.previous_score,
            new_score = breakdown.new_score,
            "answer scored"
        );

        if session.current_index == session.deck.len() {
            self.state = SessionState::Complete;
            tracing::info!(session_id = %session.id, "deck exhausted, session complete");
        }

        Ok(breakdown)
    }

    /// Move past the current word without scoring it. Leaves progress,
    /// histories and stats untouched; requires a next word to exist.
    pub fn skip(&mut self) -> Result<(), EngineError> {
        if self.state != SessionState::Active {
            return Err(EngineError::NoActiveSession);
        }
        let Some(session) = self.session.as_mut() else {
            return Err(EngineError::NoActiveSession);
        };
        if session.current_index + 1 >= session.deck.len() {
            return Err(EngineError::InvalidState(
                "no next word to skip to".to_string(),
            ));
        }
        session.current_index += 1;
        self.rollback = None;
        Ok(())
    }

    /// Step the cursor back one word. Navigation only: no score is undone.
    pub fn go_to_previous(&mut self) -> Result<(), EngineError> {
        if self.state != SessionState::Active {
            return Err(EngineError::NoActiveSession);
        }
        let Some(session) = self.session.as_mut() else {
            return Err(EngineError::NoActiveSession);
        };
        if session.current_index == 0 {
            return Err(EngineError::InvalidState(
                "already at the first word".to_string(),
            ));
        }
        session.current_index -= 1;
        self.rollback = None;
        Ok(())
    }

    /// Undo the single most recent `respond`. Valid only immediately
    /// after it, before any other mutating call: restores the word's
    /// score, streak and study timestamp, pops both histories, steps the
    /// cursor back, and re-notifies the word store. If the undone answer
    /// was the one that finished the deck, the session becomes active
    /// again.
    pub fn rollback_response(&mut self) -> Result<(), EngineError> {
        let Some(point) = self.rollback.take() else {
            return Err(EngineError::NothingToRollback);
        };
        let Some(session) = self.session.as_mut() else {
            return Err(EngineError::NoActiveSession);
        };

        session.responses.pop();
        session.current_index = session.current_index.saturating_sub(1);
        if let Some(progress) = self.progress.get_mut(&point.word_id) {
            progress.history.pop();
            progress.internal_score = point.previous_score;
            progress.consecutive_correct = point.previous_streak;
            progress.last_studied_at = point.previous_last_studied;
        }
        if self.state == SessionState::Complete && session.ended_at.is_none() {
            self.state = SessionState::Active;
        }

        self.store
            .update_difficulty(&point.word_id, point.previous_level);

        tracing::debug!(
            word_id = %point.word_id,
            restored_score = point.previous_score,
            "response rolled back"
        );
        Ok(())
    }

    /// Force the session terminal and return its summary. Idempotent in
    /// `Complete` (the end timestamp is stamped once).
    pub fn end_session(&mut self) -> Result<SessionSummary, EngineError> {
        if self.state == SessionState::Idle {
            return Err(EngineError::NoActiveSession);
        }
        let Some(session) = self.session.as_mut() else {
            return Err(EngineError::NoActiveSession);
        };

        if session.ended_at.is_none() {
            session.ended_at = Some(self.clock.now_ms());
        }
        self.state = SessionState::Complete;
        self.rollback = None;

        let ended_at = session.ended_at.unwrap_or(session.started_at);
        let summary_stats = stats::compute(session.deck.len(), &session.responses);
        tracing::info!(
            session_id = %session.id,
            answered = session.responses.len(),
            accuracy = summary_stats.accuracy,
            "study session ended"
        );

        Ok(SessionSummary {
            session_id: session.id.clone(),
            started_at: session.started_at,
            ended_at,
            duration_ms: ended_at - session.started_at,
            stats: summary_stats,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The word under the cursor, or `None` outside an active session.
    pub fn current_word(&self) -> Option<&Word> {
        if self.state != SessionState::Active {
            return None;
        }
        self.session
            .as_ref()
            .and_then(|s| s.deck.get(s.current_index))
    }

    /// Running counters over the session log, recomputed on every call.
    pub fn stats(&self) -> SessionStats {
        match self.session.as_ref() {
            Some(session) => stats::compute(session.deck.len(), &session.responses),
            None => SessionStats::default(),
        }
    }

    /// Fraction of the deck passed, `0.0` to `1.0`.
    pub fn progress_ratio(&self) -> f64 {
        match self.session.as_ref() {
            Some(session) => session.current_index as f64 / session.deck.len() as f64,
            None => 0.0,
        }
    }

    pub fn session(&self) -> Option<&StudySession> {
        self.session.as_ref()
    }

    pub fn word_progress(&self, word_id: &str) -> Option<&WordProgress> {
        self.progress.get(word_id)
    }

    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }
}
