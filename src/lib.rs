//! Adaptive study engine for a bilingual vocabulary trainer.
//!
//! The crate re-estimates how well a learner knows each word on every
//! answer ([`score::evaluate`]), walks the learner through a fixed deck
//! with navigation, skip and single-level undo ([`session::SessionController`]),
//! and projects the response log into running statistics ([`stats`]).
//! Persistence, speech, AI translation and presentation are external
//! collaborators reached only through the [`session::WordStore`] and
//! [`clock::Clock`] seams.

pub mod clock;
pub mod config;
pub mod error;
pub mod score;
pub mod session;
pub mod stats;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use config::ScoreConfig;
pub use error::EngineError;
pub use score::{evaluate, AnswerEvent};
pub use session::{SessionController, WordStore};
pub use types::{
    display_level, DifficultyCategory, ScoreBreakdown, SessionState, SessionStats,
    SessionSummary, StudyResponse, StudySession, Word, WordProgress,
};
