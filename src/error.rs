//! Error types for the beta engine.
//!
//! The sequence, stance and layout functions are total and never return
//! these. Errors surface only from validation, the authority, parsing and
//! configuration loading.

use crate::types::MoveId;
use thiserror::Error;

/// Main error type for engine operations.
#[derive(Debug, Error)]
pub enum BetaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Move not found: {0}")]
    MoveNotFound(MoveId),

    #[error("Move already exists: {0}")]
    DuplicateMove(MoveId),

    #[error("Invalid order for move {id}: expected {expected}, got {got}")]
    InvalidOrder { id: MoveId, expected: u32, got: u32 },

    #[error("No beta loaded")]
    NoBetaLoaded,

    #[error("Prediction diverged from confirmed state: {0}")]
    PredictionDiverged(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid body part: {0}")]
    InvalidBodyPart(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for BetaError {
    fn from(e: serde_json::Error) -> Self {
        BetaError::Serialization(e.to_string())
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, BetaError>;
