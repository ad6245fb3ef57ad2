//! Error types for the projection engine

use thiserror::Error;
use trialstore_types::ActorIndex;

use crate::config::ConfigError;

/// Consistency violations found while projecting a sample.
///
/// These mean the stored record is corrupt. They are never recovered from
/// by skipping or clamping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("actor {actor} references payload {reference} but the table holds {table_len} entries")]
    PayloadOutOfRange {
        actor: ActorIndex,
        reference: u32,
        table_len: usize,
    },

    #[error("sample names actor {actor} but the roster holds {roster_len} actors")]
    UnknownActor { actor: ActorIndex, roster_len: usize },
}

/// Errors raised while building filters from a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Unknown sample field: {0}")]
    UnknownField(String),
}

/// Errors from the in-process trial store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Trial {0} not found")]
    UnknownTrial(String),

    #[error("Trial {0} already exists")]
    DuplicateTrial(String),

    #[error("Trial {trial_id}: tick {tick} does not follow stored tick {last_tick}")]
    OutOfOrderTick {
        trial_id: String,
        tick: u64,
        last_tick: u64,
    },
}

/// Top-level error
#[derive(Debug, Error)]
pub enum Error {
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
