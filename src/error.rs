//! Error types for stake validation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsensusError {
    #[error("Proof of stake checked on non-coinstake transaction: {0}")]
    NotCoinStake(String),

    #[error("Unknown block index entry: {0}")]
    UnknownBlock(usize),

    #[error("Invalid consensus parameters: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ConsensusError {
    fn from(err: serde_json::Error) -> Self {
        ConsensusError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConsensusError>;
