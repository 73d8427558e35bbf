use crate::model::{ExhibitId, RecordId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NeatlineError {
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    #[error("Exhibit not found: {0}")]
    ExhibitNotFound(ExhibitId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, NeatlineError>;
