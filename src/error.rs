use std::sync::Arc;
use thiserror::Error;

use crate::corpus::Resource;
use crate::quiz::mode::Mode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A data source could not be fetched or parsed. Callers that waited on
    /// the same load share its `cause`.
    #[error("Could not load {resource}: {cause:#}")]
    DataLoad {
        resource: Resource,
        cause: Arc<anyhow::Error>,
    },

    /// A juz, surah or verse lookup has no data.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid scope: {0}")]
    InvalidScope(String),

    /// Every sampled verse was rejected by the mode.
    #[error("Could not generate a {mode} question after {attempts} attempts")]
    Exhausted { mode: Mode, attempts: usize },
}
