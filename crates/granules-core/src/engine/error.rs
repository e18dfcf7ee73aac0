use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::system::ModelError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}
