use crate::core::rings::{AdjacencyRule, MAX_RING_SIZE};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Ring size {size} is outside the supported range 3..={max}")]
    InvalidRingSize { size: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingConfig {
    /// Number of atoms in each ring searched for.
    pub ring_size: usize,
    pub adjacency: AdjacencyRule,
    /// Whether to connect the rings into a [`PolygonNetwork`](crate::core::rings::PolygonNetwork).
    pub build_network: bool,
}

#[derive(Debug, Default)]
pub struct RingConfigBuilder {
    ring_size: Option<usize>,
    adjacency: Option<AdjacencyRule>,
    build_network: Option<bool>,
}

impl RingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ring_size(mut self, size: usize) -> Self {
        self.ring_size = Some(size);
        self
    }
    pub fn adjacency(mut self, rule: AdjacencyRule) -> Self {
        self.adjacency = Some(rule);
        self
    }
    pub fn build_network(mut self, enabled: bool) -> Self {
        self.build_network = Some(enabled);
        self
    }

    /// Validates the collected options.
    ///
    /// The adjacency rule defaults to [`AdjacencyRule::SharedVertex`] and the
    /// network is not built unless requested.
    pub fn build(self) -> Result<RingConfig, ConfigError> {
        let ring_size = self
            .ring_size
            .ok_or(ConfigError::MissingParameter("ring_size"))?;
        if !(3..=MAX_RING_SIZE).contains(&ring_size) {
            return Err(ConfigError::InvalidRingSize {
                size: ring_size,
                max: MAX_RING_SIZE,
            });
        }

        Ok(RingConfig {
            ring_size,
            adjacency: self.adjacency.unwrap_or_default(),
            build_network: self.build_network.unwrap_or(false),
        })
    }
}
