use crate::cli::RingsArgs;
use crate::error::{CliError, Result};
use granules::core::rings::AdjacencyRule;
use granules::engine::config::{RingConfig, RingConfigBuilder};
use granules::engine::error::EngineError;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Ring size used when neither the config file nor `-n` gives one.
pub const DEFAULT_RING_SIZE: usize = 6;

#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialRingConfig {
    ring_size: Option<usize>,
    adjacency: Option<AdjacencyRule>,
    build_network: Option<bool>,
}

impl PartialRingConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Flags win over file values; anything still unset falls back to the
    /// library defaults.
    pub fn merge_with_cli(self, args: &RingsArgs) -> Result<RingConfig> {
        let ring_size = args
            .ring_size
            .or(self.ring_size)
            .unwrap_or(DEFAULT_RING_SIZE);
        let adjacency = if args.shared_edge {
            Some(AdjacencyRule::SharedEdge)
        } else {
            self.adjacency
        };
        let build_network = args.network || self.build_network.unwrap_or(false);

        let mut builder = RingConfigBuilder::new()
            .ring_size(ring_size)
            .build_network(build_network);
        if let Some(rule) = adjacency {
            builder = builder.adjacency(rule);
        }
        builder
            .build()
            .map_err(|e| CliError::Granules(EngineError::from(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use granules::engine::config::ConfigError;
    use std::fs;
    use std::path::PathBuf;

    fn args() -> RingsArgs {
        RingsArgs {
            files: vec![PathBuf::from("mol.psf")],
            ring_size: None,
            config: None,
            shared_edge: false,
            network: false,
        }
    }

    #[test]
    fn parses_kebab_case_keys() {
        let partial = PartialRingConfig::from_toml(
            "ring-size = 5\nadjacency = \"shared-edge\"\nbuild-network = true\n",
        )
        .unwrap();
        assert_eq!(
            partial,
            PartialRingConfig {
                ring_size: Some(5),
                adjacency: Some(AdjacencyRule::SharedEdge),
                build_network: Some(true),
            }
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(PartialRingConfig::from_toml("ring_size = 5").is_err());
        assert!(PartialRingConfig::from_toml("adjacency = \"shared-face\"").is_err());
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = PartialRingConfig::default().merge_with_cli(&args()).unwrap();
        assert_eq!(config.ring_size, DEFAULT_RING_SIZE);
        assert_eq!(config.adjacency, AdjacencyRule::SharedVertex);
        assert!(!config.build_network);
    }

    #[test]
    fn cli_flags_override_file_values() {
        let partial = PartialRingConfig::from_toml("ring-size = 5\nadjacency = \"shared-vertex\"").unwrap();
        let mut args = args();
        args.ring_size = Some(3);
        args.shared_edge = true;
        args.network = true;

        let config = partial.merge_with_cli(&args).unwrap();
        assert_eq!(config.ring_size, 3);
        assert_eq!(config.adjacency, AdjacencyRule::SharedEdge);
        assert!(config.build_network);
    }

    #[test]
    fn invalid_ring_size_is_a_configuration_error() {
        let mut args = args();
        args.ring_size = Some(2);
        let result = PartialRingConfig::default().merge_with_cli(&args);
        assert!(matches!(
            result,
            Err(CliError::Granules(EngineError::Config {
                source: ConfigError::InvalidRingSize { size: 2, .. }
            }))
        ));
    }

    #[test]
    fn from_file_reports_path_on_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rings.toml");
        fs::write(&path, "ring-size = \"six\"").unwrap();

        match PartialRingConfig::from_file(&path) {
            Err(CliError::FileParsing { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            PartialRingConfig::from_file(&dir.path().join("missing.toml")),
            Err(CliError::Io(_))
        ));
    }
}
