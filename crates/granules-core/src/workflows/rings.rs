use crate::core::models::system::{LoadSummary, MolecularModel};
use crate::core::rings::{Polygon, PolygonNetwork};
use crate::engine::config::RingConfig;
use crate::engine::error::EngineError;
use std::path::Path;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct RingAnalysis {
    pub config: RingConfig,
    pub summary: LoadSummary,
    /// Rings in discovery order.
    pub polygons: Vec<Polygon>,
    /// Present when [`RingConfig::build_network`] is set; node `i` is `polygons[i]`.
    pub network: Option<PolygonNetwork>,
}

/// Loads `paths` into a fresh model and runs [`analyze`] on it.
#[instrument(skip_all, name = "ring_workflow")]
pub fn run<P: AsRef<Path>>(paths: &[P], config: &RingConfig) -> Result<RingAnalysis, EngineError> {
    info!(files = paths.len(), "Loading input files.");
    let mut model = MolecularModel::new();
    let summary = model.read_files(paths)?;
    info!(
        atoms = model.coordinates.len(),
        bonds = model.topology.bonds.len(),
        skipped = summary.skipped.len(),
        "Input files loaded."
    );
    analyze(&model, summary, config)
}

/// Finds the rings of `config.ring_size` atoms in an already loaded model.
#[instrument(skip_all, name = "ring_analysis", fields(ring_size = config.ring_size))]
pub fn analyze(
    model: &MolecularModel,
    summary: LoadSummary,
    config: &RingConfig,
) -> Result<RingAnalysis, EngineError> {
    let polygons = model.polygons_of_length(config.ring_size)?;
    info!(rings = polygons.len(), "Resolved rings to polygons.");

    let network = config.build_network.then(|| {
        let network = PolygonNetwork::build(polygons.clone(), config.adjacency);
        info!(
            connections = network.connection_count(),
            rule = ?config.adjacency,
            "Built polygon adjacency network."
        );
        network
    });

    Ok(RingAnalysis {
        config: config.clone(),
        summary,
        polygons,
        network,
    })
}
