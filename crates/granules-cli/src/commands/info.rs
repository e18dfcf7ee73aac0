use crate::cli::InfoArgs;
use crate::error::Result;
use granules::core::models::system::{LoadSummary, MolecularModel};
use granules::engine::error::EngineError;
use std::fmt::Write;
use tracing::info;

pub fn run(args: InfoArgs) -> Result<()> {
    info!("Loading {} input file(s)...", args.files.len());
    let mut model = MolecularModel::new();
    let summary = model.read_files(&args.files).map_err(EngineError::from)?;
    print!("{}", render(&model, &summary));
    Ok(())
}

fn render(model: &MolecularModel, summary: &LoadSummary) -> String {
    let mut out = String::new();
    for (kind, path) in &summary.loaded {
        let _ = writeln!(out, "Loaded {kind}: {}", path.display());
    }
    for path in &summary.skipped {
        let _ = writeln!(out, "Skipped (unrecognized extension): {}", path.display());
    }

    let topology = &model.topology;
    let forcefield = &model.forcefield;
    let rows = [
        ("Coordinate records", model.coordinates.len()),
        ("Topology atoms", topology.atoms.len()),
        ("Bonds", topology.bonds.len()),
        ("Angles", topology.angles.len()),
        ("Dihedrals", topology.dihedrals.len()),
        ("Impropers", topology.impropers.len()),
        ("Cross-terms", topology.cross_terms.len()),
        ("Bond parameters", forcefield.bonds.len()),
        ("Angle parameters", forcefield.angles.len()),
        ("Dihedral parameters", forcefield.dihedrals.len()),
        ("Improper parameters", forcefield.impropers.len()),
        ("Nonbonded parameters", forcefield.nonbonded.len()),
    ];
    for (label, count) in rows {
        let _ = writeln!(out, "{label:<22}{count:>8}");
    }

    match model.periodic_box.volume() {
        Some(volume) => {
            let _ = writeln!(out, "{:<22}{volume:>8.1}", "Periodic cell volume");
        }
        None => {
            let _ = writeln!(out, "{:<22}{:>8}", "Periodic cell", "none");
        }
    }

    let dangling = topology.dangling_references();
    if !dangling.is_empty() {
        let _ = writeln!(
            out,
            "Warning: {} atom serial(s) referenced but not defined in the topology",
            dangling.len()
        );
    }
    out
}
