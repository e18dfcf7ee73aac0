use crate::cli::RingsArgs;
use crate::config::PartialRingConfig;
use crate::error::Result;
use granules::workflows::{self, rings::RingAnalysis};
use std::fmt::Write;
use tracing::{info, warn};

pub fn run(args: RingsArgs) -> Result<()> {
    let partial = match &args.config {
        Some(path) => PartialRingConfig::from_file(path)?,
        None => PartialRingConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial.merge_with_cli(&args)?;

    info!("Invoking the ring workflow...");
    let analysis = workflows::rings::run(&args.files, &config)?;
    if analysis.polygons.is_empty() {
        warn!("No rings of {} atoms were found.", config.ring_size);
    }

    print!("{}", render(&analysis));
    Ok(())
}

fn render(analysis: &RingAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ring(s) of {} atoms",
        analysis.polygons.len(),
        analysis.config.ring_size
    );

    for (index, polygon) in analysis.polygons.iter().enumerate() {
        let atoms: Vec<String> = polygon.vertices().iter().map(|s| s.to_string()).collect();
        let c = polygon.centroid();
        let _ = writeln!(
            out,
            "ring {index}: atoms {} centroid ({:.3}, {:.3}, {:.3}) perimeter {:.3}",
            atoms.join("-"),
            c.x,
            c.y,
            c.z,
            polygon.perimeter()
        );
    }

    if let Some(network) = &analysis.network {
        let _ = writeln!(
            out,
            "{} adjacent pair(s) ({:?})",
            network.connection_count(),
            network.rule()
        );
        for (a, b) in network.connections() {
            let _ = writeln!(out, "adjacent: {a} {b}");
        }
    }
    out
}
