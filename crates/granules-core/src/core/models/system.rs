use super::atom::AtomRecord;
use super::pbc::PeriodicBox;
use super::table::Table;
use super::topology::Topology;
use crate::core::forcefield::params::ForceField;
use crate::core::io::FileKind;
use crate::core::io::error::ParseError;
use crate::core::io::pdb::PdbFile;
use crate::core::io::prm::PrmFile;
use crate::core::io::psf::PsfFile;
use crate::core::io::traits::MolecularFile;
use crate::core::io::xsc::XscFile;
use crate::core::rings::{
    AdjacencyRule, BondGraph, Cycle, LookupError, Polygon, PolygonNetwork, find_cycles,
};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Largest number of files accepted by one [`MolecularModel::read_files`] call.
pub const MAX_INPUT_FILES: usize = 4;

const STAGING_DIR_PREFIX: &str = "granules_";
const STAGING_FILE_STEM: &str = "namdTempFile";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("No input files were given")]
    NoFiles,
    #[error("Too many input files: {count} given, at most 4 accepted")]
    TooManyFiles { count: usize },
    #[error("Failed to read '{path}': {source}")]
    Parse { path: String, source: ParseError },
    #[error("Failed to stage mixture files: {0}")]
    Staging(#[source] io::Error),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Which files a bulk load read and which it passed over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: Vec<(FileKind, PathBuf)>,
    /// Files whose extension matched no known format.
    pub skipped: Vec<PathBuf>,
}

/// Anything that can write itself out as the four input files.
///
/// Implementors write `<prefix>.pdb`, `<prefix>.psf`, `<prefix>.prm` and
/// `<prefix>.xsc`; a file that is not written is simply not loaded.
pub trait MixtureSource {
    fn write_files(&self, prefix: &Path) -> io::Result<()>;
}

/// Everything read from one set of input files.
///
/// Each reader produces its complete output before anything is merged here, so
/// a file that fails to parse leaves the model exactly as it was. Reading more
/// files of a kind appends to the existing tables; a new periodic cell
/// replaces the previous one.
#[derive(Debug, Clone, Default)]
pub struct MolecularModel {
    pub coordinates: Table<AtomRecord>,
    pub topology: Topology,
    pub forcefield: ForceField,
    pub periodic_box: PeriodicBox,
}

impl MolecularModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a model from 1 to 4 files.
    ///
    /// # Errors
    ///
    /// See [`MolecularModel::read_files`].
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, ModelError> {
        let mut model = Self::new();
        model.read_files(paths)?;
        Ok(model)
    }

    /// Reads 1 to 4 files, choosing each reader from the file extension.
    ///
    /// Extensions are matched without regard to case. Files with an
    /// unrecognized extension are logged and reported in
    /// [`LoadSummary::skipped`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NoFiles`] or [`ModelError::TooManyFiles`] for a
    /// path count outside `1..=4`, before any file is opened. Returns
    /// [`ModelError::Parse`] for the first file that cannot be read; files
    /// before it remain loaded.
    pub fn read_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<LoadSummary, ModelError> {
        match paths.len() {
            0 => return Err(ModelError::NoFiles),
            count if count > MAX_INPUT_FILES => return Err(ModelError::TooManyFiles { count }),
            _ => {}
        }

        let mut summary = LoadSummary::default();
        for path in paths {
            let path = path.as_ref();
            match FileKind::from_path(path) {
                Some(kind) => {
                    self.read_file(kind, path)?;
                    summary.loaded.push((kind, path.to_path_buf()));
                }
                None => {
                    warn!(
                        path = %path.display(),
                        "Skipping file without a .pdb, .psf, .prm or .xsc extension."
                    );
                    summary.skipped.push(path.to_path_buf());
                }
            }
        }
        Ok(summary)
    }

    /// Reads a single file as the given kind, whatever its extension.
    pub fn read_file(&mut self, kind: FileKind, path: &Path) -> Result<(), ModelError> {
        let wrap = |source| ModelError::Parse {
            path: path.display().to_string(),
            source,
        };
        match kind {
            FileKind::Coordinates => {
                let records = PdbFile::read_from_path(path).map_err(wrap)?;
                self.coordinates.append(records);
            }
            FileKind::Topology => {
                let topology = PsfFile::read_from_path(path).map_err(wrap)?;
                self.topology.merge(topology);
            }
            FileKind::Parameters => {
                let forcefield = PrmFile::read_from_path(path).map_err(wrap)?;
                self.forcefield.merge(forcefield);
            }
            FileKind::PeriodicBox => {
                if let Some(cell) = XscFile::read_from_path(path).map_err(wrap)? {
                    self.periodic_box.set_cell(cell.basis, cell.origin);
                }
            }
        }
        debug!(kind = %kind, path = %path.display(), "Loaded input file.");
        Ok(())
    }

    /// Loads a mixture by having it write its files into a temporary directory.
    ///
    /// The directory is removed when this returns, whether loading succeeded
    /// or not.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Staging`] if the directory cannot be created or the
    /// source fails to write, [`ModelError::NoFiles`] if it wrote nothing, and
    /// any error of [`MolecularModel::read_files`].
    pub fn load_mixture<S>(&mut self, source: &S) -> Result<LoadSummary, ModelError>
    where
        S: MixtureSource + ?Sized,
    {
        let staging = tempfile::Builder::new()
            .prefix(STAGING_DIR_PREFIX)
            .tempdir()
            .map_err(ModelError::Staging)?;
        let prefix = staging.path().join(STAGING_FILE_STEM);
        source.write_files(&prefix).map_err(ModelError::Staging)?;

        let staged: Vec<PathBuf> = [
            FileKind::Coordinates,
            FileKind::Topology,
            FileKind::Parameters,
            FileKind::PeriodicBox,
        ]
        .into_iter()
        .map(|kind| prefix.with_extension(kind.extension()))
        .filter(|path| path.is_file())
        .collect();
        debug!(files = staged.len(), dir = %staging.path().display(), "Staged mixture files.");

        self.read_files(&staged)
    }

    /// The first coordinate record with the given serial.
    pub fn atom(&self, serial: usize) -> Option<&AtomRecord> {
        self.coordinates.iter().find(|a| a.serial == serial)
    }

    pub fn bond_graph(&self) -> BondGraph {
        BondGraph::from_bonds(self.topology.bond_pairs())
    }

    /// Every distinct ring of `n` atoms in the bond graph.
    pub fn cycles_of_length(&self, n: usize) -> Vec<Cycle> {
        find_cycles(&self.bond_graph(), n)
    }

    /// Rings of `n` atoms resolved to coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Lookup`] if a ring atom has no coordinate record or
    /// incomplete coordinates.
    pub fn polygons_of_length(&self, n: usize) -> Result<Vec<Polygon>, ModelError> {
        let mut by_serial: HashMap<usize, &AtomRecord> = HashMap::new();
        for record in &self.coordinates {
            by_serial.entry(record.serial).or_insert(record);
        }
        let polygons = self
            .cycles_of_length(n)
            .iter()
            .map(|cycle| Polygon::from_cycle(cycle, |serial| by_serial.get(&serial).copied()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(polygons)
    }

    /// Adjacency network of the rings of `n` atoms.
    pub fn polygon_network(
        &self,
        n: usize,
        rule: AdjacencyRule,
    ) -> Result<PolygonNetwork, ModelError> {
        Ok(PolygonNetwork::build(self.polygons_of_length(n)?, rule))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    const CYCLOPROPANE_PDB: &str = "\
REMARK cyclopropane carbons
ATOM      1  C1  CPR U   1       0.000   0.000   0.000  1.00  0.00      U    C
ATOM      2  C2  CPR U   1       1.500   0.000   0.000  1.00  0.00      U    C
ATOM      3  C3  CPR U   1       0.750   1.299   0.000  1.00  0.00      U    C
END
";

    const CYCLOPROPANE_PSF: &str = "\
PSF

       3 !NATOM
       1 U        1        CPR      C1       CG2R31  -0.180000       12.0110           0
       2 U        1        CPR      C2       CG2R31  -0.180000       12.0110           0
       3 U        1        CPR      C3       CG2R31  -0.180000       12.0110           0

       3 !NBOND: bonds
       1       2       2       3       3       1
";

    const CYCLOPROPANE_PRM: &str = "\
BONDS
CG2R31 CG2R31 240.0 1.5010

NONBONDED
CG2R31 0.0 -0.068 2.09
END
";

    const CYCLOPROPANE_XSC: &str = "\
# NAMD extended system
0 20 0 0 0 20 0 0 0 20 0 0 0
";

    fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn cyclopropane_files(dir: &TempDir) -> Vec<PathBuf> {
        vec![
            write_fixture(dir, "cpr.pdb", CYCLOPROPANE_PDB),
            write_fixture(dir, "cpr.psf", CYCLOPROPANE_PSF),
            write_fixture(dir, "cpr.prm", CYCLOPROPANE_PRM),
            write_fixture(dir, "cpr.xsc", CYCLOPROPANE_XSC),
        ]
    }

    #[test]
    fn reads_all_four_kinds_by_extension() {
        let dir = tempdir().unwrap();
        let mut model = MolecularModel::new();
        let summary = model.read_files(&cyclopropane_files(&dir)).unwrap();

        assert_eq!(summary.loaded.len(), 4);
        assert!(summary.skipped.is_empty());
        assert_eq!(model.coordinates.len(), 3);
        assert_eq!(model.topology.bonds.len(), 3);
        assert_eq!(model.forcefield.bond("CG2R31", "CG2R31").map(|b| b.kb), Some(240.0));
        assert!(model.periodic_box.is_defined());
        assert!((model.periodic_box.volume().unwrap() - 8000.0).abs() < 1e-9);
    }

    #[test]
    fn extension_matching_ignores_case() {
        let dir = tempdir().unwrap();
        let path = write_fixture(&dir, "CPR.PDB", CYCLOPROPANE_PDB);
        let model = MolecularModel::from_files(&[path]).unwrap();
        assert_eq!(model.coordinates.len(), 3);
    }

    #[test]
    fn unknown_extensions_are_skipped_and_reported() {
        let dir = tempdir().unwrap();
        let pdb = write_fixture(&dir, "cpr.pdb", CYCLOPROPANE_PDB);
        let notes = write_fixture(&dir, "notes.txt", "not a structure");

        let mut model = MolecularModel::new();
        let summary = model.read_files(&[pdb.clone(), notes.clone()]).unwrap();
        assert_eq!(summary.loaded, vec![(FileKind::Coordinates, pdb)]);
        assert_eq!(summary.skipped, vec![notes]);
    }

    #[test]
    fn successive_reads_concatenate() {
        let dir = tempdir().unwrap();
        let pdb = write_fixture(&dir, "cpr.pdb", CYCLOPROPANE_PDB);
        let mut model = MolecularModel::new();
        model.read_files(&[&pdb]).unwrap();
        model.read_files(&[&pdb]).unwrap();

        assert_eq!(model.coordinates.len(), 6);
        assert_eq!(model.coordinates[3].serial, 1);
        assert!(model.coordinates.iter().all(|a| a.serial > 0 && a.has_finite_position()));
    }

    #[test]
    fn path_count_outside_one_to_four_is_rejected() {
        let mut model = MolecularModel::new();
        let none: [&str; 0] = [];
        assert!(matches!(model.read_files(&none), Err(ModelError::NoFiles)));

        let five = ["a.pdb", "b.psf", "c.prm", "d.xsc", "e.pdb"];
        assert!(matches!(
            model.read_files(&five),
            Err(ModelError::TooManyFiles { count: 5 })
        ));
    }

    #[test]
    fn failed_read_leaves_the_model_unchanged() {
        let dir = tempdir().unwrap();
        let good = write_fixture(&dir, "good.pdb", CYCLOPROPANE_PDB);
        let bad = write_fixture(
            &dir,
            "bad.pdb",
            "ATOM      1  C1  CPR U   1       0.000   0.000   0.000\nATOM    xyz",
        );

        let mut model = MolecularModel::new();
        model.read_files(&[&good]).unwrap();
        let err = model.read_files(&[&bad]).unwrap_err();

        assert!(matches!(err, ModelError::Parse { .. }));
        assert_eq!(model.coordinates.len(), 3);
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let mut model = MolecularModel::new();
        let err = model.read_files(&["/nonexistent/input.psf"]).unwrap_err();
        match err {
            ModelError::Parse { path, source } => {
                assert_eq!(path, "/nonexistent/input.psf");
                assert!(matches!(source, ParseError::Io(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn read_file_ignores_the_extension() {
        let dir = tempdir().unwrap();
        let path = write_fixture(&dir, "topology.txt", CYCLOPROPANE_PSF);
        let mut model = MolecularModel::new();
        model.read_file(FileKind::Topology, &path).unwrap();
        assert_eq!(model.topology.atoms.len(), 3);
    }

    struct FixtureMixture {
        staged_at: RefCell<Option<PathBuf>>,
        with_box: bool,
    }

    impl MixtureSource for FixtureMixture {
        fn write_files(&self, prefix: &Path) -> io::Result<()> {
            *self.staged_at.borrow_mut() = Some(prefix.to_path_buf());
            fs::write(prefix.with_extension("pdb"), CYCLOPROPANE_PDB)?;
            fs::write(prefix.with_extension("psf"), CYCLOPROPANE_PSF)?;
            fs::write(prefix.with_extension("prm"), CYCLOPROPANE_PRM)?;
            if self.with_box {
                fs::write(prefix.with_extension("xsc"), CYCLOPROPANE_XSC)?;
            }
            Ok(())
        }
    }

    #[test]
    fn load_mixture_reads_staged_files_and_cleans_up() {
        let mixture = FixtureMixture {
            staged_at: RefCell::new(None),
            with_box: true,
        };
        let mut model = MolecularModel::new();
        let summary = model.load_mixture(&mixture).unwrap();

        assert_eq!(summary.loaded.len(), 4);
        assert_eq!(model.coordinates.len(), 3);
        assert!(model.periodic_box.is_defined());

        let prefix = mixture.staged_at.borrow().clone().unwrap();
        assert!(prefix.ends_with(STAGING_FILE_STEM));
        let staging_dir = prefix.parent().unwrap();
        assert!(
            staging_dir
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(STAGING_DIR_PREFIX))
        );
        assert!(!staging_dir.exists());
    }

    #[test]
    fn load_mixture_skips_files_the_source_did_not_write() {
        let mixture = FixtureMixture {
            staged_at: RefCell::new(None),
            with_box: false,
        };
        let mut model = MolecularModel::new();
        let summary = model.load_mixture(&mixture).unwrap();
        assert_eq!(summary.loaded.len(), 3);
        assert!(!model.periodic_box.is_defined());
    }

    #[test]
    fn cyclopropane_has_one_triangle() {
        let dir = tempdir().unwrap();
        let model = MolecularModel::from_files(&cyclopropane_files(&dir)).unwrap();

        assert_eq!(model.cycles_of_length(3).len(), 1);
        let polygons = model.polygons_of_length(3).unwrap();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].positions()[1], model.atom(2).unwrap().position().unwrap());

        let network = model.polygon_network(3, AdjacencyRule::SharedVertex).unwrap();
        assert_eq!(network.polygon_count(), 1);
        assert_eq!(network.connection_count(), 0);
    }

    #[test]
    fn ring_atom_without_coordinates_is_a_lookup_error() {
        let dir = tempdir().unwrap();
        let psf = write_fixture(&dir, "cpr.psf", CYCLOPROPANE_PSF);
        let model = MolecularModel::from_files(&[psf]).unwrap();

        assert!(matches!(
            model.polygons_of_length(3),
            Err(ModelError::Lookup(LookupError::MissingAtom { serial: 1 }))
        ));
    }
}
