use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeriodicBoxError {
    #[error("Cell basis vectors must be given all together or not at all ({supplied} of 3 supplied)")]
    PartialBasis { supplied: usize },
}

/// Periodic boundary conditions of a simulation cell.
///
/// The three basis vectors are either all present or all absent; a box with
/// only some of them cannot be constructed. Degenerate (e.g. all-zero) vectors
/// are accepted as given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodicBox {
    basis: Option<[Vector3<f64>; 3]>,
    origin: Option<Point3<f64>>,
    /// Wrap water molecules as whole units when re-imaging.
    pub wrap_water: bool,
    /// Wrap to the nearest image instead of the primary cell.
    pub wrap_nearest: bool,
}

impl PeriodicBox {
    /// Creates a periodic box from optional cell vectors and origin.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodicBoxError::PartialBasis`] if one or two basis vectors are
    /// supplied without the others.
    pub fn new(
        cell_vectors: [Option<Vector3<f64>>; 3],
        origin: Option<Point3<f64>>,
        wrap_water: bool,
        wrap_nearest: bool,
    ) -> Result<Self, PeriodicBoxError> {
        let basis = match cell_vectors {
            [Some(a), Some(b), Some(c)] => Some([a, b, c]),
            [None, None, None] => None,
            partial => {
                return Err(PeriodicBoxError::PartialBasis {
                    supplied: partial.iter().filter(|v| v.is_some()).count(),
                });
            }
        };
        Ok(Self {
            basis,
            origin,
            wrap_water,
            wrap_nearest,
        })
    }

    /// Replaces the cell vectors and origin, keeping the wrapping flags.
    pub fn set_cell(&mut self, basis: [Vector3<f64>; 3], origin: Point3<f64>) {
        self.basis = Some(basis);
        self.origin = Some(origin);
    }

    pub fn basis(&self) -> Option<&[Vector3<f64>; 3]> {
        self.basis.as_ref()
    }

    pub fn cell_basis_vector(&self, index: usize) -> Option<&Vector3<f64>> {
        self.basis.as_ref().and_then(|b| b.get(index))
    }

    pub fn origin(&self) -> Option<&Point3<f64>> {
        self.origin.as_ref()
    }

    pub fn is_defined(&self) -> bool {
        self.basis.is_some()
    }

    /// Cell volume as the scalar triple product of the basis vectors.
    pub fn volume(&self) -> Option<f64> {
        self.basis.map(|[a, b, c]| a.dot(&b.cross(&c)).abs())
    }
}
