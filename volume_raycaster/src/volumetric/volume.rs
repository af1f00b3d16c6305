use nalgebra::Vector3;

use crate::{
    common::{BoundBox, ValueRange},
    Intensity,
};

/// Read only scalar grid.
///
/// Voxel `(x, y, z)` spans `<x; x+1>` on the x axis (same for y and z),
/// so the volume occupies box from origin to `get_size()`.
pub trait Volume: Send + Sync {
    /// Get data dimensions
    fn get_size(&self) -> Vector3<usize>;

    /// Sample at integer coordinates, `None` if outside
    fn get_data(&self, x: usize, y: usize, z: usize) -> Option<Intensity>;

    /// Range of all samples, computed once on build
    fn get_range(&self) -> ValueRange;

    fn min(&self) -> Intensity {
        self.get_range().low
    }

    fn max(&self) -> Intensity {
        self.get_range().high
    }

    /// Box in volume coordinates
    fn get_bound_box(&self) -> BoundBox {
        BoundBox::from_dims(self.get_size().map(|v| v as f32))
    }

    /// Length of the volume diagonal
    fn diagonal(&self) -> f32 {
        self.get_bound_box().diagonal()
    }
}
