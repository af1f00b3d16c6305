use std::sync::OnceLock;

use nalgebra::{vector, Vector3};

use super::Volume;

/// Gradient of one voxel, with precomputed magnitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelGradient {
    pub vec: Vector3<f32>,
    pub mag: f32,
}

impl VoxelGradient {
    pub fn new(vec: Vector3<f32>) -> VoxelGradient {
        VoxelGradient {
            vec,
            mag: vec.magnitude(),
        }
    }

    /// No gradient, used on volume boundary and outside of it
    pub fn zero() -> VoxelGradient {
        VoxelGradient {
            vec: vector![0.0, 0.0, 0.0],
            mag: 0.0,
        }
    }
}

impl Default for VoxelGradient {
    fn default() -> Self {
        Self::zero()
    }
}

/// Gradients of the whole volume, computed once by central differences.
pub struct GradientField {
    size: Vector3<usize>,
    data: Vec<VoxelGradient>,
    max_mag: OnceLock<f32>,
}

impl std::fmt::Debug for GradientField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradientField")
            .field("size", &self.size)
            .field("max_mag", &self.max_mag.get())
            .finish()
    }
}

impl GradientField {
    /// Compute gradients of `volume`.
    /// Voxels on the boundary get zero gradient.
    pub fn from_volume<V: Volume + ?Sized>(volume: &V) -> GradientField {
        let size = volume.get_size();
        let mut data = vec![VoxelGradient::zero(); size.x * size.y * size.z];

        let sample = |x: usize, y: usize, z: usize| volume.get_data(x, y, z).unwrap_or(0) as f32;

        for x in 1..size.x.saturating_sub(1) {
            for y in 1..size.y.saturating_sub(1) {
                for z in 1..size.z.saturating_sub(1) {
                    let dx = 0.5 * (sample(x + 1, y, z) - sample(x - 1, y, z));
                    let dy = 0.5 * (sample(x, y + 1, z) - sample(x, y - 1, z));
                    let dz = 0.5 * (sample(x, y, z + 1) - sample(x, y, z - 1));

                    let index = z + y * size.z + x * size.y * size.z;
                    data[index] = VoxelGradient::new(vector![dx, dy, dz]);
                }
            }
        }

        log::debug!("Gradients computed for volume of size {:?}", size);

        GradientField {
            size,
            data,
            max_mag: OnceLock::new(),
        }
    }

    pub fn get_size(&self) -> Vector3<usize> {
        self.size
    }

    fn get_3d_index(&self, x: usize, y: usize, z: usize) -> usize {
        z + y * self.size.z + x * self.size.y * self.size.z
    }

    /// Gradient at integer coordinates, zero gradient if outside
    pub fn gradient_at(&self, x: usize, y: usize, z: usize) -> VoxelGradient {
        if x >= self.size.x || y >= self.size.y || z >= self.size.z {
            return VoxelGradient::zero();
        }
        self.data[self.get_3d_index(x, y, z)]
    }

    /// Largest gradient magnitude in the field.
    /// Computed on first call, cached afterwards.
    pub fn max_magnitude(&self) -> f32 {
        *self.max_mag.get_or_init(|| {
            self.data
                .iter()
                .fold(0.0, |max, grad| f32::max(max, grad.mag))
        })
    }
}
