use nalgebra::{Point3, Vector3};

use crate::Intensity;

use super::{GradientField, Volume, VoxelGradient};

/// Weights and corner indexes of a trilinear lookup
struct Cell {
    lower: Vector3<usize>,
    upper: Vector3<usize>,
    t: Vector3<f32>,
}

impl Cell {
    /// `pos` must be non-negative and inside `size`
    fn new(pos: &Point3<f32>, size: Vector3<usize>) -> Cell {
        let lower = pos.coords.map(|v| f32::floor(v) as usize);
        let t = pos.coords - lower.map(|v| v as f32);
        let upper = lower.zip_map(&size, |l, s| if s - 1 > l { l + 1 } else { l });
        Cell { lower, upper, t }
    }

    /// Blend eight corner values.
    /// `corner(x, y, z)` gets called with index coordinates.
    fn interpolate<T, F>(&self, corner: F) -> T
    where
        F: Fn(usize, usize, usize) -> T,
        T: std::ops::Mul<f32, Output = T> + std::ops::Add<Output = T>,
    {
        let (l, u, t) = (self.lower, self.upper, self.t);
        let (it_x, it_y, it_z) = (1.0 - t.x, 1.0 - t.y, 1.0 - t.z);

        corner(l.x, l.y, l.z) * (it_x * it_y * it_z)
            + corner(u.x, l.y, l.z) * (t.x * it_y * it_z)
            + corner(l.x, u.y, l.z) * (it_x * t.y * it_z)
            + corner(u.x, u.y, l.z) * (t.x * t.y * it_z)
            + corner(l.x, l.y, u.z) * (it_x * it_y * t.z)
            + corner(u.x, l.y, u.z) * (t.x * it_y * t.z)
            + corner(l.x, u.y, u.z) * (it_x * t.y * t.z)
            + corner(u.x, u.y, u.z) * (t.x * t.y * t.z)
    }
}

/// Lookups of intensity and gradient at continuous positions.
///
/// Positions outside of the valid domain return zero intensity or zero gradient.
/// Intensity domain is `<0; dim)` on every axis.
/// Gradient domain is `<0; dim - 2>`, tighter, as interpolation needs both neighbours.
pub struct Sampler<'a, V>
where
    V: Volume + ?Sized,
{
    volume: &'a V,
    gradients: &'a GradientField,
}

impl<'a, V> Clone for Sampler<'a, V>
where
    V: Volume + ?Sized,
{
    fn clone(&self) -> Self {
        Sampler {
            volume: self.volume,
            gradients: self.gradients,
        }
    }
}

impl<'a, V> Copy for Sampler<'a, V> where V: Volume + ?Sized {}

impl<'a, V> Sampler<'a, V>
where
    V: Volume + ?Sized,
{
    pub fn new(volume: &'a V, gradients: &'a GradientField) -> Sampler<'a, V> {
        Sampler { volume, gradients }
    }

    pub fn volume(&self) -> &'a V {
        self.volume
    }

    pub fn gradients(&self) -> &'a GradientField {
        self.gradients
    }

    fn in_voxel_domain(&self, pos: &Point3<f32>) -> bool {
        let size = self.volume.get_size();
        (0..3).all(|i| pos[i] >= 0.0 && pos[i] < size[i] as f32)
    }

    fn in_gradient_domain(&self, pos: &Point3<f32>) -> bool {
        let size = self.gradients.get_size();
        (0..3).all(|i| pos[i] >= 0.0 && pos[i] <= size[i] as f32 - 2.0)
    }

    fn voxel(&self, x: usize, y: usize, z: usize) -> f32 {
        self.volume.get_data(x, y, z).unwrap_or(0) as f32
    }

    /// Nearest neighbour intensity, coordinates are floored
    pub fn voxel_nearest(&self, pos: &Point3<f32>) -> Intensity {
        if !self.in_voxel_domain(pos) {
            return 0;
        }
        let idx = pos.coords.map(|v| f32::floor(v) as usize);
        self.volume.get_data(idx.x, idx.y, idx.z).unwrap_or(0)
    }

    /// Trilinear interpolation of intensity, truncated to sample precision
    pub fn voxel_trilinear(&self, pos: &Point3<f32>) -> Intensity {
        if !self.in_voxel_domain(pos) {
            return 0;
        }
        let cell = Cell::new(pos, self.volume.get_size());
        let value: f32 = cell.interpolate(|x, y, z| self.voxel(x, y, z));
        value as Intensity
    }

    /// Nearest neighbour gradient, coordinates are rounded
    pub fn gradient_nearest(&self, pos: &Point3<f32>) -> VoxelGradient {
        if !self.in_gradient_domain(pos) {
            return VoxelGradient::zero();
        }
        let idx = pos.coords.map(|v| f32::round(v) as usize);
        self.gradients.gradient_at(idx.x, idx.y, idx.z)
    }

    /// Trilinear interpolation of gradient vector, magnitude gets recomputed
    pub fn gradient_trilinear(&self, pos: &Point3<f32>) -> VoxelGradient {
        if !self.in_gradient_domain(pos) {
            return VoxelGradient::zero();
        }
        let cell = Cell::new(pos, self.gradients.get_size());
        let vec: Vector3<f32> = cell.interpolate(|x, y, z| self.gradients.gradient_at(x, y, z).vec);
        VoxelGradient::new(vec)
    }
}
