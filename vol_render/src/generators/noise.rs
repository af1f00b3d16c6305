use nalgebra::{vector, Vector3};
use volume_raycaster::Intensity;

use crate::config::{Config, GeneratorConfig};

use super::SampleGenerator;

/// Distance of random lattice points
const CELL: usize = 8;

/// Smooth random field
///
/// Random values are placed on a coarse lattice,
/// samples in between are trilinearly interpolated.
pub struct NoiseGenerator {
    lattice: Vec<f32>,
    lattice_dims: Vector3<usize>,
}

impl NoiseGenerator {
    pub fn new(dims: Vector3<usize>, sample: Intensity, seed: Option<u64>) -> NoiseGenerator {
        let rng = fastrand::Rng::new();
        if let Some(seed) = seed {
            rng.seed(seed);
        }

        let lattice_dims = dims.map(|d| d / CELL + 2);
        let len = lattice_dims.x * lattice_dims.y * lattice_dims.z;
        let max = sample.max(0);
        let lattice = (0..len).map(|_| rng.i16(0..=max) as f32).collect();

        NoiseGenerator {
            lattice,
            lattice_dims,
        }
    }

    pub fn from_config(config: &Config) -> NoiseGenerator {
        let sample = match config.generator {
            GeneratorConfig::Noise { sample } => sample,
            _ => 0,
        };
        NoiseGenerator::new(config.dims, sample, config.seed)
    }

    fn lattice_at(&self, x: usize, y: usize, z: usize) -> f32 {
        let d = self.lattice_dims;
        self.lattice[z + y * d.z + x * d.y * d.z]
    }
}

impl SampleGenerator for NoiseGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> Intensity {
        let cell = coords / CELL;
        let t: Vector3<f32> = coords.zip_map(&cell, |c, l| (c - l * CELL) as f32 / CELL as f32);

        let corner = |dx: usize, dy: usize, dz: usize| {
            self.lattice_at(cell.x + dx, cell.y + dy, cell.z + dz)
        };
        let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;

        let c00 = lerp(corner(0, 0, 0), corner(1, 0, 0), t.x);
        let c01 = lerp(corner(0, 0, 1), corner(1, 0, 1), t.x);
        let c10 = lerp(corner(0, 1, 0), corner(1, 1, 0), t.x);
        let c11 = lerp(corner(0, 1, 1), corner(1, 1, 1), t.x);

        let c0 = lerp(c00, c10, t.y);
        let c1 = lerp(c01, c11, t.y);

        lerp(c0, c1, t.z).round() as Intensity
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn values_in_range() {
        let gen = NoiseGenerator::new(vector![20, 20, 20], 50, Some(3));

        for x in 0..20 {
            for z in 0..20 {
                let v = gen.sample_at(vector![x, 7, z]);
                assert!((0..=50).contains(&v));
            }
        }
    }

    #[test]
    fn lattice_points_are_exact() {
        let gen = NoiseGenerator::new(vector![17, 17, 17], 100, Some(11));

        let expected = gen.lattice_at(1, 2, 0).round() as Intensity;
        assert_eq!(gen.sample_at(vector![CELL, 2 * CELL, 0]), expected);
    }

    #[test]
    fn seed_replicates_field() {
        let a = NoiseGenerator::new(vector![9, 9, 9], 100, Some(1));
        let b = NoiseGenerator::new(vector![9, 9, 9], 100, Some(1));
        assert_eq!(a.lattice, b.lattice);
    }
}
