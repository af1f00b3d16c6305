use nalgebra::Vector3;
use volume_raycaster::Intensity;

use crate::config::{Config, GeneratorConfig};

use super::SampleGenerator;

/// Single ball in the centre of the volume.
///
/// Density falls linearly from `sample` in the centre to 0 on the surface,
/// so gradients point outwards everywhere inside.
pub struct SphereGenerator {
    center: Vector3<f32>,
    radius: f32,
    sample: Intensity,
}

impl SphereGenerator {
    pub fn new(dims: Vector3<usize>, diameter: usize, sample: Intensity) -> SphereGenerator {
        let center = dims.map(|d| d.saturating_sub(1) as f32 / 2.0);
        let radius = diameter.max(1) as f32 / 2.0;
        SphereGenerator {
            center,
            radius,
            sample,
        }
    }

    pub fn from_config(config: &Config) -> SphereGenerator {
        let (sample, obj_size) = match config.generator {
            GeneratorConfig::Sphere { sample, obj_size } => (sample, obj_size),
            _ => (0, 1),
        };
        SphereGenerator::new(config.dims, obj_size, sample)
    }
}

impl SampleGenerator for SphereGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> Intensity {
        let dist = (coords.cast::<f32>() - self.center).magnitude();
        if dist >= self.radius {
            return 0;
        }
        let density = 1.0 - dist / self.radius;
        (self.sample as f32 * density).round() as Intensity
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;

    #[test]
    fn dense_core() {
        let gen = SphereGenerator::new(vector![11, 11, 11], 8, 200);

        assert_eq!(gen.sample_at(vector![5, 5, 5]), 200);
        // half radius from centre
        assert_eq!(gen.sample_at(vector![5, 5, 7]), 100);
        assert_eq!(gen.sample_at(vector![5, 5, 10]), 0);
        assert_eq!(gen.sample_at(vector![0, 0, 0]), 0);
    }
}
