use std::ops::RangeInclusive;

use nalgebra::{vector, Vector3};
use volume_raycaster::Intensity;

use crate::config::{Config, GeneratorConfig};

use super::SampleGenerator;

const SAMPLE_VARIANCE: Intensity = 10;

/// Randomly placed cuboids and balls, first matching shape wins
pub struct ShapesGenerator {
    shapes: Vec<ShapeInfo>,
}

impl ShapesGenerator {
    pub fn from_config(config: &Config) -> ShapesGenerator {
        let dims = config.dims;
        let (n_of_shapes, sample, obj_size) = match config.generator {
            GeneratorConfig::Shapes {
                n_of_shapes,
                sample,
                obj_size,
            } => (n_of_shapes, sample, obj_size),
            _ => (0, 0, 1),
        };

        // no shape larger than volume
        let size = dims.map(|d| obj_size.clamp(1, d));
        let size_variance = size / 4;

        let random_shape_gen =
            ShapeInfoGenerator::new(dims, size, size_variance, sample, SAMPLE_VARIANCE, config.seed);
        let shapes = random_shape_gen.get_shapes(n_of_shapes);
        log::debug!("Generated {} shapes", shapes.len());
        ShapesGenerator { shapes }
    }
}

impl SampleGenerator for ShapesGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> Intensity {
        self.shapes
            .iter()
            .find(|shape| shape.contains(&coords))
            .map(|shape| shape.render_at(coords - shape.position_low))
            .unwrap_or(0)
    }
}

// variants of ShapeType
const N_OF_SHAPE_KINDS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Cuboid,
    Sphere,
}

/// Shape placed in volume
///
/// Occupies voxels from `position_low` to `position_high`, both inclusive.
#[derive(Debug, Clone)]
pub struct ShapeInfo {
    pub position_low: Vector3<usize>,
    pub position_high: Vector3<usize>,
    pub shape_type: ShapeType,
    pub sample: Intensity,
}

impl ShapeInfo {
    #[must_use]
    pub fn new(
        position_low: Vector3<usize>,
        position_high: Vector3<usize>,
        shape_type: ShapeType,
        sample: Intensity,
    ) -> Self {
        Self {
            position_low,
            position_high,
            shape_type,
            sample,
        }
    }

    fn contains(&self, coords: &Vector3<usize>) -> bool {
        (0..3).all(|i| coords[i] >= self.position_low[i] && coords[i] <= self.position_high[i])
    }

    fn render_at(&self, offset: Vector3<usize>) -> Intensity {
        match self.shape_type {
            ShapeType::Cuboid => self.sample,
            ShapeType::Sphere => self.render_sphere(offset),
        }
    }

    fn render_sphere(&self, offset: Vector3<usize>) -> Intensity {
        let extent = (self.position_high - self.position_low).cast::<f32>();
        let center = extent / 2.0;

        let r = extent.min() / 2.0;
        if (offset.cast::<f32>() - center).magnitude() <= r {
            self.sample
        } else {
            0
        }
    }
}

/// Random shape source, seeded for reproducible volumes
pub struct ShapeInfoGenerator {
    rng: fastrand::Rng,
    vol_dims: Vector3<usize>,
    size: Vector3<usize>,
    size_variance: Vector3<usize>,
    sample: Intensity,
    sample_variance: Intensity,
}

impl ShapeInfoGenerator {
    #[must_use]
    pub fn new(
        vol_dims: Vector3<usize>,
        size: Vector3<usize>,
        size_variance: Vector3<usize>,
        sample: Intensity,
        sample_variance: Intensity,
        seed: Option<u64>,
    ) -> Self {
        let rng = fastrand::Rng::new();
        if let Some(seed) = seed {
            rng.seed(seed);
        }

        Self {
            rng,
            vol_dims,
            size,
            size_variance,
            sample,
            sample_variance,
        }
    }

    fn random_shape(&self) -> ShapeType {
        match self.rng.u8(0..N_OF_SHAPE_KINDS) {
            0 => ShapeType::Cuboid,
            _ => ShapeType::Sphere,
        }
    }

    fn random_vector(&self, ranges: Vector3<RangeInclusive<usize>>) -> Vector3<usize> {
        let rand_x = self.rng.usize(ranges[0].clone());
        let rand_y = self.rng.usize(ranges[1].clone());
        let rand_z = self.rng.usize(ranges[2].clone());
        vector![rand_x, rand_y, rand_z]
    }

    pub fn get_shapes(&self, n: usize) -> Vec<ShapeInfo> {
        (0..n).map(|_| self.get_shape()).collect()
    }

    pub fn get_shape(&self) -> ShapeInfo {
        let shape_type = self.random_shape();

        let size_ranges = self.size.zip_zip_map(
            &self.size_variance,
            &self.vol_dims,
            |size, var, dim| size.saturating_sub(var).max(1)..=(size + var).min(dim),
        );
        let size = self.random_vector(size_ranges);

        // keep whole shape inside
        let pos_ranges = self.vol_dims.zip_map(&size, |dim, s| 0..=(dim - s));
        let position_low = self.random_vector(pos_ranges);

        let position_high = position_low + size - vector![1, 1, 1];

        let sample = self.random_sample();

        ShapeInfo::new(position_low, position_high, shape_type, sample)
    }

    fn random_sample(&self) -> Intensity {
        // saturating, sample may be near type limits
        let low = self.sample.saturating_sub(self.sample_variance);
        let high = self.sample.saturating_add(self.sample_variance);
        self.rng.i16(low..=high)
    }
}

#[cfg(test)]
mod test {

    use super::*;

    fn generator(seed: u64) -> ShapeInfoGenerator {
        ShapeInfoGenerator::new(
            vector![30, 20, 10],
            vector![8, 8, 8],
            vector![2, 2, 2],
            100,
            SAMPLE_VARIANCE,
            Some(seed),
        )
    }

    #[test]
    fn shapes_fit_volume() {
        let gen = generator(42);
        for shape in gen.get_shapes(50) {
            assert!(shape.position_high.x < 30);
            assert!(shape.position_high.y < 20);
            assert!(shape.position_high.z < 10);
            assert!((90..=110).contains(&shape.sample));
        }
    }

    #[test]
    fn seed_replicates_shapes() {
        let a = generator(5).get_shapes(5);
        let b = generator(5).get_shapes(5);

        for (a, b) in a.iter().zip(b.iter()) {
            assert_eq!(a.position_low, b.position_low);
            assert_eq!(a.shape_type, b.shape_type);
            assert_eq!(a.sample, b.sample);
        }
    }

    #[test]
    fn sphere_has_empty_corners() {
        let shape = ShapeInfo::new(vector![2, 2, 2], vector![12, 12, 12], ShapeType::Sphere, 9);

        assert_eq!(shape.render_at(vector![5, 5, 5]), 9);
        assert_eq!(shape.render_at(vector![0, 0, 0]), 0);

        let cube = ShapeInfo { shape_type: ShapeType::Cuboid, ..shape };
        assert_eq!(cube.render_at(vector![0, 0, 0]), 9);
    }

    #[test]
    fn background_is_empty() {
        let gen = ShapesGenerator {
            shapes: vec![ShapeInfo::new(vector![0, 0, 0], vector![1, 1, 1], ShapeType::Cuboid, 3)],
        };

        assert_eq!(gen.sample_at(vector![1, 1, 1]), 3);
        assert_eq!(gen.sample_at(vector![2, 1, 1]), 0);
    }
}
