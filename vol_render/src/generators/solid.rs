/*
    vol_render
    Author: Michal Majer
    Date: 2022-05-05
*/

use nalgebra::Vector3;
use volume_raycaster::Intensity;

use crate::config::{Config, GeneratorConfig};

use super::SampleGenerator;

const MAX_PAD: usize = 5;

/// Generate solid volume
/// All samples have the same value, except for an empty border
pub struct SolidGenerator {
    /// The sample value
    sample: Intensity,
    pad: Vector3<usize>,
    dims: Vector3<usize>,
}

impl SolidGenerator {
    pub fn new(dims: Vector3<usize>, sample: Intensity) -> SolidGenerator {
        // small volumes get thinner border
        let pad = dims.map(|d| (d / 4).min(MAX_PAD));
        SolidGenerator { sample, pad, dims }
    }

    pub fn from_config(config: &Config) -> SolidGenerator {
        let sample = match config.generator {
            GeneratorConfig::Solid { sample } => sample,
            _ => 0,
        };
        SolidGenerator::new(config.dims, sample)
    }
}

impl SampleGenerator for SolidGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> Intensity {
        let pad_end = self.dims - self.pad;
        let inside = (0..3).all(|i| coords[i] >= self.pad[i] && coords[i] < pad_end[i]);
        if inside {
            self.sample
        } else {
            0
        }
    }
}
