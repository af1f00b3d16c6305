use anyhow::Result;
use nalgebra::{vector, Vector3};
use rayon::prelude::*;
use volume_raycaster::{
    volumetric::{BuildVolume, LinearVolume, VolumeMetadata},
    Intensity,
};

use crate::config::{Config, GeneratorConfig};

mod noise;
mod shapes;
mod solid;
mod sphere;

// Generates one sample at a time, at any location
pub trait SampleGenerator: Sync {
    fn sample_at(&self, coords: Vector3<usize>) -> Intensity;
}

pub fn get_sample_generator(config: &Config) -> Box<dyn SampleGenerator> {
    match config.generator {
        GeneratorConfig::Shapes { .. } => Box::new(shapes::ShapesGenerator::from_config(config)),
        GeneratorConfig::Noise { .. } => Box::new(noise::NoiseGenerator::from_config(config)),
        GeneratorConfig::Solid { .. } => Box::new(solid::SolidGenerator::from_config(config)),
        GeneratorConfig::Sphere { .. } => Box::new(sphere::SphereGenerator::from_config(config)),
    }
}

/// Coordinates of sample `index`, z being the fastest growing axis
fn coords_of(index: usize, dims: Vector3<usize>) -> Vector3<usize> {
    let z = index % dims.z;
    let y = (index / dims.z) % dims.y;
    let x = index / (dims.z * dims.y);
    vector![x, y, z]
}

/// Sample generator at every voxel, in parallel
pub fn generate_volume(config: &Config) -> Result<LinearVolume> {
    let gen = get_sample_generator(config);
    let dims = config.dims;
    let len = dims.x * dims.y * dims.z;

    let data: Vec<Intensity> = (0..len)
        .into_par_iter()
        .map(|i| gen.sample_at(coords_of(i, dims)))
        .collect();

    let meta = VolumeMetadata::from_data(dims, data);
    let volume = LinearVolume::build(meta)?;
    log::info!("Generated volume {:?}", dims);
    Ok(volume)
}
