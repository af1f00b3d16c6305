//! Volume data, gradients and sampling

mod gradient;
mod linear_volume;
mod sampler;
mod vol_builder;
mod volume;

pub use gradient::{GradientField, VoxelGradient};
pub use linear_volume::LinearVolume;
pub use sampler::Sampler;
pub use vol_builder::{BuildVolume, VolumeMetadata};
pub use volume::Volume;
