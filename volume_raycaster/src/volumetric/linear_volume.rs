use nalgebra::Vector3;

use crate::{common::ValueRange, error::VolumeError, Intensity};

use super::{
    vol_builder::{BuildVolume, VolumeMetadata},
    Volume,
};

/// Volume with samples in one continuous buffer
pub struct LinearVolume {
    size: Vector3<usize>,
    data: Vec<Intensity>,
    range: ValueRange,
}

impl std::fmt::Debug for LinearVolume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Volume")
            .field("size", &self.size)
            .field("range", &self.range)
            .field("data len ", &self.data.len())
            .finish()
    }
}

impl LinearVolume {
    fn get_3d_index(&self, x: usize, y: usize, z: usize) -> usize {
        z + y * self.size.z + x * self.size.y * self.size.z
    }
}

impl Volume for LinearVolume {
    fn get_size(&self) -> Vector3<usize> {
        self.size
    }

    fn get_data(&self, x: usize, y: usize, z: usize) -> Option<Intensity> {
        if x >= self.size.x || y >= self.size.y || z >= self.size.z {
            return None;
        }
        self.data.get(self.get_3d_index(x, y, z)).copied()
    }

    fn get_range(&self) -> ValueRange {
        self.range
    }
}

impl<M> BuildVolume<M> for LinearVolume
where
    M: Copy + Into<Intensity>,
{
    fn build(metadata: VolumeMetadata<M>) -> Result<LinearVolume, VolumeError> {
        let (size, data) = metadata.into_checked()?;

        let data: Vec<Intensity> = data.into_iter().map(|v| v.into()).collect();

        // Non-empty, checked by metadata
        let range = ValueRange::from_samples(data.iter()).ok_or(VolumeError::MissingData)?;

        log::info!(
            "New linear volume, size {:?} range <{};{}>",
            size,
            range.low,
            range.high
        );

        Ok(LinearVolume { size, data, range })
    }
}
