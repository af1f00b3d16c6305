use nalgebra::Vector3;

use crate::error::VolumeError;

/// Construct volume from metadata
pub trait BuildVolume<M>
where
    Self: Sized,
{
    fn build(metadata: VolumeMetadata<M>) -> Result<Self, VolumeError>;
}

/// Everything needed to build a volume.
///
/// Samples are ordered by axis (x,y,z), z being the fastest growing axis.
#[derive(Debug, Clone)]
pub struct VolumeMetadata<T> {
    pub size: Option<Vector3<usize>>,
    pub data: Option<Vec<T>>,
}

impl<T> VolumeMetadata<T> {
    pub fn new() -> VolumeMetadata<T> {
        VolumeMetadata {
            size: None,
            data: None,
        }
    }

    pub fn from_data(size: Vector3<usize>, data: Vec<T>) -> VolumeMetadata<T> {
        VolumeMetadata {
            size: Some(size),
            data: Some(data),
        }
    }

    pub fn set_size(&mut self, size: Vector3<usize>) {
        self.size = Some(size);
    }

    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = Some(data);
    }

    /// Check metadata is complete and consistent, returns size and data
    pub fn into_checked(self) -> Result<(Vector3<usize>, Vec<T>), VolumeError> {
        let size = self.size.ok_or(VolumeError::MissingSize)?;
        let data = self.data.ok_or(VolumeError::MissingData)?;

        if size.iter().any(|&d| d == 0) {
            return Err(VolumeError::ZeroDimension {
                x: size.x,
                y: size.y,
                z: size.z,
            });
        }

        let expected = size.x * size.y * size.z;
        if data.len() != expected {
            return Err(VolumeError::DataLength {
                expected,
                actual: data.len(),
            });
        }

        Ok((size, data))
    }
}

impl<T> Default for VolumeMetadata<T> {
    fn default() -> Self {
        Self::new()
    }
}
