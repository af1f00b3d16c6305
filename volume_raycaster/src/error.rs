/*
    volume_raycaster
    Author: Michal Majer
    Date: 2022-05-05
*/

use thiserror::Error;

/// Error while building volume from metadata
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VolumeError {
    #[error("no size passed")]
    MissingSize,
    #[error("no volumetric data passed")]
    MissingData,
    #[error("volume dimension cannot be zero (size {x}x{y}x{z})")]
    ZeroDimension { x: usize, y: usize, z: usize },
    #[error("data length {actual} does not match size (expected {expected} samples)")]
    DataLength { expected: usize, actual: usize },
}

/// Error reported by renderer
#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("buffer has {actual} bytes, frame needs {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("sample step must be positive and finite, got {0}")]
    SampleStep(f32),
    #[error("resolution must be non-zero")]
    Resolution,
    #[error("unknown name '{0}'")]
    UnknownName(String),
}
