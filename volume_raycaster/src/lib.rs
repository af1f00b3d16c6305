/*
    volume_raycaster
    Author: Michal Majer
    Date: 2022-05-05
*/

//! CPU volume raycaster.
//!
//! Renders a scalar volume into an RGBA image using one of several
//! algorithms (slicing, MIP, compositing with 1D/2D transfer functions,
//! isosurface). Rays are parallel, derived from a [`camera::ViewBasis`].
//!
//! Typical use:
//! 1. build a volume ([`volumetric::LinearVolume`]) from [`volumetric::VolumeMetadata`]
//! 2. construct [`render::Renderer`], it computes gradients once
//! 3. render frames with a [`render::RenderConfig`] snapshot

pub mod camera;
pub mod color;
pub mod common;
pub mod error;
pub mod premade;
pub mod render;
pub mod test_helpers;
pub mod transfer_functions;
pub mod volumetric;

pub use camera::{TargetCamera, ViewBasis};
pub use error::{RenderError, VolumeError};
pub use transfer_functions::{TransferFunction, TransferFunction2D};

/// Stored sample type
pub type Intensity = i16;
