use std::{str::FromStr, sync::Arc};

use nalgebra::{vector, Point3, Vector3};
use parking_lot::RwLock;

use crate::{
    camera::ViewBasis,
    color::{self, RGBA},
    common::ValueRange,
    error::RenderError,
    premade::transfer_functions::gray_ramp_tf,
    transfer_functions::{TransferFunction, TransferFunction2D},
    volumetric::Volume,
};

pub const DEFAULT_ISO_VALUE: f32 = 95.0;

/// Algorithm used for a ray
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Plane through volume centre, whole frame
    Slice,
    MaximumIntensityProjection,
    /// Front to back compositing with 1D transfer function
    Compositing,
    /// Front to back compositing with 2D transfer function
    Transfer2D,
    /// First hit of the iso value
    Isosurface,
}

impl FromStr for RenderMode {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slice" => Ok(RenderMode::Slice),
            "mip" => Ok(RenderMode::MaximumIntensityProjection),
            "composite" => Ok(RenderMode::Compositing),
            "transfer2d" => Ok(RenderMode::Transfer2D),
            "iso" => Ok(RenderMode::Isosurface),
            _ => Err(RenderError::UnknownName(s.into())),
        }
    }
}

/// Parameters of one side of the cutting plane
#[derive(Debug, Clone, PartialEq)]
pub struct SideConfig {
    pub mode: RenderMode,
    pub iso_value: f32,
    pub iso_color: RGBA,
    pub shading: bool,
    pub tf: TransferFunction,
    pub tf2d: TransferFunction2D,
}

impl SideConfig {
    /// Defaults for volume with sample range `range`
    pub fn for_range(range: ValueRange) -> SideConfig {
        SideConfig {
            mode: RenderMode::Slice,
            iso_value: DEFAULT_ISO_VALUE,
            iso_color: color::new(1.0, 1.0, 0.0, 1.0),
            shading: false,
            tf: gray_ramp_tf(range),
            tf2d: TransferFunction2D::from_range(range),
        }
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Plane splitting rays into front and back
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuttingPlane {
    pub point: Point3<f32>,
    pub normal: Vector3<f32>,
    pub enabled: bool,
}

impl CuttingPlane {
    pub fn new(point: Point3<f32>, normal: Vector3<f32>) -> CuttingPlane {
        CuttingPlane {
            point,
            normal,
            enabled: true,
        }
    }

    /// Plane through `point`, facing right of the current view
    pub fn from_view_basis(point: Point3<f32>, basis: &ViewBasis) -> CuttingPlane {
        CuttingPlane::new(point, basis.right)
    }

    /// `pos` lies on the side the normal points to, or on the plane
    pub fn is_front(&self, pos: &Point3<f32>) -> bool {
        (pos - self.point).dot(&self.normal) >= 0.0
    }
}

/// Everything that describes how to render a frame, except for camera
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub front: SideConfig,
    pub back: SideConfig,
    pub cutting_plane: CuttingPlane,
}

impl RenderConfig {
    /// Defaults for `volume`.
    /// Both sides equal, plane through integer volume centre with normal `+z`, disabled.
    pub fn for_volume<V: Volume + ?Sized>(volume: &V) -> RenderConfig {
        let side = SideConfig::for_range(volume.get_range());
        let center = Point3::from(volume.get_size().map(|v| (v / 2) as f32));
        let mut cutting_plane = CuttingPlane::new(center, vector![0.0, 0.0, 1.0]);
        cutting_plane.enabled = false;

        RenderConfig {
            front: side.clone(),
            back: side,
            cutting_plane,
        }
    }

    /// Side used for ray entering volume at `entry`
    pub fn side_for(&self, entry: &Point3<f32>) -> &SideConfig {
        if !self.cutting_plane.enabled || self.cutting_plane.is_front(entry) {
            &self.front
        } else {
            &self.back
        }
    }
}

/// Shared [`RenderConfig`].
///
/// Readers take a snapshot, writers replace the whole config.
/// A frame never sees a partially edited config.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    current: Arc<RwLock<Arc<RenderConfig>>>,
}

impl ConfigHandle {
    pub fn new(config: RenderConfig) -> ConfigHandle {
        ConfigHandle {
            current: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    pub fn snapshot(&self) -> Arc<RenderConfig> {
        self.current.read().clone()
    }

    pub fn publish(&self, config: RenderConfig) {
        *self.current.write() = Arc::new(config);
    }

    /// Edit a copy of the current config and publish it
    pub fn update<F>(&self, edit: F)
    where
        F: FnOnce(&mut RenderConfig),
    {
        let mut current = self.current.write();
        let mut next = RenderConfig::clone(&current);
        edit(&mut next);
        *current = Arc::new(next);
    }
}
