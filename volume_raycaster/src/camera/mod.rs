/*
    volume_raycaster
    Author: Michal Majer
    Date: 2022-05-05
*/

//! Camera
//!
//! Renderer uses parallel projection, all it needs is [`ViewBasis`].
//! Cameras produce view matrix, basis is read from its rows.

use nalgebra::{vector, Matrix4, Vector3};

mod target_camera;

pub use target_camera::TargetCamera;

pub trait Camera {
    /// World to camera matrix (OpenGL convention).
    /// Rows 0, 1, 2 hold right, up and view vector.
    fn view_matrix(&self) -> Matrix4<f32>;

    fn view_basis(&self) -> ViewBasis {
        ViewBasis::from_view_matrix(&self.view_matrix())
    }
}

/// Orthonormal basis of the image plane.
///
/// `view` points from the scene towards the viewer,
/// rays travel in direction `-view`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBasis {
    pub view: Vector3<f32>,
    pub up: Vector3<f32>,
    pub right: Vector3<f32>,
}

impl ViewBasis {
    /// Vectors get normalized
    pub fn new(view: Vector3<f32>, up: Vector3<f32>, right: Vector3<f32>) -> ViewBasis {
        ViewBasis {
            view: view.normalize(),
            up: up.normalize(),
            right: right.normalize(),
        }
    }

    pub fn from_view_matrix(matrix: &Matrix4<f32>) -> ViewBasis {
        let row = |r: usize| vector![matrix[(r, 0)], matrix[(r, 1)], matrix[(r, 2)]];
        ViewBasis::new(row(2), row(1), row(0))
    }

    /// Direction of all rays
    pub fn ray_direction(&self) -> Vector3<f32> {
        -self.view
    }
}

impl Default for ViewBasis {
    /// Looking down the z axis
    fn default() -> Self {
        ViewBasis {
            view: vector![0.0, 0.0, 1.0],
            up: vector![0.0, 1.0, 0.0],
            right: vector![1.0, 0.0, 0.0],
        }
    }
}
