use std::f32::consts::PI;

use nalgebra::{matrix, vector, Matrix4, Point3, Vector3};

use super::Camera;

/// Smallest polar angle, keeps camera off the pole
const THETA_LIMIT: f32 = 0.01;

/// Camera orbiting around target point.
///
/// Position is kept in spherical coordinates relative to target,
/// with polar axis `z`.
#[derive(Debug, Clone)]
pub struct TargetCamera {
    position: Point3<f32>,
    target: Point3<f32>,
}

impl TargetCamera {
    pub fn new(position: Point3<f32>, target: Point3<f32>) -> TargetCamera {
        TargetCamera { position, target }
    }

    /// Camera looking at the centre of a box of size `dims` from distance `distance`
    pub fn around(dims: Vector3<f32>, distance: f32) -> TargetCamera {
        let target = Point3::from(dims / 2.0);
        let mut camera = TargetCamera::new(target, target);
        camera.set_spherical(distance, PI / 2.0, 0.0);
        camera
    }

    pub fn get_position(&self) -> Point3<f32> {
        self.position
    }

    pub fn get_target(&self) -> Point3<f32> {
        self.target
    }

    /// Returns r, theta, phi
    pub fn get_spherical(&self) -> (f32, f32, f32) {
        let dif = self.position - self.target;
        let r = dif.magnitude();
        if r == 0.0 {
            return (0.0, 0.0, 0.0);
        }
        let theta = (dif.z / r).clamp(-1.0, 1.0).acos();
        let phi = dif.y.atan2(dif.x);

        (r, theta, phi)
    }

    pub fn set_spherical(&mut self, r: f32, theta: f32, phi: f32) {
        let sphere_offset = vector![
            r * theta.sin() * phi.cos(),
            r * theta.sin() * phi.sin(),
            r * theta.cos()
        ];

        self.position = self.target + sphere_offset;
    }

    /// Orbit around target.
    /// Polar angle is clamped so camera never crosses the pole.
    pub fn rotate(&mut self, d_phi: f32, d_theta: f32) {
        let (r, theta, phi) = self.get_spherical();
        let theta = (theta + d_theta).clamp(THETA_LIMIT, PI - THETA_LIMIT);
        self.set_spherical(r, theta, phi + d_phi);
    }

    /// Scale distance from target by `factor`
    pub fn zoom(&mut self, factor: f32) {
        if factor <= 0.0 {
            return;
        }
        let (r, theta, phi) = self.get_spherical();
        self.set_spherical(r * factor, theta, phi);
    }

    fn basis_vectors(&self) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
        let view = (self.position - self.target).normalize();

        // Polar axis is up, unless we look along it
        let mut world_up = vector![0.0, 0.0, 1.0];
        if world_up.cross(&view).magnitude() < 1e-4 {
            world_up = vector![0.0, 1.0, 0.0];
        }

        let right = world_up.cross(&view).normalize();
        let up = view.cross(&right);
        (right, up, view)
    }
}

impl Camera for TargetCamera {
    fn view_matrix(&self) -> Matrix4<f32> {
        let (r, u, v) = self.basis_vectors();
        let p = self.position.coords;

        matrix![r.x, r.y, r.z, -r.dot(&p);
                u.x, u.y, u.z, -u.dot(&p);
                v.x, v.y, v.z, -v.dot(&p);
                0.0, 0.0, 0.0, 1.0]
    }
}
