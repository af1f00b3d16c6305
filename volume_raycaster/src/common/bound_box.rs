use nalgebra::{point, vector, Point3, Vector3};

use super::{Ray, RaySegment};

/// Denominators smaller than this mean the ray is parallel to a face
const PARALLEL_EPSILON: f32 = 1.0e-8;

/// Faces are inflated by this amount when checking intersections
const FACE_TOLERANCE: f32 = 0.5;

/// Axis aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundBox {
    pub lower: Point3<f32>,
    pub upper: Point3<f32>,
}

/// One side of [`BoundBox`], `normal` points outside of the box
#[derive(Debug, Clone, Copy)]
pub struct Face {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl BoundBox {
    pub fn new(lower: Point3<f32>, upper: Point3<f32>) -> BoundBox {
        BoundBox { lower, upper }
    }

    /// Box with lower corner in origin
    pub fn from_dims(dimensions: Vector3<f32>) -> BoundBox {
        BoundBox {
            lower: point![0.0, 0.0, 0.0],
            upper: Point3::from(dimensions),
        }
    }

    pub fn dims(&self) -> Vector3<f32> {
        self.upper - self.lower
    }

    pub fn center(&self) -> Point3<f32> {
        self.lower + self.dims() / 2.0
    }

    pub fn diagonal(&self) -> f32 {
        self.dims().magnitude()
    }

    /// Six faces in order +x, -x, +y, -y, +z, -z
    pub fn faces(&self) -> [Face; 6] {
        let (l, u) = (self.lower, self.upper);
        [
            Face::new(point![u.x, l.y, l.z], vector![1.0, 0.0, 0.0]),
            Face::new(l, vector![-1.0, 0.0, 0.0]),
            Face::new(point![l.x, u.y, l.z], vector![0.0, 1.0, 0.0]),
            Face::new(l, vector![0.0, -1.0, 0.0]),
            Face::new(point![l.x, l.y, u.z], vector![0.0, 0.0, 1.0]),
            Face::new(l, vector![0.0, 0.0, -1.0]),
        ]
    }

    /// Point lies on the box, with tolerance of half a voxel in every direction
    fn is_valid_intersection(&self, pos: &Point3<f32>) -> bool {
        (0..3).all(|i| {
            self.lower[i] - FACE_TOLERANCE <= pos[i] && pos[i] <= self.upper[i] + FACE_TOLERANCE
        })
    }

    /// Compute entry and exit point of `ray`.
    ///
    /// Every face is intersected with the line of the ray. Accepted intersection is
    /// an entry, if the ray heads into the box through the face, otherwise an exit.
    /// Returns `None` if the ray misses the box, or touches it in one point only.
    pub fn entry_exit(&self, ray: &Ray) -> Option<RaySegment> {
        let mut entry = None;
        let mut exit = None;

        for face in self.faces() {
            let intersection = match face.intersect(ray) {
                Some(p) => p,
                None => continue,
            };

            if !self.is_valid_intersection(&intersection) {
                continue;
            }

            if ray.direction.dot(&face.normal) < 0.0 {
                entry = Some(intersection);
            } else {
                exit = Some(intersection);
            }
        }

        match (entry, exit) {
            (Some(entry), Some(exit)) => Some(RaySegment::new(entry, exit, ray.direction)),
            _ => None,
        }
    }
}

impl Face {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Face {
        Face { position, normal }
    }

    /// Intersection of the line of `ray` with the plane of the face.
    /// `None` if ray is parallel to the plane.
    pub fn intersect(&self, ray: &Ray) -> Option<Point3<f32>> {
        let denom = ray.direction.dot(&self.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.position - ray.origin).dot(&self.normal) / denom;
        Some(ray.point_from_t(t))
    }
}
