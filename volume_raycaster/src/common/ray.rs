use nalgebra::{Point3, Vector3};

/// Ray cast from image plane.
/// Main usecase is getting entry and exit points with volume ([`super::BoundBox::entry_exit`]),
/// then iterating over the intersected line segment in steps.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Construct new ray using `origin` and `direction`.
    /// `direction` gets normalized.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Ray {
        Ray {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Returns point `t` units far from ray origin in ray direction
    pub fn point_from_t(&self, t: f32) -> Point3<f32> {
        self.origin + t * self.direction
    }
}

/// Part of a ray inside volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySegment {
    pub entry: Point3<f32>,
    pub exit: Point3<f32>,
    /// Unit direction of the ray
    pub direction: Vector3<f32>,
}

impl RaySegment {
    pub fn new(entry: Point3<f32>, exit: Point3<f32>, direction: Vector3<f32>) -> RaySegment {
        RaySegment {
            entry,
            exit,
            direction,
        }
    }

    pub fn length(&self) -> f32 {
        (self.exit - self.entry).magnitude()
    }

    /// Number of samples taken with step `sample_step`.
    /// Both ends count, so there is always at least one sample.
    pub fn sample_count(&self, sample_step: f32) -> usize {
        1 + f32::floor(self.length() / sample_step) as usize
    }

    /// Iterate sample positions from entry towards exit
    pub fn samples(&self, sample_step: f32) -> SampleIter {
        SampleIter {
            pos: self.entry,
            step: self.direction * sample_step,
            remaining: self.sample_count(sample_step),
        }
    }
}

/// Positions along [`RaySegment`]
pub struct SampleIter {
    pos: Point3<f32>,
    step: Vector3<f32>,
    remaining: usize,
}

impl SampleIter {
    /// Position the next sample would be taken at.
    /// After exhaustion, this is one step past the last sample.
    pub fn position(&self) -> Point3<f32> {
        self.pos
    }
}

impl Iterator for SampleIter {
    type Item = Point3<f32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.pos;
        self.pos += self.step;
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SampleIter {}
