/*
    volume_raycaster
    Author: Michal Majer
    Date: 2022-05-05
*/

//! Transfer functions
//!
//! Map intensity (and gradient magnitude) to color.
//! Both kinds are plain values; editors modify their own copy and
//! publish it as a new snapshot (see [`crate::render::ConfigHandle`]).

use crate::{
    color::{self, RGBA},
    common::ValueRange,
    Intensity,
};

/// One control point of [`TransferFunction`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    pub value: Intensity,
    pub color: RGBA,
}

impl ControlPoint {
    pub fn new(value: Intensity, color: RGBA) -> ControlPoint {
        ControlPoint { value, color }
    }
}

/// 1D transfer function.
///
/// Piecewise linear between control points, sorted by value.
/// Outside of the control points the nearest end color is used.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    points: Vec<ControlPoint>,
}

impl TransferFunction {
    /// Fully transparent function with control points at `min` and `max`
    pub fn new(min: Intensity, max: Intensity) -> TransferFunction {
        let mut tf = TransferFunction { points: vec![] };
        tf.add_control_point(min, color::zero());
        tf.add_control_point(max, color::zero());
        tf
    }

    /// Transparent function over the whole intensity range of a volume
    pub fn from_range(range: ValueRange) -> TransferFunction {
        TransferFunction::new(range.low, range.high)
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Insert control point, keeps points sorted.
    /// Existing point with the same value gets its color replaced.
    /// Returns index of the point.
    pub fn add_control_point(&mut self, value: Intensity, color: RGBA) -> usize {
        match self.points.binary_search_by_key(&value, |p| p.value) {
            Ok(idx) => {
                self.points[idx].color = color;
                idx
            }
            Err(idx) => {
                self.points.insert(idx, ControlPoint::new(value, color));
                idx
            }
        }
    }

    /// Change color of point at `index`, returns `false` if there is no such point
    pub fn update_control_point(&mut self, index: usize, color: RGBA) -> bool {
        match self.points.get_mut(index) {
            Some(point) => {
                point.color = color;
                true
            }
            None => false,
        }
    }

    /// Remove point at `index`. Returns removed point.
    /// Two end points cannot be removed.
    pub fn remove_control_point(&mut self, index: usize) -> Option<ControlPoint> {
        if index == 0 || index + 1 >= self.points.len() {
            return None;
        }
        Some(self.points.remove(index))
    }

    pub fn get_color(&self, value: Intensity) -> RGBA {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return color::zero(),
        };

        if value <= first.value {
            return first.color;
        }
        if value >= last.value {
            return last.color;
        }

        // First point with value greater than `value`, exists thanks to the checks above
        let upper_idx = self.points.partition_point(|p| p.value <= value);
        let lower = &self.points[upper_idx - 1];
        let upper = &self.points[upper_idx];

        let span = (upper.value as f32) - (lower.value as f32);
        let t = (value as f32 - lower.value as f32) / span;

        lower.color * (1.0 - t) + upper.color * t
    }
}

/// 2D transfer function, one material.
///
/// Opacity depends on intensity and gradient magnitude, forming a triangle
/// with apex at `base_intensity` and width growing with gradient magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferFunction2D {
    pub base_intensity: f32,
    pub radius: f32,
    /// Material color, alpha is the maximal opacity
    pub color: RGBA,
}

impl TransferFunction2D {
    pub fn new(base_intensity: f32, radius: f32, color: RGBA) -> TransferFunction2D {
        TransferFunction2D {
            base_intensity,
            radius,
            color,
        }
    }

    /// Material centered in the intensity range of a volume
    pub fn from_range(range: ValueRange) -> TransferFunction2D {
        let max = range.high as f32;
        TransferFunction2D {
            base_intensity: f32::trunc(max / 2.0),
            radius: 0.2 * max,
            color: color::new(0.0, 0.8, 0.0, 0.3),
        }
    }

    /// Opacity of material at sample with intensity `value` and gradient magnitude `grad_mag`.
    ///
    /// `max_grad_mag` is the maximal gradient magnitude of the volume.
    pub fn opacity(&self, value: f32, grad_mag: f32, max_grad_mag: f32) -> f32 {
        let base = self.base_intensity;
        let max_opacity = self.color.w;

        if grad_mag == 0.0 {
            return if value == base { max_opacity } else { 0.0 };
        }

        if max_grad_mag <= 0.0 {
            return 0.0;
        }

        let radius = self.radius / max_grad_mag;
        let half_width = radius * grad_mag;

        if value - half_width <= base && base <= value + half_width {
            max_opacity * (1.0 - (base - value).abs() / half_width)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod test {

    use approx::assert_relative_eq;

    use super::*;

    fn red_ramp() -> TransferFunction {
        let mut tf = TransferFunction::new(0, 200);
        tf.add_control_point(100, color::new(1.0, 0.0, 0.0, 1.0));
        tf
    }

    #[test]
    fn interpolates_between_points() {
        let tf = red_ramp();

        assert_eq!(tf.get_color(100), color::new(1.0, 0.0, 0.0, 1.0));
        assert_relative_eq!(tf.get_color(50), color::new(0.5, 0.0, 0.0, 0.5));
        assert_relative_eq!(tf.get_color(150), color::new(0.5, 0.0, 0.0, 0.5));
    }

    #[test]
    fn clamps_outside() {
        let mut tf = TransferFunction::new(10, 20);
        tf.update_control_point(0, color::mono(0.2, 0.1));
        tf.update_control_point(1, color::mono(0.8, 0.9));

        assert_eq!(tf.get_color(-100), color::mono(0.2, 0.1));
        assert_eq!(tf.get_color(500), color::mono(0.8, 0.9));
    }

    #[test]
    fn editing_points() {
        let mut tf = red_ramp();

        assert_eq!(tf.control_points().len(), 3);
        // same value replaces color
        let idx = tf.add_control_point(100, color::mono(1.0, 1.0));
        assert_eq!(idx, 1);
        assert_eq!(tf.control_points().len(), 3);

        // ends stay
        assert!(tf.remove_control_point(0).is_none());
        assert!(tf.remove_control_point(2).is_none());
        assert!(tf.remove_control_point(1).is_some());
        assert_eq!(tf.get_color(100), color::zero());

        assert!(!tf.update_control_point(7, color::zero()));
    }

    #[test]
    fn opacity_flat_region() {
        let tf = TransferFunction2D::new(100.0, 20.0, color::new(1.0, 1.0, 1.0, 0.6));

        assert_eq!(tf.opacity(100.0, 0.0, 50.0), 0.6);
        assert_eq!(tf.opacity(101.0, 0.0, 50.0), 0.0);
    }

    #[test]
    fn opacity_wedge() {
        let tf = TransferFunction2D::new(100.0, 20.0, color::new(1.0, 1.0, 1.0, 0.8));
        let max_mag = 40.0;
        // radius / max_mag = 0.5, half width at m = 10 is 5
        assert_relative_eq!(tf.opacity(100.0, 10.0, max_mag), 0.8);
        assert_relative_eq!(tf.opacity(102.5, 10.0, max_mag), 0.4);
        assert_relative_eq!(tf.opacity(95.0, 10.0, max_mag), 0.0);

        // outside of the wedge
        assert_eq!(tf.opacity(106.0, 10.0, max_mag), 0.0);
        assert_eq!(tf.opacity(94.0, 10.0, max_mag), 0.0);
    }

    #[test]
    fn opacity_without_gradients() {
        let tf = TransferFunction2D::new(10.0, 5.0, color::new(1.0, 1.0, 1.0, 0.5));

        assert_eq!(tf.opacity(10.0, 0.0, 0.0), 0.5);
        assert_eq!(tf.opacity(12.0, 3.0, 0.0), 0.0);
    }

    #[test]
    fn default_material() {
        let tf = TransferFunction2D::from_range(ValueRange { low: 0, high: 255 });

        assert_eq!(tf.base_intensity, 127.0);
        assert_relative_eq!(tf.radius, 51.0);
    }
}
