use nalgebra::{vector, Vector2, Vector3};

use crate::error::RenderError;

pub const DEFAULT_RAY_STEP_QUALITY: f32 = 1.0;
pub const DEFAULT_RAY_STEP_FAST: f32 = 5.0;

/// Requested quality of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderQuality {
    Quality,
    /// Interactive mode, larger step along rays
    Fast,
}

/// Renderer settings, fixed for the lifetime of a renderer.
///
/// Use [`RenderOptions::builder`] to construct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Width and height of the frame in pixels.
    /// `None` means square frame fitting the volume, chosen by renderer.
    pub resolution: Option<Vector2<usize>>,
    /// Distance between samples on a ray, full quality
    pub ray_step_quality: f32,
    /// Distance between samples on a ray, fast render
    pub ray_step_fast: f32,
    /// Render rows in parallel
    pub multi_thread: bool,
}

impl RenderOptions {
    pub fn builder() -> RenderOptionsBuilder {
        RenderOptionsBuilder::new()
    }

    /// Side of a square image that fits volume of size `dims` from every direction.
    /// Length of the diagonal, rounded up to an even number.
    pub fn image_side(dims: Vector3<usize>) -> usize {
        let diagonal = dims.map(|v| v as f64).magnitude();
        let side = f64::ceil(diagonal) as usize;
        if side % 2 == 1 {
            side + 1
        } else {
            side
        }
    }

    pub fn ray_step(&self, quality: RenderQuality) -> f32 {
        match quality {
            RenderQuality::Quality => self.ray_step_quality,
            RenderQuality::Fast => self.ray_step_fast,
        }
    }

}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            resolution: None,
            ray_step_quality: DEFAULT_RAY_STEP_QUALITY,
            ray_step_fast: DEFAULT_RAY_STEP_FAST,
            multi_thread: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct RenderOptionsBuilder {
    resolution: Option<Vector2<usize>>,
    ray_step_quality: Option<f32>,
    ray_step_fast: Option<f32>,
    multi_thread: Option<bool>,
}

impl RenderOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution(mut self, resolution: Vector2<usize>) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Square resolution fitting volume of size `dims`, see [`RenderOptions::image_side`]
    pub fn fit_volume(self, dims: Vector3<usize>) -> Self {
        let side = RenderOptions::image_side(dims);
        self.resolution(vector![side, side])
    }

    pub fn ray_step_quality(mut self, step: f32) -> Self {
        self.ray_step_quality = Some(step);
        self
    }

    pub fn ray_step_fast(mut self, step: f32) -> Self {
        self.ray_step_fast = Some(step);
        self
    }

    pub fn multi_thread(mut self, multi_thread: bool) -> Self {
        self.multi_thread = Some(multi_thread);
        self
    }

    /// Build options, unset fields get defaults.
    /// Fails on zero resolution or invalid ray step.
    pub fn build(self) -> Result<RenderOptions, RenderError> {
        let options = self.build_unchecked();

        if let Some(res) = options.resolution {
            if res.x == 0 || res.y == 0 {
                return Err(RenderError::Resolution);
            }
        }
        for step in [options.ray_step_quality, options.ray_step_fast] {
            if !step.is_finite() || step <= 0.0 {
                return Err(RenderError::SampleStep(step));
            }
        }

        Ok(options)
    }

    /// Build options without validation, unset fields get defaults
    pub fn build_unchecked(self) -> RenderOptions {
        let default = RenderOptions::default();
        RenderOptions {
            resolution: self.resolution.or(default.resolution),
            ray_step_quality: self.ray_step_quality.unwrap_or(default.ray_step_quality),
            ray_step_fast: self.ray_step_fast.unwrap_or(default.ray_step_fast),
            multi_thread: self.multi_thread.unwrap_or(default.multi_thread),
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn image_side_even() {
        // diagonal of 2x2x1 is exactly 3
        assert_eq!(RenderOptions::image_side(vector![2, 2, 1]), 4);
        // sqrt(3) * 10 = 17.32
        assert_eq!(RenderOptions::image_side(vector![10, 10, 10]), 18);
        // sqrt(3) * 2 = 3.46
        assert_eq!(RenderOptions::image_side(vector![2, 2, 2]), 4);
        assert_eq!(RenderOptions::image_side(vector![6, 8, 0]), 10);
    }

    #[test]
    fn builder_defaults() {
        let opts = RenderOptions::builder().build().unwrap();

        assert_eq!(opts, RenderOptions::default());
        assert_eq!(opts.resolution, None);
        assert_eq!(opts.ray_step(RenderQuality::Quality), 1.0);
        assert_eq!(opts.ray_step(RenderQuality::Fast), 5.0);
    }

    #[test]
    fn builder_validates() {
        let res = RenderOptions::builder().resolution(vector![0, 10]).build();
        assert_eq!(res, Err(RenderError::Resolution));

        let res = RenderOptions::builder().ray_step_fast(-1.0).build();
        assert_eq!(res, Err(RenderError::SampleStep(-1.0)));

        let opts = RenderOptions::builder()
            .ray_step_quality(0.0)
            .build_unchecked();
        assert_eq!(opts.ray_step_quality, 0.0);
    }

    #[test]
    fn fit_volume() {
        let opts = RenderOptions::builder()
            .fit_volume(vector![10, 10, 10])
            .multi_thread(false)
            .build()
            .unwrap();

        assert_eq!(opts.resolution, Some(vector![18, 18]));
        assert!(!opts.multi_thread);
    }
}
