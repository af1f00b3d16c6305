use nalgebra::{Point3, Vector3};

use crate::{
    color::{self, RGBA},
    common::RaySegment,
    volumetric::{Sampler, Volume},
};

use super::{
    render_config::{RenderMode, SideConfig},
    shading::PhongShading,
};

/// A sample is over the iso value if it exceeds it by at least this much
const ISO_EPSILON: f32 = 1e-5;

/// Front to back "over" operator, `sample` lies behind `accum`
pub fn blend_over(accum: &RGBA, sample: &RGBA) -> RGBA {
    let transmittance = 1.0 - accum.w;
    let weight = sample.w * transmittance;
    color::new(
        accum.x + sample.x * weight,
        accum.y + sample.y * weight,
        accum.z + sample.z * weight,
        accum.w + weight,
    )
}

/// Computes color of a single ray.
///
/// Light comes from the viewer, so both light and view direction
/// are the ray direction.
pub struct RayCompositor<'a, V>
where
    V: Volume + ?Sized,
{
    sampler: Sampler<'a, V>,
    shading: PhongShading,
    sample_step: f32,
    max_gradient: f32,
}

impl<'a, V> RayCompositor<'a, V>
where
    V: Volume + ?Sized,
{
    pub fn new(sampler: Sampler<'a, V>, sample_step: f32) -> RayCompositor<'a, V> {
        let max_gradient = sampler.gradients().max_magnitude();
        RayCompositor {
            sampler,
            shading: PhongShading::default(),
            sample_step,
            max_gradient,
        }
    }

    pub fn with_shading(mut self, shading: PhongShading) -> Self {
        self.shading = shading;
        self
    }

    pub fn sample_step(&self) -> f32 {
        self.sample_step
    }

    /// Trace `segment` with algorithm of `side`.
    /// Slice is not a ray algorithm, rays in slice mode are transparent.
    pub fn trace(&self, side: &SideConfig, segment: &RaySegment) -> RGBA {
        match side.mode {
            RenderMode::Slice => color::zero(),
            RenderMode::MaximumIntensityProjection => self.trace_mip(segment),
            RenderMode::Compositing | RenderMode::Transfer2D => {
                self.trace_composite(side, segment)
            }
            RenderMode::Isosurface => self.trace_iso(side, segment),
        }
    }

    /// Maximum of nearest samples, scaled to 8 bit range
    pub fn trace_mip(&self, segment: &RaySegment) -> RGBA {
        let maximum = segment
            .samples(self.sample_step)
            .map(|pos| self.sampler.voxel_nearest(&pos) as f32 / 255.0)
            .fold(0.0, f32::max);

        let opacity = if maximum > 0.0 { 1.0 } else { 0.0 };
        color::mono(maximum, opacity)
    }

    /// Front to back compositing over the whole segment.
    /// Color of samples is given by 1D or 2D transfer function, based on mode of `side`.
    /// No early termination, all samples are taken.
    pub fn trace_composite(&self, side: &SideConfig, segment: &RaySegment) -> RGBA {
        let direction = segment.direction;

        segment
            .samples(self.sample_step)
            .fold(color::zero(), |accum, pos| {
                let sample = match side.mode {
                    RenderMode::Transfer2D => self.material_sample(side, &pos, &direction),
                    _ => self.tf_sample(side, &pos, &direction),
                };
                blend_over(&accum, &sample)
            })
    }

    fn tf_sample(&self, side: &SideConfig, pos: &Point3<f32>, direction: &Vector3<f32>) -> RGBA {
        let value = self.sampler.voxel_trilinear(pos);
        let sample = side.tf.get_color(value);

        if side.shading {
            let gradient = self.sampler.gradient_trilinear(pos);
            self.shading.shade(&sample, &gradient, direction, direction)
        } else {
            sample
        }
    }

    /// Material color, shaded before opacity gets computed
    fn material_sample(
        &self,
        side: &SideConfig,
        pos: &Point3<f32>,
        direction: &Vector3<f32>,
    ) -> RGBA {
        let value = self.sampler.voxel_trilinear(pos) as f32;
        let gradient = self.sampler.gradient_trilinear(pos);
        let tf2d = &side.tf2d;

        let mut sample = tf2d.color;
        if side.shading {
            sample = self.shading.shade(&sample, &gradient, direction, direction);
        }
        sample.w = tf2d.opacity(value, gradient.mag, self.max_gradient);
        sample
    }

    /// First sample over iso value of `side`.
    /// Hit is opaque iso color, miss is transparent.
    pub fn trace_iso(&self, side: &SideConfig, segment: &RaySegment) -> RGBA {
        let mut samples = segment.samples(self.sample_step);

        let hit = samples
            .by_ref()
            .find(|pos| self.sampler.voxel_trilinear(pos) as f32 - side.iso_value >= ISO_EPSILON);

        let (pos, opacity) = match hit {
            Some(pos) => (pos, 1.0),
            None => (samples.position(), 0.0),
        };

        let iso = side.iso_color;
        let color = color::new(iso.x, iso.y, iso.z, opacity);

        if side.shading {
            let gradient = self.sampler.gradient_trilinear(&pos);
            let direction = segment.direction;
            self.shading.shade(&color, &gradient, &direction, &direction)
        } else {
            color
        }
    }
}

#[cfg(test)]
mod test {

    use approx::assert_relative_eq;
    use nalgebra::{point, vector};

    use super::*;
    use crate::{
        common::ValueRange,
        test_helpers::*,
        transfer_functions::{TransferFunction, TransferFunction2D},
        volumetric::{GradientField, LinearVolume},
    };

    fn side(mode: RenderMode) -> SideConfig {
        SideConfig::for_range(ValueRange { low: 0, high: 255 }).with_mode(mode)
    }

    // Ray along z axis through (2, 2), from z = `from` to z = `to`
    fn z_segment(from: f32, to: f32) -> RaySegment {
        let dir = if to >= from { 1.0 } else { -1.0 };
        RaySegment::new(point![2.0, 2.0, from], point![2.0, 2.0, to], vector![0.0, 0.0, dir])
    }

    #[test]
    fn blend_saturates() {
        let opaque = color::new(1.0, 0.0, 0.0, 1.0);
        let other = color::new(0.0, 1.0, 1.0, 0.7);

        let accum = blend_over(&color::zero(), &opaque);
        let accum = blend_over(&accum, &other);

        assert_eq!(accum, opaque);
    }

    #[test]
    fn mip_empty_is_transparent() {
        let vol: LinearVolume = empty_volume(vector![5, 5, 10]);
        let grad = GradientField::from_volume(&vol);
        let compositor = RayCompositor::new(Sampler::new(&vol, &grad), 1.0);

        let mip = side(RenderMode::MaximumIntensityProjection);
        let color = compositor.trace(&mip, &z_segment(0.0, 9.0));

        assert_eq!(color.w, 0.0);
        assert_eq!(color.x, 0.0);
    }

    #[test]
    fn mip_takes_maximum() {
        let vol: LinearVolume = step_volume(vector![5, 5, 10], 5, 20, 102);
        let grad = GradientField::from_volume(&vol);
        let compositor = RayCompositor::new(Sampler::new(&vol, &grad), 1.0);

        let color = compositor.trace_mip(&z_segment(0.0, 9.0));

        assert_eq!(color.w, 1.0);
        assert_relative_eq!(color.x, 102.0 / 255.0);
        assert_eq!(color.x, color.y);
    }

    #[test]
    fn opaque_first_sample_hides_rest() {
        let vol: LinearVolume = step_volume(vector![5, 5, 10], 5, 10, 200);
        let grad = GradientField::from_volume(&vol);
        let sampler = Sampler::new(&vol, &grad);
        let compositor = RayCompositor::new(sampler, 1.0);

        let mut tf = TransferFunction::new(0, 255);
        tf.update_control_point(0, color::new(1.0, 0.0, 0.0, 1.0));
        tf.update_control_point(1, color::new(0.0, 0.0, 1.0, 1.0));
        let mut cfg = side(RenderMode::Compositing);
        cfg.tf = tf;

        let segment = z_segment(9.0, 0.0);
        let color = compositor.trace(&cfg, &segment);

        let first = cfg.tf.get_color(sampler.voxel_trilinear(&segment.entry));
        assert_eq!(color.w, 1.0);
        assert_relative_eq!(color, first);
    }

    #[test]
    fn compositing_accumulates() {
        let vol: LinearVolume = solid_volume(vector![5, 5, 5], 100);
        let grad = GradientField::from_volume(&vol);
        let compositor = RayCompositor::new(Sampler::new(&vol, &grad), 1.0);

        let mut tf = TransferFunction::new(0, 255);
        tf.update_control_point(0, color::mono(1.0, 0.5));
        tf.update_control_point(1, color::mono(1.0, 0.5));
        let mut cfg = side(RenderMode::Compositing);
        cfg.tf = tf;

        // Two samples, each with half opacity
        let color = compositor.trace(&cfg, &z_segment(1.0, 2.0));

        assert_relative_eq!(color, color::mono(0.75, 0.75), epsilon = 1e-6);
    }

    #[test]
    fn transfer2d_flat_material() {
        let vol: LinearVolume = solid_volume(vector![5, 5, 5], 127);
        let grad = GradientField::from_volume(&vol);
        let compositor = RayCompositor::new(Sampler::new(&vol, &grad), 1.0);

        let mut cfg = side(RenderMode::Transfer2D);
        cfg.tf2d = TransferFunction2D::new(127.0, 20.0, color::new(0.0, 1.0, 0.0, 0.5));

        // Three samples of exactly matching material
        let color = compositor.trace(&cfg, &z_segment(1.0, 3.0));

        assert_relative_eq!(color, color::new(0.0, 0.875, 0.0, 0.875));
    }

    #[test]
    fn transfer2d_other_material_invisible() {
        let vol: LinearVolume = solid_volume(vector![5, 5, 5], 127);
        let grad = GradientField::from_volume(&vol);
        let compositor = RayCompositor::new(Sampler::new(&vol, &grad), 1.0);

        let mut cfg = side(RenderMode::Transfer2D);
        cfg.tf2d = TransferFunction2D::new(60.0, 20.0, color::new(0.0, 1.0, 0.0, 0.5));

        let color = compositor.trace(&cfg, &z_segment(1.0, 3.0));

        assert_eq!(color.w, 0.0);
    }

    #[test]
    fn iso_hits_step() {
        let vol: LinearVolume = step_volume(vector![5, 5, 10], 5, 0, 200);
        let grad = GradientField::from_volume(&vol);
        let compositor = RayCompositor::new(Sampler::new(&vol, &grad), 1.0);

        let cfg = side(RenderMode::Isosurface);
        let color = compositor.trace(&cfg, &z_segment(0.0, 9.0));

        assert_eq!(color, color::new(1.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn iso_below_value_misses() {
        let vol: LinearVolume = solid_volume(vector![5, 5, 10], 50);
        let grad = GradientField::from_volume(&vol);
        let compositor = RayCompositor::new(Sampler::new(&vol, &grad), 1.0);

        let color = compositor.trace(&side(RenderMode::Isosurface), &z_segment(0.0, 9.0));

        assert_eq!(color.w, 0.0);
    }

    #[test]
    fn iso_uses_own_value() {
        let vol: LinearVolume = step_volume(vector![5, 5, 10], 5, 0, 200);
        let grad = GradientField::from_volume(&vol);
        let compositor = RayCompositor::new(Sampler::new(&vol, &grad), 1.0);

        let mut cfg = side(RenderMode::Isosurface);
        cfg.iso_value = 200.0;

        // Value equal to iso value is not a hit
        let color = compositor.trace(&cfg, &z_segment(0.0, 9.0));
        assert_eq!(color.w, 0.0);
    }

    #[test]
    fn iso_shaded_hit_stays_opaque() {
        let vol: LinearVolume = step_volume(vector![5, 5, 10], 5, 0, 200);
        let grad = GradientField::from_volume(&vol);
        let compositor = RayCompositor::new(Sampler::new(&vol, &grad), 1.0);

        let mut cfg = side(RenderMode::Isosurface);
        cfg.shading = true;
        let color = compositor.trace(&cfg, &z_segment(0.0, 9.0));

        assert_eq!(color.w, 1.0);
        assert!(color.x > 0.0);
    }

    #[test]
    fn slice_ray_is_transparent() {
        let vol: LinearVolume = solid_volume(vector![5, 5, 5], 100);
        let grad = GradientField::from_volume(&vol);
        let compositor = RayCompositor::new(Sampler::new(&vol, &grad), 1.0);

        let color = compositor.trace(&side(RenderMode::Slice), &z_segment(0.0, 4.0));

        assert_eq!(color, color::zero());
    }
}
