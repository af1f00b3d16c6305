use nalgebra::{vector, Point3, Vector2, Vector3};
use rayon::prelude::*;

use crate::{
    camera::ViewBasis,
    color::{self, RGBA},
    common::Ray,
    error::RenderError,
    volumetric::{GradientField, Sampler, Volume},
};

use super::{
    compositor::RayCompositor,
    render_config::{RenderConfig, RenderMode},
    render_options::{RenderOptions, RenderQuality},
};

/// Renders frames of one volume.
///
/// Gradients and frame size are computed once, on construction.
/// Frame is a square fitting the volume diagonal, see [`RenderOptions::image_side`],
/// unless options carry an explicit resolution.
pub struct Renderer<V>
where
    V: Volume,
{
    pub volume: V,
    gradients: GradientField,
    render_options: RenderOptions,
    resolution: Vector2<usize>,
}

impl<V> Renderer<V>
where
    V: Volume,
{
    pub fn new(volume: V, render_options: RenderOptions) -> Renderer<V> {
        let gradients = GradientField::from_volume(&volume);
        let resolution = Self::frame_size(&volume, &render_options);
        Renderer {
            volume,
            gradients,
            render_options,
            resolution,
        }
    }

    fn frame_size(volume: &V, opts: &RenderOptions) -> Vector2<usize> {
        opts.resolution.unwrap_or_else(|| {
            let side = RenderOptions::image_side(volume.get_size());
            vector![side, side]
        })
    }

    pub fn set_render_options(&mut self, opts: RenderOptions) {
        self.resolution = Self::frame_size(&self.volume, &opts);
        self.render_options = opts;
    }

    pub fn get_render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    pub fn gradients(&self) -> &GradientField {
        &self.gradients
    }

    pub fn sampler(&self) -> Sampler<'_, V> {
        Sampler::new(&self.volume, &self.gradients)
    }

    /// Width and height of frame
    pub fn resolution(&self) -> Vector2<usize> {
        self.resolution
    }

    /// Length of buffer needed by [`Renderer::render_to_buffer`]
    pub fn buffer_len(&self) -> usize {
        self.resolution.x * self.resolution.y * 4
    }

    /// Render frame into `buffer`, 4 bytes (RGBA) per pixel, row after row.
    ///
    /// Buffer is cleared first, pixels with no hit stay transparent.
    pub fn render_to_buffer(
        &self,
        basis: &ViewBasis,
        config: &RenderConfig,
        quality: RenderQuality,
        buffer: &mut [u8],
    ) -> Result<(), RenderError> {
        let expected = self.buffer_len();
        if expected == 0 {
            return Err(RenderError::Resolution);
        }
        if buffer.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                actual: buffer.len(),
            });
        }

        let step = self.render_options.ray_step(quality);
        if !step.is_finite() || step <= 0.0 {
            return Err(RenderError::SampleStep(step));
        }

        buffer.fill(0);

        if config.front.mode == RenderMode::Slice {
            self.render_slice(basis, buffer);
        } else {
            self.render_rays(basis, config, step, buffer);
        }

        log::debug!(
            "Frame done, front {:?} back {:?} plane {} step {}",
            config.front.mode,
            config.back.mode,
            config.cutting_plane.enabled,
            step
        );

        Ok(())
    }

    /// Integer centre of the volume, slice plane goes through it
    fn slice_center(&self) -> Vector3<f32> {
        self.volume.get_size().map(|v| (v / 2) as f32)
    }

    /// Origin of ray for pixel `(i, j)`.
    /// Image plane is centred on the volume and moved half a diagonal towards the viewer.
    fn ray_origin(&self, basis: &ViewBasis, i: usize, j: usize) -> Point3<f32> {
        let center = self.volume.get_bound_box().center().coords;
        let plane_center = basis.view * (self.volume.diagonal() / 2.0) + center;
        self.pixel_coord(basis, &plane_center, i, j)
    }

    /// Point of pixel `(i, j)` on the image plane through `center`
    fn pixel_coord(
        &self,
        basis: &ViewBasis,
        center: &Vector3<f32>,
        i: usize,
        j: usize,
    ) -> Point3<f32> {
        let res = self.resolution;
        let di = i as f32 - (res.x / 2) as f32;
        let dj = j as f32 - (res.y / 2) as f32;

        Point3::from(basis.right * di + basis.up * dj + center)
    }

    /// Plane through volume centre, grey is intensity relative to volume maximum
    fn render_slice(&self, basis: &ViewBasis, buffer: &mut [u8]) {
        let sampler = self.sampler();
        let center = self.slice_center();
        let max = self.volume.max() as f32;

        self.render_rows(buffer, |i, j| {
            let pos = self.pixel_coord(basis, &center, i, j);
            let value = sampler.voxel_trilinear(&pos);

            let grey = if max > 0.0 { value as f32 / max } else { 0.0 };
            let opacity = if value > 0 { 1.0 } else { 0.0 };
            color::mono(grey, opacity)
        });
    }

    fn render_rays(&self, basis: &ViewBasis, config: &RenderConfig, step: f32, buffer: &mut [u8]) {
        let compositor = RayCompositor::new(self.sampler(), step);
        let bound_box = self.volume.get_bound_box();
        let direction = basis.ray_direction();

        self.render_rows(buffer, |i, j| {
            let origin = self.ray_origin(basis, i, j);
            let ray = Ray::new(origin, direction);

            match bound_box.entry_exit(&ray) {
                Some(segment) => compositor.trace(config.side_for(&segment.entry), &segment),
                None => color::zero(),
            }
        });
    }

    /// Call `pixel` for every pixel and write result to `buffer`.
    /// Rows are processed in parallel if enabled.
    fn render_rows<F>(&self, buffer: &mut [u8], pixel: F)
    where
        F: Fn(usize, usize) -> RGBA + Sync,
    {
        let row_len = self.resolution.x * 4;

        let render_row = |(j, row): (usize, &mut [u8])| {
            for (i, out) in row.chunks_exact_mut(4).enumerate() {
                let color = pixel(i, j);
                out.copy_from_slice(&color::to_bytes(&color));
            }
        };

        if self.render_options.multi_thread {
            buffer.par_chunks_mut(row_len).enumerate().for_each(&render_row);
        } else {
            buffer.chunks_mut(row_len).enumerate().for_each(&render_row);
        }
    }
}
