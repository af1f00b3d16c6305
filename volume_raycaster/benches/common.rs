pub use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub use volume_raycaster::{
    render::{RenderConfig, RenderMode, RenderOptions, RenderQuality, Renderer},
    test_helpers,
    volumetric::{LinearVolume, Volume},
    ViewBasis,
};

pub const VOLUME_SIDE: usize = 128;

pub fn get_volume() -> LinearVolume {
    test_helpers::sphere_volume(VOLUME_SIDE, 50.0, 200)
}

pub fn get_renderer(multi_thread: bool) -> Renderer<LinearVolume> {
    let volume = get_volume();
    let render_options = RenderOptions::builder()
        .fit_volume(volume.get_size())
        .multi_thread(multi_thread)
        .build_unchecked();
    Renderer::new(volume, render_options)
}
