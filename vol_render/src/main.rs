use std::{f32::consts::PI, path::Path, sync::Arc};

use anyhow::{ensure, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::RwLock;
use volume_raycaster::{
    camera::Camera,
    render::{
        BackgroundRenderer, ConfigHandle, RenderOptions, RenderQuality, RendererFront,
        RendererMessage,
    },
    volumetric::Volume,
    TargetCamera,
};

mod args;
mod config;
mod generators;
mod output;

use crate::{
    args::get_command,
    config::Config,
    generators::generate_volume,
    output::{frame_file_name, save_frame},
};

pub fn main() {
    env_logger::init();

    let args = get_command().get_matches();

    let cfg = match Config::from_args(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    };
    log::info!("{:?}", cfg);

    if let Err(e) = run(cfg) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Generate volume and render all frames
fn run(cfg: Config) -> Result<()> {
    println!("Generating volume...");
    let volume = generate_volume(&cfg)?;

    // frame size is fitted to volume by renderer
    let render_options = RenderOptions::builder()
        .multi_thread(cfg.multi_thread)
        .build()?;

    let mut camera = TargetCamera::around(volume.get_size().cast::<f32>(), volume.diagonal());
    let render_config = cfg.render_config(&volume, &camera.view_basis());

    let camera_handle = Arc::new(RwLock::new(camera.view_basis()));
    let config_handle = ConfigHandle::new(render_config);
    let renderer = BackgroundRenderer::new(
        volume,
        camera_handle.clone(),
        config_handle,
        render_options,
    );
    let resolution = renderer.resolution();

    let mut front = RendererFront::new();
    front.start_rendering(renderer);

    let message = match cfg.quality {
        RenderQuality::Quality => RendererMessage::StartRendering,
        RenderQuality::Fast => RendererMessage::StartRenderingFast,
    };

    let progress = ProgressBar::new(cfg.frames as u64);
    progress.set_style(
        ProgressStyle::default_bar().template("{bar:40} {pos}/{len} frames [{elapsed_precise}]"),
    );

    let base_name = Path::new(&cfg.file_name);
    let turn = 2.0 * PI / cfg.frames as f32;
    let result = (0..cfg.frames).try_for_each(|index| {
        *camera_handle.write() = camera.view_basis();

        ensure!(front.send_message(message), "renderer is not running");
        ensure!(front.receive_message(), "renderer stopped");

        let buffer = front
            .get_buffer_handle()
            .context("renderer has no frame buffer")?;
        let path = frame_file_name(base_name, index, cfg.frames);
        save_frame(&path, resolution.x, resolution.y, &buffer.lock())?;

        camera.rotate(turn, 0.0);
        progress.inc(1);
        Ok(())
    });

    front.finish();
    result?;

    progress.finish_with_message("done");
    println!("Rendering finished, result in {:#?}", cfg.file_name);
    Ok(())
}
