use std::{sync::Arc, thread::JoinHandle};

use crossbeam::channel::{Receiver, Sender};
use nalgebra::Vector2;
use parking_lot::{Mutex, RwLock};

use crate::{camera::ViewBasis, volumetric::Volume};

use super::{
    render_front::RenderThread, ConfigHandle, RenderOptions, RenderQuality, Renderer,
    RendererMessage,
};

/// [`Renderer`] running in its own thread.
///
/// Every frame reads the current camera and configuration snapshot.
pub struct BackgroundRenderer<V>
where
    V: Volume + 'static,
{
    renderer: Renderer<V>,
    shared_buffer: Arc<Mutex<Vec<u8>>>,
    camera: Arc<RwLock<ViewBasis>>,
    config: ConfigHandle,
    communication: (Sender<()>, Receiver<RendererMessage>),
}

impl<V> RenderThread for BackgroundRenderer<V>
where
    V: Volume + 'static,
{
    fn get_shared_buffer(&self) -> Arc<Mutex<Vec<u8>>> {
        self.shared_buffer.clone()
    }

    fn get_camera(&self) -> Arc<RwLock<ViewBasis>> {
        self.camera.clone()
    }

    fn get_config(&self) -> ConfigHandle {
        self.config.clone()
    }

    fn start(self) -> JoinHandle<()> {
        self.start_rendering()
    }

    fn set_communication(&mut self, communication: (Sender<()>, Receiver<RendererMessage>)) {
        self.communication = communication;
    }
}

impl<V> BackgroundRenderer<V>
where
    V: Volume + 'static,
{
    /// Gradients get computed here, in the calling thread
    pub fn new(
        volume: V,
        camera: Arc<RwLock<ViewBasis>>,
        config: ConfigHandle,
        render_options: RenderOptions,
    ) -> Self {
        let renderer = Renderer::new(volume, render_options);
        let buffer = Arc::new(Mutex::new(vec![0; renderer.buffer_len()]));

        // Dummy channels
        // Replaced once started
        let (sender_void, _) = crossbeam::channel::unbounded();
        let never = crossbeam::channel::never();
        let communication = (sender_void, never);

        Self {
            renderer,
            shared_buffer: buffer,
            camera,
            config,
            communication,
        }
    }

    /// Size of frames written to shared buffer
    pub fn resolution(&self) -> Vector2<usize> {
        self.renderer.resolution()
    }

    pub fn start_rendering(self) -> JoinHandle<()> {
        std::thread::spawn(move || {
            // Master loop
            loop {
                // Gather input
                let quality = match self.communication.1.recv() {
                    Ok(RendererMessage::StartRendering) => RenderQuality::Quality,
                    Ok(RendererMessage::StartRenderingFast) => RenderQuality::Fast,
                    Ok(RendererMessage::ShutDown) | Err(_) => break,
                };

                let config = self.config.snapshot();
                let basis = *self.camera.read();

                {
                    let mut buffer = self.shared_buffer.lock();
                    if let Err(e) =
                        self.renderer
                            .render_to_buffer(&basis, &config, quality, &mut buffer[..])
                    {
                        log::error!("Frame failed: {}", e);
                    }
                }

                // Send result
                if self.communication.0.send(()).is_err() {
                    break;
                }
            }
            log::debug!("Render thread finished");
        })
    }
}
