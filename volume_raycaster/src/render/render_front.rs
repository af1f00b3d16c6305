use std::{sync::Arc, thread::JoinHandle};

use crossbeam::channel::{Receiver, Sender};
use parking_lot::{Mutex, RwLock};

use crate::camera::ViewBasis;

use super::ConfigHandle;

/// Requests for a background renderer.
///
/// Requests are queued, next one is taken when current frame is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererMessage {
    /// Render frame with the fine sample step
    StartRendering,
    /// Render frame with the coarse sample step
    StartRenderingFast,
    /// Leave the loop, thread can be joined afterwards
    ShutDown,
}

/// Renderer living in a worker thread, controlled by [`RendererFront`].
pub trait RenderThread {
    /// Frame buffer shared with the front
    fn get_shared_buffer(&self) -> Arc<Mutex<Vec<u8>>>;

    /// Current view, read at the start of every frame
    fn get_camera(&self) -> Arc<RwLock<ViewBasis>>;

    fn get_config(&self) -> ConfigHandle;

    /// Spawn the worker thread.
    /// Nothing is rendered until a request arrives.
    fn start(self) -> JoinHandle<()>;

    fn set_communication(&mut self, communication: (Sender<()>, Receiver<RendererMessage>));
}

/// Owner side of a [`RenderThread`].
///
/// Front without a running renderer is inactive and ignores requests.
pub struct RendererFront {
    handle: Option<JoinHandle<()>>,
    buffer: Option<Arc<Mutex<Vec<u8>>>>,
    camera: Option<Arc<RwLock<ViewBasis>>>,
    config: Option<ConfigHandle>,
    communication_in: (Sender<RendererMessage>, Receiver<RendererMessage>),
    communication_out: (Sender<()>, Receiver<()>),
}

impl RendererFront {
    /// Front with no renderer
    pub fn new() -> Self {
        let communication_in = crossbeam::channel::bounded(100); // requests
        let communication_out = crossbeam::channel::unbounded(); // finished frames
        Self {
            handle: None,
            buffer: None,
            camera: None,
            config: None,
            communication_in,
            communication_out,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Queue request `msg`.
    ///
    /// `false` if no renderer is running or the channel is closed.
    pub fn send_message(&self, msg: RendererMessage) -> bool {
        if !self.is_active() {
            log::warn!("No renderer running, {:?} ignored", msg);
            return false;
        }
        self.communication_in.0.send(msg).is_ok()
    }

    /// Block until next frame is done.
    /// Inactive front returns `false` without waiting.
    pub fn receive_message(&self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.communication_out.1.recv().is_ok()
    }

    /// Frame buffer of running renderer
    pub fn get_buffer_handle(&self) -> Option<Arc<Mutex<Vec<u8>>>> {
        self.buffer.as_ref().cloned()
    }

    /// View of running renderer
    pub fn get_camera_handle(&self) -> Option<Arc<RwLock<ViewBasis>>> {
        self.camera.as_ref().cloned()
    }

    /// Configuration of running renderer
    pub fn get_config_handle(&self) -> Option<ConfigHandle> {
        self.config.as_ref().cloned()
    }

    /// Hand `renderer` its channels and spawn it.
    ///
    /// Running renderer is stopped first.
    pub fn start_rendering<R: RenderThread>(&mut self, mut renderer: R) {
        if self.is_active() {
            log::info!("Shutting down current renderer");
            self.finish();
        }

        let communication = (
            self.communication_out.0.clone(),
            self.communication_in.1.clone(),
        );
        renderer.set_communication(communication);
        self.buffer = Some(renderer.get_shared_buffer());
        self.camera = Some(renderer.get_camera());
        self.config = Some(renderer.get_config());
        self.handle = Some(renderer.start()); // waits for StartRendering message
    }

    /// Stop renderer and join its thread.
    /// Front becomes inactive.
    pub fn finish(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.communication_in.0.send(RendererMessage::ShutDown);
            if handle.join().is_err() {
                log::error!("Render thread panicked");
            }
            // Notifications of the old renderer
            while self.communication_out.1.try_recv().is_ok() {}
        }
        self.buffer = None;
        self.camera = None;
        self.config = None;
    }
}

impl Default for RendererFront {
    fn default() -> Self {
        Self::new()
    }
}
