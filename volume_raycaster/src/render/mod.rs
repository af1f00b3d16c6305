//! Rendering
//!
//! [`Renderer`] renders one frame synchronously.
//! [`RendererFront`] drives a [`BackgroundRenderer`] in its own thread.

mod compositor;
mod render_config;
mod render_front;
mod render_options;
mod render_thread;
mod renderer;
mod shading;

pub use compositor::{blend_over, RayCompositor};
pub use render_config::{ConfigHandle, CuttingPlane, RenderConfig, RenderMode, SideConfig};
pub use render_front::{RenderThread, RendererFront, RendererMessage};
pub use render_options::{RenderOptions, RenderOptionsBuilder, RenderQuality};
pub use render_thread::BackgroundRenderer;
pub use renderer::Renderer;
pub use shading::PhongShading;
