//! Graphics Commands - backend-agnostic command recording and GPU resource handles
//!
//! Client code creates resources through [`GpuResources`] and refers to them
//! only by compact typed handles. Drawing and compute work is recorded into a
//! [`CommandList`] and replayed once against a [`Backend`], which translates
//! each command into native API calls.
//!
//! # Features
//! - Typed handles over per-kind arenas, no reference counting
//! - Fingerprint-deduplicated texture loading and fixed-capacity texture arrays
//! - Statically dispatched command replay, one `match` per command
//! - Render passes with a declare/record lifecycle and balanced debug markers
//! - A recording [`DummyBackend`] for tests and headless tooling
//!
//! # Example
//!
//! ```ignore
//! let mut renderer = Renderer::new(DummyBackend::new(), RendererConfig::default());
//! let albedo = renderer.load_texture(&TextureDesc::new("textures/albedo.png"))?;
//!
//! let mut graph = RenderGraph::new();
//! graph.add_render_pass("Opaque", albedo, |_, _| true, |albedo, list| {
//!     list.set_texture(0, *albedo);
//!     list.draw_bindless(3, 1);
//! });
//! renderer.render(&mut graph);
//! ```

pub mod backend;
pub mod command_list;
pub mod handle;
pub mod registry;
pub mod render_graph;
pub mod renderer;
pub mod resources;

pub use backend::{Backend, BackendError, BackendResult, DummyBackend};
pub use command_list::{Command, CommandList, DebugName};
pub use handle::*;
pub use registry::HandleRegistry;
pub use render_graph::{Pass, RenderGraph, RenderGraphBuilder, RenderPass};
pub use renderer::Renderer;
pub use resources::{GpuResources, PlaceholderTexture, ResourceError, ResourceResult};

/// Configuration for creating a [`Renderer`]
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Texture bound into texture array slots that have no member yet
    pub placeholder: PlaceholderTexture,
    /// Initial capacity of command lists from [`Renderer::create_command_list`]
    pub command_list_capacity: usize,
    /// Number of frames the CPU may record ahead of the GPU
    pub frames_in_flight: usize,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            placeholder: PlaceholderTexture::default(),
            command_list_capacity: 256,
            frames_in_flight: 2,
        }
    }
}
