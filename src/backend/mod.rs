//! Backend abstraction layer
//!
//! The [`Backend`] trait is the boundary to a native graphics API. It exposes
//! two groups of primitives:
//!
//! - resource creation, called by [`GpuResources`](crate::resources::GpuResources)
//!   on the resource owner thread
//! - command translation, called by
//!   [`CommandList::execute`](crate::command_list::CommandList::execute) between
//!   a `begin_command_stream`/`end_command_stream` pair
//!
//! Every native object is an associated type, so command replay is
//! monomorphized per backend and never goes through a vtable.

pub mod dummy;
pub mod error;
pub mod types;

pub use dummy::*;
pub use error::*;
pub use types::*;

use glam::{Vec3, Vec4};

/// A native graphics backend
pub trait Backend: Sized {
    type Image;
    type DepthImage;
    type Texture;
    /// Backend-side table mapping array indices to bound textures
    type BindingTable;
    type Sampler;
    type Buffer;
    type Model;
    type GraphicsPipeline;
    type ComputePipeline;

    /// Backend name for diagnostics
    fn name(&self) -> &'static str;

    // Resource creation

    /// Create a color render target
    fn create_image(&mut self, desc: &ImageDesc) -> BackendResult<Self::Image>;

    /// Create a depth/stencil render target
    fn create_depth_image(&mut self, desc: &DepthImageDesc) -> BackendResult<Self::DepthImage>;

    /// Create a sampled texture and upload its pixels
    fn create_texture(&mut self, info: &TextureCreateInfo<'_>) -> BackendResult<Self::Texture>;

    /// Create a binding table of `capacity` slots, every slot bound to `placeholder`
    fn create_binding_table(
        &mut self,
        debug_name: &str,
        capacity: u32,
        placeholder: &Self::Texture,
    ) -> BackendResult<Self::BindingTable>;

    /// Rebind one slot of a binding table
    fn write_binding(&mut self, table: &mut Self::BindingTable, index: u32, texture: &Self::Texture);

    /// Create a sampler
    fn create_sampler(&mut self, desc: &SamplerDesc) -> BackendResult<Self::Sampler>;

    /// Create a buffer
    fn create_buffer(&mut self, desc: &BufferDesc) -> BackendResult<Self::Buffer>;

    /// Write bytes into a buffer
    fn write_buffer(&mut self, buffer: &Self::Buffer, offset: u64, data: &[u8]);

    /// Create a model from vertex and index data
    fn create_model(&mut self, desc: &ModelDesc) -> BackendResult<Self::Model>;

    /// Create a graphics pipeline
    fn create_graphics_pipeline(
        &mut self,
        desc: &GraphicsPipelineDesc,
    ) -> BackendResult<Self::GraphicsPipeline>;

    /// Create a compute pipeline
    fn create_compute_pipeline(
        &mut self,
        desc: &ComputePipelineDesc,
    ) -> BackendResult<Self::ComputePipeline>;

    // Command streams

    /// Open a native command stream
    fn begin_command_stream(&mut self) -> CommandStreamId;

    /// Close and submit a native command stream
    fn end_command_stream(&mut self, stream: CommandStreamId);

    // Command translation

    fn clear_image(&mut self, stream: CommandStreamId, image: &Self::Image, color: Vec4);

    fn clear_depth_image(
        &mut self,
        stream: CommandStreamId,
        image: &Self::DepthImage,
        flags: DepthClearFlags,
        depth: f32,
        stencil: u8,
    );

    fn draw(&mut self, stream: CommandStreamId, model: &Self::Model);

    fn draw_bindless(&mut self, stream: CommandStreamId, num_vertices: u32, num_instances: u32);

    fn draw_indexed_bindless(
        &mut self,
        stream: CommandStreamId,
        model: &Self::Model,
        num_indices: u32,
        num_instances: u32,
    );

    fn dispatch(&mut self, stream: CommandStreamId, x: u32, y: u32, z: u32);

    fn push_marker(&mut self, stream: CommandStreamId, name: &str, color: Vec3);

    fn pop_marker(&mut self, stream: CommandStreamId);

    fn begin_pipeline(&mut self, stream: CommandStreamId, pipeline: &Self::GraphicsPipeline);

    fn end_pipeline(&mut self, stream: CommandStreamId, pipeline: &Self::GraphicsPipeline);

    fn set_compute_pipeline(&mut self, stream: CommandStreamId, pipeline: &Self::ComputePipeline);

    fn set_viewport(&mut self, stream: CommandStreamId, viewport: Viewport);

    fn set_scissor_rect(&mut self, stream: CommandStreamId, rect: ScissorRect);

    fn set_constant_buffer(&mut self, stream: CommandStreamId, slot: u32, buffer: &Self::Buffer);

    fn set_storage_buffer(&mut self, stream: CommandStreamId, slot: u32, buffer: &Self::Buffer);

    fn set_sampler(&mut self, stream: CommandStreamId, slot: u32, sampler: &Self::Sampler);

    fn set_texture(&mut self, stream: CommandStreamId, slot: u32, texture: &Self::Texture);

    fn set_texture_array(
        &mut self,
        stream: CommandStreamId,
        slot: u32,
        table: &Self::BindingTable,
    );

    fn set_vertex_buffer(&mut self, stream: CommandStreamId, slot: u32, model: &Self::Model);

    fn set_index_buffer(&mut self, stream: CommandStreamId, model: &Self::Model);
}
