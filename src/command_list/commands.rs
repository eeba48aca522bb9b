//! Recorded command payloads
//!
//! Every payload is a plain `Default` struct (handles default to their
//! invalid sentinel) with a `dispatch` function that resolves its handles and
//! calls exactly one backend translation method. [`Command`] is the tagged
//! union of all payloads; replaying it is a single `match`, with no trait
//! objects involved.

use super::name::DebugName;
use crate::backend::*;
use crate::handle::*;
use crate::resources::GpuResources;
use glam::{Vec3, Vec4};

/// What a payload needs while it is being translated
pub struct DispatchContext<'a, B: Backend> {
    pub backend: &'a mut B,
    pub resources: &'a GpuResources<B>,
    pub stream: CommandStreamId,
}

/// A payload type that has a variant in [`Command`]
pub trait CommandPayload: Default + Into<Command> {
    /// The payload stored in `command`, if it is of this type
    fn payload_mut(command: &mut Command) -> Option<&mut Self>;
}

macro_rules! commands {
    ($($name:ident),* $(,)?) => {
        /// A recorded command
        #[derive(Debug, Clone, PartialEq)]
        pub enum Command {
            $($name($name),)*
        }

        impl Command {
            /// Translate this command into backend calls
            #[inline]
            pub fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
                match self {
                    $(Command::$name(payload) => payload.dispatch(ctx),)*
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(Command::$name(_) => stringify!($name),)*
                }
            }
        }

        $(
            impl From<$name> for Command {
                #[inline]
                fn from(payload: $name) -> Self {
                    Command::$name(payload)
                }
            }

            impl CommandPayload for $name {
                #[inline]
                fn payload_mut(command: &mut Command) -> Option<&mut Self> {
                    match command {
                        Command::$name(payload) => Some(payload),
                        _ => None,
                    }
                }
            }
        )*
    };
}

commands! {
    ClearImage,
    ClearDepthImage,
    Draw,
    DrawBindless,
    DrawIndexedBindless,
    Dispatch,
    PushMarker,
    PopMarker,
    BeginGraphicsPipeline,
    EndGraphicsPipeline,
    SetComputePipeline,
    SetViewport,
    SetScissorRect,
    SetConstantBuffer,
    SetStorageBuffer,
    SetSampler,
    SetTexture,
    SetTextureArray,
    SetVertexBuffer,
    SetIndexBuffer,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClearImage {
    pub image: ImageHandle,
    pub color: Vec4,
}

impl ClearImage {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        let image = &ctx.resources.image(self.image).object;
        ctx.backend.clear_image(ctx.stream, image, self.color);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClearDepthImage {
    pub image: DepthImageHandle,
    pub flags: DepthClearFlags,
    pub depth: f32,
    pub stencil: u8,
}

impl ClearDepthImage {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        let image = &ctx.resources.depth_image(self.image).object;
        ctx.backend
            .clear_depth_image(ctx.stream, image, self.flags, self.depth, self.stencil);
    }
}

/// Draw a whole model with its own vertex and index buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Draw {
    pub model: ModelHandle,
}

impl Draw {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        let model = &ctx.resources.model(self.model).object;
        ctx.backend.draw(ctx.stream, model);
    }
}

/// Draw without bound vertex buffers; the shader fetches its own data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawBindless {
    pub num_vertices: u32,
    pub num_instances: u32,
}

impl DrawBindless {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        ctx.backend
            .draw_bindless(ctx.stream, self.num_vertices, self.num_instances);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawIndexedBindless {
    pub model: ModelHandle,
    pub num_indices: u32,
    pub num_instances: u32,
}

impl DrawIndexedBindless {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        let model = &ctx.resources.model(self.model).object;
        ctx.backend
            .draw_indexed_bindless(ctx.stream, model, self.num_indices, self.num_instances);
    }
}

/// Compute dispatch with the given workgroup counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatch {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Dispatch {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        ctx.backend.dispatch(ctx.stream, self.x, self.y, self.z);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PushMarker {
    pub name: DebugName,
    pub color: Vec3,
}

impl PushMarker {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        ctx.backend
            .push_marker(ctx.stream, self.name.as_str(), self.color);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PopMarker;

impl PopMarker {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        ctx.backend.pop_marker(ctx.stream);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BeginGraphicsPipeline {
    pub pipeline: GraphicsPipelineHandle,
}

impl BeginGraphicsPipeline {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        let pipeline = &ctx.resources.graphics_pipeline(self.pipeline).object;
        ctx.backend.begin_pipeline(ctx.stream, pipeline);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EndGraphicsPipeline {
    pub pipeline: GraphicsPipelineHandle,
}

impl EndGraphicsPipeline {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        let pipeline = &ctx.resources.graphics_pipeline(self.pipeline).object;
        ctx.backend.end_pipeline(ctx.stream, pipeline);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetComputePipeline {
    pub pipeline: ComputePipelineHandle,
}

impl SetComputePipeline {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        let pipeline = &ctx.resources.compute_pipeline(self.pipeline).object;
        ctx.backend.set_compute_pipeline(ctx.stream, pipeline);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SetViewport {
    pub viewport: Viewport,
}

impl SetViewport {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        ctx.backend.set_viewport(ctx.stream, self.viewport);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetScissorRect {
    pub rect: ScissorRect,
}

impl SetScissorRect {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        ctx.backend.set_scissor_rect(ctx.stream, self.rect);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetConstantBuffer {
    pub slot: u32,
    pub buffer: BufferHandle,
}

impl SetConstantBuffer {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        let buffer = &ctx.resources.buffer(self.buffer).object;
        ctx.backend.set_constant_buffer(ctx.stream, self.slot, buffer);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetStorageBuffer {
    pub slot: u32,
    pub buffer: BufferHandle,
}

impl SetStorageBuffer {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        let buffer = &ctx.resources.buffer(self.buffer).object;
        ctx.backend.set_storage_buffer(ctx.stream, self.slot, buffer);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetSampler {
    pub slot: u32,
    pub sampler: SamplerHandle,
}

impl SetSampler {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        let sampler = &ctx.resources.sampler(self.sampler).object;
        ctx.backend.set_sampler(ctx.stream, self.slot, sampler);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetTexture {
    pub slot: u32,
    pub texture: TextureHandle,
}

impl SetTexture {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        let texture = &ctx.resources.texture(self.texture).object;
        ctx.backend.set_texture(ctx.stream, self.slot, texture);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetTextureArray {
    pub slot: u32,
    pub texture_array: TextureArrayHandle,
}

impl SetTextureArray {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        let table = ctx.resources.texture_array(self.texture_array).binding_table();
        ctx.backend.set_texture_array(ctx.stream, self.slot, table);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetVertexBuffer {
    pub slot: u32,
    pub model: ModelHandle,
}

impl SetVertexBuffer {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        let model = &ctx.resources.model(self.model).object;
        ctx.backend.set_vertex_buffer(ctx.stream, self.slot, model);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetIndexBuffer {
    pub model: ModelHandle,
}

impl SetIndexBuffer {
    fn dispatch<B: Backend>(&self, ctx: &mut DispatchContext<'_, B>) {
        let model = &ctx.resources.model(self.model).object;
        ctx.backend.set_index_buffer(ctx.stream, model);
    }
}
