//! Deferred command recording
//!
//! A [`CommandList`] is filled on one thread and replayed against a backend
//! exactly once. Recording only validates arguments and appends a payload;
//! all backend work happens in [`CommandList::execute`].
//!
//! # Example
//!
//! ```ignore
//! let mut list = CommandList::new();
//! list.push_marker("Opaque", Vec3::ONE);
//! list.begin_pipeline(pipeline);
//! list.set_vertex_buffer(0, model);
//! list.draw(model);
//! list.end_pipeline(pipeline);
//! list.pop_marker();
//! list.execute(&mut backend, &resources);
//! ```

mod commands;
mod name;

pub use commands::*;
pub use name::*;

use crate::backend::*;
use crate::handle::*;
use crate::resources::GpuResources;
use glam::{Vec3, Vec4};

/// An append-only list of recorded commands
#[derive(Debug, Default)]
pub struct CommandList {
    commands: Vec<Command>,
    marker_scope: u32,
    executed: bool,
}

static_assertions::assert_impl_all!(CommandList: Send, Sync);
static_assertions::assert_impl_all!(GpuResources<DummyBackend>: Sync);

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list with room for `capacity` commands
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Append a default payload of type `C` and return it for filling in.
    ///
    /// No validation happens here; prefer the typed wrappers below.
    pub fn add_command<C: CommandPayload>(&mut self) -> &mut C {
        assert!(
            !self.executed,
            "recording into a command list that was already executed; reset it first"
        );
        self.commands.push(C::default().into());
        match self.commands.last_mut().and_then(C::payload_mut) {
            Some(payload) => payload,
            None => unreachable!("payload type does not match its command variant"),
        }
    }

    /// Replay every command in recording order, bracketed by one backend
    /// command stream.
    ///
    /// # Panics
    ///
    /// Panics if a marker is still open or the list was already executed.
    pub fn execute<B: Backend>(&mut self, backend: &mut B, resources: &GpuResources<B>) {
        assert_eq!(
            self.marker_scope, 0,
            "command list executed with {} unbalanced marker(s)",
            self.marker_scope
        );
        assert!(
            !self.executed,
            "command list executed twice without a reset"
        );
        self.executed = true;

        let stream = backend.begin_command_stream();
        let mut ctx = DispatchContext {
            backend,
            resources,
            stream,
        };
        for command in &self.commands {
            command.dispatch(&mut ctx);
        }
        ctx.backend.end_command_stream(stream);
    }

    /// Drop all recorded commands, keeping the allocation
    pub fn reset(&mut self) {
        self.commands.clear();
        self.marker_scope = 0;
        self.executed = false;
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of markers pushed but not yet popped
    pub fn marker_depth(&self) -> u32 {
        self.marker_scope
    }

    pub fn is_executed(&self) -> bool {
        self.executed
    }

    /// The recorded commands in order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    // Clears

    pub fn clear_image(&mut self, image: ImageHandle, color: Vec4) {
        let command = self.add_command::<ClearImage>();
        command.image = image;
        command.color = color;
    }

    pub fn clear_depth_image(
        &mut self,
        image: DepthImageHandle,
        flags: DepthClearFlags,
        depth: f32,
        stencil: u8,
    ) {
        let command = self.add_command::<ClearDepthImage>();
        command.image = image;
        command.flags = flags;
        command.depth = depth;
        command.stencil = stencil;
    }

    // Draws

    /// # Panics
    ///
    /// Panics if `model` is the invalid handle.
    pub fn draw(&mut self, model: ModelHandle) {
        assert!(model.is_valid(), "draw with an invalid model handle");
        self.add_command::<Draw>().model = model;
    }

    /// # Panics
    ///
    /// Panics if either count is zero.
    pub fn draw_bindless(&mut self, num_vertices: u32, num_instances: u32) {
        assert!(num_vertices > 0, "bindless draw with zero vertices");
        assert!(num_instances > 0, "bindless draw with zero instances");
        let command = self.add_command::<DrawBindless>();
        command.num_vertices = num_vertices;
        command.num_instances = num_instances;
    }

    /// # Panics
    ///
    /// Panics if `model` is the invalid handle or either count is zero.
    pub fn draw_indexed_bindless(&mut self, model: ModelHandle, num_indices: u32, num_instances: u32) {
        assert!(model.is_valid(), "indexed draw with an invalid model handle");
        assert!(num_indices > 0, "indexed draw with zero indices");
        assert!(num_instances > 0, "indexed draw with zero instances");
        let command = self.add_command::<DrawIndexedBindless>();
        command.model = model;
        command.num_indices = num_indices;
        command.num_instances = num_instances;
    }

    /// # Panics
    ///
    /// Panics if any workgroup count is zero.
    pub fn dispatch(&mut self, x: u32, y: u32, z: u32) {
        assert!(
            x > 0 && y > 0 && z > 0,
            "dispatch with an empty workgroup count ({x}, {y}, {z})"
        );
        let command = self.add_command::<Dispatch>();
        command.x = x;
        command.y = y;
        command.z = z;
    }

    // Debug markers

    /// Open a named debug scope.
    ///
    /// # Panics
    ///
    /// Panics if `name` is longer than [`MAX_DEBUG_NAME_LEN`] or not ASCII.
    pub fn push_marker(&mut self, name: &str, color: Vec3) {
        let name = DebugName::new(name);
        let command = self.add_command::<PushMarker>();
        command.name = name;
        command.color = color;
        self.marker_scope += 1;
    }

    /// Close the innermost debug scope.
    ///
    /// # Panics
    ///
    /// Panics if no marker is open.
    pub fn pop_marker(&mut self) {
        assert!(self.marker_scope > 0, "pop_marker without a matching push_marker");
        self.add_command::<PopMarker>();
        self.marker_scope -= 1;
    }

    // Pipeline state

    pub fn begin_pipeline(&mut self, pipeline: GraphicsPipelineHandle) {
        self.add_command::<BeginGraphicsPipeline>().pipeline = pipeline;
    }

    pub fn end_pipeline(&mut self, pipeline: GraphicsPipelineHandle) {
        self.add_command::<EndGraphicsPipeline>().pipeline = pipeline;
    }

    pub fn set_compute_pipeline(&mut self, pipeline: ComputePipelineHandle) {
        self.add_command::<SetComputePipeline>().pipeline = pipeline;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.add_command::<SetViewport>().viewport = viewport;
    }

    pub fn set_scissor_rect(&mut self, rect: ScissorRect) {
        self.add_command::<SetScissorRect>().rect = rect;
    }

    // Bindings

    pub fn set_constant_buffer(&mut self, slot: u32, buffer: BufferHandle) {
        let command = self.add_command::<SetConstantBuffer>();
        command.slot = slot;
        command.buffer = buffer;
    }

    pub fn set_storage_buffer(&mut self, slot: u32, buffer: BufferHandle) {
        let command = self.add_command::<SetStorageBuffer>();
        command.slot = slot;
        command.buffer = buffer;
    }

    pub fn set_sampler(&mut self, slot: u32, sampler: SamplerHandle) {
        let command = self.add_command::<SetSampler>();
        command.slot = slot;
        command.sampler = sampler;
    }

    pub fn set_texture(&mut self, slot: u32, texture: TextureHandle) {
        let command = self.add_command::<SetTexture>();
        command.slot = slot;
        command.texture = texture;
    }

    pub fn set_texture_array(&mut self, slot: u32, texture_array: TextureArrayHandle) {
        let command = self.add_command::<SetTextureArray>();
        command.slot = slot;
        command.texture_array = texture_array;
    }

    pub fn set_vertex_buffer(&mut self, slot: u32, model: ModelHandle) {
        let command = self.add_command::<SetVertexBuffer>();
        command.slot = slot;
        command.model = model;
    }

    pub fn set_index_buffer(&mut self, model: ModelHandle) {
        self.add_command::<SetIndexBuffer>().model = model;
    }
}
