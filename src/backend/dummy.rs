//! Dummy backend for testing and headless tooling
//!
//! No native API is touched. Every created object is a small record carrying
//! its creation order, and every translated command is appended to a call
//! trace that tests can inspect.

use super::*;
use glam::{Vec3, Vec4};

/// Texture created by [`DummyBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DummyTexture {
    pub id: u32,
    pub debug_name: String,
    pub width: u32,
    pub height: u32,
    pub layers: u32,
    pub format: ImageFormat,
}

/// Binding table created by [`DummyBackend`]
///
/// `slots[i]` is the id of the texture bound at index `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DummyBindingTable {
    pub id: u32,
    pub debug_name: String,
    pub slots: Vec<u32>,
}

/// Any other object created by [`DummyBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DummyObject {
    pub id: u32,
    pub debug_name: String,
}

/// A translated command as seen by [`DummyBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    BeginStream(CommandStreamId),
    EndStream(CommandStreamId),
    ClearImage { image: u32, color: Vec4 },
    ClearDepthImage { image: u32, flags: DepthClearFlags, depth: f32, stencil: u8 },
    Draw { model: u32 },
    DrawBindless { num_vertices: u32, num_instances: u32 },
    DrawIndexedBindless { model: u32, num_indices: u32, num_instances: u32 },
    Dispatch { x: u32, y: u32, z: u32 },
    PushMarker { name: String },
    PopMarker,
    BeginPipeline { pipeline: u32 },
    EndPipeline { pipeline: u32 },
    SetComputePipeline { pipeline: u32 },
    SetViewport(Viewport),
    SetScissorRect(ScissorRect),
    SetConstantBuffer { slot: u32, buffer: u32 },
    SetStorageBuffer { slot: u32, buffer: u32 },
    SetSampler { slot: u32, sampler: u32 },
    SetTexture { slot: u32, texture: u32 },
    SetTextureArray { slot: u32, table: u32 },
    SetVertexBuffer { slot: u32, model: u32 },
    SetIndexBuffer { model: u32 },
}

/// Creation counters of [`DummyBackend`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DummyStats {
    pub images: u32,
    pub depth_images: u32,
    pub textures: u32,
    pub binding_tables: u32,
    pub binding_writes: u32,
    pub samplers: u32,
    pub buffers: u32,
    pub buffer_bytes_written: u64,
    pub models: u32,
    pub graphics_pipelines: u32,
    pub compute_pipelines: u32,
    pub command_streams: u32,
}

/// Dummy GPU backend
#[derive(Debug, Default)]
pub struct DummyBackend {
    stats: DummyStats,
    calls: Vec<BackendCall>,
    open_stream: Option<CommandStreamId>,
    fail_next_creation: bool,
}

impl DummyBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creation counters so far
    pub fn stats(&self) -> DummyStats {
        self.stats
    }

    /// Every translated command so far, in arrival order
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Drain the call trace
    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }

    /// Make the next resource creation call fail with a backend error
    pub fn fail_next_creation(&mut self) {
        self.fail_next_creation = true;
    }

    fn check_creation(&mut self, what: &str, name: &str) -> BackendResult<()> {
        if std::mem::take(&mut self.fail_next_creation) {
            log::trace!("DummyBackend: failing creation of {} '{}'", what, name);
            return Err(BackendError::InvalidParameter(format!(
                "{what} '{name}' rejected by dummy backend"
            )));
        }
        Ok(())
    }

    fn record(&mut self, stream: CommandStreamId, call: BackendCall) {
        debug_assert_eq!(
            self.open_stream,
            Some(stream),
            "command translated outside of its command stream"
        );
        log::trace!("DummyBackend: {:?}", call);
        self.calls.push(call);
    }
}

fn object(id: u32, debug_name: &str) -> DummyObject {
    DummyObject {
        id,
        debug_name: debug_name.to_string(),
    }
}

impl Backend for DummyBackend {
    type Image = DummyObject;
    type DepthImage = DummyObject;
    type Texture = DummyTexture;
    type BindingTable = DummyBindingTable;
    type Sampler = DummyObject;
    type Buffer = DummyObject;
    type Model = DummyObject;
    type GraphicsPipeline = DummyObject;
    type ComputePipeline = DummyObject;

    fn name(&self) -> &'static str {
        "Dummy Backend"
    }

    fn create_image(&mut self, desc: &ImageDesc) -> BackendResult<Self::Image> {
        self.check_creation("image", &desc.debug_name)?;
        log::trace!(
            "DummyBackend: creating image '{}' ({}x{})",
            desc.debug_name,
            desc.dimensions.x,
            desc.dimensions.y
        );
        self.stats.images += 1;
        Ok(object(self.stats.images - 1, &desc.debug_name))
    }

    fn create_depth_image(&mut self, desc: &DepthImageDesc) -> BackendResult<Self::DepthImage> {
        self.check_creation("depth image", &desc.debug_name)?;
        log::trace!("DummyBackend: creating depth image '{}'", desc.debug_name);
        self.stats.depth_images += 1;
        Ok(object(self.stats.depth_images - 1, &desc.debug_name))
    }

    fn create_texture(&mut self, info: &TextureCreateInfo<'_>) -> BackendResult<Self::Texture> {
        self.check_creation("texture", info.debug_name)?;
        log::trace!(
            "DummyBackend: creating texture '{}' ({}x{}x{}, {} bytes)",
            info.debug_name,
            info.width,
            info.height,
            info.layers,
            info.pixels.len()
        );
        self.stats.textures += 1;
        Ok(DummyTexture {
            id: self.stats.textures - 1,
            debug_name: info.debug_name.to_string(),
            width: info.width,
            height: info.height,
            layers: info.layers,
            format: info.format,
        })
    }

    fn create_binding_table(
        &mut self,
        debug_name: &str,
        capacity: u32,
        placeholder: &Self::Texture,
    ) -> BackendResult<Self::BindingTable> {
        self.check_creation("binding table", debug_name)?;
        log::trace!(
            "DummyBackend: creating binding table '{}' with {} slots",
            debug_name,
            capacity
        );
        self.stats.binding_tables += 1;
        Ok(DummyBindingTable {
            id: self.stats.binding_tables - 1,
            debug_name: debug_name.to_string(),
            slots: vec![placeholder.id; capacity as usize],
        })
    }

    fn write_binding(&mut self, table: &mut Self::BindingTable, index: u32, texture: &Self::Texture) {
        log::trace!(
            "DummyBackend: binding texture {} at '{}'[{}]",
            texture.id,
            table.debug_name,
            index
        );
        self.stats.binding_writes += 1;
        table.slots[index as usize] = texture.id;
    }

    fn create_sampler(&mut self, desc: &SamplerDesc) -> BackendResult<Self::Sampler> {
        self.check_creation("sampler", &desc.debug_name)?;
        self.stats.samplers += 1;
        Ok(object(self.stats.samplers - 1, &desc.debug_name))
    }

    fn create_buffer(&mut self, desc: &BufferDesc) -> BackendResult<Self::Buffer> {
        self.check_creation("buffer", &desc.debug_name)?;
        log::trace!(
            "DummyBackend: creating buffer '{}' (size: {})",
            desc.debug_name,
            desc.size
        );
        self.stats.buffers += 1;
        Ok(object(self.stats.buffers - 1, &desc.debug_name))
    }

    fn write_buffer(&mut self, buffer: &Self::Buffer, offset: u64, data: &[u8]) {
        log::trace!(
            "DummyBackend: write_buffer '{}' offset={} len={}",
            buffer.debug_name,
            offset,
            data.len()
        );
        self.stats.buffer_bytes_written += data.len() as u64;
    }

    fn create_model(&mut self, desc: &ModelDesc) -> BackendResult<Self::Model> {
        self.check_creation("model", &desc.debug_name)?;
        self.stats.models += 1;
        Ok(object(self.stats.models - 1, &desc.debug_name))
    }

    fn create_graphics_pipeline(
        &mut self,
        desc: &GraphicsPipelineDesc,
    ) -> BackendResult<Self::GraphicsPipeline> {
        self.check_creation("graphics pipeline", &desc.debug_name)?;
        self.stats.graphics_pipelines += 1;
        Ok(object(self.stats.graphics_pipelines - 1, &desc.debug_name))
    }

    fn create_compute_pipeline(
        &mut self,
        desc: &ComputePipelineDesc,
    ) -> BackendResult<Self::ComputePipeline> {
        self.check_creation("compute pipeline", &desc.debug_name)?;
        self.stats.compute_pipelines += 1;
        Ok(object(self.stats.compute_pipelines - 1, &desc.debug_name))
    }

    fn begin_command_stream(&mut self) -> CommandStreamId {
        assert!(
            self.open_stream.is_none(),
            "DummyBackend: command stream already open"
        );
        let stream = CommandStreamId(self.stats.command_streams as u64);
        self.stats.command_streams += 1;
        self.open_stream = Some(stream);
        log::trace!("DummyBackend: begin command stream {:?}", stream);
        self.calls.push(BackendCall::BeginStream(stream));
        stream
    }

    fn end_command_stream(&mut self, stream: CommandStreamId) {
        self.record(stream, BackendCall::EndStream(stream));
        self.open_stream = None;
    }

    fn clear_image(&mut self, stream: CommandStreamId, image: &Self::Image, color: Vec4) {
        self.record(stream, BackendCall::ClearImage { image: image.id, color });
    }

    fn clear_depth_image(
        &mut self,
        stream: CommandStreamId,
        image: &Self::DepthImage,
        flags: DepthClearFlags,
        depth: f32,
        stencil: u8,
    ) {
        self.record(
            stream,
            BackendCall::ClearDepthImage {
                image: image.id,
                flags,
                depth,
                stencil,
            },
        );
    }

    fn draw(&mut self, stream: CommandStreamId, model: &Self::Model) {
        self.record(stream, BackendCall::Draw { model: model.id });
    }

    fn draw_bindless(&mut self, stream: CommandStreamId, num_vertices: u32, num_instances: u32) {
        self.record(
            stream,
            BackendCall::DrawBindless {
                num_vertices,
                num_instances,
            },
        );
    }

    fn draw_indexed_bindless(
        &mut self,
        stream: CommandStreamId,
        model: &Self::Model,
        num_indices: u32,
        num_instances: u32,
    ) {
        self.record(
            stream,
            BackendCall::DrawIndexedBindless {
                model: model.id,
                num_indices,
                num_instances,
            },
        );
    }

    fn dispatch(&mut self, stream: CommandStreamId, x: u32, y: u32, z: u32) {
        self.record(stream, BackendCall::Dispatch { x, y, z });
    }

    fn push_marker(&mut self, stream: CommandStreamId, name: &str, _color: Vec3) {
        self.record(
            stream,
            BackendCall::PushMarker {
                name: name.to_string(),
            },
        );
    }

    fn pop_marker(&mut self, stream: CommandStreamId) {
        self.record(stream, BackendCall::PopMarker);
    }

    fn begin_pipeline(&mut self, stream: CommandStreamId, pipeline: &Self::GraphicsPipeline) {
        self.record(stream, BackendCall::BeginPipeline { pipeline: pipeline.id });
    }

    fn end_pipeline(&mut self, stream: CommandStreamId, pipeline: &Self::GraphicsPipeline) {
        self.record(stream, BackendCall::EndPipeline { pipeline: pipeline.id });
    }

    fn set_compute_pipeline(&mut self, stream: CommandStreamId, pipeline: &Self::ComputePipeline) {
        self.record(
            stream,
            BackendCall::SetComputePipeline {
                pipeline: pipeline.id,
            },
        );
    }

    fn set_viewport(&mut self, stream: CommandStreamId, viewport: Viewport) {
        self.record(stream, BackendCall::SetViewport(viewport));
    }

    fn set_scissor_rect(&mut self, stream: CommandStreamId, rect: ScissorRect) {
        self.record(stream, BackendCall::SetScissorRect(rect));
    }

    fn set_constant_buffer(&mut self, stream: CommandStreamId, slot: u32, buffer: &Self::Buffer) {
        self.record(
            stream,
            BackendCall::SetConstantBuffer {
                slot,
                buffer: buffer.id,
            },
        );
    }

    fn set_storage_buffer(&mut self, stream: CommandStreamId, slot: u32, buffer: &Self::Buffer) {
        self.record(
            stream,
            BackendCall::SetStorageBuffer {
                slot,
                buffer: buffer.id,
            },
        );
    }

    fn set_sampler(&mut self, stream: CommandStreamId, slot: u32, sampler: &Self::Sampler) {
        self.record(
            stream,
            BackendCall::SetSampler {
                slot,
                sampler: sampler.id,
            },
        );
    }

    fn set_texture(&mut self, stream: CommandStreamId, slot: u32, texture: &Self::Texture) {
        self.record(
            stream,
            BackendCall::SetTexture {
                slot,
                texture: texture.id,
            },
        );
    }

    fn set_texture_array(
        &mut self,
        stream: CommandStreamId,
        slot: u32,
        table: &Self::BindingTable,
    ) {
        self.record(stream, BackendCall::SetTextureArray { slot, table: table.id });
    }

    fn set_vertex_buffer(&mut self, stream: CommandStreamId, slot: u32, model: &Self::Model) {
        self.record(
            stream,
            BackendCall::SetVertexBuffer {
                slot,
                model: model.id,
            },
        );
    }

    fn set_index_buffer(&mut self, stream: CommandStreamId, model: &Self::Model) {
        self.record(stream, BackendCall::SetIndexBuffer { model: model.id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_backend_name() {
        assert_eq!(DummyBackend::new().name(), "Dummy Backend");
    }

    #[test]
    fn test_binding_table_prefilled_with_placeholder() {
        let mut backend = DummyBackend::new();
        let pixels = [255u8; 4];
        let placeholder = backend
            .create_texture(&TextureCreateInfo {
                debug_name: "placeholder",
                width: 1,
                height: 1,
                layers: 1,
                format: ImageFormat::R8G8B8A8Unorm,
                pixels: &pixels,
            })
            .unwrap();
        let mut table = backend.create_binding_table("array", 4, &placeholder).unwrap();
        assert_eq!(table.slots, vec![placeholder.id; 4]);

        let other = backend
            .create_texture(&TextureCreateInfo {
                debug_name: "other",
                width: 1,
                height: 1,
                layers: 1,
                format: ImageFormat::R8G8B8A8Unorm,
                pixels: &pixels,
            })
            .unwrap();
        backend.write_binding(&mut table, 2, &other);
        assert_eq!(table.slots, vec![0, 0, 1, 0]);
        assert_eq!(backend.stats().binding_writes, 1);
    }

    #[test]
    fn test_fail_next_creation_applies_once() {
        let mut backend = DummyBackend::new();
        backend.fail_next_creation();
        assert!(backend.create_sampler(&SamplerDesc::default()).is_err());
        assert!(backend.create_sampler(&SamplerDesc::default()).is_ok());
        assert_eq!(backend.stats().samplers, 1);
    }

    #[test]
    fn test_stream_brackets_calls() {
        let mut backend = DummyBackend::new();
        let stream = backend.begin_command_stream();
        backend.dispatch(stream, 1, 2, 3);
        backend.end_command_stream(stream);
        assert_eq!(
            backend.calls(),
            &[
                BackendCall::BeginStream(stream),
                BackendCall::Dispatch { x: 1, y: 2, z: 3 },
                BackendCall::EndStream(stream),
            ]
        );
    }
}
