//! Renderer facade: one backend plus the resources created on it

use crate::backend::*;
use crate::command_list::CommandList;
use crate::handle::*;
use crate::render_graph::RenderGraph;
use crate::resources::*;
use crate::RendererConfig;
use bytemuck::Pod;

/// Owns a backend and its [`GpuResources`] and threads both through every call
pub struct Renderer<B: Backend> {
    backend: B,
    resources: GpuResources<B>,
    config: RendererConfig,
    frame_index: u64,
}

impl<B: Backend> Renderer<B> {
    /// Create a renderer decoding textures with [`ImageCodec`].
    ///
    /// # Panics
    ///
    /// Panics if the configured placeholder texture cannot be created.
    pub fn new(backend: B, config: RendererConfig) -> Self {
        Self::with_codec(backend, config, Box::new(ImageCodec))
    }

    /// # Panics
    ///
    /// Panics if the configured placeholder texture cannot be created.
    pub fn with_codec(mut backend: B, config: RendererConfig, codec: Box<dyn TextureCodec>) -> Self {
        assert!(config.frames_in_flight > 0, "renderer needs at least one frame in flight");
        let resources = GpuResources::new(&mut backend, &config.placeholder, codec);
        log::info!(
            "Renderer started on {} with {} frame(s) in flight",
            backend.name(),
            config.frames_in_flight
        );
        Self {
            backend,
            resources,
            config,
            frame_index: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn resources(&self) -> &GpuResources<B> {
        &self.resources
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Number of graphs rendered so far
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Frame-in-flight slot of the current frame
    pub fn frame_in_flight(&self) -> usize {
        (self.frame_index % self.config.frames_in_flight as u64) as usize
    }

    // Resources

    pub fn load_texture(&mut self, desc: &TextureDesc) -> ResourceResult<TextureHandle> {
        self.resources.load_texture(&mut self.backend, desc)
    }

    pub fn create_data_texture(&mut self, desc: &DataTextureDesc<'_>) -> ResourceResult<TextureHandle> {
        self.resources.create_data_texture(&mut self.backend, desc)
    }

    pub fn create_texture_array(&mut self, desc: &TextureArrayDesc) -> ResourceResult<TextureArrayHandle> {
        self.resources.create_texture_array(&mut self.backend, desc)
    }

    pub fn load_texture_into_array(
        &mut self,
        desc: &TextureDesc,
        array: TextureArrayHandle,
    ) -> ResourceResult<(u32, TextureHandle)> {
        self.resources
            .load_texture_into_array(&mut self.backend, desc, array)
    }

    pub fn create_data_texture_into_array(
        &mut self,
        desc: &DataTextureDesc<'_>,
        array: TextureArrayHandle,
    ) -> ResourceResult<(u32, TextureHandle)> {
        self.resources
            .create_data_texture_into_array(&mut self.backend, desc, array)
    }

    pub fn create_image(&mut self, desc: &ImageDesc) -> ResourceResult<ImageHandle> {
        self.resources.create_image(&mut self.backend, desc)
    }

    pub fn create_depth_image(&mut self, desc: &DepthImageDesc) -> ResourceResult<DepthImageHandle> {
        self.resources.create_depth_image(&mut self.backend, desc)
    }

    pub fn create_sampler(&mut self, desc: &SamplerDesc) -> ResourceResult<SamplerHandle> {
        self.resources.create_sampler(&mut self.backend, desc)
    }

    pub fn create_buffer(&mut self, desc: &BufferDesc) -> ResourceResult<BufferHandle> {
        self.resources.create_buffer(&mut self.backend, desc)
    }

    pub fn write_buffer(&mut self, buffer: BufferHandle, offset: u64, data: &[u8]) {
        self.resources
            .write_buffer(&mut self.backend, buffer, offset, data);
    }

    pub fn create_model(&mut self, desc: &ModelDesc) -> ResourceResult<ModelHandle> {
        self.resources.create_model(&mut self.backend, desc)
    }

    pub fn create_graphics_pipeline(
        &mut self,
        desc: &GraphicsPipelineDesc,
    ) -> ResourceResult<GraphicsPipelineHandle> {
        self.resources
            .create_graphics_pipeline(&mut self.backend, desc)
    }

    pub fn create_compute_pipeline(
        &mut self,
        desc: &ComputePipelineDesc,
    ) -> ResourceResult<ComputePipelineHandle> {
        self.resources
            .create_compute_pipeline(&mut self.backend, desc)
    }

    /// Create a constant buffer with one backing buffer per configured frame in flight
    pub fn create_constant_buffer<T: Pod>(
        &mut self,
        debug_name: &str,
        value: T,
    ) -> ResourceResult<ConstantBuffer<T>> {
        self.resources.create_constant_buffer(
            &mut self.backend,
            debug_name,
            self.config.frames_in_flight,
            value,
        )
    }

    /// Upload a constant buffer's value for the current frame in flight
    pub fn apply_constant_buffer<T: Pod>(&mut self, buffer: &ConstantBuffer<T>) {
        let frame = self.frame_in_flight();
        buffer.apply(&self.resources, &mut self.backend, frame);
    }

    // Recording and submission

    /// An empty command list sized from the configuration
    pub fn create_command_list(&self) -> CommandList {
        CommandList::with_capacity(self.config.command_list_capacity)
    }

    /// Replay `list` against the backend
    pub fn execute(&mut self, list: &mut CommandList) {
        list.execute(&mut self.backend, &self.resources);
    }

    /// Run one frame of `graph`: setup, record into a fresh list, replay,
    /// then release the pass callbacks.
    pub fn render(&mut self, graph: &mut RenderGraph) {
        graph.setup();

        let mut list = self.create_command_list();
        graph.execute(&mut list);
        self.execute(&mut list);

        graph.deinit();
        self.frame_index += 1;
    }
}

impl<B: Backend> std::fmt::Debug for Renderer<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("backend", &self.backend.name())
            .field("resources", &self.resources)
            .field("frame_index", &self.frame_index)
            .finish()
    }
}
