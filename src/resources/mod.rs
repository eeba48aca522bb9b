//! Resource cache and loader
//!
//! [`GpuResources`] owns one [`HandleRegistry`] per resource kind and is the
//! only owner of backend objects. Callers hold handles. Loaded textures are
//! deduplicated by [`Fingerprint`]; everything else is created fresh on
//! every call.
//!
//! Not safe for concurrent mutation: create and load from a single resource
//! owner thread. Shared references may be read from anywhere.

mod codec;
mod constant_buffer;
mod fingerprint;
mod texture;
mod texture_array;

pub use codec::*;
pub use constant_buffer::*;
pub use fingerprint::*;
pub use texture::*;
pub use texture_array::*;

use crate::backend::*;
use crate::handle::*;
use crate::registry::HandleRegistry;
use std::collections::HashMap;
use thiserror::Error;

/// Resource acquisition failure
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Failed to decode texture '{path}': {source}")]
    Decode { path: String, source: CodecError },
    #[error("Backend failed to create {kind} '{name}': {source}")]
    Backend {
        kind: &'static str,
        name: String,
        source: BackendError,
    },
}

pub type ResourceResult<T> = Result<T, ResourceError>;

/// A registry entry: the backend object plus bookkeeping
#[derive(Debug)]
pub struct ResourceRecord<T> {
    pub object: T,
    pub debug_name: String,
    /// [`Fingerprint::NONE`] unless the resource was loaded from a file
    pub fingerprint: Fingerprint,
}

impl<T> ResourceRecord<T> {
    fn created(object: T, debug_name: &str) -> Self {
        Self {
            object,
            debug_name: debug_name.to_string(),
            fingerprint: Fingerprint::NONE,
        }
    }
}

fn backend_error(kind: &'static str, name: &str) -> impl FnOnce(BackendError) -> ResourceError {
    let name = name.to_string();
    move |source| ResourceError::Backend { kind, name, source }
}

/// All GPU resources of one backend
pub struct GpuResources<B: Backend> {
    codec: Box<dyn TextureCodec>,
    placeholder: TextureHandle,

    images: HandleRegistry<ImageHandle, ResourceRecord<B::Image>>,
    depth_images: HandleRegistry<DepthImageHandle, ResourceRecord<B::DepthImage>>,
    textures: HandleRegistry<TextureHandle, ResourceRecord<B::Texture>>,
    /// Loaded textures by fingerprint
    texture_index: HashMap<Fingerprint, TextureHandle>,
    texture_arrays: HandleRegistry<TextureArrayHandle, TextureArray<B>>,
    samplers: HandleRegistry<SamplerHandle, ResourceRecord<B::Sampler>>,
    buffers: HandleRegistry<BufferHandle, ResourceRecord<B::Buffer>>,
    models: HandleRegistry<ModelHandle, ResourceRecord<B::Model>>,
    graphics_pipelines: HandleRegistry<GraphicsPipelineHandle, ResourceRecord<B::GraphicsPipeline>>,
    compute_pipelines: HandleRegistry<ComputePipelineHandle, ResourceRecord<B::ComputePipeline>>,
}

impl<B: Backend> GpuResources<B> {
    /// Create the resource context and load the placeholder texture.
    ///
    /// # Panics
    ///
    /// Panics if the placeholder cannot be created; nothing can run without it.
    pub fn new(
        backend: &mut B,
        placeholder: &PlaceholderTexture,
        codec: Box<dyn TextureCodec>,
    ) -> Self {
        match Self::try_new(backend, placeholder, codec) {
            Ok(resources) => resources,
            Err(err) => {
                log::error!("Placeholder texture {:?} unavailable: {}", placeholder, err);
                panic!("failed to load placeholder texture: {err}");
            }
        }
    }

    /// Fallible variant of [`new`](Self::new).
    pub fn try_new(
        backend: &mut B,
        placeholder: &PlaceholderTexture,
        codec: Box<dyn TextureCodec>,
    ) -> ResourceResult<Self> {
        let mut resources = Self {
            codec,
            placeholder: TextureHandle::INVALID,
            images: HandleRegistry::new(),
            depth_images: HandleRegistry::new(),
            textures: HandleRegistry::new(),
            texture_index: HashMap::new(),
            texture_arrays: HandleRegistry::new(),
            samplers: HandleRegistry::new(),
            buffers: HandleRegistry::new(),
            models: HandleRegistry::new(),
            graphics_pipelines: HandleRegistry::new(),
            compute_pipelines: HandleRegistry::new(),
        };
        resources.placeholder = resources.load_placeholder(backend, placeholder)?;
        log::info!(
            "GpuResources initialized on {} (placeholder {:?})",
            backend.name(),
            placeholder
        );
        Ok(resources)
    }

    /// The texture pre-bound into unused texture array slots
    pub fn placeholder(&self) -> TextureHandle {
        self.placeholder
    }

    // Creation of non-deduplicated resources

    /// Create a color render target
    pub fn create_image(&mut self, backend: &mut B, desc: &ImageDesc) -> ResourceResult<ImageHandle> {
        self.images.ensure_capacity();
        let object = backend
            .create_image(desc)
            .map_err(backend_error("image", &desc.debug_name))?;
        log::info!("Created image '{}'", desc.debug_name);
        Ok(self.images.allocate(ResourceRecord::created(object, &desc.debug_name)))
    }

    /// Create a depth/stencil render target
    pub fn create_depth_image(
        &mut self,
        backend: &mut B,
        desc: &DepthImageDesc,
    ) -> ResourceResult<DepthImageHandle> {
        self.depth_images.ensure_capacity();
        let object = backend
            .create_depth_image(desc)
            .map_err(backend_error("depth image", &desc.debug_name))?;
        log::info!("Created depth image '{}'", desc.debug_name);
        Ok(self
            .depth_images
            .allocate(ResourceRecord::created(object, &desc.debug_name)))
    }

    pub fn create_sampler(
        &mut self,
        backend: &mut B,
        desc: &SamplerDesc,
    ) -> ResourceResult<SamplerHandle> {
        self.samplers.ensure_capacity();
        let object = backend
            .create_sampler(desc)
            .map_err(backend_error("sampler", &desc.debug_name))?;
        Ok(self
            .samplers
            .allocate(ResourceRecord::created(object, &desc.debug_name)))
    }

    pub fn create_buffer(&mut self, backend: &mut B, desc: &BufferDesc) -> ResourceResult<BufferHandle> {
        assert!(desc.size > 0, "buffer '{}' has zero size", desc.debug_name);
        self.buffers.ensure_capacity();
        let object = backend
            .create_buffer(desc)
            .map_err(backend_error("buffer", &desc.debug_name))?;
        Ok(self
            .buffers
            .allocate(ResourceRecord::created(object, &desc.debug_name)))
    }

    /// Write bytes into a buffer created by [`create_buffer`](Self::create_buffer)
    pub fn write_buffer(&self, backend: &mut B, buffer: BufferHandle, offset: u64, data: &[u8]) {
        assert!(buffer.is_valid(), "write to an invalid buffer handle");
        backend.write_buffer(&self.buffers.resolve(buffer).object, offset, data);
    }

    /// Upload a model's vertex and index data
    pub fn create_model(&mut self, backend: &mut B, desc: &ModelDesc) -> ResourceResult<ModelHandle> {
        assert!(
            !desc.vertices.is_empty() && desc.vertex_stride > 0,
            "model '{}' has no vertices",
            desc.debug_name
        );
        self.models.ensure_capacity();
        let object = backend
            .create_model(desc)
            .map_err(backend_error("model", &desc.debug_name))?;
        log::info!(
            "Created model '{}' ({} vertices, {} indices)",
            desc.debug_name,
            desc.vertex_count(),
            desc.indices.len()
        );
        Ok(self
            .models
            .allocate(ResourceRecord::created(object, &desc.debug_name)))
    }

    pub fn create_graphics_pipeline(
        &mut self,
        backend: &mut B,
        desc: &GraphicsPipelineDesc,
    ) -> ResourceResult<GraphicsPipelineHandle> {
        self.graphics_pipelines.ensure_capacity();
        let object = backend
            .create_graphics_pipeline(desc)
            .map_err(backend_error("graphics pipeline", &desc.debug_name))?;
        Ok(self
            .graphics_pipelines
            .allocate(ResourceRecord::created(object, &desc.debug_name)))
    }

    pub fn create_compute_pipeline(
        &mut self,
        backend: &mut B,
        desc: &ComputePipelineDesc,
    ) -> ResourceResult<ComputePipelineHandle> {
        self.compute_pipelines.ensure_capacity();
        let object = backend
            .create_compute_pipeline(desc)
            .map_err(backend_error("compute pipeline", &desc.debug_name))?;
        Ok(self
            .compute_pipelines
            .allocate(ResourceRecord::created(object, &desc.debug_name)))
    }

    // Lookup

    pub fn image(&self, handle: ImageHandle) -> &ResourceRecord<B::Image> {
        self.images.resolve(handle)
    }

    pub fn depth_image(&self, handle: DepthImageHandle) -> &ResourceRecord<B::DepthImage> {
        self.depth_images.resolve(handle)
    }

    pub fn texture(&self, handle: TextureHandle) -> &ResourceRecord<B::Texture> {
        self.textures.resolve(handle)
    }

    pub fn texture_array(&self, handle: TextureArrayHandle) -> &TextureArray<B> {
        self.texture_arrays.resolve(handle)
    }

    pub fn sampler(&self, handle: SamplerHandle) -> &ResourceRecord<B::Sampler> {
        self.samplers.resolve(handle)
    }

    pub fn buffer(&self, handle: BufferHandle) -> &ResourceRecord<B::Buffer> {
        self.buffers.resolve(handle)
    }

    pub fn model(&self, handle: ModelHandle) -> &ResourceRecord<B::Model> {
        self.models.resolve(handle)
    }

    pub fn graphics_pipeline(&self, handle: GraphicsPipelineHandle) -> &ResourceRecord<B::GraphicsPipeline> {
        self.graphics_pipelines.resolve(handle)
    }

    pub fn compute_pipeline(&self, handle: ComputePipelineHandle) -> &ResourceRecord<B::ComputePipeline> {
        self.compute_pipelines.resolve(handle)
    }

    // Counts

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn depth_image_count(&self) -> usize {
        self.depth_images.len()
    }

    /// Number of textures, the placeholder included
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn texture_array_count(&self) -> usize {
        self.texture_arrays.len()
    }

    pub fn sampler_count(&self) -> usize {
        self.samplers.len()
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn graphics_pipeline_count(&self) -> usize {
        self.graphics_pipelines.len()
    }

    pub fn compute_pipeline_count(&self) -> usize {
        self.compute_pipelines.len()
    }
}

impl<B: Backend> std::fmt::Debug for GpuResources<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuResources")
            .field("images", &self.images.len())
            .field("depth_images", &self.depth_images.len())
            .field("textures", &self.textures.len())
            .field("texture_arrays", &self.texture_arrays.len())
            .field("samplers", &self.samplers.len())
            .field("buffers", &self.buffers.len())
            .field("models", &self.models.len())
            .field("graphics_pipelines", &self.graphics_pipelines.len())
            .field("compute_pipelines", &self.compute_pipelines.len())
            .finish()
    }
}
