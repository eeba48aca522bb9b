//! Plain value types shared between the recording side and backends

use bitflags::bitflags;
use glam::{UVec2, Vec3, Vec4};

/// Identifier of an open native command stream, issued by
/// [`Backend::begin_command_stream`](super::Backend::begin_command_stream).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandStreamId(pub u64);

/// Pixel formats for images and textures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    #[default]
    Unknown,
    R32G32B32A32Float,
    R32G32B32A32Uint,
    R32G32B32A32Sint,
    R16G16B16A16Float,
    R16G16B16A16Unorm,
    R32G32Float,
    R32G32Uint,
    R10G10B10A2Unorm,
    R11G11B10Float,
    R8G8B8A8Unorm,
    R8G8B8A8UnormSrgb,
    R8G8B8A8Uint,
    R8G8B8A8Snorm,
    R16G16Float,
    R16G16Unorm,
    R32Float,
    R32Uint,
    R8G8Unorm,
    R16Float,
    R16Unorm,
    R8Unorm,
    R8Uint,
}

impl ImageFormat {
    /// Size of one texel in bytes, `0` for [`ImageFormat::Unknown`].
    pub fn texel_size(&self) -> usize {
        match self {
            ImageFormat::Unknown => 0,
            ImageFormat::R32G32B32A32Float
            | ImageFormat::R32G32B32A32Uint
            | ImageFormat::R32G32B32A32Sint => 16,
            ImageFormat::R16G16B16A16Float
            | ImageFormat::R16G16B16A16Unorm
            | ImageFormat::R32G32Float
            | ImageFormat::R32G32Uint => 8,
            ImageFormat::R10G10B10A2Unorm
            | ImageFormat::R11G11B10Float
            | ImageFormat::R8G8B8A8Unorm
            | ImageFormat::R8G8B8A8UnormSrgb
            | ImageFormat::R8G8B8A8Uint
            | ImageFormat::R8G8B8A8Snorm
            | ImageFormat::R16G16Float
            | ImageFormat::R16G16Unorm
            | ImageFormat::R32Float
            | ImageFormat::R32Uint => 4,
            ImageFormat::R8G8Unorm | ImageFormat::R16Float | ImageFormat::R16Unorm => 2,
            ImageFormat::R8Unorm | ImageFormat::R8Uint => 1,
        }
    }
}

/// Depth/stencil formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DepthImageFormat {
    #[default]
    D32Float,
    D32FloatS8Uint,
    D24UnormS8Uint,
    D16Unorm,
}

impl DepthImageFormat {
    pub fn has_stencil(&self) -> bool {
        matches!(
            self,
            DepthImageFormat::D32FloatS8Uint | DepthImageFormat::D24UnormS8Uint
        )
    }
}

/// Multisample count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleCount {
    #[default]
    X1,
    X2,
    X4,
    X8,
}

impl SampleCount {
    pub fn count(&self) -> u32 {
        match self {
            SampleCount::X1 => 1,
            SampleCount::X2 => 2,
            SampleCount::X4 => 4,
            SampleCount::X8 => 8,
        }
    }
}

bitflags! {
    /// Which aspects of a depth image a clear touches
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DepthClearFlags: u8 {
        const DEPTH = 1 << 0;
        const STENCIL = 1 << 1;
        const BOTH = Self::DEPTH.bits() | Self::STENCIL.bits();
    }
}

/// Viewport rectangle and depth range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub top_left_x: f32,
    pub top_left_y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            top_left_x: 0.0,
            top_left_y: 0.0,
            width: 0.0,
            height: 0.0,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// Scissor rectangle in pixels, edges inclusive-exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScissorRect {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

/// Parameters handed to [`Backend::create_texture`](super::Backend::create_texture)
#[derive(Debug, Clone, Copy)]
pub struct TextureCreateInfo<'a> {
    pub debug_name: &'a str,
    pub width: u32,
    pub height: u32,
    pub layers: u32,
    pub format: ImageFormat,
    pub pixels: &'a [u8],
}

/// Color render target description
#[derive(Debug, Clone)]
pub struct ImageDesc {
    pub debug_name: String,
    pub dimensions: UVec2,
    pub depth: u32,
    pub format: ImageFormat,
    pub sample_count: SampleCount,
    pub clear_color: Vec4,
}

impl Default for ImageDesc {
    fn default() -> Self {
        Self {
            debug_name: String::new(),
            dimensions: UVec2::ZERO,
            depth: 1,
            format: ImageFormat::Unknown,
            sample_count: SampleCount::X1,
            clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

/// Depth/stencil render target description
#[derive(Debug, Clone)]
pub struct DepthImageDesc {
    pub debug_name: String,
    pub dimensions: UVec2,
    pub format: DepthImageFormat,
    pub sample_count: SampleCount,
    pub depth_clear_value: f32,
    pub stencil_clear_value: u8,
}

impl Default for DepthImageDesc {
    fn default() -> Self {
        Self {
            debug_name: String::new(),
            dimensions: UVec2::ZERO,
            format: DepthImageFormat::D32Float,
            sample_count: SampleCount::X1,
            depth_clear_value: 1.0,
            stencil_clear_value: 0,
        }
    }
}

/// Texture filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    Nearest,
    #[default]
    Linear,
}

/// Texture addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressMode {
    #[default]
    Repeat,
    MirrorRepeat,
    ClampToEdge,
}

/// Sampler description
#[derive(Debug, Clone, Default)]
pub struct SamplerDesc {
    pub debug_name: String,
    pub filter: FilterMode,
    pub address_mode: AddressMode,
}

/// How a buffer is bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferKind {
    #[default]
    Constant,
    Storage,
}

/// GPU buffer description
#[derive(Debug, Clone, Default)]
pub struct BufferDesc {
    pub debug_name: String,
    pub size: u64,
    pub kind: BufferKind,
}

/// Model description: raw vertex and index data
///
/// Vertex layout interpretation belongs to the pipeline; this core only
/// uploads the bytes.
#[derive(Debug, Clone, Default)]
pub struct ModelDesc {
    pub debug_name: String,
    pub vertices: Vec<u8>,
    pub vertex_stride: u32,
    pub indices: Vec<u32>,
}

impl ModelDesc {
    pub fn vertex_count(&self) -> u32 {
        if self.vertex_stride == 0 {
            0
        } else {
            (self.vertices.len() / self.vertex_stride as usize) as u32
        }
    }
}

/// Graphics pipeline description (opaque to this core)
#[derive(Debug, Clone, Default)]
pub struct GraphicsPipelineDesc {
    pub debug_name: String,
    pub vertex_shader: String,
    pub pixel_shader: Option<String>,
    pub render_targets: Vec<ImageFormat>,
    pub depth_format: Option<DepthImageFormat>,
}

/// Compute pipeline description (opaque to this core)
#[derive(Debug, Clone, Default)]
pub struct ComputePipelineDesc {
    pub debug_name: String,
    pub compute_shader: String,
}

/// Default marker color of render passes
pub const PASS_MARKER_COLOR: Vec3 = Vec3::new(0.0, 0.4, 0.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texel_sizes() {
        assert_eq!(ImageFormat::R8G8B8A8Unorm.texel_size(), 4);
        assert_eq!(ImageFormat::R32G32B32A32Float.texel_size(), 16);
        assert_eq!(ImageFormat::R8Unorm.texel_size(), 1);
        assert_eq!(ImageFormat::Unknown.texel_size(), 0);
    }

    #[test]
    fn test_depth_clear_flags() {
        assert!(DepthClearFlags::BOTH.contains(DepthClearFlags::DEPTH));
        assert!(DepthClearFlags::BOTH.contains(DepthClearFlags::STENCIL));
        assert!(!DepthClearFlags::DEPTH.contains(DepthClearFlags::STENCIL));
    }

    #[test]
    fn test_model_vertex_count() {
        let desc = ModelDesc {
            vertices: vec![0; 36],
            vertex_stride: 12,
            ..Default::default()
        };
        assert_eq!(desc.vertex_count(), 3);
        assert_eq!(ModelDesc::default().vertex_count(), 0);
    }
}
