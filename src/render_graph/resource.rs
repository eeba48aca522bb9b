//! Resources a pass can declare usage of

use crate::handle::*;

/// Any resource handle a pass can read or write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphResource {
    Image(ImageHandle),
    DepthImage(DepthImageHandle),
    Texture(TextureHandle),
    TextureArray(TextureArrayHandle),
    Buffer(BufferHandle),
}

impl GraphResource {
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Image(handle) => handle.is_valid(),
            Self::DepthImage(handle) => handle.is_valid(),
            Self::Texture(handle) => handle.is_valid(),
            Self::TextureArray(handle) => handle.is_valid(),
            Self::Buffer(handle) => handle.is_valid(),
        }
    }
}

impl From<ImageHandle> for GraphResource {
    fn from(handle: ImageHandle) -> Self {
        Self::Image(handle)
    }
}

impl From<DepthImageHandle> for GraphResource {
    fn from(handle: DepthImageHandle) -> Self {
        Self::DepthImage(handle)
    }
}

impl From<TextureHandle> for GraphResource {
    fn from(handle: TextureHandle) -> Self {
        Self::Texture(handle)
    }
}

impl From<TextureArrayHandle> for GraphResource {
    fn from(handle: TextureArrayHandle) -> Self {
        Self::TextureArray(handle)
    }
}

impl From<BufferHandle> for GraphResource {
    fn from(handle: BufferHandle) -> Self {
        Self::Buffer(handle)
    }
}

/// Resource access type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Read,
    Write,
}

/// One declared access of a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceAccess {
    pub resource: GraphResource,
    pub access: Access,
}
