//! Shared fixtures for the integration tests.
//!
//! Everything runs against [`DummyBackend`], with an in-memory codec so no
//! texture files are needed.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use graphics_commands::backend::{DummyBackend, ImageFormat};
use graphics_commands::resources::{
    CodecError, DecodedTexture, GpuResources, PlaceholderTexture, TextureCodec,
};

/// Install a test logger once per binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Codec serving textures from a map and counting decode calls.
#[derive(Clone, Default)]
pub struct FakeCodec {
    files: HashMap<PathBuf, DecodedTexture>,
    decodes: Arc<AtomicUsize>,
}

impl FakeCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a 2x2 texture filled with `color` under `path`.
    pub fn with_file(self, path: &str, color: [u8; 4]) -> Self {
        self.with_path(PathBuf::from(path), color)
    }

    /// Register a 2x2 texture under an arbitrary, possibly non-UTF-8, path.
    pub fn with_path(mut self, path: PathBuf, color: [u8; 4]) -> Self {
        self.files.insert(
            path,
            DecodedTexture {
                width: 2,
                height: 2,
                layers: 1,
                format: ImageFormat::R8G8B8A8Unorm,
                pixels: color.repeat(4),
            },
        );
        self
    }

    /// Shared decode counter, still readable after the codec is boxed.
    pub fn decode_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.decodes)
    }
}

impl TextureCodec for FakeCodec {
    fn decode(&self, path: &Path) -> Result<DecodedTexture, CodecError> {
        self.decodes.fetch_add(1, Ordering::SeqCst);
        self.files.get(path).cloned().ok_or_else(|| {
            CodecError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            ))
        })
    }
}

/// Backend plus resources, ready for use.
pub struct TestContext {
    pub backend: DummyBackend,
    pub resources: GpuResources<DummyBackend>,
    pub decodes: Arc<AtomicUsize>,
}

impl TestContext {
    pub fn new(codec: FakeCodec) -> Self {
        init_logging();
        let mut backend = DummyBackend::new();
        let decodes = codec.decode_counter();
        let resources = GpuResources::new(
            &mut backend,
            &PlaceholderTexture::SolidColor([255, 0, 255, 255]),
            Box::new(codec),
        );
        Self {
            backend,
            resources,
            decodes,
        }
    }

    /// Texture objects created by the backend, the placeholder included.
    pub fn backend_textures(&self) -> u32 {
        self.backend.stats().textures
    }

    /// Decode calls made through the context's codec.
    pub fn decode_count(&self) -> usize {
        self.decodes.load(Ordering::SeqCst)
    }
}

/// Codec with a handful of known files.
pub fn standard_codec() -> FakeCodec {
    FakeCodec::new()
        .with_file("textures/grass.png", [0, 255, 0, 255])
        .with_file("textures/dirt.png", [120, 80, 40, 255])
        .with_file("textures/rock.png", [128, 128, 128, 255])
        .with_file("textures/snow.png", [255, 255, 255, 255])
}
