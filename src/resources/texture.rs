//! Texture loading and creation

use super::*;
use std::path::PathBuf;

/// Texture loaded from a file, identified by its path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureDesc {
    pub path: PathBuf,
}

impl TextureDesc {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn fingerprint(&self) -> Fingerprint {
        let fingerprint = Fingerprint::of_path(&self.path);
        assert!(
            !fingerprint.is_none(),
            "texture path '{}' hashes to the reserved no-dedup fingerprint",
            self.path.display()
        );
        fingerprint
    }
}

/// Texture created from caller-provided pixels
#[derive(Debug, Clone, Copy)]
pub struct DataTextureDesc<'a> {
    pub debug_name: &'a str,
    pub width: u32,
    pub height: u32,
    pub layers: u32,
    pub format: ImageFormat,
    pub data: &'a [u8],
}

impl DataTextureDesc<'_> {
    fn validate(&self) {
        assert!(
            self.width > 0 && self.height > 0 && self.layers > 0,
            "data texture '{}' has an empty extent ({}x{}x{})",
            self.debug_name,
            self.width,
            self.height,
            self.layers
        );
        assert!(
            self.format != ImageFormat::Unknown,
            "data texture '{}' has no format",
            self.debug_name
        );
        let expected = self.width as usize
            * self.height as usize
            * self.layers as usize
            * self.format.texel_size();
        assert_eq!(
            self.data.len(),
            expected,
            "data texture '{}' expects {} bytes of pixel data",
            self.debug_name,
            expected
        );
    }
}

/// Where the placeholder texture comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderTexture {
    /// Load a file through the configured codec
    File(PathBuf),
    /// A 1x1 texture of one color
    SolidColor([u8; 4]),
    /// A checkerboard with 8 pixel cells
    Checkerboard {
        size: u32,
        primary: [u8; 4],
        secondary: [u8; 4],
    },
}

impl Default for PlaceholderTexture {
    fn default() -> Self {
        PlaceholderTexture::Checkerboard {
            size: 64,
            primary: [255, 0, 255, 255],
            secondary: [0, 0, 0, 255],
        }
    }
}

impl<B: Backend> GpuResources<B> {
    /// Load a texture from a file, or return the handle it was loaded under before.
    ///
    /// A cache hit does no decoding and no backend work.
    pub fn load_texture(&mut self, backend: &mut B, desc: &TextureDesc) -> ResourceResult<TextureHandle> {
        let fingerprint = desc.fingerprint();
        if let Some(&handle) = self.texture_index.get(&fingerprint) {
            log::debug!("Texture cache hit for '{}'", desc.path.display());
            return Ok(handle);
        }

        self.textures.ensure_capacity();
        let decoded = self
            .codec
            .decode(&desc.path)
            .map_err(|source| ResourceError::Decode {
                path: desc.path.display().to_string(),
                source,
            })?;

        let name = desc.path.display().to_string();
        let handle = self.insert_texture(backend, &name, &decoded, fingerprint)?;
        self.texture_index.insert(fingerprint, handle);
        Ok(handle)
    }

    /// Create a texture from raw pixels. Never deduplicated.
    ///
    /// # Panics
    ///
    /// Panics if the extent is empty, the format is unknown, or the pixel
    /// buffer length does not match the extent.
    pub fn create_data_texture(
        &mut self,
        backend: &mut B,
        desc: &DataTextureDesc<'_>,
    ) -> ResourceResult<TextureHandle> {
        desc.validate();
        self.textures.ensure_capacity();

        let object = backend
            .create_texture(&TextureCreateInfo {
                debug_name: desc.debug_name,
                width: desc.width,
                height: desc.height,
                layers: desc.layers,
                format: desc.format,
                pixels: desc.data,
            })
            .map_err(backend_error("texture", desc.debug_name))?;

        log::info!(
            "Created data texture '{}' ({}x{}x{})",
            desc.debug_name,
            desc.width,
            desc.height,
            desc.layers
        );
        Ok(self
            .textures
            .allocate(ResourceRecord::created(object, desc.debug_name)))
    }

    pub(super) fn load_placeholder(
        &mut self,
        backend: &mut B,
        placeholder: &PlaceholderTexture,
    ) -> ResourceResult<TextureHandle> {
        match placeholder {
            PlaceholderTexture::File(path) => self.load_texture(backend, &TextureDesc::new(path.clone())),
            PlaceholderTexture::SolidColor(color) => self.insert_texture(
                backend,
                "placeholder",
                &DecodedTexture::solid_color(*color),
                Fingerprint::NONE,
            ),
            PlaceholderTexture::Checkerboard {
                size,
                primary,
                secondary,
            } => {
                assert!(*size > 0, "checkerboard placeholder needs a non-zero size");
                self.insert_texture(
                    backend,
                    "placeholder",
                    &DecodedTexture::checkerboard(*size, *primary, *secondary),
                    Fingerprint::NONE,
                )
            }
        }
    }

    fn insert_texture(
        &mut self,
        backend: &mut B,
        name: &str,
        decoded: &DecodedTexture,
        fingerprint: Fingerprint,
    ) -> ResourceResult<TextureHandle> {
        self.textures.ensure_capacity();
        let object = backend
            .create_texture(&TextureCreateInfo {
                debug_name: name,
                width: decoded.width,
                height: decoded.height,
                layers: decoded.layers,
                format: decoded.format,
                pixels: &decoded.pixels,
            })
            .map_err(backend_error("texture", name))?;

        log::info!("Loaded texture '{}' ({}x{})", name, decoded.width, decoded.height);
        Ok(self.textures.allocate(ResourceRecord {
            object,
            debug_name: name.to_string(),
            fingerprint,
        }))
    }
}
