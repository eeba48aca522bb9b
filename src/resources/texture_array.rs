//! Fixed-capacity texture arrays
//!
//! An array owns a backend binding table with one slot per element of its
//! capacity. Every slot is bound at all times: slots without a member point
//! at the placeholder texture, so the table is complete whenever it is
//! sampled. `members[i]` and `fingerprints[i]` describe slot `i`.

use super::*;

/// Texture array description
#[derive(Debug, Clone)]
pub struct TextureArrayDesc {
    pub debug_name: String,
    pub capacity: u32,
}

/// A texture array and its binding table
pub struct TextureArray<B: Backend> {
    debug_name: String,
    capacity: u32,
    members: Vec<TextureHandle>,
    fingerprints: Vec<Fingerprint>,
    binding_table: B::BindingTable,
}

impl<B: Backend> TextureArray<B> {
    pub fn debug_name(&self) -> &str {
        &self.debug_name
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity as usize
    }

    /// Member textures in insertion order
    pub fn members(&self) -> &[TextureHandle] {
        &self.members
    }

    pub fn fingerprints(&self) -> &[Fingerprint] {
        &self.fingerprints
    }

    pub fn binding_table(&self) -> &B::BindingTable {
        &self.binding_table
    }

    /// Slot of a loaded texture already in this array
    fn find(&self, fingerprint: Fingerprint) -> Option<u32> {
        if fingerprint.is_none() {
            return None;
        }
        self.fingerprints
            .iter()
            .position(|f| *f == fingerprint)
            .map(|index| index as u32)
    }
}

impl<B: Backend> std::fmt::Debug for TextureArray<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureArray")
            .field("debug_name", &self.debug_name)
            .field("capacity", &self.capacity)
            .field("members", &self.members)
            .finish_non_exhaustive()
    }
}

impl<B: Backend> GpuResources<B> {
    /// Create an empty array with every slot bound to the placeholder texture.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn create_texture_array(
        &mut self,
        backend: &mut B,
        desc: &TextureArrayDesc,
    ) -> ResourceResult<TextureArrayHandle> {
        assert!(
            desc.capacity > 0,
            "texture array '{}' needs a non-zero capacity",
            desc.debug_name
        );
        self.texture_arrays.ensure_capacity();

        let placeholder = &self.textures.resolve(self.placeholder).object;
        let binding_table = backend
            .create_binding_table(&desc.debug_name, desc.capacity, placeholder)
            .map_err(backend_error("texture array", &desc.debug_name))?;

        log::info!(
            "Created texture array '{}' with {} slots",
            desc.debug_name,
            desc.capacity
        );
        Ok(self.texture_arrays.allocate(TextureArray {
            debug_name: desc.debug_name.clone(),
            capacity: desc.capacity,
            members: Vec::with_capacity(desc.capacity as usize),
            fingerprints: Vec::with_capacity(desc.capacity as usize),
            binding_table,
        }))
    }

    /// Load a texture into an array.
    ///
    /// Returns the slot and the texture handle. If the same file is already a
    /// member of this array its existing slot is returned and the array does
    /// not grow. Otherwise the texture goes through [`load_texture`]
    /// (so it is decoded at most once across all arrays) and is appended.
    ///
    /// # Panics
    ///
    /// Panics if the array is full.
    ///
    /// [`load_texture`]: GpuResources::load_texture
    pub fn load_texture_into_array(
        &mut self,
        backend: &mut B,
        desc: &TextureDesc,
        array: TextureArrayHandle,
    ) -> ResourceResult<(u32, TextureHandle)> {
        assert!(array.is_valid(), "load into an invalid texture array handle");
        let fingerprint = desc.fingerprint();

        let entry = self.texture_arrays.resolve(array);
        if let Some(index) = entry.find(fingerprint) {
            log::debug!(
                "'{}' already in texture array '{}' at {}",
                desc.path.display(),
                entry.debug_name,
                index
            );
            return Ok((index, entry.members[index as usize]));
        }
        Self::assert_not_full(entry);

        let texture = self.load_texture(backend, desc)?;
        let index = self.append_to_array(backend, array, texture, fingerprint);
        Ok((index, texture))
    }

    /// Create a data texture and append it to an array. Never deduplicated.
    ///
    /// # Panics
    ///
    /// Panics if the array is full or the descriptor is invalid.
    pub fn create_data_texture_into_array(
        &mut self,
        backend: &mut B,
        desc: &DataTextureDesc<'_>,
        array: TextureArrayHandle,
    ) -> ResourceResult<(u32, TextureHandle)> {
        assert!(array.is_valid(), "load into an invalid texture array handle");
        Self::assert_not_full(self.texture_arrays.resolve(array));

        let texture = self.create_data_texture(backend, desc)?;
        let index = self.append_to_array(backend, array, texture, Fingerprint::NONE);
        Ok((index, texture))
    }

    fn assert_not_full(entry: &TextureArray<B>) {
        assert!(
            !entry.is_full(),
            "texture array '{}' is full ({} slots)",
            entry.debug_name,
            entry.capacity
        );
    }

    /// Append a member and rebind its slot right away.
    fn append_to_array(
        &mut self,
        backend: &mut B,
        array: TextureArrayHandle,
        texture: TextureHandle,
        fingerprint: Fingerprint,
    ) -> u32 {
        let object = &self.textures.resolve(texture).object;
        let entry = self.texture_arrays.resolve_mut(array);
        Self::assert_not_full(entry);

        let index = entry.members.len() as u32;
        entry.members.push(texture);
        entry.fingerprints.push(fingerprint);
        backend.write_binding(&mut entry.binding_table, index, object);
        index
    }
}
