//! Strongly typed resource handles
//!
//! A handle is a compact index into the registry of one resource kind. Handles
//! of different kinds are distinct types, so a texture handle can never be
//! passed where an image handle is expected. The maximum value of the raw
//! integer is reserved as the invalid sentinel.

use std::fmt::Debug;
use std::hash::Hash;

/// Common interface of every handle newtype.
///
/// Only equality, hashing and validity checks are meaningful on a handle.
/// `from_index` and `index` exist for the registry that issues them and for
/// backends that need the slot number (e.g. bindless indices).
pub trait ResourceHandle: Copy + Eq + Hash + Debug + 'static {
    /// Human readable kind name used in diagnostics.
    const KIND: &'static str;

    /// The reserved "none" value.
    const INVALID: Self;

    /// Number of distinct valid handles the raw width can represent.
    const CAPACITY: usize;

    /// Build a handle from a registry slot.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit below the invalid sentinel.
    fn from_index(index: usize) -> Self;

    /// Registry slot of this handle.
    fn index(self) -> usize;

    /// Whether this is anything but the sentinel.
    fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident($raw:ty), $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name($raw);

        impl $name {
            /// The invalid sentinel.
            pub const INVALID: Self = Self(<$raw>::MAX);

            /// Raw integer value.
            pub fn raw(self) -> $raw {
                self.0
            }

            /// Whether this is anything but the sentinel.
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl $crate::handle::ResourceHandle for $name {
            const KIND: &'static str = $kind;
            const INVALID: Self = Self(<$raw>::MAX);
            const CAPACITY: usize = <$raw>::MAX as usize;

            fn from_index(index: usize) -> Self {
                assert!(
                    index < Self::CAPACITY,
                    "{} index {} does not fit in {}",
                    $kind,
                    index,
                    stringify!($raw)
                );
                Self(index as $raw)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

#[cfg(test)]
pub(crate) use define_handle;

define_handle!(
    /// Handle to a color render target image
    ImageHandle(u16),
    "image"
);

define_handle!(
    /// Handle to a depth/stencil render target image
    DepthImageHandle(u16),
    "depth image"
);

define_handle!(
    /// Handle to a sampled texture (loaded from file or created from data)
    TextureHandle(u32),
    "texture"
);

define_handle!(
    /// Handle to a fixed-capacity texture array and its binding table
    TextureArrayHandle(u16),
    "texture array"
);

define_handle!(
    /// Handle to a sampler
    SamplerHandle(u16),
    "sampler"
);

define_handle!(
    /// Handle to a GPU buffer
    BufferHandle(u32),
    "buffer"
);

define_handle!(
    /// Handle to a model (vertex and index data)
    ModelHandle(u32),
    "model"
);

define_handle!(
    /// Handle to a graphics pipeline
    GraphicsPipelineHandle(u16),
    "graphics pipeline"
);

define_handle!(
    /// Handle to a compute pipeline
    ComputePipelineHandle(u16),
    "compute pipeline"
);
