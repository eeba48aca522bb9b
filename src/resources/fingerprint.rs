//! Content fingerprints for deduplicating loaded resources

use std::path::Path;
use xxhash_rust::xxh64::xxh64;

/// Stable 64-bit hash of a descriptor's identity fields.
///
/// [`Fingerprint::NONE`] marks resources that are never deduplicated
/// (procedurally created data textures).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub const NONE: Self = Self(0);

    /// Fingerprint of a file path, over its raw encoded bytes.
    pub fn of_path(path: &Path) -> Self {
        Self::of_bytes(path.as_os_str().as_encoded_bytes())
    }

    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(xxh64(bytes, 0))
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_path_same_fingerprint() {
        let a = Fingerprint::of_path(Path::new("textures/grass.png"));
        let b = Fingerprint::of_path(Path::new("textures/grass.png"));
        assert_eq!(a, b);
        assert!(!a.is_none());
    }

    #[test]
    fn test_different_paths_differ() {
        let a = Fingerprint::of_path(Path::new("textures/grass.png"));
        let b = Fingerprint::of_path(Path::new("textures/dirt.png"));
        assert_ne!(a, b);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_paths_differ() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let a = Fingerprint::of_path(Path::new(OsStr::from_bytes(b"textures/a\xff.png")));
        let b = Fingerprint::of_path(Path::new(OsStr::from_bytes(b"textures/a\xfe.png")));
        assert_ne!(a, b);
    }

    #[test]
    fn test_stable_value() {
        // xxh64 of the empty input with seed 0
        assert_eq!(Fingerprint::of_bytes(b"").value(), 0xEF46_DB37_51D8_E999);
    }
}
