//! Fixed-capacity inline names for markers and passes

use thiserror::Error;

/// Longest accepted debug name, in bytes.
pub const MAX_DEBUG_NAME_LEN: usize = 15;

/// Reasons a debug name is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DebugNameError {
    #[error(
        "debug name '{name}' is {len} characters long, the maximum is {max}",
        max = MAX_DEBUG_NAME_LEN
    )]
    TooLong { name: String, len: usize },
    #[error("debug name '{0}' is not ASCII")]
    NotAscii(String),
}

/// An ASCII name of at most [`MAX_DEBUG_NAME_LEN`] characters stored inline.
///
/// Oversized names are rejected, never truncated.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DebugName {
    bytes: [u8; MAX_DEBUG_NAME_LEN],
    len: u8,
}

impl DebugName {
    pub fn try_new(name: &str) -> Result<Self, DebugNameError> {
        if !name.is_ascii() {
            return Err(DebugNameError::NotAscii(name.to_string()));
        }
        if name.len() > MAX_DEBUG_NAME_LEN {
            return Err(DebugNameError::TooLong {
                name: name.to_string(),
                len: name.len(),
            });
        }

        let mut bytes = [0u8; MAX_DEBUG_NAME_LEN];
        bytes[..name.len()].copy_from_slice(name.as_bytes());
        Ok(Self {
            bytes,
            len: name.len() as u8,
        })
    }

    /// Build a name, aborting on a configuration error.
    ///
    /// # Panics
    ///
    /// Panics if `name` is longer than [`MAX_DEBUG_NAME_LEN`] or not ASCII.
    pub fn new(name: &str) -> Self {
        match Self::try_new(name) {
            Ok(name) => name,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII is ever stored.
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl std::fmt::Debug for DebugName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl std::fmt::Display for DebugName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_exactly_fifteen() {
        let name = DebugName::new("abcdefghijklmno");
        assert_eq!(name.len(), 15);
        assert_eq!(name.as_str(), "abcdefghijklmno");
    }

    #[test]
    fn test_rejects_sixteen() {
        let err = DebugName::try_new("abcdefghijklmnop").unwrap_err();
        assert_eq!(
            err,
            DebugNameError::TooLong {
                name: "abcdefghijklmnop".to_string(),
                len: 16
            }
        );
    }

    #[test]
    fn test_rejects_non_ascii() {
        assert!(matches!(
            DebugName::try_new("näme"),
            Err(DebugNameError::NotAscii(_))
        ));
    }

    #[test]
    fn test_empty_and_display() {
        assert!(DebugName::default().is_empty());
        assert_eq!(DebugName::new("Shadows").to_string(), "Shadows");
    }

    #[test]
    #[should_panic(expected = "the maximum is 15")]
    fn test_new_panics_on_oversize() {
        DebugName::new("this name is far too long");
    }
}
