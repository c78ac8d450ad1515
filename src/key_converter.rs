//! Defines the trait for key types that can be stored in a prefix tree.
//!
//! A key is walked one byte at a time, so any key type must expose its bytes.
//! Enumeration rebuilds keys from the byte path leading to a value, which is
//! why the trait also needs the reverse conversion.

/// A key type that converts to and from its byte representation.
///
/// Lookups only need `AsRef<[u8]>`; `from_bytes` is used when a traversal
/// hands keys back to the caller.
pub trait TrieKey: AsRef<[u8]> + Sized {
    /// Rebuilds a key from the bytes of a path in the tree.
    ///
    /// The bytes passed in are always the bytes of a key that was previously
    /// inserted with the same key type.
    fn from_bytes(bytes: Vec<u8>) -> Self;

    /// Decodes a key read from outside the tree, handing the bytes back if
    /// they do not form a valid key.
    fn parse_bytes(bytes: Vec<u8>) -> Result<Self, Vec<u8>> {
        Ok(Self::from_bytes(bytes))
    }
}

impl TrieKey for String {
    fn from_bytes(bytes: Vec<u8>) -> Self {
        // Paths to values are the bytes of an inserted `String`, so they are valid UTF-8.
        String::from_utf8(bytes)
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
    }

    fn parse_bytes(bytes: Vec<u8>) -> Result<Self, Vec<u8>> {
        String::from_utf8(bytes).map_err(|err| err.into_bytes())
    }
}

impl TrieKey for Vec<u8> {
    fn from_bytes(bytes: Vec<u8>) -> Self {
        bytes
    }
}

/// Returns whether `key` begins with `prefix`, comparing bytes.
pub(crate) fn starts_with<Q: AsRef<[u8]> + ?Sized>(key: &Q, prefix: &[u8]) -> bool {
    key.as_ref().starts_with(prefix)
}
