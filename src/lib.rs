//! # Prefix Tree
//!
//! A byte-keyed prefix tree (trie) that keeps, at every node, the number of
//! keys stored below it.
//!
//! Each byte of a key is one edge, so keys are ordered by byte value. The
//! per-node counts give `len()` in constant time and let traversals skip
//! subtrees that no longer hold any key.
//!
//! ## Features
//!
//! - **Strict insertion**: `add` refuses to overwrite; `at`/`IndexMut` update in place
//! - **Ordered prefix search**: `find_keys` returns keys in ascending byte order
//! - **Lazy removal**: emptied nodes can stay allocated without being visible
//! - **Structural equality**: two tries are equal when their live contents are
//! - **Text format**: a count line followed by key and value lines
//!
//! ## Example
//!
//! ```rust
//! use prefix_tree::StringTrie;
//!
//! let mut trie = StringTrie::<u32>::new();
//!
//! trie.add("hello".to_string(), 1).unwrap();
//! trie.add("help".to_string(), 2).unwrap();
//! trie.add("world".to_string(), 3).unwrap();
//!
//! assert!(trie.contains_key("hello"));
//! assert_eq!(trie.find_keys("hel"), vec!["hello".to_string(), "help".to_string()]);
//!
//! trie["help"] = 20;
//! assert_eq!(trie.get("help"), Some(&20));
//! ```

mod codec;
pub mod key_converter;
mod node;
mod options;
mod prefix_view;
mod trie;
mod util;

// Re-export public types
pub use crate::key_converter::TrieKey;
pub use crate::options::{RemovalPolicy, TrieOptions};
pub use crate::prefix_view::{Iter, Keys, PrefixView};
pub use crate::trie::PrefixTree;
pub use crate::util::KeyList;

/// A prefix tree keyed by `String`.
pub type StringTrie<V> = PrefixTree<String, V>;

/// A prefix tree keyed by raw byte strings.
pub type BytesTrie<V> = PrefixTree<Vec<u8>, V>;

/// Errors that can occur in trie operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `add` was called for a key that already holds a value
    #[error("key {:?} is already present", String::from_utf8_lossy(.0))]
    DuplicateKey(Vec<u8>),

    /// The key was required to be present but is not
    #[error("key {:?} is not present", String::from_utf8_lossy(.0))]
    MissingKey(Vec<u8>),

    /// Deserialization requires an empty trie
    #[error("cannot read into a trie that already holds {0} keys")]
    NotEmpty(usize),

    /// The key is empty or contains whitespace, so the text format cannot hold it
    #[error("key {:?} cannot be written in the text format", String::from_utf8_lossy(.0))]
    UnencodableKey(Vec<u8>),

    /// The serialized input is malformed
    #[error("malformed input: {0}")]
    Parse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
