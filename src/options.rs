//! Construction-time options for a `PrefixTree`.

/// What `remove` does with nodes that no longer lead to any key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalPolicy {
    /// Leave emptied nodes allocated with a zero count.
    ///
    /// They are invisible to every read operation and are reused if a later
    /// insertion walks the same path.
    Lazy,

    /// Free emptied nodes that have no children, walking upward from the
    /// removed key until a node that is still needed is reached.
    Prune,
}

impl Default for RemovalPolicy {
    fn default() -> Self {
        RemovalPolicy::Lazy
    }
}

/// Options accepted by `PrefixTree::with_options`.
///
/// ```rust
/// use prefix_tree::{RemovalPolicy, StringTrie, TrieOptions};
///
/// let options = TrieOptions::default().removal(RemovalPolicy::Prune);
/// let mut trie = StringTrie::<u32>::with_options(options);
///
/// trie.add("abc".to_string(), 1).unwrap();
/// trie.remove("abc");
/// assert_eq!(trie.node_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrieOptions {
    pub removal: RemovalPolicy,
}

impl TrieOptions {
    /// Sets the removal policy.
    pub fn removal(mut self, removal: RemovalPolicy) -> Self {
        self.removal = removal;
        self
    }
}
