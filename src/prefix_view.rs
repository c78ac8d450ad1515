//! Prefix view into a prefix tree, and the ordered traversal behind it.
//!
//! This module provides the `PrefixView` type, which gives access to the keys
//! starting with a given prefix, and the `Iter` type, which walks a subtree in
//! ascending key order.

use std::borrow::Borrow;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use slab::Slab;

use crate::key_converter::{starts_with, TrieKey};
use crate::node::{Node, NodeIndex};
use crate::PrefixTree;

/// A lightweight view of the keys that start with a prefix.
///
/// The view borrows the trie. Its length comes straight from the node count,
/// so `len()` is O(1).
///
/// # Examples
///
/// ```
/// use prefix_tree::StringTrie;
///
/// let mut trie1 = StringTrie::<i32>::new();
/// trie1.add("hello".to_string(), 1).unwrap();
/// trie1.add("help".to_string(), 2).unwrap();
///
/// let mut trie2 = StringTrie::<i32>::new();
/// trie2.add("hello".to_string(), 1).unwrap();
/// trie2.add("help".to_string(), 2).unwrap();
/// trie2.add("world".to_string(), 3).unwrap();
///
/// // Views with identical content are equal
/// assert_eq!(trie1.view("hel"), trie2.view("hel"));
///
/// let view = trie1.view("hel");
/// assert!(view.contains_key("hello"));
/// assert!(!view.contains_key("world"));
/// ```
pub struct PrefixView<'a, K, V> {
    /// The source trie for this view
    trie: &'a PrefixTree<K, V>,

    /// The prefix defining this view
    prefix: Vec<u8>,

    /// The node at the prefix, if it exists and holds any key
    subtrie_node: Option<NodeIndex>,
}

impl<'a, K, V> PrefixView<'a, K, V> {
    /// Creates a new prefix view for the given trie and prefix.
    pub(crate) fn new(trie: &'a PrefixTree<K, V>, prefix: &[u8]) -> Self {
        let subtrie_node = trie
            .locate(prefix)
            .filter(|&index| trie.nodes[index].is_live());

        PrefixView {
            trie,
            prefix: prefix.to_vec(),
            subtrie_node,
        }
    }

    /// Returns the prefix for this view.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Returns the underlying trie.
    pub fn trie(&self) -> &'a PrefixTree<K, V> {
        self.trie
    }

    /// Returns the number of keys starting with the prefix.
    pub fn len(&self) -> usize {
        self.subtrie_node
            .map_or(0, |index| self.trie.nodes[index].count)
    }

    /// Returns whether no key starts with the prefix.
    pub fn is_empty(&self) -> bool {
        self.subtrie_node.is_none()
    }

    /// Checks if the view contains a key.
    ///
    /// Only returns true if the key is in the trie and starts with the prefix.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: AsRef<[u8]> + ?Sized,
    {
        starts_with(key, &self.prefix) && self.trie.contains_key(key)
    }

    /// Gets the value for a key if it exists in this prefix view.
    pub fn get<Q>(&self, key: &Q) -> Option<&'a V>
    where
        K: Borrow<Q>,
        Q: AsRef<[u8]> + ?Sized,
    {
        if !starts_with(key, &self.prefix) {
            return None;
        }
        self.trie.get(key)
    }
}

impl<'a, K: TrieKey, V> PrefixView<'a, K, V> {
    /// Returns an iterator over the key-value pairs in the view, in ascending key order.
    pub fn iter(&self) -> Iter<'a, K, V> {
        Iter::new(&self.trie.nodes, self.subtrie_node, self.prefix.clone())
    }

    /// Returns an iterator over the keys in the view, in ascending key order.
    pub fn keys(&self) -> Keys<'a, K, V> {
        Keys { inner: self.iter() }
    }
}

impl<'a, K, V> Clone for PrefixView<'a, K, V> {
    fn clone(&self) -> Self {
        PrefixView {
            trie: self.trie,
            prefix: self.prefix.clone(),
            subtrie_node: self.subtrie_node,
        }
    }
}

impl<'a, K, V> fmt::Debug for PrefixView<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixView")
            .field("prefix", &String::from_utf8_lossy(&self.prefix))
            .field("len", &self.len())
            .finish()
    }
}

/// Views are equal when the subtrees below their prefixes hold the same
/// suffixes with the same values; the prefixes themselves are not compared.
impl<'a, K, V: PartialEq> PartialEq for PrefixView<'a, K, V> {
    fn eq(&self, other: &Self) -> bool {
        // Fast path: the same node of the same trie
        if std::ptr::eq(self.trie, other.trie) && self.subtrie_node == other.subtrie_node {
            return true;
        }

        self.trie
            .subtrees_equal(self.subtrie_node, other.trie, other.subtrie_node)
    }
}

impl<'a, K, V: Eq> Eq for PrefixView<'a, K, V> {}

impl<'a, K: TrieKey, V> IntoIterator for &PrefixView<'a, K, V> {
    type Item = (K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over key-value pairs of a subtree.
///
/// The traversal is pre-order and depth-first: a node's own value comes
/// before its children, and children are visited in ascending byte order.
/// That yields keys in ascending lexicographic byte order. Subtrees whose
/// count is zero are never entered.
pub struct Iter<'a, K, V> {
    nodes: &'a Slab<Node<V>>,

    /// Nodes still to visit with the edge label leading to them and the path
    /// length of their parent
    stack: Vec<(NodeIndex, Option<u8>, usize)>,

    /// Bytes of the key for the node visited last
    path: Vec<u8>,

    /// Values not yet yielded
    remaining: usize,

    _key_type: PhantomData<K>,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Starts a traversal at `start`, whose key is `prefix`.
    pub(crate) fn new(nodes: &'a Slab<Node<V>>, start: Option<NodeIndex>, prefix: Vec<u8>) -> Self {
        let start = start.filter(|&index| nodes[index].is_live());
        let depth = prefix.len();

        Iter {
            nodes,
            stack: start.into_iter().map(|index| (index, None, depth)).collect(),
            path: prefix,
            remaining: start.map_or(0, |index| nodes[index].count),
            _key_type: PhantomData,
        }
    }
}

impl<'a, K: TrieKey, V> Iterator for Iter<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;

        while let Some((index, label, depth)) = self.stack.pop() {
            let node = &nodes[index];

            self.path.truncate(depth);
            if let Some(byte) = label {
                self.path.push(byte);
            }

            // Push in reverse so the smallest byte is popped first
            let child_depth = self.path.len();
            for (&byte, &child) in node.children.iter().rev() {
                if nodes[child].is_live() {
                    self.stack.push((child, Some(byte), child_depth));
                }
            }

            if let Some(value) = &node.value {
                self.remaining -= 1;
                return Some((K::from_bytes(self.path.clone()), value));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: TrieKey, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K: TrieKey, V> FusedIterator for Iter<'a, K, V> {}

/// An iterator over the keys of a subtree, in ascending order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K: TrieKey, V> Iterator for Keys<'a, K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K: TrieKey, V> ExactSizeIterator for Keys<'a, K, V> {}

#[cfg(test)]
mod tests {
    use crate::{RemovalPolicy, StringTrie, TrieOptions};

    fn trie_of(keys: &[(&str, u32)]) -> StringTrie<u32> {
        let mut trie = StringTrie::new();
        for (key, value) in keys {
            trie.add(key.to_string(), *value).unwrap();
        }
        trie
    }

    #[test]
    fn test_prefix_view_creation() {
        let trie = trie_of(&[("hello", 1), ("help", 2), ("world", 3)]);
        let view = trie.view("hel");

        assert_eq!(view.prefix(), b"hel");
        assert!(std::ptr::eq(view.trie(), &trie));
        assert_eq!(view.len(), 2);
        assert!(!view.is_empty());
    }

    #[test]
    fn test_prefix_view_missing_prefix() {
        let trie = trie_of(&[("hello", 1)]);
        let view = trie.view("xyz");

        assert_eq!(view.len(), 0);
        assert!(view.is_empty());
        assert_eq!(view.iter().count(), 0);
    }

    #[test]
    fn test_prefix_view_skips_residue() {
        let mut trie = trie_of(&[("hello", 1), ("world", 2)]);
        trie.remove("hello");

        // The "hel" node still exists but holds nothing
        assert!(trie.locate(b"hel").is_some());
        let view = trie.view("hel");
        assert!(view.is_empty());
        assert_eq!(view.keys().count(), 0);
    }

    #[test]
    fn test_prefix_view_get_and_contains() {
        let trie = trie_of(&[("hello", 1), ("help", 2), ("world", 3)]);
        let view = trie.view("hel");

        assert_eq!(view.get("hello"), Some(&1));
        assert_eq!(view.get("help"), Some(&2));
        assert_eq!(view.get("world"), None);
        assert_eq!(view.get("he"), None);

        assert!(view.contains_key("hello"));
        assert!(!view.contains_key("world"));
        assert!(!view.contains_key("hel"));
    }

    #[test]
    fn test_prefix_view_iter_order() {
        let trie = trie_of(&[("ba", 4), ("ac", 3), ("ab", 2), ("aa", 1), ("a", 0)]);
        let view = trie.view("a");

        let results: Vec<(String, u32)> = view.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(
            results,
            vec![
                ("a".to_string(), 0),
                ("aa".to_string(), 1),
                ("ab".to_string(), 2),
                ("ac".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_iter_is_exact_size() {
        let trie = trie_of(&[("x", 1), ("xy", 2), ("z", 3)]);
        let mut iter = trie.iter();

        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
        assert_eq!(trie.view("x").keys().len(), 2);
    }

    #[test]
    fn test_prefix_view_equality() {
        let trie1 = trie_of(&[("hello", 1), ("help", 2)]);
        let trie2 = trie_of(&[("hello", 1), ("help", 2), ("world", 3)]);

        assert_eq!(trie1.view("hel"), trie2.view("hel"));
        assert_ne!(trie1.view("he"), trie2.view("hel"));
        assert_ne!(trie1.view(""), trie2.view(""));

        let trie3 = trie_of(&[("hello", 99), ("help", 2)]);
        assert_ne!(trie1.view("hel"), trie3.view("hel"));

        // Empty views compare equal regardless of prefix
        assert_eq!(trie1.view("zzz"), trie2.view("q"));
    }

    #[test]
    fn test_prefix_view_equality_across_policies() {
        let mut lazy = trie_of(&[("abc", 1), ("abd", 2)]);
        let mut pruned: StringTrie<u32> =
            StringTrie::with_options(TrieOptions::default().removal(RemovalPolicy::Prune));
        pruned.add("abc".to_string(), 1).unwrap();
        pruned.add("abd".to_string(), 2).unwrap();

        lazy.remove("abd");
        pruned.remove("abd");

        assert_eq!(lazy.view("ab"), pruned.view("ab"));
    }

    #[test]
    fn test_into_iterator_for_view() {
        let trie = trie_of(&[("cab", 1), ("car", 2), ("cat", 3)]);
        let view = trie.view("ca");

        let mut keys = Vec::new();
        for (key, _) in &view {
            keys.push(key);
        }
        assert_eq!(keys, vec!["cab", "car", "cat"]);
    }
}
