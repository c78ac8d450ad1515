//! The main trie implementation.
//!
//! This module contains the `PrefixTree` type, which provides the primary API
//! for working with the prefix tree.

use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use slab::Slab;
use tracing::trace;

use crate::key_converter::TrieKey;
use crate::node::{Node, NodeIndex};
use crate::options::{RemovalPolicy, TrieOptions};
use crate::prefix_view::{Iter, PrefixView};
use crate::util::display_key;
use crate::{Error, Result};

/// A prefix tree mapping byte-string keys to values.
///
/// Every node keeps the number of keys stored in its subtree, so `len()` is
/// O(1) and traversals can skip subtrees that hold nothing. Keys are
/// enumerated in ascending byte order.
///
/// `add` never overwrites: inserting a key that already holds a value is an
/// error. Use `at`, `get_mut` or `IndexMut` to update a value in place, or
/// `insert` for explicit upsert.
pub struct PrefixTree<K, V> {
    /// Node storage; every node other than the root is owned by exactly one parent edge
    pub(crate) nodes: Slab<Node<V>>,

    /// The node for the empty prefix
    pub(crate) root: NodeIndex,

    options: TrieOptions,

    /// Phantom data to carry the key type
    _key_type: PhantomData<K>,
}

impl<K, V: Clone> Clone for PrefixTree<K, V> {
    fn clone(&self) -> Self {
        PrefixTree {
            nodes: self.nodes.clone(),
            root: self.root,
            options: self.options,
            _key_type: PhantomData,
        }
    }
}

impl<K, V> PrefixTree<K, V> {
    /// Creates a new, empty trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::StringTrie;
    ///
    /// let trie = StringTrie::<i32>::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_options(TrieOptions::default())
    }

    /// Creates a new, empty trie with the given options.
    pub fn with_options(options: TrieOptions) -> Self {
        let mut nodes = Slab::new();
        let root = nodes.insert(Node::root());
        PrefixTree {
            nodes,
            root,
            options,
            _key_type: PhantomData,
        }
    }

    /// Returns the options this trie was created with.
    pub fn options(&self) -> TrieOptions {
        self.options
    }

    /// Returns the number of keys stored in the trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::StringTrie;
    ///
    /// let mut trie = StringTrie::<i32>::new();
    /// assert_eq!(trie.len(), 0);
    ///
    /// trie.add("hello".to_string(), 42).unwrap();
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.nodes[self.root].count
    }

    /// Returns `true` if the trie contains no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of allocated nodes, including the root and any
    /// emptied nodes left behind by lazy removal.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Removes every key and frees every node except a fresh root.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.insert(Node::root());
    }

    /// Retrieves a reference to the value stored for the given key, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::StringTrie;
    ///
    /// let mut trie = StringTrie::<i32>::new();
    /// trie.add("hello".to_string(), 42).unwrap();
    ///
    /// assert_eq!(trie.get("hello"), Some(&42));
    /// assert_eq!(trie.get("hell"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: AsRef<[u8]> + ?Sized,
    {
        let index = self.locate(key.as_ref())?;
        self.nodes[index].value.as_ref()
    }

    /// Retrieves a mutable reference to the value stored for the given key, if any.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: AsRef<[u8]> + ?Sized,
    {
        self.value_slot_mut(key.as_ref())
    }

    /// Returns `true` if a value is stored under exactly this key.
    ///
    /// Prefixes of stored keys are not keys themselves:
    ///
    /// ```
    /// use prefix_tree::StringTrie;
    ///
    /// let mut trie = StringTrie::<i32>::new();
    /// trie.add("hello".to_string(), 42).unwrap();
    ///
    /// assert!(trie.contains_key("hello"));
    /// assert!(!trie.contains_key("hel"));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: AsRef<[u8]> + ?Sized,
    {
        self.holds_value(key.as_ref())
    }

    /// Returns a mutable reference to the value of a key that must be present.
    ///
    /// This is the way to overwrite a value without touching the key counts.
    /// A missing key is reported as `Error::MissingKey`; nothing is inserted.
    pub fn at<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: AsRef<[u8]> + ?Sized,
    {
        let bytes = key.as_ref();
        self.value_slot_mut(bytes)
            .ok_or_else(|| Error::MissingKey(bytes.to_vec()))
    }

    /// Removes a key from the trie, returning its value if it was present.
    ///
    /// Removing an absent key is a no-op. The counts on the path to the root
    /// are decremented by walking parent links. Under `RemovalPolicy::Lazy`
    /// the emptied nodes stay allocated; under `RemovalPolicy::Prune` the
    /// childless ones are freed.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::StringTrie;
    ///
    /// let mut trie = StringTrie::<i32>::new();
    /// trie.add("hello".to_string(), 42).unwrap();
    ///
    /// assert_eq!(trie.remove("hello"), Some(42));
    /// assert_eq!(trie.remove("hello"), None);
    /// assert!(trie.is_empty());
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: AsRef<[u8]> + ?Sized,
    {
        let bytes = key.as_ref();
        let index = self.locate(bytes)?;
        let value = self.nodes[index].value.take()?;

        let mut current = Some(index);
        while let Some(i) = current {
            let node = &mut self.nodes[i];
            assert!(node.count > 0, "prefix tree key count underflow");
            node.count -= 1;
            current = node.parent.map(|(parent, _)| parent);
        }

        if self.options.removal == RemovalPolicy::Prune {
            self.prune_from(index);
        }

        trace!(key = %display_key(bytes), size = self.len(), "removed key");
        Some(value)
    }

    /// Walks the path for `key` without creating nodes.
    pub(crate) fn locate(&self, key: &[u8]) -> Option<NodeIndex> {
        let mut current = self.root;
        for &byte in key {
            current = self.nodes[current].child(byte)?;
        }
        Some(current)
    }

    fn holds_value(&self, key: &[u8]) -> bool {
        self.locate(key)
            .map_or(false, |index| self.nodes[index].value.is_some())
    }

    fn value_slot_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let index = self.locate(key)?;
        self.nodes[index].value.as_mut()
    }

    /// Stores `value` at `key`, creating missing nodes and counting the key on
    /// every node of the path. The key must not already hold a value.
    fn attach(&mut self, key: &[u8], value: V) {
        let mut current = self.root;
        self.nodes[current].count += 1;

        for &byte in key {
            current = match self.nodes[current].child(byte) {
                Some(child) => child,
                None => {
                    let child = self.nodes.insert(Node::with_parent(current, byte));
                    self.nodes[current].children.insert(byte, child);
                    child
                }
            };
            self.nodes[current].count += 1;
        }

        debug_assert!(self.nodes[current].value.is_none());
        self.nodes[current].value = Some(value);
    }

    /// Frees childless empty nodes from `index` upward. The root is kept.
    fn prune_from(&mut self, mut index: NodeIndex) {
        let mut freed = 0usize;

        while index != self.root {
            let node = &self.nodes[index];
            if node.is_live() || !node.is_leaf() {
                break;
            }
            let (parent, byte) = match node.parent {
                Some(edge) => edge,
                None => break,
            };

            self.nodes.remove(index);
            self.nodes[parent].children.remove(&byte);
            index = parent;
            freed += 1;
        }

        if freed > 0 {
            trace!(freed, nodes = self.nodes.len(), "pruned empty nodes");
        }
    }

    /// Compares two subtrees, possibly from different tries.
    ///
    /// Absent nodes and nodes with a zero count are equal to each other, so
    /// residue from lazy removal never affects the outcome. Node pairs wait on
    /// an explicit work list, so key length does not grow the call stack.
    pub(crate) fn subtrees_equal(
        &self,
        left: Option<NodeIndex>,
        other: &Self,
        right: Option<NodeIndex>,
    ) -> bool
    where
        V: PartialEq,
    {
        let mut pending = vec![(left, right)];

        while let Some((left, right)) = pending.pop() {
            let left = left.map(|i| &self.nodes[i]).filter(|node| node.is_live());
            let right = right.map(|i| &other.nodes[i]).filter(|node| node.is_live());

            let (l, r) = match (left, right) {
                (None, None) => continue,
                (Some(l), Some(r)) => (l, r),
                _ => return false,
            };
            if l.count != r.count || l.value != r.value {
                return false;
            }

            for (&byte, &child) in &l.children {
                pending.push((Some(child), r.child(byte)));
            }
            // Edges only the right side has must lead to empty subtrees
            for (&byte, &child) in &r.children {
                if !l.children.contains_key(&byte) {
                    pending.push((None, Some(child)));
                }
            }
        }

        true
    }
}

impl<K: TrieKey, V> PrefixTree<K, V> {
    /// Adds a key that is not yet present.
    ///
    /// Inserting over an existing key is a precondition violation reported as
    /// `Error::DuplicateKey`, and the trie is left untouched. Remove the key
    /// first, or update it through `at`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::{Error, StringTrie};
    ///
    /// let mut trie = StringTrie::<i32>::new();
    /// trie.add("hello".to_string(), 1).unwrap();
    ///
    /// assert!(matches!(trie.add("hello".to_string(), 2), Err(Error::DuplicateKey(_))));
    /// assert_eq!(trie.get("hello"), Some(&1));
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn add(&mut self, key: K, value: V) -> Result<()> {
        let bytes = key.as_ref();
        if self.holds_value(bytes) {
            return Err(Error::DuplicateKey(bytes.to_vec()));
        }

        self.attach(bytes, value);
        trace!(key = %display_key(bytes), size = self.len(), "added key");
        Ok(())
    }

    /// Inserts a key, replacing and returning the previous value if there was one.
    ///
    /// Replacing a value leaves the counts unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.value_slot_mut(key.as_ref()) {
            return Some(std::mem::replace(slot, value));
        }

        self.attach(key.as_ref(), value);
        None
    }

    /// Returns an iterator over all key-value pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.nodes, Some(self.root), Vec::new())
    }

    /// Calls `visit` for every key-value pair in ascending key order.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        for (key, value) in self.iter() {
            visit(&key, value);
        }
    }

    /// Creates a view of the keys that start with `prefix`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::StringTrie;
    ///
    /// let mut trie = StringTrie::<i32>::new();
    /// trie.add("hello".to_string(), 1).unwrap();
    /// trie.add("help".to_string(), 2).unwrap();
    /// trie.add("world".to_string(), 3).unwrap();
    ///
    /// let view = trie.view("hel");
    /// assert_eq!(view.len(), 2);
    /// assert_eq!(view.get("help"), Some(&2));
    /// assert_eq!(view.get("world"), None);
    /// ```
    pub fn view<P>(&self, prefix: &P) -> PrefixView<'_, K, V>
    where
        P: AsRef<[u8]> + ?Sized,
    {
        PrefixView::new(self, prefix.as_ref())
    }

    /// Returns every stored key that starts with `prefix`, in ascending byte order.
    ///
    /// A key equal to the prefix is included and comes first.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::StringTrie;
    ///
    /// let mut trie = StringTrie::<i32>::new();
    /// for key in &["ab", "a", "b", "aa"] {
    ///     trie.add(key.to_string(), 0).unwrap();
    /// }
    ///
    /// assert_eq!(trie.find_keys("a"), vec!["a", "aa", "ab"]);
    /// assert!(trie.find_keys("c").is_empty());
    /// ```
    pub fn find_keys<P>(&self, prefix: &P) -> Vec<K>
    where
        P: AsRef<[u8]> + ?Sized,
    {
        self.view(prefix).keys().collect()
    }
}

// Default implementation
impl<K, V> Default for PrefixTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V: PartialEq> PartialEq for PrefixTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        // Fast path: same instance
        if std::ptr::eq(self, other) {
            return true;
        }

        self.subtrees_equal(Some(self.root), other, Some(other.root))
    }
}

impl<K, V: Eq> Eq for PrefixTree<K, V> {}

impl<K, V, Q> Index<&Q> for PrefixTree<K, V>
where
    K: Borrow<Q>,
    Q: AsRef<[u8]> + ?Sized,
{
    type Output = V;

    /// Returns the value of a key that must be present.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the trie.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not present in prefix tree")
    }
}

impl<K, V, Q> IndexMut<&Q> for PrefixTree<K, V>
where
    K: Borrow<Q>,
    Q: AsRef<[u8]> + ?Sized,
{
    /// # Panics
    ///
    /// Panics if the key is not present in the trie.
    fn index_mut(&mut self, key: &Q) -> &mut V {
        self.get_mut(key).expect("key not present in prefix tree")
    }
}

impl<K: TrieKey + fmt::Debug, V: fmt::Debug> fmt::Debug for PrefixTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K: TrieKey, V> IntoIterator for &'a PrefixTree<K, V> {
    type Item = (K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: TrieKey, V> Extend<(K, V)> for PrefixTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: TrieKey, V> FromIterator<(K, V)> for PrefixTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = PrefixTree::new();
        trie.extend(iter);
        trie
    }
}
