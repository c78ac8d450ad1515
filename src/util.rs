use std::fmt;

/// Renders key bytes for messages and log events.
pub(crate) fn display_key(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Displays a list of keys as `{ "a", "aa" }`.
///
/// ```rust
/// use prefix_tree::{KeyList, StringTrie};
///
/// let mut trie = StringTrie::<u32>::new();
/// trie.add("aa".to_string(), 1).unwrap();
/// trie.add("a".to_string(), 2).unwrap();
///
/// let keys = trie.find_keys("a");
/// assert_eq!(KeyList(&keys).to_string(), r#"{ "a", "aa" }"#);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct KeyList<'a, K>(pub &'a [K]);

impl<'a, K: AsRef<[u8]>> fmt::Display for KeyList<'a, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{}\"", String::from_utf8_lossy(key.as_ref()))?;
        }
        f.write_str(" }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_key() {
        assert_eq!(display_key(b"abc"), "abc");
        assert_eq!(display_key(&[b'a', 0xff]), "a\u{fffd}");
    }

    #[test]
    fn test_key_list_display() {
        let keys = vec!["aa".to_string(), "aaa".to_string(), "ab".to_string()];
        assert_eq!(KeyList(&keys).to_string(), r#"{ "aa", "aaa", "ab" }"#);

        let single = vec![b"x".to_vec()];
        assert_eq!(KeyList(&single).to_string(), r#"{ "x" }"#);
    }

    #[test]
    fn test_key_list_display_empty() {
        let keys: Vec<String> = Vec::new();
        assert_eq!(KeyList(&keys).to_string(), "{  }");
    }
}
