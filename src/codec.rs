//! Line-oriented text encoding of a prefix tree.
//!
//! The first line holds the number of keys. Each key follows on its own line,
//! then its value rendered with `Display`, in ascending key order:
//!
//! ```text
//! 3
//! a
//! 3
//! aa
//! 5
//! b
//! 1
//! ```
//!
//! Reading splits the input on ASCII whitespace, so keys and values must not
//! contain any.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::key_converter::TrieKey;
use crate::util::display_key;
use crate::{Error, PrefixTree, Result};

impl<K: TrieKey, V: Display> PrefixTree<K, V> {
    /// Writes the trie in the text format.
    ///
    /// # Errors
    ///
    /// The reader splits on whitespace, so a trie holding the empty key or a
    /// key with an ASCII whitespace byte is refused with
    /// `Error::UnencodableKey` before anything is written. Values are not
    /// checked: a `Display` rendering that contains whitespace or is empty
    /// writes output that will not read back.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::StringTrie;
    ///
    /// let mut trie = StringTrie::<u32>::new();
    /// trie.add("b".to_string(), 1).unwrap();
    /// trie.add("a".to_string(), 3).unwrap();
    ///
    /// let mut out = Vec::new();
    /// trie.write_to(&mut out).unwrap();
    /// assert_eq!(out, b"2\na\n3\nb\n1\n");
    /// ```
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<()> {
        if let Some(key) = self.iter().map(|(key, _)| key).find(|key| !is_encodable(key.as_ref())) {
            return Err(Error::UnencodableKey(key.as_ref().to_vec()));
        }

        writeln!(out, "{}", self.len())?;
        for (key, value) in self.iter() {
            out.write_all(key.as_ref())?;
            writeln!(out)?;
            writeln!(out, "{}", value)?;
        }
        out.flush()?;

        debug!(keys = self.len(), "wrote prefix tree");
        Ok(())
    }

    /// Writes the trie to a file, replacing its contents.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))?;

        debug!(path = %path.display(), "saved prefix tree");
        Ok(())
    }
}

impl<K, V> PrefixTree<K, V>
where
    K: TrieKey,
    V: FromStr,
    V::Err: Display,
{
    /// Reads keys and values in the text format into an empty trie.
    ///
    /// Reading into a trie that already holds keys is refused with
    /// `Error::NotEmpty`. Every pair is inserted with `add`, so a key that
    /// appears twice fails with `Error::DuplicateKey`. Any failure clears the
    /// trie, so pairs read before it do not stay behind.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::StringTrie;
    ///
    /// let mut trie = StringTrie::<u32>::new();
    /// trie.read_from(&b"3\na\n3\nb\n1\naa\n5\n"[..]).unwrap();
    ///
    /// assert_eq!(trie.len(), 3);
    /// assert_eq!(trie["aa"], 5);
    /// ```
    pub fn read_from<R: BufRead>(&mut self, input: R) -> Result<()> {
        if !self.is_empty() {
            return Err(Error::NotEmpty(self.len()));
        }

        if let Err(err) = self.read_pairs(Tokens { input }) {
            self.clear();
            return Err(err);
        }

        debug!(keys = self.len(), "read prefix tree");
        Ok(())
    }

    /// Reads a trie previously saved with `to_file` into this empty trie.
    pub fn from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::open(path)?;
        self.read_from(BufReader::new(file))?;

        debug!(path = %path.display(), keys = self.len(), "loaded prefix tree");
        Ok(())
    }

    fn read_pairs<R: BufRead>(&mut self, mut tokens: Tokens<R>) -> Result<()> {
        let count_token = tokens.expect("key count")?;
        let count = utf8_token(&count_token)?
            .parse::<usize>()
            .map_err(|err| Error::Parse(format!("invalid key count {:?}: {}", display_key(&count_token), err)))?;

        for n in 1..=count {
            let key_token = tokens.expect("key")?;
            let value_token = tokens.expect("value")?;

            let value = utf8_token(&value_token)?.parse::<V>().map_err(|err| {
                Error::Parse(format!(
                    "invalid value for key {:?}: {}",
                    display_key(&key_token),
                    err
                ))
            })?;
            let key = K::parse_bytes(key_token)
                .map_err(|bytes| Error::Parse(format!("invalid key {:?}", display_key(&bytes))))?;

            self.add(key, value)?;
            debug_assert_eq!(self.len(), n);
        }
        Ok(())
    }
}

/// A key survives the text format when it is one non-empty whitespace-free token.
fn is_encodable(key: &[u8]) -> bool {
    !key.is_empty() && !key.iter().any(u8::is_ascii_whitespace)
}

fn utf8_token(token: &[u8]) -> Result<&str> {
    std::str::from_utf8(token)
        .map_err(|_| Error::Parse(format!("token {:?} is not valid UTF-8", display_key(token))))
}

/// Splits a byte stream into runs of non-whitespace bytes.
struct Tokens<R> {
    input: R,
}

impl<R: BufRead> Tokens<R> {
    /// Returns the next token, or `None` at end of input.
    fn next_token(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut token = Vec::new();

        loop {
            let buf = match self.input.fill_buf() {
                Ok(buf) => buf,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if buf.is_empty() {
                break;
            }

            let mut used = 0;
            let mut complete = false;
            for &byte in buf {
                if byte.is_ascii_whitespace() {
                    if !token.is_empty() {
                        complete = true;
                        break;
                    }
                } else {
                    token.push(byte);
                }
                used += 1;
            }
            self.input.consume(used);

            if complete {
                break;
            }
        }

        Ok(if token.is_empty() { None } else { Some(token) })
    }

    /// Returns the next token, treating end of input as malformed.
    fn expect(&mut self, what: &str) -> Result<Vec<u8>> {
        self.next_token()?
            .ok_or_else(|| Error::Parse(format!("unexpected end of input, expected {}", what)))
    }
}
