//! Word completion over a small dictionary.
//!
//! Run with `cargo run --example autocomplete -- <prefix>...`. Set
//! `RUST_LOG=trace` to see the trie's events.

use prefix_tree::{KeyList, StringTrie};

const WORDS: &[(&str, u32)] = &[
    ("car", 41),
    ("card", 12),
    ("care", 30),
    ("careful", 9),
    ("cart", 7),
    ("cat", 55),
    ("dog", 48),
    ("door", 21),
];

fn main() -> prefix_tree::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut dictionary = StringTrie::<u32>::new();
    for (word, frequency) in WORDS {
        dictionary.add(word.to_string(), *frequency)?;
    }

    let prefixes: Vec<String> = std::env::args().skip(1).collect();
    let prefixes = if prefixes.is_empty() {
        vec!["ca".to_string(), "car".to_string(), "do".to_string(), "x".to_string()]
    } else {
        prefixes
    };

    for prefix in &prefixes {
        let completions = dictionary.find_keys(prefix);
        println!("{} -> {}", prefix, KeyList(&completions));
    }

    // Bump a frequency in place, then drop a word
    *dictionary.at("cat")? += 1;
    dictionary.remove("cart");

    let mut saved = Vec::new();
    dictionary.write_to(&mut saved)?;
    print!("{}", String::from_utf8_lossy(&saved));

    let mut restored = StringTrie::<u32>::new();
    restored.read_from(&saved[..])?;
    assert_eq!(restored, dictionary);

    Ok(())
}
