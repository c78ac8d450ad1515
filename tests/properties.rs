use std::collections::BTreeMap;

use prefix_tree::{RemovalPolicy, StringTrie, TrieOptions};
use quickcheck::quickcheck;

/// Maps arbitrary bytes onto a three-letter alphabet so keys share prefixes often.
fn key_from(raw: &[u8]) -> String {
    raw.iter().take(6).map(|b| (b'a' + b % 3) as char).collect()
}

/// Applies add/remove operations to a trie and to a `BTreeMap` model.
fn apply(ops: &[(bool, Vec<u8>, u8)], options: TrieOptions) -> (StringTrie<u8>, BTreeMap<String, u8>) {
    let mut trie = StringTrie::with_options(options);
    let mut model = BTreeMap::new();

    for (is_add, raw, value) in ops {
        let key = key_from(raw);
        if *is_add {
            let added = trie.add(key.clone(), *value).is_ok();
            assert_eq!(added, !model.contains_key(&key));
            model.entry(key).or_insert(*value);
        } else {
            assert_eq!(trie.remove(&key), model.remove(&key));
        }
    }

    (trie, model)
}

quickcheck! {
    fn prop_insert_then_remove_all_leaves_empty(raw_keys: Vec<Vec<u8>>) -> bool {
        let mut keys: Vec<String> = raw_keys.iter().map(|raw| key_from(raw)).collect();
        keys.sort();
        keys.dedup();

        let mut trie = StringTrie::<usize>::new();
        for (i, key) in keys.iter().enumerate() {
            trie.add(key.clone(), i).unwrap();
        }
        for key in &keys {
            trie.remove(key);
        }

        trie.is_empty() && keys.iter().all(|key| !trie.contains_key(key))
    }

    fn prop_len_matches_enumeration(ops: Vec<(bool, Vec<u8>, u8)>) -> bool {
        let (trie, model) = apply(&ops, TrieOptions::default());
        trie.len() == model.len() && trie.find_keys("").len() == trie.len()
    }

    fn prop_find_keys_matches_model(ops: Vec<(bool, Vec<u8>, u8)>, raw_prefix: Vec<u8>) -> bool {
        let (trie, model) = apply(&ops, TrieOptions::default());
        let prefix = key_from(&raw_prefix[..raw_prefix.len().min(2)]);

        let expected: Vec<String> = model
            .keys()
            .filter(|key| key.starts_with(prefix.as_str()))
            .cloned()
            .collect();
        trie.find_keys(&prefix) == expected
    }

    fn prop_iteration_matches_model(ops: Vec<(bool, Vec<u8>, u8)>) -> bool {
        let (trie, model) = apply(&ops, TrieOptions::default());
        let entries: Vec<(String, u8)> = trie.iter().map(|(key, value)| (key, *value)).collect();
        let expected: Vec<(String, u8)> = model.into_iter().collect();
        entries == expected
    }

    fn prop_equality_ignores_residue(ops: Vec<(bool, Vec<u8>, u8)>) -> bool {
        let (trie, model) = apply(&ops, TrieOptions::default());

        let mut rebuilt = StringTrie::new();
        for (key, value) in model {
            rebuilt.add(key, value).unwrap();
        }

        trie == rebuilt && rebuilt == trie && trie == trie
    }

    fn prop_removal_policies_agree(ops: Vec<(bool, Vec<u8>, u8)>) -> bool {
        let (lazy, _) = apply(&ops, TrieOptions::default().removal(RemovalPolicy::Lazy));
        let (pruned, _) = apply(&ops, TrieOptions::default().removal(RemovalPolicy::Prune));

        lazy == pruned
            && lazy.find_keys("") == pruned.find_keys("")
            && pruned.node_count() <= lazy.node_count()
    }

    fn prop_serialization_round_trip(ops: Vec<(bool, Vec<u8>, u8)>) -> bool {
        // write_to refuses the empty key, which would serialize to a blank line
        let ops: Vec<_> = ops.into_iter().filter(|(_, raw, _)| !raw.is_empty()).collect();
        let (trie, _) = apply(&ops, TrieOptions::default());

        let mut text = Vec::new();
        trie.write_to(&mut text).unwrap();

        let mut copy = StringTrie::<u8>::new();
        copy.read_from(&text[..]).unwrap();
        copy == trie
    }
}
