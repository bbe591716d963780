use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

fn validate_trie(t: &PatriciaTrie) {
    let issues = t.verify_integrity();
    assert!(issues.is_empty(), "integrity issues: {issues:#?}");

    let snap = t.snapshot();
    assert_eq!(snap.nodes.len(), t.len(), "every node must hang off a real edge");
    for view in &snap.nodes {
        for edge in [view.left, view.right] {
            let target_bit = snap
                .nodes
                .iter()
                .find(|n| n.id == edge.target)
                .map(|n| n.bit)
                .expect("edge target must be a live node");
            match edge.kind {
                EdgeKind::Real => assert!(target_bit > view.bit),
                EdgeKind::Thread | EdgeKind::SelfLoop => assert!(target_bit <= view.bit),
            }
        }
    }
}

/// Keys equal up to trailing zeros are the same key to the trie.
fn canonical(key: &str) -> &str {
    key.trim_end_matches('0')
}

#[derive(Clone, Debug)]
enum Op {
    Insert(String),
    Delete(String),
    Search(String),
}

fn key_strategy() -> impl Strategy<Value = String> + Clone {
    "[01]{1,10}"
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => key.clone().prop_map(Op::Insert),
        30 => key.clone().prop_map(Op::Delete),
        20 => key.clone().prop_map(Op::Search),
    ];
    prop::collection::vec(op, 0..=300)
}

fn orientation_strategy() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::ZeroLeft), Just(Orientation::ZeroRight)]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(orientation in orientation_strategy(), ops in ops_strategy()) {
        let mut t = PatriciaTrie::with_config(TrieConfig::default().with_orientation(orientation));
        // canonical form -> key as inserted
        let mut m: BTreeMap<String, String> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    let canon = canonical(&key).to_string();
                    let expected = match m.get(&canon) {
                        None => Ok(()),
                        Some(stored) if *stored == key => {
                            Err(InsertError::AlreadyExists { key: key.clone() })
                        }
                        Some(stored) => Err(InsertError::Indistinguishable {
                            key: key.clone(),
                            existing: stored.clone(),
                        }),
                    };
                    let before = t.snapshot();
                    let got = t.insert(&key);
                    prop_assert_eq!(&got, &expected);
                    if got.is_ok() {
                        m.insert(canon, key);
                    } else {
                        prop_assert_eq!(t.snapshot(), before);
                    }
                }
                Op::Delete(key) => {
                    let canon = canonical(&key).to_string();
                    let expected = if m.is_empty() {
                        Err(DeleteError::EmptyTree)
                    } else if m.get(&canon) == Some(&key) {
                        Ok(())
                    } else {
                        Err(DeleteError::NotFound { key: key.clone() })
                    };
                    prop_assert_eq!(t.delete(&key), expected.clone());
                    if expected.is_ok() {
                        m.remove(&canon);
                    }
                }
                Op::Search(key) => {
                    let canon = canonical(&key).to_string();
                    prop_assert_eq!(t.contains(&key), m.get(&canon) == Some(&key));
                    match t.search(&key) {
                        Terminus::Sentinel => prop_assert!(m.is_empty()),
                        Terminus::Node(n) => {
                            prop_assert!(m.values().any(|k| k == n.key()));
                        }
                    }
                }
            }

            prop_assert_eq!(t.len(), m.len());
            validate_trie(&t);
        }

        for key in m.values() {
            prop_assert!(t.search(key).holds(key));
        }
        let mut got: Vec<&str> = t.keys().collect();
        got.sort_unstable();
        let mut expected: Vec<&str> = m.values().map(String::as_str).collect();
        expected.sort_unstable();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_delete_removes_exactly_one(
        keys in prop::collection::btree_set("[01]{0,9}1", 1..40),
        pick in any::<prop::sample::Index>(),
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let mut t = PatriciaTrie::new();
        for k in &keys {
            t.insert(k).unwrap();
        }
        let victim = &keys[pick.index(keys.len())];

        t.delete(victim).unwrap();
        prop_assert_eq!(t.len(), keys.len() - 1);
        prop_assert!(!t.search(victim).holds(victim));
        for k in keys.iter().filter(|k| *k != victim) {
            prop_assert!(t.contains(k));
        }
        validate_trie(&t);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

const SMALL_SET: [&str; 6] = ["1000", "1100", "1110", "1111", "1101", "0011"];

#[test]
fn exhaustive_insert_order_small_set() {
    for_each_permutation(&SMALL_SET, |perm| {
        let mut t = PatriciaTrie::new();
        for k in &perm {
            t.insert(k).unwrap();
        }
        validate_trie(&t);
        for k in SMALL_SET {
            assert!(t.contains(k), "missing {k} after inserting {perm:?}");
        }
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    // Insert in a fixed order, then remove in all permutations.
    let mut base = PatriciaTrie::new();
    for k in SMALL_SET {
        base.insert(k).unwrap();
    }

    for_each_permutation(&SMALL_SET, |perm| {
        let mut t = base.clone();
        let mut remaining: Vec<&str> = SMALL_SET.to_vec();

        for k in perm {
            t.delete(k).unwrap();
            remaining.retain(|r| *r != k);
            assert_eq!(t.len(), remaining.len());
            for r in &remaining {
                assert!(t.contains(r), "lost {r} after deleting {k}");
            }
            validate_trie(&t);
        }
        assert!(t.is_empty());
        assert_eq!(t.delete("1"), Err(DeleteError::EmptyTree));
    });
}

#[test]
fn randomized_insert_delete_search() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(7);
    let mut t = PatriciaTrie::new();
    let mut m: BTreeMap<String, String> = BTreeMap::new();

    for _ in 0..20_000 {
        let len = rng.gen_range(1..=16);
        let key: String = (0..len)
            .map(|_| if rng.gen_bool(0.5) { '1' } else { '0' })
            .collect();
        let canon = canonical(&key).to_string();

        match rng.gen_range(0..100) {
            0..=54 => {
                let fresh = !m.contains_key(&canon);
                assert_eq!(t.insert(&key).is_ok(), fresh);
                if fresh {
                    m.insert(canon, key);
                }
            }
            55..=84 => {
                let present = m.get(&canon) == Some(&key);
                assert_eq!(t.delete(&key).is_ok(), present);
                if present {
                    m.remove(&canon);
                }
            }
            _ => {
                assert_eq!(t.contains(&key), m.get(&canon) == Some(&key));
            }
        }
    }

    assert_eq!(t.len(), m.len());
    validate_trie(&t);
}
