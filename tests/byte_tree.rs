use std::cmp::Ordering;
use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rbt_index::byte_tree::ByteRange;
use rbt_index::{ByteTree, Error};

fn by_u32(a: &[u8], b: &[u8]) -> Ordering {
    let key = |bytes: &[u8]| u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    key(a).cmp(&key(b))
}

fn keys(range: ByteRange<'_>) -> Vec<u32> {
    range.map(|(k, _)| u32::from_le_bytes(k.try_into().unwrap())).collect()
}

fn u32_tree() -> ByteTree {
    ByteTree::create(4, 8, Some(by_u32), false).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays puts and removes through the byte interface and checks the
    /// final contents against BTreeMap.
    #[test]
    fn byte_ops_match_btreemap(ops in proptest::collection::vec((any::<bool>(), 0u32..300, any::<u64>()), 1_000)) {
        let mut tree = u32_tree();
        let mut model = BTreeMap::new();
        let mut out = [0u8; 8];

        for (put, key, value) in ops {
            let key_bytes = key.to_le_bytes();
            if put {
                let existed = tree.put_swap(&key_bytes, &value.to_le_bytes(), &mut out).unwrap();
                let previous = model.insert(key, value);
                prop_assert_eq!(existed, previous.is_some());
                if let Some(previous) = previous {
                    prop_assert_eq!(u64::from_le_bytes(out), previous);
                }
            } else {
                match model.remove(&key) {
                    Some(value) => {
                        prop_assert_eq!(tree.remove(&key_bytes, &mut out), Ok(()));
                        prop_assert_eq!(u64::from_le_bytes(out), value);
                    }
                    None => prop_assert_eq!(tree.remove(&key_bytes, &mut out), Err(Error::NotFound)),
                }
            }
            tree.validate();
            prop_assert_eq!(tree.len(), model.len());
        }

        let entries: Vec<(u32, u64)> = tree
            .range(None, false, None, false)
            .unwrap()
            .map(|(k, v)| (u32::from_le_bytes(k.try_into().unwrap()), u64::from_le_bytes(v.try_into().unwrap())))
            .collect();
        prop_assert_eq!(entries, model.into_iter().collect::<Vec<_>>());
    }
}

#[test]
fn duplicate_put_scenario() {
    // 8-byte numeric keys and values, big-endian so bytewise order is numeric.
    let mut tree = ByteTree::create(8, 8, Some(|a: &[u8], b: &[u8]| a.cmp(b)), false).unwrap();
    for (step, key) in [7u64, 3, 18, 1, 22, 3].into_iter().enumerate() {
        tree.put(&key.to_be_bytes(), &(step as u64).to_be_bytes()).unwrap();
        tree.validate();
    }

    assert_eq!(tree.len(), 5);
    assert_eq!(tree.get(&3u64.to_be_bytes()), Ok(&5u64.to_be_bytes()[..]));

    let entries: Vec<(u64, u64)> = tree
        .range(None, false, None, false)
        .unwrap()
        .map(|(k, v)| (u64::from_be_bytes(k.try_into().unwrap()), u64::from_be_bytes(v.try_into().unwrap())))
        .collect();
    assert_eq!(entries, [(1, 3), (3, 5), (7, 0), (18, 2), (22, 4)]);
}

#[test]
fn range_scenario() {
    let mut tree = u32_tree();
    // Little-endian keys do not sort bytewise; the comparator decides the order.
    for key in (10u32..30).rev() {
        tree.put(&key.to_le_bytes(), &u64::from(key).to_le_bytes()).unwrap();
    }

    let range = tree.range(Some(&10u32.to_le_bytes()), true, Some(&20u32.to_le_bytes()), false).unwrap();
    assert_eq!(keys(range), (10..20).collect::<Vec<_>>());

    let range = tree.range(Some(&10u32.to_le_bytes()), false, Some(&20u32.to_le_bytes()), true).unwrap();
    assert_eq!(keys(range), (11..=20).collect::<Vec<_>>());

    let range = tree.range(Some(&25u32.to_le_bytes()), true, Some(&15u32.to_le_bytes()), true).unwrap();
    assert_eq!(keys(range), Vec::<u32>::new());

    let mut range = tree.range(None, false, None, false).unwrap();
    assert_eq!(range.next_back().map(|(_, v)| v.to_vec()), Some(29u64.to_le_bytes().to_vec()));
    range.reset(Some(&27u32.to_le_bytes()), true, None, false).unwrap();
    assert_eq!(keys(range), [27, 28, 29]);
}

#[test]
fn get_and_get_mut() {
    let mut tree = u32_tree();
    tree.put(&1u32.to_le_bytes(), &[1; 8]).unwrap();

    tree.get_mut(&1u32.to_le_bytes()).unwrap()[0] = 9;
    assert_eq!(tree.get(&1u32.to_le_bytes()), Ok(&[9, 1, 1, 1, 1, 1, 1, 1][..]));
    assert_eq!(tree.get(&2u32.to_le_bytes()), Err(Error::NotFound));
    assert!(matches!(tree.get_mut(&[0; 3]), Err(Error::InvalidArgument { .. })));

    let mut short = [0u8; 4];
    assert!(matches!(
        tree.put_swap(&1u32.to_le_bytes(), &[2; 8], &mut short),
        Err(Error::InvalidArgument { .. })
    ));
    assert_eq!(tree.get(&1u32.to_le_bytes()).unwrap()[0], 9);
    assert_eq!(format!("{tree:?}"), "{[1, 0, 0, 0]: [9, 1, 1, 1, 1, 1, 1, 1]}");
}
