//! Property-based round-trip invariants for the file format and the
//! share codec: any tree the store can hold survives JSON and share-string
//! round trips deeply equal, and rebuilt stores keep the forest intact.

use bramble_doc::file;
use bramble_doc::measure::MonospaceMeasurer;
use bramble_doc::node::NodeId;
use bramble_doc::share;
use bramble_doc::store::NodeStore;
use proptest::prelude::*;

/// Build a store from a parent-index list with printable node texts.
fn build_store(parents: &[usize], texts: &[String]) -> NodeStore {
    let mut store = NodeStore::new(Box::new(MonospaceMeasurer));
    let root_text = texts.first().map_or("root", String::as_str);
    let root = store.add_root(root_text, 0.0, 0.0);
    let mut ids = vec![root];
    for (i, &raw) in parents.iter().enumerate() {
        let parent = ids[raw % (i + 1)];
        let text = texts.get(i + 1).map_or("node", String::as_str);
        ids.push(store.add_child(parent, text).unwrap());
    }
    store
}

fn count_reachable(store: &NodeStore) -> usize {
    let mut count = 0;
    let mut stack: Vec<NodeId> = store.roots().to_vec();
    while let Some(id) = stack.pop() {
        count += 1;
        stack.extend_from_slice(store.children(id).unwrap());
    }
    count
}

proptest! {
    #[test]
    fn json_round_trip_is_deep_equal(
        parents in proptest::collection::vec(0usize..24, 0..24),
        texts in proptest::collection::vec("[ -~]{0,40}", 1..25),
        collapse in proptest::collection::vec(any::<bool>(), 0..25),
    ) {
        let mut store = build_store(&parents, &texts);
        for (i, &flag) in collapse.iter().enumerate() {
            if flag && store.contains(NodeId(i as u64)) {
                store.set_collapsed(NodeId(i as u64), true).unwrap();
            }
        }

        let map = file::to_file(&store);
        let json = file::to_json(&map).unwrap();
        let reparsed = file::parse_json(&json).unwrap();
        prop_assert_eq!(&reparsed, &map);

        let rebuilt = file::from_file(reparsed, Box::new(MonospaceMeasurer)).unwrap();
        prop_assert_eq!(file::to_file(&rebuilt), map);
        prop_assert_eq!(rebuilt.len(), store.len());
        prop_assert_eq!(count_reachable(&rebuilt), store.len());
    }

    #[test]
    fn share_round_trip_is_deep_equal(
        parents in proptest::collection::vec(0usize..12, 0..12),
        texts in proptest::collection::vec("[ -~]{0,24}", 1..13),
    ) {
        let store = build_store(&parents, &texts);
        let map = file::to_file(&store);
        let encoded = share::encode_share(&map);
        prop_assert!(!encoded.contains('+'));
        prop_assert!(!encoded.contains('/'));
        prop_assert!(!encoded.contains('='));
        prop_assert_eq!(share::decode_share(&encoded), Some(map));
    }

    #[test]
    fn decode_share_never_panics(garbage in "[A-Za-z0-9_-]{0,200}") {
        // Arbitrary URL-safe input: decodes to something or to None,
        // never a crash.
        let _ = share::decode_share(&garbage);
    }
}
