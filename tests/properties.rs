//! Property tests of `Collection` operations over arbitrary entries.

use keyed::prelude::*;
use proptest::prelude::*;

fn any_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        any::<i64>().prop_map(Key::Int),
        "[a-z]{0,4}".prop_map(Key::Text),
    ]
}

fn any_collection() -> impl Strategy<Value = Collection<i32>> {
    prop::collection::vec((any_key(), any::<i32>()), 0..32)
        .prop_map(|entries| entries.into_iter().collect::<Collection<i32>>())
}

fn entries(xs: &Collection<i32>) -> Vec<(Key, i32)> {
    xs.iter().map(|(key, value)| (key.clone(), *value)).collect()
}

proptest! {
    #[test]
    fn prop_set_then_get_eq_value(
        mut xs in any_collection(),
        key in any_key(),
        value in any::<i32>()
    ) {
        xs.set(key.clone(), value).unwrap();
        prop_assert_eq!(xs.get(&key), Ok(&value));
    }

    #[test]
    fn prop_remove_then_absent(mut xs in any_collection(), key in any_key()) {
        let expected = xs.get(&key).ok().copied();
        prop_assert_eq!(xs.remove(&key).unwrap(), expected);
        prop_assert_eq!(xs.has(&key), Ok(false));
        prop_assert_eq!(xs.get_or_default(&key, &-1), Ok(&-1));
    }

    #[test]
    fn prop_map_does_not_mutate(xs in any_collection()) {
        let before = xs.clone();
        let ys = xs.map(|x| x.wrapping_mul(2));
        prop_assert_eq!(&xs, &before);
        prop_assert_eq!(xs.keys(), ys.keys());
    }

    #[test]
    fn prop_transform_preserves_keys(mut xs in any_collection()) {
        let keys = xs.keys();
        let expected = xs.map(|x| x.wrapping_add(1));
        xs.transform(|x| x.wrapping_add(1));
        prop_assert_eq!(xs.keys(), keys);
        prop_assert_eq!(xs, expected);
    }

    #[test]
    fn prop_filter_preserves_order_and_keys(mut xs in any_collection()) {
        let expected: Vec<_> = entries(&xs).into_iter().filter(|(_, x)| x % 3 == 0).collect();
        xs.filter(|x, _| x % 3 == 0);
        prop_assert_eq!(entries(&xs), expected);
    }

    #[test]
    fn prop_keys_are_reindexed(xs in any_collection()) {
        let keys = xs.keys();
        prop_assert_eq!(keys.len(), xs.len());
        for (index, ((key, value), (source, _))) in keys.iter().zip(xs.iter()).enumerate() {
            prop_assert_eq!(key, &Key::Int(index as i64));
            prop_assert_eq!(value, source);
        }
    }

    #[test]
    fn prop_chunks_concatenate_to_source(xs in any_collection(), length in 1usize..8) {
        let chunks = xs.chunk(length, true).unwrap();
        let n = chunks.len();
        for (index, (_, chunk)) in chunks.iter().enumerate() {
            prop_assert!(chunk.len() <= length);
            if index + 1 < n {
                prop_assert_eq!(chunk.len(), length);
            }
        }
        let concatenated: Vec<_> = chunks.iter().flat_map(|(_, chunk)| entries(chunk)).collect();
        prop_assert_eq!(concatenated, entries(&xs));
    }

    #[test]
    fn prop_reindexed_chunks_start_at_zero(xs in any_collection(), length in 1usize..8) {
        let chunks = xs.chunk(length, false).unwrap();
        for (index, (key, chunk)) in chunks.iter().enumerate() {
            prop_assert_eq!(key, &Key::Int(index as i64));
            for (position, (key, _)) in chunk.iter().enumerate() {
                prop_assert_eq!(key, &Key::Int(position as i64));
            }
        }
    }

    #[test]
    fn prop_invalid_key_does_not_mutate(mut xs in any_collection(), x in any::<f64>()) {
        let before = xs.clone();
        prop_assert!(xs.set(x, 0).is_err());
        prop_assert!(xs.remove(&x).is_err());
        prop_assert!(xs.unset(&true).is_err());
        prop_assert_eq!(xs, before);
    }
}
