//! Tests for merging array-like sources into a collection.

use collectia::{Collection, Key, Value, array};

use crate::helpers::*;

#[test]
fn test_merge_appends_integer_keys() {
    let mut collection = Collection::from_source(array!["a", "b"]).unwrap();

    collection.merge(array!["c", "d", "e"]).unwrap();

    assert_eq!(collection.len(), 5);
    assert_eq!(collection.to_array(true), array!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_merge_collection_source() {
    let mut collection = Collection::from_source(array!["a", "b"]).unwrap();

    collection
        .merge(Collection::from_source(array!["c", "d", "e"]).unwrap())
        .unwrap();

    assert_eq!(collection.len(), 5);
    assert_eq!(collection.to_array(true), array!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_merge_integer_key_never_overwrites() {
    let mut collection = Collection::from_source(array! {5u64 => "five"}).unwrap();

    collection.merge(array! {5u64 => "again", 9u64 => "nine"}).unwrap();

    assert_eq!(
        collection.to_array(true),
        array! {5u64 => "five", 6u64 => "again", 9u64 => "nine"}
    );
}

#[test]
fn test_merge_deep_collection() {
    let nested = Collection::from_source(array![1, 2]).unwrap();
    let elements = Collection::from_source(array!["a", "b", nested]).unwrap();
    let mut merge_elements = array!["c", "d", "e"];
    merge_elements.insert("assoc", elements.clone());
    let mut collection = Collection::from_source(elements).unwrap();

    collection
        .merge(Collection::from_source(merge_elements).unwrap())
        .unwrap();

    let mut expected = array!["a", "b", array![1, 2], "c", "d", "e"];
    expected.insert("assoc", array!["a", "b", array![1, 2]]);
    assert_eq!(collection.len(), 7);
    assert_eq!(collection.to_array(true), expected);
}

#[test]
fn test_merge_deep_collection_assoc() {
    let mut collection = Collection::from_source(array! {
        "replace" => "me",
        "collection" => Collection::from_source(array!["a", "b"]).unwrap(),
        "noCollection" => "replaced",
    })
    .unwrap();

    let merge_elements = Collection::from_source(array! {
        "replace" => "toNew",
        "collection" => Collection::from_source(array!["c", "d", "e"]).unwrap(),
        "noCollection" => Collection::from_source(array!["a", "b"]).unwrap(),
    })
    .unwrap();
    collection.merge(merge_elements).unwrap();

    assert_eq!(collection.len(), 3);
    assert_eq!(
        collection.to_array(true),
        array! {
            "replace" => "toNew",
            "collection" => array!["a", "b", "c", "d", "e"],
            "noCollection" => array!["a", "b"],
        }
    );
    assert!(collection.get("noCollection").unwrap().is_collection());
}

#[test]
fn test_merge_string_key_deep_merges_nested_collections() {
    let mut collection = Collection::from_source(array! {
        "k" => Collection::from_source(array!["a", "b"]).unwrap(),
    })
    .unwrap();
    let nested_id = collection.get("k").unwrap().as_collection().unwrap().id();

    collection
        .merge(array! {"k" => Collection::from_source(array!["c", "d"]).unwrap()})
        .unwrap();

    assert_eq!(collection.to_array(true), array! {"k" => array!["a", "b", "c", "d"]});
    // Merged into the existing nested collection, not replaced
    assert_eq!(collection.get("k").unwrap().as_collection().unwrap().id(), nested_id);
}

#[test]
fn test_merge_string_key_overwrites_scalars() {
    let mut collection = collection_of(&associative_elements());

    collection.merge(array! {"C" => 3, "F" => "f"}).unwrap();

    assert_eq!(collection.get("C").unwrap(), &3);
    assert_eq!(keys_of(&collection).last(), Some(&name("F")));
    assert_eq!(collection.len(), 6);
}

#[test]
fn test_merge_string_key_replaces_collection_with_scalar() {
    let mut collection = Collection::from_source(array! {
        "k" => Collection::from_source(array!["a"]).unwrap(),
    })
    .unwrap();

    collection.merge(array! {"k" => "scalar"}).unwrap();

    assert_eq!(collection.get("k").unwrap(), &"scalar");
}

#[test]
fn test_merge_nested_plain_array_is_overwritten() {
    let mut collection = Collection::from_source(array! {"k" => array!["a"]}).unwrap();

    collection.merge(array! {"k" => array!["b"]}).unwrap();

    assert_eq!(collection.to_array(true), array! {"k" => array!["b"]});
}

#[test]
fn test_merge_rewraps_new_collections() {
    let incoming = Collection::from_source(array!["x"]).unwrap();
    let incoming_id = incoming.id();
    let mut collection = Collection::new();

    collection.merge(array! {"fresh" => incoming}).unwrap();

    let stored = collection.get("fresh").unwrap().as_collection().unwrap();
    assert_ne!(stored.id(), incoming_id);
    assert_eq!(stored.to_array(true), array!["x"]);
}

#[test]
fn test_merge_is_fluent() {
    let mut collection = Collection::new();

    collection
        .merge(array!["a"])
        .unwrap()
        .merge(array!["b"])
        .unwrap()
        .add("c");

    assert_eq!(collection.to_array(true), array!["a", "b", "c"]);
}

#[test]
fn test_merge_numeric_string_keys_append() {
    let mut collection = Collection::from_source(array!["a"]).unwrap();

    collection
        .merge(Collection::from_iter([(Key::Name("0".to_string()), Value::from("b"))]))
        .unwrap();

    assert_eq!(collection.to_array(true), array!["a", "b"]);
}

#[test]
fn test_merge_fails_when_next_index_is_occupied() {
    let mut collection = Collection::new();
    collection.set(u64::MAX, "last").unwrap();

    let err = collection.merge(array! {u64::MAX => "again"}).unwrap_err();

    assert!(err.is_invalid_argument());
    assert_eq!(collection.to_array(true), array! {u64::MAX => "last"});
}

#[test]
fn test_merge_nested_fails_when_next_index_is_occupied() {
    let mut inner = Collection::new();
    inner.set(u64::MAX, "last").unwrap();
    let mut collection = Collection::from_source(array! {"inner" => inner}).unwrap();

    let source = array! {"inner" => Collection::from_source(array! {u64::MAX => "x"}).unwrap()};
    let err = collection.merge(source).unwrap_err();

    assert!(err.is_invalid_argument());
    assert_eq!(
        collection.to_array(true),
        array! {"inner" => array! {u64::MAX => "last"}}
    );
}

#[test]
fn test_merge_rejects_scalars() {
    let cases: Vec<(Value, &str)> = vec![
        (Value::Null, "null"),
        (Value::from(1), "int"),
        (Value::from("string"), "text"),
    ];

    for (source, type_name) in cases {
        let mut collection = collection_of(&indexed_elements());
        let err = collection.merge(source).unwrap_err();

        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            format!(
                "Invalid argument: Expected argument \"array\" or \"collection\"; \"{type_name}\" given"
            )
        );
        assert_eq!(collection.to_array(true), indexed_elements());
    }
}
