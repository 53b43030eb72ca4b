//! Tests for inserting, replacing and removing entries.

use collectia::{Array, Collection, Key, Value, array};

use crate::helpers::*;

/// `{0: 1, A: a, 1: 2, B: b, 2: 3}`
fn removal_elements() -> Array {
    let mut elements = Array::new();
    elements.push(1);
    elements.insert("A", "a");
    elements.push(2);
    elements.insert("B", "b");
    elements.push(3);
    elements
}

#[test]
fn test_add_append_and_push_assign_sequential_indices() {
    let expected = indexed_elements();

    let mut added = Collection::new();
    let mut appended = Collection::new();
    let mut pushed = Collection::new();
    for value in expected.values() {
        added.add(value.clone());
        appended.append(value.clone());
        pushed.push(value.clone());
    }

    for collection in [&added, &appended, &pushed] {
        assert_eq!(collection.len(), expected.len());
        assert_eq!(collection.to_array(true), expected);
    }
}

#[test]
fn test_add_is_chainable() {
    let mut collection = Collection::new();
    collection.add("a").add("b").push("c");
    assert_eq!(collection.to_array(true), array!["a", "b", "c"]);
}

#[test]
fn test_auto_index_follows_highest_integer_key() {
    let mut collection = Collection::new();
    collection.set(5, "five").unwrap();
    collection.set("name", "x").unwrap();
    collection.add("six");

    assert_eq!(keys_of(&collection), vec![Key::Index(5), name("name"), Key::Index(6)]);
}

#[test]
fn test_auto_index_reuses_removed_highest_index() {
    let mut collection = Collection::new();
    collection.add("x").add("y");
    collection.remove(1).unwrap();
    collection.add("z");

    assert_eq!(keys_of(&collection), indices(0..2));
    assert_eq!(collection.get(1).unwrap(), &"z");
}

#[test]
fn test_auto_index_does_not_fill_lower_gaps() {
    let mut collection = Collection::new();
    collection.add("a").add("b").add("c");
    collection.remove(0).unwrap();
    collection.add("d");

    assert_eq!(keys_of(&collection), indices([1, 2, 3]));
}

#[test]
fn test_set_null_key_appends() {
    let mut collection = Collection::from_source(array! {"A" => "a"}).unwrap();
    collection.set(Value::Null, "first").unwrap();
    collection.set(None::<&str>, "second").unwrap();

    assert_eq!(keys_of(&collection), vec![name("A"), Key::Index(0), Key::Index(1)]);
}

#[test]
fn test_set_null_key_fails_when_next_index_is_occupied() {
    let mut collection = Collection::new();
    collection.set(u64::MAX, "existing").unwrap();

    let err = collection.set(None::<Key>, "appended").unwrap_err();

    assert!(err.is_invalid_argument());
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.get(u64::MAX).unwrap(), "existing");
}

#[test]
#[should_panic(expected = "next index is already occupied")]
fn test_add_panics_when_next_index_is_occupied() {
    let mut collection = Collection::new();
    collection.set(u64::MAX, "existing").unwrap();
    collection.add("appended");
}

#[test]
fn test_set_existing_key_keeps_position() {
    let mut collection = collection_of(&associative_elements());
    collection.set("C", "replaced").unwrap();

    assert_eq!(collection.len(), 5);
    assert_eq!(keys_of(&collection)[2], name("C"));
    assert_eq!(collection.get("C").unwrap(), &"replaced");
}

#[test]
fn test_set_normalizes_keys() {
    let mut collection = Collection::new();
    collection.set("3", "from text").unwrap();
    collection.set(3u8, "from integer").unwrap();
    collection.set(1.9, "from float").unwrap();
    collection.set(true, "from bool").unwrap();
    collection.set("03", "leading zero").unwrap();

    assert_eq!(
        collection.to_array(true),
        array! {3u64 => "from integer", 1u64 => "from bool", "03" => "leading zero"}
    );
}

#[test]
fn test_set_rejects_invalid_keys() {
    let mut collection = collection_of(&indexed_elements());

    assert!(collection.set(-1, "x").unwrap_err().is_invalid_argument());
    assert!(collection.set(f64::NAN, "x").unwrap_err().is_invalid_argument());
    assert!(
        collection
            .set(Value::from(array![1]), "x")
            .unwrap_err()
            .is_invalid_argument()
    );
    assert!(
        collection
            .set(Value::from(Collection::new()), "x")
            .unwrap_err()
            .is_invalid_argument()
    );

    assert_eq!(collection.to_array(true), indexed_elements());
}

#[test]
fn test_prepend_reverses_insertion_order() {
    let elements = indexed_elements();

    let mut prepended = Collection::new();
    let mut unshifted = Collection::new();
    for value in elements.values() {
        prepended.prepend(value.clone());
        unshifted.unshift(value.clone());
    }

    let reversed: Array = elements.values().rev().cloned().collect();
    assert_eq!(prepended.to_array(true), reversed);
    assert_eq!(unshifted.to_array(true), reversed);
    assert_ne!(prepended.to_array(true), elements);
}

#[test]
fn test_prepend_keeps_string_keys() {
    let mut collection = collection_of(&mixed_elements());
    collection.prepend("front");

    assert_eq!(
        keys_of(&collection),
        vec![Key::Index(0), name("A"), name("B"), Key::Index(1), Key::Index(2), Key::Index(3)]
    );
    assert_eq!(collection.get(1).unwrap(), &3);
}

#[test]
fn test_remove_by_key() {
    let mut collection = collection_of(&removal_elements());

    assert_eq!(collection.remove(0).unwrap(), Some(Value::Int(1)));
    assert_eq!(collection.remove(1).unwrap(), Some(Value::Int(2)));
    assert_eq!(collection.remove("A").unwrap(), Some(Value::from("a")));
    assert_eq!(collection.remove("non-existent").unwrap(), None);

    assert_eq!(collection.to_array(true), array! {"B" => "b", 2u64 => 3});
}

#[test]
fn test_remove_null_value_by_key() {
    let mut collection = Collection::from_source(array![Value::Null]).unwrap();

    assert_eq!(collection.remove(0).unwrap(), Some(Value::Null));
    assert!(collection.is_empty());
}

#[test]
fn test_remove_rejects_null_key() {
    let mut collection = collection_of(&indexed_elements());
    let err = collection.remove(Value::Null).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(collection.len(), 5);
}

#[test]
fn test_remove_element() {
    let nested = Collection::from_source(array!["object"]).unwrap();
    let mut elements = removal_elements();
    elements.insert("object", nested.clone());
    let mut collection = collection_of(&elements);

    assert!(collection.remove_element(&1));
    assert!(collection.remove_element(&2));
    assert!(collection.remove_element("a"));
    assert!(collection.remove_element(&nested));
    assert!(!collection.remove_element("non-existent"));

    assert_eq!(collection.to_array(true), array! {"B" => "b", 2u64 => 3});
}

#[test]
fn test_remove_element_takes_first_match_only() {
    let mut collection = Collection::from_source(array!["x", "y", "x"]).unwrap();

    assert!(collection.remove_element("x"));
    assert_eq!(keys_of(&collection), indices([1, 2]));
}

#[test]
fn test_remove_null_element() {
    let mut collection = Collection::from_source(array![Value::Null]).unwrap();

    assert!(collection.remove_element(&Value::Null));
    assert!(collection.is_empty());
}

#[test]
fn test_remove_element_is_strict() {
    let mut collection = Collection::from_source(array![1, "1", 1.0]).unwrap();

    assert!(collection.remove_element(&1.0));
    assert_eq!(collection.to_array(true), array![1, "1"]);
}

#[test]
fn test_shift() {
    for (label, elements) in element_sets() {
        let mut collection = collection_of(&elements);
        let first = elements.values().next().cloned();

        assert_eq!(collection.shift(), first, "{label}");
        assert_eq!(collection.len(), elements.len() - 1, "{label}");
    }
}

#[test]
fn test_shift_renumbers_indices() {
    let mut collection = collection_of(&indexed_elements());
    collection.shift();

    assert_eq!(collection.to_array(true), array![2, 3, 4, 5]);
}

#[test]
fn test_pop() {
    for (label, elements) in element_sets() {
        let mut collection = collection_of(&elements);
        let last = elements.values().last().cloned();

        assert_eq!(collection.pop(), last, "{label}");
        assert_eq!(collection.len(), elements.len() - 1, "{label}");
    }
}

#[test]
fn test_shift_and_pop_on_empty_collection() {
    let mut collection = Collection::new();
    assert_eq!(collection.shift(), None);
    assert_eq!(collection.pop(), None);
}

#[test]
fn test_clear() {
    for (label, elements) in element_sets() {
        let mut collection = collection_of(&elements);
        collection.clear();

        assert!(collection.is_empty(), "{label}");
        assert_ne!(collection.len(), elements.len(), "{label}");
    }
}

#[test]
fn test_offset_set_and_unset() {
    let mut collection = Collection::new();
    assert!(!collection.offset_exists(0).unwrap());

    collection.offset_set(None::<Key>, "test_isset_unset").unwrap();
    assert!(collection.offset_exists(0).unwrap());

    collection.offset_unset(0).unwrap();
    assert!(!collection.offset_exists(0).unwrap());

    // Unsetting an absent key is not an error
    collection.offset_unset("missing").unwrap();
}

#[test]
fn test_get_mut_and_values_mut() {
    let mut collection = collection_of(&indexed_elements());
    *collection.get_mut(0).unwrap() = Value::from("changed");
    for value in collection.values_mut() {
        if let Some(n) = value.as_int() {
            *value = Value::from(n * 10);
        }
    }

    assert_eq!(collection.to_array(true), array!["changed", 20, 30, 40, 50]);
    assert!(collection.get_mut("missing").unwrap_err().is_out_of_bounds());
}
