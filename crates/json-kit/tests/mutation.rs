use json_kit::{JsonArray, JsonError, JsonObject, Value};

#[test]
fn test_put_opt_none_removes_key() {
    let json = JsonObject::from_json_str(r#"{"key1":123,"key3":null}"#).unwrap();
    json.put_opt("key1", None::<i64>);
    assert!(!json.contains_key("key1"));
    assert_eq!(json.keys(), vec!["key3"]);

    // Unsetting a key that was never there is a no-op.
    json.put_opt("nope", None::<i64>);
    assert_eq!(json.len(), 1);
}

#[test]
fn test_set_null_then_remove() {
    let json = JsonObject::from_json_str(r#"{"key1":123,"key3":null}"#).unwrap();
    json.set_null("key1");
    assert!(json.contains_key("key1"));
    assert_eq!(json.i64("key1"), None);
    assert_eq!(json.get("key2"), None);

    assert_eq!(json.remove("key1"), Some(Value::Null));
    assert_eq!(json.get("key1"), None);
    assert!(json.contains_key("key3"));
    assert_eq!(json.remove("key1"), None);
}

#[test]
fn test_overwrite_keeps_insertion_position() {
    let json = JsonObject::new();
    json.put("a", 1).put("b", 2).put("c", 3).put("a", "again");
    assert_eq!(json.keys(), vec!["a", "b", "c"]);
    assert_eq!(json.to_json_string(false).unwrap(), r#"{"a":"again","b":2,"c":3}"#);
}

#[test]
fn test_array_put_and_replace() {
    let a = JsonArray::new();
    a.put(1).put(2).put(3);
    a.put_at(1, 9).unwrap();
    assert_eq!(a.to_vec(), vec![Value::from(1), Value::from(9), Value::from(3)]);

    a.put_opt_at(0, None::<i64>).unwrap();
    assert!(a.is_null(0));
    assert_eq!(a.len(), 3);
}

#[test]
fn test_array_put_at_never_grows() {
    let a = JsonArray::from(vec![1, 2, 3]);
    for index in [3, 4, usize::MAX] {
        let err = a.put_at(index, 0).unwrap_err();
        assert!(matches!(err, JsonError::IndexOutOfBound { len: 3, .. }));
    }
    assert!(JsonArray::new().put_opt_at(0, Some(1)).is_err());
    assert_eq!(a.len(), 3);
}

#[test]
fn test_array_put_opt_appends_null() {
    let a = JsonArray::from(vec!["x"]);
    let before = a.len();
    a.put_opt(None::<&str>);
    assert_eq!(a.len(), before + 1);
    assert_eq!(a.get(before), Some(Value::Null));
}

#[test]
fn test_remove_at_shifts() {
    let a = JsonArray::from(vec![10, 20, 30]);
    assert_eq!(a.remove_at(1).unwrap(), Value::from(20));
    assert_eq!(a.i64(1), Some(30));
    assert!(a.remove_at(2).unwrap_err().is_index_out_of_bound());
}

#[test]
fn test_nested_builders_attach_children() {
    let settings = JsonObject::new();
    let fonts = JsonArray::new_in_object(&settings, "fonts");
    JsonObject::new_in_array(&fonts).put("name", "Sans").put("size", 12);
    JsonObject::new_in_array(&fonts).put("name", "Serif").put("size", 13);
    let nested = JsonArray::new_in_array(&fonts);
    nested.put(true);

    let output = settings.to_json_string(false).unwrap();
    let input = JsonObject::from_json_str(&output).unwrap();
    let size = input.array("fonts").and_then(|f| f.object(1)).and_then(|o| o.i64("size"));
    assert_eq!(size, Some(13));
    assert_eq!(input.array("fonts").and_then(|f| f.array(2)).map(|a| a.len()), Some(1));
}

#[test]
fn test_extend_strings_and_clear() {
    let json = JsonObject::new();
    json.extend_strings([("a", "1"), ("b", "2")]);
    assert_eq!(json.string("b").as_deref(), Some("2"));
    json.clear();
    assert!(json.is_empty());
}

#[test]
fn test_mutating_subtree_is_visible_from_root() {
    let root = JsonObject::from_json_str(r#"{"inner":{"list":[1]}}"#).unwrap();
    root.object("inner")
        .and_then(|inner| inner.array("list"))
        .unwrap()
        .put(2);
    assert_eq!(root.to_json_string(false).unwrap(), r#"{"inner":{"list":[1,2]}}"#);
}

#[test]
fn test_deep_clone_is_independent() {
    let root = JsonObject::from_json_str(r#"{"inner":{"list":[1]}}"#).unwrap();
    let copy = root.deep_clone();
    copy.object("inner").and_then(|i| i.array("list")).unwrap().put(2);
    assert_eq!(root.to_json_string(false).unwrap(), r#"{"inner":{"list":[1]}}"#);
    assert_ne!(root, copy);
}
