//! Lazy sequences over live containers.
//!
//! Each iterator holds its own handle to the container and reads one slot
//! per step, so it sees the storage as it is at that step. The range of
//! slots is fixed when the iterator is created; a slot that has disappeared
//! by the time it is reached ends the iteration. Mutating a container while
//! iterating it is not a supported use: elements may be skipped or repeated.

use crate::array::JsonArray;
use crate::object::JsonObject;
use crate::value::Value;

enum Source {
    Array(JsonArray),
    Object(JsonObject),
}

impl Source {
    fn len(&self) -> usize {
        match self {
            Source::Array(a) => a.len(),
            Source::Object(o) => o.len(),
        }
    }

    fn value_at(&self, index: usize) -> Option<Value> {
        match self {
            Source::Array(a) => a.get(index),
            Source::Object(o) => o.value_at(index),
        }
    }
}

/// Values of an array (in order) or of an object (in insertion order).
pub struct Values {
    source: Source,
    front: usize,
    back: usize,
}

impl Values {
    pub(crate) fn of_array(array: JsonArray) -> Self {
        Self::new(Source::Array(array))
    }

    pub(crate) fn of_object(object: JsonObject) -> Self {
        Self::new(Source::Object(object))
    }

    fn new(source: Source) -> Self {
        let back = source.len();
        Self {
            source,
            front: 0,
            back,
        }
    }

    fn exhaust(&mut self) -> Option<Value> {
        self.front = self.back;
        None
    }
}

impl Iterator for Values {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        if self.front >= self.back {
            return None;
        }
        match self.source.value_at(self.front) {
            Some(v) => {
                self.front += 1;
                Some(v)
            }
            None => self.exhaust(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.back - self.front))
    }
}

impl DoubleEndedIterator for Values {
    fn next_back(&mut self) -> Option<Value> {
        if self.front >= self.back {
            return None;
        }
        match self.source.value_at(self.back - 1) {
            Some(v) => {
                self.back -= 1;
                Some(v)
            }
            None => self.exhaust(),
        }
    }
}

/// `(key, value)` pairs of an object in insertion order.
pub struct KeyValues {
    object: JsonObject,
    front: usize,
    back: usize,
}

impl KeyValues {
    pub(crate) fn new(object: JsonObject) -> Self {
        let back = object.len();
        Self {
            object,
            front: 0,
            back,
        }
    }
}

impl Iterator for KeyValues {
    type Item = (String, Value);

    fn next(&mut self) -> Option<(String, Value)> {
        if self.front >= self.back {
            return None;
        }
        match self.object.entry_at(self.front) {
            Some(entry) => {
                self.front += 1;
                Some(entry)
            }
            None => {
                self.front = self.back;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.back - self.front))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_values_follow_insertion_order() {
        let o = JsonObject::new();
        o.put("akey", "avalue").put("ckey", "cvalue").put("bkey", "bvalue");
        let values: Vec<String> = o.values().filter_map(|v| v.as_str().map(str::to_owned)).collect();
        assert_eq!(values, vec!["avalue", "cvalue", "bvalue"]);
        let keys: Vec<String> = o.key_values().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["akey", "ckey", "bkey"]);
    }

    #[test]
    fn test_front_and_back_meet() {
        let a = JsonArray::from(vec![1, 2, 3]);
        let mut it = a.values();
        assert_eq!(it.next(), Some(Value::from(1)));
        assert_eq!(it.next_back(), Some(Value::from(3)));
        assert_eq!(it.next(), Some(Value::from(2)));
        assert_eq!(it.next_back(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_shrunk_container_ends_iteration() {
        let a = JsonArray::from(vec![1, 2, 3]);
        let mut it = a.values();
        assert_eq!(it.next(), Some(Value::from(1)));
        a.clear();
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_iteration_sees_live_values() {
        let a = JsonArray::from(vec![1, 2, 3]);
        let mut it = a.values();
        a.put_at(0, 10).unwrap();
        assert_eq!(it.next(), Some(Value::from(10)));
    }
}
