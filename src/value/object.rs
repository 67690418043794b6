use indexmap::map::{IndexMap, IntoIter, Iter};

use super::Value;

/// Ordered map of field names to [`Value`]s.
///
/// Keys are unique: inserting an existing key replaces its value in place,
/// keeping the original position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Object {
    key_value_list: IndexMap<String, Value>,
}

impl Object {
    /// Creates an empty [`Object`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new Object value with a fixed number of
    /// preallocated slots for field-value pairs
    pub fn with_capacity(size: usize) -> Self {
        Self {
            key_value_list: IndexMap::with_capacity(size),
        }
    }

    /// Add a new field with a value.
    ///
    /// If there is already a field for the given key, the existing value is
    /// replaced and returned.
    pub fn add_field(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.key_value_list.insert(key.into(), value)
    }

    /// Check if the object already contains a field with the given name
    pub fn contains_field(&self, key: &str) -> bool {
        self.key_value_list.contains_key(key)
    }

    /// Get the value for a given field
    pub fn get_field_value(&self, key: &str) -> Option<&Value> {
        self.key_value_list.get(key)
    }

    /// Get a iterator over all field value pairs
    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.key_value_list.iter()
    }

    /// Get the current number of fields
    pub fn field_count(&self) -> usize {
        self.key_value_list.len()
    }

    /// Returns `true` if this [`Object`] has no fields.
    pub fn is_empty(&self) -> bool {
        self.key_value_list.is_empty()
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.key_value_list.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Self::Object(o)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Object {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
    {
        let iter = iter.into_iter();
        let mut ret = Self::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            ret.add_field(k, v);
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::{Object, Value};

    #[test]
    fn replaces_existing_key_in_place() {
        let mut obj = Object::new();
        obj.add_field("a", Value::from(1));
        obj.add_field("b", Value::from(2));

        assert_eq!(obj.add_field("a", Value::from(3)), Some(Value::from(1)));
        assert_eq!(obj.field_count(), 2);
        assert_eq!(
            obj.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
            ["a", "b"],
        );
        assert_eq!(obj.get_field_value("a"), Some(&Value::from(3)));
    }
}
