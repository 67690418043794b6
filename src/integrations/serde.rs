use std::fmt;

use indexmap::IndexMap;
use serde::{
    Deserialize, Serialize,
    de::{self, Deserializer},
    ser::{SerializeMap as _, Serializer},
};

use crate::{
    executor::FieldError,
    value::{Object, Value},
};

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(1))?;

        map.serialize_key("message")?;
        map.serialize_value(&self.to_string())?;

        map.end()
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(self.field_count()))?;
        for (f, v) in self.iter() {
            map.serialize_key(f)?;
            map.serialize_value(v)?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => ser.serialize_unit(),
            Self::Boolean(b) => ser.serialize_bool(*b),
            Self::Int(i) => ser.serialize_i32(*i),
            Self::Float(f) => ser.serialize_f64(*f),
            Self::String(s) | Self::Enum(s) => ser.serialize_str(s),
            Self::List(l) => l.serialize(ser),
            Self::Object(o) => o.serialize(ser),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> de::Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a valid input value")
            }

            fn visit_bool<E: de::Error>(self, b: bool) -> Result<Self::Value, E> {
                Ok(Value::Boolean(b))
            }

            fn visit_i64<E: de::Error>(self, n: i64) -> Result<Self::Value, E> {
                // Integers out of the `Int` range are kept as floats, the way
                // `JSON.stringify()` writes every integral number.
                Ok(i32::try_from(n).map_or_else(|_| Value::Float(n as f64), Value::Int))
            }

            fn visit_u64<E: de::Error>(self, n: u64) -> Result<Self::Value, E> {
                Ok(i32::try_from(n).map_or_else(|_| Value::Float(n as f64), Value::Int))
            }

            fn visit_f64<E: de::Error>(self, f: f64) -> Result<Self::Value, E> {
                Ok(Value::Float(f))
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
                self.visit_string(s.into())
            }

            fn visit_string<E: de::Error>(self, s: String) -> Result<Self::Value, E> {
                Ok(Value::String(s))
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_seq<V>(self, mut visitor: V) -> Result<Self::Value, V::Error>
            where
                V: de::SeqAccess<'de>,
            {
                let mut vals = Vec::new();
                while let Some(v) = visitor.next_element()? {
                    vals.push(v);
                }
                Ok(Value::List(vals))
            }

            fn visit_map<V>(self, mut visitor: V) -> Result<Self::Value, V::Error>
            where
                V: de::MapAccess<'de>,
            {
                let mut obj =
                    IndexMap::<String, Value>::with_capacity(visitor.size_hint().unwrap_or(0));
                while let Some((key, val)) = visitor.next_entry()? {
                    obj.insert(key, val);
                }
                Ok(Value::Object(obj.into_iter().collect()))
            }
        }

        de.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{from_str, json, to_string};

    use crate::{FieldError, Value};

    #[test]
    fn serializes_values_in_field_order() {
        let value = graphql_value!({
            "kind": (Value::enum_value("OBJECT")),
            "name": "__Type",
            "ofType": null,
            "fields": [{"isDeprecated": false}],
            "weight": 1.5,
        });

        assert_eq!(
            to_string(&value).unwrap(),
            r#"{"kind":"OBJECT","name":"__Type","ofType":null,"fields":[{"isDeprecated":false}],"weight":1.5}"#,
        );
    }

    #[test]
    fn deserializes_input_values() {
        let value: Value = from_str(r#"{"includeDeprecated": true, "ids": [1, null], "big": 3000000000}"#)
            .unwrap();

        assert_eq!(
            value,
            graphql_value!({
                "includeDeprecated": true,
                "ids": [1, null],
                "big": 3_000_000_000.0,
            }),
        );
    }

    #[test]
    fn serializes_errors_as_messages() {
        let err = FieldError::MissingRequiredArgument("name".into());

        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"message": "missing required argument \"name\""}),
        );
    }
}
