use futures::future::{self, BoxFuture, FutureExt as _};

use crate::{
    executor::{ExecutionResult, FieldError, FieldResult},
    modified_leaf,
    value::Value,
};

use super::convert::LeafConverter;

modified_leaf!(i32, f64, bool, String, Value);

/// Converter of the built-in `Int` scalar.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntConverter;

impl LeafConverter<i32> for IntConverter {
    fn decode(&self, value: &Value) -> FieldResult<i32> {
        value
            .as_int_value()
            .ok_or_else(|| FieldError::invalid_value("Int", value))
    }

    fn encode<'a>(&'a self, value: i32) -> BoxFuture<'a, ExecutionResult> {
        future::ok(Value::Int(value)).boxed()
    }
}

/// Converter of the built-in `Float` scalar.
///
/// `Int` wire values are widened.
#[derive(Clone, Copy, Debug, Default)]
pub struct FloatConverter;

impl LeafConverter<f64> for FloatConverter {
    fn decode(&self, value: &Value) -> FieldResult<f64> {
        match value {
            Value::Float(f) => Ok(*f),
            Value::Int(i) => Ok(f64::from(*i)),
            _ => Err(FieldError::invalid_value("Float", value)),
        }
    }

    fn encode<'a>(&'a self, value: f64) -> BoxFuture<'a, ExecutionResult> {
        future::ok(Value::Float(value)).boxed()
    }
}

/// Converter of the built-in `String` scalar.
#[derive(Clone, Copy, Debug, Default)]
pub struct StringConverter;

impl LeafConverter<String> for StringConverter {
    fn decode(&self, value: &Value) -> FieldResult<String> {
        value
            .as_string_value()
            .map(Into::into)
            .ok_or_else(|| FieldError::invalid_value("String", value))
    }

    fn encode<'a>(&'a self, value: String) -> BoxFuture<'a, ExecutionResult> {
        future::ok(Value::String(value)).boxed()
    }
}

/// Converter of the built-in `ID` scalar.
///
/// Accepts both `String` and `Int` wire values, always producing a string.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdConverter;

impl LeafConverter<String> for IdConverter {
    fn decode(&self, value: &Value) -> FieldResult<String> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Int(i) => Ok(i.to_string()),
            _ => Err(FieldError::invalid_value("ID", value)),
        }
    }

    fn encode<'a>(&'a self, value: String) -> BoxFuture<'a, ExecutionResult> {
        future::ok(Value::String(value)).boxed()
    }
}

/// Converter of the built-in `Boolean` scalar.
#[derive(Clone, Copy, Debug, Default)]
pub struct BooleanConverter;

impl LeafConverter<bool> for BooleanConverter {
    fn decode(&self, value: &Value) -> FieldResult<bool> {
        value
            .as_bool_value()
            .ok_or_else(|| FieldError::invalid_value("Boolean", value))
    }

    fn encode<'a>(&'a self, value: bool) -> BoxFuture<'a, ExecutionResult> {
        future::ok(Value::Boolean(value)).boxed()
    }
}

/// Pass-through converter for untyped [`Value`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValueConverter;

impl LeafConverter<Value> for ValueConverter {
    fn decode(&self, value: &Value) -> FieldResult<Value> {
        Ok(value.clone())
    }

    fn encode<'a>(&'a self, value: Value) -> BoxFuture<'a, ExecutionResult> {
        future::ok(value).boxed()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        FieldError, Value,
        types::{
            LeafConverter as _,
            TypeModifier::{List, Nullable},
            decode,
            scalars::{BooleanConverter, FloatConverter, IdConverter, IntConverter, StringConverter},
        },
    };

    #[test]
    fn float_widens_int() {
        assert_eq!(FloatConverter.decode(&Value::from(2)), Ok(2.0));
        assert_eq!(FloatConverter.decode(&Value::from(2.5)), Ok(2.5));
        assert_eq!(
            FloatConverter.decode(&Value::from("2")),
            Err(FieldError::invalid_value("Float", &Value::from("2"))),
        );
    }

    #[test]
    fn id_accepts_int_and_string() {
        assert_eq!(IdConverter.decode(&Value::from(7)), Ok("7".to_owned()));
        assert_eq!(IdConverter.decode(&Value::from("x7")), Ok("x7".to_owned()));
        assert!(IdConverter.decode(&Value::from(true)).is_err());
    }

    #[test]
    fn strict_scalars_reject_other_kinds() {
        assert!(IntConverter.decode(&Value::from(1.0)).is_err());
        assert!(StringConverter.decode(&Value::enum_value("A")).is_err());
        assert_eq!(
            BooleanConverter.decode(&Value::from(0)),
            Err(FieldError::invalid_value("Boolean", &Value::from(0))),
        );
    }

    #[test]
    fn null_list_element_is_unexpected_null() {
        assert_eq!(
            decode::<String, _>(&graphql_value!(["a", null]), &[List], &StringConverter),
            Err(FieldError::UnexpectedNull),
        );
        assert!(
            decode::<String, _>(&graphql_value!(["a", null]), &[List, Nullable], &StringConverter)
                .is_ok(),
        );
    }

    #[tokio::test]
    async fn encodes_leaves() {
        assert_eq!(IntConverter.encode(3).await, Ok(Value::Int(3)));
        assert_eq!(BooleanConverter.encode(true).await, Ok(Value::Boolean(true)));
        assert_eq!(
            StringConverter.encode("s".into()).await,
            Ok(Value::string("s")),
        );
    }
}
