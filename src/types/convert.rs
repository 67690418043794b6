//! Generic conversion between wire [`Value`]s and modified native values.
//!
//! A single pair of routines walks any modifier stack, delegating only the
//! innermost layer to a [`LeafConverter`].

use futures::{
    future::{self, BoxFuture, FutureExt as _},
    stream::{FuturesUnordered, StreamExt as _},
};

use crate::{
    executor::{ExecutionResult, FieldError, FieldResult},
    value::Value,
};

use super::modifier::{Modified, TypeModifier};

/// Converter of a single unmodified leaf type.
pub trait LeafConverter<T>: Send + Sync {
    /// Converts a non-null wire value into a leaf.
    fn decode(&self, value: &Value) -> FieldResult<T>;

    /// Converts a leaf into a wire value.
    ///
    /// Object leaves resolve their sub-selection here, which may complete
    /// later.
    fn encode<'a>(&'a self, value: T) -> BoxFuture<'a, ExecutionResult>;
}

/// Converts a wire `value` into a [`Modified`] tree following `modifiers`.
///
/// # Errors
///
/// - [`FieldError::UnexpectedNull`] if null reaches a non-nullable layer;
/// - [`FieldError::TypeMismatch`] if a list layer gets a non-list value;
/// - whatever the leaf converter reports.
///
/// A failing list element fails the whole list with its own error.
pub fn decode<T, C>(value: &Value, modifiers: &[TypeModifier], leaf: &C) -> FieldResult<Modified<T>>
where
    C: LeafConverter<T> + ?Sized,
{
    match modifiers.split_first() {
        Some((TypeModifier::Nullable, rest)) => {
            if value.is_null() {
                Ok(Modified::Null)
            } else {
                decode(value, rest, leaf)
            }
        }
        Some((TypeModifier::List, rest)) => match value {
            Value::Null => Err(FieldError::UnexpectedNull),
            Value::List(items) => items
                .iter()
                .map(|item| decode(item, rest, leaf))
                .collect::<FieldResult<_>>()
                .map(Modified::List),
            other => Err(FieldError::type_mismatch("list", other)),
        },
        Some((TypeModifier::None, rest)) => decode(value, rest, leaf),
        None => {
            if value.is_null() {
                Err(FieldError::UnexpectedNull)
            } else {
                leaf.decode(value).map(Modified::Value)
            }
        }
    }
}

/// Converts a [`Modified`] tree into a wire [`Value`] following `modifiers`.
///
/// Elements of a list layer are converted concurrently. The produced list
/// keeps the element order regardless of completion order, and the first
/// failing element fails the whole list without waiting for the rest.
pub fn encode<'a, T, C>(
    value: Modified<T>,
    modifiers: &'a [TypeModifier],
    leaf: &'a C,
) -> BoxFuture<'a, ExecutionResult>
where
    T: Send + 'a,
    C: LeafConverter<T> + ?Sized,
{
    match (modifiers.split_first(), value) {
        (Some((TypeModifier::Nullable, _)), Modified::Null) => future::ok(Value::Null).boxed(),
        (Some((TypeModifier::Nullable | TypeModifier::None, rest)), value) => {
            encode(value, rest, leaf)
        }
        (Some((TypeModifier::List, rest)), Modified::List(items)) => encode_list(items, rest, leaf),
        (Some((TypeModifier::List, _)), Modified::Value(_)) => shape_mismatch("list", "single value"),
        (_, Modified::Null) => future::err(FieldError::UnexpectedNull).boxed(),
        (None, Modified::Value(v)) => leaf.encode(v),
        (None, Modified::List(_)) => shape_mismatch("single value", "list"),
    }
}

fn encode_list<'a, T, C>(
    items: Vec<Modified<T>>,
    modifiers: &'a [TypeModifier],
    leaf: &'a C,
) -> BoxFuture<'a, ExecutionResult>
where
    T: Send + 'a,
    C: LeafConverter<T> + ?Sized,
{
    let len = items.len();
    let mut pending = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| encode(item, modifiers, leaf).map(move |res| (index, res)))
        .collect::<FuturesUnordered<_>>();

    async move {
        let mut values = vec![Value::Null; len];
        while let Some((index, res)) = pending.next().await {
            values[index] = res.inspect_err(|e| {
                log::warn!("list element {index} of {len} failed: {e}");
            })?;
        }
        Ok(Value::List(values))
    }
    .boxed()
}

fn shape_mismatch<'a>(expected: &'static str, found: &'static str) -> BoxFuture<'a, ExecutionResult> {
    future::err(FieldError::ShapeMismatch { expected, found }).boxed()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::future::{BoxFuture, FutureExt as _};
    use pretty_assertions::assert_eq;

    use crate::{
        FieldError, FieldResult, Value,
        types::{
            Modified,
            TypeModifier::{self, List, Nullable},
            convert::LeafConverter,
        },
        value::ValueKind,
    };

    use super::{decode, encode};

    /// Encodes integers after a delay shrinking with the value, so bigger
    /// values complete first. Negative values fail after the delay.
    struct Delayed;

    impl LeafConverter<i32> for Delayed {
        fn decode(&self, value: &Value) -> FieldResult<i32> {
            value
                .as_int_value()
                .ok_or_else(|| FieldError::invalid_value("Int", value))
        }

        fn encode<'a>(&'a self, value: i32) -> BoxFuture<'a, crate::ExecutionResult> {
            async move {
                let millis = 50_u64.saturating_sub(u64::from(value.unsigned_abs()) * 10);
                tokio::time::sleep(Duration::from_millis(millis)).await;
                if value < 0 {
                    Err(FieldError::resolver(format!("negative: {value}")))
                } else {
                    Ok(Value::Int(value))
                }
            }
            .boxed()
        }
    }

    #[test]
    fn decodes_nullable_list_of_non_null() {
        let mods = [Nullable, List];

        assert_eq!(decode::<i32, _>(&Value::Null, &mods, &Delayed), Ok(Modified::Null));
        assert_eq!(
            decode::<i32, _>(&graphql_value!([1, 2]), &mods, &Delayed),
            Ok(Modified::List(vec![Modified::Value(1), Modified::Value(2)])),
        );
        assert_eq!(
            decode::<i32, _>(&graphql_value!([1, null]), &mods, &Delayed),
            Err(FieldError::UnexpectedNull),
        );
        assert_eq!(
            decode::<i32, _>(&graphql_value!([1, "2"]), &mods, &Delayed),
            Err(FieldError::invalid_value("Int", &Value::from("2"))),
        );
    }

    #[test]
    fn rejects_shape_errors_on_decode() {
        assert_eq!(
            decode::<i32, _>(&Value::Null, &[List], &Delayed),
            Err(FieldError::UnexpectedNull),
        );
        assert_eq!(
            decode::<i32, _>(&Value::from(1), &[List], &Delayed),
            Err(FieldError::TypeMismatch {
                expected: "list",
                found: ValueKind::Int,
            }),
        );
        assert_eq!(
            decode::<i32, _>(&Value::Null, &[], &Delayed),
            Err(FieldError::UnexpectedNull),
        );
        assert_eq!(
            decode::<i32, _>(&Value::from("1"), &[], &Delayed),
            Err(FieldError::invalid_value("Int", &Value::from("1"))),
        );
    }

    #[test]
    fn none_modifier_is_transparent() {
        assert_eq!(
            decode::<i32, _>(&graphql_value!([3]), &[TypeModifier::None, List, TypeModifier::None], &Delayed),
            Ok(Modified::List(vec![Modified::Value(3)])),
        );
    }

    #[tokio::test]
    async fn list_keeps_order_despite_completion_order() {
        let mods = [List, Nullable];
        let value = Modified::List(vec![
            Modified::Value(1),
            Modified::Null,
            Modified::Value(2),
            Modified::Value(4),
        ]);

        assert_eq!(
            encode(value, &mods, &Delayed).await,
            Ok(graphql_value!([1, null, 2, 4])),
        );
    }

    #[tokio::test]
    async fn list_fails_on_first_error() {
        let mods = [List];
        let value = Modified::List(vec![
            Modified::Value(0),
            Modified::Value(-4),
            Modified::Value(-1),
        ]);

        assert_eq!(
            encode(value, &mods, &Delayed).await,
            Err(FieldError::resolver("negative: -4")),
        );
    }

    #[tokio::test]
    async fn rejects_null_at_non_nullable_layer() {
        assert_eq!(
            encode(Modified::<i32>::Null, &[List], &Delayed).await,
            Err(FieldError::UnexpectedNull),
        );
        assert_eq!(
            encode(Modified::List(vec![Modified::<i32>::Null]), &[List], &Delayed).await,
            Err(FieldError::UnexpectedNull),
        );
    }
}
