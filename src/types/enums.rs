use std::marker::PhantomData;

use futures::future::{self, BoxFuture, FutureExt as _};

use crate::{
    executor::{ExecutionResult, FieldError, FieldResult},
    value::Value,
};

use super::convert::LeafConverter;

/// Fieldless Rust enum exposed as a GraphQL enum.
///
/// Usually implemented with the [`graphql_enum!`](crate::graphql_enum) macro,
/// which keeps [`NAMES`](GraphQLEnum::NAMES) and
/// [`VALUES`](GraphQLEnum::VALUES) in declaration order.
pub trait GraphQLEnum: Copy + Send + Sync + 'static {
    /// Name of the enum type.
    const NAME: &'static str;

    /// Declared value names, index-aligned with [`GraphQLEnum::VALUES`].
    const NAMES: &'static [&'static str];

    /// Every variant, in declaration order.
    const VALUES: &'static [Self];

    /// Declared name of this variant.
    fn name(&self) -> &'static str;

    /// Looks up the variant declared under `name`.
    fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .zip(Self::VALUES)
            .find_map(|(n, v)| (*n == name).then_some(*v))
    }

    /// Converts a wire value, accepting both enum and string values.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidEnumValue`] if the value isn't one of the declared
    /// names.
    fn from_value(value: &Value) -> FieldResult<Self> {
        value
            .as_maybe_enum()
            .and_then(Self::from_name)
            .ok_or_else(|| FieldError::InvalidEnumValue {
                type_name: Self::NAME,
                value: value.clone(),
            })
    }

    /// Converts this variant into an enum wire value.
    fn to_value(&self) -> Value {
        Value::enum_value(self.name())
    }
}

/// [`LeafConverter`] of any [`GraphQLEnum`].
pub struct EnumConverter<E>(PhantomData<fn() -> E>);

impl<E> EnumConverter<E> {
    /// Creates a new converter.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for EnumConverter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: GraphQLEnum> LeafConverter<E> for EnumConverter<E> {
    fn decode(&self, value: &Value) -> FieldResult<E> {
        E::from_value(value)
    }

    fn encode<'a>(&'a self, value: E) -> BoxFuture<'a, ExecutionResult> {
        future::ok(value.to_value()).boxed()
    }
}

#[cfg(test)]
mod tests {
    use crate::{FieldError, Value};

    use super::{EnumConverter, GraphQLEnum as _, LeafConverter as _};

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Color {
        Red,
        Green,
    }

    graphql_enum!(Color as "Color" {
        Color::Red => "RED",
        Color::Green => "GREEN",
    });

    #[test]
    fn names_follow_declaration_order() {
        assert_eq!(Color::NAMES, ["RED", "GREEN"]);
        assert_eq!(Color::VALUES, [Color::Red, Color::Green]);
        assert_eq!(Color::Green.to_string(), "GREEN");
    }

    #[test]
    fn accepts_enum_and_string_values() {
        let conv = EnumConverter::<Color>::new();

        assert_eq!(conv.decode(&Value::enum_value("GREEN")), Ok(Color::Green));
        assert_eq!(conv.decode(&Value::string("RED")), Ok(Color::Red));
        assert_eq!(
            conv.decode(&Value::enum_value("BLUE")),
            Err(FieldError::InvalidEnumValue {
                type_name: "Color",
                value: Value::enum_value("BLUE"),
            }),
        );
        assert!(conv.decode(&Value::from(0)).is_err());
    }

    #[tokio::test]
    async fn encodes_declared_name() {
        assert_eq!(
            EnumConverter::new().encode(Color::Red).await,
            Ok(Value::enum_value("RED")),
        );
    }
}
