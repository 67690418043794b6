//! Argument lookup with declared defaults.

use std::{borrow::Cow, sync::OnceLock};

use arcstr::ArcStr;

use crate::{
    executor::{FieldError, FieldResult},
    parser::{ParseError, parse_value_literal},
    value::{Object, Value},
};

use super::{
    convert::{LeafConverter, decode},
    modifier::{FromModified, TypeModifier},
};

/// Resolves the wire value of the argument `name`.
///
/// The supplied value wins. Otherwise the `declared_default` is used, and
/// with neither present an outermost nullable layer yields null.
///
/// # Errors
///
/// [`FieldError::MissingRequiredArgument`] if nothing applies.
pub fn resolve_argument<'v>(
    name: &str,
    supplied: &'v Object,
    declared_default: Option<&'v Value>,
    modifiers: &[TypeModifier],
) -> FieldResult<Cow<'v, Value>> {
    if let Some(v) = supplied.get_field_value(name) {
        Ok(Cow::Borrowed(v))
    } else if let Some(v) = declared_default {
        log::trace!("argument `{name}` not supplied, using default {v}");
        Ok(Cow::Borrowed(v))
    } else if modifiers.first() == Some(&TypeModifier::Nullable) {
        Ok(Cow::Owned(Value::Null))
    } else {
        Err(FieldError::MissingRequiredArgument(name.into()))
    }
}

/// Declaration of a field argument: its name, base type, modifier stack and
/// optional default literal.
///
/// The default literal is parsed on first use and cached, so declarations
/// can live in `static`s.
#[derive(Debug)]
pub struct ArgumentSpec {
    name: &'static str,
    type_name: &'static str,
    modifiers: &'static [TypeModifier],
    default_literal: Option<&'static str>,
    default_value: OnceLock<Result<Value, ParseError>>,
}

impl ArgumentSpec {
    /// Declares an argument without a default.
    pub const fn new(
        name: &'static str,
        type_name: &'static str,
        modifiers: &'static [TypeModifier],
    ) -> Self {
        Self {
            name,
            type_name,
            modifiers,
            default_literal: None,
            default_value: OnceLock::new(),
        }
    }

    /// Sets the default, in GraphQL literal syntax.
    #[must_use]
    pub const fn with_default(mut self, literal: &'static str) -> Self {
        self.default_literal = Some(literal);
        self
    }

    /// Name of the argument.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the unmodified argument type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Modifier stack of the argument type.
    pub fn modifiers(&self) -> &'static [TypeModifier] {
        self.modifiers
    }

    /// Default in its literal form.
    pub fn default_literal(&self) -> Option<&'static str> {
        self.default_literal
    }

    /// Parsed default value.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidDefault`] if the literal isn't a valid constant.
    pub fn default_value(&self) -> FieldResult<Option<&Value>> {
        let Some(literal) = self.default_literal else {
            return Ok(None);
        };
        match self.default_value.get_or_init(|| parse_value_literal(literal)) {
            Ok(v) => Ok(Some(v)),
            Err(e) => Err(FieldError::InvalidDefault {
                name: ArcStr::from(self.name),
                source: e.clone(),
            }),
        }
    }

    /// Resolves the wire value of this argument, see [`resolve_argument`].
    ///
    /// # Errors
    ///
    /// See [`resolve_argument`] and [`ArgumentSpec::default_value`].
    pub fn resolve<'v>(&'v self, supplied: &'v Object) -> FieldResult<Cow<'v, Value>> {
        let default = if supplied.contains_field(self.name) {
            None
        } else {
            self.default_value()?
        };
        resolve_argument(self.name, supplied, default, self.modifiers)
    }

    /// Resolves and converts this argument into a native value.
    ///
    /// # Errors
    ///
    /// [`FieldError::MissingRequiredArgument`] if the argument can't be
    /// resolved, and [`FieldError::InvalidArgument`] if it can't be converted.
    pub fn require<T, R, C>(&self, supplied: &Object, leaf: &C) -> FieldResult<R>
    where
        R: FromModified<T>,
        C: LeafConverter<T> + ?Sized,
    {
        let value = self.resolve(supplied)?;
        self.convert(&value, leaf)
    }

    /// Converts this argument if it was supplied, ignoring any default.
    ///
    /// # Errors
    ///
    /// [`FieldError::InvalidArgument`] if the supplied value can't be
    /// converted.
    pub fn find<T, R, C>(&self, supplied: &Object, leaf: &C) -> FieldResult<Option<R>>
    where
        R: FromModified<T>,
        C: LeafConverter<T> + ?Sized,
    {
        supplied
            .get_field_value(self.name)
            .map(|v| self.convert(v, leaf))
            .transpose()
    }

    fn convert<T, R, C>(&self, value: &Value, leaf: &C) -> FieldResult<R>
    where
        R: FromModified<T>,
        C: LeafConverter<T> + ?Sized,
    {
        decode(value, self.modifiers, leaf)
            .and_then(R::from_modified)
            .map_err(|e| FieldError::InvalidArgument {
                name: self.name.into(),
                source: Box::new(e),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use crate::{
        FieldError, Object, Value,
        parser::ParseError,
        types::{BooleanConverter, IntConverter, TypeModifier},
    };

    use super::{ArgumentSpec, resolve_argument};

    static INCLUDE_DEPRECATED: ArgumentSpec =
        ArgumentSpec::new("includeDeprecated", "Boolean", &[TypeModifier::Nullable])
            .with_default("false");
    static LIMIT: ArgumentSpec = ArgumentSpec::new("limit", "Int", &[TypeModifier::Nullable]);
    static NAME: ArgumentSpec = ArgumentSpec::new("name", "String", &[]);
    static BROKEN: ArgumentSpec = ArgumentSpec::new("broken", "Int", &[]).with_default("[1");

    fn args(entries: &[(&str, Value)]) -> Object {
        entries.iter().cloned().collect()
    }

    #[test]
    fn supplied_value_wins_over_default() {
        let supplied = args(&[("x", Value::from(true))]);
        let default = Value::from(false);

        assert_eq!(
            resolve_argument("x", &supplied, Some(&default), &[]),
            Ok(Cow::Borrowed(&Value::from(true))),
        );
    }

    #[test]
    fn falls_back_to_default_then_null() {
        let empty = Object::new();

        assert_eq!(INCLUDE_DEPRECATED.resolve(&empty), Ok(Cow::Owned(Value::from(false))));
        assert_eq!(LIMIT.resolve(&empty), Ok(Cow::Owned(Value::Null)));
        assert_eq!(
            NAME.resolve(&empty),
            Err(FieldError::MissingRequiredArgument("name".into())),
        );
    }

    #[test]
    fn explicit_null_is_not_replaced_by_default() {
        let supplied = args(&[("includeDeprecated", Value::Null)]);

        assert_eq!(
            INCLUDE_DEPRECATED.require::<bool, Option<bool>, _>(&supplied, &BooleanConverter),
            Ok(None),
        );
    }

    #[test]
    fn require_converts_and_wraps_errors() {
        let empty = Object::new();
        assert_eq!(
            INCLUDE_DEPRECATED.require::<bool, Option<bool>, _>(&empty, &BooleanConverter),
            Ok(Some(false)),
        );

        let supplied = args(&[("includeDeprecated", Value::from("yes"))]);
        assert_eq!(
            INCLUDE_DEPRECATED.require::<bool, Option<bool>, _>(&supplied, &BooleanConverter),
            Err(FieldError::InvalidArgument {
                name: "includeDeprecated".into(),
                source: Box::new(FieldError::invalid_value("Boolean", &Value::from("yes"))),
            }),
        );
    }

    #[test]
    fn find_ignores_defaults() {
        let empty = Object::new();
        assert_eq!(
            INCLUDE_DEPRECATED.find::<bool, Option<bool>, _>(&empty, &BooleanConverter),
            Ok(None),
        );

        let supplied = args(&[("limit", Value::from(3))]);
        assert_eq!(
            LIMIT.find::<i32, Option<i32>, _>(&supplied, &IntConverter),
            Ok(Some(Some(3))),
        );
    }

    #[test]
    fn reports_malformed_default() {
        assert_eq!(
            BROKEN.default_value(),
            Err(FieldError::InvalidDefault {
                name: "broken".into(),
                source: ParseError::UnexpectedEndOfFile,
            }),
        );
    }
}
