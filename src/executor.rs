//! Resolution plumbing shared by every field resolver.
//!
//! The types here form the boundary towards the execution engine: a field
//! resolver receives [`ResolverParams`], asks its data provider for a
//! [`Resolvable`] value and hands back an [`ExecutionResult`] future.

mod selection;

use std::{
    future::{Future, IntoFuture},
    sync::Arc,
};

use arcstr::ArcStr;
use derive_more::with_trait::{Display, Error};
use futures::future::{self, BoxFuture, FutureExt as _};

use crate::{
    parser::ParseError,
    value::{Object, Value, ValueKind},
};

pub use self::selection::{Executor, Selection};

/// Error type for errors that occur during field resolution.
///
/// Every variant is raised synchronously while converting a value and is
/// surfaced to the caller as a request-level failure.
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub enum FieldError {
    /// Wire value is not one of the declared names of an enum type.
    #[display("not a valid {type_name} value: {value}")]
    InvalidEnumValue {
        /// Name of the enum type.
        type_name: &'static str,
        /// Offending wire value.
        value: Value,
    },

    /// Wire value shape does not match the expected container shape.
    #[display("expected {expected}, found {found}")]
    TypeMismatch {
        /// Expected shape.
        expected: &'static str,
        /// Actual kind of the wire value.
        found: ValueKind,
    },

    /// Converted tree doesn't fit the shape of the native type.
    #[display("expected {expected}, found {found}")]
    ShapeMismatch {
        /// Expected shape.
        expected: &'static str,
        /// Actual shape.
        found: &'static str,
    },

    /// Null where a non-nullable layer requires a value.
    #[display("unexpected null for a non-nullable value")]
    UnexpectedNull,

    /// No value supplied, no default declared and the argument is not nullable.
    #[display("missing required argument \"{_0}\"")]
    MissingRequiredArgument(#[error(not(source))] ArcStr),

    /// Wire value does not match the scalar expected by a leaf converter.
    #[display("expected {expected} value, found {found}")]
    InvalidValue {
        /// Name of the expected scalar.
        expected: &'static str,
        /// Offending wire value.
        value: Value,
        /// Actual kind of the wire value.
        found: ValueKind,
    },

    /// Declared default literal of an argument could not be parsed.
    #[display("invalid default value for argument \"{name}\": {source}")]
    InvalidDefault {
        /// Argument name.
        name: ArcStr,
        /// Parsing failure.
        source: ParseError,
    },

    /// Conversion of a named argument failed.
    #[display("Invalid argument: {name} error: {source}")]
    InvalidArgument {
        /// Argument name.
        name: ArcStr,
        /// Underlying conversion failure.
        source: Box<FieldError>,
    },

    /// Field is not exposed by the object it was requested on.
    #[display("Unknown field \"{field}\" on type \"{type_name}\"")]
    UnknownField {
        /// Object type name.
        type_name: &'static str,
        /// Requested field name.
        field: ArcStr,
    },

    /// Introspection was requested while disabled.
    #[display("GraphQL introspection is not allowed, but the operation contained `{_0}`")]
    IntrospectionDisabled(#[error(not(source))] ArcStr),

    /// Failure reported by a data provider.
    #[display("{_0}")]
    Resolver(#[error(not(source))] String),
}

impl FieldError {
    /// Constructs a [`FieldError::Resolver`] out of any displayable error.
    pub fn resolver(e: impl std::fmt::Display) -> Self {
        Self::Resolver(e.to_string())
    }

    /// Constructs a [`FieldError::InvalidValue`] for the given scalar name.
    pub fn invalid_value(expected: &'static str, value: &Value) -> Self {
        Self::InvalidValue {
            expected,
            value: value.clone(),
            found: value.kind(),
        }
    }

    /// Constructs a [`FieldError::TypeMismatch`] for the given wire value.
    pub fn type_mismatch(expected: &'static str, value: &Value) -> Self {
        Self::TypeMismatch {
            expected,
            found: value.kind(),
        }
    }
}

/// The result of resolving the value of a field of type `T`
pub type FieldResult<T> = Result<T, FieldError>;

/// The result of resolving an unspecified field
pub type ExecutionResult = Result<Value, FieldError>;

/// Value produced by a getter: either available right away or still pending.
///
/// Getters may defer expensive work by returning [`Resolvable::Pending`];
/// awaiting a [`Resolvable`] yields the value either way.
pub enum Resolvable<'a, T> {
    /// Already computed.
    Ready(FieldResult<T>),
    /// Still being computed.
    Pending(BoxFuture<'a, FieldResult<T>>),
}

impl<'a, T: Send + 'a> Resolvable<'a, T> {
    /// Wraps an already computed value.
    pub fn ready(value: T) -> Self {
        Self::Ready(Ok(value))
    }

    /// Wraps an already known failure.
    pub fn error(error: FieldError) -> Self {
        Self::Ready(Err(error))
    }

    /// Wraps a computation which completes later.
    pub fn pending(fut: impl Future<Output = FieldResult<T>> + Send + 'a) -> Self {
        Self::Pending(fut.boxed())
    }

    /// Maps the eventual value with `f`.
    pub fn map<U: Send + 'a>(self, f: impl FnOnce(T) -> U + Send + 'a) -> Resolvable<'a, U> {
        match self {
            Self::Ready(res) => Resolvable::Ready(res.map(f)),
            Self::Pending(fut) => Resolvable::Pending(fut.map(|res| res.map(f)).boxed()),
        }
    }
}

impl<T> From<FieldResult<T>> for Resolvable<'_, T> {
    fn from(res: FieldResult<T>) -> Self {
        Self::Ready(res)
    }
}

impl<'a, T: Send + 'a> IntoFuture for Resolvable<'a, T> {
    type Output = FieldResult<T>;
    type IntoFuture = BoxFuture<'a, FieldResult<T>>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Ready(res) => future::ready(res).boxed(),
            Self::Pending(fut) => fut,
        }
    }
}

/// Parameters handed to every data-provider getter.
#[derive(Clone, Copy, Debug)]
pub struct FieldParams<'a> {
    /// Directives applied to the field, passed through uninterpreted.
    pub field_directives: &'a Object,
}

/// Parameters of a single field invocation.
#[derive(Clone, Copy)]
pub struct ResolverParams<'a> {
    /// Name of the requested field.
    pub field_name: &'a str,
    /// Caller-supplied arguments.
    pub arguments: &'a Object,
    /// Directives applied to the field.
    pub field_directives: &'a Object,
    /// Execution engine resolving nested object results.
    pub resolver: &'a dyn ObjectResolver,
}

impl<'a> ResolverParams<'a> {
    /// Getter parameters derived from these resolver parameters.
    pub fn field_params(&self) -> FieldParams<'a> {
        FieldParams {
            field_directives: self.field_directives,
        }
    }
}

/// Object exposing named fields backed by resolver functions.
pub trait GraphQLObject: Send + Sync {
    /// Name of the object type, as reported by `__typename`.
    fn type_name(&self) -> &'static str;

    /// Whether a fragment with the given type condition applies to this object.
    fn matches_type(&self, type_name: &str) -> bool {
        self.type_name() == type_name
    }

    /// Resolves the field named in `params`.
    fn resolve_field<'a>(&'a self, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult>;
}

/// Execution engine collaborator turning an object result into a [`Value`].
///
/// Implementations know the sub-selection requested for the field being
/// resolved and are free to resolve it concurrently.
pub trait ObjectResolver: Send + Sync {
    /// Resolves the pending sub-selection against `object`.
    fn resolve_object<'a>(&'a self, object: Arc<dyn GraphQLObject>) -> BoxFuture<'a, ExecutionResult>;
}

#[cfg(test)]
mod tests {
    use futures::future;

    use crate::{Value, value::ValueKind};

    use super::{FieldError, Resolvable};

    #[test]
    fn error_messages() {
        let err = FieldError::InvalidArgument {
            name: "includeDeprecated".into(),
            source: Box::new(FieldError::invalid_value("Boolean", &Value::from(1))),
        };
        assert_eq!(
            err.to_string(),
            "Invalid argument: includeDeprecated error: expected Boolean value, found Int",
        );
        assert_eq!(
            FieldError::TypeMismatch {
                expected: "list",
                found: ValueKind::String,
            }
            .to_string(),
            "expected list, found String",
        );
        assert_eq!(
            FieldError::InvalidEnumValue {
                type_name: "__TypeKind",
                value: Value::enum_value("NOT_A_KIND"),
            }
            .to_string(),
            "not a valid __TypeKind value: NOT_A_KIND",
        );
    }

    #[tokio::test]
    async fn resolvable_awaits_ready_and_pending() {
        assert_eq!(Resolvable::ready(1).map(|v| v + 1).await, Ok(2));
        assert_eq!(
            Resolvable::pending(future::ready(Ok(3))).map(|v: i32| v * 2).await,
            Ok(6),
        );
        assert_eq!(
            Resolvable::<i32>::error(FieldError::UnexpectedNull).await,
            Err(FieldError::UnexpectedNull),
        );
    }
}
