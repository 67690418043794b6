#![doc = include_str!("../README.md")]

#[doc(inline)]
pub use futures::future::BoxFuture;

#[doc(hidden)]
#[macro_use]
pub mod macros;
pub mod executor;
pub mod integrations;
pub mod introspection;
pub mod parser;
pub mod schema;
pub mod types;
mod value;

#[cfg(test)]
mod tests;

pub use crate::{
    executor::{
        ExecutionResult, Executor, FieldError, FieldParams, FieldResult, GraphQLObject,
        ObjectResolver, Resolvable, ResolverParams, Selection,
    },
    introspection::{DirectiveLocation, IntrospectionRoot, TypeKind},
    parser::ParseError,
    schema::{Registry, SchemaError, SchemaType, meta},
    types::{ArgumentSpec, GraphQLEnum, LeafConverter, Modified, TypeModifier},
    value::{Object, Value, ValueKind},
};
