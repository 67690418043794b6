//! Typed conversion layer between wire [`Value`](crate::Value)s and native
//! values of modified GraphQL types.

mod arguments;
mod containers;
pub mod convert;
mod enums;
mod modifier;
mod objects;
pub mod scalars;

pub use self::{
    arguments::{ArgumentSpec, resolve_argument},
    convert::{LeafConverter, decode, encode},
    enums::{EnumConverter, GraphQLEnum},
    modifier::{FromModified, IntoModified, Modified, TypeModifier},
    objects::ObjectConverter,
    scalars::{
        BooleanConverter, FloatConverter, IdConverter, IntConverter, StringConverter,
        ValueConverter,
    },
};
