//! Type graph of a schema: descriptors, the memoizing builder and the
//! introspection providers backed by it.

pub mod builtins;
pub mod meta;
pub mod model;
mod schema;

pub use self::{
    builtins::{BUILTIN_SCALARS, add_types_to_schema},
    meta::{
        Argument, DeprecationStatus, DirectiveType, EnumMeta, EnumValue, Field, InputObjectMeta,
        InterfaceMeta, MetaType, ObjectMeta, ScalarMeta, TypeId, UnionMeta,
    },
    model::{Registry, SchemaError, SchemaType, WrapperKind},
};
