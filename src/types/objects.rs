use std::sync::Arc;

use futures::future::BoxFuture;

use crate::{
    executor::{ExecutionResult, FieldError, FieldResult, GraphQLObject, ObjectResolver},
    modified_leaf,
    value::Value,
};

use super::convert::LeafConverter;

modified_leaf!(Arc<dyn GraphQLObject>);

/// Converter of object leaves, delegating their sub-selection to the
/// execution engine.
#[derive(Clone, Copy)]
pub struct ObjectConverter<'r> {
    resolver: &'r dyn ObjectResolver,
}

impl<'r> ObjectConverter<'r> {
    /// Creates a converter resolving objects with `resolver`.
    pub fn new(resolver: &'r dyn ObjectResolver) -> Self {
        Self { resolver }
    }
}

impl LeafConverter<Arc<dyn GraphQLObject>> for ObjectConverter<'_> {
    fn decode(&self, _: &Value) -> FieldResult<Arc<dyn GraphQLObject>> {
        Err(FieldError::ShapeMismatch {
            expected: "output object",
            found: "input value",
        })
    }

    fn encode<'a>(&'a self, value: Arc<dyn GraphQLObject>) -> BoxFuture<'a, ExecutionResult> {
        self.resolver.resolve_object(value)
    }
}
