use std::sync::Arc;

use arcstr::ArcStr;
use futures::future::{self, BoxFuture, FutureExt as _};

use crate::{
    schema::builtins::IF_ARGUMENT,
    types::BooleanConverter,
    value::{Object, Value},
};

use super::{ExecutionResult, FieldResult, GraphQLObject, ObjectResolver, ResolverParams};

/// Field requested from an object, along with its own sub-selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    /// Name of the field.
    pub name: ArcStr,
    /// Response key, if different from the field name.
    pub alias: Option<ArcStr>,
    /// Supplied arguments.
    pub arguments: Object,
    /// Applied directives, each mapped to its own argument object.
    pub directives: Object,
    /// Fields requested from the object this field resolves to.
    pub selection_set: Vec<Selection>,
}

impl Selection {
    /// Selects the field with the given name.
    pub fn field(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the response key.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<ArcStr>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Supplies an argument.
    #[must_use]
    pub fn argument(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.arguments.add_field(name, value.into());
        self
    }

    /// Applies a directive with the given arguments.
    #[must_use]
    pub fn directive(mut self, name: &str, arguments: Object) -> Self {
        self.directives.add_field(name, Value::Object(arguments));
        self
    }

    /// Sets the sub-selection.
    #[must_use]
    pub fn select(mut self, fields: impl IntoIterator<Item = Selection>) -> Self {
        self.selection_set.extend(fields);
        self
    }

    /// Key under which the result of this field is reported.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Evaluates `@skip` and `@include`.
    fn is_included(&self) -> FieldResult<bool> {
        let flag = |directive: &str| {
            self.directives
                .get_field_value(directive)
                .map(|args| {
                    let args = args.as_object_value().cloned().unwrap_or_default();
                    IF_ARGUMENT.require::<bool, bool, _>(&args, &BooleanConverter)
                })
                .transpose()
        };
        Ok(!flag("skip")?.unwrap_or(false) && flag("include")?.unwrap_or(true))
    }
}

/// Minimal execution engine resolving a selection set against an object.
///
/// Fields of one selection set are resolved concurrently, and their results
/// are reported in selection order.
#[derive(Clone, Copy, Debug)]
pub struct Executor<'a> {
    selection_set: &'a [Selection],
}

impl<'a> Executor<'a> {
    /// Creates an executor for the given selection set.
    pub fn new(selection_set: &'a [Selection]) -> Self {
        Self { selection_set }
    }

    /// Resolves every selected field of `object` into an object [`Value`].
    pub fn resolve<'b>(&'b self, object: &'b dyn GraphQLObject) -> BoxFuture<'b, ExecutionResult> {
        async move {
            let mut selected = Vec::with_capacity(self.selection_set.len());
            for selection in self.selection_set {
                if selection.is_included()? {
                    selected.push(selection);
                }
            }

            let fields = selected.into_iter().map(|selection| async move {
                let sub_executor = Executor::new(&selection.selection_set);
                let params = ResolverParams {
                    field_name: &selection.name,
                    arguments: &selection.arguments,
                    field_directives: &selection.directives,
                    resolver: &sub_executor,
                };
                let value = object.resolve_field(params).await.inspect_err(|e| {
                    log::debug!(
                        "failed to resolve `{}.{}`: {e}",
                        object.type_name(),
                        selection.name,
                    );
                })?;
                Ok::<_, super::FieldError>((selection.response_key(), value))
            });

            Ok(Value::Object(future::try_join_all(fields).await?.into_iter().collect()))
        }
        .boxed()
    }
}

impl ObjectResolver for Executor<'_> {
    fn resolve_object<'b>(&'b self, object: Arc<dyn GraphQLObject>) -> BoxFuture<'b, ExecutionResult> {
        async move { self.resolve(&*object).await }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use futures::future::{BoxFuture, FutureExt as _};
    use pretty_assertions::assert_eq;

    use crate::{
        Object, Value,
        executor::{ExecutionResult, FieldError, GraphQLObject, ResolverParams},
    };

    use super::{Executor, Selection};

    struct Echo;

    impl GraphQLObject for Echo {
        fn type_name(&self) -> &'static str {
            "Echo"
        }

        fn resolve_field<'a>(&'a self, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult> {
            async move {
                match params.field_name {
                    "name" => Ok(Value::string(params.field_name)),
                    "args" => Ok(Value::Object(params.arguments.clone())),
                    other => Err(FieldError::UnknownField {
                        type_name: "Echo",
                        field: other.into(),
                    }),
                }
            }
            .boxed()
        }
    }

    fn if_arg(value: bool) -> Object {
        [("if", Value::from(value))].into_iter().collect()
    }

    #[tokio::test]
    async fn resolves_aliases_and_arguments() {
        let selection = [
            Selection::field("name"),
            Selection::field("args").alias("renamed").argument("x", 1),
            Selection::field("name").alias("skipped").directive("skip", if_arg(true)),
            Selection::field("name").alias("excluded").directive("include", if_arg(false)),
        ];

        assert_eq!(
            Executor::new(&selection).resolve(&Echo).await,
            Ok(graphql_value!({"name": "name", "renamed": {"x": 1}})),
        );
    }

    #[tokio::test]
    async fn reports_unknown_fields() {
        let selection = [Selection::field("nope")];

        assert_eq!(
            Executor::new(&selection).resolve(&Echo).await,
            Err(FieldError::UnknownField {
                type_name: "Echo",
                field: "nope".into(),
            }),
        );
    }

    #[tokio::test]
    async fn rejects_malformed_directive_arguments() {
        let selection = [Selection::field("name").directive("skip", Object::new())];

        assert_eq!(
            Executor::new(&selection).resolve(&Echo).await,
            Err(FieldError::MissingRequiredArgument("if".into())),
        );
    }
}
