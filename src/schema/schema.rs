//! Introspection data providers backed by a frozen [`SchemaType`].

use std::sync::Arc;

use crate::{
    executor::{FieldError, FieldParams, FieldResult, Resolvable},
    introspection::{
        DirectiveLocation, DirectiveProvider, EnumValueProvider, FieldProvider, InputValueProvider,
        SchemaProvider, TypeKind, TypeProvider,
    },
};

use super::{
    meta::{Argument, DirectiveType, EnumValue, Field, MetaType, TypeId},
    model::SchemaType,
};

impl SchemaType {
    /// Exposes this schema to the introspection objects.
    pub fn into_provider(self: Arc<Self>) -> Arc<dyn SchemaProvider> {
        Arc::new(SchemaRef(self))
    }

    fn type_ref(self: &Arc<Self>, id: TypeId) -> Arc<dyn TypeProvider> {
        Arc::new(TypeRef {
            schema: Arc::clone(self),
            id,
        })
    }

    fn type_refs(self: &Arc<Self>, ids: &[TypeId]) -> Vec<Arc<dyn TypeProvider>> {
        ids.iter().map(|&id| self.type_ref(id)).collect()
    }

    fn input_value_refs(self: &Arc<Self>, args: &[Argument]) -> Vec<Arc<dyn InputValueProvider>> {
        args.iter()
            .map(|arg| {
                Arc::new(InputValueRef {
                    schema: Arc::clone(self),
                    argument: arg.clone(),
                }) as Arc<dyn InputValueProvider>
            })
            .collect()
    }
}

struct SchemaRef(Arc<SchemaType>);

impl SchemaProvider for SchemaRef {
    fn types(&self, _: FieldParams<'_>) -> Resolvable<'_, Vec<Arc<dyn TypeProvider>>> {
        let schema = &self.0;
        Resolvable::ready(schema.named_types().map(|id| schema.type_ref(id)).collect())
    }

    fn query_type(&self, _: FieldParams<'_>) -> Resolvable<'_, Arc<dyn TypeProvider>> {
        match self.0.query_type() {
            Some(id) => Resolvable::ready(self.0.type_ref(id)),
            None => Resolvable::error(FieldError::resolver("schema has no query type")),
        }
    }

    fn mutation_type(&self, _: FieldParams<'_>) -> Resolvable<'_, Option<Arc<dyn TypeProvider>>> {
        Resolvable::ready(self.0.mutation_type().map(|id| self.0.type_ref(id)))
    }

    fn subscription_type(
        &self,
        _: FieldParams<'_>,
    ) -> Resolvable<'_, Option<Arc<dyn TypeProvider>>> {
        Resolvable::ready(self.0.subscription_type().map(|id| self.0.type_ref(id)))
    }

    fn directives(&self, _: FieldParams<'_>) -> Resolvable<'_, Vec<Arc<dyn DirectiveProvider>>> {
        Resolvable::ready(
            self.0
                .directives()
                .map(|directive| {
                    Arc::new(DirectiveRef {
                        schema: Arc::clone(&self.0),
                        directive: directive.clone(),
                    }) as Arc<dyn DirectiveProvider>
                })
                .collect(),
        )
    }

    fn type_by_name(
        &self,
        _: FieldParams<'_>,
        name: &str,
    ) -> Resolvable<'_, Option<Arc<dyn TypeProvider>>> {
        Resolvable::ready(self.0.type_by_name(name).map(|id| self.0.type_ref(id)))
    }
}

/// Node of the type graph, named or wrapper.
struct TypeRef {
    schema: Arc<SchemaType>,
    id: TypeId,
}

impl TypeRef {
    fn meta(&self) -> FieldResult<&MetaType> {
        self.schema
            .meta_type(self.id)
            .ok_or_else(|| FieldError::resolver(format!("unknown type node {:?}", self.id)))
    }

    fn with_meta<T: Send>(&self, f: impl FnOnce(&MetaType) -> T) -> Resolvable<'_, T> {
        self.meta().map(f).into()
    }
}

impl TypeProvider for TypeRef {
    fn kind(&self, _: FieldParams<'_>) -> Resolvable<'_, TypeKind> {
        self.with_meta(MetaType::type_kind)
    }

    fn name(&self, _: FieldParams<'_>) -> Resolvable<'_, Option<String>> {
        self.with_meta(|meta| meta.name().map(ToString::to_string))
    }

    fn description(&self, _: FieldParams<'_>) -> Resolvable<'_, Option<String>> {
        self.with_meta(|meta| meta.description().map(ToString::to_string))
    }

    fn fields(
        &self,
        _: FieldParams<'_>,
        include_deprecated: Option<bool>,
    ) -> Resolvable<'_, Option<Vec<Arc<dyn FieldProvider>>>> {
        let include_deprecated = include_deprecated.unwrap_or(false);
        self.with_meta(|meta| {
            meta.fields().map(|fields| {
                fields
                    .iter()
                    .filter(|f| !f.is_builtin())
                    .filter(|f| include_deprecated || !f.deprecation_status.is_deprecated())
                    .map(|f| {
                        Arc::new(FieldRef {
                            schema: Arc::clone(&self.schema),
                            field: f.clone(),
                        }) as Arc<dyn FieldProvider>
                    })
                    .collect()
            })
        })
    }

    fn interfaces(&self, _: FieldParams<'_>) -> Resolvable<'_, Option<Vec<Arc<dyn TypeProvider>>>> {
        self.with_meta(|meta| match meta {
            MetaType::Object(_) => Some(self.schema.type_refs(self.schema.interfaces(self.id))),
            _ => None,
        })
    }

    fn possible_types(
        &self,
        _: FieldParams<'_>,
    ) -> Resolvable<'_, Option<Vec<Arc<dyn TypeProvider>>>> {
        self.with_meta(|meta| match meta {
            MetaType::Interface(_) | MetaType::Union(_) => {
                Some(self.schema.type_refs(self.schema.possible_types(self.id)))
            }
            _ => None,
        })
    }

    fn enum_values(
        &self,
        _: FieldParams<'_>,
        include_deprecated: Option<bool>,
    ) -> Resolvable<'_, Option<Vec<Arc<dyn EnumValueProvider>>>> {
        let include_deprecated = include_deprecated.unwrap_or(false);
        self.with_meta(|meta| {
            meta.enum_values().map(|values| {
                values
                    .iter()
                    .filter(|v| include_deprecated || !v.deprecation_status.is_deprecated())
                    .map(|v| Arc::new(EnumValueRef(v.clone())) as Arc<dyn EnumValueProvider>)
                    .collect()
            })
        })
    }

    fn input_fields(
        &self,
        _: FieldParams<'_>,
    ) -> Resolvable<'_, Option<Vec<Arc<dyn InputValueProvider>>>> {
        self.with_meta(|meta| {
            meta.input_fields()
                .map(|fields| self.schema.input_value_refs(fields))
        })
    }

    fn of_type(&self, _: FieldParams<'_>) -> Resolvable<'_, Option<Arc<dyn TypeProvider>>> {
        self.with_meta(|meta| meta.of_type().map(|id| self.schema.type_ref(id)))
    }
}

struct FieldRef {
    schema: Arc<SchemaType>,
    field: Field,
}

impl FieldProvider for FieldRef {
    fn name(&self, _: FieldParams<'_>) -> Resolvable<'_, String> {
        Resolvable::ready(self.field.name.to_string())
    }

    fn description(&self, _: FieldParams<'_>) -> Resolvable<'_, Option<String>> {
        Resolvable::ready(self.field.description.as_ref().map(ToString::to_string))
    }

    fn args(&self, _: FieldParams<'_>) -> Resolvable<'_, Vec<Arc<dyn InputValueProvider>>> {
        Resolvable::ready(self.schema.input_value_refs(&self.field.arguments))
    }

    fn field_type(&self, _: FieldParams<'_>) -> Resolvable<'_, Arc<dyn TypeProvider>> {
        Resolvable::ready(self.schema.type_ref(self.field.field_type))
    }

    fn is_deprecated(&self, _: FieldParams<'_>) -> Resolvable<'_, bool> {
        Resolvable::ready(self.field.deprecation_status.is_deprecated())
    }

    fn deprecation_reason(&self, _: FieldParams<'_>) -> Resolvable<'_, Option<String>> {
        Resolvable::ready(self.field.deprecation_status.reason().map(ToString::to_string))
    }
}

struct InputValueRef {
    schema: Arc<SchemaType>,
    argument: Argument,
}

impl InputValueProvider for InputValueRef {
    fn name(&self, _: FieldParams<'_>) -> Resolvable<'_, String> {
        Resolvable::ready(self.argument.name.to_string())
    }

    fn description(&self, _: FieldParams<'_>) -> Resolvable<'_, Option<String>> {
        Resolvable::ready(self.argument.description.as_ref().map(ToString::to_string))
    }

    fn value_type(&self, _: FieldParams<'_>) -> Resolvable<'_, Arc<dyn TypeProvider>> {
        Resolvable::ready(self.schema.type_ref(self.argument.arg_type))
    }

    fn default_value(&self, _: FieldParams<'_>) -> Resolvable<'_, Option<String>> {
        Resolvable::ready(self.argument.default_value.as_ref().map(ToString::to_string))
    }
}

struct EnumValueRef(EnumValue);

impl EnumValueProvider for EnumValueRef {
    fn name(&self, _: FieldParams<'_>) -> Resolvable<'_, String> {
        Resolvable::ready(self.0.name.to_string())
    }

    fn description(&self, _: FieldParams<'_>) -> Resolvable<'_, Option<String>> {
        Resolvable::ready(self.0.description.as_ref().map(ToString::to_string))
    }

    fn is_deprecated(&self, _: FieldParams<'_>) -> Resolvable<'_, bool> {
        Resolvable::ready(self.0.deprecation_status.is_deprecated())
    }

    fn deprecation_reason(&self, _: FieldParams<'_>) -> Resolvable<'_, Option<String>> {
        Resolvable::ready(self.0.deprecation_status.reason().map(ToString::to_string))
    }
}

struct DirectiveRef {
    schema: Arc<SchemaType>,
    directive: DirectiveType,
}

impl DirectiveProvider for DirectiveRef {
    fn name(&self, _: FieldParams<'_>) -> Resolvable<'_, String> {
        Resolvable::ready(self.directive.name.to_string())
    }

    fn description(&self, _: FieldParams<'_>) -> Resolvable<'_, Option<String>> {
        Resolvable::ready(self.directive.description.as_ref().map(ToString::to_string))
    }

    fn locations(&self, _: FieldParams<'_>) -> Resolvable<'_, Vec<DirectiveLocation>> {
        Resolvable::ready(self.directive.locations.clone())
    }

    fn args(&self, _: FieldParams<'_>) -> Resolvable<'_, Vec<Arc<dyn InputValueProvider>>> {
        Resolvable::ready(self.schema.input_value_refs(&self.directive.arguments))
    }
}
