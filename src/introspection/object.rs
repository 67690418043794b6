use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt as _};

use crate::{
    executor::{
        ExecutionResult, FieldError, GraphQLObject, ObjectResolver, Resolvable, ResolverParams,
    },
    types::{
        ArgumentSpec, BooleanConverter, EnumConverter, IntoModified, LeafConverter,
        ObjectConverter, StringConverter, TypeModifier, encode,
    },
    value::Value,
};

use super::{
    DirectiveLocation, DirectiveProvider, EnumValueProvider, FieldProvider,
    INCLUDE_DEPRECATED_ARGUMENT, InputValueProvider, SchemaProvider, TYPE_NAME_ARGUMENT,
    TypeKind, TypeProvider,
};

use self::TypeModifier::{List, Nullable};

/// Declared shape of a single meta-object field.
///
/// The same declaration builds the schema field and drives the conversion of
/// its resolved value, so both always agree on the wrapping.
#[derive(Debug)]
pub(crate) struct FieldDecl {
    pub(crate) name: &'static str,
    pub(crate) type_name: &'static str,
    pub(crate) modifiers: &'static [TypeModifier],
    pub(crate) arguments: &'static [&'static ArgumentSpec],
}

impl FieldDecl {
    const fn new(
        name: &'static str,
        type_name: &'static str,
        modifiers: &'static [TypeModifier],
    ) -> Self {
        Self {
            name,
            type_name,
            modifiers,
            arguments: &[],
        }
    }

    const fn with_arguments(mut self, arguments: &'static [&'static ArgumentSpec]) -> Self {
        self.arguments = arguments;
        self
    }
}

static INCLUDE_DEPRECATED: [&ArgumentSpec; 1] = [&INCLUDE_DEPRECATED_ARGUMENT];
static TYPE_NAME: [&ArgumentSpec; 1] = [&TYPE_NAME_ARGUMENT];

pub(crate) static SCHEMA_FIELDS: [FieldDecl; 5] = [
    FieldDecl::new("types", "__Type", &[List]),
    FieldDecl::new("queryType", "__Type", &[]),
    FieldDecl::new("mutationType", "__Type", &[Nullable]),
    FieldDecl::new("subscriptionType", "__Type", &[Nullable]),
    FieldDecl::new("directives", "__Directive", &[List]),
];

pub(crate) static TYPE_FIELDS: [FieldDecl; 9] = [
    FieldDecl::new("kind", "__TypeKind", &[]),
    FieldDecl::new("name", "String", &[Nullable]),
    FieldDecl::new("description", "String", &[Nullable]),
    FieldDecl::new("fields", "__Field", &[Nullable, List])
        .with_arguments(&INCLUDE_DEPRECATED),
    FieldDecl::new("interfaces", "__Type", &[Nullable, List]),
    FieldDecl::new("possibleTypes", "__Type", &[Nullable, List]),
    FieldDecl::new("enumValues", "__EnumValue", &[Nullable, List])
        .with_arguments(&INCLUDE_DEPRECATED),
    FieldDecl::new("inputFields", "__InputValue", &[Nullable, List]),
    FieldDecl::new("ofType", "__Type", &[Nullable]),
];

pub(crate) static FIELD_FIELDS: [FieldDecl; 6] = [
    FieldDecl::new("name", "String", &[]),
    FieldDecl::new("description", "String", &[Nullable]),
    FieldDecl::new("args", "__InputValue", &[List]),
    FieldDecl::new("type", "__Type", &[]),
    FieldDecl::new("isDeprecated", "Boolean", &[]),
    FieldDecl::new("deprecationReason", "String", &[Nullable]),
];

pub(crate) static INPUT_VALUE_FIELDS: [FieldDecl; 4] = [
    FieldDecl::new("name", "String", &[]),
    FieldDecl::new("description", "String", &[Nullable]),
    FieldDecl::new("type", "__Type", &[]),
    FieldDecl::new("defaultValue", "String", &[Nullable]),
];

pub(crate) static ENUM_VALUE_FIELDS: [FieldDecl; 4] = [
    FieldDecl::new("name", "String", &[]),
    FieldDecl::new("description", "String", &[Nullable]),
    FieldDecl::new("isDeprecated", "Boolean", &[]),
    FieldDecl::new("deprecationReason", "String", &[Nullable]),
];

pub(crate) static DIRECTIVE_FIELDS: [FieldDecl; 4] = [
    FieldDecl::new("name", "String", &[]),
    FieldDecl::new("description", "String", &[Nullable]),
    FieldDecl::new("locations", "__DirectiveLocation", &[List]),
    FieldDecl::new("args", "__InputValue", &[List]),
];

/// Root fields added next to the fields of the query type.
static ROOT_FIELDS: [FieldDecl; 2] = [
    FieldDecl::new("__schema", "__Schema", &[]),
    FieldDecl::new("__type", "__Type", &[Nullable]).with_arguments(&TYPE_NAME),
];

/// Meta-object names along with their fields, in registration order.
pub(crate) static META_OBJECTS: [(&str, &[FieldDecl]); 6] = [
    ("__Schema", &SCHEMA_FIELDS),
    ("__Type", &TYPE_FIELDS),
    ("__Field", &FIELD_FIELDS),
    ("__InputValue", &INPUT_VALUE_FIELDS),
    ("__EnumValue", &ENUM_VALUE_FIELDS),
    ("__Directive", &DIRECTIVE_FIELDS),
];

fn declared(fields: &'static [FieldDecl], name: &str) -> Option<&'static FieldDecl> {
    fields.iter().find(|decl| decl.name == name)
}

/// Resolves `__typename`, or reports the field as unknown.
fn resolve_undeclared<'a>(type_name: &'static str, field: &str) -> BoxFuture<'a, ExecutionResult> {
    if field == "__typename" {
        future::ok(Value::string(type_name)).boxed()
    } else {
        future::err(FieldError::UnknownField {
            type_name,
            field: field.into(),
        })
        .boxed()
    }
}

fn resolve_leaf<'a, T, R, C>(
    decl: &'static FieldDecl,
    value: Resolvable<'a, R>,
    leaf: C,
) -> BoxFuture<'a, ExecutionResult>
where
    T: Send + 'a,
    R: IntoModified<T> + Send + 'a,
    C: LeafConverter<T> + 'a,
{
    async move {
        let value = value.await?;
        encode(value.into_modified(), decl.modifiers, &leaf).await
    }
    .boxed()
}

fn resolve_objects<'a, P, R>(
    decl: &'static FieldDecl,
    value: Resolvable<'a, R>,
    resolver: &'a dyn ObjectResolver,
    mut wrap: impl FnMut(P) -> Arc<dyn GraphQLObject> + Send + 'a,
) -> BoxFuture<'a, ExecutionResult>
where
    P: Send + 'a,
    R: IntoModified<P> + Send + 'a,
{
    async move {
        let objects = value.await?.into_modified().map(&mut wrap);
        encode(objects, decl.modifiers, &ObjectConverter::new(resolver)).await
    }
    .boxed()
}

fn include_deprecated(params: &ResolverParams<'_>) -> Result<Option<bool>, FieldError> {
    INCLUDE_DEPRECATED_ARGUMENT.require::<bool, Option<bool>, _>(params.arguments, &BooleanConverter)
}

macro_rules! meta_object {
    ($(#[$attr:meta])* $name:ident($provider:ident) as $type_name:literal) => {
        $(#[$attr])*
        #[derive(Clone)]
        pub struct $name {
            provider: Arc<dyn $provider>,
        }

        impl $name {
            /// Exposes the given provider.
            pub fn new(provider: Arc<dyn $provider>) -> Self {
                Self { provider }
            }

            const TYPE_NAME: &'static str = $type_name;

            fn object(provider: Arc<dyn $provider>) -> Arc<dyn GraphQLObject> {
                Arc::new(Self::new(provider))
            }
        }
    };
}

meta_object!(
    /// `__Schema` introspection object.
    SchemaObject(SchemaProvider) as "__Schema"
);
meta_object!(
    /// `__Type` introspection object.
    TypeObject(TypeProvider) as "__Type"
);
meta_object!(
    /// `__Field` introspection object.
    FieldObject(FieldProvider) as "__Field"
);
meta_object!(
    /// `__InputValue` introspection object.
    InputValueObject(InputValueProvider) as "__InputValue"
);
meta_object!(
    /// `__EnumValue` introspection object.
    EnumValueObject(EnumValueProvider) as "__EnumValue"
);
meta_object!(
    /// `__Directive` introspection object.
    DirectiveObject(DirectiveProvider) as "__Directive"
);

impl GraphQLObject for SchemaObject {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn resolve_field<'a>(&'a self, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult> {
        let Some(decl) = declared(&SCHEMA_FIELDS, params.field_name) else {
            return resolve_undeclared(self.type_name(), params.field_name);
        };
        let p = params.field_params();
        let resolver = params.resolver;
        match decl.name {
            "types" => resolve_objects(decl, self.provider.types(p), resolver, TypeObject::object),
            "queryType" => {
                resolve_objects(decl, self.provider.query_type(p), resolver, TypeObject::object)
            }
            "mutationType" => {
                resolve_objects(decl, self.provider.mutation_type(p), resolver, TypeObject::object)
            }
            "subscriptionType" => resolve_objects(
                decl,
                self.provider.subscription_type(p),
                resolver,
                TypeObject::object,
            ),
            "directives" => resolve_objects(
                decl,
                self.provider.directives(p),
                resolver,
                DirectiveObject::object,
            ),
            other => resolve_undeclared(self.type_name(), other),
        }
    }
}

impl GraphQLObject for TypeObject {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn resolve_field<'a>(&'a self, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult> {
        let Some(decl) = declared(&TYPE_FIELDS, params.field_name) else {
            return resolve_undeclared(self.type_name(), params.field_name);
        };
        let p = params.field_params();
        let resolver = params.resolver;
        match decl.name {
            "kind" => resolve_leaf(decl, self.provider.kind(p), EnumConverter::<TypeKind>::new()),
            "name" => resolve_leaf(decl, self.provider.name(p), StringConverter),
            "description" => resolve_leaf(decl, self.provider.description(p), StringConverter),
            "fields" => match include_deprecated(&params) {
                Ok(include) => resolve_objects(
                    decl,
                    self.provider.fields(p, include),
                    resolver,
                    FieldObject::object,
                ),
                Err(e) => future::err(e).boxed(),
            },
            "interfaces" => {
                resolve_objects(decl, self.provider.interfaces(p), resolver, TypeObject::object)
            }
            "possibleTypes" => {
                resolve_objects(decl, self.provider.possible_types(p), resolver, TypeObject::object)
            }
            "enumValues" => match include_deprecated(&params) {
                Ok(include) => resolve_objects(
                    decl,
                    self.provider.enum_values(p, include),
                    resolver,
                    EnumValueObject::object,
                ),
                Err(e) => future::err(e).boxed(),
            },
            "inputFields" => resolve_objects(
                decl,
                self.provider.input_fields(p),
                resolver,
                InputValueObject::object,
            ),
            "ofType" => resolve_objects(decl, self.provider.of_type(p), resolver, TypeObject::object),
            other => resolve_undeclared(self.type_name(), other),
        }
    }
}

impl GraphQLObject for FieldObject {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn resolve_field<'a>(&'a self, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult> {
        let Some(decl) = declared(&FIELD_FIELDS, params.field_name) else {
            return resolve_undeclared(self.type_name(), params.field_name);
        };
        let p = params.field_params();
        let resolver = params.resolver;
        match decl.name {
            "name" => resolve_leaf(decl, self.provider.name(p), StringConverter),
            "description" => resolve_leaf(decl, self.provider.description(p), StringConverter),
            "args" => resolve_objects(decl, self.provider.args(p), resolver, InputValueObject::object),
            "type" => resolve_objects(decl, self.provider.field_type(p), resolver, TypeObject::object),
            "isDeprecated" => resolve_leaf(decl, self.provider.is_deprecated(p), BooleanConverter),
            "deprecationReason" => {
                resolve_leaf(decl, self.provider.deprecation_reason(p), StringConverter)
            }
            other => resolve_undeclared(self.type_name(), other),
        }
    }
}

impl GraphQLObject for InputValueObject {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn resolve_field<'a>(&'a self, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult> {
        let Some(decl) = declared(&INPUT_VALUE_FIELDS, params.field_name) else {
            return resolve_undeclared(self.type_name(), params.field_name);
        };
        let p = params.field_params();
        match decl.name {
            "name" => resolve_leaf(decl, self.provider.name(p), StringConverter),
            "description" => resolve_leaf(decl, self.provider.description(p), StringConverter),
            "type" => resolve_objects(
                decl,
                self.provider.value_type(p),
                params.resolver,
                TypeObject::object,
            ),
            "defaultValue" => resolve_leaf(decl, self.provider.default_value(p), StringConverter),
            other => resolve_undeclared(self.type_name(), other),
        }
    }
}

impl GraphQLObject for EnumValueObject {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn resolve_field<'a>(&'a self, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult> {
        let Some(decl) = declared(&ENUM_VALUE_FIELDS, params.field_name) else {
            return resolve_undeclared(self.type_name(), params.field_name);
        };
        let p = params.field_params();
        match decl.name {
            "name" => resolve_leaf(decl, self.provider.name(p), StringConverter),
            "description" => resolve_leaf(decl, self.provider.description(p), StringConverter),
            "isDeprecated" => resolve_leaf(decl, self.provider.is_deprecated(p), BooleanConverter),
            "deprecationReason" => {
                resolve_leaf(decl, self.provider.deprecation_reason(p), StringConverter)
            }
            other => resolve_undeclared(self.type_name(), other),
        }
    }
}

impl GraphQLObject for DirectiveObject {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn resolve_field<'a>(&'a self, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult> {
        let Some(decl) = declared(&DIRECTIVE_FIELDS, params.field_name) else {
            return resolve_undeclared(self.type_name(), params.field_name);
        };
        let p = params.field_params();
        match decl.name {
            "name" => resolve_leaf(decl, self.provider.name(p), StringConverter),
            "description" => resolve_leaf(decl, self.provider.description(p), StringConverter),
            "locations" => resolve_leaf(
                decl,
                self.provider.locations(p),
                EnumConverter::<DirectiveLocation>::new(),
            ),
            "args" => resolve_objects(
                decl,
                self.provider.args(p),
                params.resolver,
                InputValueObject::object,
            ),
            other => resolve_undeclared(self.type_name(), other),
        }
    }
}

/// Query root extended with the `__schema` and `__type(name:)` fields.
///
/// Every other field, `__typename` included, is resolved by the wrapped query
/// object.
pub struct IntrospectionRoot {
    query: Arc<dyn GraphQLObject>,
    schema: Arc<dyn SchemaProvider>,
    introspection_disabled: bool,
}

impl IntrospectionRoot {
    /// Wraps `query`, introspecting `schema`.
    pub fn new(query: Arc<dyn GraphQLObject>, schema: Arc<dyn SchemaProvider>) -> Self {
        Self {
            query,
            schema,
            introspection_disabled: false,
        }
    }

    /// Disables introspection, making `__schema` and `__type` fail with
    /// [`FieldError::IntrospectionDisabled`].
    ///
    /// `__typename` keeps working.
    #[must_use]
    pub fn disable_introspection(mut self) -> Self {
        self.introspection_disabled = true;
        self
    }

    /// Enables introspection back, if it was disabled previously.
    #[must_use]
    pub fn enable_introspection(mut self) -> Self {
        self.introspection_disabled = false;
        self
    }

    /// Whether `__schema` and `__type` are resolvable.
    pub fn is_introspection_enabled(&self) -> bool {
        !self.introspection_disabled
    }
}

impl GraphQLObject for IntrospectionRoot {
    fn type_name(&self) -> &'static str {
        self.query.type_name()
    }

    fn matches_type(&self, type_name: &str) -> bool {
        self.query.matches_type(type_name)
    }

    fn resolve_field<'a>(&'a self, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult> {
        let Some(decl) = declared(&ROOT_FIELDS, params.field_name) else {
            return self.query.resolve_field(params);
        };
        if self.introspection_disabled {
            log::debug!("rejected `{}` with introspection disabled", decl.name);
            return future::err(FieldError::IntrospectionDisabled(decl.name.into())).boxed();
        }
        let resolver = params.resolver;
        match decl.name {
            "__schema" => {
                let schema = Arc::clone(&self.schema);
                resolve_objects(decl, Resolvable::ready(schema), resolver, SchemaObject::object)
            }
            "__type" => match TYPE_NAME_ARGUMENT
                .require::<String, String, _>(params.arguments, &StringConverter)
            {
                Ok(name) => {
                    let p = params.field_params();
                    let provider = &self.schema;
                    resolve_objects(
                        decl,
                        Resolvable::pending(async move { provider.type_by_name(p, &name).await }),
                        resolver,
                        TypeObject::object,
                    )
                }
                Err(e) => future::err(e).boxed(),
            },
            _ => self.query.resolve_field(params),
        }
    }
}
