//! Introspection meta-schema: the `__Schema`, `__Type`, `__Field`,
//! `__InputValue`, `__EnumValue` and `__Directive` objects.
//!
//! Each object is a stateless façade over a data provider. The provider
//! traits below are implemented for the built [`SchemaType`], but any other
//! source of type information can implement them as well.
//!
//! [`SchemaType`]: crate::schema::SchemaType

pub(crate) mod object;

use std::sync::Arc;

use crate::{
    executor::{FieldParams, Resolvable},
    modified_leaf,
    types::{ArgumentSpec, TypeModifier},
};

pub use self::object::{
    DirectiveObject, EnumValueObject, FieldObject, InputValueObject, IntrospectionRoot,
    SchemaObject, TypeObject,
};

/// GraphQL type kind
///
/// The GraphQL specification defines a number of type kinds - the meta type
/// of a type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TypeKind {
    /// ## Scalar types
    ///
    /// Scalar types appear as the leaf nodes of GraphQL queries. Strings,
    /// numbers, and booleans are the built in types.
    Scalar,

    /// ## Object types
    ///
    /// The most common type to be implemented by users. Objects have fields
    /// and can implement interfaces.
    Object,

    /// ## Interface types
    ///
    /// Interface types are used to represent overlapping fields between
    /// multiple types, and can be queried for their concrete type.
    Interface,

    /// ## Union types
    ///
    /// Unions are similar to interfaces but can not contain any fields on
    /// their own.
    Union,

    /// ## Enum types
    ///
    /// Like scalars, enum types appear as the leaf nodes of GraphQL queries.
    Enum,

    /// ## Input objects
    ///
    /// Represents complex values provided in queries _into_ the system.
    InputObject,

    /// ## List types
    ///
    /// Represent lists of other types. This library provides implementations
    /// for vectors and slices, but other Rust types can be extended to serve
    /// as GraphQL lists.
    List,

    /// ## Non-null types
    ///
    /// In GraphQL, nullable types are the default. By putting a `!` after a
    /// type, it becomes non-nullable.
    NonNull,
}

graphql_enum!(TypeKind as "__TypeKind" {
    TypeKind::Scalar => "SCALAR",
    TypeKind::Object => "OBJECT",
    TypeKind::Interface => "INTERFACE",
    TypeKind::Union => "UNION",
    TypeKind::Enum => "ENUM",
    TypeKind::InputObject => "INPUT_OBJECT",
    TypeKind::List => "LIST",
    TypeKind::NonNull => "NON_NULL",
});

/// Location at which a directive may be applied.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(missing_docs, reason = "self-explanatory")]
pub enum DirectiveLocation {
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

graphql_enum!(DirectiveLocation as "__DirectiveLocation" {
    DirectiveLocation::Query => "QUERY",
    DirectiveLocation::Mutation => "MUTATION",
    DirectiveLocation::Subscription => "SUBSCRIPTION",
    DirectiveLocation::Field => "FIELD",
    DirectiveLocation::FragmentDefinition => "FRAGMENT_DEFINITION",
    DirectiveLocation::FragmentSpread => "FRAGMENT_SPREAD",
    DirectiveLocation::InlineFragment => "INLINE_FRAGMENT",
    DirectiveLocation::Schema => "SCHEMA",
    DirectiveLocation::Scalar => "SCALAR",
    DirectiveLocation::Object => "OBJECT",
    DirectiveLocation::FieldDefinition => "FIELD_DEFINITION",
    DirectiveLocation::ArgumentDefinition => "ARGUMENT_DEFINITION",
    DirectiveLocation::Interface => "INTERFACE",
    DirectiveLocation::Union => "UNION",
    DirectiveLocation::Enum => "ENUM",
    DirectiveLocation::EnumValue => "ENUM_VALUE",
    DirectiveLocation::InputObject => "INPUT_OBJECT",
    DirectiveLocation::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
});

/// `includeDeprecated: Boolean = false` argument of `__Type.fields` and
/// `__Type.enumValues`.
pub static INCLUDE_DEPRECATED_ARGUMENT: ArgumentSpec =
    ArgumentSpec::new("includeDeprecated", "Boolean", &[TypeModifier::Nullable])
        .with_default("false");

/// `name: String!` argument of the `__type` root field.
pub static TYPE_NAME_ARGUMENT: ArgumentSpec = ArgumentSpec::new("name", "String", &[]);

/// Provider of `__Schema` fields.
pub trait SchemaProvider: Send + Sync {
    /// Every named type of the schema.
    fn types(&self, params: FieldParams<'_>) -> Resolvable<'_, Vec<Arc<dyn TypeProvider>>>;

    /// Root type of query operations.
    fn query_type(&self, params: FieldParams<'_>) -> Resolvable<'_, Arc<dyn TypeProvider>>;

    /// Root type of mutation operations, if supported.
    fn mutation_type(&self, params: FieldParams<'_>) -> Resolvable<'_, Option<Arc<dyn TypeProvider>>>;

    /// Root type of subscription operations, if supported.
    fn subscription_type(
        &self,
        params: FieldParams<'_>,
    ) -> Resolvable<'_, Option<Arc<dyn TypeProvider>>>;

    /// Directives supported by the schema.
    fn directives(&self, params: FieldParams<'_>) -> Resolvable<'_, Vec<Arc<dyn DirectiveProvider>>>;

    /// Named type lookup backing the `__type` root field.
    fn type_by_name(
        &self,
        params: FieldParams<'_>,
        name: &str,
    ) -> Resolvable<'_, Option<Arc<dyn TypeProvider>>>;
}

/// Provider of `__Type` fields.
pub trait TypeProvider: Send + Sync {
    /// Kind of the type.
    fn kind(&self, params: FieldParams<'_>) -> Resolvable<'_, TypeKind>;

    /// Name of a named type.
    fn name(&self, params: FieldParams<'_>) -> Resolvable<'_, Option<String>>;

    /// Description of a named type.
    fn description(&self, params: FieldParams<'_>) -> Resolvable<'_, Option<String>>;

    /// Fields of an object or interface, filtered by deprecation status.
    fn fields(
        &self,
        params: FieldParams<'_>,
        include_deprecated: Option<bool>,
    ) -> Resolvable<'_, Option<Vec<Arc<dyn FieldProvider>>>>;

    /// Interfaces implemented by an object.
    fn interfaces(&self, params: FieldParams<'_>) -> Resolvable<'_, Option<Vec<Arc<dyn TypeProvider>>>>;

    /// Implementations of an interface, or members of a union.
    fn possible_types(
        &self,
        params: FieldParams<'_>,
    ) -> Resolvable<'_, Option<Vec<Arc<dyn TypeProvider>>>>;

    /// Values of an enum, filtered by deprecation status.
    fn enum_values(
        &self,
        params: FieldParams<'_>,
        include_deprecated: Option<bool>,
    ) -> Resolvable<'_, Option<Vec<Arc<dyn EnumValueProvider>>>>;

    /// Fields of an input object.
    fn input_fields(
        &self,
        params: FieldParams<'_>,
    ) -> Resolvable<'_, Option<Vec<Arc<dyn InputValueProvider>>>>;

    /// Type wrapped by a list or non-null type.
    fn of_type(&self, params: FieldParams<'_>) -> Resolvable<'_, Option<Arc<dyn TypeProvider>>>;
}

/// Provider of `__Field` fields.
pub trait FieldProvider: Send + Sync {
    /// Name of the field.
    fn name(&self, params: FieldParams<'_>) -> Resolvable<'_, String>;

    /// Description of the field.
    fn description(&self, params: FieldParams<'_>) -> Resolvable<'_, Option<String>>;

    /// Arguments of the field.
    fn args(&self, params: FieldParams<'_>) -> Resolvable<'_, Vec<Arc<dyn InputValueProvider>>>;

    /// Type of the field.
    fn field_type(&self, params: FieldParams<'_>) -> Resolvable<'_, Arc<dyn TypeProvider>>;

    /// Whether the field is deprecated.
    fn is_deprecated(&self, params: FieldParams<'_>) -> Resolvable<'_, bool>;

    /// Reason of the deprecation.
    fn deprecation_reason(&self, params: FieldParams<'_>) -> Resolvable<'_, Option<String>>;
}

/// Provider of `__InputValue` fields.
pub trait InputValueProvider: Send + Sync {
    /// Name of the argument or input field.
    fn name(&self, params: FieldParams<'_>) -> Resolvable<'_, String>;

    /// Description of the argument or input field.
    fn description(&self, params: FieldParams<'_>) -> Resolvable<'_, Option<String>>;

    /// Type of the argument or input field.
    fn value_type(&self, params: FieldParams<'_>) -> Resolvable<'_, Arc<dyn TypeProvider>>;

    /// Default value, in GraphQL literal syntax.
    fn default_value(&self, params: FieldParams<'_>) -> Resolvable<'_, Option<String>>;
}

/// Provider of `__EnumValue` fields.
pub trait EnumValueProvider: Send + Sync {
    /// Name of the value.
    fn name(&self, params: FieldParams<'_>) -> Resolvable<'_, String>;

    /// Description of the value.
    fn description(&self, params: FieldParams<'_>) -> Resolvable<'_, Option<String>>;

    /// Whether the value is deprecated.
    fn is_deprecated(&self, params: FieldParams<'_>) -> Resolvable<'_, bool>;

    /// Reason of the deprecation.
    fn deprecation_reason(&self, params: FieldParams<'_>) -> Resolvable<'_, Option<String>>;
}

/// Provider of `__Directive` fields.
pub trait DirectiveProvider: Send + Sync {
    /// Name of the directive.
    fn name(&self, params: FieldParams<'_>) -> Resolvable<'_, String>;

    /// Description of the directive.
    fn description(&self, params: FieldParams<'_>) -> Resolvable<'_, Option<String>>;

    /// Locations the directive may be applied at.
    fn locations(&self, params: FieldParams<'_>) -> Resolvable<'_, Vec<DirectiveLocation>>;

    /// Arguments of the directive.
    fn args(&self, params: FieldParams<'_>) -> Resolvable<'_, Vec<Arc<dyn InputValueProvider>>>;
}

modified_leaf!(
    Arc<dyn SchemaProvider>,
    Arc<dyn TypeProvider>,
    Arc<dyn FieldProvider>,
    Arc<dyn InputValueProvider>,
    Arc<dyn EnumValueProvider>,
    Arc<dyn DirectiveProvider>,
);

#[cfg(test)]
mod tests {
    use crate::{
        FieldError, Value,
        types::{EnumConverter, GraphQLEnum as _, LeafConverter as _},
    };

    use super::{DirectiveLocation, TypeKind};

    #[test]
    fn type_kind_names_round_trip() {
        assert_eq!(TypeKind::NAMES.len(), 8);
        let conv = EnumConverter::<TypeKind>::new();
        for &kind in TypeKind::VALUES {
            assert_eq!(conv.decode(&kind.to_value()), Ok(kind));
        }
        assert_eq!(TypeKind::InputObject.name(), "INPUT_OBJECT");
    }

    #[test]
    fn rejects_unknown_type_kind() {
        assert_eq!(
            TypeKind::from_value(&Value::enum_value("NOT_A_KIND")),
            Err(FieldError::InvalidEnumValue {
                type_name: "__TypeKind",
                value: Value::enum_value("NOT_A_KIND"),
            }),
        );
        assert!(TypeKind::from_value(&Value::string("scalar")).is_err());
    }

    #[test]
    fn directive_locations_keep_declaration_order() {
        assert_eq!(DirectiveLocation::NAMES.len(), 18);
        assert_eq!(DirectiveLocation::NAMES[0], "QUERY");
        assert_eq!(DirectiveLocation::NAMES[17], "INPUT_FIELD_DEFINITION");
        assert_eq!(DirectiveLocation::VALUES[9], DirectiveLocation::Object);
        assert_eq!(DirectiveLocation::FragmentSpread.to_string(), "FRAGMENT_SPREAD");
    }
}
