//! Built-in scalars, introspection meta-types and standard directives.

use crate::{
    introspection::{
        DirectiveLocation, TypeKind,
        object::{FieldDecl, META_OBJECTS},
    },
    types::{ArgumentSpec, GraphQLEnum, TypeModifier},
};

use super::{
    meta::{Argument, DirectiveType, EnumMeta, EnumValue, Field, ObjectMeta, ScalarMeta},
    model::{Registry, SchemaError},
};

/// Built-in scalar names, in registration order.
pub const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "ID", "String", "Boolean"];

/// `if: Boolean!` argument of `@skip` and `@include`.
pub(crate) static IF_ARGUMENT: ArgumentSpec = ArgumentSpec::new("if", "Boolean", &[]);

static REASON_ARGUMENT: ArgumentSpec =
    ArgumentSpec::new("reason", "String", &[TypeModifier::Nullable])
        .with_default("\"No longer supported\"");

const FIELD_LOCATIONS: [DirectiveLocation; 3] = [
    DirectiveLocation::Field,
    DirectiveLocation::FragmentSpread,
    DirectiveLocation::InlineFragment,
];

impl Registry {
    /// Creates a registry holding every built-in type and directive.
    ///
    /// # Errors
    ///
    /// Never in practice, the built-ins being consistent; errors of
    /// [`add_types_to_schema`] are propagated nonetheless.
    pub fn with_builtins() -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        add_types_to_schema(&mut registry)?;
        Ok(registry)
    }
}

/// Registers the built-in scalars, the introspection meta-types and the
/// `@skip`, `@include` and `@deprecated` directives.
///
/// Named types are registered first and fields attached afterwards, so
/// meta-types may reference each other freely.
///
/// # Errors
///
/// Any [`SchemaError`], e.g. [`SchemaError::DuplicateType`] if one of the
/// built-in names is already taken.
pub fn add_types_to_schema(registry: &mut Registry) -> Result<(), SchemaError> {
    for name in BUILTIN_SCALARS {
        registry.add_type(ScalarMeta::new(name).description("Built-in type").into_meta())?;
    }
    registry.add_type(EnumMeta::new(TypeKind::NAME).into_meta())?;
    registry.add_type(EnumMeta::new(DirectiveLocation::NAME).into_meta())?;
    for (name, _) in &META_OBJECTS {
        registry.add_type(ObjectMeta::new(*name).into_meta())?;
    }

    registry.add_enum_values(TypeKind::NAME, enum_values::<TypeKind>())?;
    registry.add_enum_values(DirectiveLocation::NAME, enum_values::<DirectiveLocation>())?;

    for (name, decls) in &META_OBJECTS {
        let fields = decls
            .iter()
            .map(|decl| field(registry, decl))
            .collect::<Result<Vec<_>, _>>()?;
        registry.add_fields(name, fields)?;
    }

    let skip = DirectiveType::new("skip", &FIELD_LOCATIONS)
        .description("Directs the executor to skip this field or fragment when the `if` argument is true.")
        .argument(argument(registry, &IF_ARGUMENT)?);
    let include = DirectiveType::new("include", &FIELD_LOCATIONS)
        .description("Directs the executor to include this field or fragment only when the `if` argument is true.")
        .argument(argument(registry, &IF_ARGUMENT)?);
    let deprecated = DirectiveType::new(
        "deprecated",
        &[DirectiveLocation::FieldDefinition, DirectiveLocation::EnumValue],
    )
    .description("Marks an element of a GraphQL schema as no longer supported.")
    .argument(argument(registry, &REASON_ARGUMENT)?);
    for directive in [skip, include, deprecated] {
        registry.add_directive(directive)?;
    }

    Ok(())
}

fn enum_values<E: GraphQLEnum>() -> Vec<EnumValue> {
    E::NAMES.iter().map(|&name| EnumValue::new(name)).collect()
}

fn field(registry: &mut Registry, decl: &FieldDecl) -> Result<Field, SchemaError> {
    let base = registry.lookup_type(decl.type_name)?;
    let field_type = registry.modified_type(base, decl.modifiers);
    decl.arguments
        .iter()
        .try_fold(Field::new(decl.name, field_type), |field, spec| {
            Ok(field.argument(argument(registry, spec)?))
        })
}

/// Describes an argument declared through an [`ArgumentSpec`].
///
/// # Errors
///
/// [`SchemaError::UnknownType`] if the argument type isn't registered.
pub fn argument(registry: &mut Registry, spec: &ArgumentSpec) -> Result<Argument, SchemaError> {
    let base = registry.lookup_type(spec.type_name())?;
    let arg = Argument::new(spec.name(), registry.modified_type(base, spec.modifiers()));
    Ok(match spec.default_literal() {
        Some(literal) => arg.default_value(literal),
        None => arg,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::schema::{
        meta::{MetaType, TypeId},
        model::{Registry, SchemaError, SchemaType},
    };

    use super::add_types_to_schema;

    fn builtins() -> SchemaType {
        Registry::with_builtins().unwrap().finish().unwrap()
    }

    fn field_type(schema: &SchemaType, type_name: &str, field: &str) -> String {
        let meta = schema.concrete_type_by_name(type_name).unwrap();
        let field = meta.field_by_name(field).unwrap();
        schema.type_display(field.field_type).to_string()
    }

    #[test]
    fn registers_named_types_in_order() {
        let schema = builtins();
        let names = schema
            .named_types()
            .filter_map(|id| schema.meta_type(id)?.name().cloned())
            .collect::<Vec<_>>();

        assert_eq!(
            names,
            [
                "Int",
                "Float",
                "ID",
                "String",
                "Boolean",
                "__TypeKind",
                "__DirectiveLocation",
                "__Schema",
                "__Type",
                "__Field",
                "__InputValue",
                "__EnumValue",
                "__Directive",
            ],
        );
        assert_eq!(
            schema.concrete_type_by_name("ID").unwrap().description().map(|d| d.as_str()),
            Some("Built-in type"),
        );
    }

    #[test]
    fn meta_fields_have_introspection_types() {
        let schema = builtins();

        assert_eq!(field_type(&schema, "__Schema", "types"), "[__Type!]!");
        assert_eq!(field_type(&schema, "__Schema", "queryType"), "__Type!");
        assert_eq!(field_type(&schema, "__Schema", "mutationType"), "__Type");
        assert_eq!(field_type(&schema, "__Type", "kind"), "__TypeKind!");
        assert_eq!(field_type(&schema, "__Type", "fields"), "[__Field!]");
        assert_eq!(field_type(&schema, "__Type", "ofType"), "__Type");
        assert_eq!(field_type(&schema, "__Field", "isDeprecated"), "Boolean!");
        assert_eq!(field_type(&schema, "__InputValue", "defaultValue"), "String");
        assert_eq!(field_type(&schema, "__Directive", "locations"), "[__DirectiveLocation!]!");
    }

    #[test]
    fn wrapper_nodes_are_shared_between_fields() {
        let schema = builtins();
        let id = |type_name: &str, field: &str| -> TypeId {
            schema
                .concrete_type_by_name(type_name)
                .and_then(|t| t.field_by_name(field))
                .unwrap()
                .field_type
        };

        assert_eq!(id("__Schema", "types"), id("__Schema", "types"));
        assert_eq!(id("__Type", "interfaces"), id("__Type", "possibleTypes"));
        assert_eq!(id("__Field", "args"), id("__Directive", "args"));
        assert_eq!(id("__Field", "type"), id("__InputValue", "type"));
    }

    #[test]
    fn include_deprecated_defaults_to_false() {
        let schema = builtins();
        let fields = schema
            .concrete_type_by_name("__Type")
            .and_then(|t| t.field_by_name("fields"))
            .unwrap();

        assert_eq!(fields.arguments.len(), 1);
        assert_eq!(fields.arguments[0].name, "includeDeprecated");
        assert_eq!(fields.arguments[0].default_value.as_deref(), Some("false"));
        assert_eq!(schema.type_display(fields.arguments[0].arg_type).to_string(), "Boolean");
    }

    #[test]
    fn enums_list_their_values() {
        let schema = builtins();
        let Some(MetaType::Enum(kind)) = schema.concrete_type_by_name("__TypeKind") else {
            panic!("__TypeKind is not an enum");
        };
        let values = kind.values.as_deref().unwrap_or_default();

        assert_eq!(values.len(), 8);
        assert_eq!(values[5].name, "INPUT_OBJECT");
    }

    #[test]
    fn registers_standard_directives() {
        let schema = builtins();
        let names = schema.directives().map(|d| d.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["skip", "include", "deprecated"]);

        let deprecated = schema.directive_by_name("deprecated").unwrap();
        assert_eq!(
            deprecated.arguments[0].default_value.as_deref(),
            Some("\"No longer supported\""),
        );
    }

    #[test]
    fn builtins_register_once() {
        let mut registry = Registry::with_builtins().unwrap();

        assert_eq!(
            add_types_to_schema(&mut registry),
            Err(SchemaError::DuplicateType("Int".into())),
        );
    }
}
