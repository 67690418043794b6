//! Small Star Wars schema introspected by the tests.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt as _};

use crate::{
    ExecutionResult, FieldError, GraphQLObject, IntrospectionRoot, ResolverParams, Value,
    schema::{
        Argument, EnumMeta, EnumValue, Field, InputObjectMeta, InterfaceMeta, ObjectMeta,
        Registry, SchemaError, SchemaType, UnionMeta,
    },
    types::TypeModifier::{List, Nullable},
};

/// Query root of the test schema.
pub struct Query;

impl GraphQLObject for Query {
    fn type_name(&self) -> &'static str {
        "Query"
    }

    fn resolve_field<'a>(&'a self, params: ResolverParams<'a>) -> BoxFuture<'a, ExecutionResult> {
        async move {
            match params.field_name {
                "__typename" => Ok(Value::string("Query")),
                "greeting" => Ok(Value::string("Hello there")),
                other => Err(FieldError::UnknownField {
                    type_name: "Query",
                    field: other.into(),
                }),
            }
        }
        .boxed()
    }
}

fn build(with_query: bool) -> Result<SchemaType, SchemaError> {
    let mut registry = Registry::with_builtins()?;

    registry.add_type(
        EnumMeta::new("Episode")
            .description("One of the films in the Star Wars Trilogy")
            .into_meta(),
    )?;
    registry.add_type(
        InterfaceMeta::new("Character")
            .description("A character in the Star Wars Trilogy")
            .into_meta(),
    )?;
    registry.add_type(ObjectMeta::new("Human").interfaces(&["Character"]).into_meta())?;
    registry.add_type(ObjectMeta::new("Droid").interfaces(&["Character"]).into_meta())?;
    registry.add_type(UnionMeta::new("SearchResult", &["Human", "Droid"]).into_meta())?;

    let int = registry.lookup_type("Int")?;
    let string = registry.lookup_type("String")?;
    let stars = registry.modified_type(int, &[]);
    registry.add_type(
        InputObjectMeta::new(
            "ReviewInput",
            vec![
                Argument::new("stars", stars),
                Argument::new("commentary", string).default_value("\"meh\""),
            ],
        )
        .into_meta(),
    )?;
    registry.add_type(ObjectMeta::new("Query").into_meta())?;

    registry.add_enum_values(
        "Episode",
        vec![
            EnumValue::new("NEW_HOPE").description("Released in 1977."),
            EnumValue::new("EMPIRE"),
            EnumValue::new("JEDI").deprecated(Some("Use NEW_HOPE")),
        ],
    )?;

    let id = registry.modified_type(string, &[]);
    let friends = {
        let character = registry.lookup_type("Character")?;
        registry.modified_type(character, &[Nullable, List, Nullable])
    };
    registry.add_fields(
        "Character",
        vec![
            Field::new("id", id).description("The id of the character"),
            Field::new("name", string),
            Field::new("friends", friends),
        ],
    )?;
    registry.add_fields(
        "Human",
        vec![
            Field::new("id", id),
            Field::new("name", string),
            Field::new("friends", friends),
            Field::new("homePlanet", string).deprecated(Some("Nobody asks anymore")),
        ],
    )?;
    registry.add_fields(
        "Droid",
        vec![
            Field::new("id", id),
            Field::new("name", string),
            Field::new("friends", friends),
            Field::new("primaryFunction", string).deprecated(None),
        ],
    )?;

    let episode = registry.lookup_type("Episode")?;
    let character = registry.lookup_type("Character")?;
    let search_result = {
        let union = registry.lookup_type("SearchResult")?;
        registry.modified_type(union, &[List])
    };
    let greeting = registry.modified_type(string, &[]);
    registry.add_fields(
        "Query",
        vec![
            Field::new("hero", character).argument(
                Argument::new("episode", episode)
                    .description("If omitted, returns the hero of the whole saga.")
                    .default_value("NEW_HOPE"),
            ),
            Field::new("search", search_result).argument(Argument::new("text", id)),
            Field::new("greeting", greeting),
        ],
    )?;

    if with_query {
        registry.query_type("Query")?;
    }
    registry.finish()
}

/// Frozen test schema.
pub fn star_wars_schema() -> Arc<SchemaType> {
    Arc::new(build(true).expect("test schema builds"))
}

/// Test schema without a query root selected.
pub fn rootless_schema() -> Arc<SchemaType> {
    Arc::new(build(false).expect("test schema builds"))
}

/// Query root answering introspection over the given schema.
pub fn root(schema: Arc<SchemaType>) -> IntrospectionRoot {
    IntrospectionRoot::new(Arc::new(Query), schema.into_provider())
}
