use std::fmt;

use arcstr::ArcStr;
use derive_more::with_trait::{Display, Error};
use fnv::FnvHashMap;
use indexmap::IndexMap;
use itertools::Itertools as _;

use crate::{
    parser::{ParseError, parse_value_literal},
    types::TypeModifier,
};

use super::meta::{
    Argument, DirectiveType, EnumMeta, EnumValue, Field, InterfaceMeta, MetaType, ObjectMeta,
    TypeId, UnionMeta,
};

/// Kind of an unnamed wrapper node.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum WrapperKind {
    /// List of the inner node.
    #[display("LIST")]
    List,
    /// Non-null version of the inner node.
    #[display("NON_NULL")]
    NonNull,
}

/// Error aborting the construction of a [`SchemaType`].
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub enum SchemaError {
    /// Referenced type was never registered.
    #[display("Unknown type \"{_0}\"")]
    UnknownType(#[error(not(source))] ArcStr),

    /// Type name is registered twice.
    #[display("Type \"{_0}\" is already registered")]
    DuplicateType(#[error(not(source))] ArcStr),

    /// Directive name is registered twice.
    #[display("Directive \"@{_0}\" is already registered")]
    DuplicateDirective(#[error(not(source))] ArcStr),

    /// Field name appears twice within a single type.
    #[display("Field \"{field}\" is declared twice on type \"{type_name}\"")]
    DuplicateField {
        /// Owning type.
        type_name: ArcStr,
        /// Duplicated field name.
        field: ArcStr,
    },

    /// Fields were attached to a type that is neither an object nor an
    /// interface, or an operation root is not an object.
    #[display("Type \"{_0}\" is not an object type")]
    NotAnObject(#[error(not(source))] ArcStr),

    /// Object declares an implemented interface that isn't an interface.
    #[display("Type \"{_0}\" is not an interface type")]
    NotAnInterface(#[error(not(source))] ArcStr),

    /// Enum values were attached to a non-enum type.
    #[display("Type \"{_0}\" is not an enum type")]
    NotAnEnum(#[error(not(source))] ArcStr),

    /// Fields of the type were already attached.
    #[display("Fields of type \"{_0}\" are already set")]
    FieldsAlreadySet(#[error(not(source))] ArcStr),

    /// Values of the enum were already attached.
    #[display("Values of enum \"{_0}\" are already set")]
    ValuesAlreadySet(#[error(not(source))] ArcStr),

    /// Declared default of an argument is not a valid constant literal.
    #[display("Invalid default value for argument \"{name}\": {source}")]
    InvalidDefault {
        /// Argument name.
        name: ArcStr,
        /// Parsing failure.
        source: ParseError,
    },
}

/// Builder of a [`SchemaType`].
///
/// Construction happens in two phases: every named type is registered with
/// [`Registry::add_type`] first, then fields and enum values are attached, so
/// fields may reference types regardless of their registration order.
#[derive(Debug, Default)]
pub struct Registry {
    types: Vec<MetaType>,
    names: FnvHashMap<ArcStr, TypeId>,
    wrappers: FnvHashMap<(WrapperKind, TypeId), TypeId>,
    directives: IndexMap<ArcStr, DirectiveType>,
    query_type: Option<TypeId>,
    mutation_type: Option<TypeId>,
    subscription_type: Option<TypeId>,
}

impl Registry {
    /// Creates an empty registry, without any built-in type.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type.
    ///
    /// Wrapper types are routed through [`Registry::wrap_type`].
    ///
    /// # Errors
    ///
    /// [`SchemaError::DuplicateType`] if the name is already taken, and
    /// [`SchemaError::InvalidDefault`] for a malformed input field default.
    pub fn add_type(&mut self, meta: MetaType) -> Result<TypeId, SchemaError> {
        match meta {
            MetaType::List(of_type) => Ok(self.wrap_type(WrapperKind::List, of_type)),
            MetaType::NonNull(of_type) => Ok(self.wrap_type(WrapperKind::NonNull, of_type)),
            meta => {
                let name = meta.name().cloned().unwrap_or_default();
                if self.names.contains_key(&name) {
                    return Err(SchemaError::DuplicateType(name));
                }
                if let Some(input_fields) = meta.input_fields() {
                    validate_arguments(input_fields)?;
                }
                let id = self.push(meta);
                log::debug!("registered type `{name}` as {id:?}");
                self.names.insert(name, id);
                Ok(id)
            }
        }
    }

    /// Looks up a registered named type.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownType`] if no type is registered under `name`.
    pub fn lookup_type(&self, name: &str) -> Result<TypeId, SchemaError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| SchemaError::UnknownType(name.into()))
    }

    /// Returns the wrapper node of the given kind around `of_type`.
    ///
    /// At most one node exists per `(kind, of_type)` pair: repeated calls
    /// return the identical node.
    pub fn wrap_type(&mut self, kind: WrapperKind, of_type: TypeId) -> TypeId {
        if let Some(&id) = self.wrappers.get(&(kind, of_type)) {
            log::trace!("reusing {kind} wrapper {id:?} of {of_type:?}");
            return id;
        }
        let id = self.push(match kind {
            WrapperKind::List => MetaType::List(of_type),
            WrapperKind::NonNull => MetaType::NonNull(of_type),
        });
        log::trace!("created {kind} wrapper {id:?} of {of_type:?}");
        self.wrappers.insert((kind, of_type), id);
        id
    }

    /// Shortcut for [`Registry::wrap_type`] with [`WrapperKind::List`].
    pub fn list_type(&mut self, of_type: TypeId) -> TypeId {
        self.wrap_type(WrapperKind::List, of_type)
    }

    /// Shortcut for [`Registry::wrap_type`] with [`WrapperKind::NonNull`].
    pub fn non_null_type(&mut self, of_type: TypeId) -> TypeId {
        self.wrap_type(WrapperKind::NonNull, of_type)
    }

    /// Builds the wrapper chain describing `base` under a modifier stack.
    ///
    /// Every layer not marked [`TypeModifier::Nullable`] is wrapped into a
    /// non-null node, so `[]` gives `T!`, `[Nullable]` gives `T`, `[List]`
    /// gives `[T!]!` and `[Nullable, List]` gives `[T!]`.
    pub fn modified_type(&mut self, base: TypeId, modifiers: &[TypeModifier]) -> TypeId {
        self.modified_layer(base, modifiers, false)
    }

    fn modified_layer(&mut self, base: TypeId, modifiers: &[TypeModifier], nullable: bool) -> TypeId {
        let inner = match modifiers.split_first() {
            Some((TypeModifier::Nullable, rest)) => return self.modified_layer(base, rest, true),
            Some((TypeModifier::None, rest)) => return self.modified_layer(base, rest, nullable),
            Some((TypeModifier::List, rest)) => {
                let item = self.modified_layer(base, rest, false);
                self.list_type(item)
            }
            None => base,
        };
        if nullable {
            inner
        } else {
            self.non_null_type(inner)
        }
    }

    /// Attaches the fields of an object or interface type.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::UnknownType`] if the type isn't registered;
    /// - [`SchemaError::NotAnObject`] if it's neither an object nor an
    ///   interface;
    /// - [`SchemaError::FieldsAlreadySet`] on a second call for the type;
    /// - [`SchemaError::DuplicateField`] if two fields share a name;
    /// - [`SchemaError::InvalidDefault`] for a malformed argument default.
    pub fn add_fields(&mut self, type_name: &str, fields: Vec<Field>) -> Result<(), SchemaError> {
        let id = self.lookup_type(type_name)?;
        if let Some(dup) = fields.iter().map(|f| &f.name).duplicates().next() {
            return Err(SchemaError::DuplicateField {
                type_name: type_name.into(),
                field: dup.clone(),
            });
        }
        for field in &fields {
            validate_arguments(&field.arguments)?;
        }
        match self.types.get_mut(id.0) {
            Some(
                MetaType::Object(ObjectMeta { fields: slot, .. })
                | MetaType::Interface(InterfaceMeta { fields: slot, .. }),
            ) => {
                if slot.is_some() {
                    return Err(SchemaError::FieldsAlreadySet(type_name.into()));
                }
                log::debug!("attached {} fields to `{type_name}`", fields.len());
                *slot = Some(fields);
                Ok(())
            }
            _ => Err(SchemaError::NotAnObject(type_name.into())),
        }
    }

    /// Attaches the values of an enum type, in declaration order.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownType`], [`SchemaError::NotAnEnum`] or
    /// [`SchemaError::ValuesAlreadySet`].
    pub fn add_enum_values(&mut self, type_name: &str, values: Vec<EnumValue>) -> Result<(), SchemaError> {
        let id = self.lookup_type(type_name)?;
        match self.types.get_mut(id.0) {
            Some(MetaType::Enum(EnumMeta { values: slot, .. })) => {
                if slot.is_some() {
                    return Err(SchemaError::ValuesAlreadySet(type_name.into()));
                }
                *slot = Some(values);
                Ok(())
            }
            _ => Err(SchemaError::NotAnEnum(type_name.into())),
        }
    }

    /// Registers a directive.
    ///
    /// # Errors
    ///
    /// [`SchemaError::DuplicateDirective`] or [`SchemaError::InvalidDefault`].
    pub fn add_directive(&mut self, directive: DirectiveType) -> Result<(), SchemaError> {
        if self.directives.contains_key(&directive.name) {
            return Err(SchemaError::DuplicateDirective(directive.name));
        }
        validate_arguments(&directive.arguments)?;
        self.directives.insert(directive.name.clone(), directive);
        Ok(())
    }

    /// Selects the object type serving query operations.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownType`] or [`SchemaError::NotAnObject`].
    pub fn query_type(&mut self, name: &str) -> Result<(), SchemaError> {
        self.query_type = Some(self.lookup_object(name)?);
        Ok(())
    }

    /// Selects the object type serving mutation operations.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownType`] or [`SchemaError::NotAnObject`].
    pub fn mutation_type(&mut self, name: &str) -> Result<(), SchemaError> {
        self.mutation_type = Some(self.lookup_object(name)?);
        Ok(())
    }

    /// Selects the object type serving subscription operations.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownType`] or [`SchemaError::NotAnObject`].
    pub fn subscription_type(&mut self, name: &str) -> Result<(), SchemaError> {
        self.subscription_type = Some(self.lookup_object(name)?);
        Ok(())
    }

    /// Freezes the registry into an immutable [`SchemaType`].
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownType`] if an object implements, or a union
    /// contains, a type that was never registered,
    /// [`SchemaError::NotAnInterface`] if an implemented type isn't an
    /// interface and [`SchemaError::NotAnObject`] if a union member isn't an
    /// object.
    pub fn finish(self) -> Result<SchemaType, SchemaError> {
        let mut interfaces = FnvHashMap::<TypeId, Vec<TypeId>>::default();
        let mut possible_types = FnvHashMap::<TypeId, Vec<TypeId>>::default();

        for (index, meta) in self.types.iter().enumerate() {
            let id = TypeId(index);
            match meta {
                MetaType::Object(ObjectMeta {
                    interface_names, ..
                }) => {
                    for name in interface_names {
                        let iface = self.lookup_interface(name)?;
                        interfaces.entry(id).or_default().push(iface);
                        possible_types.entry(iface).or_default().push(id);
                    }
                }
                MetaType::Union(UnionMeta { of_type_names, .. }) => {
                    let members = of_type_names
                        .iter()
                        .map(|name| self.lookup_object(name))
                        .collect::<Result<Vec<_>, _>>()?;
                    possible_types.insert(id, members);
                }
                _ => {}
            }
        }

        log::debug!(
            "schema frozen with {} type nodes and {} directives",
            self.types.len(),
            self.directives.len(),
        );

        Ok(SchemaType {
            types: self.types,
            names: self.names,
            directives: self.directives,
            interfaces,
            possible_types,
            query_type: self.query_type,
            mutation_type: self.mutation_type,
            subscription_type: self.subscription_type,
        })
    }

    fn push(&mut self, meta: MetaType) -> TypeId {
        let id = TypeId(self.types.len());
        self.types.push(meta);
        id
    }

    fn lookup_interface(&self, name: &str) -> Result<TypeId, SchemaError> {
        let id = self.lookup_type(name)?;
        match self.types.get(id.0) {
            Some(MetaType::Interface(_)) => Ok(id),
            _ => Err(SchemaError::NotAnInterface(name.into())),
        }
    }

    fn lookup_object(&self, name: &str) -> Result<TypeId, SchemaError> {
        let id = self.lookup_type(name)?;
        match self.types.get(id.0) {
            Some(MetaType::Object(_)) => Ok(id),
            _ => Err(SchemaError::NotAnObject(name.into())),
        }
    }
}

fn validate_arguments(arguments: &[Argument]) -> Result<(), SchemaError> {
    for arg in arguments {
        if let Some(literal) = &arg.default_value {
            parse_value_literal(literal).map_err(|source| SchemaError::InvalidDefault {
                name: arg.name.clone(),
                source,
            })?;
        }
    }
    Ok(())
}

/// Immutable type graph of a schema.
///
/// Nodes live in a single arena addressed by [`TypeId`]. Wrapper nodes refer
/// to their inner node by id, so arbitrarily deep wrapping never duplicates a
/// named node.
#[derive(Debug)]
pub struct SchemaType {
    types: Vec<MetaType>,
    names: FnvHashMap<ArcStr, TypeId>,
    directives: IndexMap<ArcStr, DirectiveType>,
    interfaces: FnvHashMap<TypeId, Vec<TypeId>>,
    possible_types: FnvHashMap<TypeId, Vec<TypeId>>,
    query_type: Option<TypeId>,
    mutation_type: Option<TypeId>,
    subscription_type: Option<TypeId>,
}

static_assertions::assert_impl_all!(SchemaType: Send, Sync);

impl SchemaType {
    /// Node behind the given id.
    pub fn meta_type(&self, id: TypeId) -> Option<&MetaType> {
        self.types.get(id.0)
    }

    /// Id of the named type.
    pub fn type_by_name(&self, name: &str) -> Option<TypeId> {
        self.names.get(name).copied()
    }

    /// Get a concrete type by name.
    pub fn concrete_type_by_name(&self, name: &str) -> Option<&MetaType> {
        self.type_by_name(name).and_then(|id| self.meta_type(id))
    }

    /// Named types, in registration order.
    pub fn named_types(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.types
            .iter()
            .enumerate()
            .filter(|(_, meta)| meta.name().is_some())
            .map(|(index, _)| TypeId(index))
    }

    /// Get the query type from the schema.
    pub fn query_type(&self) -> Option<TypeId> {
        self.query_type
    }

    /// Get the mutation type from the schema.
    pub fn mutation_type(&self) -> Option<TypeId> {
        self.mutation_type
    }

    /// Get the subscription type.
    pub fn subscription_type(&self) -> Option<TypeId> {
        self.subscription_type
    }

    /// Get a list of directives supported by the schema.
    pub fn directives(&self) -> impl Iterator<Item = &DirectiveType> {
        self.directives.values()
    }

    /// Get directive by name.
    pub fn directive_by_name(&self, name: &str) -> Option<&DirectiveType> {
        self.directives.get(name)
    }

    /// Interfaces implemented by an object type.
    pub fn interfaces(&self, id: TypeId) -> &[TypeId] {
        self.interfaces.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Objects implementing an interface, or members of a union.
    pub fn possible_types(&self, id: TypeId) -> &[TypeId] {
        self.possible_types.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Renders the type in SDL notation, e.g. `[__Type!]!`.
    pub fn type_display(&self, id: TypeId) -> impl fmt::Display + '_ {
        TypeDisplay { schema: self, id }
    }
}

struct TypeDisplay<'a> {
    schema: &'a SchemaType,
    id: TypeId,
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = |id| TypeDisplay {
            schema: self.schema,
            id,
        };
        match self.schema.meta_type(self.id) {
            Some(MetaType::List(of)) => write!(f, "[{}]", inner(*of)),
            Some(MetaType::NonNull(of)) => write!(f, "{}!", inner(*of)),
            Some(named) => f.write_str(named.name().map_or("", ArcStr::as_str)),
            None => write!(f, "<unknown {:?}>", self.id),
        }
    }
}
