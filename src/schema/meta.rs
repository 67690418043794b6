//! Types used to describe a `GraphQL` schema

use arcstr::ArcStr;

use crate::introspection::{DirectiveLocation, TypeKind};

/// Identity of a type descriptor node inside a [`SchemaType`] arena.
///
/// Two equal ids always denote the very same node.
///
/// [`SchemaType`]: super::model::SchemaType
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TypeId(pub(super) usize);

impl TypeId {
    /// Position of the node in its arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Whether an item is deprecated, with context.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum DeprecationStatus {
    /// The field/variant is not deprecated.
    #[default]
    Current,
    /// The field/variant is deprecated, with an optional reason
    Deprecated(Option<ArcStr>),
}

impl DeprecationStatus {
    /// If this deprecation status indicates the item is deprecated.
    pub fn is_deprecated(&self) -> bool {
        match self {
            Self::Current => false,
            Self::Deprecated(_) => true,
        }
    }

    /// An optional reason for the deprecation, or none if `Current`.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Current => None,
            Self::Deprecated(rsn) => rsn.as_deref(),
        }
    }
}

/// Scalar type metadata
#[derive(Clone, Debug)]
pub struct ScalarMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
}

/// Object type metadata
#[derive(Clone, Debug)]
pub struct ObjectMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub fields: Option<Vec<Field>>,
    #[doc(hidden)]
    pub interface_names: Vec<ArcStr>,
}

/// Interface type metadata
#[derive(Clone, Debug)]
pub struct InterfaceMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub fields: Option<Vec<Field>>,
}

/// Union type metadata
#[derive(Clone, Debug)]
pub struct UnionMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub of_type_names: Vec<ArcStr>,
}

/// Enum type metadata
#[derive(Clone, Debug)]
pub struct EnumMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub values: Option<Vec<EnumValue>>,
}

/// Input object metadata
#[derive(Clone, Debug)]
pub struct InputObjectMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub input_fields: Vec<Argument>,
}

/// Generic type metadata
#[derive(Clone, Debug)]
pub enum MetaType {
    #[doc(hidden)]
    Scalar(ScalarMeta),
    #[doc(hidden)]
    Object(ObjectMeta),
    #[doc(hidden)]
    Interface(InterfaceMeta),
    #[doc(hidden)]
    Union(UnionMeta),
    #[doc(hidden)]
    Enum(EnumMeta),
    #[doc(hidden)]
    InputObject(InputObjectMeta),
    /// List of the referenced node.
    List(TypeId),
    /// Non-null version of the referenced node.
    NonNull(TypeId),
}

/// Metadata for a field
#[derive(Clone, Debug)]
pub struct Field {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub arguments: Vec<Argument>,
    #[doc(hidden)]
    pub field_type: TypeId,
    #[doc(hidden)]
    pub deprecation_status: DeprecationStatus,
}

impl Field {
    /// Returns true if the field is used exclusively by introspection.
    pub fn is_builtin(&self) -> bool {
        self.name.starts_with("__")
    }
}

/// Metadata for an argument to a field
#[derive(Clone, Debug)]
pub struct Argument {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub arg_type: TypeId,
    /// Default value in GraphQL literal syntax.
    pub default_value: Option<ArcStr>,
}

/// Metadata for a single value in an enum
#[derive(Clone, Debug)]
pub struct EnumValue {
    /// The name of the enum value
    ///
    /// This is the string literal representation of the enum in responses.
    pub name: ArcStr,
    /// The optional description of the enum value.
    ///
    /// Note: this is not the description of the enum itself; it's the
    /// description of this enum _value_.
    pub description: Option<ArcStr>,
    /// Whether the value is deprecated or not, with an optional reason.
    pub deprecation_status: DeprecationStatus,
}

/// Metadata for a directive
#[derive(Clone, Debug)]
pub struct DirectiveType {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub locations: Vec<DirectiveLocation>,
    #[doc(hidden)]
    pub arguments: Vec<Argument>,
}

impl MetaType {
    /// Access the name of the type, if applicable
    ///
    /// Lists and non-null wrappers do not have names.
    pub fn name(&self) -> Option<&ArcStr> {
        match self {
            Self::Scalar(ScalarMeta { name, .. })
            | Self::Object(ObjectMeta { name, .. })
            | Self::Interface(InterfaceMeta { name, .. })
            | Self::Union(UnionMeta { name, .. })
            | Self::Enum(EnumMeta { name, .. })
            | Self::InputObject(InputObjectMeta { name, .. }) => Some(name),
            Self::List(_) | Self::NonNull(_) => None,
        }
    }

    /// Access the description of the type, if applicable
    pub fn description(&self) -> Option<&ArcStr> {
        match self {
            Self::Scalar(ScalarMeta { description, .. })
            | Self::Object(ObjectMeta { description, .. })
            | Self::Interface(InterfaceMeta { description, .. })
            | Self::Union(UnionMeta { description, .. })
            | Self::Enum(EnumMeta { description, .. })
            | Self::InputObject(InputObjectMeta { description, .. }) => description.as_ref(),
            Self::List(_) | Self::NonNull(_) => None,
        }
    }

    /// Construct a `TypeKind` for a given type
    pub fn type_kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::Union(_) => TypeKind::Union,
            Self::Enum(_) => TypeKind::Enum,
            Self::InputObject(_) => TypeKind::InputObject,
            Self::List(_) => TypeKind::List,
            Self::NonNull(_) => TypeKind::NonNull,
        }
    }

    /// Access the fields of an object or interface type.
    pub fn fields(&self) -> Option<&[Field]> {
        match self {
            Self::Object(ObjectMeta { fields, .. }) | Self::Interface(InterfaceMeta { fields, .. }) => {
                Some(fields.as_deref().unwrap_or_default())
            }
            _ => None,
        }
    }

    /// Access a field's meta data given its name
    ///
    /// Only objects and interfaces have fields. This method always returns `None` for other types.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields()?.iter().find(|f| f.name.as_str() == name)
    }

    /// Access the values of an enum type.
    pub fn enum_values(&self) -> Option<&[EnumValue]> {
        match self {
            Self::Enum(EnumMeta { values, .. }) => Some(values.as_deref().unwrap_or_default()),
            _ => None,
        }
    }

    /// Access the input fields of an input object type.
    pub fn input_fields(&self) -> Option<&[Argument]> {
        match self {
            Self::InputObject(InputObjectMeta { input_fields, .. }) => Some(input_fields),
            _ => None,
        }
    }

    /// Node wrapped by a list or non-null wrapper.
    pub fn of_type(&self) -> Option<TypeId> {
        match self {
            Self::List(id) | Self::NonNull(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns true if the type is built-in to GraphQL.
    pub fn is_builtin(&self) -> bool {
        self.name().is_some_and(|n| n.starts_with("__"))
    }
}

impl ScalarMeta {
    /// Builds a new [`ScalarMeta`] type with the specified `name`.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the `description` of this [`ScalarMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Wraps this [`ScalarMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Scalar(self)
    }
}

impl ObjectMeta {
    /// Builds a new [`ObjectMeta`] type with the specified `name`.
    ///
    /// Fields are attached later with [`Registry::add_fields`], so that they
    /// may reference types registered after this one.
    ///
    /// [`Registry::add_fields`]: super::model::Registry::add_fields
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: None,
            interface_names: Vec::new(),
        }
    }

    /// Sets the `description` of this [`ObjectMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the names of the `interfaces` this [`ObjectMeta`] type implements.
    ///
    /// Overwrites any previously set list of interfaces.
    #[must_use]
    pub fn interfaces(mut self, interfaces: &[&str]) -> Self {
        self.interface_names = interfaces.iter().map(|&n| n.into()).collect();
        self
    }

    /// Wraps this [`ObjectMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Object(self)
    }
}

impl InterfaceMeta {
    /// Builds a new [`InterfaceMeta`] type with the specified `name`.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: None,
        }
    }

    /// Sets the `description` of this [`InterfaceMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Wraps this [`InterfaceMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Interface(self)
    }
}

impl UnionMeta {
    /// Builds a new [`UnionMeta`] type with the specified `name` and possible
    /// type names.
    pub fn new(name: impl Into<ArcStr>, of_types: &[&str]) -> Self {
        Self {
            name: name.into(),
            description: None,
            of_type_names: of_types.iter().map(|&n| n.into()).collect(),
        }
    }

    /// Sets the `description` of this [`UnionMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Wraps this [`UnionMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Union(self)
    }
}

impl EnumMeta {
    /// Builds a new [`EnumMeta`] type with the specified `name`.
    ///
    /// Values are attached later with [`Registry::add_enum_values`].
    ///
    /// [`Registry::add_enum_values`]: super::model::Registry::add_enum_values
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            values: None,
        }
    }

    /// Sets the `description` of this [`EnumMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Wraps this [`EnumMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Enum(self)
    }
}

impl InputObjectMeta {
    /// Builds a new [`InputObjectMeta`] type with the specified `name` and
    /// `input_fields`.
    pub fn new(name: impl Into<ArcStr>, input_fields: Vec<Argument>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_fields,
        }
    }

    /// Sets the `description` of this [`InputObjectMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Wraps this [`InputObjectMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::InputObject(self)
    }
}

impl Field {
    /// Builds a new [`Field`] of the given type node.
    pub fn new(name: impl Into<ArcStr>, field_type: TypeId) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: Vec::new(),
            field_type,
            deprecation_status: DeprecationStatus::Current,
        }
    }

    /// Set the `description` of this [`Field`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an `argument` to this [`Field`].
    #[must_use]
    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Sets this [`Field`] as deprecated with an optional `reason`.
    ///
    /// Overwrites any previously set deprecation reason.
    #[must_use]
    pub fn deprecated(mut self, reason: Option<&str>) -> Self {
        self.deprecation_status = DeprecationStatus::Deprecated(reason.map(Into::into));
        self
    }
}

impl Argument {
    /// Builds a new [`Argument`] of the given type node.
    pub fn new(name: impl Into<ArcStr>, arg_type: TypeId) -> Self {
        Self {
            name: name.into(),
            description: None,
            arg_type,
            default_value: None,
        }
    }

    /// Sets the `description` of this [`Argument`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the default value of this [`Argument`], in GraphQL literal syntax.
    ///
    /// The literal is validated when the argument is registered.
    #[must_use]
    pub fn default_value(mut self, literal: impl Into<ArcStr>) -> Self {
        self.default_value = Some(literal.into());
        self
    }
}

impl EnumValue {
    /// Constructs a new [`EnumValue`] with the provided `name`.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            deprecation_status: DeprecationStatus::Current,
        }
    }

    /// Sets the `description` of this [`EnumValue`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets this [`EnumValue`] as deprecated with an optional `reason`.
    ///
    /// Overwrites any previously set deprecation reason.
    #[must_use]
    pub fn deprecated(mut self, reason: Option<&str>) -> Self {
        self.deprecation_status = DeprecationStatus::Deprecated(reason.map(Into::into));
        self
    }
}

impl DirectiveType {
    /// Builds a new [`DirectiveType`] valid at the given `locations`.
    pub fn new(name: impl Into<ArcStr>, locations: &[DirectiveLocation]) -> Self {
        Self {
            name: name.into(),
            description: None,
            locations: locations.to_vec(),
            arguments: Vec::new(),
        }
    }

    /// Sets the `description` of this [`DirectiveType`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an `argument` to this [`DirectiveType`].
    #[must_use]
    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }
}
