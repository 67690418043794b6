//! Dynamically typed values crossing the wire boundary.

mod object;

use std::fmt;

use derive_more::with_trait::Display;
use itertools::Itertools as _;

pub use self::object::Object;

/// Serializable value returned from and passed into field resolution.
///
/// This is the shape every argument map, argument value and field result
/// takes before the typed conversion layer in [`crate::types`] sees it.
#[derive(Clone, Debug, PartialEq)]
#[expect(missing_docs, reason = "self-explanatory")]
pub enum Value {
    Null,
    Boolean(bool),
    Int(i32),
    Float(f64),
    String(String),
    Enum(String),
    List(Vec<Value>),
    Object(Object),
}

/// Variant tag of a [`Value`], used in conversion error messages.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[expect(missing_docs, reason = "self-explanatory")]
pub enum ValueKind {
    #[display("null")]
    Null,
    #[display("Boolean")]
    Boolean,
    #[display("Int")]
    Int,
    #[display("Float")]
    Float,
    #[display("String")]
    String,
    #[display("enum")]
    Enum,
    #[display("list")]
    List,
    #[display("object")]
    Object,
}

impl Value {
    // CONSTRUCTORS

    /// Construct a null value.
    pub fn null() -> Self {
        Self::Null
    }

    /// Construct a string value.
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// Construct an enum value.
    pub fn enum_value(s: impl Into<String>) -> Self {
        Self::Enum(s.into())
    }

    /// Construct a list value.
    pub fn list(l: Vec<Self>) -> Self {
        Self::List(l)
    }

    /// Construct an object value.
    pub fn object(o: Object) -> Self {
        Self::Object(o)
    }

    // DISCRIMINATORS

    /// Returns the [`ValueKind`] of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Enum(_) => ValueKind::Enum,
            Self::List(_) => ValueKind::List,
            Self::Object(_) => ValueKind::Object,
        }
    }

    /// Does this value represent null?
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// View the underlying boolean value, if present.
    pub fn as_bool_value(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// View the underlying int value, if present.
    pub fn as_int_value(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// View the underlying float value, if present.
    pub fn as_float_value(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// View the underlying string value, if present.
    pub fn as_string_value(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// View the underlying enum name, if present.
    pub fn as_enum_value(&self) -> Option<&str> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// View the underlying text of either an enum or a string value.
    ///
    /// Enum arguments commonly arrive as plain strings through JSON variables.
    pub fn as_maybe_enum(&self) -> Option<&str> {
        self.as_enum_value().or_else(|| self.as_string_value())
    }

    /// View the underlying list, if present.
    pub fn as_list_value(&self) -> Option<&[Self]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// View the underlying object, if present.
    pub fn as_object_value(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Formats this value in GraphQL literal syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::String(s) => write_escaped(f, s),
            Self::Enum(e) => f.write_str(e),
            Self::List(l) => write!(f, "[{}]", l.iter().format(", ")),
            Self::Object(o) => write!(
                f,
                "{{{}}}",
                o.iter()
                    .format_with(", ", |(k, v), f| f(&format_args!("{k}: {v}"))),
            ),
        }
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04X}", u32::from(c))?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{Value, ValueKind};

    #[test]
    fn display_uses_literal_syntax() {
        let v = graphql_value!({
            "int": 1,
            "float": 1.5,
            "whole": 2.0,
            "text": "a \"quoted\"\nline",
            "list": [true, null],
        });

        assert_eq!(
            v.to_string(),
            r#"{int: 1, float: 1.5, whole: 2.0, text: "a \"quoted\"\nline", list: [true, null]}"#,
        );
        assert_eq!(Value::enum_value("NON_NULL").to_string(), "NON_NULL");
    }

    #[test]
    fn maybe_enum_accepts_strings() {
        assert_eq!(Value::enum_value("LIST").as_maybe_enum(), Some("LIST"));
        assert_eq!(Value::string("LIST").as_maybe_enum(), Some("LIST"));
        assert_eq!(Value::from(1).as_maybe_enum(), None);
    }

    #[test]
    fn reports_kind() {
        assert_eq!(Value::null().kind(), ValueKind::Null);
        assert_eq!(graphql_value!([1]).kind(), ValueKind::List);
        assert_eq!(ValueKind::Boolean.to_string(), "Boolean");
    }
}
