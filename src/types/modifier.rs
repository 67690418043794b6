use derive_more::with_trait::Display;

use crate::executor::FieldResult;

/// Single layer of a type's modifier stack.
///
/// A stack is read outermost first: `[Nullable, List]` describes a nullable
/// list of non-null leaves, while an empty stack describes a non-null leaf.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum TypeModifier {
    /// No wrapping at this layer.
    None,
    /// The value at this layer may be null.
    Nullable,
    /// The value at this layer is a list of the rest of the stack.
    List,
}

/// Value of a modified type, mirroring the shape of its modifier stack.
#[derive(Clone, Debug, PartialEq)]
pub enum Modified<T> {
    /// Leaf value.
    Value(T),
    /// Null at a nullable layer.
    Null,
    /// List layer.
    List(Vec<Modified<T>>),
}

impl<T> Modified<T> {
    /// Applies `f` to every leaf, keeping the shape intact.
    pub fn map<U>(self, f: &mut impl FnMut(T) -> U) -> Modified<U> {
        match self {
            Self::Value(v) => Modified::Value(f(v)),
            Self::Null => Modified::Null,
            Self::List(items) => Modified::List(items.into_iter().map(|m| m.map(f)).collect()),
        }
    }

    /// Returns `true` if this is [`Modified::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Conversion of a native result into the shape-tagged [`Modified`] tree.
///
/// `Option` maps onto a nullable layer, `Vec` onto a list layer, and leaf
/// types implement it through [`modified_leaf!`](crate::modified_leaf).
pub trait IntoModified<T> {
    /// Performs the conversion.
    fn into_modified(self) -> Modified<T>;
}

/// Conversion of a shape-tagged [`Modified`] tree into a native value.
///
/// Fails when the tree shape doesn't fit the native type, for example a
/// [`Modified::Null`] reaching a non-`Option` position.
pub trait FromModified<T>: Sized {
    /// Performs the conversion.
    fn from_modified(modified: Modified<T>) -> FieldResult<Self>;
}

impl<T> IntoModified<T> for Modified<T> {
    fn into_modified(self) -> Modified<T> {
        self
    }
}

impl<T> FromModified<T> for Modified<T> {
    fn from_modified(modified: Modified<T>) -> FieldResult<Self> {
        Ok(modified)
    }
}

/// Implements [`IntoModified`] and [`FromModified`] for leaf types, which
/// convert into and from [`Modified::Value`] only.
///
/// [`IntoModified`]: crate::types::IntoModified
/// [`FromModified`]: crate::types::FromModified
/// [`Modified::Value`]: crate::types::Modified::Value
#[macro_export]
macro_rules! modified_leaf {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::types::IntoModified<$ty> for $ty {
            fn into_modified(self) -> $crate::types::Modified<$ty> {
                $crate::types::Modified::Value(self)
            }
        }

        impl $crate::types::FromModified<$ty> for $ty {
            fn from_modified(
                modified: $crate::types::Modified<$ty>,
            ) -> $crate::FieldResult<Self> {
                match modified {
                    $crate::types::Modified::Value(v) => Ok(v),
                    $crate::types::Modified::Null => Err($crate::FieldError::UnexpectedNull),
                    $crate::types::Modified::List(_) => Err($crate::FieldError::ShapeMismatch {
                        expected: "single value",
                        found: "list",
                    }),
                }
            }
        }
    )+};
}
