use crate::executor::{FieldError, FieldResult};

use super::modifier::{FromModified, IntoModified, Modified};

impl<T, U> IntoModified<T> for Option<U>
where
    U: IntoModified<T>,
{
    fn into_modified(self) -> Modified<T> {
        match self {
            Some(v) => v.into_modified(),
            None => Modified::Null,
        }
    }
}

impl<T, U> FromModified<T> for Option<U>
where
    U: FromModified<T>,
{
    fn from_modified(modified: Modified<T>) -> FieldResult<Self> {
        match modified {
            Modified::Null => Ok(None),
            m => U::from_modified(m).map(Some),
        }
    }
}

impl<T, U> IntoModified<T> for Vec<U>
where
    U: IntoModified<T>,
{
    fn into_modified(self) -> Modified<T> {
        Modified::List(self.into_iter().map(IntoModified::into_modified).collect())
    }
}

impl<T, U> FromModified<T> for Vec<U>
where
    U: FromModified<T>,
{
    fn from_modified(modified: Modified<T>) -> FieldResult<Self> {
        match modified {
            Modified::List(items) => items.into_iter().map(U::from_modified).collect(),
            Modified::Null => Err(FieldError::UnexpectedNull),
            Modified::Value(_) => Err(FieldError::ShapeMismatch {
                expected: "list",
                found: "single value",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        FieldError,
        types::{FromModified as _, IntoModified, Modified},
    };

    #[test]
    fn option_and_vec_map_onto_layers() {
        let native = Some(vec![Some(1), None]);

        assert_eq!(
            native.clone().into_modified(),
            Modified::List(vec![Modified::Value(1), Modified::Null]),
        );
        assert_eq!(
            Option::<Vec<Option<i32>>>::from_modified(native.into_modified()),
            Ok(Some(vec![Some(1), None])),
        );
        assert_eq!(
            IntoModified::<i32>::into_modified(Option::<i32>::None),
            Modified::Null,
        );
    }

    #[test]
    fn null_needs_an_option() {
        assert_eq!(
            Vec::<i32>::from_modified(Modified::List(vec![Modified::Null])),
            Err(FieldError::UnexpectedNull),
        );
    }
}
