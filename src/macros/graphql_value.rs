//! [`graphql_value!`] macro implementation.
//!
//! [`graphql_value!`]: graphql_value

/// Constructs [`Value`]s via JSON-like syntax.
///
/// Any other expression is converted with [`Value::from`], so enums are
/// written as `(Value::enum_value("LIST"))`.
///
/// ```rust
/// # use graphql_introspection::{graphql_value, Value};
/// #
/// let value: Value = graphql_value!({
///     "name": "__Type",
///     "kind": (Value::enum_value("OBJECT")),
///     "fields": [{"name": "kind"}, {"name": "name"}],
///     "ofType": null,
/// });
/// ```
///
/// [`Value`]: crate::Value
/// [`Value::from`]: crate::Value#impl-From<bool>-for-Value
#[macro_export]
macro_rules! graphql_value {
    ///////////
    // Array //
    ///////////

    (@array [$($elems:expr,)*]) => {
        $crate::Value::list(vec![$( $elems, )*])
    };

    (@array [$($elems:expr),*]) => {
        $crate::Value::list(vec![$( $elems, )*])
    };

    (@array [$($elems:expr,)*] null $($rest:tt)*) => {
        $crate::graphql_value!(@array [$($elems,)* $crate::Value::null()] $($rest)*)
    };

    (@array [$($elems:expr,)*] [$($array:tt)*] $($rest:tt)*) => {
        $crate::graphql_value!(
            @array [$($elems,)* $crate::graphql_value!([$($array)*])] $($rest)*
        )
    };

    (@array [$($elems:expr,)*] {$($map:tt)*} $($rest:tt)*) => {
        $crate::graphql_value!(
            @array [$($elems,)* $crate::graphql_value!({$($map)*})] $($rest)*
        )
    };

    (@array [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        $crate::graphql_value!(
            @array [$($elems,)* $crate::graphql_value!($next),] $($rest)*
        )
    };

    (@array [$($elems:expr,)*] $last:expr) => {
        $crate::graphql_value!(@array [$($elems,)* $crate::graphql_value!($last)])
    };

    (@array [$($elems:expr),*] , $($rest:tt)*) => {
        $crate::graphql_value!(@array [$($elems,)*] $($rest)*)
    };

    ////////////
    // Object //
    ////////////

    (@object $object:ident ()) => {};

    (@object $object:ident ($key:literal : null $(, $($rest:tt)*)?)) => {
        $object.add_field($key, $crate::Value::null());
        $crate::graphql_value!(@object $object ($($($rest)*)?));
    };

    (@object $object:ident ($key:literal : [$($array:tt)*] $(, $($rest:tt)*)?)) => {
        $object.add_field($key, $crate::graphql_value!([$($array)*]));
        $crate::graphql_value!(@object $object ($($($rest)*)?));
    };

    (@object $object:ident ($key:literal : {$($map:tt)*} $(, $($rest:tt)*)?)) => {
        $object.add_field($key, $crate::graphql_value!({$($map)*}));
        $crate::graphql_value!(@object $object ($($($rest)*)?));
    };

    (@object $object:ident ($key:literal : $value:expr $(, $($rest:tt)*)?)) => {
        $object.add_field($key, $crate::graphql_value!($value));
        $crate::graphql_value!(@object $object ($($($rest)*)?));
    };

    //////////////
    // Defaults //
    //////////////

    ([ $($arr:tt)* ]$(,)?) => {
        $crate::graphql_value!(@array [] $($arr)*)
    };

    ({}$(,)?) => {
        $crate::Value::object($crate::Object::new())
    };

    ({ $($map:tt)+ }$(,)?) => {
        $crate::Value::object({
            let mut object = $crate::Object::new();
            $crate::graphql_value!(@object object ($($map)*));
            object
        })
    };

    (null$(,)?) => ($crate::Value::null());

    ($e:expr$(,)?) => ($crate::Value::from($e));
}

#[cfg(test)]
mod tests {
    use crate::{Object, Value};

    #[test]
    fn builds_nested_values() {
        let mut inner = Object::new();
        inner.add_field("name", Value::string("kind"));

        let mut expected = Object::new();
        expected.add_field("a", Value::null());
        expected.add_field(
            "b",
            Value::list(vec![Value::from(1), Value::object(inner), Value::null()]),
        );
        expected.add_field("c", Value::enum_value("LIST"));

        assert_eq!(
            graphql_value!({
                "a": null,
                "b": [1, {"name": "kind"}, null],
                "c": (Value::enum_value("LIST")),
            }),
            Value::object(expected),
        );
    }

    #[test]
    fn builds_scalars_and_empty_containers() {
        assert_eq!(graphql_value!(null), Value::Null);
        assert_eq!(graphql_value!(true), Value::Boolean(true));
        assert_eq!(graphql_value!("s"), Value::string("s"));
        assert_eq!(graphql_value!([]), Value::list(vec![]));
        assert_eq!(graphql_value!({}), Value::object(Object::new()));
    }
}
