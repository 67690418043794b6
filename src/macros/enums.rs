/**
Expose simple enums

GraphQL enums are similar to enum classes: grouped constants with type safety
rather than data-carrying variants. This macro exports a fieldless Rust enum
under the given GraphQL name:

```rust
# use graphql_introspection::graphql_enum;
#[derive(Clone, Copy, Debug, PartialEq)]
enum Color {
    Red,
    Green,
    Blue,
}

graphql_enum!(Color as "Color" {
    Color::Red => "RED",
    Color::Green => "GREEN",
    Color::Blue => "BLUE",
});
```

The macro expands to a `match` statement which will result in a compilation
error if not all enum variants are covered. It implements [`GraphQLEnum`] with
the values in the listed order, along with `Display` and the conversions making
the enum usable as the leaf of a modified type.

[`GraphQLEnum`]: crate::types::GraphQLEnum
*/
#[macro_export]
macro_rules! graphql_enum {
    ( @as_expr, $e:expr) => { $e };
    ( @as_pattern, $p:pat) => { $p };

    ( $name:path as $outname:literal { $($eval:path => $ename:literal),+ $(,)? }) => {
        impl $crate::types::GraphQLEnum for $name {
            const NAME: &'static str = $outname;
            const NAMES: &'static [&'static str] = &[$( $ename ),+];
            const VALUES: &'static [Self] = &[$( $crate::graphql_enum!(@as_expr, $eval) ),+];

            fn name(&self) -> &'static str {
                match self {
                    $( &$crate::graphql_enum!(@as_pattern, $eval) => $ename, )+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::types::GraphQLEnum::name(self))
            }
        }

        $crate::modified_leaf!($name);
    };
}
