//! Declarative macros exported at the crate root.

#[macro_use]
mod graphql_value;
#[macro_use]
mod enums;
