//! Parsing of constant GraphQL value literals.
//!
//! Declared argument defaults are kept in their source form (e.g. `false`)
//! and turned into a [`Value`](crate::Value) with [`parse_value_literal`].

mod value;

pub use self::value::{ParseError, parse_value_literal};
