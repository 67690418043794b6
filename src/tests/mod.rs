//! Library tests and fixtures

mod schema;
