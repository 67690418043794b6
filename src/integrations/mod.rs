//! Integrations with external crates.

pub mod serde;
