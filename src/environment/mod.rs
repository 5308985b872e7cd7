//! Layered environment descriptions.
//!
//! An environment pins cookbooks to version specifiers and may override where
//! each cookbook is fetched from. Environments can inherit from a `parent`
//! environment; [`EnvironmentResolver`] walks that chain and merges the layers
//! into a single [`EnvironmentDescription`].

pub mod description;
pub mod resolver;

pub use description::{CookbookEntry, CookbookLocation, EnvironmentDescription};
pub use resolver::{EnvironmentResolver, DEFAULT_MAX_DEPTH};
