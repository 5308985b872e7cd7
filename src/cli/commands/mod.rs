//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`], which carries the merged settings.

pub mod completions;
pub mod cookbooks;
pub mod dispatcher;
pub mod resolve;
pub mod verify;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
