//! Resolve command implementation.
//!
//! The `larder resolve` command prints the effective environment.

use crate::cli::args::{EnvironmentArgs, RenderFormat, ResolveArgs};
use crate::config::Settings;
use crate::environment::EnvironmentResolver;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Build a resolver from settings, with command-line flags taking precedence.
pub(crate) fn resolver_for(settings: &Settings, args: &EnvironmentArgs) -> EnvironmentResolver {
    let mut resolver = EnvironmentResolver::from_settings(settings);
    if let Some(max_depth) = args.max_depth {
        resolver = resolver.with_max_depth(max_depth);
    }
    if let Some(dir) = &args.parent_env_dir {
        resolver = resolver.with_parent_env_dir(dir);
    }
    resolver
}

/// The resolve command implementation.
pub struct ResolveCommand {
    resolver: EnvironmentResolver,
    args: ResolveArgs,
}

impl ResolveCommand {
    /// Create a new resolve command.
    pub fn new(settings: &Settings, args: ResolveArgs) -> Self {
        Self {
            resolver: resolver_for(settings, &args.environment),
            args,
        }
    }

    /// Get the resolver this command uses.
    pub fn resolver(&self) -> &EnvironmentResolver {
        &self.resolver
    }
}

impl Command for ResolveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let environment = self.resolver.resolve(&self.args.environment.env_file)?;

        let rendered = match self.args.format {
            RenderFormat::Json => environment.to_json_pretty()?,
            RenderFormat::Yaml => environment.to_yaml()?,
        };
        ui.message(rendered.trim_end());

        Ok(CommandResult::success())
    }
}
