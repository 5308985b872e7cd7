//! Cookbooks command implementation.
//!
//! The `larder cookbooks` command lists the cookbooks an environment pins.

use crate::cli::args::CookbooksArgs;
use crate::config::Settings;
use crate::environment::EnvironmentResolver;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::resolve::resolver_for;

/// The cookbooks command implementation.
pub struct CookbooksCommand {
    resolver: EnvironmentResolver,
    args: CookbooksArgs,
}

impl CookbooksCommand {
    /// Create a new cookbooks command.
    pub fn new(settings: &Settings, args: CookbooksArgs) -> Self {
        Self {
            resolver: resolver_for(settings, &args.environment),
            args,
        }
    }
}

impl Command for CookbooksCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let env_file = &self.args.environment.env_file;
        let environment = self.resolver.resolve(env_file)?;

        let title = environment
            .name
            .clone()
            .unwrap_or_else(|| env_file.display().to_string());
        ui.show_header(&format!("Cookbooks in {}", title));

        let cookbooks = environment.cookbooks();
        if cookbooks.is_empty() {
            ui.message("No cookbooks pinned");
            return Ok(CommandResult::success());
        }

        for entry in &cookbooks {
            let value = match &entry.location {
                Some(location) => format!("{} ({})", entry.version_specifier, location.describe()),
                None => entry.version_specifier.clone(),
            };
            ui.show_field(&entry.name, &value);

            if let Err(e) = entry.constraint() {
                ui.warning(&format!("{}: {}", entry.name, e));
            }
        }

        Ok(CommandResult::success())
    }
}
