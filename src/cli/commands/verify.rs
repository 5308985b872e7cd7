//! Verify command implementation.
//!
//! The `larder verify` command checks an installed cookbook tree.

use crate::cli::args::VerifyArgs;
use crate::error::Result;
use crate::ui::UserInterface;
use crate::verify::DependencyVerifier;

use super::dispatcher::{Command, CommandResult};

/// The verify command implementation.
pub struct VerifyCommand {
    args: VerifyArgs,
}

impl VerifyCommand {
    /// Create a new verify command.
    pub fn new(args: VerifyArgs) -> Self {
        Self { args }
    }
}

impl Command for VerifyCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let dir = &self.args.cookbooks_dir;
        ui.show_header(&format!("Verifying cookbooks in {}", dir.display()));

        let outcome = DependencyVerifier::new().verify_installed(dir)?;

        for mismatch in &outcome.mismatches {
            ui.warning(&mismatch.to_string());
        }

        if outcome.is_success() {
            ui.success(&format!(
                "{} cookbooks verified, all dependencies satisfied",
                outcome.cookbooks
            ));
            return Ok(CommandResult::success());
        }

        for violation in outcome.report.iter() {
            ui.error(&violation.to_string());
        }
        ui.show_hint(&format!(
            "{} of {} cookbooks have unmet dependencies",
            outcome.report.len(),
            outcome.cookbooks
        ));

        Ok(CommandResult::failure(1))
    }
}
