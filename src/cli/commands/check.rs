//! Check command implementation.
//!
//! The `permis check` command validates the effective rule table and
//! reports every issue found, not just the first.

use crate::cli::args::CheckArgs;
use crate::config::ConfigPaths;
use crate::error::Result;
use crate::rules::{validate_rules, Severity};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, RuleSource};

/// The check command implementation.
pub struct CheckCommand {
    source: RuleSource,
    args: CheckArgs,
}

impl CheckCommand {
    pub fn new(source: RuleSource, args: CheckArgs) -> Self {
        Self { source, args }
    }

    fn describe_sources(&self, ui: &mut dyn UserInterface) {
        match &self.source.config_override {
            Some(path) => ui.detail(&format!("Rule overrides: {}", path.display())),
            None => {
                let paths = ConfigPaths::discover(&self.source.project_root);
                if !paths.has_project_config() {
                    ui.detail("Using the built-in rule table");
                }
                for path in paths.all_existing() {
                    ui.detail(&format!("Rule overrides: {}", path.display()));
                }
            }
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match self.source.load(ui)? {
            Ok(config) => config,
            Err(result) => return Ok(result),
        };
        self.describe_sources(ui);

        let issues = validate_rules(&config);
        let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
        let warnings = issues.len() - errors;

        for issue in &issues {
            let line = format!("{} [{}]: {}", issue.severity.label(), issue.check, issue.message);
            match issue.severity {
                Severity::Error => ui.error(&line),
                Severity::Warning => ui.warning(&line),
            }
        }

        if issues.is_empty() {
            ui.success(&format!(
                "Rule table is valid ({} categories, {} learner's codes)",
                config.categories.len(),
                config.learners_permits.len()
            ));
            return Ok(CommandResult::success());
        }

        ui.message(&format!("{} error(s), {} warning(s)", errors, warnings));

        if errors > 0 || (self.args.strict && warnings > 0) {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
