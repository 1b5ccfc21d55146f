//! Categories command implementation.
//!
//! The `permis categories` command lists the effective rule table.

use serde::Serialize;

use crate::cli::args::CategoriesArgs;
use crate::error::{PermisError, Result};
use crate::license::{join_categories, LicenseCategory};
use crate::rules::{CategoryRule, RuleSet};
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult, RuleSource};

/// The categories command implementation.
pub struct CategoriesCommand {
    source: RuleSource,
    args: CategoriesArgs,
}

/// One row of the JSON listing.
#[derive(Debug, Serialize)]
struct CategoryListing<'a> {
    category: &'a LicenseCategory,
    description: &'a str,
    prerequisites: &'a [LicenseCategory],
    requires_learners_permit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    learners_code: Option<&'a LicenseCategory>,
    authorized: Vec<&'a LicenseCategory>,
}

impl CategoriesCommand {
    pub fn new(source: RuleSource, args: CategoriesArgs) -> Self {
        Self { source, args }
    }

    fn listing<'a>(rules: &'a RuleSet, rule: &'a CategoryRule) -> CategoryListing<'a> {
        CategoryListing {
            category: &rule.category,
            description: &rule.description,
            prerequisites: &rule.prerequisites,
            requires_learners_permit: rule.requires_learners_permit,
            learners_code: rules.learners_code_for(&rule.category),
            authorized: rules
                .authorized_categories(&rule.category)
                .map(|set| set.iter().collect())
                .unwrap_or_default(),
        }
    }
}

impl Command for CategoriesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match self.source.load(ui)? {
            Ok(config) => config,
            Err(result) => return Ok(result),
        };
        let rules = match RuleSet::from_config(&config) {
            Ok(rules) => rules,
            Err(e @ PermisError::ConfigValidationError { .. }) => {
                ui.error(&e.to_string());
                ui.show_hint("Run 'permis check' for details.");
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        if self.args.json {
            let listing: Vec<CategoryListing> = rules
                .categories()
                .chain(rules.learners_rules())
                .map(|rule| Self::listing(&rules, rule))
                .collect();
            let json = serde_json::to_string_pretty(&listing).map_err(|e| PermisError::Other(e.into()))?;
            ui.data(&json);
            return Ok(CommandResult::success());
        }

        ui.show_header("License categories");

        let mut table = Table::new(&["Category", "Prerequisites", "Learner's permit", "Also authorizes"]);
        for rule in rules.categories() {
            let listing = Self::listing(&rules, rule);
            table.add_row(vec![
                rule.category.to_string(),
                or_dash(join_categories(listing.prerequisites)),
                listing
                    .learners_code
                    .filter(|_| listing.requires_learners_permit)
                    .map(|code| code.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                or_dash(join_categories(listing.authorized)),
            ]);
        }
        ui.message(&table.render());

        for rule in rules.categories().chain(rules.learners_rules()) {
            if !rule.description.is_empty() {
                ui.detail(&format!("  {}: {}", rule.category, rule.description));
            }
        }

        let codes: Vec<&LicenseCategory> = rules.learners_rules().map(|rule| &rule.category).collect();
        ui.message(&format!("  Learner's permit codes: {}", or_dash(join_categories(codes))));

        Ok(CommandResult::success())
    }
}

fn or_dash(text: String) -> String {
    if text.is_empty() {
        "-".to_string()
    } else {
        text
    }
}
