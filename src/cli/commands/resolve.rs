//! Resolve command implementation.
//!
//! The `permis resolve` command reads an application from a file, runs the
//! prerequisite resolver, and prints the resulting verification data.

use std::fs;
use std::path::Path;

use crate::cli::args::ResolveArgs;
use crate::error::{PermisError, Result};
use crate::license::join_categories;
use crate::resolver::{MissingReason, PrerequisiteResolver, ResolveRequest};
use crate::rules::RuleSet;
use crate::ui::UserInterface;
use crate::verification::LicenseVerificationData;

use super::dispatcher::{Command, CommandResult, RuleSource, EXIT_NOT_FOUND};
use super::display::license_table;

/// The resolve command implementation.
pub struct ResolveCommand {
    source: RuleSource,
    args: ResolveArgs,
}

/// Read a request file, choosing the format by extension.
pub fn read_request(path: &Path) -> Result<ResolveRequest> {
    let content = fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));

    let parsed = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| PermisError::InputError {
        path: path.to_path_buf(),
        message,
    })
}

impl ResolveCommand {
    pub fn new(source: RuleSource, args: ResolveArgs) -> Self {
        Self { source, args }
    }

    fn request(&self, ui: &mut dyn UserInterface) -> Result<std::result::Result<ResolveRequest, CommandResult>> {
        let mut request = match read_request(&self.args.input) {
            Ok(request) => request,
            Err(PermisError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                ui.error(&format!("Input not found: {}", self.args.input.display()));
                return Ok(Err(CommandResult::failure(EXIT_NOT_FOUND)));
            }
            Err(e @ PermisError::InputError { .. }) => {
                ui.error(&e.to_string());
                return Ok(Err(CommandResult::failure(1)));
            }
            Err(e) => return Err(e),
        };

        if let Some(target) = &self.args.target {
            request.target_category = Some(target.clone());
        }
        if let Some(application_type) = self.args.application_type {
            request.application_type = application_type;
        }
        if let Some(as_of) = self.args.as_of {
            request.as_of = Some(as_of);
        }

        Ok(Ok(request))
    }

    fn show(&self, ui: &mut dyn UserInterface, request: &ResolveRequest, data: &LicenseVerificationData) {
        let title = match &request.target_category {
            Some(target) => format!("{} · category {}", request.application_type, target),
            None => request.application_type.to_string(),
        };
        let theme = ui.theme().clone();
        ui.show_header(&title);

        let records = data.records();
        if !records.is_empty() {
            ui.message(&format!("  {}", theme.key.apply_to("Licenses:")));
            ui.message(&license_table(&records, &theme).render());

            for license in &data.external_licenses {
                if let Some(notes) = &license.verification_notes {
                    ui.detail(&format!("  {}: {}", license.id, notes));
                }
            }
        }

        let held = if data.all_license_categories.is_empty() {
            "none".to_string()
        } else {
            join_categories(&data.all_license_categories)
        };
        ui.message(&format!("  {} {}", theme.key.apply_to("Authorized categories:"), held));
    }
}

impl Command for ResolveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let request = match self.request(ui)? {
            Ok(request) => request,
            Err(result) => return Ok(result),
        };

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

        let resolver = PrerequisiteResolver::new(&rules);
        let missing = resolver.missing_prerequisites(&request);
        let external = resolver.resolve(&request);

        for stale in request
            .external_licenses
            .iter()
            .filter(|row| row.is_auto_populated && !external.iter().any(|kept| kept.id == row.id))
        {
            ui.detail(&format!("Dropped placeholder {} (no longer required)", stale.id));
        }

        let data = LicenseVerificationData::new(request.system_licenses.clone(), external);

        if self.args.json {
            ui.data(&data.to_json()?);
            return Ok(CommandResult::success());
        }

        self.show(ui, &request, &data);

        if missing.is_empty() {
            ui.success("No missing prerequisites");
        } else {
            for gap in &missing {
                let what = match gap.reason {
                    MissingReason::LearnersPermit => format!("learner's permit {}", gap.category),
                    MissingReason::Prerequisite => format!("category {}", gap.category),
                };
                ui.warning(&format!("Category {} requires {}", gap.required_for, what));
            }
        }
        if data.requires_verification {
            ui.show_hint("Verify the unverified licenses before submitting.");
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MockUI, OutputMode};
    use tempfile::TempDir;

    fn args(input: &Path) -> ResolveArgs {
        ResolveArgs {
            input: input.to_path_buf(),
            target: None,
            application_type: None,
            as_of: None,
            json: false,
        }
    }

    fn write(temp: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = temp.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn read_request_by_extension() {
        let temp = TempDir::new().unwrap();
        let yaml = write(&temp, "req.yaml", "target_category: BE\n");
        let json = write(&temp, "req.json", r#"{"target_category": "BE"}"#);

        assert_eq!(read_request(&yaml).unwrap(), read_request(&json).unwrap());
    }

    #[test]
    fn read_request_reports_parse_errors() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "req.json", r#"{"target_category": ""}"#);

        let err = read_request(&path).unwrap_err();
        assert!(matches!(err, PermisError::InputError { .. }));
    }

    #[test]
    fn missing_input_exits_not_found() {
        let temp = TempDir::new().unwrap();
        let cmd = ResolveCommand::new(RuleSource::new(temp.path(), None), args(&temp.path().join("none.json")));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, EXIT_NOT_FOUND);
        assert!(ui.has_error("Input not found"));
    }

    #[test]
    fn reports_missing_learners_permit() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "req.json", r#"{"target_category": "B"}"#);
        let cmd = ResolveCommand::new(RuleSource::new(temp.path(), None), args(&path));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_warning("Category B requires learner's permit 2"));
        assert!(ui.has_message("auto-b-2"));
        assert!(ui.has_hint("Verify"));
    }

    #[test]
    fn target_override_wins() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "req.json", r#"{"target_category": "B"}"#);
        let mut resolve_args = args(&path);
        resolve_args.target = Some(crate::license::LicenseCategory::new("BE").unwrap());
        let cmd = ResolveCommand::new(RuleSource::new(temp.path(), None), resolve_args);
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_warning("Category BE requires category B"));
    }

    #[test]
    fn json_output_is_verification_data() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "req.json",
            r#"{
                "target_category": "BE",
                "system_licenses": [
                    {"license_number": "MG-1", "license_type": "DRIVING_LICENSE", "categories": ["C"]}
                ]
            }"#,
        );
        let mut resolve_args = args(&path);
        resolve_args.json = true;
        let cmd = ResolveCommand::new(RuleSource::new(temp.path(), None), resolve_args);
        let mut ui = MockUI::with_mode(OutputMode::Silent);

        cmd.execute(&mut ui).unwrap();

        let data: LicenseVerificationData = serde_json::from_str(&ui.data_output()).unwrap();
        assert!(data.external_licenses.is_empty());
        assert_eq!(data.all_license_categories.len(), 1);
        assert_eq!(data.all_license_categories[0].as_str(), "C");
    }

    #[test]
    fn human_output_lists_system_and_external_records() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "req.json",
            r#"{
                "target_category": "CE",
                "system_licenses": [
                    {"license_number": "MG-1", "license_type": "DRIVING_LICENSE", "categories": ["B"]}
                ]
            }"#,
        );
        let cmd = ResolveCommand::new(RuleSource::new(temp.path(), None), args(&path));
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let table = ui.messages().iter().find(|m| m.contains("MG-1")).cloned().unwrap();
        assert!(table.contains("on file"));
        assert!(table.contains("auto-ce-c"));
    }

    #[test]
    fn invalid_rules_fail_with_hint() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "req.json", r#"{"target_category": "B"}"#);
        let rules = write(&temp, "rules.yml", "categories:\n  B:\n    prerequisites: [Q]\n");
        let cmd = ResolveCommand::new(RuleSource::new(temp.path(), Some(rules)), args(&path));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Invalid configuration"));
        assert!(ui.has_hint("permis check"));
    }
}
