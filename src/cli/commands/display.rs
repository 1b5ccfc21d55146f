//! Shared rendering for license listings.

use chrono::NaiveDate;

use crate::license::{join_categories, License, LicenseRecord};
use crate::ui::{PermisTheme, Table};

fn date_cell(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

fn text_cell(text: &str) -> String {
    if text.is_empty() {
        "-".to_string()
    } else {
        text.to_string()
    }
}

/// One table over system and external records, in the order given.
pub fn license_table(records: &[License], theme: &PermisTheme) -> Table {
    let mut table = Table::new(&[
        "Source",
        "Number",
        "Type",
        "Categories",
        "Status",
        "Expires",
        "Verification",
        "Required for",
    ]);
    for record in records {
        let (source, verification, required_for) = match record {
            License::System(_) => ("system", theme.dim.apply_to("on file").to_string(), None),
            License::External(ext) => (
                "external",
                theme.format_verified(record.is_trusted()),
                ext.required_for_category
                    .as_ref()
                    .filter(|_| ext.is_auto_populated),
            ),
        };
        table.add_row(vec![
            source.to_string(),
            text_cell(record.display_id()),
            record.license_type().label().to_string(),
            join_categories(record.categories()),
            theme.format_status(record.status()),
            date_cell(record.expiry_date()),
            verification,
            required_for
                .map(|target| target.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license::{ExternalLicense, LicenseCategory, LicenseStatus, LicenseType, SystemLicense};

    fn cat(code: &str) -> LicenseCategory {
        LicenseCategory::new(code).unwrap()
    }

    #[test]
    fn system_rows_show_status_and_expiry() {
        let license = SystemLicense {
            license_number: "MG-2019-0042".to_string(),
            license_type: LicenseType::DrivingLicense,
            categories: vec![cat("B"), cat("C")],
            status: LicenseStatus::Expired,
            issue_date: None,
            expiry_date: NaiveDate::from_ymd_opt(2024, 5, 31),
            issuing_location: None,
        };
        let output = license_table(&[License::System(license)], &PermisTheme::plain()).render();

        assert!(output.contains("MG-2019-0042"));
        assert!(output.contains("B, C"));
        assert!(output.contains(LicenseStatus::Expired.label()));
        assert!(output.contains("2024-05-31"));
        assert!(output.contains("on file"));
    }

    #[test]
    fn generated_rows_show_id_and_target() {
        let mut manual = ExternalLicense::manual("ext-1", LicenseType::DrivingLicense, vec![cat("A")]);
        manual.license_number = "FR-88213".to_string();
        let mut generated =
            ExternalLicense::manual("auto-b-2", LicenseType::LearnersPermit, vec![cat("2")]);
        generated.is_auto_populated = true;
        generated.required_for_category = Some(cat("B"));

        let records = [License::External(manual), License::External(generated)];
        let table = license_table(&records, &PermisTheme::plain());
        let output = table.render();

        assert_eq!(table.row_count(), 2);
        assert!(output.contains("FR-88213"));
        assert!(output.contains("○ unverified"));
        let generated_line = output.lines().find(|l| l.contains("auto-b-2")).unwrap();
        assert!(generated_line.contains(" B "));
    }
}
