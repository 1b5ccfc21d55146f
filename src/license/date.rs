//! Date-input validation for issue and expiry dates.
//!
//! Dates typed by an operator are only kept if they are well-formed
//! `YYYY-MM-DD` calendar dates whose year lies within [`DateBounds`].
//! Anything else is discarded rather than stored.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Accepted year range for typed dates (inclusive on both ends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DateBounds {
    /// Earliest accepted year.
    pub min_year: i32,
    /// Latest accepted year.
    pub max_year: i32,
}

impl Default for DateBounds {
    fn default() -> Self {
        Self {
            min_year: 1900,
            max_year: 2100,
        }
    }
}

/// Shape check for `YYYY-MM-DD` input before calendar parsing.
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("ISO_DATE must compile"));

impl DateBounds {
    /// Whether the bounds describe a non-empty range.
    pub fn is_valid(&self) -> bool {
        self.min_year <= self.max_year
    }

    /// Whether a parsed date falls within the accepted years.
    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.min_year..=self.max_year).contains(&date.year())
    }

    /// Parse raw date input.
    ///
    /// Returns `None` for empty input and for anything malformed: wrong
    /// shape, impossible calendar dates, or years outside the bounds.
    pub fn parse(&self, raw: &str) -> Option<NaiveDate> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        if !ISO_DATE.is_match(trimmed) {
            tracing::warn!("Discarding date input with unexpected format: {:?}", trimmed);
            return None;
        }

        let date = match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!("Discarding invalid date {:?}: {}", trimmed, e);
                return None;
            }
        };

        if !self.contains(date) {
            tracing::warn!(
                "Discarding date {} outside accepted years {}..={}",
                date,
                self.min_year,
                self.max_year
            );
            return None;
        }

        Some(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> DateBounds {
        DateBounds::default()
    }

    #[test]
    fn parses_valid_iso_date() {
        let date = bounds().parse("2024-03-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert!(bounds().parse("  2024-03-15 ").is_some());
    }

    #[test]
    fn empty_input_is_none() {
        assert!(bounds().parse("").is_none());
        assert!(bounds().parse("   ").is_none());
    }

    #[test]
    fn wrong_format_is_discarded() {
        assert!(bounds().parse("15/03/2024").is_none());
        assert!(bounds().parse("2024-3-15").is_none());
        assert!(bounds().parse("20245-03-15").is_none());
    }

    #[test]
    fn impossible_calendar_date_is_discarded() {
        assert!(bounds().parse("2023-02-30").is_none());
        assert!(bounds().parse("2024-13-01").is_none());
    }

    #[test]
    fn out_of_range_year_is_discarded() {
        assert!(bounds().parse("1850-01-01").is_none());
        assert!(bounds().parse("2150-01-01").is_none());
    }

    #[test]
    fn custom_bounds_apply() {
        let narrow = DateBounds {
            min_year: 2000,
            max_year: 2030,
        };
        assert!(narrow.parse("1999-12-31").is_none());
        assert!(narrow.parse("2000-01-01").is_some());
    }

    #[test]
    fn inverted_bounds_are_invalid() {
        let inverted = DateBounds {
            min_year: 2030,
            max_year: 2000,
        };
        assert!(!inverted.is_valid());
        assert!(bounds().is_valid());
    }
}
