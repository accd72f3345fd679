//! Text the user sees, and parsing of what the user types.
//!
//! The store hands back plain records and booleans. This module turns them
//! into messages, and turns raw field text into typed values before a record
//! is built. The store itself never validates input.

use chrono::NaiveDate;

use crate::application::{CollegeApplication, Recommender, RenderOptions};
use crate::error::{Error, Result};

/// Shown by `list` when nothing is stored.
pub const EMPTY_LIST_MESSAGE: &str = "No applications tracked yet.";

/// Shown when a cost field does not parse.
pub const INVALID_COST_MESSAGE: &str = "Error: Cost must be a number.";

/// Format every block, each followed by a blank line.
#[must_use]
pub fn format_list(applications: &[CollegeApplication], opts: &RenderOptions) -> String {
    if applications.is_empty() {
        return EMPTY_LIST_MESSAGE.to_string();
    }
    format_blocks(applications.iter(), opts)
}

/// Format search results, or the no-match message for `query`.
#[must_use]
pub fn format_search(query: &str, results: &[&CollegeApplication], opts: &RenderOptions) -> String {
    if results.is_empty() {
        return format!("No applications found matching: {query}");
    }
    format_blocks(results.iter().copied(), opts)
}

fn format_blocks<'a>(
    applications: impl Iterator<Item = &'a CollegeApplication>,
    opts: &RenderOptions,
) -> String {
    let mut out = String::new();
    for app in applications {
        out.push_str(&app.render(opts));
        out.push('\n');
    }
    out
}

/// Outcome message for a delete request.
#[must_use]
pub fn delete_message(name: &str, removed: bool) -> String {
    if removed {
        format!("Successfully deleted application for: {name}")
    } else {
        format!("Could not find an application for: {name}")
    }
}

/// Confirmation after an application is added.
#[must_use]
pub fn saved_message(application: &CollegeApplication) -> String {
    format!(
        "Application for {} saved successfully!",
        application.college_name
    )
}

/// Parse a cost field. An empty field means zero.
///
/// Surrounding whitespace is ignored, but whitespace alone is not a number.
/// `NaN` and `inf` are accepted like any other value.
///
/// # Errors
///
/// Returns [`Error::InvalidCost`] if the text is not a number.
pub fn parse_cost(text: &str) -> Result<f64> {
    if text.is_empty() {
        return Ok(0.0);
    }
    text.trim()
        .parse::<f64>()
        .map_err(|_| Error::invalid_cost(text))
}

/// Parse an optional `YYYY-MM-DD` date. Blank means unset.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] if the text is not a calendar date.
pub fn parse_date(text: &str) -> Result<Option<NaiveDate>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| Error::invalid_date(text))
}

/// Parse `NAME|EMAIL|REQUESTED|REQUIRED`; trailing fields may be omitted.
///
/// A blank name yields `None`, matching a form where the recommender
/// section was left empty.
///
/// # Errors
///
/// Returns an error for more than four fields or an unparseable date.
pub fn parse_recommender(spec: &str) -> Result<Option<Recommender>> {
    let fields: Vec<&str> = spec.split('|').collect();
    if fields.len() > 4 {
        return Err(Error::invalid_recommender(
            spec,
            format!("expected at most 4 '|'-separated fields, got {}", fields.len()),
        ));
    }

    let field = |i: usize| fields.get(i).copied().unwrap_or_default();
    let name = field(0).trim();
    if name.is_empty() {
        return Ok(None);
    }

    Ok(Some(Recommender {
        name: name.to_string(),
        email: field(1).trim().to_string(),
        date_requested: parse_date(field(2))?,
        date_required: parse_date(field(3))?,
    }))
}

/// User-facing text for an error from this module.
#[must_use]
pub fn error_message(err: &Error) -> String {
    match err {
        Error::InvalidCost { .. } => INVALID_COST_MESSAGE.to_string(),
        other => format!("Error: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_list_empty() {
        assert_eq!(
            format_list(&[], &RenderOptions::default()),
            "No applications tracked yet."
        );
    }

    #[test]
    fn test_format_list_blocks_in_order() {
        let apps = vec![CollegeApplication::new("Tufts"), CollegeApplication::new("Amherst")];
        let text = format_list(&apps, &RenderOptions::default());

        let tufts = text.find("College: Tufts").unwrap();
        let amherst = text.find("College: Amherst").unwrap();
        assert!(tufts < amherst);
        assert!(text.contains("====================================\n\n===================================="));
        assert!(text.ends_with("====================================\n\n"));
    }

    #[test]
    fn test_format_search_no_match() {
        assert_eq!(
            format_search("MIT", &[], &RenderOptions::default()),
            "No applications found matching: MIT"
        );
    }

    #[test]
    fn test_format_search_results() {
        let app = CollegeApplication::new("Boston University");
        let text = format_search("boston", &[&app], &RenderOptions::default());
        assert!(text.contains("College: Boston University"));
    }

    #[test]
    fn test_delete_messages() {
        assert_eq!(
            delete_message("Tufts", true),
            "Successfully deleted application for: Tufts"
        );
        assert_eq!(
            delete_message("Tufts", false),
            "Could not find an application for: Tufts"
        );
    }

    #[test]
    fn test_saved_message() {
        let app = CollegeApplication::new("Tufts");
        assert_eq!(saved_message(&app), "Application for Tufts saved successfully!");
    }

    #[test]
    fn test_parse_cost() {
        assert!(parse_cost("").unwrap().abs() < f64::EPSILON);
        assert!((parse_cost(" 75.50 ").unwrap() - 75.5).abs() < f64::EPSILON);
        assert!((parse_cost("-10").unwrap() + 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_cost_whitespace_only_is_invalid() {
        let err = parse_cost("   ").unwrap_err();
        assert!(matches!(err, Error::InvalidCost { .. }));
    }

    #[test]
    fn test_parse_cost_non_finite() {
        assert!(parse_cost("NaN").unwrap().is_nan());
        assert_eq!(parse_cost("inf").unwrap(), f64::INFINITY);
        assert_eq!(parse_cost("-infinity").unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_cost_invalid() {
        let err = parse_cost("seventy").unwrap_err();
        assert!(matches!(err, Error::InvalidCost { .. }));
        assert_eq!(error_message(&err), "Error: Cost must be a number.");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("").unwrap(), None);
        assert_eq!(
            parse_date("2025-04-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 1)
        );
        assert!(parse_date("04/01/2025").is_err());
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn test_parse_recommender_full() {
        let rec = parse_recommender("Dr. Smith|smith@example.edu|2024-12-01|2025-01-10")
            .unwrap()
            .unwrap();
        assert_eq!(rec.name, "Dr. Smith");
        assert_eq!(rec.email, "smith@example.edu");
        assert_eq!(rec.date_requested, NaiveDate::from_ymd_opt(2024, 12, 1));
        assert_eq!(rec.date_required, NaiveDate::from_ymd_opt(2025, 1, 10));
    }

    #[test]
    fn test_parse_recommender_partial() {
        let rec = parse_recommender("Ms. Lee|lee@school.org").unwrap().unwrap();
        assert_eq!(rec.email, "lee@school.org");
        assert!(rec.date_requested.is_none());
        assert!(rec.date_required.is_none());
    }

    #[test]
    fn test_parse_recommender_blank_name() {
        assert!(parse_recommender("|someone@example.com").unwrap().is_none());
        assert!(parse_recommender("").unwrap().is_none());
    }

    #[test]
    fn test_parse_recommender_errors() {
        assert!(matches!(
            parse_recommender("a|b|c|d|e"),
            Err(Error::InvalidRecommender { .. })
        ));
        assert!(matches!(
            parse_recommender("a|b|not-a-date"),
            Err(Error::InvalidDate { .. })
        ));
    }
}
