//! Core record types for apptracker.
//!
//! A [`CollegeApplication`] owns its [`Recommender`]s by value; they are
//! stored and rendered inline with the application that asked for them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Delimiter line framing every rendered application block.
pub const BLOCK_DELIMITER: &str = "====================================";

/// Options controlling how records are turned into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Fixed number of decimal places for the cost, if any.
    pub cost_decimals: Option<usize>,
    /// Placeholder for dates that were never entered.
    pub empty_date: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cost_decimals: None,
            empty_date: "null".to_string(),
        }
    }
}

impl RenderOptions {
    /// Render an optional date, falling back to the placeholder.
    #[must_use]
    pub fn date(&self, date: Option<NaiveDate>) -> String {
        date.map_or_else(|| self.empty_date.clone(), |d| d.to_string())
    }

    /// Render a cost without the currency prefix.
    ///
    /// Without a fixed precision this is the shortest round-trip form, which
    /// always keeps at least one fractional digit (`50000.0`, `1234.5`).
    #[must_use]
    pub fn cost(&self, cost: f64) -> String {
        match self.cost_decimals {
            Some(decimals) => format!("{cost:.decimals$}"),
            None => format!("{cost:?}"),
        }
    }
}

/// A person asked to write a letter of recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommender {
    /// Recommender's name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// When the letter was asked for.
    pub date_requested: Option<NaiveDate>,
    /// When the letter is due.
    pub date_required: Option<NaiveDate>,
}

impl Recommender {
    /// Create a recommender with no dates set.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            date_requested: None,
            date_required: None,
        }
    }

    /// Render the single indented line used under `RECOMMENDERS:`.
    #[must_use]
    pub fn render_line(&self, opts: &RenderOptions) -> String {
        format!(
            "\t- {} ({}) | Req: {} | Due: {}",
            self.name,
            self.email,
            opts.date(self.date_requested),
            opts.date(self.date_required)
        )
    }
}

impl fmt::Display for Recommender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_line(&RenderOptions::default()))
    }
}

/// One tracked college application.
///
/// `college_name` is the de-facto key for search and delete, but nothing
/// enforces uniqueness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeApplication {
    /// Name of the college.
    pub college_name: String,
    /// Mailing address.
    pub address: String,
    /// When the application was submitted.
    pub application_date: Option<NaiveDate>,
    /// Application fee. Not range-checked; NaN and infinities are kept.
    #[serde(default, with = "cost_format")]
    pub cost: f64,
    /// Submission platform, e.g. "`CommonApp`".
    pub platform: String,
    /// Letters requested for this application, in entry order.
    #[serde(default)]
    pub recommenders: Vec<Recommender>,
    /// When a decision is expected.
    pub expected_decision_date: Option<NaiveDate>,
    /// Whether the essay is done.
    pub essay_written: bool,
    /// Whether transcripts have been sent.
    pub transcripts_submitted: bool,
}

impl CollegeApplication {
    /// Create an application with empty fields and a zero cost.
    #[must_use]
    pub fn new(college_name: impl Into<String>) -> Self {
        Self {
            college_name: college_name.into(),
            address: String::new(),
            application_date: None,
            cost: 0.0,
            platform: String::new(),
            recommenders: Vec::new(),
            expected_decision_date: None,
            essay_written: false,
            transcripts_submitted: false,
        }
    }

    /// Case-insensitive substring match on the college name.
    #[must_use]
    pub fn name_contains(&self, query: &str) -> bool {
        self.college_name
            .to_lowercase()
            .contains(&query.to_lowercase())
    }

    /// Case-insensitive exact match on the college name.
    #[must_use]
    pub fn name_matches(&self, name: &str) -> bool {
        self.college_name.to_lowercase() == name.to_lowercase()
    }

    /// Render the multi-line block shown to the user.
    ///
    /// Every line, including the closing delimiter, ends with `\n`.
    #[must_use]
    pub fn render(&self, opts: &RenderOptions) -> String {
        let mut out = String::new();
        out.push_str(BLOCK_DELIMITER);
        out.push('\n');
        out.push_str(&format!("College: {}\n", self.college_name));
        out.push_str(&format!("Address: {}\n", self.address));
        out.push_str(&format!(
            "Platform: {} | Cost: ${}\n",
            self.platform,
            opts.cost(self.cost)
        ));
        out.push_str(&format!(
            "Applied On: {}\n",
            opts.date(self.application_date)
        ));
        out.push_str(&format!(
            "Expected Decision: {}\n",
            opts.date(self.expected_decision_date)
        ));
        out.push_str(&format!(
            "Status: [Essay: {}] [Transcripts: {}]\n",
            if self.essay_written { "Done" } else { "None" },
            if self.transcripts_submitted {
                "Sent"
            } else {
                "None"
            }
        ));

        out.push_str("RECOMMENDERS:\n");
        if self.recommenders.is_empty() {
            out.push_str("\tNone listed.\n");
        } else {
            for recommender in &self.recommenders {
                out.push_str(&recommender.render_line(opts));
                out.push('\n');
            }
        }
        out.push_str(BLOCK_DELIMITER);
        out.push('\n');
        out
    }
}

impl fmt::Display for CollegeApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&RenderOptions::default()))
    }
}

/// Costs as JSON numbers, with non-finite values spelled out as strings.
///
/// JSON has no NaN or infinity, and `serde_json` would write them as `null`,
/// which cannot be read back into an `f64`.
mod cost_format {
    use serde::{de, Deserialize, Deserializer, Serializer};

    const NAN: &str = "NaN";
    const INFINITY: &str = "inf";
    const NEG_INFINITY: &str = "-inf";

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(cost: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if cost.is_finite() {
            serializer.serialize_f64(*cost)
        } else if cost.is_nan() {
            serializer.serialize_str(NAN)
        } else if cost.is_sign_positive() {
            serializer.serialize_str(INFINITY)
        } else {
            serializer.serialize_str(NEG_INFINITY)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stored {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Stored::deserialize(deserializer)? {
            Stored::Number(cost) => Ok(cost),
            Stored::Text(text) => match text.as_str() {
                NAN => Ok(f64::NAN),
                INFINITY => Ok(f64::INFINITY),
                NEG_INFINITY => Ok(f64::NEG_INFINITY),
                other => Err(de::Error::invalid_value(
                    de::Unexpected::Str(other),
                    &"a number, \"NaN\", \"inf\" or \"-inf\"",
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_defaults() {
        let app = CollegeApplication::new("Test College");
        assert_eq!(app.college_name, "Test College");
        assert!(app.cost.abs() < f64::EPSILON);
        assert!(app.recommenders.is_empty());
        assert!(!app.essay_written);
        assert!(!app.transcripts_submitted);
    }

    #[test]
    fn test_name_contains_is_case_insensitive() {
        let app = CollegeApplication::new("Boston University");
        assert!(app.name_contains("boston"));
        assert!(app.name_contains("ton uni"));
        assert!(app.name_contains(""));
        assert!(!app.name_contains("MIT"));
    }

    #[test]
    fn test_name_matches_is_exact() {
        let app = CollegeApplication::new("Boston University");
        assert!(app.name_matches("boston university"));
        assert!(app.name_matches("BOSTON UNIVERSITY"));
        assert!(!app.name_matches("Boston"));
        assert!(!app.name_matches(" Boston University"));
    }

    #[test]
    fn test_render_scenario_block() {
        let app = CollegeApplication {
            cost: 50000.0,
            essay_written: true,
            ..CollegeApplication::new("Test College")
        };

        let text = app.to_string();
        assert!(text.contains("Test College"));
        assert!(text.contains("$50000.0"));
        assert!(text.contains("[Essay: Done]"));
        assert!(text.contains("[Transcripts: None]"));
        assert!(text.contains("RECOMMENDERS:\n\tNone listed."));
    }

    #[test]
    fn test_render_full_block() {
        let app = CollegeApplication {
            college_name: "Boston University".to_string(),
            address: "1 Silber Way".to_string(),
            application_date: Some(date(2025, 1, 15)),
            cost: 85.5,
            platform: "CommonApp".to_string(),
            recommenders: vec![Recommender {
                name: "Dr. Smith".to_string(),
                email: "smith@example.edu".to_string(),
                date_requested: Some(date(2024, 12, 1)),
                date_required: None,
            }],
            expected_decision_date: None,
            essay_written: false,
            transcripts_submitted: true,
        };

        let expected = "\
====================================
College: Boston University
Address: 1 Silber Way
Platform: CommonApp | Cost: $85.5
Applied On: 2025-01-15
Expected Decision: null
Status: [Essay: None] [Transcripts: Sent]
RECOMMENDERS:
\t- Dr. Smith (smith@example.edu) | Req: 2024-12-01 | Due: null
====================================
";
        assert_eq!(app.to_string(), expected);
    }

    #[test]
    fn test_render_with_options() {
        let app = CollegeApplication {
            cost: 50000.0,
            ..CollegeApplication::new("Test College")
        };
        let opts = RenderOptions {
            cost_decimals: Some(2),
            empty_date: "N/A".to_string(),
        };

        let text = app.render(&opts);
        assert!(text.contains("Cost: $50000.00\n"));
        assert!(text.contains("Applied On: N/A\n"));
        assert!(text.contains("Expected Decision: N/A\n"));
    }

    #[test]
    fn test_cost_rendering() {
        let opts = RenderOptions::default();
        assert_eq!(opts.cost(0.0), "0.0");
        assert_eq!(opts.cost(1234.5), "1234.5");
        assert_eq!(opts.cost(-20.0), "-20.0");

        let fixed = RenderOptions {
            cost_decimals: Some(1),
            ..RenderOptions::default()
        };
        assert_eq!(fixed.cost(1234.56), "1234.6");
    }

    #[test]
    fn test_recommender_display() {
        let recommender = Recommender {
            date_required: Some(date(2025, 2, 1)),
            ..Recommender::new("Ms. Lee", "lee@school.org")
        };
        assert_eq!(
            recommender.to_string(),
            "\t- Ms. Lee (lee@school.org) | Req: null | Due: 2025-02-01"
        );
    }

    #[test]
    fn test_serialization_uses_iso_dates() {
        let app = CollegeApplication {
            application_date: Some(date(2025, 3, 9)),
            ..CollegeApplication::new("Tufts")
        };

        let json = serde_json::to_string(&app).unwrap();
        assert!(json.contains("\"application_date\":\"2025-03-09\""));
        assert!(json.contains("\"expected_decision_date\":null"));

        let back: CollegeApplication = serde_json::from_str(&json).unwrap();
        assert_eq!(back, app);
    }

    #[test]
    fn test_non_finite_cost_serialization() {
        for (cost, text) in [
            (f64::NAN, "\"cost\":\"NaN\""),
            (f64::INFINITY, "\"cost\":\"inf\""),
            (f64::NEG_INFINITY, "\"cost\":\"-inf\""),
        ] {
            let app = CollegeApplication {
                cost,
                ..CollegeApplication::new("Odd")
            };
            let json = serde_json::to_string(&app).unwrap();
            assert!(json.contains(text), "{json}");

            let back: CollegeApplication = serde_json::from_str(&json).unwrap();
            assert_eq!(back.cost.is_nan(), cost.is_nan());
            if !cost.is_nan() {
                assert_eq!(back.cost, cost);
            }
        }
    }

    #[test]
    fn test_cost_rejects_unknown_text() {
        let json = r#"{"college_name": "Odd", "address": "", "application_date": null,
            "cost": "lots", "platform": "", "expected_decision_date": null,
            "essay_written": false, "transcripts_submitted": false}"#;
        assert!(serde_json::from_str::<CollegeApplication>(json).is_err());
    }

    #[test]
    fn test_missing_cost_defaults_to_zero() {
        let json = r#"{"college_name": "Plain", "address": "", "application_date": null,
            "platform": "", "expected_decision_date": null,
            "essay_written": false, "transcripts_submitted": false}"#;
        let app: CollegeApplication = serde_json::from_str(json).unwrap();
        assert!(app.cost.abs() < f64::EPSILON);
    }
}
