//! Demographic display helpers.
//!
//! Formatting for the small facts shown at the top of every patient view: name, date of birth
//! with age, gender and the national identifier. Like the identifier classifier these are
//! total: input that cannot be interpreted is shown as supplied (or dropped when it is
//! absent), never rejected.

use crate::constants::BANNER_SEPARATOR;
use crate::identifier::ClassifiedIdentifier;
use chrono::{Datelike, NaiveDate};
use quill_types::Gender;
use serde::Serialize;

/// ISO 8601 calendar date as stored on patient records.
const ISO_DATE: &str = "%Y-%m-%d";

/// Display form of a date of birth, e.g. `20 Mar 1992`.
const DISPLAY_DATE: &str = "%d %b %Y";

/// Map a FHIR gender code to [`Gender`], leniently.
///
/// Matching ignores case and surrounding whitespace. Anything unrecognised, including an
/// empty string, is [`Gender::Unknown`].
pub fn gender_from_fhir(code: &str) -> Gender {
    match code.trim().to_ascii_lowercase().as_str() {
        "male" => Gender::Male,
        "female" => Gender::Female,
        "other" => Gender::Other,
        _ => Gender::Unknown,
    }
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_birth_date(iso: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(iso.trim(), ISO_DATE).ok()
}

/// Format an ISO date of birth for display.
///
/// Returns the input unchanged when it is not a valid `YYYY-MM-DD` date.
pub fn format_birth_date(iso: &str) -> String {
    match parse_birth_date(iso) {
        Some(date) => date.format(DISPLAY_DATE).to_string(),
        None => iso.to_owned(),
    }
}

/// Age in completed years on `today`.
///
/// Returns `None` when `birth` is after `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    if birth > today {
        return None;
    }

    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

/// One-line patient summary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PatientBanner {
    pub given: Vec<String>,
    pub family: Option<String>,
    /// ISO `YYYY-MM-DD`, shown verbatim if it does not parse.
    pub birth_date: Option<String>,
    pub gender: Option<Gender>,
    pub identifier: Option<ClassifiedIdentifier>,
}

impl PatientBanner {
    /// Full display name: given names then family name.
    pub fn display_name(&self) -> String {
        self.given
            .iter()
            .map(|g| g.trim())
            .chain(self.family.as_deref().map(str::trim))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Render the banner with ages computed on `today`.
    ///
    /// Parts are joined with ` · ` and absent parts are skipped, e.g.
    /// `Sarah Jane Williams · 20 Mar 1992 (33y) · Female · NHS 123 456 7890`.
    pub fn render_on(&self, today: NaiveDate) -> String {
        let mut parts = Vec::with_capacity(4);

        let name = self.display_name();
        if !name.is_empty() {
            parts.push(name);
        }

        if let Some(birth_date) = self.birth_date.as_deref().filter(|d| !d.trim().is_empty()) {
            let formatted = format_birth_date(birth_date);
            let age = parse_birth_date(birth_date).and_then(|birth| age_on(birth, today));
            parts.push(match age {
                Some(age) => format!("{formatted} ({age}y)"),
                None => formatted,
            });
        }

        if let Some(gender) = self.gender {
            parts.push(gender.label().to_owned());
        }

        if let Some(identifier) = &self.identifier {
            let shown = identifier.display();
            if !shown.is_empty() {
                parts.push(shown);
            }
        }

        parts.join(BANNER_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::IdentifierClassifier;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn gender_mapping_is_lenient() {
        assert_eq!(gender_from_fhir("female"), Gender::Female);
        assert_eq!(gender_from_fhir(" Male "), Gender::Male);
        assert_eq!(gender_from_fhir("OTHER"), Gender::Other);
        assert_eq!(gender_from_fhir("unknown"), Gender::Unknown);
        assert_eq!(gender_from_fhir("non-binary"), Gender::Unknown);
        assert_eq!(gender_from_fhir(""), Gender::Unknown);
    }

    #[test]
    fn formats_iso_birth_date() {
        assert_eq!(format_birth_date("1992-03-20"), "20 Mar 1992");
        assert_eq!(format_birth_date("2001-12-05"), "05 Dec 2001");
    }

    #[test]
    fn unparseable_birth_date_passes_through() {
        assert_eq!(format_birth_date("20/03/1992"), "20/03/1992");
        assert_eq!(format_birth_date("1992-02-30"), "1992-02-30");
        assert_eq!(format_birth_date(""), "");
    }

    #[test]
    fn age_counts_completed_years() {
        let birth = date(1992, 3, 20);
        assert_eq!(age_on(birth, date(2026, 3, 19)), Some(33));
        assert_eq!(age_on(birth, date(2026, 3, 20)), Some(34));
        assert_eq!(age_on(birth, birth), Some(0));
    }

    #[test]
    fn leap_day_birthday_counts_from_march_in_common_years() {
        let birth = date(2000, 2, 29);
        assert_eq!(age_on(birth, date(2023, 2, 28)), Some(22));
        assert_eq!(age_on(birth, date(2023, 3, 1)), Some(23));
    }

    #[test]
    fn future_birth_date_has_no_age() {
        assert_eq!(age_on(date(2030, 1, 1), date(2026, 1, 1)), None);
    }

    #[test]
    fn renders_full_banner() {
        let banner = PatientBanner {
            given: vec!["Sarah".into(), "Jane".into()],
            family: Some("Williams".into()),
            birth_date: Some("1992-03-20".into()),
            gender: Some(Gender::Female),
            identifier: Some(IdentifierClassifier::classify(
                "1234567890",
                Some("https://fhir.nhs.uk/Id/nhs-number"),
            )),
        };

        assert_eq!(
            banner.render_on(date(2026, 1, 23)),
            "Sarah Jane Williams · 20 Mar 1992 (33y) · Female · NHS 123 456 7890"
        );
    }

    #[test]
    fn banner_skips_absent_parts() {
        let banner = PatientBanner {
            family: Some("Williams".into()),
            birth_date: Some("sometime in 1992".into()),
            ..Default::default()
        };
        assert_eq!(
            banner.render_on(date(2026, 1, 23)),
            "Williams · sometime in 1992"
        );

        assert_eq!(PatientBanner::default().render_on(date(2026, 1, 23)), "");
    }

    #[test]
    fn banner_shows_generic_identifier_without_label() {
        let banner = PatientBanner {
            given: vec!["Sam".into()],
            identifier: Some(IdentifierClassifier::classify("A-991", None)),
            ..Default::default()
        };
        assert_eq!(banner.render_on(date(2026, 1, 23)), "Sam · A-991");
    }
}
