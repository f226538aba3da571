//! National health identifier classification and display formatting.
//!
//! Views receive identifiers as plain `value`/`system` pairs already pulled out of upstream
//! records. This module decides which scheme a pair belongs to and how its value is shown.
//!
//! Rules:
//! - The scheme comes only from the system URI, by case-sensitive substring match, checked in
//!   the order NHS (`nhs.uk`), Medicare (`medicare`), Medicaid (`medicaid`). Anything else,
//!   including an absent or empty system, is [`IdentifierScheme::Generic`].
//! - Only NHS numbers are regrouped: when exactly ten digits can be pulled out of the value
//!   they are shown as `DDD DDD DDDD`. Every other value is passed through verbatim.
//! - No checksum or length validation is performed. This is a display concern only.
//!
//! Rendering is kept apart from classification: see [`IdentifierRenderer`].

use crate::constants::{
    MEDICAID_SYSTEM_FRAGMENT, MEDICARE_SYSTEM_FRAGMENT, NHS_NUMBER_DIGITS, NHS_SYSTEM_FRAGMENT,
};
use quill_types::IdentifierScheme;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Public types
// ============================================================================

/// A raw identifier as supplied by the record layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalIdentifier {
    /// The identifier value. May contain digits, spaces, hyphens or anything else.
    pub value: String,

    /// Opaque system URI naming the identifier scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

impl NationalIdentifier {
    pub fn new(value: impl Into<String>, system: Option<String>) -> Self {
        Self {
            value: value.into(),
            system,
        }
    }

    /// Classify this identifier. See [`IdentifierClassifier::classify`].
    pub fn classify(&self) -> ClassifiedIdentifier {
        IdentifierClassifier::classify(&self.value, self.system.as_deref())
    }
}

/// Result of classifying an identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassifiedIdentifier {
    pub scheme: IdentifierScheme,
    /// Display label for the scheme (`"ID"` when generic).
    pub label: &'static str,
    /// The value as it should be shown.
    pub formatted: String,
}

impl ClassifiedIdentifier {
    /// Composed display text using [`LabelledRenderer`].
    pub fn display(&self) -> String {
        LabelledRenderer.render(self)
    }
}

impl fmt::Display for ClassifiedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Identifier classification operations.
///
/// This is a zero-sized type used for namespacing. All methods are associated functions and
/// none of them can fail.
pub struct IdentifierClassifier;

impl IdentifierClassifier {
    /// Classify and format an identifier.
    ///
    /// # Arguments
    ///
    /// * `value` - Raw identifier value, possibly empty.
    /// * `system` - Optional system URI.
    ///
    /// # Returns
    ///
    /// The resolved scheme, its label and the display-formatted value.
    pub fn classify(value: &str, system: Option<&str>) -> ClassifiedIdentifier {
        let scheme = Self::scheme_for_system(system);
        ClassifiedIdentifier {
            scheme,
            label: scheme.label(),
            formatted: Self::format_value(value, scheme),
        }
    }

    /// Resolve the scheme named by a system URI.
    pub fn scheme_for_system(system: Option<&str>) -> IdentifierScheme {
        let Some(system) = system else {
            return IdentifierScheme::Generic;
        };

        if system.contains(NHS_SYSTEM_FRAGMENT) {
            IdentifierScheme::Nhs
        } else if system.contains(MEDICARE_SYSTEM_FRAGMENT) {
            IdentifierScheme::Medicare
        } else if system.contains(MEDICAID_SYSTEM_FRAGMENT) {
            IdentifierScheme::Medicaid
        } else {
            IdentifierScheme::Generic
        }
    }

    /// Format a value for display under the given scheme.
    ///
    /// Returns the value unchanged unless the scheme is NHS and the value holds exactly ten
    /// digits.
    pub fn format_value(value: &str, scheme: IdentifierScheme) -> String {
        if scheme != IdentifierScheme::Nhs {
            return value.to_owned();
        }

        let digits: String = value.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != NHS_NUMBER_DIGITS {
            return value.to_owned();
        }

        format!("{} {} {}", &digits[0..3], &digits[3..6], &digits[6..])
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Turns a classified identifier into the text a view shows.
pub trait IdentifierRenderer {
    fn render(&self, identifier: &ClassifiedIdentifier) -> String;
}

/// Prefixes the label when the scheme was recognised.
///
/// `NHS 123 456 7890`, or just `NHS` when the value is empty. Generic identifiers are shown
/// without a label.
#[derive(Clone, Copy, Debug, Default)]
pub struct LabelledRenderer;

impl IdentifierRenderer for LabelledRenderer {
    fn render(&self, identifier: &ClassifiedIdentifier) -> String {
        if !identifier.scheme.is_resolved() {
            return identifier.formatted.clone();
        }
        if identifier.formatted.is_empty() {
            return identifier.label.to_owned();
        }
        format!("{} {}", identifier.label, identifier.formatted)
    }
}

/// Shows the formatted value only, whatever the scheme.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainRenderer;

impl IdentifierRenderer for PlainRenderer {
    fn render(&self, identifier: &ClassifiedIdentifier) -> String {
        identifier.formatted.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const NHS_SYSTEM: &str = "https://fhir.nhs.uk/Id/nhs-number";
    const MEDICARE_SYSTEM: &str = "http://ns.electronichealth.net.au/id/medicare-number";

    #[test]
    fn formats_ten_digit_nhs_number() {
        let id = IdentifierClassifier::classify("1234567890", Some(NHS_SYSTEM));
        assert_eq!(id.scheme, IdentifierScheme::Nhs);
        assert_eq!(id.label, "NHS");
        assert_eq!(id.formatted, "123 456 7890");
        assert_eq!(id.display(), "NHS 123 456 7890");
    }

    #[test]
    fn medicare_is_labelled_but_not_regrouped() {
        let id = IdentifierClassifier::classify("2950156481", Some(MEDICARE_SYSTEM));
        assert_eq!(id.label, "Medicare");
        assert_eq!(id.formatted, "2950156481");
        assert_eq!(id.display(), "Medicare 2950156481");
        assert_eq!(PlainRenderer.render(&id), "2950156481");
    }

    #[test]
    fn medicaid_system_is_recognised() {
        let id = IdentifierClassifier::classify("ABC-123", Some("urn:state:medicaid"));
        assert_eq!(id.scheme, IdentifierScheme::Medicaid);
        assert_eq!(id.display(), "Medicaid ABC-123");
    }

    #[test]
    fn empty_nhs_value_displays_label_only() {
        let id = IdentifierClassifier::classify("", Some(NHS_SYSTEM));
        assert_eq!(id.label, "NHS");
        assert_eq!(id.formatted, "");
        assert_eq!(id.display(), "NHS");
    }

    #[test]
    fn short_nhs_value_is_unchanged() {
        let id = IdentifierClassifier::classify("12345", Some(NHS_SYSTEM));
        assert_eq!(id.formatted, "12345");
        assert_eq!(id.display(), "NHS 12345");
    }

    #[test]
    fn long_nhs_value_is_unchanged() {
        let id = IdentifierClassifier::classify("123-456-78901", Some(NHS_SYSTEM));
        assert_eq!(id.formatted, "123-456-78901");
    }

    #[test]
    fn digits_are_extracted_from_noisy_nhs_value() {
        let id = IdentifierClassifier::classify("12A 34B 56C7D890", Some(NHS_SYSTEM));
        assert_eq!(id.formatted, "123 456 7890");
    }

    #[test]
    fn system_match_is_case_sensitive() {
        let id =
            IdentifierClassifier::classify("1234567890", Some("https://fhir.NHS.uk/Id/nhs-number"));
        assert_eq!(id.scheme, IdentifierScheme::Generic);
        assert_eq!(id.formatted, "1234567890");
        assert_eq!(id.display(), "1234567890");

        let id = IdentifierClassifier::classify("1234567890", Some("NHS.UK"));
        assert_eq!(id.scheme, IdentifierScheme::Generic);
    }

    #[test]
    fn absent_system_passes_value_through() {
        let id = IdentifierClassifier::classify("123 4567890", None);
        assert_eq!(id.scheme, IdentifierScheme::Generic);
        assert_eq!(id.label, "ID");
        assert_eq!(id.formatted, "123 4567890");
        assert_eq!(id.display(), "123 4567890");
    }

    #[test]
    fn empty_system_is_generic() {
        assert_eq!(
            IdentifierClassifier::scheme_for_system(Some("")),
            IdentifierScheme::Generic
        );
    }

    #[test]
    fn nhs_fragment_wins_over_later_fragments() {
        assert_eq!(
            IdentifierClassifier::scheme_for_system(Some("https://medicare.nhs.uk/id")),
            IdentifierScheme::Nhs
        );
        assert_eq!(
            IdentifierClassifier::scheme_for_system(Some("medicare-medicaid")),
            IdentifierScheme::Medicare
        );
    }

    #[test]
    fn formatting_is_idempotent() {
        let once = IdentifierClassifier::format_value("1234567890", IdentifierScheme::Nhs);
        let twice = IdentifierClassifier::format_value(&once, IdentifierScheme::Nhs);
        assert_eq!(once, "123 456 7890");
        assert_eq!(twice, once);
    }

    #[test]
    fn national_identifier_deserialises_without_system() {
        let id: NationalIdentifier =
            serde_json::from_str(r#"{"value":"9434765919"}"#).expect("parse identifier");
        assert_eq!(id.system, None);
        assert_eq!(id.classify().display(), "9434765919");
    }

    #[test]
    fn classified_identifier_serialises_for_views() {
        let id = NationalIdentifier::new("9434765919", Some(NHS_SYSTEM.into())).classify();
        let json = serde_json::to_value(&id).expect("serialise");
        assert_eq!(json["scheme"], "nhs");
        assert_eq!(json["label"], "NHS");
        assert_eq!(json["formatted"], "943 476 5919");
    }

    fn unknown_system() -> impl Strategy<Value = Option<String>> {
        prop::option::of("[a-zA-Z:/._-]{0,40}").prop_filter("must not name a known scheme", |s| {
            s.as_deref().map_or(true, |s| {
                !s.contains(NHS_SYSTEM_FRAGMENT)
                    && !s.contains(MEDICARE_SYSTEM_FRAGMENT)
                    && !s.contains(MEDICAID_SYSTEM_FRAGMENT)
            })
        })
    }

    proptest! {
        #[test]
        fn unknown_systems_pass_values_through(value in ".*", system in unknown_system()) {
            let id = IdentifierClassifier::classify(&value, system.as_deref());
            prop_assert_eq!(id.scheme, IdentifierScheme::Generic);
            prop_assert_eq!(&id.formatted, &value);
            prop_assert_eq!(id.display(), value);
        }

        #[test]
        fn nhs_values_without_ten_digits_are_never_partially_grouped(
            value in "[0-9 A-Z-]{0,24}"
                .prop_filter("digit count must not be ten", |v| {
                    v.chars().filter(char::is_ascii_digit).count() != NHS_NUMBER_DIGITS
                })
        ) {
            let id = IdentifierClassifier::classify(&value, Some(NHS_SYSTEM));
            prop_assert_eq!(id.formatted, value);
        }

        #[test]
        fn nhs_values_with_ten_digits_are_grouped(
            digits in prop::collection::vec(0u8..10, NHS_NUMBER_DIGITS),
            noise in prop::collection::vec("[ A-Z-]{0,2}", NHS_NUMBER_DIGITS),
        ) {
            let mut value = String::new();
            for (digit, junk) in digits.iter().zip(&noise) {
                value.push_str(junk);
                value.push(char::from(b'0' + digit));
            }
            let plain: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
            let expected = format!("{} {} {}", &plain[0..3], &plain[3..6], &plain[6..]);

            let id = IdentifierClassifier::classify(&value, Some(NHS_SYSTEM));
            prop_assert_eq!(id.formatted, expected);
        }
    }
}
