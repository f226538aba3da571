//! Shared display vocabulary for Quill.
//!
//! These are the small closed sets that cross crate boundaries: responsive breakpoint keys,
//! national identifier schemes and administrative gender. Each type knows its wire string
//! (the lower-case form used in JSON output and configuration files) and parses it back
//! strictly. Lenient, display-oriented mappings live in `quill-core`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing vocabulary values from their wire form.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypeError {
    /// The input was not one of `xs`, `sm`, `md`, `lg`, `xl`
    #[error("unknown breakpoint: {0}")]
    UnknownBreakpoint(String),

    /// The input was not one of the known identifier schemes
    #[error("unknown identifier scheme: {0}")]
    UnknownScheme(String),

    /// The input was not a FHIR administrative gender code
    #[error("unknown gender code: {0}")]
    UnknownGender(String),
}

// ============================================================================
// Breakpoint
// ============================================================================

/// A named viewport-width tier.
///
/// Tiers are ordered by width, so `Breakpoint::Xs < Breakpoint::Xl`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    /// All tiers, largest first. This is the order in which viewport predicates are checked.
    pub const LARGEST_FIRST: [Breakpoint; 5] = [
        Breakpoint::Xl,
        Breakpoint::Lg,
        Breakpoint::Md,
        Breakpoint::Sm,
        Breakpoint::Xs,
    ];

    /// Wire form of the key.
    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Breakpoint {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xs" => Ok(Breakpoint::Xs),
            "sm" => Ok(Breakpoint::Sm),
            "md" => Ok(Breakpoint::Md),
            "lg" => Ok(Breakpoint::Lg),
            "xl" => Ok(Breakpoint::Xl),
            other => Err(TypeError::UnknownBreakpoint(other.to_owned())),
        }
    }
}

// ============================================================================
// Identifier scheme
// ============================================================================

/// The national identifier scheme a value belongs to.
///
/// `Generic` covers an absent system URI as well as any URI that names none of the known
/// schemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierScheme {
    Nhs,
    Medicare,
    Medicaid,
    Generic,
}

impl IdentifierScheme {
    /// Display label for the scheme.
    ///
    /// `Generic` has the internal label `"ID"`, which views do not show.
    pub fn label(self) -> &'static str {
        match self {
            IdentifierScheme::Nhs => "NHS",
            IdentifierScheme::Medicare => "Medicare",
            IdentifierScheme::Medicaid => "Medicaid",
            IdentifierScheme::Generic => "ID",
        }
    }

    /// Whether the scheme was recognised from its system URI.
    pub fn is_resolved(self) -> bool {
        !matches!(self, IdentifierScheme::Generic)
    }

    fn as_wire(self) -> &'static str {
        match self {
            IdentifierScheme::Nhs => "nhs",
            IdentifierScheme::Medicare => "medicare",
            IdentifierScheme::Medicaid => "medicaid",
            IdentifierScheme::Generic => "generic",
        }
    }
}

impl fmt::Display for IdentifierScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for IdentifierScheme {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nhs" => Ok(IdentifierScheme::Nhs),
            "medicare" => Ok(IdentifierScheme::Medicare),
            "medicaid" => Ok(IdentifierScheme::Medicaid),
            "generic" => Ok(IdentifierScheme::Generic),
            other => Err(TypeError::UnknownScheme(other.to_owned())),
        }
    }
}

// ============================================================================
// Gender
// ============================================================================

/// FHIR administrative gender.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    Unknown,
}

impl Gender {
    /// FHIR code for the gender.
    pub fn as_code(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
            Gender::Unknown => "unknown",
        }
    }

    /// Capitalised display label.
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for Gender {
    type Err = TypeError;

    /// Strict parse of a FHIR gender code (exact, lower-case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            "unknown" => Ok(Gender::Unknown),
            other => Err(TypeError::UnknownGender(other.to_owned())),
        }
    }
}
