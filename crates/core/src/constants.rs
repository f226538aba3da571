//! Constants used throughout the Quill core crate.
//!
//! Identifier system fragments, default breakpoint widths and palette sizes live here so the
//! classifier, the viewport adapter and the configuration loader agree on them.

/// Substring of a system URI that marks an NHS number.
pub const NHS_SYSTEM_FRAGMENT: &str = "nhs.uk";

/// Substring of a system URI that marks a Medicare number.
pub const MEDICARE_SYSTEM_FRAGMENT: &str = "medicare";

/// Substring of a system URI that marks a Medicaid number.
pub const MEDICAID_SYSTEM_FRAGMENT: &str = "medicaid";

/// Number of digits in an NHS number.
pub const NHS_NUMBER_DIGITS: usize = 10;

/// Pixels per `em` when converting configured breakpoint widths.
pub const PX_PER_EM: f64 = 16.0;

/// Default minimum widths, in `em`, for `xs`, `sm`, `md`, `lg`, `xl`.
pub const DEFAULT_BREAKPOINT_EMS: [f64; 5] = [36.0, 48.0, 62.0, 75.0, 88.0];

/// Number of avatar gradients the front end defines.
pub const GRADIENT_COUNT: u8 = 30;

/// Display config filename looked up in the working directory.
pub const DISPLAY_CONFIG_FILENAME: &str = "quill.yaml";

/// Separator between parts of a patient banner.
pub const BANNER_SEPARATOR: &str = " · ";
