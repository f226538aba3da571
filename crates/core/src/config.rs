//! Display configuration.
//!
//! Breakpoint widths and the avatar palette size are read once at process startup, from a small
//! YAML file, and then passed into whatever needs them. Nothing in this crate reads environment
//! variables; binaries decide where the file comes from and hand the path to
//! [`resolve_config_path`].
//!
//! ```yaml
//! breakpoints:
//!   xs: 36em
//!   sm: 48em
//!   md: 62em
//!   lg: 75em
//!   xl: 88em
//! gradient_count: 30
//! ```
//!
//! Widths may be given in `em` (16px each), in `px`, or as a bare number of pixels. Every key
//! is optional and falls back to the defaults shown above.

use crate::breakpoint::BreakpointWidths;
use crate::constants::{DISPLAY_CONFIG_FILENAME, GRADIENT_COUNT, PX_PER_EM};
use crate::{DisplayError, DisplayResult};
use quill_types::Breakpoint;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Display configuration resolved at startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayConfig {
    breakpoints: BreakpointWidths,
    gradient_count: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            breakpoints: BreakpointWidths::default(),
            gradient_count: GRADIENT_COUNT,
        }
    }
}

impl DisplayConfig {
    /// Create a new `DisplayConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::InvalidConfig`] if the widths shrink from one tier to the next
    /// or `gradient_count` is zero.
    pub fn new(breakpoints: BreakpointWidths, gradient_count: u8) -> DisplayResult<Self> {
        validate_widths(&breakpoints)?;
        if gradient_count == 0 {
            return Err(DisplayError::InvalidConfig(
                "gradient_count must be at least 1".into(),
            ));
        }

        Ok(Self {
            breakpoints,
            gradient_count,
        })
    }

    /// Parse a display config from YAML text.
    ///
    /// Unknown keys are rejected. Errors name the path of the failing field (for example
    /// `breakpoints.md`).
    pub fn parse(yaml_text: &str) -> DisplayResult<Self> {
        if yaml_text.trim().is_empty() {
            return Ok(Self::default());
        }

        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        let wire = match serde_path_to_error::deserialize::<_, DisplayConfigWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(DisplayError::InvalidConfig(format!(
                    "schema mismatch at {path}: {source}"
                )));
            }
        };

        wire_to_config(wire)
    }

    /// Read and parse a display config file.
    pub fn load(path: &Path) -> DisplayResult<Self> {
        let text = std::fs::read_to_string(path).map_err(DisplayError::ConfigRead)?;
        Self::parse(&text)
    }

    /// Load from a resolved path, or fall back to defaults when there is none.
    pub fn load_or_default(path: Option<&Path>) -> DisplayResult<Self> {
        match path {
            Some(path) => {
                tracing::info!("loading display config from {}", path.display());
                Self::load(path)
            }
            None => {
                tracing::info!("no display config found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn breakpoints(&self) -> &BreakpointWidths {
        &self.breakpoints
    }

    pub fn gradient_count(&self) -> u8 {
        self.gradient_count
    }
}

/// Resolve the display config file without reading environment variables.
///
/// If `override_path` is provided it must be an existing file. Otherwise `quill.yaml` in the
/// current working directory is used when present. `Ok(None)` means defaults apply.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> DisplayResult<Option<PathBuf>> {
    if let Some(path) = override_path {
        if path.is_file() {
            return Ok(Some(path));
        }
        return Err(DisplayError::InvalidConfig(format!(
            "display config override {} is not a file",
            path.display()
        )));
    }

    let cwd_relative = PathBuf::from(DISPLAY_CONFIG_FILENAME);
    if cwd_relative.is_file() {
        return Ok(Some(cwd_relative));
    }

    Ok(None)
}

/// Parse a single width: `36em`, `576px` or `576`.
pub fn parse_width_px(text: &str) -> DisplayResult<f64> {
    let text = text.trim();
    let (number, scale) = if let Some(em) = text.strip_suffix("em") {
        (em, PX_PER_EM)
    } else if let Some(px) = text.strip_suffix("px") {
        (px, 1.0)
    } else {
        (text, 1.0)
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| DisplayError::InvalidConfig(format!("invalid width: {text:?}")))?;

    checked_width(value * scale)
        .ok_or_else(|| DisplayError::InvalidConfig(format!("invalid width: {text:?}")))
}

fn checked_width(px: f64) -> Option<f64> {
    (px.is_finite() && px >= 0.0).then_some(px)
}

fn validate_widths(widths: &BreakpointWidths) -> DisplayResult<()> {
    let mut smallest_first = Breakpoint::LARGEST_FIRST;
    smallest_first.reverse();

    for pair in smallest_first.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        let (lower_px, upper_px) = (widths.min_width_px(lower), widths.min_width_px(upper));
        if upper_px < lower_px {
            return Err(DisplayError::InvalidConfig(format!(
                "breakpoint {upper} ({upper_px}px) is narrower than {lower} ({lower_px}px)"
            )));
        }
    }

    Ok(())
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DisplayConfigWire {
    #[serde(default)]
    breakpoints: Option<BreakpointWidthsWire>,

    #[serde(default)]
    gradient_count: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BreakpointWidthsWire {
    xs: Option<WidthWire>,
    sm: Option<WidthWire>,
    md: Option<WidthWire>,
    lg: Option<WidthWire>,
    xl: Option<WidthWire>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WidthWire {
    Px(f64),
    Text(String),
}

impl WidthWire {
    fn to_px(&self) -> DisplayResult<f64> {
        match self {
            WidthWire::Px(px) => checked_width(*px)
                .ok_or_else(|| DisplayError::InvalidConfig(format!("invalid width: {px}"))),
            WidthWire::Text(text) => parse_width_px(text),
        }
    }
}

fn wire_to_config(wire: DisplayConfigWire) -> DisplayResult<DisplayConfig> {
    let mut widths = BreakpointWidths::default();
    let overrides = wire.breakpoints.unwrap_or_default();

    for (breakpoint, width) in [
        (Breakpoint::Xs, &overrides.xs),
        (Breakpoint::Sm, &overrides.sm),
        (Breakpoint::Md, &overrides.md),
        (Breakpoint::Lg, &overrides.lg),
        (Breakpoint::Xl, &overrides.xl),
    ] {
        if let Some(width) = width {
            let px = width.to_px().map_err(|e| match e {
                DisplayError::InvalidConfig(msg) => {
                    DisplayError::InvalidConfig(format!("breakpoints.{breakpoint}: {msg}"))
                }
                other => other,
            })?;
            widths.set_min_width_px(breakpoint, px);
        }
    }

    DisplayConfig::new(widths, wire.gradient_count.unwrap_or(GRADIENT_COUNT))
}
