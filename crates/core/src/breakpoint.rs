//! Responsive breakpoint resolution.
//!
//! A view asks five independent "is the viewport at least this wide" questions, one per tier,
//! and needs a single tier back. [`resolve`] answers that as a pure function of the five
//! answers: the largest tier whose answer is `true`, or `xs` when none is.
//!
//! Evaluating the questions against a real viewport is the caller's job. For callers that only
//! have a width in pixels, [`BreakpointSet::from_viewport_width`] evaluates them against
//! configured [`BreakpointWidths`]. [`BreakpointWatcher`] is a small observer for callers that
//! push a fresh set on every resize and only care about tier changes.

use crate::constants::{DEFAULT_BREAKPOINT_EMS, PX_PER_EM};
use quill_types::Breakpoint;
use serde::{Deserialize, Serialize};

/// One "viewport is at least this wide" answer per tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointSet {
    pub up_xs: bool,
    pub up_sm: bool,
    pub up_md: bool,
    pub up_lg: bool,
    pub up_xl: bool,
}

impl BreakpointSet {
    /// Evaluate every tier against a viewport width in pixels.
    pub fn from_viewport_width(width_px: f64, widths: &BreakpointWidths) -> Self {
        Self {
            up_xs: width_px >= widths.min_width_px(Breakpoint::Xs),
            up_sm: width_px >= widths.min_width_px(Breakpoint::Sm),
            up_md: width_px >= widths.min_width_px(Breakpoint::Md),
            up_lg: width_px >= widths.min_width_px(Breakpoint::Lg),
            up_xl: width_px >= widths.min_width_px(Breakpoint::Xl),
        }
    }

    /// The answer for one tier.
    pub fn is_up(&self, breakpoint: Breakpoint) -> bool {
        match breakpoint {
            Breakpoint::Xs => self.up_xs,
            Breakpoint::Sm => self.up_sm,
            Breakpoint::Md => self.up_md,
            Breakpoint::Lg => self.up_lg,
            Breakpoint::Xl => self.up_xl,
        }
    }

    /// Shorthand for [`resolve`].
    pub fn resolve(&self) -> Breakpoint {
        resolve(self)
    }
}

/// Resolve the active tier.
///
/// Checks `xl`, `lg`, `md` and `sm` in that order and returns the first that is up. Falls back
/// to `xs` whatever `up_xs` says.
pub fn resolve(set: &BreakpointSet) -> Breakpoint {
    if set.up_xl {
        Breakpoint::Xl
    } else if set.up_lg {
        Breakpoint::Lg
    } else if set.up_md {
        Breakpoint::Md
    } else if set.up_sm {
        Breakpoint::Sm
    } else {
        Breakpoint::Xs
    }
}

/// Minimum viewport width, in pixels, of each tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreakpointWidths {
    px: [f64; 5],
}

impl BreakpointWidths {
    /// Build from pixel widths ordered `xs, sm, md, lg, xl`.
    ///
    /// Ordering is not checked here; [`crate::config::DisplayConfig`] validates it for widths
    /// loaded from a file.
    pub fn from_px(px: [f64; 5]) -> Self {
        Self { px }
    }

    pub fn min_width_px(&self, breakpoint: Breakpoint) -> f64 {
        self.px[Self::index(breakpoint)]
    }

    pub(crate) fn set_min_width_px(&mut self, breakpoint: Breakpoint, px: f64) {
        self.px[Self::index(breakpoint)] = px;
    }

    /// Widths ordered `xs, sm, md, lg, xl`.
    pub fn as_px(&self) -> [f64; 5] {
        self.px
    }

    fn index(breakpoint: Breakpoint) -> usize {
        match breakpoint {
            Breakpoint::Xs => 0,
            Breakpoint::Sm => 1,
            Breakpoint::Md => 2,
            Breakpoint::Lg => 3,
            Breakpoint::Xl => 4,
        }
    }
}

impl Default for BreakpointWidths {
    fn default() -> Self {
        Self {
            px: DEFAULT_BREAKPOINT_EMS.map(|em| em * PX_PER_EM),
        }
    }
}

/// Observer that tracks the resolved tier across viewport changes.
///
/// The watcher itself never polls. Callers push a new [`BreakpointSet`] whenever a media query
/// listener fires and get `Some(tier)` back only when the tier differs from the last one seen.
#[derive(Clone, Debug, Default)]
pub struct BreakpointWatcher {
    current: Option<Breakpoint>,
}

impl BreakpointWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last resolved tier, if any set has been observed.
    pub fn current(&self) -> Option<Breakpoint> {
        self.current
    }

    /// Observe a new set of answers.
    ///
    /// Returns the new tier if it changed, otherwise `None`. The first observation always
    /// reports.
    pub fn observe(&mut self, set: BreakpointSet) -> Option<Breakpoint> {
        let next = resolve(&set);
        if self.current == Some(next) {
            return None;
        }

        tracing::debug!(from = ?self.current, to = %next, "breakpoint changed");
        self.current = Some(next);
        Some(next)
    }
}
