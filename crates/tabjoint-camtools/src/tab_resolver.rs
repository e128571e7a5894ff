//! Tab Count Resolver
//!
//! Decides how many tabs of what width fit an intersection length from an
//! optional fixed width, an optional fixed count, and a parity requirement.
//! Interior tabs share one width; the two end tabs absorb whatever length is
//! left over, split evenly.

use serde::{Deserialize, Serialize};
use tabjoint_core::{JointError, JointResult};
use tracing::{debug, warn};

const TOLERANCE: f64 = 1e-9;

/// Required parity of the tab count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
}

impl Parity {
    pub fn accepts(self, count: u32) -> bool {
        match self {
            Parity::None => true,
            Parity::Odd => count % 2 == 1,
            Parity::Even => count % 2 == 0,
        }
    }
}

/// Constraints for tab sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabResolutionInput {
    /// Intersection length to fill (mm)
    pub length: f64,
    /// Tab width to use as-is
    #[serde(default)]
    pub fixed_tab_width: Option<f64>,
    /// Tab count to use as-is
    #[serde(default)]
    pub fixed_count: Option<u32>,
    #[serde(default)]
    pub parity: Parity,
    /// Narrowest tab considered manufacturable (mm)
    pub min_tab_width: f64,
}

impl TabResolutionInput {
    pub fn new(length: f64, min_tab_width: f64) -> Self {
        Self {
            length,
            fixed_tab_width: None,
            fixed_count: None,
            parity: Parity::None,
            min_tab_width,
        }
    }

    pub fn with_fixed_width(mut self, width: f64) -> Self {
        self.fixed_tab_width = Some(width);
        self
    }

    pub fn with_fixed_count(mut self, count: u32) -> Self {
        self.fixed_count = Some(count);
        self
    }

    pub fn with_parity(mut self, parity: Parity) -> Self {
        self.parity = parity;
        self
    }
}

/// Authoritative tab count and widths for an intersection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TabResolutionResult {
    pub tab_count: u32,
    /// Width of every tab except the two at the ends
    pub internal_tab_width: f64,
    /// Width of each end tab. Equals the full length when there is one tab.
    pub end_tab_width: f64,
}

impl TabResolutionResult {
    /// Length covered by all tabs together
    pub fn total_width(&self) -> f64 {
        if self.tab_count <= 1 {
            self.end_tab_width
        } else {
            self.end_tab_width * 2.0 + self.internal_tab_width * f64::from(self.tab_count - 2)
        }
    }
}

/// Resolves tab sizing constraints into a tab count and widths
pub struct TabCountResolver {
    input: TabResolutionInput,
}

impl TabCountResolver {
    pub fn new(input: TabResolutionInput) -> Self {
        Self { input }
    }

    fn validate(&self) -> JointResult<()> {
        let i = &self.input;

        if !i.length.is_finite() || i.length <= 0.0 {
            return Err(JointError::invalid_geometry(format!(
                "intersection length must be positive, got {}",
                i.length
            )));
        }
        if !i.min_tab_width.is_finite() || i.min_tab_width <= 0.0 {
            return Err(JointError::invalid_geometry(format!(
                "minimum tab width must be positive, got {}",
                i.min_tab_width
            )));
        }
        if let Some(width) = i.fixed_tab_width {
            if !width.is_finite() || width <= 0.0 {
                return Err(JointError::invalid_geometry(format!(
                    "fixed tab width must be positive, got {}",
                    width
                )));
            }
        }
        if i.fixed_count == Some(0) {
            return Err(JointError::invalid_geometry(
                "fixed tab count must be at least one",
            ));
        }
        Ok(())
    }

    /// Whole tabs of `width` that fit the length, adjusted down to `parity`
    fn fitting_count(&self, width: f64, parity: Parity) -> JointResult<u32> {
        let quotient = (self.input.length / width + TOLERANCE).floor();
        if quotient > f64::from(u32::MAX) {
            return Err(JointError::overconstrained(format!(
                "tab width {} yields too many tabs for length {}",
                width, self.input.length
            )));
        }
        let mut count = quotient as u32;
        if !parity.accepts(count) {
            count = count.saturating_sub(1);
        }
        if count == 0 {
            return Err(JointError::overconstrained(format!(
                "no tab of width {} fits length {}",
                width, self.input.length
            )));
        }
        Ok(count)
    }

    /// End tab width that absorbs the remainder around `count - 2` interior tabs
    fn end_width(&self, count: u32, internal: f64) -> f64 {
        if count <= 1 {
            self.input.length
        } else {
            (self.input.length - internal * f64::from(count - 2)) / 2.0
        }
    }

    fn check_parity(&self, count: u32) -> JointResult<()> {
        if self.input.parity.accepts(count) {
            Ok(())
        } else {
            Err(JointError::overconstrained(format!(
                "tab count {} does not satisfy {:?} parity",
                count, self.input.parity
            )))
        }
    }

    pub fn resolve(&self) -> JointResult<TabResolutionResult> {
        let i = &self.input;

        if let Some(width) = i.fixed_tab_width {
            if width < i.min_tab_width {
                return Err(JointError::TabTooNarrow {
                    width,
                    min: i.min_tab_width,
                });
            }
        }
        self.validate()?;

        let length = i.length;
        let parity_set = i.parity != Parity::None;

        let (tab_count, internal_tab_width) = match (i.fixed_tab_width, i.fixed_count) {
            (None, None) => {
                debug!(length, parity = ?i.parity, "Deriving tab count from minimum width");
                let count = self.fitting_count(i.min_tab_width, i.parity)?;
                (count, i.min_tab_width)
            }
            (None, Some(count)) => {
                if parity_set {
                    self.check_parity(count)?;
                }
                debug!(length, count, "Dividing length by fixed tab count");
                (count, length / f64::from(count))
            }
            (Some(width), None) => {
                debug!(length, width, parity = ?i.parity, "Deriving tab count from fixed width");
                let count = self.fitting_count(width, i.parity)?;
                (count, width)
            }
            (Some(width), Some(count)) => {
                if parity_set {
                    self.check_parity(count)?;
                    // Width stays authoritative; the minimum-width count is only cross-checked.
                    let max_count = (length / i.min_tab_width + TOLERANCE).floor();
                    if f64::from(count) > max_count {
                        warn!(
                            count,
                            max_count, "Fixed tab count exceeds what the minimum tab width allows"
                        );
                    }
                }
                if width * f64::from(count) > length + TOLERANCE {
                    return Err(JointError::overconstrained(format!(
                        "{} tabs of width {} exceed the intersection length {}",
                        count, width, length
                    )));
                }
                debug!(length, width, count, "Using fixed tab width and count");
                (count, width)
            }
        };

        let end_tab_width = self.end_width(tab_count, internal_tab_width);
        let internal_tab_width = if tab_count <= 1 {
            end_tab_width
        } else {
            internal_tab_width
        };

        let result = TabResolutionResult {
            tab_count,
            internal_tab_width,
            end_tab_width,
        };
        self.check_fit(&result)?;
        Ok(result)
    }

    fn check_fit(&self, result: &TabResolutionResult) -> JointResult<()> {
        let length = self.input.length;
        let limit = length + TOLERANCE * length.max(1.0);

        if result.internal_tab_width > limit
            || result.end_tab_width > limit
            || result.end_tab_width <= 0.0
            || result.total_width() > limit
        {
            return Err(JointError::overconstrained(format!(
                "tabs add up to more than the intersection length {} ({:?})",
                length, result
            )));
        }
        Ok(())
    }
}

/// Resolve tab sizing constraints
pub fn resolve_tabs(input: &TabResolutionInput) -> JointResult<TabResolutionResult> {
    TabCountResolver::new(input.clone()).resolve()
}
