//! Edge Path Generator
//!
//! Builds the zig-zag outline of one tabbed edge. The edge length is split
//! into an odd number of alternating gap/tab divisions, each corrected for
//! kerf minus clearance, and every transition steps sideways by the material
//! thickness so that tabs and slots reach the mid-plane of the mating part.

use tabjoint_core::{left_normal, JointError, JointResult, Point, Vec2};
use thiserror::Error;
use tracing::{debug, warn};

/// Parameters for one tabbed edge
#[derive(Debug, Clone)]
pub struct EdgeSpec {
    /// Total edge length to divide (mm)
    pub length: f64,
    /// Target tab width (mm). Unused when equal divisions have an explicit count.
    pub nominal_tab_width: f64,
    /// Material thickness (mm)
    pub thickness: f64,
    /// Width removed by the cutting beam (mm)
    pub kerf: f64,
    /// Extra fit allowance requested by the operator (mm)
    pub clearance: f64,
    /// True for the protruding side, false for the receiving side
    pub is_tab: bool,
    /// Split the length into equal divisions instead of using the nominal tab width
    pub equal_divisions: bool,
    /// Division count used with equal divisions or an end division width.
    /// Falls back to length / nominal width.
    pub division_count: Option<u32>,
    /// Nominal width of the first and last divisions. With an explicit
    /// `division_count`, every interior division is `nominal_tab_width` wide.
    pub end_division_width: Option<f64>,
    /// Root point of the edge
    pub origin: Point,
    /// Offset signs of the first vertex, in multiples of thickness
    pub start_offset_sign: Vec2,
    /// Offset signs of the last vertex, in multiples of thickness
    pub end_offset_sign: Vec2,
    /// Direction of travel along the edge. Lateral steps follow its left
    /// normal, so on a +y edge the tab side steps towards +x.
    pub axis_direction: Vec2,
}

impl Default for EdgeSpec {
    fn default() -> Self {
        Self {
            length: 100.0,
            nominal_tab_width: 25.0,
            thickness: 10.0,
            kerf: 0.5,
            clearance: 0.01,
            is_tab: true,
            equal_divisions: false,
            division_count: None,
            end_division_width: None,
            origin: Point::origin(),
            start_offset_sign: Vec2::zeros(),
            end_offset_sign: Vec2::zeros(),
            axis_direction: Vec2::new(1.0, 0.0),
        }
    }
}

impl EdgeSpec {
    /// Kerf correction applied to every division: kerf minus clearance
    pub fn correction(&self) -> f64 {
        self.kerf - self.clearance
    }

    /// Same edge seen from the mating part
    pub fn mating(&self) -> Self {
        Self {
            is_tab: !self.is_tab,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivisionKind {
    Gap,
    Tab,
}

/// One corrected division along the edge, in travel order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Division {
    pub kind: DivisionKind,
    /// Width before kerf correction
    pub nominal_width: f64,
    /// Width actually travelled along the axis
    pub width: f64,
}

impl Division {
    /// Signed kerf correction carried by this division
    pub fn correction(&self) -> f64 {
        self.width - self.nominal_width
    }
}

/// Non-fatal geometric degeneracy. The path is still produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EdgeWarning {
    /// The first corrected division is shorter than the material thickness.
    #[error("first segment {width:.3} is shorter than material thickness {thickness:.3}")]
    FirstSegmentTooShort { width: f64, thickness: f64 },

    /// Kerf correction consumed a whole division.
    #[error("division {index} has non-positive width {width:.3}")]
    NonPositiveDivision { index: usize, width: f64 },
}

/// Generated edge: polyline vertices plus the divisions that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    points: Vec<Point>,
    divisions: Vec<Division>,
    warnings: Vec<EdgeWarning>,
}

impl EdgePath {
    /// Polyline vertices in drawing order. Every vertex is a sharp corner.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    pub fn division_count(&self) -> usize {
        self.divisions.len()
    }

    pub fn warnings(&self) -> &[EdgeWarning] {
        &self.warnings
    }

    pub fn is_degenerate(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Sum of the corrected division widths along the travel axis
    pub fn travelled_length(&self) -> f64 {
        self.divisions.iter().map(|d| d.width).sum()
    }
}

/// Upper bound on divisions along one edge
pub const MAX_DIVISIONS: u32 = 100_000;

/// Generator for a single tabbed edge
pub struct EdgePathGenerator {
    spec: EdgeSpec,
}

impl EdgePathGenerator {
    pub fn new(spec: EdgeSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &EdgeSpec {
        &self.spec
    }

    fn validate(&self) -> JointResult<Vec2> {
        let s = &self.spec;

        let scalars = [
            ("length", s.length),
            ("nominal tab width", s.nominal_tab_width),
            ("thickness", s.thickness),
            ("kerf", s.kerf),
            ("clearance", s.clearance),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(JointError::invalid_geometry(format!(
                    "{} must be finite",
                    name
                )));
            }
        }
        if let Some(end) = s.end_division_width {
            if !end.is_finite() || end <= 0.0 {
                return Err(JointError::invalid_geometry(format!(
                    "end division width must be positive, got {}",
                    end
                )));
            }
            if s.division_count.is_none() {
                return Err(JointError::invalid_geometry(
                    "an end division width needs an explicit division count",
                ));
            }
        }
        if !s.origin.is_finite() {
            return Err(JointError::invalid_geometry("origin must be finite"));
        }

        if s.length <= 0.0 {
            return Err(JointError::invalid_geometry(format!(
                "edge length must be positive, got {}",
                s.length
            )));
        }
        if s.thickness <= 0.0 {
            return Err(JointError::invalid_geometry(format!(
                "material thickness must be positive, got {}",
                s.thickness
            )));
        }
        if s.kerf < 0.0 || s.clearance < 0.0 {
            return Err(JointError::invalid_geometry(
                "kerf and clearance must not be negative",
            ));
        }

        let norm = s.axis_direction.norm();
        if !norm.is_finite() || norm < f64::EPSILON {
            return Err(JointError::invalid_geometry(
                "axis direction must be a non-zero vector",
            ));
        }
        Ok(s.axis_direction / norm)
    }

    /// Number of divisions along the edge, always odd
    pub fn division_count(&self) -> JointResult<u32> {
        let s = &self.spec;
        let explicit = s.equal_divisions || s.end_division_width.is_some();

        let raw = match s.division_count {
            Some(count) if explicit => count,
            _ => {
                if s.nominal_tab_width <= 0.0 {
                    return Err(JointError::invalid_geometry(format!(
                        "nominal tab width must be positive, got {}",
                        s.nominal_tab_width
                    )));
                }
                let quotient = (s.length / s.nominal_tab_width).floor();
                if quotient > f64::from(MAX_DIVISIONS) {
                    return Err(JointError::invalid_geometry(format!(
                        "tab width {} yields more than {} divisions for length {}",
                        s.nominal_tab_width, MAX_DIVISIONS, s.length
                    )));
                }
                quotient as u32
            }
        };

        if raw > MAX_DIVISIONS {
            return Err(JointError::invalid_geometry(format!(
                "{} divisions exceed the limit of {}",
                raw, MAX_DIVISIONS
            )));
        }
        if s.end_division_width.is_some() && raw % 2 == 0 {
            return Err(JointError::invalid_geometry(format!(
                "{} divisions with fixed end widths cannot be made odd",
                raw
            )));
        }

        let divs = if raw % 2 == 0 { raw.saturating_sub(1) } else { raw };
        if divs < 1 {
            return Err(JointError::invalid_geometry(format!(
                "edge length {} leaves no room for a single division",
                s.length
            )));
        }
        Ok(divs)
    }

    /// Generate the edge polyline
    pub fn generate(&self) -> JointResult<EdgePath> {
        let direction = self.validate()?;
        let divs = self.division_count()?;
        let s = &self.spec;
        let t = s.thickness;

        let tabs = (divs - 1) / 2;
        let (nominal_gap, nominal_tab, nominal_end) = match s.end_division_width {
            Some(end) => (s.nominal_tab_width, s.nominal_tab_width, end),
            None if s.equal_divisions => {
                let width = s.length / f64::from(divs);
                (width, width, width)
            }
            None => {
                let gap = (s.length - f64::from(tabs) * s.nominal_tab_width)
                    / f64::from(divs - tabs);
                (gap, s.nominal_tab_width, gap)
            }
        };

        // Tab side grows tabs and shrinks gaps; the slot side does the opposite.
        // Half the correction on the first gap keeps the total length exact.
        let correction = sign_correction(s);
        let mut first = correction / 2.0;

        debug!(
            length = s.length,
            divisions = divs,
            nominal_gap,
            nominal_tab,
            nominal_end,
            is_tab = s.is_tab,
            "Generating tabbed edge"
        );

        let normal = left_normal(&direction);
        let start = s.origin + s.start_offset_sign * t;
        // The walk starts level with the origin along the axis but keeps the
        // sideways part of the start offset.
        let along = s.start_offset_sign.dot(&direction);
        let mut cursor = s.origin + (s.start_offset_sign - direction * along) * t;

        let mut points = Vec::with_capacity(2 * divs as usize);
        let mut divisions = Vec::with_capacity(divs as usize);
        points.push(start);

        let mut lateral = if s.is_tab { -t } else { t };
        let mut travelled = 0.0;

        for n in 1..divs {
            let division = if n % 2 == 1 {
                let nominal_width = if n == 1 { nominal_end } else { nominal_gap };
                Division {
                    kind: DivisionKind::Gap,
                    nominal_width,
                    width: nominal_width - correction + first,
                }
            } else {
                Division {
                    kind: DivisionKind::Tab,
                    nominal_width: nominal_tab,
                    width: nominal_tab + correction,
                }
            };
            first = 0.0;

            cursor = cursor + direction * division.width;
            points.push(cursor);
            cursor = cursor + normal * lateral;
            points.push(cursor);

            lateral = -lateral;
            travelled += division.width;
            divisions.push(division);
        }

        let end = s.origin + s.end_offset_sign * t + direction * s.length;
        points.push(end);
        divisions.push(Division {
            kind: DivisionKind::Gap,
            nominal_width: nominal_end,
            width: s.length - travelled,
        });

        // Along-axis run from the offset start vertex to the first corner.
        let first_segment = (points[1] - points[0]).dot(&direction);
        let warnings = Self::inspect(first_segment, &divisions, t);
        for warning in &warnings {
            warn!("Tabbed edge may be impractical: {}", warning);
        }

        Ok(EdgePath {
            points,
            divisions,
            warnings,
        })
    }

    fn inspect(first_segment: f64, divisions: &[Division], thickness: f64) -> Vec<EdgeWarning> {
        let mut warnings = Vec::new();

        if first_segment < thickness {
            warnings.push(EdgeWarning::FirstSegmentTooShort {
                width: first_segment,
                thickness,
            });
        }

        for (index, division) in divisions.iter().enumerate() {
            if division.width <= 0.0 {
                warnings.push(EdgeWarning::NonPositiveDivision {
                    index,
                    width: division.width,
                });
            }
        }

        warnings
    }
}

/// Signed kerf correction: positive on the tab side, negative on the slot side
fn sign_correction(spec: &EdgeSpec) -> f64 {
    if spec.is_tab {
        spec.correction()
    } else {
        -spec.correction()
    }
}

/// Generate one edge from its spec
pub fn generate_edge(spec: &EdgeSpec) -> JointResult<EdgePath> {
    EdgePathGenerator::new(spec.clone()).generate()
}
