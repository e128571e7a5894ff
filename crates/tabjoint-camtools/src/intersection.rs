//! Intersection Maker
//!
//! Builds the mating interface edges of two pieces joined at a tabbed
//! intersection, taking kerf and clearance into account. The pivot of the
//! joint is the intersection of the two pieces' mid-planes, so tabs and
//! slots are one material thickness deep.

mod types;

pub use types::*;

use rayon::prelude::*;
use tabjoint_core::{JointError, JointResult, ParameterError, ParameterResult, Point};
use tracing::{debug, info, warn};

use crate::edge_path::{EdgePath, EdgePathGenerator, EdgeSpec};
use crate::tab_resolver::{TabCountResolver, TabResolutionResult};

/// Generated interface edge of one piece
#[derive(Debug, Clone, PartialEq)]
pub struct PiecePath {
    pub piece: JointPiece,
    pub edge: EdgePath,
}

impl PiecePath {
    pub fn points(&self) -> &[Point] {
        self.edge.points()
    }
}

pub struct IntersectionMaker {
    params: IntersectionParameters,
    nominal_tab_width: f64,
    resolution: Option<TabResolutionResult>,
}

impl IntersectionMaker {
    /// Convert the parameters to millimetres, validate them, and resolve tab
    /// sizing when constraints are given. Each resolved tab becomes one
    /// division of the interface edge, so the resolved count must be odd.
    pub fn new(params: IntersectionParameters) -> JointResult<Self> {
        let params = params.to_internal();
        Self::validate_parameters(&params)?;

        let resolution = params
            .tab_constraints
            .as_ref()
            .map(|c| TabCountResolver::new(c.resolution_input(params.length)).resolve())
            .transpose()?;

        let nominal_tab_width = match &resolution {
            Some(r) => {
                debug!(
                    tab_count = r.tab_count,
                    internal = r.internal_tab_width,
                    end = r.end_tab_width,
                    "Resolved tab sizing"
                );
                if r.tab_count % 2 == 0 {
                    return Err(JointError::overconstrained(format!(
                        "{} tabs cannot be cut: an intersection edge needs an odd division count",
                        r.tab_count
                    )));
                }
                r.internal_tab_width
            }
            None => params.tab_width,
        };

        Ok(Self {
            params,
            nominal_tab_width,
            resolution,
        })
    }

    fn validate_parameters(params: &IntersectionParameters) -> ParameterResult<()> {
        let length = params.length;

        if !length.is_finite() || length <= 0.0 {
            return Err(ParameterError::InvalidDimensions(
                "Intersection length must be non zero".to_string(),
            ));
        }

        if !params.thickness.is_finite() || params.thickness <= 0.0 {
            return Err(ParameterError::InvalidDimensions(
                "Material thickness must be non zero".to_string(),
            ));
        }

        if params.uses_nominal_tab_width() {
            if params.tab_width * 3.0 > length {
                return Err(ParameterError::InvalidValue {
                    name: "tab_width".to_string(),
                    reason: "Tab size too large".to_string(),
                });
            }
            if params.tab_width < params.thickness {
                return Err(ParameterError::InvalidValue {
                    name: "tab_width".to_string(),
                    reason: "Tab size too small".to_string(),
                });
            }
        }

        if params.thickness > length / 3.0 {
            return Err(ParameterError::OutOfRange {
                name: "thickness".to_string(),
                value: params.thickness,
                min: 0.0,
                max: length / 3.0,
            });
        }

        for (name, value) in [("kerf", params.kerf), ("clearance", params.clearance)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ParameterError::OutOfRange {
                    name: name.to_string(),
                    value,
                    min: 0.0,
                    max: length / 3.0,
                });
            }
        }

        if params.correction() > length / 3.0 {
            return Err(ParameterError::OutOfRange {
                name: "kerf - clearance".to_string(),
                value: params.correction(),
                min: 0.0,
                max: length / 3.0,
            });
        }

        if params.laser.laser_passes == 0 {
            return Err(ParameterError::InvalidValue {
                name: "laser_passes".to_string(),
                reason: "At least one pass is required".to_string(),
            });
        }

        Ok(())
    }

    /// Parameters in millimetres
    pub fn params(&self) -> &IntersectionParameters {
        &self.params
    }

    /// Tab width fed to the edge generator
    pub fn nominal_tab_width(&self) -> f64 {
        self.nominal_tab_width
    }

    pub fn resolution(&self) -> Option<&TabResolutionResult> {
        self.resolution.as_ref()
    }

    /// The original two-piece intersection: piece A carries tabs on its north
    /// and south sides, piece B is its complement.
    pub fn mating_pair(origin_a: Point, origin_b: Point) -> [JointPiece; 2] {
        let sides = JointSides::new(SideKind::Tab, SideKind::Slot, SideKind::Tab, SideKind::Slot);
        [
            JointPiece::new(origin_a, sides),
            JointPiece::new(origin_b, sides.complement()),
        ]
    }

    pub fn edge_spec(&self, piece: &JointPiece) -> EdgeSpec {
        piece.interface_edge(&self.params.edge_template(self.resolution.as_ref()))
    }

    /// Generate the interface edge of every piece. Pieces are independent and
    /// generated in parallel; results keep the input order.
    pub fn generate(&self, pieces: &[JointPiece]) -> JointResult<Vec<PiecePath>> {
        let paths = pieces
            .par_iter()
            .map(|piece| {
                let edge = EdgePathGenerator::new(self.edge_spec(piece)).generate()?;
                Ok(PiecePath {
                    piece: *piece,
                    edge,
                })
            })
            .collect::<JointResult<Vec<_>>>()?;

        if paths.iter().any(|p| p.edge.is_degenerate()) {
            warn!("Intersection may be impractical");
        }
        info!(
            pieces = paths.len(),
            length = self.params.length,
            "Generated intersection edges"
        );

        Ok(paths)
    }
}
