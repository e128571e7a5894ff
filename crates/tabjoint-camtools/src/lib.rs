//! # TabJoint CAM Tools
//!
//! Geometry for laser-cut tab-and-slot intersections.
//!
//! - **Edge Path Generator**: odd division count, kerf/clearance correction,
//!   and the zig-zag vertex sequence of one tabbed edge
//! - **Tab Count Resolver**: tab count and widths from optional width, count,
//!   and parity constraints
//! - **Intersection Maker**: mating interface edges of two pieces
//! - **Render**: SVG path data and laser G-code for generated edges

pub mod edge_path;
pub mod intersection;
pub mod render;
pub mod tab_resolver;

pub use edge_path::{
    generate_edge, Division, DivisionKind, EdgePath, EdgePathGenerator, EdgeSpec, EdgeWarning,
};
pub use intersection::{
    IntersectionMaker, IntersectionParameters, JointPiece, JointSides, LaserSettings, PiecePath,
    SideKind, TabConstraints,
};
pub use tab_resolver::{
    resolve_tabs, Parity, TabCountResolver, TabResolutionInput, TabResolutionResult,
};
