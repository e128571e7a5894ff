//! # TabJoint Core
//!
//! Value types, error taxonomy, and unit handling shared by the joint
//! geometry and configuration crates.

pub mod error;
pub mod types;
pub mod units;

pub use error::{JointError, JointResult, ParameterError, ParameterResult};
pub use types::{left_normal, Point, Vec2};
pub use units::LengthUnit;
