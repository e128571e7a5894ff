//! Type definitions for the Intersection Maker

use serde::{Deserialize, Serialize};
use tabjoint_core::{LengthUnit, Point, Vec2};

use crate::edge_path::EdgeSpec;
use crate::tab_resolver::{Parity, TabResolutionInput, TabResolutionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideKind {
    /// Tabs protrude from this side
    Tab,
    /// Slots are cut into this side
    Slot,
}

impl SideKind {
    pub fn is_tab(self) -> bool {
        self == SideKind::Tab
    }

    /// 1 for a tab side, 0 for a slot side
    pub fn flag(self) -> f64 {
        if self.is_tab() {
            1.0
        } else {
            0.0
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            SideKind::Tab => SideKind::Slot,
            SideKind::Slot => SideKind::Tab,
        }
    }
}

/// Tab or slot pattern of each side of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointSides {
    pub north: SideKind,
    pub east: SideKind,
    pub south: SideKind,
    pub west: SideKind,
}

impl JointSides {
    pub fn new(north: SideKind, east: SideKind, south: SideKind, west: SideKind) -> Self {
        Self {
            north,
            east,
            south,
            west,
        }
    }

    /// Pattern of the mating piece
    pub fn complement(self) -> Self {
        Self {
            north: self.north.opposite(),
            east: self.east.opposite(),
            south: self.south.opposite(),
            west: self.west.opposite(),
        }
    }
}

/// A piece taking part in an intersection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointPiece {
    /// Root of the interface edge, placed by the caller
    pub origin: Point,
    pub sides: JointSides,
}

impl JointPiece {
    pub fn new(origin: Point, sides: JointSides) -> Self {
        Self { origin, sides }
    }

    /// Spec for the north (interface) edge, travelling along +x.
    ///
    /// The first vertex is pulled in by the west side and the last by the
    /// east side whenever those carry tabs; a tabbed north side sits one
    /// thickness below the origin line.
    pub fn interface_edge(&self, base: &EdgeSpec) -> EdgeSpec {
        let north = self.sides.north.flag();
        EdgeSpec {
            origin: self.origin,
            start_offset_sign: Vec2::new(self.sides.west.flag(), north),
            end_offset_sign: Vec2::new(-self.sides.east.flag(), north),
            axis_direction: Vec2::new(1.0, 0.0),
            is_tab: self.sides.north.is_tab(),
            ..base.clone()
        }
    }
}

/// Tab sizing constraints, in the parameter unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabConstraints {
    #[serde(default)]
    pub fixed_tab_width: Option<f64>,
    #[serde(default)]
    pub fixed_count: Option<u32>,
    #[serde(default)]
    pub parity: Parity,
    pub min_tab_width: f64,
}

impl TabConstraints {
    /// Resolver input for an edge of `length`. Edges always carry an odd
    /// number of divisions, so an unconstrained parity resolves as odd.
    pub fn resolution_input(&self, length: f64) -> TabResolutionInput {
        let parity = match self.parity {
            Parity::None => Parity::Odd,
            parity => parity,
        };
        TabResolutionInput {
            length,
            fixed_tab_width: self.fixed_tab_width,
            fixed_count: self.fixed_count,
            parity,
            min_tab_width: self.min_tab_width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserSettings {
    pub laser_passes: u32,
    pub laser_power: u32,
    /// mm/min
    pub feed_rate: f64,
    /// mm lowered between passes
    pub z_step_down: f64,
}

impl Default for LaserSettings {
    fn default() -> Self {
        Self {
            laser_passes: 3,
            laser_power: 1000,
            feed_rate: 500.0,
            z_step_down: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntersectionParameters {
    /// Unit of every length below
    pub unit: LengthUnit,
    pub length: f64,
    /// Nominal tab width
    pub tab_width: f64,
    pub equal_divisions: bool,
    /// Division count used with equal divisions
    pub division_count: Option<u32>,
    pub thickness: f64,
    pub kerf: f64,
    pub clearance: f64,
    /// Resolve the nominal tab width from constraints instead of `tab_width`
    pub tab_constraints: Option<TabConstraints>,
    pub laser: LaserSettings,
}

impl Default for IntersectionParameters {
    fn default() -> Self {
        Self {
            unit: LengthUnit::Mm,
            length: 100.0,
            tab_width: 25.0,
            equal_divisions: false,
            division_count: None,
            thickness: 10.0,
            kerf: 0.5,
            clearance: 0.01,
            tab_constraints: None,
            laser: LaserSettings::default(),
        }
    }
}

impl IntersectionParameters {
    /// Kerf minus clearance
    pub fn correction(&self) -> f64 {
        self.kerf - self.clearance
    }

    /// Copy of these parameters with every length in millimetres
    pub fn to_internal(&self) -> Self {
        let unit = self.unit;
        let mm = |value: f64| unit.to_mm(value);
        Self {
            unit: LengthUnit::Mm,
            length: mm(self.length),
            tab_width: mm(self.tab_width),
            thickness: mm(self.thickness),
            kerf: mm(self.kerf),
            clearance: mm(self.clearance),
            tab_constraints: self.tab_constraints.as_ref().map(|c| TabConstraints {
                fixed_tab_width: c.fixed_tab_width.map(mm),
                min_tab_width: mm(c.min_tab_width),
                ..c.clone()
            }),
            ..self.clone()
        }
    }

    /// True when the nominal tab width drives the division count
    pub fn uses_nominal_tab_width(&self) -> bool {
        self.tab_constraints.is_none() && !(self.equal_divisions && self.division_count.is_some())
    }

    /// Edge template carrying the shared material and fit parameters.
    ///
    /// A resolved tab layout replaces the nominal sizing: one division per
    /// resolved tab, interior divisions at the internal width and the two
    /// end divisions at the end width.
    pub fn edge_template(&self, resolution: Option<&TabResolutionResult>) -> EdgeSpec {
        let base = EdgeSpec {
            length: self.length,
            nominal_tab_width: self.tab_width,
            thickness: self.thickness,
            kerf: self.kerf,
            clearance: self.clearance,
            equal_divisions: self.equal_divisions,
            division_count: self.division_count,
            ..EdgeSpec::default()
        };
        match resolution {
            Some(r) => EdgeSpec {
                nominal_tab_width: r.internal_tab_width,
                equal_divisions: false,
                division_count: Some(r.tab_count),
                end_division_width: Some(r.end_tab_width),
                ..base
            },
            None => base,
        }
    }
}
