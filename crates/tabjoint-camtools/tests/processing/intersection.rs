//! Two-piece intersections built from operator parameters

use tabjoint_camtools::intersection::{
    IntersectionMaker, IntersectionParameters, JointPiece, JointSides, SideKind, TabConstraints,
};
use tabjoint_camtools::tab_resolver::Parity;
use tabjoint_core::{JointError, LengthUnit, Point};

fn parameters() -> IntersectionParameters {
    IntersectionParameters {
        length: 120.0,
        tab_width: 15.0,
        thickness: 3.0,
        kerf: 0.15,
        clearance: 0.05,
        ..IntersectionParameters::default()
    }
}

#[test]
fn test_mating_pieces_share_division_layout() {
    let maker = IntersectionMaker::new(parameters()).unwrap();
    let pieces = IntersectionMaker::mating_pair(Point::new(10.0, 10.0), Point::new(10.0, 40.0));
    let paths = maker.generate(&pieces).unwrap();

    let a = &paths[0].edge;
    let b = &paths[1].edge;
    assert_eq!(a.division_count(), 7);
    assert_eq!(a.division_count(), b.division_count());

    // Tabs on one piece are wider by exactly the correction the other loses.
    for (da, db) in a.divisions().iter().zip(b.divisions()) {
        assert_eq!(da.kind, db.kind);
        assert!((da.nominal_width - db.nominal_width).abs() < 1e-12);
        assert!((da.correction() + db.correction()).abs() < 1e-9);
    }
    assert!((a.divisions()[1].correction() - 0.1).abs() < 1e-9);
}

#[test]
fn test_results_follow_input_order() {
    let maker = IntersectionMaker::new(parameters()).unwrap();
    let pieces: Vec<JointPiece> = (0..16u8)
        .map(|bits| {
            let side = |bit: u8| {
                if bits & bit != 0 {
                    SideKind::Tab
                } else {
                    SideKind::Slot
                }
            };
            let sides = JointSides::new(side(8), side(4), side(2), side(1));
            JointPiece::new(Point::new(0.0, f64::from(bits) * 20.0), sides)
        })
        .collect();
    let paths = maker.generate(&pieces).unwrap();

    assert_eq!(paths.len(), pieces.len());
    for (path, piece) in paths.iter().zip(&pieces) {
        assert_eq!(&path.piece, piece);
        assert_eq!(path.points()[0].y, piece.origin.y + 3.0 * piece.sides.north.flag());
    }
}

#[test]
fn test_inch_parameters() {
    let maker = IntersectionMaker::new(IntersectionParameters {
        unit: LengthUnit::In,
        length: 4.0,
        tab_width: 0.5,
        thickness: 0.125,
        kerf: 0.0,
        clearance: 0.0,
        ..IntersectionParameters::default()
    })
    .unwrap();

    assert!((maker.params().length - 101.6).abs() < 1e-9);
    assert!((maker.nominal_tab_width() - 12.7).abs() < 1e-9);

    let paths = maker
        .generate(&IntersectionMaker::mating_pair(Point::origin(), Point::origin()))
        .unwrap();
    assert_eq!(paths[0].edge.division_count(), 7);
}

#[test]
fn test_fixed_width_constraint() {
    let maker = IntersectionMaker::new(IntersectionParameters {
        tab_constraints: Some(TabConstraints {
            fixed_tab_width: Some(20.0),
            fixed_count: None,
            parity: Parity::None,
            min_tab_width: 8.0,
        }),
        ..parameters()
    })
    .unwrap();

    // Six tabs fit; the edge needs an odd count, so five are cut.
    let resolution = maker.resolution().unwrap();
    assert_eq!(resolution.tab_count, 5);
    assert_eq!(resolution.end_tab_width, 30.0);
    assert_eq!(maker.nominal_tab_width(), 20.0);

    let paths = maker
        .generate(&IntersectionMaker::mating_pair(Point::origin(), Point::new(0.0, 40.0)))
        .unwrap();
    for path in &paths {
        assert_eq!(path.edge.division_count() as u32, resolution.tab_count);
        assert_eq!(path.edge.divisions()[0].nominal_width, 30.0);
        assert_eq!(path.edge.divisions()[2].nominal_width, 20.0);
    }
}

#[test]
fn test_even_tab_count_cannot_be_cut() {
    let result = IntersectionMaker::new(IntersectionParameters {
        length: 100.0,
        tab_constraints: Some(TabConstraints {
            fixed_tab_width: None,
            fixed_count: Some(4),
            parity: Parity::Even,
            min_tab_width: 5.0,
        }),
        ..parameters()
    });
    assert!(matches!(result, Err(JointError::OverconstrainedSpec(_))));
}

#[test]
fn test_fixed_width_below_minimum_fails() {
    let result = IntersectionMaker::new(IntersectionParameters {
        tab_constraints: Some(TabConstraints {
            fixed_tab_width: Some(4.0),
            fixed_count: None,
            parity: Parity::None,
            min_tab_width: 8.0,
        }),
        ..parameters()
    });
    assert!(matches!(result, Err(JointError::TabTooNarrow { .. })));
}

#[test]
fn test_parameters_deserialize_with_defaults() {
    let params: IntersectionParameters = serde_json::from_str(
        r#"{ "unit": "cm", "length": 20.0, "tab_width": 3.0, "thickness": 0.4 }"#,
    )
    .unwrap();

    assert_eq!(params.unit, LengthUnit::Cm);
    assert_eq!(params.kerf, 0.5);
    assert_eq!(params.laser.laser_passes, 3);
    assert!(IntersectionMaker::new(params).is_ok());
}
