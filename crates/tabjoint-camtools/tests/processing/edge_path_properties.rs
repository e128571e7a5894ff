//! Invariants of generated edges over randomised inputs

use proptest::prelude::*;
use tabjoint_camtools::edge_path::{generate_edge, DivisionKind, EdgeSpec};
use tabjoint_core::{JointError, Point, Vec2};

fn edge_spec() -> impl Strategy<Value = EdgeSpec> {
    let material = (
        10.0f64..500.0,
        0.05f64..0.6,
        0.5f64..8.0,
        0.0f64..0.5,
        0.0f64..0.2,
    );
    let layout = (
        any::<bool>(),
        any::<bool>(),
        prop::option::of(1u32..40),
        (-50.0f64..50.0, -50.0f64..50.0),
        0usize..4,
    );
    (material, layout).prop_map(
        |((length, tab_ratio, thickness, kerf, clearance), (is_tab, equal, count, origin, dir))| {
            let axis_direction = match dir {
                0 => Vec2::new(1.0, 0.0),
                1 => Vec2::new(0.0, 1.0),
                2 => Vec2::new(-1.0, 0.0),
                _ => Vec2::new(0.0, -1.0),
            };
            EdgeSpec {
                length,
                nominal_tab_width: length * tab_ratio,
                thickness,
                kerf,
                clearance,
                is_tab,
                equal_divisions: equal,
                division_count: count,
                end_division_width: None,
                origin: Point::new(origin.0, origin.1),
                start_offset_sign: Vec2::zeros(),
                end_offset_sign: Vec2::zeros(),
                axis_direction,
            }
        },
    )
}

proptest! {
    #[test]
    fn division_count_is_always_odd(spec in edge_spec()) {
        let path = generate_edge(&spec).unwrap();
        prop_assert_eq!(path.division_count() % 2, 1);
        prop_assert_eq!(path.points().len(), 2 * path.division_count());
    }

    #[test]
    fn divisions_cover_the_whole_length(spec in edge_spec()) {
        let path = generate_edge(&spec).unwrap();
        let tolerance = 1e-9 * spec.length.max(1.0);
        prop_assert!((path.travelled_length() - spec.length).abs() < tolerance);

        // The polyline's extent along the axis matches the divisions as well.
        let points = path.points();
        let first = points[0];
        let last = points[points.len() - 1];
        let along = (last - first).dot(&spec.axis_direction);
        prop_assert!((along - spec.length).abs() < tolerance);
    }

    #[test]
    fn divisions_alternate_starting_with_a_gap(spec in edge_spec()) {
        let path = generate_edge(&spec).unwrap();
        for (i, d) in path.divisions().iter().enumerate() {
            let expected = if i % 2 == 0 { DivisionKind::Gap } else { DivisionKind::Tab };
            prop_assert_eq!(d.kind, expected);
        }
    }

    #[test]
    fn mating_corrections_cancel(spec in edge_spec()) {
        let tab = generate_edge(&EdgeSpec { is_tab: true, ..spec.clone() }).unwrap();
        let slot = generate_edge(&EdgeSpec { is_tab: false, ..spec.clone() }).unwrap();

        prop_assert_eq!(tab.division_count(), slot.division_count());
        for (a, b) in tab.divisions().iter().zip(slot.divisions()) {
            prop_assert!((a.correction() + b.correction()).abs() < 1e-9 * spec.length.max(1.0));
        }
    }

    #[test]
    fn generation_is_idempotent(spec in edge_spec()) {
        let first = generate_edge(&spec).unwrap();
        let second = generate_edge(&spec).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn lateral_steps_are_one_thickness(spec in edge_spec()) {
        let path = generate_edge(&spec).unwrap();
        let points = path.points();
        // Vertices 1..n-1 come in pairs: arrive at a transition, then step sideways.
        for pair in points[1..points.len() - 1].chunks(2) {
            let step = pair[0].distance_to(&pair[1]);
            prop_assert!((step - spec.thickness).abs() < 1e-9 * spec.thickness.max(1.0));
        }
    }
}

#[test]
fn test_zero_length_is_invalid_geometry() {
    let spec = EdgeSpec {
        length: 0.0,
        ..EdgeSpec::default()
    };
    assert!(matches!(
        generate_edge(&spec),
        Err(JointError::InvalidGeometry(_))
    ));
}

#[test]
fn test_even_floor_is_decremented() {
    for length in [40.0, 100.0, 250.0] {
        let spec = EdgeSpec {
            length,
            nominal_tab_width: length / 4.0,
            thickness: 1.0,
            ..EdgeSpec::default()
        };
        assert_eq!(generate_edge(&spec).unwrap().division_count(), 3);
    }
}

#[test]
fn test_odd_floor_is_kept() {
    let spec = EdgeSpec {
        length: 100.0,
        nominal_tab_width: 20.0,
        thickness: 1.0,
        ..EdgeSpec::default()
    };
    assert_eq!(generate_edge(&spec).unwrap().division_count(), 5);
}
