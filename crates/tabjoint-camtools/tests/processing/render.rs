//! Emitted path formats for generated intersections

use tabjoint_camtools::intersection::{IntersectionMaker, IntersectionParameters, LaserSettings};
use tabjoint_camtools::render::{svg_path_data, to_gcode, to_svg};
use tabjoint_core::Point;

fn generated() -> Vec<tabjoint_camtools::PiecePath> {
    let maker = IntersectionMaker::new(IntersectionParameters {
        length: 100.0,
        tab_width: 20.0,
        thickness: 3.0,
        kerf: 0.0,
        clearance: 0.0,
        ..IntersectionParameters::default()
    })
    .unwrap();
    maker
        .generate(&IntersectionMaker::mating_pair(
            Point::origin(),
            Point::new(0.0, 20.0),
        ))
        .unwrap()
}

#[test]
fn test_svg_path_preserves_vertex_order() {
    let paths = generated();
    let d = svg_path_data(paths[0].points());

    assert!(d.starts_with("M 0, 3 L 20, 3 L 20, 0 L 40, 0 L 40, 3"));
    assert!(d.ends_with("L 100, 3"));
    assert_eq!(d.matches('L').count(), paths[0].points().len() - 1);
}

#[test]
fn test_svg_document_has_one_path_per_piece() {
    let svg = to_svg(&generated());
    assert_eq!(svg.matches("<path").count(), 2);
    assert!(svg.contains("id=\"part2\""));
}

#[test]
fn test_gcode_passes() {
    let laser = LaserSettings {
        laser_passes: 2,
        laser_power: 800,
        feed_rate: 450.0,
        z_step_down: 0.5,
    };
    let paths = generated();
    let gcode = to_gcode(&paths, &laser);

    assert!(gcode.contains("G21"));
    assert!(gcode.contains("M3 S800 ; Laser on"));
    assert!(gcode.contains("; Pass 2/2 at Z-0.50"));
    assert!(gcode.contains("G1 X20.000 Y3.000 F450"));
    assert!(gcode.trim_end().ends_with("M2 ; Program end"));
    assert!(!gcode.contains("NaN"));

    let cuts = gcode.lines().filter(|l| l.starts_with("G1")).count();
    let expected: usize = paths.iter().map(|p| (p.points().len() - 1) * 2).sum();
    assert_eq!(cuts, expected);
}
