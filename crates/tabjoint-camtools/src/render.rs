//! Path emitters for generated edges.
//!
//! Vertices are written exactly in the order given. Each vertex is a sharp
//! corner of the joint, so nothing is merged, dropped, or smoothed.

use tabjoint_core::Point;

use crate::intersection::{LaserSettings, PiecePath};

/// SVG path data: `M x, y L x, y ...`
pub fn svg_path_data(points: &[Point]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let command = if i == 0 { 'M' } else { 'L' };
            format!("{} {}, {}", command, p.x, p.y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Standalone SVG document with one stroked path per piece
pub fn to_svg(paths: &[PiecePath]) -> String {
    let mut svg = String::new();
    svg.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">\n");
    for (i, path) in paths.iter().enumerate() {
        svg.push_str(&format!(
            "  <path id=\"part{}\" d=\"{}\" style=\"stroke:#000000;fill:none\"/>\n",
            i + 1,
            svg_path_data(path.points())
        ));
    }
    svg.push_str("</svg>\n");
    svg
}

/// Laser G-code cutting every piece edge with the configured passes
pub fn to_gcode(paths: &[PiecePath], laser: &LaserSettings) -> String {
    let mut gcode = String::new();

    gcode.push_str("; Tabbed Intersection G-code\n");
    gcode.push_str("G21 ; Set units to millimeters\n");
    gcode.push_str("G90 ; Absolute positioning\n");

    for (i, path) in paths.iter().enumerate() {
        let points = path.points();
        gcode.push_str(&format!(
            "; Part {}: {} edge\n",
            i + 1,
            if path.piece.sides.north.is_tab() {
                "tab"
            } else {
                "slot"
            }
        ));

        let Some(first) = points.first() else {
            continue;
        };
        gcode.push_str(&format!(
            "G0 X{:.3} Y{:.3} ; Rapid to start\n",
            first.x, first.y
        ));

        for pass_num in 1..=laser.laser_passes {
            let z_depth = -(f64::from(pass_num) - 1.0) * laser.z_step_down;
            gcode.push_str(&format!(
                "; Pass {}/{} at Z{:.2}\n",
                pass_num, laser.laser_passes, z_depth
            ));

            if pass_num > 1 {
                gcode.push_str(&format!("G0 Z{:.2} ; Move to pass depth\n", z_depth));
            }

            gcode.push_str(&format!("M3 S{} ; Laser on\n", laser.laser_power));

            for (idx, point) in points.iter().skip(1).enumerate() {
                if idx == 0 {
                    gcode.push_str(&format!(
                        "G1 X{:.3} Y{:.3} F{:.0}\n",
                        point.x, point.y, laser.feed_rate
                    ));
                } else {
                    gcode.push_str(&format!("G1 X{:.3} Y{:.3}\n", point.x, point.y));
                }
            }

            gcode.push_str("M5 ; Laser off\n");

            if pass_num < laser.laser_passes {
                gcode.push_str(&format!(
                    "G0 X{:.3} Y{:.3} ; Return to start\n",
                    first.x, first.y
                ));
            }
        }

        gcode.push('\n');
    }

    gcode.push_str("M5 ; Ensure laser off\n");
    gcode.push_str("G0 Z10.0 ; Move to safe height\n");
    gcode.push_str("G0 X0 Y0 ; Return to origin\n");
    gcode.push_str("M2 ; Program end\n");

    gcode
}
