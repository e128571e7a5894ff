//! Tab sizing scenarios across the constraint combinations

use tabjoint_camtools::tab_resolver::{resolve_tabs, Parity, TabResolutionInput};
use tabjoint_core::JointError;

const EPS: f64 = 1e-9;

#[test]
fn test_all_free_hundred_by_twenty() {
    let result = resolve_tabs(&TabResolutionInput::new(100.0, 20.0)).unwrap();

    assert_eq!(result.tab_count, 5);
    assert_eq!(result.internal_tab_width, 20.0);
    assert!((result.end_tab_width * 2.0 + 20.0 * 3.0 - 100.0).abs() < EPS);
}

#[test]
fn test_fixed_odd_count_on_ninety() {
    let input = TabResolutionInput::new(90.0, 5.0)
        .with_fixed_count(3)
        .with_parity(Parity::Odd);
    let result = resolve_tabs(&input).unwrap();

    assert_eq!(result.tab_count, 3);
    assert!((result.internal_tab_width - 30.0).abs() < EPS);
}

#[test]
fn test_even_count_with_odd_parity_is_overconstrained() {
    let input = TabResolutionInput::new(90.0, 5.0)
        .with_fixed_count(4)
        .with_parity(Parity::Odd);
    assert!(matches!(
        resolve_tabs(&input),
        Err(JointError::OverconstrainedSpec(_))
    ));
}

#[test]
fn test_results_never_exceed_length() {
    let lengths = [37.0, 64.5, 100.0, 151.25, 300.0];
    let widths = [None, Some(12.0), Some(17.5)];
    let counts = [None, Some(1), Some(2), Some(3), Some(4)];
    let parities = [Parity::None, Parity::Odd, Parity::Even];

    for length in lengths {
        for width in widths {
            for count in counts {
                for parity in parities {
                    let input = TabResolutionInput {
                        length,
                        fixed_tab_width: width,
                        fixed_count: count,
                        parity,
                        min_tab_width: 10.0,
                    };
                    let Ok(result) = resolve_tabs(&input) else {
                        continue;
                    };

                    assert!(result.tab_count >= 1, "{:?}", input);
                    assert!(parity.accepts(result.tab_count), "{:?}", input);
                    assert!(result.internal_tab_width <= length + EPS, "{:?}", input);
                    assert!(result.end_tab_width <= length + EPS, "{:?}", input);
                    assert!(result.total_width() <= length + EPS, "{:?}", input);
                    if result.tab_count <= 1 {
                        assert!((result.end_tab_width - length).abs() < EPS);
                    } else {
                        assert!((result.total_width() - length).abs() < 1e-6, "{:?}", input);
                    }
                }
            }
        }
    }
}

#[test]
fn test_narrow_fixed_width_is_rejected_first() {
    let input = TabResolutionInput::new(0.0, 10.0).with_fixed_width(3.0);
    assert!(matches!(
        resolve_tabs(&input),
        Err(JointError::TabTooNarrow { .. })
    ));
}

#[test]
fn test_input_deserializes_with_defaults() {
    let input: TabResolutionInput =
        serde_json::from_str(r#"{ "length": 120.0, "min_tab_width": 15.0, "parity": "even" }"#)
            .unwrap();

    assert_eq!(input.parity, Parity::Even);
    assert_eq!(input.fixed_count, None);
    assert_eq!(resolve_tabs(&input).unwrap().tab_count, 8);
}
