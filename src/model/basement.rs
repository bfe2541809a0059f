//! Heated basement floor.

use crate::input::{insulation_resistance, CommonInput, FloorInsulation};
use crate::tables;
use crate::warnings::Warned;

/// U-value of a heated basement floor: the uninsulated table value with any
/// floor insulation added in series.
pub(crate) fn u_value(
    common: CommonInput,
    exposed_perimeter: f64,
    depth: f64,
    insulation: Option<&FloorInsulation>,
) -> Warned<f64> {
    let perimeter_area_ratio = exposed_perimeter / common.area;
    let uninsulated = tables::basement_floor_uninsulated_u_value(depth, perimeter_area_ratio);
    let resistance = insulation_resistance(insulation);
    uninsulated.map(|u0| 1.0 / (1.0 / u0 + resistance))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn uninsulated_basement_reads_straight_from_the_table() {
        let result = u_value(CommonInput { area: 40.0 }, 20.0, 1.0, None);
        // P/A 0.5, depth 1.0.
        assert!((result.value() - 0.70).abs() < EPSILON);
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn insulation_adds_in_series() {
        let insulation = FloorInsulation::Resistance { resistance: 2.0 };
        let result = u_value(CommonInput { area: 40.0 }, 20.0, 1.0, Some(&insulation));
        assert!((result.value() - 1.0 / (1.0 / 0.70 + 2.0)).abs() < EPSILON);
    }

    #[test]
    fn shallow_out_of_table_depth_is_clamped() {
        let result = u_value(CommonInput { area: 40.0 }, 20.0, 0.2, None);
        assert_eq!(result.warnings().len(), 1);
        assert_eq!(result.warnings()[0].path().to_string(), "depth");
    }
}
