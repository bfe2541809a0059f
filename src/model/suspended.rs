//! Suspended floor over a ventilated under-floor space.

use crate::input::{CommonInput, FloorLayerInput};
use crate::model::combined::{CombinedMethodLayer, CombinedMethodModel};
use crate::model::INTERNAL_SURFACE_RESISTANCE;
use crate::tables;
use crate::warnings::Warned;

/// U-value of a suspended floor.
///
/// The uninsulated value comes from the standard table, indexed by the
/// ventilation opening ratio (combined ventilation area per metre of
/// under-floor perimeter) and the perimeter/area ratio. When construction
/// layers are supplied, the Combined Method resistance replaces the
/// table's assumed deck:
///
/// `U = 1 / (1/U₀ − 0.2 + R_c − 0.17 − 0.17)`
///
/// where both surface resistances of the Combined Method network are 0.17.
/// The correction deliberately does not telescope: the Combined Method's
/// upper bound does not distribute linearly over the surface resistances
/// once any layer is bridged, so the 0.2 deck allowance and the two 0.17
/// surface terms must be removed separately.
pub(crate) fn u_value(
    common: CommonInput,
    ventilation_combined_area: f64,
    under_floor_space_perimeter: f64,
    layers: &[FloorLayerInput],
) -> Warned<f64> {
    let perimeter_area_ratio = under_floor_space_perimeter / common.area;
    let ventilation_ratio = ventilation_combined_area / under_floor_space_perimeter;

    let uninsulated =
        tables::suspended_floor_uninsulated_u_value(ventilation_ratio, perimeter_area_ratio);

    if layers.is_empty() {
        return uninsulated;
    }

    let mut network = Vec::with_capacity(layers.len() + 2);
    network.push(CombinedMethodLayer::whole(
        "internal surface",
        INTERNAL_SURFACE_RESISTANCE,
    ));
    network.extend(layers.iter().map(FloorLayerInput::as_combined_method_layer));
    network.push(CombinedMethodLayer::whole(
        "external surface",
        INTERNAL_SURFACE_RESISTANCE,
    ));
    let construction = CombinedMethodModel::new(network);

    uninsulated.map(|u0| {
        1.0 / (1.0 / u0 - 0.2 + construction.resistance()
            - INTERNAL_SURFACE_RESISTANCE
            - INTERNAL_SURFACE_RESISTANCE)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{FloorMaterial, MaterialMechanism};

    const EPSILON: f64 = 1e-4;

    fn deck_layer() -> FloorLayerInput {
        FloorLayerInput::new(
            Some(0.1),
            FloorMaterial {
                name: "chipboard".to_string(),
                mechanism: MaterialMechanism::Conductivity { conductivity: 1.0 },
            },
            None,
        )
        .unwrap()
    }

    #[test]
    fn matches_the_worked_example() {
        let result = u_value(CommonInput { area: 40.0 }, 0.04, 20.0, &[deck_layer()]);
        assert!((result.value() - 0.7219).abs() < EPSILON);
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn no_layers_uses_the_table_value_directly() {
        let result = u_value(CommonInput { area: 40.0 }, 0.04, 20.0, &[]);
        // Interpolated between 0.66 and 0.70 at a third of the way.
        assert!((result.value() - (0.66 + 0.04 / 3.0)).abs() < EPSILON);
    }

    #[test]
    fn extreme_ventilation_ratio_is_clamped_with_a_warning() {
        let result = u_value(CommonInput { area: 40.0 }, 1.0, 20.0, &[]);
        assert_eq!(result.warnings().len(), 1);
        assert_eq!(
            result.warnings()[0].path().to_string(),
            "ventilation-ratio"
        );
    }
}
