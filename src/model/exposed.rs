//! Floor exposed on its underside to outside air or an unheated space.

use crate::input::{ExposedTo, FloorLayerInput};
use crate::model::combined::{CombinedMethodLayer, CombinedMethodModel};
use crate::model::{EXTERNAL_SURFACE_RESISTANCE, INTERNAL_SURFACE_RESISTANCE};
use crate::warnings::Warned;

/// U-value of an exposed floor: the Combined Method over the construction
/// layers. The external surface resistance depends on what the underside
/// faces — 0.04 for outside air, 0.17 for an unheated space.
pub(crate) fn u_value(exposed_to: ExposedTo, layers: &[FloorLayerInput]) -> Warned<f64> {
    let external_resistance = match exposed_to {
        ExposedTo::OutsideAir => EXTERNAL_SURFACE_RESISTANCE,
        ExposedTo::UnheatedSpace => INTERNAL_SURFACE_RESISTANCE,
    };

    let mut network = Vec::with_capacity(layers.len() + 2);
    network.push(CombinedMethodLayer::whole(
        "internal surface",
        INTERNAL_SURFACE_RESISTANCE,
    ));
    network.extend(layers.iter().map(FloorLayerInput::as_combined_method_layer));
    network.push(CombinedMethodLayer::whole(
        "external surface",
        external_resistance,
    ));

    Warned::new(CombinedMethodModel::new(network).u_value())
}
