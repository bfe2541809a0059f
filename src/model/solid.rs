//! Solid ground floor strategies: standard lookup tables and the analytical
//! ground-contact method.

use std::f64::consts::PI;

use crate::input::{
    insulation_resistance, CommonInput, EdgeInsulation, FloorInsulation, FloorLayerInput,
    GroundConductivity,
};
use crate::model::combined::{CombinedMethodLayer, CombinedMethodModel};
use crate::model::{EXTERNAL_SURFACE_RESISTANCE, INTERNAL_SURFACE_RESISTANCE};
use crate::tables;
use crate::warnings::Warned;

/// U-value of a solid ground floor from the standard tables, with an
/// optional edge insulation correction:
/// `U = U_table + ψ × perimeter/area`.
pub(crate) fn tables_u_value(
    common: CommonInput,
    exposed_perimeter: f64,
    all_over_insulation: Option<&FloorInsulation>,
    edge_insulation: &EdgeInsulation,
) -> Warned<f64> {
    let perimeter_area_ratio = exposed_perimeter / common.area;
    let all_over_resistance = insulation_resistance(all_over_insulation);

    let without_edge = tables::solid_floor_u_value(all_over_resistance, perimeter_area_ratio);

    let edge_factor = match edge_insulation {
        EdgeInsulation::None => Warned::new(0.0),
        EdgeInsulation::Horizontal { width, insulation } => {
            tables::horizontal_edge_insulation_factor(insulation.resistance(), *width)
        }
        EdgeInsulation::Vertical { depth, insulation } => {
            tables::vertical_edge_insulation_factor(insulation.resistance(), *depth)
        }
    };

    without_edge.and_then(|u| edge_factor.map(|psi| u + psi * perimeter_area_ratio))
}

/// U-value of a solid ground floor from the analytical method of
/// BS EN ISO 13370.
///
/// The floor construction's resistance comes from the Combined Method over
/// the supplied layers between the fixed internal and external surface
/// resistances. The ground coupling is captured by the equivalent thickness
/// `dt = wall thickness + λ × construction resistance`, compared against the
/// characteristic dimension `B' = 2 × area / exposed perimeter`.
pub(crate) fn bs13370_u_value(
    common: CommonInput,
    exposed_perimeter: f64,
    wall_thickness: f64,
    ground_conductivity: GroundConductivity,
    layers: &[FloorLayerInput],
    edge_insulation: &EdgeInsulation,
) -> Warned<f64> {
    let characteristic_dimension = 2.0 * common.area / exposed_perimeter;
    let lambda = ground_conductivity.value();

    let mut network = Vec::with_capacity(layers.len() + 2);
    network.push(CombinedMethodLayer::whole(
        "internal surface",
        INTERNAL_SURFACE_RESISTANCE,
    ));
    network.extend(layers.iter().map(FloorLayerInput::as_combined_method_layer));
    network.push(CombinedMethodLayer::whole(
        "external surface",
        EXTERNAL_SURFACE_RESISTANCE,
    ));
    let construction = CombinedMethodModel::new(network);

    let equivalent_thickness = wall_thickness + lambda * construction.resistance();

    let unadjusted = if equivalent_thickness < characteristic_dimension {
        (2.0 * lambda) / (PI * characteristic_dimension + equivalent_thickness)
            * (PI * characteristic_dimension / equivalent_thickness + 1.0).ln()
    } else {
        lambda / (0.457 * characteristic_dimension + equivalent_thickness)
    };

    let u_value = match edge_correction(edge_insulation, lambda, equivalent_thickness) {
        Some(psi) => unadjusted + 2.0 * psi / characteristic_dimension,
        None => unadjusted,
    };
    Warned::new(u_value)
}

/// Analytical edge insulation factor ψ, when edge insulation is present.
///
/// Vertical insulation of depth `d` acts over an equivalent width of `2d`.
fn edge_correction(
    edge_insulation: &EdgeInsulation,
    lambda: f64,
    equivalent_thickness: f64,
) -> Option<f64> {
    let (equivalent_width, insulation) = match edge_insulation {
        EdgeInsulation::None => return None,
        EdgeInsulation::Horizontal { width, insulation } => (*width, insulation),
        EdgeInsulation::Vertical { depth, insulation } => (2.0 * depth, insulation),
    };
    let additional_equivalent_thickness =
        insulation.resistance() * lambda - insulation.thickness();
    let psi = -(lambda / PI)
        * ((equivalent_width / equivalent_thickness + 1.0).ln()
            - (equivalent_width / (equivalent_thickness + additional_equivalent_thickness) + 1.0)
                .ln());
    Some(psi)
}
