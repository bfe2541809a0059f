//! The floor U-value models: one strategy per floor type, dispatched over
//! the validated input's discriminant.
//!
//! Every strategy returns its U-value together with an ordered warning
//! list; each warning's path is prefixed here with the strategy's tag
//! (e.g. `solid (tables)`). A shared guard replaces a non-finite result
//! (NaN or ±∞, typically from a degenerate input such as a zero exposed
//! perimeter) with 0 and records the substitution.

pub mod combined;

mod basement;
mod exposed;
mod solid;
mod suspended;

use serde::Serialize;

use crate::input::FloorUValueModelInput;
use crate::path;
use crate::warnings::{Warned, Warning};

/// Internal surface resistance for downward heat flow, m²K/W.
pub(crate) const INTERNAL_SURFACE_RESISTANCE: f64 = 0.17;
/// External surface resistance against outside air, m²K/W.
pub(crate) const EXTERNAL_SURFACE_RESISTANCE: f64 = 0.04;

/// Strategy tags used as the root path segment of every warning, shared
/// between the models and the validators.
pub(crate) mod tag {
    pub const CUSTOM: &str = "custom";
    pub const SOLID_TABLES: &str = "solid (tables)";
    pub const SOLID_BS13370: &str = "solid (bs13370)";
    pub const SUSPENDED: &str = "suspended";
    pub const HEATED_BASEMENT: &str = "heated basement";
    pub const EXPOSED: &str = "exposed";
}

/// A computed floor U-value model.
///
/// The U-value and warnings are computed once at construction from the
/// immutable input; instances never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorUValueModel {
    input: FloorUValueModelInput,
    u_value: f64,
    warnings: Vec<Warning>,
}

impl FloorUValueModel {
    /// Runs the strategy selected by the input's floor type. The match is
    /// exhaustive: adding a floor type without a strategy fails to compile.
    pub fn new(input: FloorUValueModelInput) -> Self {
        let result = match &input {
            FloorUValueModelInput::Custom { u_value } => {
                // A literal value: no computation, no warnings, no guard.
                Warned::new(*u_value).prefixed_with(tag::CUSTOM)
            }
            FloorUValueModelInput::SolidTables {
                common,
                exposed_perimeter,
                all_over_insulation,
                edge_insulation,
            } => guard_non_finite(solid::tables_u_value(
                *common,
                *exposed_perimeter,
                all_over_insulation.as_ref(),
                edge_insulation,
            ))
            .prefixed_with(tag::SOLID_TABLES),
            FloorUValueModelInput::SolidBs13370 {
                common,
                exposed_perimeter,
                wall_thickness,
                ground_conductivity,
                layers,
                edge_insulation,
            } => guard_non_finite(solid::bs13370_u_value(
                *common,
                *exposed_perimeter,
                *wall_thickness,
                *ground_conductivity,
                layers,
                edge_insulation,
            ))
            .prefixed_with(tag::SOLID_BS13370),
            FloorUValueModelInput::Suspended {
                common,
                ventilation_combined_area,
                under_floor_space_perimeter,
                layers,
            } => guard_non_finite(suspended::u_value(
                *common,
                *ventilation_combined_area,
                *under_floor_space_perimeter,
                layers,
            ))
            .prefixed_with(tag::SUSPENDED),
            FloorUValueModelInput::HeatedBasement {
                common,
                exposed_perimeter,
                depth,
                insulation,
            } => guard_non_finite(basement::u_value(
                *common,
                *exposed_perimeter,
                *depth,
                insulation.as_ref(),
            ))
            .prefixed_with(tag::HEATED_BASEMENT),
            FloorUValueModelInput::Exposed { exposed_to, layers } => {
                guard_non_finite(exposed::u_value(*exposed_to, layers)).prefixed_with(tag::EXPOSED)
            }
        };
        let (u_value, warnings) = result.into_parts();
        Self {
            input,
            u_value,
            warnings,
        }
    }

    /// The validated input the model was built from.
    pub fn input(&self) -> &FloorUValueModelInput {
        &self.input
    }

    /// Thermal transmittance of the floor, W/m²K.
    pub fn u_value(&self) -> f64 {
        self.u_value
    }

    /// Diagnostics accumulated while computing the U-value, in evaluation
    /// order, each path rooted at the strategy's tag.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

/// Constructs the model for a validated input. Free-function counterpart of
/// [`FloorUValueModel::new`] for callers composing with
/// [`validate`](crate::validation::validate).
pub fn construct_floor_u_value_model(input: FloorUValueModelInput) -> FloorUValueModel {
    FloorUValueModel::new(input)
}

/// Replaces a non-finite strategy result with 0, recording the substitution.
fn guard_non_finite(result: Warned<f64>) -> Warned<f64> {
    if result.value().is_finite() {
        return result;
    }
    let mut replaced = result.map(|_| 0.0);
    replaced.push(Warning::NonFiniteNumberReplaced {
        path: path!["u-value"],
        replacement: 0.0,
    });
    replaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::CommonInput;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn custom_floor_passes_the_literal_through_unchanged() {
        let model = FloorUValueModel::new(FloorUValueModelInput::Custom { u_value: 1.23 });
        assert!((model.u_value() - 1.23).abs() < EPSILON);
        assert!(model.warnings().is_empty());
    }

    #[test]
    fn zero_perimeter_yields_zero_with_one_non_finite_warning() {
        let model = FloorUValueModel::new(FloorUValueModelInput::SolidBs13370 {
            common: CommonInput { area: 100.0 },
            exposed_perimeter: 0.0,
            wall_thickness: 0.5,
            ground_conductivity: crate::input::GroundConductivity::Unknown,
            layers: vec![],
            edge_insulation: crate::input::EdgeInsulation::None,
        });
        assert_eq!(model.u_value(), 0.0);
        let non_finite: Vec<_> = model
            .warnings()
            .iter()
            .filter(|w| matches!(w, Warning::NonFiniteNumberReplaced { .. }))
            .collect();
        assert_eq!(non_finite.len(), 1);
        assert_eq!(
            non_finite[0].path().to_string(),
            "solid (bs13370).u-value"
        );
    }

    #[test]
    fn strategy_tag_prefixes_every_warning() {
        let model = FloorUValueModel::new(FloorUValueModelInput::HeatedBasement {
            common: CommonInput { area: 40.0 },
            exposed_perimeter: 20.0,
            depth: 4.0,
            insulation: None,
        });
        assert_eq!(model.warnings().len(), 1);
        assert_eq!(
            model.warnings()[0].path().to_string(),
            "heated basement.depth"
        );
    }
}
