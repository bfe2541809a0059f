//! Validation and dispatch: from a raw, possibly incomplete floor
//! specification to a fully-typed model input.
//!
//! One validator exists per floor type. Each checks the fields its strategy
//! requires, flags values the strategy does not use, and on success returns
//! a complete [`FloorUValueModelInput`]. A missing required field is fatal
//! to that validator — but not to the caller: [`validate`] converts it into
//! a `custom` input with a U-value of 0 and surfaces the original error in
//! the warning channel, so the surrounding building model always receives a
//! usable input plus a diagnostic trail.

pub mod spec;

use crate::input::{
    validated_layer, CommonInput, EdgeInsulation, FloorInsulation, FloorLayerInput,
    FloorUValueModelInput,
};
use crate::model::tag;
use crate::path;
use crate::warnings::{MissingValue, ValuePath, Warned, Warning};

use spec::{EdgeInsulationSpec, FloorLayerSpec, FloorType, InsulationSpec, PerFloorTypeSpec};

/// Normalizes the selected floor type's raw specification into the typed
/// input consumed by [`FloorUValueModel`](crate::model::FloorUValueModel).
///
/// Fail-soft at this boundary: a required-value error from any validator is
/// returned as a warning alongside a zero-valued `custom` substitute input,
/// never as a hard failure.
pub fn validate(
    floor_type: FloorType,
    common: CommonInput,
    spec: &PerFloorTypeSpec,
) -> Warned<FloorUValueModelInput> {
    let result = match floor_type {
        FloorType::Custom => validate_custom(&spec.custom),
        FloorType::Solid => validate_solid(common, &spec.solid),
        FloorType::SolidBs13370 => validate_solid_bs13370(common, &spec.solid_bs13370),
        FloorType::Suspended => validate_suspended(common, &spec.suspended),
        FloorType::HeatedBasement => validate_heated_basement(common, &spec.heated_basement),
        FloorType::Exposed => validate_exposed(&spec.exposed),
    };
    match result {
        Ok(input) => input,
        Err(missing) => Warned::with(FloorUValueModelInput::zero_custom(), vec![missing.into()]),
    }
}

fn validate_custom(spec: &spec::CustomSpec) -> Result<Warned<FloorUValueModelInput>, MissingValue> {
    let u_value = spec
        .u_value
        .ok_or_else(|| MissingValue::at(path![tag::CUSTOM, "u-value"]))?;
    Ok(Warned::new(FloorUValueModelInput::Custom { u_value }))
}

fn validate_solid(
    common: CommonInput,
    spec: &spec::SolidSpec,
) -> Result<Warned<FloorUValueModelInput>, MissingValue> {
    let root = path![tag::SOLID_TABLES];
    let exposed_perimeter = spec
        .exposed_perimeter
        .ok_or_else(|| MissingValue::at(root.key("exposed-perimeter")))?;

    let all_over_insulation = validate_optional_insulation(
        spec.all_over_insulation.as_ref(),
        &root.key("all-over-insulation"),
    )?;
    let edge_insulation = validate_edge_insulation(&spec.edge_insulation, &root)?;

    Ok(all_over_insulation.and_then(|all_over| {
        edge_insulation.map(|edge| FloorUValueModelInput::SolidTables {
            common,
            exposed_perimeter,
            all_over_insulation: all_over,
            edge_insulation: edge,
        })
    }))
}

fn validate_solid_bs13370(
    common: CommonInput,
    spec: &spec::SolidBs13370Spec,
) -> Result<Warned<FloorUValueModelInput>, MissingValue> {
    let root = path![tag::SOLID_BS13370];
    let exposed_perimeter = spec
        .exposed_perimeter
        .ok_or_else(|| MissingValue::at(root.key("exposed-perimeter")))?;
    let wall_thickness = spec
        .wall_thickness
        .ok_or_else(|| MissingValue::at(root.key("wall-thickness")))?;
    let ground_conductivity = spec
        .ground_conductivity
        .ok_or_else(|| MissingValue::at(root.key("ground-conductivity")))?;

    let layers = validate_required_layers(&spec.layers, &root)?;
    let edge_insulation = validate_edge_insulation(&spec.edge_insulation, &root)?;

    Ok(layers.and_then(|layers| {
        edge_insulation.map(|edge| FloorUValueModelInput::SolidBs13370 {
            common,
            exposed_perimeter,
            wall_thickness,
            ground_conductivity,
            layers,
            edge_insulation: edge,
        })
    }))
}

fn validate_suspended(
    common: CommonInput,
    spec: &spec::SuspendedSpec,
) -> Result<Warned<FloorUValueModelInput>, MissingValue> {
    let root = path![tag::SUSPENDED];
    let ventilation_combined_area = spec
        .ventilation_combined_area
        .ok_or_else(|| MissingValue::at(root.key("ventilation-combined-area")))?;
    let under_floor_space_perimeter = spec
        .under_floor_space_perimeter
        .ok_or_else(|| MissingValue::at(root.key("under-floor-space-perimeter")))?;

    // An empty layer list is a legitimate uninsulated floor here.
    let layers = validate_layers(&spec.layers, &root.key("layers"))?;

    Ok(layers.map(|layers| FloorUValueModelInput::Suspended {
        common,
        ventilation_combined_area,
        under_floor_space_perimeter,
        layers,
    }))
}

fn validate_heated_basement(
    common: CommonInput,
    spec: &spec::HeatedBasementSpec,
) -> Result<Warned<FloorUValueModelInput>, MissingValue> {
    let root = path![tag::HEATED_BASEMENT];
    let exposed_perimeter = spec
        .exposed_perimeter
        .ok_or_else(|| MissingValue::at(root.key("exposed-perimeter")))?;
    let depth = spec
        .depth
        .ok_or_else(|| MissingValue::at(root.key("depth")))?;

    let insulation =
        validate_optional_insulation(spec.insulation.as_ref(), &root.key("insulation"))?;

    Ok(insulation.map(|insulation| FloorUValueModelInput::HeatedBasement {
        common,
        exposed_perimeter,
        depth,
        insulation,
    }))
}

fn validate_exposed(
    spec: &spec::ExposedSpec,
) -> Result<Warned<FloorUValueModelInput>, MissingValue> {
    let root = path![tag::EXPOSED];
    let exposed_to = spec
        .exposed_to
        .ok_or_else(|| MissingValue::at(root.key("exposed-to")))?;

    let layers = validate_required_layers(&spec.layers, &root)?;

    Ok(layers.map(|layers| FloorUValueModelInput::Exposed { exposed_to, layers }))
}

/// Validates each layer in order, concatenating their warnings.
fn validate_layers(
    specs: &[FloorLayerSpec],
    path: &ValuePath,
) -> Result<Warned<Vec<FloorLayerInput>>, MissingValue> {
    let mut layers = Vec::with_capacity(specs.len());
    let mut warnings: Vec<Warning> = Vec::new();
    for (index, layer_spec) in specs.iter().enumerate() {
        let validated = validated_layer(
            layer_spec.thickness,
            layer_spec.main_material.clone(),
            layer_spec.bridging.material.clone(),
            layer_spec.bridging.proportion,
            &path.index(index),
        )?;
        let (layer, mut layer_warnings) = validated.into_parts();
        warnings.append(&mut layer_warnings);
        layers.push(layer);
    }
    Ok(Warned::with(layers, warnings))
}

/// Validates a layer list the strategy's resistance network cannot do
/// without: empty is a missing value.
fn validate_required_layers(
    specs: &[FloorLayerSpec],
    root: &ValuePath,
) -> Result<Warned<Vec<FloorLayerInput>>, MissingValue> {
    if specs.is_empty() {
        return Err(MissingValue::at(root.key("layers")));
    }
    validate_layers(specs, &root.key("layers"))
}

fn validate_optional_insulation(
    spec: Option<&InsulationSpec>,
    path: &ValuePath,
) -> Result<Warned<Option<FloorInsulation>>, MissingValue> {
    match spec {
        None => Ok(Warned::new(None)),
        Some(spec) => Ok(validate_insulation(spec, path)?.map(Some)),
    }
}

/// Reduces an insulation entry to the mechanism data the formulas need.
/// The material is required; a thickness is required for a conductivity
/// material and flagged as unnecessary (but preserved) otherwise.
fn validate_insulation(
    spec: &InsulationSpec,
    path: &ValuePath,
) -> Result<Warned<FloorInsulation>, MissingValue> {
    let material = spec
        .material
        .as_ref()
        .ok_or_else(|| MissingValue::at(path.key("material")))?;
    match material.mechanism {
        crate::input::MaterialMechanism::Conductivity { conductivity } => {
            let thickness = spec
                .thickness
                .ok_or_else(|| MissingValue::at(path.key("thickness")))?;
            Ok(Warned::new(FloorInsulation::Conductivity {
                thickness,
                conductivity,
            }))
        }
        crate::input::MaterialMechanism::Resistance { resistance } => {
            let mut result = Warned::new(FloorInsulation::Resistance { resistance });
            if spec.thickness.is_some() {
                result.push(Warning::UnnecessaryValue {
                    path: path.key("thickness"),
                });
            }
            Ok(result)
        }
    }
}

fn validate_edge_insulation(
    spec: &EdgeInsulationSpec,
    root: &ValuePath,
) -> Result<Warned<EdgeInsulation>, MissingValue> {
    let path = root.key("edge-insulation");
    match spec {
        EdgeInsulationSpec::None => Ok(Warned::new(EdgeInsulation::None)),
        EdgeInsulationSpec::Horizontal { width, insulation } => {
            let width = width.ok_or_else(|| MissingValue::at(path.key("width")))?;
            let insulation = validate_insulation(insulation, &path.key("insulation"))?;
            Ok(insulation.map(|insulation| EdgeInsulation::Horizontal { width, insulation }))
        }
        EdgeInsulationSpec::Vertical { depth, insulation } => {
            let depth = depth.ok_or_else(|| MissingValue::at(path.key("depth")))?;
            let insulation = validate_insulation(insulation, &path.key("insulation"))?;
            Ok(insulation.map(|insulation| EdgeInsulation::Vertical { depth, insulation }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{FloorMaterial, MaterialMechanism, Proportion};
    use spec::{BridgingSpec, CustomSpec, SolidBs13370Spec, SuspendedSpec};

    fn conductive(name: &str, conductivity: f64) -> FloorMaterial {
        FloorMaterial {
            name: name.to_string(),
            mechanism: MaterialMechanism::Conductivity { conductivity },
        }
    }

    fn resistive(name: &str, resistance: f64) -> FloorMaterial {
        FloorMaterial {
            name: name.to_string(),
            mechanism: MaterialMechanism::Resistance { resistance },
        }
    }

    #[test]
    fn missing_required_value_falls_back_to_a_zero_custom_floor() {
        let spec = PerFloorTypeSpec::default();
        let result = validate(FloorType::Suspended, CommonInput { area: 40.0 }, &spec);
        assert_eq!(*result.value(), FloorUValueModelInput::zero_custom());
        assert_eq!(result.warnings().len(), 1);
        assert_eq!(
            result.warnings()[0],
            Warning::RequiredValueMissing {
                path: path!["suspended", "ventilation-combined-area"],
            }
        );
    }

    #[test]
    fn complete_custom_spec_validates_cleanly() {
        let spec = PerFloorTypeSpec {
            custom: CustomSpec {
                u_value: Some(0.35),
            },
            ..Default::default()
        };
        let result = validate(FloorType::Custom, CommonInput { area: 1.0 }, &spec);
        assert_eq!(
            *result.value(),
            FloorUValueModelInput::Custom { u_value: 0.35 }
        );
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn layer_errors_carry_their_index_in_the_path() {
        let spec = PerFloorTypeSpec {
            solid_bs13370: SolidBs13370Spec {
                exposed_perimeter: Some(50.0),
                wall_thickness: Some(0.3),
                ground_conductivity: Some(crate::input::GroundConductivity::Unknown),
                layers: vec![
                    FloorLayerSpec {
                        thickness: Some(0.1),
                        main_material: Some(conductive("screed", 1.4)),
                        bridging: BridgingSpec::default(),
                    },
                    FloorLayerSpec {
                        thickness: None,
                        main_material: Some(conductive("insulation", 0.04)),
                        bridging: BridgingSpec::default(),
                    },
                ],
                edge_insulation: EdgeInsulationSpec::None,
            },
            ..Default::default()
        };
        let result = validate(FloorType::SolidBs13370, CommonInput { area: 100.0 }, &spec);
        assert_eq!(*result.value(), FloorUValueModelInput::zero_custom());
        assert_eq!(
            result.warnings()[0].path().to_string(),
            "solid (bs13370).layers.1.thickness"
        );
    }

    #[test]
    fn superfluous_thickness_on_a_resistance_layer_warns_but_validates() {
        let spec = PerFloorTypeSpec {
            suspended: SuspendedSpec {
                ventilation_combined_area: Some(0.04),
                under_floor_space_perimeter: Some(20.0),
                layers: vec![FloorLayerSpec {
                    thickness: Some(0.05),
                    main_material: Some(resistive("membrane", 0.06)),
                    bridging: BridgingSpec {
                        material: Some(resistive("joist strap", 0.02)),
                        proportion: Some(Proportion::new(0.1).unwrap()),
                    },
                }],
            },
            ..Default::default()
        };
        let result = validate(FloorType::Suspended, CommonInput { area: 40.0 }, &spec);
        assert_eq!(result.warnings().len(), 1);
        assert_eq!(
            result.warnings()[0],
            Warning::UnnecessaryValue {
                path: path!["suspended", "layers", 0, "thickness"],
            }
        );
        match result.value() {
            FloorUValueModelInput::Suspended { layers, .. } => {
                assert_eq!(layers[0].thickness(), Some(0.05));
            }
            other => panic!("expected a suspended input, got {:?}", other),
        }
    }

    #[test]
    fn exposed_floor_requires_at_least_one_layer() {
        let spec = PerFloorTypeSpec {
            exposed: spec::ExposedSpec {
                exposed_to: Some(crate::input::ExposedTo::OutsideAir),
                layers: vec![],
            },
            ..Default::default()
        };
        let result = validate(FloorType::Exposed, CommonInput { area: 40.0 }, &spec);
        assert_eq!(*result.value(), FloorUValueModelInput::zero_custom());
        assert_eq!(result.warnings()[0].path().to_string(), "exposed.layers");
    }

    #[test]
    fn incomplete_edge_insulation_is_fatal_to_the_branch() {
        let spec = PerFloorTypeSpec {
            solid: spec::SolidSpec {
                exposed_perimeter: Some(20.0),
                all_over_insulation: None,
                edge_insulation: EdgeInsulationSpec::Horizontal {
                    width: None,
                    insulation: InsulationSpec {
                        thickness: None,
                        material: Some(resistive("edge board", 1.0)),
                    },
                },
            },
            ..Default::default()
        };
        let result = validate(FloorType::Solid, CommonInput { area: 40.0 }, &spec);
        assert_eq!(*result.value(), FloorUValueModelInput::zero_custom());
        assert_eq!(
            result.warnings()[0].path().to_string(),
            "solid (tables).edge-insulation.width"
        );
    }
}
