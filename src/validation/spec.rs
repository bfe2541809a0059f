//! Raw floor specification types, shaped like the legacy/UI documents.
//!
//! Every field a user might not have filled in yet is an `Option`; list
//! fields default to empty. All six per-floor-type sub-specifications are
//! carried simultaneously (the legacy document keeps whatever the user
//! entered under each type), and [`validate`](crate::validation::validate)
//! reads only the one selected.
//!
//! Numeric fields are plain numbers except bridging proportions, which
//! deserialize through the checked [`Proportion`] factory: a proportion
//! outside `[0, 1]` is malformed input and is rejected at the parsing
//! boundary rather than handled by the fallback policy.

use serde::{Deserialize, Serialize};

use crate::input::{ExposedTo, FloorMaterial, GroundConductivity, Proportion};

/// The floor type selected for calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorType {
    #[serde(rename = "custom")]
    Custom,
    #[serde(rename = "solid")]
    Solid,
    #[serde(rename = "solid (bs13370)")]
    SolidBs13370,
    #[serde(rename = "suspended")]
    Suspended,
    #[serde(rename = "heated basement")]
    HeatedBasement,
    #[serde(rename = "exposed")]
    Exposed,
}

/// The per-floor-type section of a raw floor specification.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PerFloorTypeSpec {
    pub custom: CustomSpec,
    pub solid: SolidSpec,
    #[serde(rename = "solid (bs13370)")]
    pub solid_bs13370: SolidBs13370Spec,
    pub suspended: SuspendedSpec,
    #[serde(rename = "heated basement")]
    pub heated_basement: HeatedBasementSpec,
    pub exposed: ExposedSpec,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CustomSpec {
    pub u_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SolidSpec {
    pub exposed_perimeter: Option<f64>,
    pub all_over_insulation: Option<InsulationSpec>,
    pub edge_insulation: EdgeInsulationSpec,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SolidBs13370Spec {
    pub exposed_perimeter: Option<f64>,
    pub wall_thickness: Option<f64>,
    pub ground_conductivity: Option<GroundConductivity>,
    pub layers: Vec<FloorLayerSpec>,
    pub edge_insulation: EdgeInsulationSpec,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SuspendedSpec {
    pub ventilation_combined_area: Option<f64>,
    pub under_floor_space_perimeter: Option<f64>,
    pub layers: Vec<FloorLayerSpec>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HeatedBasementSpec {
    pub exposed_perimeter: Option<f64>,
    pub depth: Option<f64>,
    pub insulation: Option<InsulationSpec>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExposedSpec {
    pub exposed_to: Option<ExposedTo>,
    pub layers: Vec<FloorLayerSpec>,
}

/// A possibly incomplete insulation entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InsulationSpec {
    pub thickness: Option<f64>,
    pub material: Option<FloorMaterial>,
}

/// A possibly incomplete edge insulation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EdgeInsulationSpec {
    None,
    Horizontal {
        width: Option<f64>,
        insulation: InsulationSpec,
    },
    Vertical {
        depth: Option<f64>,
        insulation: InsulationSpec,
    },
}

impl Default for EdgeInsulationSpec {
    fn default() -> Self {
        EdgeInsulationSpec::None
    }
}

/// A possibly incomplete construction layer entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FloorLayerSpec {
    pub thickness: Option<f64>,
    pub main_material: Option<FloorMaterial>,
    pub bridging: BridgingSpec,
}

/// A possibly incomplete bridging entry within a layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BridgingSpec {
    pub material: Option<FloorMaterial>,
    pub proportion: Option<Proportion>,
}
