//! Validated, immutable input types for the floor U-value models.
//!
//! Everything in this module is constructed once — either directly by a
//! caller that already holds complete data, or by the validators in
//! [`crate::validation`] from a raw, possibly incomplete specification —
//! and never mutated afterwards. The floor models treat these types as
//! ground truth: any invariant stated here (e.g. a layer's thickness being
//! present whenever a conductivity-based material is involved) is enforced
//! by the only available constructors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::combined::{CombinedMethodLayer, ResistanceElement};
use crate::path;
use crate::warnings::{MissingValue, ValuePath, Warned, Warning};

/// A fractional area share in `[0, 1]`.
///
/// Constructed only through the checked [`new`](Proportion::new) factory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Proportion(f64);

/// A proportion was outside `[0, 1]` (or not a number).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("proportion must be between 0 and 1, got {0}")]
pub struct ProportionOutOfRange(pub f64);

impl Proportion {
    /// The whole area, ratio 1.
    pub const WHOLE: Proportion = Proportion(1.0);

    /// Creates a proportion from a ratio in `[0, 1]`.
    pub fn new(ratio: f64) -> Result<Self, ProportionOutOfRange> {
        if (0.0..=1.0).contains(&ratio) {
            Ok(Self(ratio))
        } else {
            Err(ProportionOutOfRange(ratio))
        }
    }

    /// Creates a proportion from a percentage in `[0, 100]`.
    pub fn from_percent(percent: f64) -> Result<Self, ProportionOutOfRange> {
        Self::new(percent / 100.0)
    }

    /// The ratio in `[0, 1]`.
    pub fn ratio(self) -> f64 {
        self.0
    }

    /// The ratio expressed as a percentage.
    pub fn percent(self) -> f64 {
        self.0 * 100.0
    }

    /// The remainder of the whole, `1 − ratio`.
    pub fn complement(self) -> Self {
        Self(1.0 - self.0)
    }
}

impl TryFrom<f64> for Proportion {
    type Error = ProportionOutOfRange;

    fn try_from(ratio: f64) -> Result<Self, Self::Error> {
        Self::new(ratio)
    }
}

impl From<Proportion> for f64 {
    fn from(proportion: Proportion) -> f64 {
        proportion.ratio()
    }
}

/// How a material's thermal performance is declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mechanism", rename_all = "kebab-case")]
pub enum MaterialMechanism {
    /// Conductivity in W/mK; a thickness is needed to derive a resistance.
    Conductivity { conductivity: f64 },
    /// Declared resistance in m²K/W, independent of thickness.
    Resistance { resistance: f64 },
}

impl MaterialMechanism {
    pub fn uses_conductivity(&self) -> bool {
        matches!(self, MaterialMechanism::Conductivity { .. })
    }
}

/// A construction material as it appears in the material library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorMaterial {
    pub name: String,
    #[serde(flatten)]
    pub mechanism: MaterialMechanism,
}

/// An insulation specification, reduced to the data the formulas need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mechanism", rename_all = "kebab-case")]
pub enum FloorInsulation {
    /// Material declared by conductivity; resistance is thickness over
    /// conductivity.
    Conductivity { thickness: f64, conductivity: f64 },
    /// Material with a declared resistance.
    Resistance { resistance: f64 },
}

impl FloorInsulation {
    /// The thermal resistance of this insulation in m²K/W.
    pub fn resistance(&self) -> f64 {
        match *self {
            FloorInsulation::Conductivity {
                thickness,
                conductivity,
            } => thickness / conductivity,
            FloorInsulation::Resistance { resistance } => resistance,
        }
    }

    /// The physical thickness in metres, where one is known. Materials
    /// declared by resistance carry no thickness, which the analytical
    /// edge-insulation correction treats as zero.
    pub fn thickness(&self) -> f64 {
        match *self {
            FloorInsulation::Conductivity { thickness, .. } => thickness,
            FloorInsulation::Resistance { .. } => 0.0,
        }
    }
}

/// Resistance of an optional insulation specification: zero when absent.
pub fn insulation_resistance(insulation: Option<&FloorInsulation>) -> f64 {
    insulation.map(FloorInsulation::resistance).unwrap_or(0.0)
}

/// A bridging material occupying part of a layer's area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerBridging {
    pub material: FloorMaterial,
    pub proportion: Proportion,
}

/// One validated construction layer of a floor.
///
/// Invariant: `thickness` is present whenever the main or bridging material
/// declares a conductivity, enforced by [`FloorLayerInput::new`]. A
/// thickness supplied when no material needs one is preserved (the
/// validators flag it as an unnecessary value, not an error).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorLayerInput {
    thickness: Option<f64>,
    main_material: FloorMaterial,
    bridging: Option<LayerBridging>,
}

impl FloorLayerInput {
    /// Creates a validated layer, checking the thickness invariant.
    pub fn new(
        thickness: Option<f64>,
        main_material: FloorMaterial,
        bridging: Option<LayerBridging>,
    ) -> Result<Self, MissingValue> {
        let needs_thickness = main_material.mechanism.uses_conductivity()
            || bridging
                .as_ref()
                .is_some_and(|b| b.material.mechanism.uses_conductivity());
        if needs_thickness && thickness.is_none() {
            return Err(MissingValue::at(path!["thickness"]));
        }
        Ok(Self {
            thickness,
            main_material,
            bridging,
        })
    }

    pub fn thickness(&self) -> Option<f64> {
        self.thickness
    }

    pub fn main_material(&self) -> &FloorMaterial {
        &self.main_material
    }

    pub fn bridging(&self) -> Option<&LayerBridging> {
        self.bridging.as_ref()
    }

    /// Converts this layer into its Combined Method form: the main material
    /// as one parallel element (over the whole area, or the bridging
    /// proportion's complement), plus the bridging material's element when
    /// present.
    pub fn as_combined_method_layer(&self) -> CombinedMethodLayer {
        let main_proportion = match &self.bridging {
            Some(bridging) => bridging.proportion.complement(),
            None => Proportion::WHOLE,
        };
        let mut elements = vec![ResistanceElement::new(
            self.main_material.name.clone(),
            self.material_resistance(&self.main_material),
            main_proportion,
        )];
        if let Some(bridging) = &self.bridging {
            elements.push(ResistanceElement::new(
                bridging.material.name.clone(),
                self.material_resistance(&bridging.material),
                bridging.proportion,
            ));
        }
        CombinedMethodLayer::new(elements)
    }

    fn material_resistance(&self, material: &FloorMaterial) -> f64 {
        match material.mechanism {
            MaterialMechanism::Resistance { resistance } => resistance,
            MaterialMechanism::Conductivity { conductivity } => {
                // new() guarantees a thickness whenever a conductivity
                // material is present.
                self.thickness.unwrap_or(0.0) / conductivity
            }
        }
    }
}

/// Thermal conductivity of the ground beneath a solid floor, either one of
/// the standard soil categories or a direct numeric override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GroundConductivity {
    #[serde(rename = "clay or silt")]
    ClayOrSilt,
    #[serde(rename = "sand or gravel")]
    SandOrGravel,
    #[serde(rename = "homogeneous rock")]
    HomogeneousRock,
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(untagged)]
    Custom(f64),
}

impl GroundConductivity {
    /// Conductivity in W/mK.
    pub fn value(self) -> f64 {
        match self {
            GroundConductivity::ClayOrSilt => 1.5,
            GroundConductivity::SandOrGravel | GroundConductivity::Unknown => 2.0,
            GroundConductivity::HomogeneousRock => 3.5,
            GroundConductivity::Custom(value) => value,
        }
    }
}

/// Insulation placed at a solid floor's perimeter edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EdgeInsulation {
    None,
    Horizontal {
        width: f64,
        insulation: FloorInsulation,
    },
    Vertical {
        depth: f64,
        insulation: FloorInsulation,
    },
}

/// What an exposed floor faces on its underside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExposedTo {
    OutsideAir,
    UnheatedSpace,
}

/// Geometry shared by the strategies that need it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommonInput {
    /// Floor area in m².
    pub area: f64,
}

/// Fully validated input for one of the six floor U-value strategies.
///
/// The discriminant selects exactly one formula; the exhaustive match in
/// [`FloorUValueModel::new`](crate::model::FloorUValueModel::new) guarantees
/// all six are covered at compile time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "floor-type", rename_all = "kebab-case")]
pub enum FloorUValueModelInput {
    /// A caller-supplied U-value, used verbatim.
    Custom { u_value: f64 },
    /// Solid ground floor via the standard lookup tables.
    SolidTables {
        common: CommonInput,
        exposed_perimeter: f64,
        all_over_insulation: Option<FloorInsulation>,
        edge_insulation: EdgeInsulation,
    },
    /// Solid ground floor via the analytical ground-contact method.
    SolidBs13370 {
        common: CommonInput,
        exposed_perimeter: f64,
        wall_thickness: f64,
        ground_conductivity: GroundConductivity,
        layers: Vec<FloorLayerInput>,
        edge_insulation: EdgeInsulation,
    },
    /// Suspended floor over a ventilated under-floor space.
    Suspended {
        common: CommonInput,
        ventilation_combined_area: f64,
        under_floor_space_perimeter: f64,
        /// Empty means uninsulated: the table value is used directly.
        layers: Vec<FloorLayerInput>,
    },
    /// Floor of a heated basement.
    HeatedBasement {
        common: CommonInput,
        exposed_perimeter: f64,
        depth: f64,
        insulation: Option<FloorInsulation>,
    },
    /// Floor exposed on its underside to outside air or an unheated space.
    Exposed {
        exposed_to: ExposedTo,
        layers: Vec<FloorLayerInput>,
    },
}

/// Convenience constructor for the fail-soft substitute input.
impl FloorUValueModelInput {
    pub(crate) fn zero_custom() -> Self {
        FloorUValueModelInput::Custom { u_value: 0.0 }
    }
}

/// Validates a layer the way the per-floor-type validators do, addressing
/// diagnostics relative to `path`. Exposed for callers that assemble layers
/// programmatically rather than from a raw specification.
pub fn validated_layer(
    thickness: Option<f64>,
    main_material: Option<FloorMaterial>,
    bridging_material: Option<FloorMaterial>,
    bridging_proportion: Option<Proportion>,
    path: &ValuePath,
) -> Result<Warned<FloorLayerInput>, MissingValue> {
    let main_material = main_material.ok_or_else(|| MissingValue::at(path.key("main-material")))?;

    let bridging = match bridging_material {
        None => None,
        Some(material) => {
            let proportion = bridging_proportion
                .ok_or_else(|| MissingValue::at(path.key("bridging").key("proportion")))?;
            Some(LayerBridging {
                material,
                proportion,
            })
        }
    };

    let needs_thickness = main_material.mechanism.uses_conductivity()
        || bridging
            .as_ref()
            .is_some_and(|b| b.material.mechanism.uses_conductivity());

    let mut warnings = Vec::new();
    if needs_thickness && thickness.is_none() {
        return Err(MissingValue::at(path.key("thickness")));
    }
    if !needs_thickness && thickness.is_some() {
        warnings.push(Warning::UnnecessaryValue {
            path: path.key("thickness"),
        });
    }

    let layer = FloorLayerInput::new(thickness, main_material, bridging)?;
    Ok(Warned::with(layer, warnings))
}
