//! Thermal transmittance (U-value) calculation for ground-contact floor
//! constructions.
//!
//! A floor's U-value (W/m²K) is computed by one of six mutually exclusive
//! strategies, selected by the floor type:
//!
//! - **custom** — a caller-supplied literal;
//! - **solid** — solid ground floor via the standard lookup tables;
//! - **solid (bs13370)** — solid ground floor via the analytical
//!   ground-contact method of BS EN ISO 13370;
//! - **suspended** — suspended floor over a ventilated under-floor space;
//! - **heated basement** — basement floor with optional insulation;
//! - **exposed** — floor exposed underneath to outside air or an unheated
//!   space.
//!
//! All strategies are built on the same two foundations: the Combined
//! Method resistance network (upper/lower resistance bounds over possibly
//! bridged layers, see [`model::combined`]) and clamped bilinear
//! interpolation over the published calculation tables ([`tabular`],
//! [`tables`]).
//!
//! # Entry points
//!
//! [`validate`] normalizes a raw, possibly incomplete specification (fields
//! may be absent) into a typed [`FloorUValueModelInput`], fail-soft: a
//! missing required field yields a zero-valued custom substitute plus a
//! diagnostic, never a hard failure. [`construct_floor_u_value_model`] then
//! runs the selected strategy, producing a [`FloorUValueModel`] with its
//! `u_value` and an ordered [`Warning`] list.
//!
//! ```
//! use floor_uvalue::{
//!     construct_floor_u_value_model, validate, CommonInput, FloorType, PerFloorTypeSpec,
//! };
//!
//! let mut spec = PerFloorTypeSpec::default();
//! spec.custom.u_value = Some(0.25);
//!
//! let (input, warnings) = validate(FloorType::Custom, CommonInput { area: 40.0 }, &spec)
//!     .into_parts();
//! assert!(warnings.is_empty());
//!
//! let model = construct_floor_u_value_model(input);
//! assert_eq!(model.u_value(), 0.25);
//! ```
//!
//! Everything is synchronous, side-effect-free computation over immutable
//! values: models compute their results eagerly at construction and can be
//! evaluated from multiple threads without coordination.

pub mod input;
pub mod model;
pub mod tables;
pub mod tabular;
pub mod validation;
pub mod warnings;

pub use input::{
    insulation_resistance, CommonInput, EdgeInsulation, ExposedTo, FloorInsulation,
    FloorLayerInput, FloorMaterial, FloorUValueModelInput, GroundConductivity, LayerBridging,
    MaterialMechanism, Proportion,
};
pub use model::{construct_floor_u_value_model, FloorUValueModel};
pub use validation::spec::{FloorType, PerFloorTypeSpec};
pub use validation::validate;
pub use warnings::{MissingValue, PathSegment, ValuePath, Warned, Warning};
