//! The Combined Method resistance network.
//!
//! Estimates the U-value of a construction whose layers may be thermally
//! bridged (e.g. timber studs within insulation) by computing two bounds on
//! its overall resistance and averaging them:
//!
//! - the **lower bound** treats each layer's bridging as uniformly spread
//!   within that layer, independent of the others: parallel (harmonic-mean)
//!   resistance per layer, summed in series;
//! - the **upper bound** treats bridging features as aligned straight
//!   through the construction: every combination of one element per layer is
//!   a physical path ("slice") from face to face, and the slices combine in
//!   parallel.
//!
//! Layers are ordered from one exposed face to the other, and include the
//! surface resistances when the calling strategy requires them.

use itertools::Itertools;
use serde::Serialize;

use crate::input::Proportion;

/// Proportions within a layer are expected to sum to 1 within this
/// tolerance.
const PROPORTION_SUM_TOLERANCE: f64 = 1e-6;

/// One parallel path through a layer: a material occupying a fraction of
/// the layer's area with a fixed thermal resistance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResistanceElement {
    name: String,
    resistance: f64,
    proportion: Proportion,
}

impl ResistanceElement {
    pub fn new(name: impl Into<String>, resistance: f64, proportion: Proportion) -> Self {
        Self {
            name: name.into(),
            resistance,
            proportion,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Thermal resistance in m²K/W.
    pub fn resistance(&self) -> f64 {
        self.resistance
    }

    /// Fraction of the layer's area this element occupies.
    pub fn proportion(&self) -> Proportion {
        self.proportion
    }
}

/// One layer of the construction: a non-empty set of parallel elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedMethodLayer {
    elements: Vec<ResistanceElement>,
}

impl CombinedMethodLayer {
    /// # Panics
    ///
    /// Panics if `elements` is empty: a layer with no elements has no
    /// physical meaning and always indicates a programmer error.
    pub fn new(elements: Vec<ResistanceElement>) -> Self {
        assert!(
            !elements.is_empty(),
            "a combined method layer must have at least one element"
        );
        Self { elements }
    }

    /// A single unbridged element covering the whole layer.
    pub fn whole(name: impl Into<String>, resistance: f64) -> Self {
        Self::new(vec![ResistanceElement::new(
            name,
            resistance,
            Proportion::WHOLE,
        )])
    }

    pub fn elements(&self) -> &[ResistanceElement] {
        &self.elements
    }

    /// Parallel (harmonic-mean) resistance of this layer on its own.
    fn parallel_resistance(&self) -> f64 {
        1.0 / self
            .elements
            .iter()
            .map(|e| e.proportion.ratio() / e.resistance)
            .sum::<f64>()
    }

    fn proportion_sum(&self) -> f64 {
        self.elements.iter().map(|e| e.proportion.ratio()).sum()
    }
}

/// A Combined Method model over an ordered list of layers.
///
/// Both resistance bounds are computed eagerly at construction; instances
/// are immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedMethodModel {
    layers: Vec<CombinedMethodLayer>,
    lower_bound_resistance: f64,
    upper_bound_resistance: f64,
}

impl CombinedMethodModel {
    /// # Panics
    ///
    /// Panics if `layers` is empty. Proportions within a layer not summing
    /// to 1 are logged as a data-quality advisory (that is always a bug in
    /// the calling library's data, not a recoverable input condition) but do
    /// not abort.
    pub fn new(layers: Vec<CombinedMethodLayer>) -> Self {
        assert!(
            !layers.is_empty(),
            "a combined method model needs at least one layer"
        );
        for (index, layer) in layers.iter().enumerate() {
            let sum = layer.proportion_sum();
            if (sum - 1.0).abs() > PROPORTION_SUM_TOLERANCE {
                log::warn!(
                    "combined method layer {} proportions sum to {}, expected 1",
                    index,
                    sum
                );
            }
        }
        let lower_bound_resistance = Self::lower_bound(&layers);
        let upper_bound_resistance = Self::upper_bound(&layers);
        Self {
            layers,
            lower_bound_resistance,
            upper_bound_resistance,
        }
    }

    /// Series sum of each layer's own parallel resistance.
    fn lower_bound(layers: &[CombinedMethodLayer]) -> f64 {
        layers.iter().map(CombinedMethodLayer::parallel_resistance).sum()
    }

    /// Parallel combination of every face-to-face slice. One element is
    /// chosen per layer; the slice's area share is the product of the chosen
    /// proportions and its resistance the series sum of the chosen
    /// resistances. O(nᵐ) in elements per layer n and layer count m, which
    /// stays tiny: layers rarely carry more than two elements.
    fn upper_bound(layers: &[CombinedMethodLayer]) -> f64 {
        let total_conductance: f64 = layers
            .iter()
            .map(|layer| layer.elements.iter())
            .multi_cartesian_product()
            .map(|slice| {
                let proportion: f64 = slice.iter().map(|e| e.proportion.ratio()).product();
                let resistance: f64 = slice.iter().map(|e| e.resistance).sum();
                proportion / resistance
            })
            .sum();
        1.0 / total_conductance
    }

    pub fn layers(&self) -> &[CombinedMethodLayer] {
        &self.layers
    }

    pub fn lower_bound_resistance(&self) -> f64 {
        self.lower_bound_resistance
    }

    pub fn upper_bound_resistance(&self) -> f64 {
        self.upper_bound_resistance
    }

    /// The Combined Method estimate: the mean of the two bounds.
    pub fn resistance(&self) -> f64 {
        (self.lower_bound_resistance + self.upper_bound_resistance) / 2.0
    }

    /// Thermal transmittance, the reciprocal of [`resistance`](Self::resistance).
    pub fn u_value(&self) -> f64 {
        1.0 / self.resistance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn element(name: &str, resistance: f64, proportion: f64) -> ResistanceElement {
        ResistanceElement::new(name, resistance, Proportion::new(proportion).unwrap())
    }

    #[test]
    fn unbridged_bounds_coincide_with_the_series_sum() {
        let model = CombinedMethodModel::new(vec![
            CombinedMethodLayer::whole("internal surface", 0.13),
            CombinedMethodLayer::whole("plaster", 0.05),
            CombinedMethodLayer::whole("brick", 0.132),
            CombinedMethodLayer::whole("external surface", 0.04),
        ]);
        let series = 0.13 + 0.05 + 0.132 + 0.04;
        assert!((model.lower_bound_resistance() - series).abs() < EPSILON);
        assert!((model.upper_bound_resistance() - series).abs() < EPSILON);
        assert!((model.u_value() - 1.0 / series).abs() < EPSILON);
    }

    #[test]
    fn single_bridged_layer_bounds_agree_with_hand_calculation() {
        let model = CombinedMethodModel::new(vec![CombinedMethodLayer::new(vec![
            element("insulation", 2.0, 0.9),
            element("stud", 0.5, 0.1),
        ])]);
        // One layer: both bounds reduce to the same parallel combination.
        let parallel = 1.0 / (0.9 / 2.0 + 0.1 / 0.5);
        assert!((model.lower_bound_resistance() - parallel).abs() < EPSILON);
        assert!((model.upper_bound_resistance() - parallel).abs() < EPSILON);
    }

    #[test]
    fn upper_bound_never_falls_below_lower_bound() {
        let model = CombinedMethodModel::new(vec![
            CombinedMethodLayer::whole("internal surface", 0.17),
            CombinedMethodLayer::new(vec![
                element("insulation", 3.5, 0.85),
                element("joist", 1.17, 0.15),
            ]),
            CombinedMethodLayer::new(vec![
                element("block", 1.14, 0.93),
                element("mortar", 0.14, 0.07),
            ]),
            CombinedMethodLayer::whole("external surface", 0.04),
        ]);
        assert!(model.upper_bound_resistance() >= model.lower_bound_resistance());
    }

    #[test]
    fn increasing_an_element_resistance_does_not_decrease_either_bound() {
        let build = |insulation_resistance: f64| {
            CombinedMethodModel::new(vec![
                CombinedMethodLayer::new(vec![
                    element("insulation", insulation_resistance, 0.85),
                    element("stud", 1.0, 0.15),
                ]),
                CombinedMethodLayer::whole("deck", 0.2),
            ])
        };
        let base = build(2.0);
        let stiffer = build(2.5);
        assert!(stiffer.lower_bound_resistance() >= base.lower_bound_resistance());
        assert!(stiffer.upper_bound_resistance() >= base.upper_bound_resistance());
    }

    #[test]
    #[should_panic(expected = "at least one layer")]
    fn rejects_an_empty_construction() {
        CombinedMethodModel::new(Vec::new());
    }

    #[test]
    #[should_panic(expected = "at least one element")]
    fn rejects_an_empty_layer() {
        CombinedMethodLayer::new(Vec::new());
    }
}
