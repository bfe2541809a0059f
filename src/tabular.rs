//! Generic two-dimensional table with clamped bilinear interpolation.
//!
//! The standard calculation tables (solid floor, suspended floor, basement,
//! edge insulation factors) are all rectangular grids indexed by two
//! ascending axes. Lookups outside an axis range are clamped to the nearest
//! bound and reported, rather than extrapolated, because the published
//! tables define no values beyond their domain.

use crate::warnings::{ValuePath, Warning};

/// Which axis of a [`Table2d`] a clamp occurred on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// A lookup input that fell outside its axis range and was clamped.
///
/// Carries no field path of its own: the domain-specific wrapper around each
/// table knows which physical quantity sits on which axis and converts this
/// into a [`Warning::ParameterClamped`] with the caller's semantic path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clamped {
    pub axis: Axis,
    pub value: f64,
    pub clamped_to: f64,
}

impl Clamped {
    /// Converts this clamp event into a warning addressed at `path`.
    pub fn into_warning(self, path: ValuePath) -> Warning {
        Warning::ParameterClamped {
            path,
            value: self.value,
            clamped_to: self.clamped_to,
        }
    }
}

/// A rectangular table of values over two ascending axes.
///
/// `values[y_index][x_index]` holds the value at `(x_axis[x_index],
/// y_axis[y_index])` — x is the column axis, y the row axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Table2d {
    x_axis: Vec<f64>,
    y_axis: Vec<f64>,
    values: Vec<Vec<f64>>,
}

impl Table2d {
    /// Creates a table from its axes and row-major values.
    ///
    /// # Panics
    ///
    /// Panics if either axis is empty or not strictly ascending, or if the
    /// value grid's dimensions disagree with the axis lengths. Tables are
    /// fixed published constants, so a malformed one is a programmer error.
    pub fn new(x_axis: Vec<f64>, y_axis: Vec<f64>, values: Vec<Vec<f64>>) -> Self {
        assert!(
            is_strictly_ascending(&x_axis),
            "x axis must be non-empty and strictly ascending"
        );
        assert!(
            is_strictly_ascending(&y_axis),
            "y axis must be non-empty and strictly ascending"
        );
        assert!(
            values.len() == y_axis.len(),
            "table must have one row per y axis value"
        );
        assert!(
            values.iter().all(|row| row.len() == x_axis.len()),
            "every table row must have one value per x axis value"
        );
        Self {
            x_axis,
            y_axis,
            values,
        }
    }

    /// Bilinearly interpolates the table at `(x, y)`.
    ///
    /// Out-of-range inputs are clamped to the nearest axis bound first; each
    /// clamp is reported in the returned list.
    pub fn interpolate(&self, x: f64, y: f64) -> (f64, Vec<Clamped>) {
        let mut clamps = Vec::new();
        let x = clamp_to_axis(x, &self.x_axis, Axis::X, &mut clamps);
        let y = clamp_to_axis(y, &self.y_axis, Axis::Y, &mut clamps);

        let (x0, x1, tx) = bracket(&self.x_axis, x);
        let (y0, y1, ty) = bracket(&self.y_axis, y);

        let v00 = self.values[y0][x0];
        let v01 = self.values[y0][x1];
        let v10 = self.values[y1][x0];
        let v11 = self.values[y1][x1];

        let low = v00 + (v01 - v00) * tx;
        let high = v10 + (v11 - v10) * tx;
        (low + (high - low) * ty, clamps)
    }
}

fn is_strictly_ascending(axis: &[f64]) -> bool {
    !axis.is_empty() && axis.windows(2).all(|pair| pair[0] < pair[1])
}

fn clamp_to_axis(value: f64, axis: &[f64], which: Axis, clamps: &mut Vec<Clamped>) -> f64 {
    let min = axis[0];
    let max = axis[axis.len() - 1];
    // NaN comparisons are false, so a NaN input falls through both arms and
    // is clamped to the lower bound.
    let clamped = if value >= min && value <= max {
        return value;
    } else if value > max {
        max
    } else {
        min
    };
    clamps.push(Clamped {
        axis: which,
        value,
        clamped_to: clamped,
    });
    clamped
}

/// Finds the axis indices bracketing `value` (already in range) and the
/// interpolation fraction between them.
fn bracket(axis: &[f64], value: f64) -> (usize, usize, f64) {
    for (i, window) in axis.windows(2).enumerate() {
        if value <= window[1] {
            let span = window[1] - window[0];
            return (i, i + 1, (value - window[0]) / span);
        }
    }
    // Single-point axis, or value equal to the upper bound.
    (axis.len() - 1, axis.len() - 1, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn unit_table() -> Table2d {
        Table2d::new(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![vec![0.0, 1.0], vec![2.0, 3.0]],
        )
    }

    #[test]
    fn interpolates_at_grid_points() {
        let table = unit_table();
        let (v, clamps) = table.interpolate(1.0, 0.0);
        assert!((v - 1.0).abs() < EPSILON);
        assert!(clamps.is_empty());
    }

    #[test]
    fn interpolates_bilinearly_in_the_interior() {
        let table = unit_table();
        let (v, clamps) = table.interpolate(0.5, 0.5);
        assert!((v - 1.5).abs() < EPSILON);
        assert!(clamps.is_empty());

        let (v, _) = table.interpolate(0.25, 0.75);
        // 0.25 along x, 0.75 along y: 0.25 + 2.0 * 0.75
        assert!((v - 1.75).abs() < EPSILON);
    }

    #[test]
    fn clamps_below_and_reports_the_axis() {
        let table = unit_table();
        let (v, clamps) = table.interpolate(-2.0, 0.0);
        assert!((v - 0.0).abs() < EPSILON);
        assert_eq!(
            clamps,
            vec![Clamped {
                axis: Axis::X,
                value: -2.0,
                clamped_to: 0.0,
            }]
        );
    }

    #[test]
    fn clamps_above_on_both_axes() {
        let table = unit_table();
        let (v, clamps) = table.interpolate(5.0, 5.0);
        assert!((v - 3.0).abs() < EPSILON);
        assert_eq!(clamps.len(), 2);
        assert_eq!(clamps[0].axis, Axis::X);
        assert_eq!(clamps[1].axis, Axis::Y);
        assert!((clamps[1].clamped_to - 1.0).abs() < EPSILON);
    }

    #[test]
    fn infinite_input_clamps_to_the_upper_bound() {
        let table = unit_table();
        let (v, clamps) = table.interpolate(f64::INFINITY, 0.0);
        assert!((v - 1.0).abs() < EPSILON);
        assert_eq!(clamps.len(), 1);
        assert!(clamps[0].value.is_infinite());
    }

    #[test]
    #[should_panic(expected = "strictly ascending")]
    fn rejects_a_descending_axis() {
        Table2d::new(
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![vec![0.0, 1.0], vec![2.0, 3.0]],
        );
    }

    #[test]
    #[should_panic(expected = "one row per y axis value")]
    fn rejects_mismatched_row_count() {
        Table2d::new(vec![0.0, 1.0], vec![0.0, 1.0], vec![vec![0.0, 1.0]]);
    }

    #[test]
    #[should_panic(expected = "one value per x axis value")]
    fn rejects_a_ragged_row() {
        Table2d::new(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![vec![0.0, 1.0], vec![2.0]],
        );
    }
}
