//! The standard published calculation tables and their domain wrappers.
//!
//! Each wrapper binds one fixed regulatory table to the generic
//! [`Table2d`] lookup and translates its clamp reports onto the semantic
//! field path the caller cares about. Paths returned from here are relative
//! to the owning floor strategy, which prefixes its own tag.
//!
//! Axis convention, for every table in this module: x is the column axis
//! (second index), y is the row axis (first index).

use lazy_static::lazy_static;

use crate::path;
use crate::tabular::{Axis, Table2d};
use crate::warnings::{ValuePath, Warned};

/// Perimeter/area ratio axis shared by the floor U-value tables,
/// 0.05 to 1.00 in steps of 0.05.
fn perimeter_area_ratio_axis() -> Vec<f64> {
    (1..=20).map(|i| f64::from(i) * 0.05).collect()
}

lazy_static! {
    /// U-values of solid ground floors (W/m²K).
    ///
    /// x: all-over insulation resistance (m²K/W), y: perimeter/area ratio.
    /// Tabulated from the standard ground-floor relation with ground
    /// conductivity 1.5 W/mK and a 0.3 m wall, to 2 decimal places.
    static ref SOLID_FLOOR_UVALUES: Table2d = Table2d::new(
        vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5],
        perimeter_area_ratio_axis(),
        vec![
            vec![0.13, 0.11, 0.10, 0.09, 0.08, 0.08],
            vec![0.22, 0.18, 0.16, 0.14, 0.13, 0.12],
            vec![0.30, 0.24, 0.21, 0.18, 0.17, 0.15],
            vec![0.37, 0.29, 0.25, 0.22, 0.19, 0.18],
            vec![0.44, 0.34, 0.28, 0.24, 0.22, 0.19],
            vec![0.49, 0.38, 0.31, 0.27, 0.23, 0.21],
            vec![0.55, 0.41, 0.34, 0.29, 0.25, 0.22],
            vec![0.60, 0.44, 0.36, 0.30, 0.26, 0.23],
            vec![0.65, 0.47, 0.38, 0.32, 0.27, 0.23],
            vec![0.70, 0.50, 0.40, 0.33, 0.28, 0.24],
            vec![0.74, 0.52, 0.41, 0.34, 0.28, 0.25],
            vec![0.78, 0.55, 0.43, 0.35, 0.29, 0.25],
            vec![0.82, 0.57, 0.44, 0.35, 0.30, 0.26],
            vec![0.86, 0.59, 0.45, 0.36, 0.30, 0.26],
            vec![0.89, 0.61, 0.46, 0.37, 0.31, 0.27],
            vec![0.93, 0.62, 0.47, 0.37, 0.32, 0.27],
            vec![0.96, 0.64, 0.47, 0.38, 0.32, 0.28],
            vec![0.99, 0.65, 0.48, 0.39, 0.32, 0.28],
            vec![1.02, 0.66, 0.49, 0.39, 0.33, 0.28],
            vec![1.05, 0.68, 0.50, 0.40, 0.33, 0.28],
        ],
    );

    /// Edge insulation factor ψ for horizontal edge insulation (W/mK).
    ///
    /// x: edge insulation resistance (m²K/W), y: insulation width (m).
    static ref EDGE_INSULATION_HORIZONTAL: Table2d = Table2d::new(
        vec![0.5, 1.0, 1.5, 2.0],
        vec![0.5, 1.0, 1.5],
        vec![
            vec![-0.14, -0.18, -0.21, -0.22],
            vec![-0.20, -0.28, -0.32, -0.34],
            vec![-0.24, -0.33, -0.39, -0.42],
        ],
    );

    /// Edge insulation factor ψ for vertical edge insulation (W/mK).
    ///
    /// x: edge insulation resistance (m²K/W), y: insulation depth (m).
    static ref EDGE_INSULATION_VERTICAL: Table2d = Table2d::new(
        vec![0.5, 1.0, 1.5, 2.0],
        vec![0.25, 0.5, 0.75, 1.0],
        vec![
            vec![-0.14, -0.18, -0.21, -0.22],
            vec![-0.20, -0.28, -0.32, -0.34],
            vec![-0.24, -0.33, -0.39, -0.42],
            vec![-0.26, -0.37, -0.44, -0.48],
        ],
    );

    /// U-values of uninsulated suspended floors (W/m²K).
    ///
    /// x: ventilation opening area per exposed perimeter (m²/m),
    /// y: perimeter/area ratio. Published values.
    static ref SUSPENDED_FLOOR_UVALUES: Table2d = Table2d::new(
        vec![0.0015, 0.003],
        perimeter_area_ratio_axis(),
        vec![
            vec![0.15, 0.15],
            vec![0.25, 0.26],
            vec![0.33, 0.35],
            vec![0.40, 0.42],
            vec![0.46, 0.48],
            vec![0.51, 0.53],
            vec![0.55, 0.58],
            vec![0.59, 0.62],
            vec![0.63, 0.66],
            vec![0.66, 0.70],
            vec![0.69, 0.73],
            vec![0.72, 0.76],
            vec![0.75, 0.79],
            vec![0.77, 0.81],
            vec![0.80, 0.84],
            vec![0.82, 0.86],
            vec![0.84, 0.88],
            vec![0.86, 0.90],
            vec![0.88, 0.92],
            vec![0.89, 0.93],
        ],
    );

    /// U-values of uninsulated heated basement floors (W/m²K).
    ///
    /// x: basement depth below ground (m), y: perimeter/area ratio.
    /// Tabulated from the standard basement-floor relation with ground
    /// conductivity 2.0 W/mK and a 0.3 m wall, to 2 decimal places.
    static ref BASEMENT_FLOOR_UVALUES: Table2d = Table2d::new(
        vec![0.5, 1.0, 1.5, 2.0, 2.5],
        perimeter_area_ratio_axis(),
        vec![
            vec![0.15, 0.15, 0.14, 0.14, 0.13],
            vec![0.26, 0.25, 0.24, 0.22, 0.22],
            vec![0.35, 0.33, 0.31, 0.30, 0.28],
            vec![0.43, 0.40, 0.38, 0.36, 0.34],
            vec![0.50, 0.47, 0.44, 0.41, 0.39],
            vec![0.57, 0.52, 0.49, 0.46, 0.43],
            vec![0.63, 0.57, 0.53, 0.50, 0.46],
            vec![0.68, 0.62, 0.57, 0.53, 0.50],
            vec![0.73, 0.66, 0.61, 0.56, 0.52],
            vec![0.78, 0.70, 0.64, 0.59, 0.55],
            vec![0.82, 0.74, 0.67, 0.62, 0.57],
            vec![0.86, 0.77, 0.70, 0.64, 0.59],
            vec![0.90, 0.80, 0.73, 0.66, 0.61],
            vec![0.94, 0.83, 0.75, 0.68, 0.63],
            vec![0.97, 0.86, 0.77, 0.70, 0.64],
            vec![1.00, 0.88, 0.79, 0.72, 0.65],
            vec![1.03, 0.91, 0.81, 0.73, 0.67],
            vec![1.06, 0.93, 0.83, 0.75, 0.68],
            vec![1.08, 0.95, 0.84, 0.76, 0.69],
            vec![1.11, 0.97, 0.86, 0.77, 0.69],
        ],
    );
}

/// Looks up a table, mapping each clamp report onto the semantic path of the
/// physical quantity on the affected axis.
fn lookup(table: &Table2d, x: f64, y: f64, x_path: ValuePath, y_path: ValuePath) -> Warned<f64> {
    let (value, clamps) = table.interpolate(x, y);
    let warnings = clamps
        .into_iter()
        .map(|clamp| {
            let path = match clamp.axis {
                Axis::X => x_path.clone(),
                Axis::Y => y_path.clone(),
            };
            clamp.into_warning(path)
        })
        .collect();
    Warned::with(value, warnings)
}

/// U-value of a solid ground floor with optional all-over insulation.
pub fn solid_floor_u_value(
    all_over_insulation_resistance: f64,
    perimeter_area_ratio: f64,
) -> Warned<f64> {
    lookup(
        &SOLID_FLOOR_UVALUES,
        all_over_insulation_resistance,
        perimeter_area_ratio,
        path!["all-over-insulation", "resistance"],
        path!["perimeter-area-ratio"],
    )
}

/// Edge insulation factor ψ for horizontal edge insulation of a solid floor.
pub fn horizontal_edge_insulation_factor(resistance: f64, width: f64) -> Warned<f64> {
    lookup(
        &EDGE_INSULATION_HORIZONTAL,
        resistance,
        width,
        path!["edge-insulation", "resistance"],
        path!["edge-insulation", "width"],
    )
}

/// Edge insulation factor ψ for vertical edge insulation of a solid floor.
pub fn vertical_edge_insulation_factor(resistance: f64, depth: f64) -> Warned<f64> {
    lookup(
        &EDGE_INSULATION_VERTICAL,
        resistance,
        depth,
        path!["edge-insulation", "resistance"],
        path!["edge-insulation", "depth"],
    )
}

/// U-value of an uninsulated suspended floor.
pub fn suspended_floor_uninsulated_u_value(
    ventilation_ratio: f64,
    perimeter_area_ratio: f64,
) -> Warned<f64> {
    lookup(
        &SUSPENDED_FLOOR_UVALUES,
        ventilation_ratio,
        perimeter_area_ratio,
        path!["ventilation-ratio"],
        path!["perimeter-area-ratio"],
    )
}

/// U-value of an uninsulated heated basement floor.
pub fn basement_floor_uninsulated_u_value(
    basement_depth: f64,
    perimeter_area_ratio: f64,
) -> Warned<f64> {
    lookup(
        &BASEMENT_FLOOR_UVALUES,
        basement_depth,
        perimeter_area_ratio,
        path!["depth"],
        path!["perimeter-area-ratio"],
    )
}
