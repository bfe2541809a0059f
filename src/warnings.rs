//! Warning and error values for the floor U-value calculators.
//!
//! Every diagnostic produced by this crate is a *value*, not a panic: table
//! lookups report when an input had to be clamped into the table's domain,
//! validators report missing or superfluous fields, and the floor models
//! report when a degenerate input forced a non-finite result to be replaced.
//! Each diagnostic carries a [`ValuePath`] addressing the exact input field
//! it refers to, so a caller can surface it next to the offending field.
//!
//! [`Warned<T>`] is the carrier used to thread a computed value together
//! with its accumulated warnings through several layers of calls without
//! dropping any of them.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One segment of a [`ValuePath`]: either a named field or a list index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A named field, e.g. `"exposed-perimeter"`.
    Key(&'static str),
    /// A position within a list field, e.g. a layer index.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// An ordered list of segments identifying one field of the raw input.
///
/// Paths are rooted at the floor-type tag (e.g. `solid (bs13370)`) once the
/// owning strategy has prefixed them; below that they follow the shape of
/// the raw specification (`suspended.layers.0.thickness`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValuePath(Vec<PathSegment>);

impl ValuePath {
    /// An empty path, to be extended with [`key`](Self::key) and
    /// [`index`](Self::index).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns this path extended with a named field segment.
    pub fn key(&self, key: &'static str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key));
        Self(segments)
    }

    /// Returns this path extended with a list index segment.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// Returns this path with `key` prepended. Strategies use this to stamp
    /// their own tag onto warnings produced by shared helpers.
    pub fn prefixed_with(mut self, key: &'static str) -> Self {
        self.0.insert(0, PathSegment::Key(key));
        self
    }

    /// The path's segments, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl<const N: usize> From<[PathSegment; N]> for ValuePath {
    fn from(segments: [PathSegment; N]) -> Self {
        Self(segments.to_vec())
    }
}

/// Builds a [`ValuePath`] from a mix of string and index literals.
///
/// ```
/// use floor_uvalue::path;
/// let p = path!["suspended", "layers", 0, "thickness"];
/// assert_eq!(p.to_string(), "suspended.layers.0.thickness");
/// ```
#[macro_export]
macro_rules! path {
    ($($segment:expr),* $(,)?) => {
        $crate::warnings::ValuePath::from([
            $($crate::warnings::IntoPathSegment::into_segment($segment)),*
        ])
    };
}

/// Conversion helper for the [`path!`] macro.
pub trait IntoPathSegment {
    fn into_segment(self) -> PathSegment;
}

impl IntoPathSegment for &'static str {
    fn into_segment(self) -> PathSegment {
        PathSegment::Key(self)
    }
}

impl IntoPathSegment for usize {
    fn into_segment(self) -> PathSegment {
        PathSegment::Index(self)
    }
}

impl IntoPathSegment for i32 {
    fn into_segment(self) -> PathSegment {
        PathSegment::Index(self as usize)
    }
}

/// A required field was absent from the raw specification.
///
/// This is the only fatal condition a validator can produce. The top-level
/// [`validate`](crate::validation::validate) converts it into a zero-valued
/// custom floor plus a [`Warning::RequiredValueMissing`], so callers always
/// receive a usable model.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("required value missing at {path}")]
pub struct MissingValue {
    pub path: ValuePath,
}

impl MissingValue {
    pub fn at(path: ValuePath) -> Self {
        Self { path }
    }
}

/// The closed set of non-fatal diagnostics a floor U-value computation can
/// emit alongside its result.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Warning {
    /// A required field was missing; the dispatcher substituted a custom
    /// floor with u = 0 and retained this diagnostic.
    #[error("required value missing at {path}")]
    RequiredValueMissing { path: ValuePath },

    /// A table lookup input fell outside the table's domain and was clamped
    /// to the nearest axis bound before interpolating.
    #[error("value {value} at {path} was clamped to {clamped_to}")]
    ParameterClamped {
        path: ValuePath,
        value: f64,
        clamped_to: f64,
    },

    /// A formula produced NaN or ±∞ (typically a zero denominator such as a
    /// zero exposed perimeter); the stated replacement was used instead.
    #[error("non-finite number at {path} was replaced with {replacement}")]
    NonFiniteNumberReplaced { path: ValuePath, replacement: f64 },

    /// A value was supplied where the selected strategy does not use it.
    /// The value is preserved, not discarded.
    #[error("unnecessary value supplied at {path}")]
    UnnecessaryValue { path: ValuePath },
}

impl Warning {
    /// The input field this warning refers to.
    pub fn path(&self) -> &ValuePath {
        match self {
            Warning::RequiredValueMissing { path }
            | Warning::ParameterClamped { path, .. }
            | Warning::NonFiniteNumberReplaced { path, .. }
            | Warning::UnnecessaryValue { path } => path,
        }
    }

    /// Returns this warning with `key` prepended to its path.
    pub fn prefixed_with(self, key: &'static str) -> Self {
        match self {
            Warning::RequiredValueMissing { path } => Warning::RequiredValueMissing {
                path: path.prefixed_with(key),
            },
            Warning::ParameterClamped {
                path,
                value,
                clamped_to,
            } => Warning::ParameterClamped {
                path: path.prefixed_with(key),
                value,
                clamped_to,
            },
            Warning::NonFiniteNumberReplaced { path, replacement } => {
                Warning::NonFiniteNumberReplaced {
                    path: path.prefixed_with(key),
                    replacement,
                }
            }
            Warning::UnnecessaryValue { path } => Warning::UnnecessaryValue {
                path: path.prefixed_with(key),
            },
        }
    }
}

impl From<MissingValue> for Warning {
    fn from(missing: MissingValue) -> Self {
        Warning::RequiredValueMissing { path: missing.path }
    }
}

/// A computed value together with the warnings accumulated while computing
/// it. Warnings are appended in evaluation order and never dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Warned<T> {
    value: T,
    warnings: Vec<Warning>,
}

impl<T> Warned<T> {
    /// Wraps a value with no warnings.
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Wraps a value with an initial warning list.
    pub fn with(value: T, warnings: Vec<Warning>) -> Self {
        Self { value, warnings }
    }

    /// The computed value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The warnings accumulated so far, in evaluation order.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Appends one warning.
    pub fn push(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// Transforms the value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Warned<U> {
        Warned {
            value: f(self.value),
            warnings: self.warnings,
        }
    }

    /// Chains a warning-producing computation, concatenating both warning
    /// lists (this value's warnings first).
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Warned<U>) -> Warned<U> {
        let mut next = f(self.value);
        let mut warnings = self.warnings;
        warnings.append(&mut next.warnings);
        Warned {
            value: next.value,
            warnings,
        }
    }

    /// Maps every warning's path, e.g. to stamp a strategy tag onto it.
    pub fn prefixed_with(mut self, key: &'static str) -> Self {
        self.warnings = self
            .warnings
            .into_iter()
            .map(|w| w.prefixed_with(key))
            .collect();
        self
    }

    /// Splits into the value and its warnings.
    pub fn into_parts(self) -> (T, Vec<Warning>) {
        (self.value, self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_display_joins_segments_with_dots() {
        let p = path!["suspended", "layers", 1, "bridging", "proportion"];
        assert_eq!(p.to_string(), "suspended.layers.1.bridging.proportion");
    }

    #[test]
    fn prefixing_prepends_a_segment() {
        let w = Warning::UnnecessaryValue {
            path: path!["layers", 0, "thickness"],
        };
        let w = w.prefixed_with("exposed");
        assert_eq!(w.path().to_string(), "exposed.layers.0.thickness");
    }

    #[test]
    fn and_then_concatenates_warnings_in_order() {
        let first = Warned::with(
            2.0_f64,
            vec![Warning::UnnecessaryValue { path: path!["a"] }],
        );
        let result = first.and_then(|v| {
            Warned::with(
                v * 2.0,
                vec![Warning::NonFiniteNumberReplaced {
                    path: path!["b"],
                    replacement: 0.0,
                }],
            )
        });
        assert_eq!(*result.value(), 4.0);
        assert_eq!(result.warnings().len(), 2);
        assert_eq!(result.warnings()[0].path().to_string(), "a");
        assert_eq!(result.warnings()[1].path().to_string(), "b");
    }

    #[test]
    fn missing_value_converts_to_warning() {
        let missing = MissingValue::at(path!["custom", "u-value"]);
        let warning: Warning = missing.into();
        assert_eq!(
            warning,
            Warning::RequiredValueMissing {
                path: path!["custom", "u-value"],
            }
        );
    }
}
