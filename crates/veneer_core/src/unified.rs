//! # Unified Dimensions
//!
//! A [`ScalarUnit`] expresses a length as a fraction of some base length plus
//! a fixed number of pixels. The base is only known at layout time, so a skin
//! can say "half the parent, minus 4 pixels" without knowing the parent.
//!
//! ## Text Form
//!
//! ```text
//! ScalarUnit  {scale,offset}                  {0.5,-4}
//! UVector2    {{x},{y}}                       {{0,10},{1,-10}}
//! USize       {{width},{height}}              {{1,0},{0,24}}
//! URect       {{left},{top},{right},{bottom}} {{0,0},{0,0},{1,0},{1,0}}
//! ```
//!
//! The text form is what widget properties carry, so property-sourced
//! dimensions parse it at evaluation time.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing the text form of unified values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseUnitError {
    /// The value was not wrapped in `{` and `}`.
    #[error("expected a braced value, found `{0}`")]
    MissingBraces(String),

    /// The value had the wrong number of components.
    #[error("expected {expected} components, found {found}")]
    ComponentCount {
        /// Components the type needs.
        expected: usize,
        /// Components present in the text.
        found: usize,
    },

    /// A component was not a valid float.
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
}

/// Result type for unified value parsing.
pub type ParseUnitResult<T> = Result<T, ParseUnitError>;

/// Returns true if `value` is close enough to zero to be treated as zero.
#[inline]
#[must_use]
pub fn is_near_zero(value: f32) -> bool {
    value.abs() < f32::EPSILON
}

// =============================================================================
// ScalarUnit
// =============================================================================

/// A relative/absolute length: `base * scale + offset`.
///
/// `scale == 0` means the value is a pure pixel amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScalarUnit {
    /// Fraction of the base length.
    pub scale: f32,
    /// Fixed pixel amount.
    pub offset: f32,
}

impl ScalarUnit {
    /// Zero length.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// The whole base length.
    pub const FULL: Self = Self::new(1.0, 0.0);

    /// Creates a new unit.
    #[inline]
    #[must_use]
    pub const fn new(scale: f32, offset: f32) -> Self {
        Self { scale, offset }
    }

    /// Creates a pure pixel amount.
    #[inline]
    #[must_use]
    pub const fn absolute(offset: f32) -> Self {
        Self::new(0.0, offset)
    }

    /// Creates a pure fraction of the base length.
    #[inline]
    #[must_use]
    pub const fn relative(scale: f32) -> Self {
        Self::new(scale, 0.0)
    }

    /// Returns true if this is a pure pixel amount.
    #[inline]
    #[must_use]
    pub fn is_absolute(self) -> bool {
        self.scale == 0.0
    }
}

impl Add for ScalarUnit {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.scale + rhs.scale, self.offset + rhs.offset)
    }
}

impl AddAssign for ScalarUnit {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for ScalarUnit {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.scale - rhs.scale, self.offset - rhs.offset)
    }
}

impl SubAssign for ScalarUnit {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul for ScalarUnit {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.scale * rhs.scale, self.offset * rhs.offset)
    }
}

impl Mul<f32> for ScalarUnit {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.scale * rhs, self.offset * rhs)
    }
}

/// Componentwise division.
///
/// A component whose divisor is ~0 comes out as 0. Each component is checked
/// on its own, so `{1,4} / {0,2}` is `{0,2}`. Skins written against the
/// established behaviour depend on this, so it is kept as-is.
impl Div for ScalarUnit {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let scale = if is_near_zero(rhs.scale) {
            0.0
        } else {
            self.scale / rhs.scale
        };
        let offset = if is_near_zero(rhs.offset) {
            0.0
        } else {
            self.offset / rhs.offset
        };
        Self::new(scale, offset)
    }
}

impl Neg for ScalarUnit {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.scale, -self.offset)
    }
}

impl fmt::Display for ScalarUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{},{}}}", self.scale, self.offset)
    }
}

impl FromStr for ScalarUnit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> ParseUnitResult<Self> {
        let inner = strip_braces(s)?;
        let parts: Vec<&str> = inner.split(',').collect();
        if parts.len() != 2 {
            return Err(ParseUnitError::ComponentCount {
                expected: 2,
                found: parts.len(),
            });
        }
        Ok(Self::new(parse_number(parts[0])?, parse_number(parts[1])?))
    }
}

// =============================================================================
// Aggregates
// =============================================================================

/// A two dimensional position in unified units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UVector2 {
    /// Horizontal component.
    pub x: ScalarUnit,
    /// Vertical component.
    pub y: ScalarUnit,
}

impl UVector2 {
    /// Creates a new vector.
    #[inline]
    #[must_use]
    pub const fn new(x: ScalarUnit, y: ScalarUnit) -> Self {
        Self { x, y }
    }
}

impl Add for UVector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for UVector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for UVector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{},{}}}", self.x, self.y)
    }
}

impl FromStr for UVector2 {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> ParseUnitResult<Self> {
        let units = parse_unit_groups(s, 2)?;
        Ok(Self::new(units[0], units[1]))
    }
}

/// A two dimensional size in unified units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct USize {
    /// Width component.
    pub width: ScalarUnit,
    /// Height component.
    pub height: ScalarUnit,
}

impl USize {
    /// Creates a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: ScalarUnit, height: ScalarUnit) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for USize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{},{}}}", self.width, self.height)
    }
}

impl FromStr for USize {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> ParseUnitResult<Self> {
        let units = parse_unit_groups(s, 2)?;
        Ok(Self::new(units[0], units[1]))
    }
}

/// A rectangle in unified units, stored as its min and max corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct URect {
    /// Top-left corner.
    pub min: UVector2,
    /// Bottom-right corner.
    pub max: UVector2,
}

impl URect {
    /// Creates a rectangle from its four edges.
    #[must_use]
    pub const fn new(
        left: ScalarUnit,
        top: ScalarUnit,
        right: ScalarUnit,
        bottom: ScalarUnit,
    ) -> Self {
        Self {
            min: UVector2::new(left, top),
            max: UVector2::new(right, bottom),
        }
    }

    /// Creates a rectangle from a position and a size.
    #[must_use]
    pub fn from_position_size(position: UVector2, size: USize) -> Self {
        Self {
            min: position,
            max: UVector2::new(position.x + size.width, position.y + size.height),
        }
    }

    /// Returns the top-left corner.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> UVector2 {
        self.min
    }

    /// Returns the width as `max.x - min.x`.
    #[inline]
    #[must_use]
    pub fn width(&self) -> ScalarUnit {
        self.max.x - self.min.x
    }

    /// Returns the height as `max.y - min.y`.
    #[inline]
    #[must_use]
    pub fn height(&self) -> ScalarUnit {
        self.max.y - self.min.y
    }

    /// Returns the size.
    #[inline]
    #[must_use]
    pub fn size(&self) -> USize {
        USize::new(self.width(), self.height())
    }

    /// Moves the rectangle so its top-left corner is `position`, keeping its size.
    pub fn set_position(&mut self, position: UVector2) {
        let size = self.size();
        *self = Self::from_position_size(position, size);
    }

    /// Resizes the rectangle, keeping its top-left corner.
    pub fn set_size(&mut self, size: USize) {
        *self = Self::from_position_size(self.min, size);
    }
}

impl fmt::Display for URect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{},{},{},{}}}",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

impl FromStr for URect {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> ParseUnitResult<Self> {
        let units = parse_unit_groups(s, 4)?;
        Ok(Self::new(units[0], units[1], units[2], units[3]))
    }
}

// =============================================================================
// Parsing helpers
// =============================================================================

fn strip_braces(s: &str) -> ParseUnitResult<&str> {
    let trimmed = s.trim();
    trimmed
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| ParseUnitError::MissingBraces(trimmed.to_owned()))
}

fn parse_number(s: &str) -> ParseUnitResult<f32> {
    let trimmed = s.trim();
    trimmed
        .parse::<f32>()
        .map_err(|_| ParseUnitError::InvalidNumber(trimmed.to_owned()))
}

/// Parses `{{a,b},{c,d},...}` into exactly `expected` scalar units.
fn parse_unit_groups(s: &str, expected: usize) -> ParseUnitResult<Vec<ScalarUnit>> {
    let inner = strip_braces(s)?;
    let mut units = Vec::with_capacity(expected);
    let mut rest = inner.trim();

    while !rest.is_empty() {
        let end = rest
            .find('}')
            .ok_or_else(|| ParseUnitError::MissingBraces(rest.to_owned()))?;
        units.push(rest[..=end].parse::<ScalarUnit>()?);
        rest = rest[end + 1..].trim_start();
        rest = rest.strip_prefix(',').unwrap_or(rest).trim_start();
    }

    if units.len() != expected {
        return Err(ParseUnitError::ComponentCount {
            expected,
            found: units.len(),
        });
    }
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_is_componentwise() {
        let a = ScalarUnit::new(0.5, 10.0);
        let b = ScalarUnit::new(0.25, 4.0);

        assert_eq!(a + b, ScalarUnit::new(0.75, 14.0));
        assert_eq!(a - b, ScalarUnit::new(0.25, 6.0));
        assert_eq!(a * b, ScalarUnit::new(0.125, 40.0));
        assert_eq!(a / b, ScalarUnit::new(2.0, 2.5));
        assert_eq!(-a, ScalarUnit::new(-0.5, -10.0));
        assert_eq!(a * 2.0, ScalarUnit::new(1.0, 20.0));
    }

    #[test]
    fn test_division_zeroes_each_component_independently() {
        let a = ScalarUnit::new(1.0, 4.0);

        assert_eq!(a / ScalarUnit::new(0.0, 2.0), ScalarUnit::new(0.0, 2.0));
        assert_eq!(a / ScalarUnit::new(0.5, 0.0), ScalarUnit::new(2.0, 0.0));
        assert_eq!(a / ScalarUnit::ZERO, ScalarUnit::ZERO);

        let tiny = ScalarUnit::new(f32::EPSILON / 2.0, -f32::EPSILON / 4.0);
        let result = a / tiny;
        assert_eq!(result, ScalarUnit::ZERO);
        assert!(!result.scale.is_nan() && !result.offset.is_nan());
    }

    #[test]
    fn test_absolute_flag() {
        assert!(ScalarUnit::absolute(12.0).is_absolute());
        assert!(!ScalarUnit::relative(0.1).is_absolute());
    }

    #[test]
    fn test_text_form() {
        let unit: ScalarUnit = " { 0.5 , -4 } ".parse().unwrap();
        assert_eq!(unit, ScalarUnit::new(0.5, -4.0));
        assert_eq!(unit.to_string(), "{0.5,-4}");

        assert_eq!(
            "0.5,4".parse::<ScalarUnit>(),
            Err(ParseUnitError::MissingBraces("0.5,4".to_owned()))
        );
        assert!(matches!(
            "{1,2,3}".parse::<ScalarUnit>(),
            Err(ParseUnitError::ComponentCount { expected: 2, found: 3 })
        ));
        assert!(matches!(
            "{x,2}".parse::<ScalarUnit>(),
            Err(ParseUnitError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_rect_text_form() {
        let rect: URect = "{{0,5},{0,6},{1,-5},{1,-6}}".parse().unwrap();
        assert_eq!(rect.min, UVector2::new(ScalarUnit::absolute(5.0), ScalarUnit::absolute(6.0)));
        assert_eq!(rect.width(), ScalarUnit::new(1.0, -10.0));
        assert_eq!(rect.to_string().parse::<URect>().unwrap(), rect);

        assert!(matches!(
            "{{0,5},{0,6}}".parse::<URect>(),
            Err(ParseUnitError::ComponentCount { expected: 4, found: 2 })
        ));
    }

    #[test]
    fn test_rect_position_and_size() {
        let mut rect = URect::from_position_size(
            UVector2::new(ScalarUnit::absolute(10.0), ScalarUnit::relative(0.5)),
            USize::new(ScalarUnit::absolute(100.0), ScalarUnit::relative(0.25)),
        );
        assert_eq!(rect.max.x, ScalarUnit::absolute(110.0));
        assert_eq!(rect.max.y, ScalarUnit::relative(0.75));

        rect.set_position(UVector2::default());
        assert_eq!(
            rect.size(),
            USize::new(ScalarUnit::absolute(100.0), ScalarUnit::relative(0.25))
        );
    }
}
