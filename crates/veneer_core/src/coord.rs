//! # Coordinate Resolution
//!
//! Turns unified values into pixels once the base length is known.
//!
//! Pixel alignment rounds half away from zero, so `2.5` becomes `3` and
//! `-2.5` becomes `-3`. Everything that lands on screen goes through
//! [`align_to_pixels`] so adjacent widgets never leave hairline gaps.

use crate::geometry::{Alignment, Rect, Size, Vec2};
use crate::unified::{is_near_zero, ScalarUnit, URect, USize, UVector2};

/// Rounds to the nearest whole pixel, half away from zero.
#[inline]
#[must_use]
pub fn align_to_pixels(value: f32) -> f32 {
    value.round()
}

/// Resolves `unit` against `base` as `base * scale + offset`.
#[inline]
#[must_use]
pub fn to_absolute(unit: ScalarUnit, base: f32, pixel_align: bool) -> f32 {
    let value = base * unit.scale + unit.offset;
    if pixel_align {
        align_to_pixels(value)
    } else {
        value
    }
}

/// Expresses `unit` as a fraction of `base`.
///
/// A ~0 base yields 0.
#[inline]
#[must_use]
pub fn to_relative(unit: ScalarUnit, base: f32) -> f32 {
    if is_near_zero(base) {
        0.0
    } else {
        unit.offset / base + unit.scale
    }
}

/// Resolves a vector, x against `base.width` and y against `base.height`.
#[must_use]
pub fn vector_to_absolute(vector: UVector2, base: Size, pixel_align: bool) -> Vec2 {
    Vec2::new(
        to_absolute(vector.x, base.width, pixel_align),
        to_absolute(vector.y, base.height, pixel_align),
    )
}

/// Expresses a vector as fractions of `base`.
#[must_use]
pub fn vector_to_relative(vector: UVector2, base: Size) -> Vec2 {
    Vec2::new(
        to_relative(vector.x, base.width),
        to_relative(vector.y, base.height),
    )
}

/// Resolves a size against `base`.
#[must_use]
pub fn size_to_absolute(size: USize, base: Size, pixel_align: bool) -> Size {
    Size::new(
        to_absolute(size.width, base.width, pixel_align),
        to_absolute(size.height, base.height, pixel_align),
    )
}

/// Expresses a size as fractions of `base`.
#[must_use]
pub fn size_to_relative(size: USize, base: Size) -> Size {
    Size::new(
        to_relative(size.width, base.width),
        to_relative(size.height, base.height),
    )
}

/// Resolves all four edges of a rectangle against `base`.
#[must_use]
pub fn rect_to_absolute(rect: URect, base: Size, pixel_align: bool) -> Rect {
    let min = vector_to_absolute(rect.min, base, pixel_align);
    let max = vector_to_absolute(rect.max, base, pixel_align);
    Rect::from_edges(min.x, min.y, max.x, max.y)
}

/// Computes the screen-space origin of a child.
///
/// `parent_area` is the absolute area the child is laid out in, `position`
/// the child's unified top-left and `pixel_size` its resolved size. The
/// alignments distribute whatever slack the parent leaves on each axis.
#[must_use]
pub fn resolve_origin(
    parent_area: Rect,
    position: UVector2,
    pixel_size: Size,
    horizontal: Alignment,
    vertical: Alignment,
) -> Vec2 {
    let x = parent_area.x
        + to_absolute(position.x, parent_area.width, false)
        + horizontal.correction(parent_area.width, pixel_size.width);
    let y = parent_area.y
        + to_absolute(position.y, parent_area.height, false)
        + vertical.correction(parent_area.height, pixel_size.height);

    Vec2::new(align_to_pixels(x), align_to_pixels(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_alignment_rounds_half_away_from_zero() {
        let cases = [(2.4, 2.0), (2.5, 3.0), (-2.4, -2.0), (-2.5, -3.0), (0.0, 0.0)];
        for (input, expected) in cases {
            assert_eq!(to_absolute(ScalarUnit::absolute(input), 0.0, true), expected);
        }
    }

    #[test]
    fn test_absolute_blends_scale_and_offset() {
        let unit = ScalarUnit::new(0.5, 10.0);
        assert_eq!(to_absolute(unit, 200.0, false), 110.0);
        assert_eq!(to_absolute(ScalarUnit::new(0.333, 0.0), 100.0, true), 33.0);
    }

    #[test]
    fn test_relative_guards_zero_base() {
        assert_eq!(to_relative(ScalarUnit::new(0.5, 10.0), 0.0), 0.0);
        assert!((to_relative(ScalarUnit::new(0.5, 10.0), 100.0) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_round_trip_law() {
        let units = [
            ScalarUnit::new(0.5, 10.0),
            ScalarUnit::new(-0.25, 3.5),
            ScalarUnit::new(1.0, 0.0),
            ScalarUnit::absolute(-42.0),
        ];
        for base in [1.0_f32, 64.0, 333.0, -50.0] {
            for unit in units {
                let absolute = to_absolute(unit, base, false);
                let relative = to_relative(ScalarUnit::absolute(absolute), base);
                assert!((relative - to_relative(unit, base)).abs() < 1e-5);

                let back = to_absolute(ScalarUnit::relative(relative), base, false);
                assert!((back - absolute).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_composite_overloads() {
        let base = Size::new(200.0, 100.0);
        let rect = URect::new(
            ScalarUnit::new(0.0, 10.0),
            ScalarUnit::new(0.5, 0.0),
            ScalarUnit::new(1.0, -10.0),
            ScalarUnit::new(1.0, 0.0),
        );
        assert_eq!(rect_to_absolute(rect, base, true), Rect::new(10.0, 50.0, 180.0, 50.0));
        assert_eq!(
            size_to_absolute(rect.size(), base, true),
            Size::new(180.0, 50.0)
        );
        let relative = vector_to_relative(rect.min, base);
        assert!((relative.x - 0.05).abs() < 1e-6 && (relative.y - 0.5).abs() < 1e-6);
        let relative = size_to_relative(rect.size(), base);
        assert!((relative.width - 0.9).abs() < 1e-6 && (relative.height - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_resolve_origin_alignments() {
        let parent = Rect::new(100.0, 50.0, 400.0, 300.0);
        let position = UVector2::new(ScalarUnit::absolute(10.0), ScalarUnit::relative(0.1));
        let size = Size::new(101.0, 100.0);

        assert_eq!(
            resolve_origin(parent, position, size, Alignment::Start, Alignment::Start),
            Vec2::new(110.0, 80.0)
        );
        // (400 - 101) / 2 = 149.5, rounded after summing
        assert_eq!(
            resolve_origin(parent, position, size, Alignment::Center, Alignment::End),
            Vec2::new(260.0, 280.0)
        );
    }
}
