//! What a dimension represents, and which axis it measures along.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use veneer_core::{Rect, Size};

/// The geometric role a dimension plays.
///
/// `XPosition` and `YPosition` in skin markup read as [`LeftEdge`] and
/// [`TopEdge`]. Unknown names read as [`Invalid`] so a malformed skin still
/// loads and fails only when the affected dimension is evaluated.
///
/// [`LeftEdge`]: DimensionRole::LeftEdge
/// [`TopEdge`]: DimensionRole::TopEdge
/// [`Invalid`]: DimensionRole::Invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimensionRole {
    /// Left edge.
    LeftEdge,
    /// Top edge.
    TopEdge,
    /// Right edge.
    RightEdge,
    /// Bottom edge.
    BottomEdge,
    /// Width.
    Width,
    /// Height.
    Height,
    /// Horizontal offset.
    XOffset,
    /// Vertical offset.
    YOffset,
    /// Unrecognised role.
    Invalid,
}

impl DimensionRole {
    /// Alias of [`DimensionRole::LeftEdge`].
    pub const X_POSITION: Self = Self::LeftEdge;
    /// Alias of [`DimensionRole::TopEdge`].
    pub const Y_POSITION: Self = Self::TopEdge;

    /// Returns the markup name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeftEdge => "LeftEdge",
            Self::TopEdge => "TopEdge",
            Self::RightEdge => "RightEdge",
            Self::BottomEdge => "BottomEdge",
            Self::Width => "Width",
            Self::Height => "Height",
            Self::XOffset => "XOffset",
            Self::YOffset => "YOffset",
            Self::Invalid => "Invalid",
        }
    }

    /// Returns the axis this role measures along, or `None` for `Invalid`.
    #[must_use]
    pub const fn axis(self) -> Option<RoleAxis> {
        match self {
            Self::LeftEdge | Self::RightEdge | Self::Width | Self::XOffset => {
                Some(RoleAxis::Horizontal)
            }
            Self::TopEdge | Self::BottomEdge | Self::Height | Self::YOffset => {
                Some(RoleAxis::Vertical)
            }
            Self::Invalid => None,
        }
    }
}

impl fmt::Display for DimensionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DimensionRole {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Infallible> {
        Ok(match s.trim() {
            "LeftEdge" | "XPosition" => Self::LeftEdge,
            "TopEdge" | "YPosition" => Self::TopEdge,
            "RightEdge" => Self::RightEdge,
            "BottomEdge" => Self::BottomEdge,
            "Width" => Self::Width,
            "Height" => Self::Height,
            "XOffset" => Self::XOffset,
            "YOffset" => Self::YOffset,
            other => {
                tracing::warn!("unknown dimension role `{}`", other);
                Self::Invalid
            }
        })
    }
}

/// Width-like or height-like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleAxis {
    /// Measured against widths.
    Horizontal,
    /// Measured against heights.
    Vertical,
}

impl RoleAxis {
    /// Picks the extent of `size` along this axis.
    #[must_use]
    pub const fn extent(self, size: Size) -> f32 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Picks the extent of `rect` along this axis.
    #[must_use]
    pub const fn rect_extent(self, rect: Rect) -> f32 {
        self.extent(rect.size())
    }

    /// The role written to markup for this axis.
    #[must_use]
    pub const fn role(self) -> DimensionRole {
        match self {
            Self::Horizontal => DimensionRole::Width,
            Self::Vertical => DimensionRole::Height,
        }
    }
}
