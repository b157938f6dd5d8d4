//! # VENEER Core
//!
//! Unified lengths and the math that turns them into pixels.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  COORDINATE PIPELINE                      │
//! ├──────────────────────────────────────────────────────────┤
//! │  ScalarUnit ──► to_absolute(base) ──► align_to_pixels    │
//! │  URect      ──► rect_to_absolute(parent size) ──► Rect   │
//! │  UVector2   ──► resolve_origin(parent area) ──► Vec2     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use veneer_core::{coord, ScalarUnit};
//!
//! // Half the parent, minus 4 pixels.
//! let unit = ScalarUnit::new(0.5, -4.0);
//! assert_eq!(coord::to_absolute(unit, 301.0, true), 147.0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod coord;
pub mod geometry;
pub mod unified;

pub use geometry::{Alignment, Rect, Size, Vec2};
pub use unified::{ParseUnitError, ParseUnitResult, ScalarUnit, URect, USize, UVector2};
