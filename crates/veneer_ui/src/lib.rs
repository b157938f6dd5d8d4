//! # VENEER UI
//!
//! Skin-driven widget geometry. A skin describes sizes and positions as
//! dimension trees; this crate evaluates them against live widgets, fonts
//! and images.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     DIMENSION PIPELINE                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Skin markup → Element → DimensionNode → evaluate → pixels   │
//! │                              ↑     ↓                          │
//! │              Widget + ResourceProvider   XmlSink              │
//! │                                                               │
//! │  ComponentArea (4 × SemanticDimension) → Rect → LayoutCache   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use veneer_core::{ScalarUnit, URect};
//! use veneer_ui::dimension::{
//!     DimensionNode, DimensionOperator, DimensionRole, OperatorNode, UnifiedDim,
//! };
//! use veneer_ui::{EvalContext, WidgetState, WidgetTree};
//!
//! let mut tree = WidgetTree::default();
//! let id = tree.next_id();
//! tree.add_root(WidgetState::new(id, "frame").with_area(URect::new(
//!     ScalarUnit::ZERO,
//!     ScalarUnit::ZERO,
//!     ScalarUnit::absolute(200.0),
//!     ScalarUnit::absolute(100.0),
//! )));
//!
//! let half_width_plus_ten = DimensionNode::from(
//!     OperatorNode::builder(DimensionOperator::Add)
//!         .with_left(UnifiedDim::new(ScalarUnit::relative(0.5), DimensionRole::Width))
//!         .with_right(10.0_f32)
//!         .build()
//!         .unwrap(),
//! );
//!
//! let widget = tree.widget(id).unwrap();
//! let ctx = EvalContext::new(&widget, &tree);
//! assert_eq!(half_width_plus_ten.evaluate(&ctx), Ok(110.0));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod cache;
pub mod config;
pub mod dimension;
pub mod error;
pub mod resources;
pub mod widget;
pub mod xml;

pub use cache::LayoutCache;
pub use config::SkinConfig;
pub use dimension::{ComponentArea, DimensionNode, EvalContext, SemanticDimension};
pub use error::{DimensionError, DimensionResult};
pub use resources::{BitmapFont, Font, Image, ImageInfo, ResourceCache, ResourceProvider};
pub use widget::{Widget, WidgetId, WidgetRef, WidgetState, WidgetTree};
pub use xml::{Element, ElementBuilder, XmlSink, XmlWriter};
