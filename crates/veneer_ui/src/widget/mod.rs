//! Widget context consumed by dimensions.
//!
//! Dimensions never hold on to a widget. They receive a [`Widget`] for the
//! duration of one evaluation and ask it for sizes, fonts, text and
//! properties. [`WidgetTree`] is the reference implementation.

mod context;
mod tree;

pub use context::{
    resolve_widget_origin, widget_font, widget_screen_rect, with_target, PropertyValue, Widget,
    WidgetId, WidgetState,
};
pub use tree::{WidgetRef, WidgetTree};
