//! # Layout Cache
//!
//! Resolved component areas keyed by widget and area name. A cached rect is
//! reused until its widget or an ancestor is invalidated, the area definition
//! changes, or a font it depends on changes size.
//!
//! ```text
//!   resolve(widget, "ClientArea", area)
//!         │
//!         ├── hit, same definition ──► cached Rect
//!         └── miss ──► ComponentArea::pixel_rect ──► store ──► Rect
//!
//!   font_size_changed(font) ──► drop every entry whose area reads `font`
//!   invalidate_widget(id)   ──► drop entries of `id` and its descendants
//! ```

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;
use veneer_core::Rect;

use crate::dimension::{ComponentArea, EvalContext};
use crate::error::{DimensionError, DimensionResult};
use crate::resources::Font;
use crate::widget::{WidgetId, WidgetTree};

#[derive(Debug, Clone)]
struct CachedArea {
    area: ComponentArea,
    rect: Rect,
}

/// Thread-safe cache of resolved areas.
#[derive(Debug, Default)]
pub struct LayoutCache {
    entries: RwLock<HashMap<(WidgetId, String), CachedArea>>,
}

impl LayoutCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pixel rect of `area` on `widget`, computing it on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::InvalidRequest`] if `widget` is not in
    /// `tree`, and propagates evaluation errors. Failures are not cached.
    pub fn resolve(
        &self,
        tree: &WidgetTree,
        widget: WidgetId,
        name: &str,
        area: &ComponentArea,
    ) -> DimensionResult<Rect> {
        let key = (widget, name.to_owned());
        if let Some(cached) = self.entries.read().get(&key) {
            if cached.area == *area {
                return Ok(cached.rect);
            }
        }

        let widget_ref = tree
            .widget(widget)
            .ok_or_else(|| DimensionError::InvalidRequest(format!("unknown widget {widget:?}")))?;
        let rect = area.pixel_rect(&EvalContext::new(&widget_ref, tree))?;

        self.entries.write().insert(
            key,
            CachedArea {
                area: area.clone(),
                rect,
            },
        );
        Ok(rect)
    }

    /// Drops every entry whose area depends on `font`, and entries for
    /// widgets no longer in `tree`. Returns how many were dropped.
    pub fn font_size_changed(&self, tree: &WidgetTree, font: &dyn Font) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|(id, _), cached| match tree.widget(*id) {
            Some(widget) => !cached.area.handles_font_size_change(&widget, tree, font),
            None => false,
        });
        let dropped = before - entries.len();
        tracing::debug!("font `{}` changed size, dropped {} cached areas", font.name(), dropped);
        dropped
    }

    /// Drops every entry for `widget` and its descendants in `tree`, whose
    /// pixel sizes derive from it. Call after changing its geometry.
    /// Returns how many were dropped.
    pub fn invalidate_widget(&self, tree: &WidgetTree, widget: WidgetId) -> usize {
        let stale: HashSet<WidgetId> = tree.iter_subtree(widget).collect();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|(id, _), _| !stale.contains(id));
        let dropped = before - entries.len();
        tracing::debug!("widget {:?} invalidated, dropped {} cached areas", widget, dropped);
        dropped
    }

    /// Returns true if an entry exists for `widget` and `name`.
    #[must_use]
    pub fn contains(&self, widget: WidgetId, name: &str) -> bool {
        self.entries.read().contains_key(&(widget, name.to_owned()))
    }

    /// Drops everything.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of cached areas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
