//! Widget tree for hierarchical UI management.

use std::collections::HashMap;

use veneer_core::coord;
use veneer_core::{Alignment, Size, URect};

use super::{Widget, WidgetId, WidgetState};
use crate::config::SkinConfig;
use crate::resources::{Font, Image, ResourceCache, ResourceProvider};

/// Manages the widget hierarchy and the resources its widgets refer to.
pub struct WidgetTree {
    /// Widget states indexed by ID.
    widgets: HashMap<WidgetId, WidgetState>,
    /// Root widget IDs.
    roots: Vec<WidgetId>,
    /// Parent-child relationships.
    children: HashMap<WidgetId, Vec<WidgetId>>,
    /// ID counter for generating unique IDs.
    next_id: u64,
    /// Fonts, images and display size.
    resources: ResourceCache,
    /// Round resolved sizes to whole pixels.
    pixel_align: bool,
}

impl WidgetTree {
    /// Creates a new empty widget tree using `resources`.
    #[must_use]
    pub fn new(resources: ResourceCache) -> Self {
        Self {
            widgets: HashMap::with_capacity(64),
            roots: Vec::with_capacity(4),
            children: HashMap::with_capacity(64),
            next_id: 1,
            resources,
            pixel_align: true,
        }
    }

    /// Creates an empty tree with the resources and rounding in `config`.
    #[must_use]
    pub fn from_config(config: &SkinConfig) -> Self {
        let mut tree = Self::new(ResourceCache::from_config(config));
        tree.pixel_align = config.pixel_align;
        tree
    }

    /// Generates a new unique widget ID.
    pub fn next_id(&mut self) -> WidgetId {
        let id = WidgetId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Registers a root widget.
    pub fn add_root(&mut self, state: WidgetState) -> WidgetId {
        let id = state.id;
        let mut state = state;
        state.parent = None;

        self.widgets.insert(id, state);
        self.roots.push(id);
        self.children.insert(id, Vec::new());
        id
    }

    /// Adds a child widget to a parent.
    pub fn add_child(&mut self, parent: WidgetId, state: WidgetState) -> WidgetId {
        let id = state.id;
        let mut state = state;
        state.parent = Some(parent);

        self.widgets.insert(id, state);
        self.children.entry(parent).or_default().push(id);
        self.children.insert(id, Vec::new());
        id
    }

    /// Removes a widget and all its children.
    pub fn remove(&mut self, id: WidgetId) {
        if let Some(children) = self.children.remove(&id) {
            for child in children {
                self.remove(child);
            }
        }

        if let Some(parent) = self.widgets.get(&id).and_then(|state| state.parent) {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|&c| c != id);
            }
        }

        self.roots.retain(|&r| r != id);
        self.widgets.remove(&id);
    }

    /// Gets a widget state by ID.
    #[must_use]
    pub fn get(&self, id: WidgetId) -> Option<&WidgetState> {
        self.widgets.get(&id)
    }

    /// Gets mutable access to a widget state.
    #[must_use]
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetState> {
        self.widgets.get_mut(&id)
    }

    /// Replaces a widget's unified area. Returns false if the widget is unknown.
    pub fn set_area(&mut self, id: WidgetId, area: URect) -> bool {
        match self.widgets.get_mut(&id) {
            Some(state) => {
                state.area = area;
                true
            }
            None => false,
        }
    }

    /// Returns the children of a widget.
    #[must_use]
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns all root widgets.
    #[must_use]
    pub fn roots(&self) -> &[WidgetId] {
        &self.roots
    }

    /// Returns all widget IDs in depth-first order.
    pub fn iter_dfs(&self) -> impl Iterator<Item = WidgetId> + '_ {
        WidgetDfsIterator {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Returns `id` followed by all its descendants in depth-first order.
    pub fn iter_subtree(&self, id: WidgetId) -> impl Iterator<Item = WidgetId> + '_ {
        WidgetDfsIterator {
            tree: self,
            stack: vec![id],
        }
    }

    /// Returns a [`Widget`] view of a widget.
    #[must_use]
    pub fn widget(&self, id: WidgetId) -> Option<WidgetRef<'_>> {
        self.widgets.get(&id).map(|state| WidgetRef { tree: self, state })
    }

    /// Finds a descendant of `id` by `/`-separated name path.
    #[must_use]
    pub fn find_child(&self, id: WidgetId, path: &str) -> Option<WidgetId> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(id, |current, segment| {
                self.children(current)
                    .iter()
                    .copied()
                    .find(|child| self.widgets.get(child).is_some_and(|s| s.name == segment))
            })
    }

    /// Returns the resolved pixel size of a widget, or zero if unknown.
    #[must_use]
    pub fn pixel_size(&self, id: WidgetId) -> Size {
        match self.widgets.get(&id) {
            Some(state) => {
                let base = self.parent_pixel_size_of(state);
                coord::size_to_absolute(state.area.size(), base, self.pixel_align)
            }
            None => Size::ZERO,
        }
    }

    /// Returns the resources widgets in this tree refer to.
    #[must_use]
    pub fn resources(&self) -> &ResourceCache {
        &self.resources
    }

    /// Returns mutable access to the resources.
    pub fn resources_mut(&mut self) -> &mut ResourceCache {
        &mut self.resources
    }

    /// Changes the rendering size of a registered font.
    ///
    /// Returns false if no font has that name.
    pub fn set_font_point_size(&mut self, font: &str, point_size: f32) -> bool {
        match self.resources.font_mut(font) {
            Some(font) => {
                font.set_point_size(point_size);
                true
            }
            None => false,
        }
    }

    fn parent_pixel_size_of(&self, state: &WidgetState) -> Size {
        match state.parent {
            Some(parent) => self.pixel_size(parent),
            None => self.resources.display_size(),
        }
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::from_config(&SkinConfig::default())
    }
}

impl ResourceProvider for WidgetTree {
    fn font(&self, name: &str) -> Option<&dyn Font> {
        self.resources.font(name)
    }

    fn image(&self, name: &str) -> Option<&dyn Image> {
        self.resources.image(name)
    }

    fn display_size(&self) -> Size {
        self.resources.display_size()
    }
}

/// Borrowed view of one widget in a [`WidgetTree`].
#[derive(Clone, Copy)]
pub struct WidgetRef<'a> {
    tree: &'a WidgetTree,
    state: &'a WidgetState,
}

impl<'a> WidgetRef<'a> {
    /// Returns the widget's ID.
    #[must_use]
    pub fn id(&self) -> WidgetId {
        self.state.id
    }

    /// Returns the widget's state.
    #[must_use]
    pub fn state(&self) -> &'a WidgetState {
        self.state
    }
}

impl Widget for WidgetRef<'_> {
    fn name(&self) -> &str {
        &self.state.name
    }

    fn child(&self, path: &str) -> Option<Box<dyn Widget + '_>> {
        let id = self.tree.find_child(self.state.id, path)?;
        let child = self.tree.widget(id)?;
        Some(Box::new(child))
    }

    fn parent(&self) -> Option<Box<dyn Widget + '_>> {
        let parent = self.tree.widget(self.state.parent?)?;
        Some(Box::new(parent))
    }

    fn pixel_size(&self) -> Size {
        self.tree.pixel_size(self.state.id)
    }

    fn parent_pixel_size(&self) -> Size {
        self.tree.parent_pixel_size_of(self.state)
    }

    fn area(&self) -> URect {
        self.state.area
    }

    fn horizontal_alignment(&self) -> Alignment {
        self.state.horizontal_alignment
    }

    fn vertical_alignment(&self) -> Alignment {
        self.state.vertical_alignment
    }

    fn font_name(&self) -> Option<&str> {
        self.state.font.as_deref()
    }

    fn text(&self) -> &str {
        &self.state.text
    }

    fn property(&self, name: &str) -> Option<&str> {
        self.state
            .properties
            .get(name)
            .map(|property| property.value.as_str())
    }

    fn property_type_name(&self, name: &str) -> Option<&str> {
        self.state
            .properties
            .get(name)
            .map(|property| property.type_name.as_str())
    }
}

/// Depth-first iterator over widget tree.
struct WidgetDfsIterator<'a> {
    tree: &'a WidgetTree,
    stack: Vec<WidgetId>,
}

impl Iterator for WidgetDfsIterator<'_> {
    type Item = WidgetId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;

        // Push children in reverse order so they're processed left-to-right
        if let Some(children) = self.tree.children.get(&id) {
            for &child in children.iter().rev() {
                self.stack.push(child);
            }
        }

        Some(id)
    }
}
