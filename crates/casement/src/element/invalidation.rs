//! Layout invalidation and deferred recalculation.
//!
//! Changes to a container's children mark the container dirty instead of
//! laying it out on the spot. Once the outermost tree operation finishes,
//! dirty containers are laid out deepest first, so a container always sees
//! its children's final sizes. Each layout pass may dirty the parent in turn,
//! which then gets its own pass.

use std::collections::HashSet;

use casement_core::ElementId;

/// Set of containers awaiting a layout pass.
#[derive(Debug, Default)]
pub struct LayoutInvalidator {
    dirty_layouts: HashSet<ElementId>,
}

impl LayoutInvalidator {
    /// Create a new layout invalidator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a container's layout as needing recalculation.
    ///
    /// Repeated invalidations before the next pass coalesce.
    pub fn invalidate(&mut self, id: ElementId) {
        self.dirty_layouts.insert(id);
    }

    #[inline]
    pub fn is_dirty(&self, id: ElementId) -> bool {
        self.dirty_layouts.contains(&id)
    }

    #[inline]
    pub fn has_dirty_layouts(&self) -> bool {
        !self.dirty_layouts.is_empty()
    }

    /// Clear the dirty flag for a specific container.
    pub fn clear(&mut self, id: ElementId) {
        self.dirty_layouts.remove(&id);
    }

    /// Clear all dirty flags.
    pub fn clear_all(&mut self) {
        self.dirty_layouts.clear();
    }

    /// Remove and return the dirty container furthest from its root.
    ///
    /// `depth_of` returns `None` for IDs that no longer exist; those are
    /// dropped. Ties are broken by ID so passes are deterministic.
    pub fn take_deepest(
        &mut self,
        depth_of: impl Fn(ElementId) -> Option<usize>,
    ) -> Option<ElementId> {
        self.dirty_layouts.retain(|id| depth_of(*id).is_some());
        let deepest = self
            .dirty_layouts
            .iter()
            .filter_map(|id| depth_of(*id).map(|depth| (depth, *id)))
            .max_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(&a.1)))
            .map(|(_, id)| id)?;
        self.dirty_layouts.remove(&deepest);
        Some(deepest)
    }
}
