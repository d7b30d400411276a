use std::fmt;

use beatedit_core::{Shared, SubscriptionId};

use crate::geometry::Quad;
use crate::model::EditorShape;
use crate::shape_store::ShapeStore;

/// Receives selection change notifications.
pub trait SelectionListener {
    /// Called synchronously after the selected set changed.
    fn on_selection_changed(&mut self, store: &ShapeStore, selected: &[u64]);
}

/// Manages the ordered set of selected hit objects.
///
/// `SelectionManager` is responsible for:
/// - Tracking which objects are selected, in selection order
/// - Handling id-based and rectangle-based selection
/// - Notifying registered listeners whenever membership changes
///
/// # Selection Model
///
/// - **Order**: ids are kept in the order they were selected; the last one is
///   the "primary" selection
/// - **Multi-select**: `multi = true` adds to the selection instead of replacing it
/// - **Notifications**: listeners are only notified when membership actually changes
///
/// # Design
///
/// The manager never owns objects. Every mutating call takes the
/// [`ShapeStore`] so ids can be validated and listeners can inspect the
/// objects they were told about.
#[derive(Default)]
pub struct SelectionManager {
    selected: Vec<u64>,
    listeners: Vec<(SubscriptionId, Shared<dyn SelectionListener>)>,
}

impl fmt::Debug for SelectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionManager")
            .field("selected", &self.selected)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use beatedit_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert!(manager.selected_ids().is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` and immediately notifies it of the current selection.
    pub fn subscribe(
        &mut self,
        store: &ShapeStore,
        listener: Shared<dyn SelectionListener>,
    ) -> SubscriptionId {
        let id = SubscriptionId::new();
        match listener.try_borrow_mut() {
            Ok(mut l) => l.on_selection_changed(store, &self.selected),
            Err(_) => tracing::warn!("Selection listener {} busy during subscribe", id),
        }
        self.listeners.push((id, listener));
        tracing::debug!("Selection listener {} subscribed", id);
        id
    }

    /// Removes a listener. Returns `false` if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        before != self.listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Selected ids in selection order.
    pub fn selected_ids(&self) -> &[u64] {
        &self.selected
    }

    /// The most recently selected id.
    pub fn primary(&self) -> Option<u64> {
        self.selected.last().copied()
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selects an object by ID.
    ///
    /// # Arguments
    ///
    /// * `store` - The shape store the id must exist in
    /// * `id` - The ID of the object to select
    /// * `multi` - If `true`, adds to existing selection; if `false`, replaces it
    pub fn select_id(&mut self, store: &ShapeStore, id: u64, multi: bool) {
        if !store.contains(id) {
            tracing::debug!("Ignoring selection of unknown object {}", id);
            return;
        }

        let changed = if multi {
            self.push_unique(id)
        } else if self.selected.as_slice() != [id] {
            self.selected.clear();
            self.selected.push(id);
            true
        } else {
            false
        };

        if changed {
            self.notify(store);
        }
    }

    /// Toggles an object in or out of the selection.
    pub fn toggle(&mut self, store: &ShapeStore, id: u64) {
        if self.is_selected(id) {
            self.deselect(store, id);
        } else {
            self.select_id(store, id, true);
        }
    }

    pub fn deselect(&mut self, store: &ShapeStore, id: u64) {
        let before = self.selected.len();
        self.selected.retain(|&s| s != id);
        if before != self.selected.len() {
            self.notify(store);
        }
    }

    /// Replaces the selection with `ids`, skipping unknown and duplicate ids.
    pub fn set_selection(&mut self, store: &ShapeStore, ids: &[u64]) {
        let previous = std::mem::take(&mut self.selected);
        for &id in ids {
            if store.contains(id) {
                self.push_unique(id);
            }
        }
        if previous != self.selected {
            self.notify(store);
        }
    }

    /// Selects every object in the store, in id order.
    pub fn select_all(&mut self, store: &ShapeStore) {
        let ids: Vec<u64> = store.ids().collect();
        self.set_selection(store, &ids);
    }

    /// Deselects all objects.
    pub fn deselect_all(&mut self, store: &ShapeStore) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.notify(store);
        }
    }

    /// Selects all objects with an extent point inside `rect`.
    ///
    /// Objects without spatial extent are never hit by a rectangle.
    pub fn select_in_rect(&mut self, store: &ShapeStore, rect: Quad, multi: bool) {
        let previous = self.selected.clone();
        if !multi {
            self.selected.clear();
        }

        for (id, obj) in store.iter() {
            let mut hit = false;
            obj.for_each_extent_point(&mut |p| {
                hit |= p.x >= rect.top_left.x
                    && p.x <= rect.bottom_right.x
                    && p.y >= rect.top_left.y
                    && p.y <= rect.bottom_right.y;
            });
            if hit {
                self.push_unique(id);
            }
        }

        if previous != self.selected {
            self.notify(store);
        }
    }

    /// Drops ids that no longer exist in the store.
    pub fn prune(&mut self, store: &ShapeStore) {
        let before = self.selected.len();
        self.selected.retain(|&id| store.contains(id));
        if before != self.selected.len() {
            self.notify(store);
        }
    }

    /// Removes all selected objects from the store and clears the selection.
    pub fn remove_selected(&mut self, store: &mut ShapeStore) {
        if self.selected.is_empty() {
            return;
        }
        for id in self.selected.drain(..) {
            store.remove(id);
        }
        self.notify(store);
    }

    fn push_unique(&mut self, id: u64) -> bool {
        if self.selected.contains(&id) {
            false
        } else {
            self.selected.push(id);
            true
        }
    }

    fn notify(&self, store: &ShapeStore) {
        for (id, listener) in &self.listeners {
            match listener.try_borrow_mut() {
                Ok(mut l) => l.on_selection_changed(store, &self.selected),
                Err(_) => tracing::warn!("Selection listener {} busy, skipping notification", id),
            }
        }
    }
}
