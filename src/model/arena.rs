// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The widget arena: an id-indexed store replacing the source's cyclic
//! widget/anchor/target object graph (§9 reshaping notes).

use smallvec::SmallVec;

use super::widget::{Widget, WidgetId, WidgetKind};

struct Slot {
    widget: Option<Widget>,
    children: SmallVec<[WidgetId; 8]>,
}

/// Owns every widget in a container, keyed by stable [`WidgetId`].
///
/// Ids are freed (and their slot reused) only when the host explicitly
/// removes a widget, per §3's lifecycle note — unlike the solver's pools,
/// this is not reset between layout passes.
#[derive(Default)]
pub struct WidgetArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl WidgetArena {
    pub fn insert(&mut self, widget: Widget) -> WidgetId {
        let parent = widget.parent;
        let id = if let Some(idx) = self.free.pop() {
            self.slots[idx as usize] = Slot { widget: Some(widget), children: SmallVec::new() };
            WidgetId(idx)
        } else {
            let id = WidgetId(self.slots.len() as u32);
            self.slots.push(Slot { widget: Some(widget), children: SmallVec::new() });
            id
        };
        if let Some(p) = parent {
            if let Some(slot) = self.slots.get_mut(p.index()) {
                slot.children.push(id);
            }
        }
        id
    }

    pub fn insert_guideline_or_barrier(&mut self, parent: WidgetId, kind: WidgetKind) -> WidgetId {
        let mut w = Widget::new(kind);
        w.parent = Some(parent);
        self.insert(w)
    }

    /// Detach and free `id`; does not recursively remove children (the
    /// host owns that policy).
    pub fn remove(&mut self, id: WidgetId) {
        if let Some(parent) = self.get(id).and_then(|w| w.parent) {
            if let Some(slot) = self.slots.get_mut(parent.index()) {
                slot.children.retain(|&c| c != id);
            }
        }
        if let Some(slot) = self.slots.get_mut(id.index()) {
            slot.widget = None;
            slot.children.clear();
            self.free.push(id.0);
        }
    }

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.slots.get(id.index()).and_then(|s| s.widget.as_ref())
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.slots.get_mut(id.index()).and_then(|s| s.widget.as_mut())
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.slots.get(id.index()).map(|s| s.children.as_slice()).unwrap_or(&[])
    }

    /// All live widget ids, in arena order (stable, used wherever layout
    /// needs a deterministic iteration order).
    pub fn ids(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.widget.is_some())
            .map(|(i, _)| WidgetId(i as u32))
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_track_through_insert_and_remove() {
        let mut arena = WidgetArena::default();
        let parent = arena.insert(Widget::new(WidgetKind::Normal));
        let mut child = Widget::new(WidgetKind::Normal);
        child.parent = Some(parent);
        let child_id = arena.insert(child);
        assert_eq!(arena.children(parent), &[child_id]);

        arena.remove(child_id);
        assert!(arena.children(parent).is_empty());
        assert!(arena.get(child_id).is_none());
    }

    #[test]
    fn freed_ids_are_reused() {
        let mut arena = WidgetArena::default();
        let a = arena.insert(Widget::new(WidgetKind::Normal));
        arena.remove(a);
        let b = arena.insert(Widget::new(WidgetKind::Normal));
        assert_eq!(a, b);
    }
}
