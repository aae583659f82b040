//! Id-addressed element storage
//!
//! Ids are slot indices. A removed slot becomes a tombstone and its id is
//! handed out again by the next `add`, lowest free id first, so the ids of
//! surviving elements never move.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::element::{HudElement, HudElementDef, StatUpdate};

/// Identifier of a live element in an [`ElementStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HudId(pub u32);

impl HudId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Default)]
pub struct ElementStore {
    slots: Vec<Option<HudElement>>,
    free: BTreeSet<u32>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an element and returns its id, reusing the lowest free id
    pub fn add(&mut self, element: impl Into<HudElement>) -> HudId {
        let element = element.into();
        match self.free.pop_first() {
            Some(id) => {
                self.slots[id as usize] = Some(element);
                HudId(id)
            }
            None => {
                self.slots.push(Some(element));
                HudId(self.slots.len() as u32 - 1)
            }
        }
    }

    /// Convenience for callers holding the flat script description
    pub fn add_def(&mut self, def: HudElementDef) -> HudId {
        self.add(HudElement::from(def))
    }

    /// Removes the element at `id`; returns it if one was there
    ///
    /// Removing an absent id is a no-op, since duplicate removals from
    /// scripts are expected.
    pub fn remove(&mut self, id: HudId) -> Option<HudElement> {
        let removed = self.slots.get_mut(id.index()).and_then(Option::take);
        match removed {
            Some(element) => {
                self.free.insert(id.0);
                Some(element)
            }
            None => {
                log::debug!("hud: remove of absent element {}", id.0);
                None
            }
        }
    }

    /// Updates exactly one field of the element at `id`
    ///
    /// Returns whether the field was written. Absent ids and fields the
    /// element's kind does not carry are logged and ignored.
    pub fn set_stat(&mut self, id: HudId, update: StatUpdate) -> bool {
        let Some(element) = self.get_mut(id) else {
            log::warn!(
                "hud: stat {:?} for absent element {}, ignoring",
                update.stat(),
                id.0
            );
            return false;
        };

        let stat = update.stat();
        let applied = element.apply(update);
        if !applied {
            log::debug!(
                "hud: {:?} element {} has no {:?} field, ignoring",
                element.kind(),
                id.0,
                stat
            );
        }
        applied
    }

    pub fn get(&self, id: HudId) -> Option<&HudElement> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: HudId) -> Option<&mut HudElement> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: HudId) -> bool {
        self.get(id).is_some()
    }

    /// Live elements in ascending id order, which is also draw order
    pub fn iter(&self) -> impl Iterator<Item = (HudId, &HudElement)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|e| (HudId(i as u32), e)))
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    #[allow(dead_code)] // Pairs with len
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::element::{HudElementKind, TextElement};
    use glam::{DVec3, Vec2};
    use std::collections::HashSet;

    fn text_def(text: &str) -> HudElementDef {
        HudElementDef {
            kind: HudElementKind::Text,
            position: Vec2::new(0.5, 0.9),
            text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_set_text_changes_only_text() {
        let mut store = ElementStore::new();
        let id = store.add_def(text_def("Hello"));
        assert_eq!(id, HudId(0));

        let before = store.get(id).cloned().unwrap();
        assert!(store.set_stat(id, StatUpdate::Text("World".to_string())));

        let HudElement::Text(after) = store.get(id).unwrap() else {
            panic!("kind changed");
        };
        let HudElement::Text(before) = before else {
            unreachable!()
        };
        assert_eq!(after.text, "World");
        assert_eq!(
            *after,
            TextElement {
                text: "World".to_string(),
                ..before
            }
        );
    }

    #[test]
    fn test_ids_are_unique_and_lowest_free_is_reused() {
        let mut store = ElementStore::new();
        let ids: Vec<HudId> = (0..5).map(|i| store.add_def(text_def(&i.to_string()))).collect();
        assert_eq!(ids, vec![HudId(0), HudId(1), HudId(2), HudId(3), HudId(4)]);

        store.remove(HudId(3));
        store.remove(HudId(1));
        assert_eq!(store.add_def(text_def("a")), HudId(1));
        assert_eq!(store.add_def(text_def("b")), HudId(3));
        assert_eq!(store.add_def(text_def("c")), HudId(5));

        let live: HashSet<HudId> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(live.len(), store.len());
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn test_remove_twice_matches_remove_once() {
        let mut store = ElementStore::new();
        let a = store.add_def(text_def("a"));
        let b = store.add_def(text_def("b"));

        assert!(store.remove(a).is_some());
        assert!(store.remove(a).is_none());
        assert_eq!(store.len(), 1);
        assert!(store.contains(b));

        // a single reuse proves the free list holds the id only once
        assert_eq!(store.add_def(text_def("c")), a);
        assert_eq!(store.add_def(text_def("d")), HudId(2));
    }

    #[test]
    fn test_removed_id_is_unreachable() {
        let mut store = ElementStore::new();
        let id = store.add_def(text_def("gone"));
        store.remove(id);

        assert!(!store.set_stat(id, StatUpdate::Text("late".to_string())));
        assert!(store.get(id).is_none());
        assert_eq!(store.iter().count(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut store = ElementStore::new();
        assert!(!store.set_stat(HudId(7), StatUpdate::Number(1)));
        assert!(store.remove(HudId(7)).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_foreign_stat_leaves_element_untouched() {
        let mut store = ElementStore::new();
        let id = store.add_def(text_def("Hello"));
        let before = store.get(id).cloned();
        assert!(!store.set_stat(id, StatUpdate::WorldPosition(DVec3::new(1.0, 2.0, 3.0))));
        assert_eq!(store.get(id).cloned(), before);
    }

    #[test]
    fn test_iteration_is_ascending() {
        let mut store = ElementStore::new();
        for i in 0..4 {
            store.add_def(text_def(&i.to_string()));
        }
        store.remove(HudId(0));
        store.remove(HudId(2));
        store.add_def(text_def("again"));

        let order: Vec<u32> = store.iter().map(|(id, _)| id.0).collect();
        assert_eq!(order, vec![0, 1, 3]);
    }
}
