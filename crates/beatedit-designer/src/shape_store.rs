//! Ownership of the hit objects placed on the playfield.

use std::collections::BTreeMap;

use crate::model::HitObject;

/// Owns every hit object, keyed by a stable id.
///
/// Ids are handed out in increasing order and never reused, so iteration in
/// id order is also creation order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeStore {
    objects: BTreeMap<u64, HitObject>,
    next_id: u64,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Generates a new unique ID.
    pub fn generate_id(&mut self) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id.saturating_add(1);
        id
    }

    /// Adds an object and returns its id.
    pub fn add(&mut self, object: impl Into<HitObject>) -> u64 {
        let id = self.generate_id();
        self.objects.insert(id, object.into());
        id
    }

    /// Inserts an object under an explicit id, replacing any previous one.
    pub fn insert(&mut self, id: u64, object: HitObject) -> Option<HitObject> {
        self.next_id = self.next_id.max(id.saturating_add(1));
        self.objects.insert(id, object)
    }

    pub fn remove(&mut self, id: u64) -> Option<HitObject> {
        self.objects.remove(&id)
    }

    pub fn get(&self, id: u64) -> Option<&HitObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut HitObject> {
        self.objects.get_mut(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn ids(&self) -> impl DoubleEndedIterator<Item = u64> + '_ {
        self.objects.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &HitObject)> {
        self.objects.iter().map(|(id, obj)| (*id, obj))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (u64, &mut HitObject)> {
        self.objects.iter_mut().map(|(id, obj)| (*id, obj))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
