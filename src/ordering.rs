//! Ordered Collection
//!
//! Copy-on-write sequence of uniquely identified records with a single
//! reposition primitive. Every operation returns a new snapshot and leaves the
//! receiver untouched, so readers holding an older snapshot never observe a
//! half-applied change.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::Entity;
use crate::error::{BoardError, BoardResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedCollection<T> {
    items: Arc<[T]>,
}

impl<T> Default for OrderedCollection<T> {
    fn default() -> Self {
        Self {
            items: Arc::from(Vec::new()),
        }
    }
}

impl<T> OrderedCollection<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Whether both snapshots share the same storage
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl<T: Entity> OrderedCollection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::from(items),
        }
    }

    pub fn position(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.position(id).is_some()
    }

    /// New snapshot with `item` at the end
    pub fn appended(&self, item: T) -> Self {
        let mut items = self.items.to_vec();
        items.push(item);
        Self::new(items)
    }

    /// New snapshot with the record sharing `item`'s id swapped out.
    ///
    /// Returns `None` when no record has that id.
    pub fn replaced(&self, item: T) -> Option<Self> {
        let index = self.position(item.id())?;
        let mut items = self.items.to_vec();
        items[index] = item;
        Some(Self::new(items))
    }

    /// New snapshot with the record for `id` rebuilt by `f`
    pub fn updated(&self, id: &T::Id, f: impl FnOnce(&T) -> T) -> Option<Self> {
        let index = self.position(id)?;
        let mut items = self.items.to_vec();
        items[index] = f(&items[index]);
        Some(Self::new(items))
    }

    /// New snapshot without the record for `id`; `None` when absent
    pub fn without(&self, id: &T::Id) -> Option<Self> {
        let index = self.position(id)?;
        let mut items = self.items.to_vec();
        items.remove(index);
        Some(Self::new(items))
    }

    /// Move `active` to the slot currently held by `over`.
    ///
    /// Elements between the two slots shift by one; every other element keeps
    /// its relative order. Both ids must be present, otherwise `NotFound` is
    /// returned and nothing changes. Moving an element onto itself returns the
    /// same snapshot.
    pub fn move_item(&self, active: &T::Id, over: &T::Id) -> BoardResult<Self> {
        let from = self
            .position(active)
            .ok_or_else(|| BoardError::not_found(active))?;
        let to = self
            .position(over)
            .ok_or_else(|| BoardError::not_found(over))?;

        if from == to {
            return Ok(self.clone());
        }

        let mut items = self.items.to_vec();
        let moved = items.remove(from);
        items.insert(to, moved);
        Ok(Self::new(items))
    }
}

impl<T: Entity> FromIterator<T> for OrderedCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a OrderedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
