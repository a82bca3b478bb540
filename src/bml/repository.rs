use crate::ids::{AccountId, CustomerId};
use crate::{Account, Customer};

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

/// Anything stored in a `Repository` is keyed by its own identity
pub trait Identifiable {
    type Id: Clone + Eq + Hash + Debug;

    fn id(&self) -> &Self::Id;
}

impl Identifiable for Customer {
    type Id = CustomerId;

    fn id(&self) -> &CustomerId {
        Customer::id(self)
    }
}

impl Identifiable for Account {
    type Id = AccountId;

    fn id(&self) -> &AccountId {
        Account::id(self)
    }
}

#[derive(Debug)]
struct Store<T: Identifiable> {
    entries: Vec<Arc<T>>,
    index: HashMap<T::Id, usize>,
}

/// Insertion-ordered keyed store. One coarse lock serializes `save` against readers; readers
/// get shared handles or snapshots, never the backing collection.
#[derive(Debug)]
pub struct Repository<T: Identifiable> {
    store: RwLock<Store<T>>,
}

impl<T: Identifiable> Repository<T> {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                entries: Vec::new(),
                index: HashMap::new(),
            }),
        }
    }

    /// Inserts or replaces by identity. A replaced entity keeps its original position.
    pub fn save(&self, entity: T) -> Arc<T> {
        let entity = Arc::new(entity);
        let id = entity.id().clone();

        let mut store = self.store.write();

        match store.index.get(&id).copied() {
            Some(position) => store.entries[position] = Arc::clone(&entity),
            None => {
                let position = store.entries.len();
                store.entries.push(Arc::clone(&entity));
                store.index.insert(id, position);
            }
        }

        entity
    }

    /// Replaces the entity under `id` with `update(current)` while holding the write lock
    pub fn update(&self, id: &T::Id, update: impl FnOnce(&T) -> T) -> Option<Arc<T>> {
        let mut store = self.store.write();

        let position = store.index.get(id).copied()?;
        let updated = Arc::new(update(&store.entries[position]));

        store.entries[position] = Arc::clone(&updated);

        Some(updated)
    }

    pub fn find(&self, id: &T::Id) -> Option<Arc<T>> {
        let store = self.store.read();

        store
            .index
            .get(id)
            .map(|position| Arc::clone(&store.entries[*position]))
    }

    pub fn exists(&self, id: &T::Id) -> bool {
        self.store.read().index.contains_key(id)
    }

    /// Snapshot of every entity in first-insertion order
    pub fn all(&self) -> Vec<Arc<T>> {
        self.store.read().entries.clone()
    }

    pub fn len(&self) -> usize {
        self.store.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Identifiable> Default for Repository<T> {
    fn default() -> Self {
        Self::new()
    }
}
