use super::repo::DeleteResult;
use std::sync::{Mutex, MutexGuard};
use weekfitter_notifier_domain::{Entity, ID};

/// Useful functions for creating inmemory repositories

// A panicking writer can not leave a `Vec` half updated, so a poisoned
// lock is still safe to read.
fn lock<T>(collection: &Mutex<Vec<T>>) -> MutexGuard<'_, Vec<T>> {
    collection
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = lock(collection);
    collection.push(val.clone());
}

pub fn save<T: Clone + Entity>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = lock(collection);
    if let Some(existing) = collection.iter_mut().find(|item| item.id() == val.id()) {
        *existing = val.clone();
    }
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = lock(collection);
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    mut compare: F,
) -> Vec<T> {
    let collection = lock(collection);
    collection
        .iter()
        .filter(|item| compare(item))
        .cloned()
        .collect()
}

pub fn delete<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = lock(collection);
    let index = collection.iter().position(|item| item.id() == val_id)?;
    Some(collection.remove(index))
}

pub fn delete_by<T: Clone, F: Fn(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> DeleteResult {
    let mut collection = lock(collection);
    let before = collection.len();
    collection.retain(|item| !compare(item));
    DeleteResult {
        deleted_count: (before - collection.len()) as u64,
    }
}

/// Applies `update` to every matching item and returns how many matched
pub fn update_many<T, F: Fn(&T) -> bool, U: Fn(&mut T)>(
    collection: &Mutex<Vec<T>>,
    compare: F,
    update: U,
) -> u64 {
    let mut collection = lock(collection);
    let mut updated = 0;
    for item in collection.iter_mut() {
        if compare(item) {
            update(item);
            updated += 1;
        }
    }
    updated
}
