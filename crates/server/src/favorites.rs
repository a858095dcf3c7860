//! Per-user favorite titles.

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

/// Storage for favorite titles, keyed by user
pub trait FavoritesStore: Send + Sync {
    /// Favorites of a user, empty if they have none
    fn get(&self, user: &str) -> BTreeSet<String>;

    /// Add a title; returns false if it was already a favorite
    fn put(&self, user: &str, title: &str) -> bool;
}

/// Process-local favorites
#[derive(Debug, Default)]
pub struct InMemoryFavorites {
    users: RwLock<HashMap<String, BTreeSet<String>>>,
}

impl InMemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoritesStore for InMemoryFavorites {
    fn get(&self, user: &str) -> BTreeSet<String> {
        // A poisoned lock still holds consistent sets: every write is a single insert
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        users.get(user).cloned().unwrap_or_default()
    }

    fn put(&self, user: &str, title: &str) -> bool {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users
            .entry(user.to_string())
            .or_default()
            .insert(title.to_string())
    }
}
