//! Playthrough-wide state that survives scene changes: story flags, the
//! defeated-enemy set and the player's belongings. All of it is reset on a
//! full restart.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// Named boolean flags. Absent flags read as false.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryFlags(BTreeMap<String, bool>);

impl StoryFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    pub fn set(&mut self, name: impl Into<String>, value: bool) {
        self.0.insert(name.into(), value);
    }

    pub fn raise(&mut self, name: impl Into<String>) {
        self.set(name, true);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for StoryFlags {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Ids of enemies killed this playthrough; they do not respawn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefeatedEnemies(HashSet<String>);

impl DefeatedEnemies {
    pub fn record(&mut self, id: impl Into<String>) {
        self.0.insert(id.into());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Inventory and currency carried between scenes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerData {
    pub inventory: Vec<String>,
    pub currency: u32,
}

impl PlayerData {
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    /// Add `item` unless it is already held.
    pub fn give_item(&mut self, item: impl Into<String>) {
        let item = item.into();
        if !self.has_item(&item) {
            self.inventory.push(item);
        }
    }

    pub fn remove_item(&mut self, item: &str) -> bool {
        let before = self.inventory.len();
        self.inventory.retain(|i| i != item);
        self.inventory.len() != before
    }
}
