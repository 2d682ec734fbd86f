//! Persisted quiz progress: the wrong-answer list, the priority list and the
//! last viewed position for each mode.
//!
//! Every mutation writes the full value back to the store immediately, so each
//! key always holds a complete, consistent snapshot. The in-memory lists only
//! change once the write has succeeded.

use crate::error::StoreError;
use crate::logger;
use crate::models::{QuestionId, QuizMode, ReviewList};
use crate::store::KeyValueStore;

pub const PRACTICE_INDEX_KEY: &str = "mqb_practice_index";
pub const WRONG_LIST_KEY: &str = "mqb_wrong_list";
pub const REVIEW_INDEX_KEY: &str = "mqb_review_index";
pub const PRIORITY_LIST_KEY: &str = "mqb_priority_list";
pub const PRIORITY_INDEX_KEY: &str = "mqb_priority_index";

pub const ALL_KEYS: [&str; 5] = [
    PRACTICE_INDEX_KEY,
    WRONG_LIST_KEY,
    REVIEW_INDEX_KEY,
    PRIORITY_LIST_KEY,
    PRIORITY_INDEX_KEY,
];

pub fn index_key(mode: QuizMode) -> &'static str {
    match mode {
        QuizMode::Practice => PRACTICE_INDEX_KEY,
        QuizMode::ReviewWrong => REVIEW_INDEX_KEY,
        QuizMode::ReviewPriority => PRIORITY_INDEX_KEY,
    }
}

pub fn list_key(list: ReviewList) -> &'static str {
    match list {
        ReviewList::Wrong => WRONG_LIST_KEY,
        ReviewList::Priority => PRIORITY_LIST_KEY,
    }
}

pub struct Progress<S> {
    store: S,
    wrong_list: Vec<QuestionId>,
    priority_list: Vec<QuestionId>,
}

impl<S: KeyValueStore> Progress<S> {
    /// Restores both lists. Missing or unreadable values start empty.
    pub fn load(store: S) -> Self {
        let wrong_list = read_list(&store, WRONG_LIST_KEY);
        let priority_list = read_list(&store, PRIORITY_LIST_KEY);
        Self {
            store,
            wrong_list,
            priority_list,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list(&self, list: ReviewList) -> &[QuestionId] {
        match list {
            ReviewList::Wrong => &self.wrong_list,
            ReviewList::Priority => &self.priority_list,
        }
    }

    pub fn wrong_list(&self) -> &[QuestionId] {
        &self.wrong_list
    }

    pub fn priority_list(&self) -> &[QuestionId] {
        &self.priority_list
    }

    pub fn is_priority(&self, id: &QuestionId) -> bool {
        self.priority_list.contains(id)
    }

    /// Returns `true` if the id was not already recorded.
    pub fn add_wrong(&mut self, id: &QuestionId) -> Result<bool, StoreError> {
        if self.wrong_list.contains(id) {
            return Ok(false);
        }
        let mut updated = self.wrong_list.clone();
        updated.push(id.clone());
        self.commit_list(ReviewList::Wrong, updated)?;
        Ok(true)
    }

    /// Stars or unstars `id`. Returns whether it is starred afterwards.
    pub fn toggle_priority(&mut self, id: &QuestionId) -> Result<bool, StoreError> {
        let mut updated = self.priority_list.clone();
        let starred = match updated.iter().position(|p| p == id) {
            Some(pos) => {
                updated.remove(pos);
                false
            }
            None => {
                updated.push(id.clone());
                true
            }
        };
        self.commit_list(ReviewList::Priority, updated)?;
        Ok(starred)
    }

    pub fn remove_from(&mut self, list: ReviewList, id: &QuestionId) -> Result<(), StoreError> {
        let mut updated = self.list(list).to_vec();
        updated.retain(|existing| existing != id);
        self.commit_list(list, updated)
    }

    pub fn read_index(&self, key: &str) -> usize {
        match self.store.get(key) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                logger::warn(&format!("ignoring unparsable index {:?} for {}", raw, key));
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                logger::warn(&format!("reading {} failed: {}", key, e));
                0
            }
        }
    }

    pub fn write_index(&mut self, key: &str, index: usize) -> Result<(), StoreError> {
        self.store.set(key, &index.to_string())
    }

    pub fn remove_index(&mut self, key: &str) -> Result<(), StoreError> {
        self.store.remove(key)
    }

    /// Puts back a raw value captured before a failed multi-key update.
    pub(crate) fn restore_raw(&mut self, key: &str, previous: Option<&str>) {
        let restored = match previous {
            Some(value) => self.store.set(key, value),
            None => self.store.remove(key),
        };
        if let Err(e) = restored {
            logger::error(&format!("could not restore {} after a failed write: {}", key, e));
        }
    }

    pub(crate) fn raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.store.get(key)
    }

    /// Removes every persisted key and empties both lists. On a failed removal
    /// the keys already removed are written back and the lists are kept.
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        let mut snapshot = Vec::with_capacity(ALL_KEYS.len());
        for key in ALL_KEYS {
            snapshot.push((key, self.store.get(key)?));
        }

        for (done, key) in ALL_KEYS.iter().enumerate() {
            if let Err(e) = self.store.remove(key) {
                for (restored_key, previous) in &snapshot[..done] {
                    self.restore_raw(restored_key, previous.as_deref());
                }
                return Err(e);
            }
        }

        self.wrong_list.clear();
        self.priority_list.clear();
        logger::info("cleared all progress");
        Ok(())
    }

    /// Persists `ids` as the full value of `list`, then adopts it in memory.
    fn commit_list(&mut self, list: ReviewList, ids: Vec<QuestionId>) -> Result<(), StoreError> {
        let value = serde_json::to_string(&ids)?;
        self.store.set(list_key(list), &value)?;
        match list {
            ReviewList::Wrong => self.wrong_list = ids,
            ReviewList::Priority => self.priority_list = ids,
        }
        Ok(())
    }
}

fn read_list<S: KeyValueStore>(store: &S, key: &str) -> Vec<QuestionId> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            logger::warn(&format!("reading {} failed: {}", key, e));
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<QuestionId>>(&raw) {
        Ok(ids) => {
            let mut unique: Vec<QuestionId> = Vec::with_capacity(ids.len());
            for id in ids {
                if !unique.contains(&id) {
                    unique.push(id);
                }
            }
            unique
        }
        Err(e) => {
            logger::warn(&format!("ignoring unparsable list for {}: {}", key, e));
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::store::testing::FlakyStore;
    use std::collections::HashSet;

    fn id(s: &str) -> QuestionId {
        QuestionId::new(s)
    }

    #[test]
    fn test_load_defaults_when_keys_missing() {
        let progress = Progress::load(MemoryStore::new());
        assert!(progress.wrong_list().is_empty());
        assert!(progress.priority_list().is_empty());
        assert_eq!(progress.read_index(PRACTICE_INDEX_KEY), 0);
    }

    #[test]
    fn test_load_tolerates_garbage_values() {
        let mut store = MemoryStore::new();
        store.set(WRONG_LIST_KEY, "{not a list").unwrap();
        store.set(PRIORITY_LIST_KEY, "42").unwrap();
        store.set(PRACTICE_INDEX_KEY, "abc").unwrap();
        store.set(REVIEW_INDEX_KEY, "-3").unwrap();

        let progress = Progress::load(store);
        assert!(progress.wrong_list().is_empty());
        assert!(progress.priority_list().is_empty());
        assert_eq!(progress.read_index(PRACTICE_INDEX_KEY), 0);
        assert_eq!(progress.read_index(REVIEW_INDEX_KEY), 0);
    }

    #[test]
    fn test_load_accepts_numeric_ids_and_dedups() {
        let mut store = MemoryStore::new();
        store.set(WRONG_LIST_KEY, r#"[5, "9", 5]"#).unwrap();

        let progress = Progress::load(store);
        assert_eq!(progress.wrong_list(), &[id("5"), id("9")]);
    }

    #[test]
    fn test_add_wrong_is_write_through_and_unique() {
        let mut progress = Progress::load(MemoryStore::new());
        assert!(progress.add_wrong(&id("q1")).unwrap());
        assert!(!progress.add_wrong(&id("q1")).unwrap());

        assert_eq!(progress.wrong_list(), &[id("q1")]);
        assert_eq!(
            progress.store().get(WRONG_LIST_KEY).unwrap().as_deref(),
            Some(r#"["q1"]"#)
        );
    }

    #[test]
    fn test_toggle_priority_twice_restores_membership() {
        let mut store = MemoryStore::new();
        store.set(PRIORITY_LIST_KEY, r#"["a","b"]"#).unwrap();
        let mut progress = Progress::load(store);
        let before = progress.store().get(PRIORITY_LIST_KEY).unwrap();

        assert!(progress.toggle_priority(&id("c")).unwrap());
        assert!(progress.is_priority(&id("c")));
        assert!(!progress.toggle_priority(&id("c")).unwrap());

        assert_eq!(progress.priority_list(), &[id("a"), id("b")]);
        assert_eq!(progress.store().get(PRIORITY_LIST_KEY).unwrap(), before);
    }

    #[test]
    fn test_failed_write_leaves_lists_untouched() {
        let store = FlakyStore::default();
        let fail = store.trigger();
        let mut progress = Progress::load(store);

        fail.set(Some(0));
        assert!(progress.toggle_priority(&id("q1")).is_err());
        assert!(!progress.is_priority(&id("q1")));

        fail.set(Some(0));
        assert!(progress.add_wrong(&id("q1")).is_err());
        assert!(progress.wrong_list().is_empty());

        assert!(progress.add_wrong(&id("q1")).unwrap());
        assert!(progress.toggle_priority(&id("q1")).unwrap());
        assert_eq!(
            progress.store().inner.get(WRONG_LIST_KEY).unwrap().as_deref(),
            Some(r#"["q1"]"#)
        );
        assert_eq!(
            progress.store().inner.get(PRIORITY_LIST_KEY).unwrap().as_deref(),
            Some(r#"["q1"]"#)
        );
    }

    #[test]
    fn test_lists_round_trip_through_store() {
        let mut progress = Progress::load(MemoryStore::new());
        for raw in ["q3", "q1", "q2"] {
            progress.add_wrong(&id(raw)).unwrap();
        }
        progress.toggle_priority(&id("q2")).unwrap();

        let reloaded = Progress::load(progress.store().clone());
        let before: HashSet<_> = progress.wrong_list().iter().collect();
        let after: HashSet<_> = reloaded.wrong_list().iter().collect();
        assert_eq!(before, after);
        assert_eq!(reloaded.priority_list(), progress.priority_list());
    }

    #[test]
    fn test_remove_from_list_persists() {
        let mut progress = Progress::load(MemoryStore::new());
        progress.add_wrong(&id("q5")).unwrap();
        progress.add_wrong(&id("q9")).unwrap();

        progress.remove_from(ReviewList::Wrong, &id("q5")).unwrap();
        assert_eq!(progress.wrong_list(), &[id("q9")]);
        assert_eq!(
            progress.store().get(WRONG_LIST_KEY).unwrap().as_deref(),
            Some(r#"["q9"]"#)
        );
    }

    #[test]
    fn test_clear_all_removes_every_key() {
        let mut progress = Progress::load(MemoryStore::new());
        progress.add_wrong(&id("q1")).unwrap();
        progress.toggle_priority(&id("q1")).unwrap();
        for key in [PRACTICE_INDEX_KEY, REVIEW_INDEX_KEY, PRIORITY_INDEX_KEY] {
            progress.write_index(key, 3).unwrap();
        }

        progress.clear_all().unwrap();
        assert!(progress.wrong_list().is_empty());
        assert!(progress.priority_list().is_empty());
        assert!(progress.store().is_empty());
    }

    #[test]
    fn test_index_keys_per_mode() {
        assert_eq!(index_key(QuizMode::Practice), PRACTICE_INDEX_KEY);
        assert_eq!(index_key(QuizMode::ReviewWrong), REVIEW_INDEX_KEY);
        assert_eq!(index_key(QuizMode::ReviewPriority), PRIORITY_INDEX_KEY);
        assert_eq!(list_key(ReviewList::Priority), PRIORITY_LIST_KEY);
    }
}
