use alloc::collections::BTreeSet;
use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::{STAGE_COUNT, StageId};

/// Port over the browser's localStorage. Every operation is best-effort:
/// a backend that cannot read or write behaves as if the key were absent.
pub trait StateStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<S: StateStore + ?Sized> StateStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Which stages the player may enter and which they already finished.
///
/// Only [`ProgressStore::advance`] mutates this, so the unlocked set stays
/// prefix-closed and `current_stage` never rolls back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progress {
    unlocked_stages: BTreeSet<StageId>,
    completed_stages: BTreeSet<StageId>,
    current_stage: StageId,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            unlocked_stages: BTreeSet::from([1]),
            completed_stages: BTreeSet::new(),
            current_stage: 1,
        }
    }
}

impl Progress {
    pub fn is_unlocked(&self, stage: StageId) -> bool {
        self.unlocked_stages.contains(&stage)
    }

    pub fn is_completed(&self, stage: StageId) -> bool {
        self.completed_stages.contains(&stage)
    }

    pub fn current_stage(&self) -> StageId {
        self.current_stage
    }

    pub fn completed_count(&self) -> usize {
        self.completed_stages.len()
    }

    pub fn is_finished(&self) -> bool {
        self.completed_stages.len() == usize::from(STAGE_COUNT)
    }

    fn advance(&mut self, stage: StageId) {
        self.completed_stages.insert(stage);
        let next = stage + 1;
        if next <= STAGE_COUNT && self.unlocked_stages.insert(next) {
            self.current_stage = next;
        }
    }
}

/// Persisted unlock/completion record for the six-stage chain.
pub struct ProgressStore<S> {
    store: S,
}

impl<S: StateStore> ProgressStore<S> {
    pub const KEY: &'static str = "gwiazdka:progress";

    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads the persisted record, substituting defaults for anything
    /// missing or unreadable.
    pub fn load(&self) -> Progress {
        let Some(raw) = self.store.get(Self::KEY) else {
            return Progress::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            log::warn!("Discarding unreadable progress record: {}", err);
            Progress::default()
        })
    }

    pub fn save(&self, progress: &Progress) {
        match serde_json::to_string(progress) {
            Ok(raw) => self.store.set(Self::KEY, &raw),
            Err(err) => log::error!("Could not serialize progress: {}", err),
        }
    }

    /// Marks `stage` completed and unlocks its successor. Idempotent:
    /// repeating a completion re-persists the same record. Stages that
    /// are not unlocked yet are refused, so completed stays a subset of
    /// unlocked no matter what sequence of calls arrives.
    pub fn advance(&self, stage: StageId) -> Progress {
        let mut progress = self.load();
        if !(1..=STAGE_COUNT).contains(&stage) {
            log::warn!("Ignoring completion of unknown stage {}", stage);
            return progress;
        }
        if !progress.is_unlocked(stage) {
            log::warn!("Ignoring completion of locked stage {}", stage);
            return progress;
        }
        progress.advance(stage);
        self.save(&progress);
        progress
    }

    /// Player-initiated restart: drops the record entirely.
    pub fn reset(&self) {
        self.store.remove(Self::KEY);
    }

    pub fn is_unlocked(&self, stage: StageId) -> bool {
        self.load().is_unlocked(stage)
    }

    pub fn is_completed(&self, stage: StageId) -> bool {
        self.load().is_completed(stage)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryStore;
    use super::*;

    #[test]
    fn empty_storage_loads_defaults() {
        let store = MemoryStore::default();
        let progress = ProgressStore::new(&store).load();

        assert_eq!(progress, Progress::default());
        assert!(progress.is_unlocked(1));
        assert!(!progress.is_completed(1));
        assert_eq!(progress.current_stage(), 1);
    }

    #[test]
    fn advancing_completes_and_unlocks_the_successor() {
        let store = MemoryStore::default();
        let progress_store = ProgressStore::new(&store);

        let progress = progress_store.advance(1);

        assert!(progress.is_completed(1));
        assert!(progress.is_unlocked(2));
        assert!(!progress.is_unlocked(3));
        assert_eq!(progress.current_stage(), 2);
    }

    #[test]
    fn advance_is_idempotent() {
        let store = MemoryStore::default();
        let progress_store = ProgressStore::new(&store);

        let first = progress_store.advance(1);
        let second = progress_store.advance(1);

        assert_eq!(first, second);
        assert_eq!(second.current_stage(), 2);
    }

    #[test]
    fn replaying_an_old_stage_never_moves_current_back() {
        let store = MemoryStore::default();
        let progress_store = ProgressStore::new(&store);

        progress_store.advance(1);
        progress_store.advance(2);
        progress_store.advance(3);
        let progress = progress_store.advance(1);

        assert_eq!(progress.current_stage(), 4);
    }

    #[test]
    fn completed_is_always_a_subset_of_unlocked() {
        let store = MemoryStore::default();
        let progress_store = ProgressStore::new(&store);

        for stage in [1, 1, 2, 5, 3, 2, 6, 4] {
            let progress = progress_store.advance(stage);
            for candidate in 1..=STAGE_COUNT {
                if progress.is_completed(candidate) {
                    assert!(progress.is_unlocked(candidate), "stage {}", candidate);
                }
            }
        }
    }

    #[test]
    fn final_stage_has_no_successor_to_unlock() {
        let store = MemoryStore::default();
        let progress_store = ProgressStore::new(&store);

        for stage in 1..=STAGE_COUNT {
            progress_store.advance(stage);
        }
        let progress = progress_store.load();

        assert!(progress.is_finished());
        assert!(progress.is_completed(STAGE_COUNT));
        assert!(!progress.is_unlocked(STAGE_COUNT + 1));
        assert_eq!(progress.current_stage(), STAGE_COUNT);
    }

    #[test]
    fn completing_a_locked_stage_is_ignored() {
        let store = MemoryStore::default();
        let progress_store = ProgressStore::new(&store);

        let progress = progress_store.advance(5);

        assert!(!progress.is_completed(5));
        assert!(!progress.is_unlocked(5));
        assert_eq!(progress, Progress::default());
        // nothing was persisted either
        assert_eq!(store.raw(ProgressStore::<&MemoryStore>::KEY), None);
    }

    #[test]
    fn out_of_range_stage_is_ignored() {
        let store = MemoryStore::default();
        let progress_store = ProgressStore::new(&store);

        let progress = progress_store.advance(STAGE_COUNT + 1);

        assert_eq!(progress, Progress::default());
        assert_eq!(progress_store.load(), Progress::default());
    }

    #[test]
    fn reset_returns_storage_to_defaults() {
        let store = MemoryStore::default();
        let progress_store = ProgressStore::new(&store);

        progress_store.advance(1);
        progress_store.reset();

        assert_eq!(progress_store.load(), Progress::default());
        assert_eq!(store.raw(ProgressStore::<&MemoryStore>::KEY), None);
    }

    #[test]
    fn malformed_record_reads_as_defaults() {
        let store = MemoryStore::default();
        store.put(ProgressStore::<&MemoryStore>::KEY, "{not json");

        let progress_store = ProgressStore::new(&store);

        assert_eq!(progress_store.load(), Progress::default());
    }

    #[test]
    fn persisted_layout_uses_camel_case_arrays() {
        let store = MemoryStore::default();
        let progress_store = ProgressStore::new(&store);

        progress_store.advance(1);
        let raw = store.raw(ProgressStore::<&MemoryStore>::KEY).unwrap();

        assert_eq!(
            raw,
            r#"{"unlockedStages":[1,2],"completedStages":[1],"currentStage":2}"#
        );
    }

    #[test]
    fn record_from_an_older_session_round_trips() {
        let store = MemoryStore::default();
        store.put(
            ProgressStore::<&MemoryStore>::KEY,
            r#"{"unlockedStages":[1,2,3],"completedStages":[1,2],"currentStage":3}"#,
        );

        let progress = ProgressStore::new(&store).load();

        assert!(progress.is_unlocked(3));
        assert!(progress.is_completed(2));
        assert!(!progress.is_completed(3));
        assert_eq!(progress.current_stage(), 3);
    }
}
