use gloo::storage::{LocalStorage, Storage};
use gwiazdka_core::{LossTally, ProgressStore, StateStore};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Marker assigning a type its localStorage slot.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

pub(crate) trait LocalOrDefault {
    fn local_or_default() -> Self;
}

impl<T: StorageKey + DeserializeOwned> LocalOrDefault for Option<T> {
    fn local_or_default() -> Self {
        LocalStorage::get(T::KEY).ok()
    }
}

pub(crate) trait LocalSave {
    fn local_save(&self);
}

impl<T: StorageKey + Serialize> LocalSave for Option<T> {
    fn local_save(&self) {
        match self {
            Some(value) => {
                if let Err(err) = LocalStorage::set(T::KEY, value) {
                    log::error!("Could not save {} to local storage: {:?}", T::KEY, err);
                }
            }
            None => LocalStorage::delete(T::KEY),
        }
    }
}

/// localStorage-backed implementation of the core storage port.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct BrowserStore;

impl StateStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = LocalStorage::raw().set_item(key, value) {
            log::error!("Could not write {} to local storage: {:?}", key, err);
        }
    }

    fn remove(&self, key: &str) {
        let _ = LocalStorage::raw().remove_item(key);
    }
}

pub(crate) fn progress_store() -> ProgressStore<BrowserStore> {
    ProgressStore::new(BrowserStore)
}

pub(crate) fn loss_tally() -> LossTally<BrowserStore> {
    LossTally::new(BrowserStore)
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    let mut bytes = [0u8; 8];
    for byte in &mut bytes {
        *byte = (256. * random()) as u8;
    }
    u64::from_be_bytes(bytes)
}
