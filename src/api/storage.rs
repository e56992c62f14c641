//! `window.localStorage` as a [`PreferenceStore`]

use crate::error::PreferencesError;
use crate::preferences::PreferenceStore;
use web_sys::Storage;

pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// The page's localStorage, if the browser exposes one
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferencesError> {
        self.storage.set_item(key, value).map_err(|e| {
            PreferencesError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("localStorage.setItem failed: {:?}", e),
            ))
        })
    }
}
