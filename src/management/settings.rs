use std::{io::ErrorKind, path::PathBuf};

use crate::{
    config,
    types::{MusicLibrary, Settings},
};

/// Local preferences that survive between runs: the last playback device,
/// which part of the library `station new` plays, and the curated piece
/// selection.
pub struct SettingsManager {
    path: PathBuf,
    settings: Settings,
}

impl SettingsManager {
    /// Loads the settings from `<data dir>/concertista/settings.json`.
    ///
    /// See [`SettingsManager::load_from`] for how missing and broken files
    /// are treated.
    pub async fn load() -> Result<Self, String> {
        Self::load_from(Self::settings_path()).await
    }

    /// Loads the settings stored at `path`.
    ///
    /// A missing file yields default settings: no device, the entire
    /// library, an empty selection. Fields absent from the file take their
    /// defaults too.
    ///
    /// # Errors
    ///
    /// Returns an error message when the file exists but cannot be read or
    /// is not valid settings JSON.
    pub async fn load_from(path: PathBuf) -> Result<Self, String> {
        let settings = match async_fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| format!("Cannot parse {}: {}", path.display(), e))?,
            Err(e) if e.kind() == ErrorKind::NotFound => Settings::default(),
            Err(e) => return Err(e.to_string()),
        };
        Ok(Self { path, settings })
    }

    /// Writes the settings back as pretty-printed JSON, creating the parent
    /// directory when needed.
    ///
    /// # Example
    ///
    /// ```
    /// let mut settings = SettingsManager::load().await?;
    /// settings.set_library(MusicLibrary::Selection);
    /// settings.persist().await?;
    /// ```
    pub async fn persist(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| e.to_string())?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Id of the playback device used last, if any.
    pub fn device(&self) -> Option<&str> {
        self.settings.device.as_deref()
    }

    /// Remembers the playback device. Changes are kept in memory until
    /// [`persist`](SettingsManager::persist) is called.
    pub fn set_device(&mut self, device_id: Option<String>) -> &mut Self {
        self.settings.device = device_id;
        self
    }

    /// Which part of the catalog `station new` plays.
    pub fn library(&self) -> &MusicLibrary {
        &self.settings.library
    }

    pub fn set_library(&mut self, library: MusicLibrary) -> &mut Self {
        self.settings.library = library;
        self
    }

    /// Returns `false` if the piece was already selected.
    pub fn select(&mut self, piece_id: &str) -> bool {
        self.settings.selection.insert(piece_id.to_string())
    }

    /// Returns `false` if the piece was not selected.
    pub fn deselect(&mut self, piece_id: &str) -> bool {
        self.settings.selection.remove(piece_id)
    }

    /// Empties the curated selection.
    pub fn clear_selection(&mut self) -> &mut Self {
        self.settings.selection.clear();
        self
    }

    /// Selected piece ids in sorted order.
    pub fn selection(&self) -> Vec<String> {
        self.settings.selection.iter().cloned().collect()
    }

    fn settings_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("settings.json");
        path
    }
}
