use concertista::{management::SettingsManager, types::MusicLibrary};
use tempfile::TempDir;

#[tokio::test]
async fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = SettingsManager::load_from(dir.path().join("settings.json"))
        .await
        .unwrap();

    assert_eq!(settings.device(), None);
    assert_eq!(settings.library(), &MusicLibrary::Entire);
    assert!(settings.selection().is_empty());
}

#[tokio::test]
async fn test_settings_survive_a_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/settings.json");

    let mut settings = SettingsManager::load_from(path.clone()).await.unwrap();
    settings
        .set_device(Some("dev-1".to_string()))
        .set_library(MusicLibrary::Selection);
    assert!(settings.select("goldberg"));
    assert!(settings.select("gymnopedies"));
    settings.persist().await.unwrap();

    let settings = SettingsManager::load_from(path).await.unwrap();
    assert_eq!(settings.device(), Some("dev-1"));
    assert_eq!(settings.library(), &MusicLibrary::Selection);
    assert_eq!(settings.selection(), ["goldberg", "gymnopedies"]);
}

#[tokio::test]
async fn test_selection_changes() {
    let dir = TempDir::new().unwrap();
    let mut settings = SettingsManager::load_from(dir.path().join("settings.json"))
        .await
        .unwrap();

    assert!(settings.select("a"));
    assert!(!settings.select("a"));
    assert!(settings.deselect("a"));
    assert!(!settings.deselect("a"));

    settings.select("b");
    settings.select("c");
    settings.clear_selection();
    assert!(settings.selection().is_empty());
}

#[tokio::test]
async fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "library": "selection" }"#).unwrap();

    let settings = SettingsManager::load_from(path).await.unwrap();
    assert_eq!(settings.library(), &MusicLibrary::Selection);
    assert_eq!(settings.device(), None);
}

#[tokio::test]
async fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(SettingsManager::load_from(path).await.is_err());
}
