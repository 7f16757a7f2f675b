use tabled::Table;

use crate::{
    cli::{load_catalog, load_settings},
    error, info,
    management::SettingsManager,
    success,
    types::{MusicLibrary, PieceTableRow},
    warning,
};

async fn save(settings: &SettingsManager) {
    if let Err(e) = settings.persist().await {
        error!("Failed to save settings: {}", e);
    }
}

/// Chooses what `station new` plays.
pub async fn library(library: MusicLibrary) {
    let mut settings = load_settings().await;
    settings.set_library(library.clone());
    save(&settings).await;
    success!("New stations play the {} library.", library);

    if library == MusicLibrary::Selection && settings.selection().is_empty() {
        warning!("Your selection is empty. Add pieces with concertista prefs select <piece-id>.");
    }
}

pub async fn select(piece_id: String) {
    let catalog = load_catalog();
    let Some(piece) = catalog.piece(&piece_id) else {
        warning!("No piece with id {}.", piece_id);
        return;
    };

    let mut settings = load_settings().await;
    if settings.select(&piece_id) {
        save(&settings).await;
        success!("Added {} to your selection.", piece.name);
    } else {
        info!("{} is already selected.", piece.name);
    }
}

pub async fn deselect(piece_id: String) {
    let mut settings = load_settings().await;
    if settings.deselect(&piece_id) {
        save(&settings).await;
        success!("Removed {} from your selection.", piece_id);
    } else {
        info!("{} is not selected.", piece_id);
    }
}

pub async fn selection() {
    let settings = load_settings().await;
    info!("New stations play the {} library.", settings.library());

    let ids = settings.selection();
    if ids.is_empty() {
        info!("Your selection is empty.");
        return;
    }

    let catalog = load_catalog();
    let rows: Vec<PieceTableRow> = ids
        .iter()
        .map(|id| match catalog.piece(id) {
            Some(p) => PieceTableRow {
                id: p.id.clone(),
                name: p.name.clone(),
                composer: catalog.composer_name(&p.composer_id).to_string(),
                tracks: p.tracks.len(),
            },
            None => PieceTableRow {
                id: id.clone(),
                name: "(not in catalog)".to_string(),
                composer: String::new(),
                tracks: 0,
            },
        })
        .collect();
    println!("{}", Table::new(rows));
}

pub async fn clear_selection() {
    let mut settings = load_settings().await;
    settings.clear_selection();
    save(&settings).await;
    success!("Selection cleared.");
}
