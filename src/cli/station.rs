use tabled::Table;

use crate::{
    catalog::{Catalog, CatalogError},
    cli::{connect, load_catalog, load_settings, report_unknown_device, target_device},
    config, error, info,
    search::{SearchIndex, SearchTarget},
    station::{self, StationError, StationOutcome, StationSource},
    success,
    types::{MusicLibrary, SearchTableRow},
    warning,
};

/// Plays the whole library or the curated selection, per preferences.
pub async fn new_station() {
    let catalog = load_catalog();
    let settings = load_settings().await;
    let source = match settings.library() {
        MusicLibrary::Entire => StationSource::Library,
        MusicLibrary::Selection => StationSource::Selection(settings.selection()),
    };
    play(&catalog, source).await
}

pub async fn composer_station(query: String) {
    let catalog = load_catalog();
    let index = SearchIndex::build(&catalog);
    let Some(composer_id) = index.find_composer(&query) else {
        warning!("No single composer matches '{}'.", query);
        return;
    };
    info!("Station: {}", catalog.composer_name(&composer_id));
    play(&catalog, StationSource::Composer(composer_id)).await
}

pub async fn piece_station(piece_id: String) {
    let catalog = load_catalog();
    if let Some(piece) = catalog.piece(&piece_id) {
        info!("Station: {}", piece.name);
    }
    play(&catalog, StationSource::Piece(piece_id)).await
}

/// Starts a station when the query matches exactly one composer or piece;
/// otherwise lists the candidates.
pub async fn search_station(query: String) {
    let catalog = load_catalog();
    let index = SearchIndex::build(&catalog);
    if let Some(entry) = index.find_one(&query) {
        info!("Station: {}", entry.label);
        let source = match &entry.target {
            SearchTarget::Composer(id) => StationSource::Composer(id.clone()),
            SearchTarget::Piece(id) => StationSource::Piece(id.clone()),
        };
        return play(&catalog, source).await;
    }

    let matches = index.find(&query);
    if matches.is_empty() {
        warning!("Nothing matches '{}'.", query);
        return;
    }

    let rows: Vec<SearchTableRow> = matches.iter().map(|e| e.table_row()).collect();
    println!("{}", Table::new(rows));
    info!("{} matches. Refine the search to start a station.", matches.len());
}

async fn play(catalog: &Catalog, source: StationSource) {
    // Resolve first so an empty station never reaches Spotify.
    match source.candidates(catalog) {
        Ok(candidates) if candidates.is_empty() => {
            match &source {
                StationSource::Composer(id) => {
                    warning!("{} has no pieces.", catalog.composer_name(id))
                }
                _ => warning!("This station has no pieces to play."),
            }
            return;
        }
        Ok(_) => {}
        Err(CatalogError::UnknownComposer(id)) => {
            warning!("No composer with id {}.", id);
            return;
        }
        Err(e) => error!("{}", e),
    }

    let client = connect().await;
    let mut settings = load_settings().await;
    let device_id = target_device(&client, &mut settings)
        .await
        .and_then(|d| d.id);

    match station::start_station(
        &client,
        device_id.as_deref(),
        catalog,
        &source,
        config::station_capacity(),
    )
    .await
    {
        Ok(StationOutcome::Started { pieces, tracks }) => {
            success!("Queued {} tracks from {} pieces.", tracks, pieces)
        }
        Ok(StationOutcome::Empty) => warning!("This station has no pieces to play."),
        Err(StationError::NoActiveDevice) => report_unknown_device(),
        Err(e) => error!("Cannot start station: {}", e),
    }
}
