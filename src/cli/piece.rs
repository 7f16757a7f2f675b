use std::path::PathBuf;

use tabled::Table;

use crate::{
    catalog::{self, PieceDraft},
    cli::connect,
    error, info, success,
    types::{AlbumTableRow, AlbumTrack, ComposerId, TrackTableRow},
    utils, warning,
};

pub async fn albums(artist_id: String) {
    let client = connect().await;
    let pb = utils::spinner("Fetching albums...");
    let albums = client.artist_albums(&artist_id).await;
    pb.finish_and_clear();

    let albums = match albums {
        Ok(albums) => albums,
        Err(e) => error!("Cannot fetch albums of {}: {}", artist_id, e),
    };
    if albums.is_empty() {
        info!("No albums found for {}.", artist_id);
        return;
    }

    let rows: Vec<AlbumTableRow> = albums
        .into_iter()
        .map(|a| AlbumTableRow {
            id: a.id,
            name: a.name,
            released: a.release_date,
            tracks: a.total_tracks,
        })
        .collect();
    println!("{}", Table::new(rows));
}

pub async fn tracks(album_id: String) {
    let client = connect().await;
    let pb = utils::spinner("Fetching tracks...");
    let tracks = client.album_tracks(&album_id).await;
    pb.finish_and_clear();

    let tracks = match tracks {
        Ok(tracks) => tracks,
        Err(e) => error!("Cannot fetch tracks of {}: {}", album_id, e),
    };

    let rows: Vec<TrackTableRow> = tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            number: format!("{:2}", i + 1),
            name: t.name.clone(),
            id: t.id.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));
}

/// Writes a piece file from selected tracks of an album.
///
/// `selection` uses the positions printed by `piece tracks`, e.g. `1-4` or
/// `2,3,5`. The artist id becomes the piece's composer id.
pub async fn create_piece(
    artist_id: String,
    album_id: String,
    selection: String,
    name: Option<String>,
    out: PathBuf,
) {
    let positions = match utils::parse_track_numbers(&selection) {
        Ok(positions) => positions,
        Err(e) => error!("{}", e),
    };

    let client = connect().await;
    let pb = utils::spinner("Fetching tracks...");
    let album_tracks = client.album_tracks(&album_id).await;
    pb.finish_and_clear();

    let album_tracks = match album_tracks {
        Ok(tracks) => tracks,
        Err(e) => error!("Cannot fetch tracks of {}: {}", album_id, e),
    };

    let chosen: Vec<AlbumTrack> = match positions
        .iter()
        .map(|n| album_tracks.get(n - 1).cloned().ok_or(*n))
        .collect::<Result<Vec<_>, usize>>()
    {
        Ok(chosen) => chosen,
        Err(n) => error!(
            "The album has {} tracks, there is no track {}.",
            album_tracks.len(),
            n
        ),
    };

    let draft = match PieceDraft::new(ComposerId::new(artist_id), album_id, &chosen, name) {
        Ok(draft) => draft,
        Err(e) => error!("{}", e),
    };

    if out.exists() {
        warning!("Overwriting {}", out.display());
    }
    if let Err(e) = catalog::write_piece(&out, draft.piece()).await {
        error!("Cannot write {}: {}", out.display(), e);
    }
    success!(
        "Wrote '{}' ({} tracks) to {}",
        draft.piece().name,
        draft.piece().tracks.len(),
        out.display()
    );
}
