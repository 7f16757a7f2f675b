use std::path::Path;

use crate::types::{AlbumTrack, ComposerId, Piece, TrackId};

/// A piece assembled from an album's tracks, ready to be written to disk.
pub struct PieceDraft {
    piece: Piece,
}

impl PieceDraft {
    /// Without an explicit name the piece takes the first track's name,
    /// which is usually the work's title.
    pub fn new(
        composer_id: ComposerId,
        album_id: String,
        tracks: &[AlbumTrack],
        name: Option<String>,
    ) -> Result<Self, String> {
        let Some(first) = tracks.first() else {
            return Err("a piece needs at least one track".to_string());
        };

        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| first.name.clone());

        Ok(Self {
            piece: Piece {
                id: uuid::Uuid::new_v4().simple().to_string(),
                name,
                composer_id,
                album_id: Some(album_id),
                tracks: tracks.iter().map(|t| TrackId::new(t.id.clone())).collect(),
            },
        })
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn into_piece(self) -> Piece {
        self.piece
    }
}

pub async fn write_piece(path: &Path, piece: &Piece) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    let yaml = serde_yaml::to_string(piece).map_err(|e| e.to_string())?;
    async_fs::write(path, yaml).await.map_err(|e| e.to_string())
}
