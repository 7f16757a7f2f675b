use crate::{
    spotify::{RemoteError, SpotifyClient},
    types::{Album, AlbumTrack, Paging},
};

/// Page size the albums endpoints accept at most.
const PAGE_LIMIT: &str = "50";

impl SpotifyClient {
    /// Full-length albums of an artist in the configured market.
    pub async fn artist_albums(&self, artist_id: &str) -> Result<Vec<Album>, RemoteError> {
        let path = format!("/artists/{artist_id}/albums");
        let page: Paging<Album> = self
            .get_json(
                &path,
                &[
                    ("include_groups", "album"),
                    ("limit", PAGE_LIMIT),
                    ("market", self.market()),
                ],
            )
            .await?;
        Ok(page.items)
    }

    /// Tracks of an album in disc and track order.
    pub async fn album_tracks(&self, album_id: &str) -> Result<Vec<AlbumTrack>, RemoteError> {
        let path = format!("/albums/{album_id}/tracks");
        let mut tracks = Vec::new();
        let mut offset = 0usize;

        loop {
            let offset_param = offset.to_string();
            let page: Paging<AlbumTrack> = self
                .get_json(
                    &path,
                    &[
                        ("limit", PAGE_LIMIT),
                        ("offset", offset_param.as_str()),
                        ("market", self.market()),
                    ],
                )
                .await?;

            offset += page.items.len();
            let done = page.next.is_none() || page.items.is_empty();
            tracks.extend(page.items);
            if done {
                break;
            }
        }

        tracks.sort_by_key(|t| (t.disc_number, t.track_number));
        Ok(tracks)
    }
}
