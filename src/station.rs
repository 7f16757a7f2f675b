//! Station assembly.
//!
//! A station is a one-off queue built from a set of candidate pieces. The
//! piece order is a uniform random permutation of the candidates; the tracks
//! inside a piece always keep their catalog order. The queue is cut off at a
//! fixed capacity, possibly in the middle of a piece.

use rand::{Rng, seq::SliceRandom};
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    spotify::{PlaybackRemote, RemoteError},
    types::{ComposerId, TrackRef},
};

#[derive(Debug, Error)]
pub enum StationError {
    #[error("No active playback device. Try restarting Spotify and then this application.")]
    NoActiveDevice,

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Where the candidate pieces of a station come from.
#[derive(Debug, Clone, PartialEq)]
pub enum StationSource {
    /// Every piece in the catalog.
    Library,
    /// All works of one composer.
    Composer(ComposerId),
    /// A single piece.
    Piece(String),
    /// A user-curated subset of piece ids.
    Selection(Vec<String>),
}

impl StationSource {
    /// Resolves the source into candidate piece ids.
    ///
    /// Selected ids that are no longer in the catalog are dropped. A listed
    /// composer without pieces yields no candidates; a composer or piece the
    /// catalog does not know is an error.
    pub fn candidates(&self, catalog: &Catalog) -> Result<Vec<String>, CatalogError> {
        match self {
            StationSource::Library => {
                let mut ids: Vec<String> = catalog.get_pieces().keys().cloned().collect();
                ids.sort();
                Ok(ids)
            }
            StationSource::Composer(id) => match catalog.get_composer_pieces(id) {
                Ok(ids) => Ok(ids.to_vec()),
                Err(_) if catalog.composer(id).is_some() => Ok(Vec::new()),
                Err(e) => Err(e),
            },
            StationSource::Piece(id) => match catalog.piece(id) {
                Some(_) => Ok(vec![id.clone()]),
                None => Err(CatalogError::UnknownPiece(id.clone())),
            },
            StationSource::Selection(ids) => Ok(ids
                .iter()
                .filter(|id| catalog.piece(id).is_some())
                .cloned()
                .collect()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationOutcome {
    Started { pieces: usize, tracks: usize },
    /// Nothing to play; no remote call was made.
    Empty,
}

/// Builds the track queue for `piece_ids`.
///
/// Pieces are visited in a random order without replacement and their
/// tracks appended in catalog order until `capacity` tracks are queued.
/// Every id must name a loaded piece.
pub fn assemble<R: Rng + ?Sized>(
    catalog: &Catalog,
    piece_ids: &[String],
    capacity: usize,
    rng: &mut R,
) -> Result<Vec<TrackRef>, CatalogError> {
    let mut order = piece_ids
        .iter()
        .map(|id| {
            catalog
                .piece(id)
                .ok_or_else(|| CatalogError::UnknownPiece(id.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    order.shuffle(rng);

    let uris = order
        .into_iter()
        .flat_map(|piece| piece.tracks.iter().map(TrackRef::from))
        .take(capacity)
        .collect();
    Ok(uris)
}

/// Resolves `source`, assembles the queue and starts it on `device_id`.
///
/// Without a device nothing is attempted. An empty candidate set issues no
/// remote call either.
pub async fn start_station<P>(
    remote: &P,
    device_id: Option<&str>,
    catalog: &Catalog,
    source: &StationSource,
    capacity: usize,
) -> Result<StationOutcome, StationError>
where
    P: PlaybackRemote + ?Sized,
{
    let device_id = device_id.ok_or(StationError::NoActiveDevice)?;

    let candidates = source.candidates(catalog)?;
    if candidates.is_empty() {
        return Ok(StationOutcome::Empty);
    }

    let uris = {
        let mut rng = rand::rng();
        assemble(catalog, &candidates, capacity, &mut rng)?
    };
    if uris.is_empty() {
        return Ok(StationOutcome::Empty);
    }

    remote.start(device_id, &uris).await?;
    Ok(StationOutcome::Started {
        pieces: candidates.len(),
        tracks: uris.len(),
    })
}
