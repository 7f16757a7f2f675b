use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::{
    catalog::CatalogError,
    types::{Composer, ComposerId, Piece},
    warning,
};

pub const COMPOSERS_FILE: &str = "composers.yml";
pub const TRACKS_DIR: &str = "tracks";

/// Read-only index of composers and pieces loaded from a catalog directory.
///
/// The directory holds one `composers.yml` list and a `tracks/` tree with
/// one YAML file per piece. Composers are keyed by id, pieces by their
/// declared id, and every loaded piece id is also listed under its
/// `composer_id` in the composer index.
#[derive(Debug, Default)]
pub struct Catalog {
    composers: HashMap<ComposerId, Composer>,
    pieces: HashMap<String, Piece>,
    pieces_by_composer: HashMap<ComposerId, Vec<String>>,
    rejected: Vec<PathBuf>,
}

impl Catalog {
    /// Loads the catalog rooted at `root`.
    ///
    /// A missing root or composer file aborts the load. A piece file that
    /// fails to parse is reported and skipped; the rest of the tree still
    /// loads.
    pub fn load(root: &Path) -> Result<Self, CatalogError> {
        if !root.is_dir() {
            return Err(CatalogError::MissingRoot(root.to_path_buf()));
        }

        let mut catalog = Catalog::default();
        catalog.load_composers(&root.join(COMPOSERS_FILE))?;
        catalog.load_pieces(&root.join(TRACKS_DIR));
        Ok(catalog)
    }

    /// Returns every loaded piece keyed by its declared id.
    ///
    /// Pieces from rejected files never appear here. Iteration order is not
    /// meaningful; sort the keys when a stable order is needed.
    pub fn get_pieces(&self) -> &HashMap<String, Piece> {
        &self.pieces
    }

    /// Returns every composer listed in `composers.yml`, keyed by id.
    ///
    /// A composer may be listed without owning any piece, and a piece may
    /// name a composer that is not listed here.
    pub fn get_composers(&self) -> &HashMap<ComposerId, Composer> {
        &self.composers
    }

    /// Piece ids of one composer, in load order.
    ///
    /// Asking for a composer that owns no loaded piece is a caller bug and
    /// fails instead of returning an empty list.
    ///
    /// # Arguments
    ///
    /// * `composer_id` - Id as written in the piece files' `composer_id`
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownComposer`] when no loaded piece names
    /// this composer.
    ///
    /// # Example
    ///
    /// ```
    /// let ids = catalog.get_composer_pieces(&ComposerId::new("1234"))?;
    /// for id in ids {
    ///     println!("{}", catalog.piece(id).map(|p| p.name.as_str()).unwrap_or(id));
    /// }
    /// ```
    pub fn get_composer_pieces(&self, composer_id: &ComposerId) -> Result<&[String], CatalogError> {
        self.pieces_by_composer
            .get(composer_id)
            .map(Vec::as_slice)
            .ok_or_else(|| CatalogError::UnknownComposer(composer_id.clone()))
    }

    /// Looks up a single piece by id.
    pub fn piece(&self, id: &str) -> Option<&Piece> {
        self.pieces.get(id)
    }

    /// Looks up a listed composer by id.
    pub fn composer(&self, id: &ComposerId) -> Option<&Composer> {
        self.composers.get(id)
    }

    /// Display name of a composer, falling back to the raw id.
    pub fn composer_name<'a>(&'a self, id: &'a ComposerId) -> &'a str {
        self.composer(id)
            .map(|c| c.name.as_str())
            .unwrap_or(id.as_str())
    }

    /// Piece files that were skipped during the load.
    ///
    /// Each of them was already reported with a warning naming the file and
    /// the reason. Unreadable directory entries and broken links are listed
    /// as well.
    pub fn rejected(&self) -> &[PathBuf] {
        &self.rejected
    }

    /// `true` when neither composers nor pieces were loaded.
    pub fn is_empty(&self) -> bool {
        self.composers.is_empty() && self.pieces.is_empty()
    }

    fn load_composers(&mut self, path: &Path) -> Result<(), CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(());
        }

        let composers: Option<Vec<Composer>> =
            serde_yaml::from_str(&content).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        for composer in composers.unwrap_or_default() {
            self.composers.insert(composer.id.clone(), composer);
        }
        Ok(())
    }

    fn load_pieces(&mut self, tracks_dir: &Path) {
        if !tracks_dir.is_dir() {
            return;
        }

        for entry in WalkDir::new(tracks_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warning!("Cannot walk catalog entry: {}", e);
                    if let Some(path) = e.path() {
                        self.rejected.push(path.to_path_buf());
                    }
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !is_piece_file(path) {
                continue;
            }

            if let Err(e) = parse_piece(path).and_then(|piece| self.insert_piece(piece, path)) {
                warning!("Skipping piece file {}: {}", path.display(), e);
                self.rejected.push(path.to_path_buf());
            }
        }
    }

    fn insert_piece(&mut self, piece: Piece, path: &Path) -> Result<(), CatalogError> {
        if self.pieces.contains_key(&piece.id) {
            return Err(CatalogError::InvalidRecord {
                path: path.to_path_buf(),
                reason: format!("duplicate piece id {}", piece.id),
            });
        }

        if !self.composers.contains_key(&piece.composer_id) {
            warning!(
                "Piece {} in {} refers to unlisted composer {}",
                piece.id,
                path.display(),
                piece.composer_id
            );
        }

        self.pieces_by_composer
            .entry(piece.composer_id.clone())
            .or_default()
            .push(piece.id.clone());
        self.pieces.insert(piece.id.clone(), piece);
        Ok(())
    }
}

fn is_piece_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
}

/// Parses and validates a single piece file.
pub fn parse_piece(path: &Path) -> Result<Piece, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let piece: Piece = serde_yaml::from_str(&content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let invalid = |reason: &str| CatalogError::InvalidRecord {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };
    if piece.id.trim().is_empty() {
        return Err(invalid("empty piece id"));
    }
    if piece.composer_id.as_str().trim().is_empty() {
        return Err(invalid("empty composer id"));
    }
    if piece.tracks.is_empty() {
        return Err(invalid("piece has no tracks"));
    }
    Ok(piece)
}
