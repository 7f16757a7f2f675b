//! Flat-file catalog of composers and pieces.
//!
//! Layout of a catalog directory:
//!
//! ```text
//! music/
//!   composers.yml          # - { id: 1234, name: "..." }
//!   tracks/**/<piece>.yml  # { id, name, composer_id, album_id, tracks: [...] }
//! ```

mod error;
mod store;
mod writer;

pub use error::CatalogError;
pub use store::{COMPOSERS_FILE, Catalog, TRACKS_DIR, parse_piece};
pub use writer::{PieceDraft, write_piece};
