use std::{fs, path::PathBuf};

use concertista::{
    catalog::{COMPOSERS_FILE, Catalog, CatalogError, PieceDraft, TRACKS_DIR, parse_piece, write_piece},
    types::{AlbumTrack, ComposerId, TrackId},
};
use tempfile::TempDir;

fn assets() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/assets/music")
}

// Writes a catalog directory with the given composer file and piece files.
fn write_catalog(composers: &str, pieces: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(COMPOSERS_FILE), composers).unwrap();
    let tracks = dir.path().join(TRACKS_DIR);
    fs::create_dir_all(&tracks).unwrap();
    for (name, content) in pieces {
        fs::write(tracks.join(name), content).unwrap();
    }
    dir
}

fn piece_yaml(id: &str, composer: &str, tracks: &[&str]) -> String {
    let mut yaml = format!("id: {id}\nname: Piece {id}\ncomposer_id: {composer}\ntracks:\n");
    for t in tracks {
        yaml.push_str(&format!("  - {t}\n"));
    }
    yaml
}

#[test]
fn test_load_fixture_catalog() {
    let catalog = Catalog::load(&assets()).unwrap();

    assert_eq!(catalog.get_composers().len(), 3);
    assert_eq!(catalog.get_pieces().len(), 4);
    assert!(catalog.rejected().is_empty());

    let piece = catalog.piece("id001").unwrap();
    assert_eq!(piece.name, "Piece 1");
    assert_eq!(piece.album_id.as_deref(), Some("a987"));
    assert_eq!(piece.composer_id, ComposerId::new("1234"));
    assert_eq!(
        piece.tracks,
        vec![TrackId::new("123"), TrackId::new("456"), TrackId::new("789")]
    );
}

#[test]
fn test_numeric_and_string_ids_are_the_same_id() {
    let catalog = Catalog::load(&assets()).unwrap();

    // composers.yml writes 1234 bare and "5678" quoted
    assert_eq!(catalog.composer_name(&ComposerId::new("1234")), "Composer 1");
    assert_eq!(catalog.composer_name(&ComposerId::new("5678")), "Erik Satie");
}

#[test]
fn test_composer_pieces() {
    let catalog = Catalog::load(&assets()).unwrap();

    let mut bach = catalog
        .get_composer_pieces(&ComposerId::new("bach"))
        .unwrap()
        .to_vec();
    bach.sort();
    assert_eq!(bach, vec!["cello-suite-1", "goldberg"]);

    assert_eq!(
        catalog
            .get_composer_pieces(&ComposerId::new("1234"))
            .unwrap(),
        ["id001"]
    );
}

#[test]
fn test_every_piece_is_indexed_under_its_composer() {
    let catalog = Catalog::load(&assets()).unwrap();

    for piece in catalog.get_pieces().values() {
        let ids = catalog.get_composer_pieces(&piece.composer_id).unwrap();
        assert!(ids.contains(&piece.id), "{} missing from index", piece.id);
    }
}

#[test]
fn test_unknown_composer_is_an_error() {
    let catalog = Catalog::load(&assets()).unwrap();

    let err = catalog
        .get_composer_pieces(&ComposerId::new("9999"))
        .unwrap_err();
    assert!(matches!(err, CatalogError::UnknownComposer(id) if id.as_str() == "9999"));
}

#[test]
fn test_empty_catalog() {
    let dir = write_catalog("", &[]);
    let catalog = Catalog::load(dir.path()).unwrap();

    assert!(catalog.is_empty());
    assert!(catalog.get_pieces().is_empty());
    assert!(catalog.get_composers().is_empty());
}

#[test]
fn test_missing_tracks_directory_yields_no_pieces() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(COMPOSERS_FILE), "- id: 1\n  name: One\n").unwrap();

    let catalog = Catalog::load(dir.path()).unwrap();
    assert_eq!(catalog.get_composers().len(), 1);
    assert!(catalog.get_pieces().is_empty());
}

#[test]
fn test_missing_root_fails() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("nowhere");

    let err = Catalog::load(&root).unwrap_err();
    assert!(matches!(err, CatalogError::MissingRoot(path) if path == root));
}

#[test]
fn test_missing_composers_file_fails() {
    let dir = TempDir::new().unwrap();

    let err = Catalog::load(dir.path()).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn test_malformed_piece_is_skipped() {
    let good_a = piece_yaml("a", "1", &["t1", "t2"]);
    let good_b = piece_yaml("b", "1", &["t3"]);
    let dir = write_catalog(
        "- id: 1\n  name: One\n",
        &[
            ("a.yml", good_a.as_str()),
            ("b.yml", good_b.as_str()),
            ("broken.yml", "id: [unclosed\nname: x"),
        ],
    );

    let catalog = Catalog::load(dir.path()).unwrap();
    assert_eq!(catalog.get_pieces().len(), 2);
    assert_eq!(catalog.rejected().len(), 1);
    assert!(catalog.rejected()[0].ends_with("broken.yml"));
}

#[test]
fn test_piece_without_tracks_is_rejected() {
    let dir = write_catalog(
        "- id: 1\n  name: One\n",
        &[("empty.yml", "id: e\nname: Empty\ncomposer_id: 1\ntracks: []\n")],
    );

    let catalog = Catalog::load(dir.path()).unwrap();
    assert!(catalog.piece("e").is_none());
    assert_eq!(catalog.rejected().len(), 1);
}

#[test]
fn test_duplicate_piece_id_keeps_first_file() {
    let first = piece_yaml("dup", "1", &["first"]);
    let second = piece_yaml("dup", "1", &["second"]);
    let dir = write_catalog(
        "- id: 1\n  name: One\n",
        &[("a.yml", first.as_str()), ("b.yml", second.as_str())],
    );

    let catalog = Catalog::load(dir.path()).unwrap();
    assert_eq!(catalog.piece("dup").unwrap().tracks, vec![TrackId::new("first")]);
    assert_eq!(catalog.get_composer_pieces(&ComposerId::new("1")).unwrap(), ["dup"]);
    assert!(catalog.rejected()[0].ends_with("b.yml"));
}

#[test]
fn test_non_yaml_files_are_ignored() {
    let catalog = Catalog::load(&assets()).unwrap();

    // tracks/README.txt sits next to the piece files
    assert!(catalog.rejected().is_empty());
}

#[cfg(unix)]
#[test]
fn test_symlinked_piece_is_loaded() {
    let dir = write_catalog("- id: 1\n  name: One\n", &[]);
    let real = dir.path().join("real.yml");
    fs::write(&real, piece_yaml("linked", "1", &["t1", "t2"])).unwrap();
    std::os::unix::fs::symlink(&real, dir.path().join(TRACKS_DIR).join("link.yml")).unwrap();

    let catalog = Catalog::load(dir.path()).unwrap();
    assert_eq!(
        catalog.piece("linked").unwrap().tracks,
        vec![TrackId::new("t1"), TrackId::new("t2")]
    );
    assert!(catalog.rejected().is_empty());
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_is_reported() {
    let dir = write_catalog("- id: 1\n  name: One\n", &[]);
    std::os::unix::fs::symlink(
        dir.path().join("missing.yml"),
        dir.path().join(TRACKS_DIR).join("gone.yml"),
    )
    .unwrap();

    let catalog = Catalog::load(dir.path()).unwrap();
    assert!(catalog.get_pieces().is_empty());
    assert_eq!(catalog.rejected().len(), 1);
}

#[test]
fn test_any_numeric_scalar_is_an_id() {
    let dir = write_catalog(
        "- id: 18446744073709551615\n  name: Big\n",
        &[(
            "wide.yml",
            "id: 2.5\nname: Wide\ncomposer_id: 18446744073709551615\ntracks: [18446744073709551615, 1.5, -7]\n",
        )],
    );

    let catalog = Catalog::load(dir.path()).unwrap();
    assert!(catalog.rejected().is_empty());

    let piece = catalog.piece("2.5").unwrap();
    assert_eq!(
        piece.tracks,
        vec![
            TrackId::new("18446744073709551615"),
            TrackId::new("1.5"),
            TrackId::new("-7")
        ]
    );
    assert_eq!(
        catalog.composer_name(&ComposerId::new("18446744073709551615")),
        "Big"
    );
}

#[test]
fn test_piece_of_unlisted_composer_still_loads() {
    let piece = piece_yaml("orphan", "42", &["t"]);
    let dir = write_catalog("- id: 1\n  name: One\n", &[("orphan.yml", piece.as_str())]);

    let catalog = Catalog::load(dir.path()).unwrap();
    assert_eq!(
        catalog.get_composer_pieces(&ComposerId::new("42")).unwrap(),
        ["orphan"]
    );
    assert_eq!(catalog.composer_name(&ComposerId::new("42")), "42");
}

fn album_track(id: &str, name: &str, number: u32) -> AlbumTrack {
    AlbumTrack {
        id: id.to_string(),
        name: name.to_string(),
        track_number: number,
        disc_number: 1,
    }
}

#[tokio::test]
async fn test_written_piece_loads_back() {
    let dir = TempDir::new().unwrap();
    let tracks = vec![
        album_track("x1", "Sonata No. 14: I. Adagio sostenuto", 1),
        album_track("x2", "Sonata No. 14: II. Allegretto", 2),
    ];
    let draft = PieceDraft::new(ComposerId::new("1234"), "alb1".to_string(), &tracks, None).unwrap();
    assert_eq!(draft.piece().name, "Sonata No. 14: I. Adagio sostenuto");

    let path = dir.path().join("tracks/beethoven/sonata-14.yml");
    write_piece(&path, draft.piece()).await.unwrap();

    let loaded = parse_piece(&path).unwrap();
    assert_eq!(&loaded, draft.piece());
    assert_eq!(loaded.tracks, vec![TrackId::new("x1"), TrackId::new("x2")]);
}

#[test]
fn test_draft_needs_tracks_and_honours_name() {
    assert!(PieceDraft::new(ComposerId::new("1"), "alb".to_string(), &[], None).is_err());

    let tracks = vec![album_track("x1", "I. Allegro", 1)];
    let draft = PieceDraft::new(
        ComposerId::new("1"),
        "alb".to_string(),
        &tracks,
        Some("Concerto".to_string()),
    )
    .unwrap();
    let piece = draft.into_piece();
    assert_eq!(piece.name, "Concerto");
    assert_eq!(piece.id.len(), 32);
}
