use tabled::Table;

use crate::{
    cli::load_catalog,
    info,
    search::SearchIndex,
    types::{ComposerTableRow, PieceTableRow},
    utils, warning,
};

const NAME_WIDTH: usize = 70;

pub async fn composers() {
    let catalog = load_catalog();
    let mut rows: Vec<ComposerTableRow> = catalog
        .get_composers()
        .values()
        .map(|c| ComposerTableRow {
            id: c.id.to_string(),
            name: c.name.clone(),
            pieces: catalog
                .get_composer_pieces(&c.id)
                .map(|ids| ids.len())
                .unwrap_or(0),
        })
        .collect();

    if rows.is_empty() {
        info!("The catalog has no composers.");
        return;
    }

    rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    println!("{}", Table::new(rows));
}

/// Lists pieces, optionally only those of one composer.
pub async fn pieces(composer: Option<String>) {
    let catalog = load_catalog();

    let ids: Vec<String> = match composer {
        Some(query) => {
            let index = SearchIndex::build(&catalog);
            let Some(composer_id) = index.find_composer(&query) else {
                warning!("No single composer matches '{}'.", query);
                return;
            };
            match catalog.get_composer_pieces(&composer_id) {
                Ok(ids) => ids.to_vec(),
                Err(_) => {
                    info!("{} has no pieces.", catalog.composer_name(&composer_id));
                    return;
                }
            }
        }
        None => catalog.get_pieces().keys().cloned().collect(),
    };

    let mut rows: Vec<PieceTableRow> = ids
        .iter()
        .filter_map(|id| catalog.piece(id))
        .map(|p| PieceTableRow {
            id: p.id.clone(),
            name: utils::elide(&p.name, NAME_WIDTH),
            composer: catalog.composer_name(&p.composer_id).to_string(),
            tracks: p.tracks.len(),
        })
        .collect();

    if rows.is_empty() {
        info!("The catalog has no pieces.");
        return;
    }

    rows.sort_by(|a, b| (&a.composer, &a.name).cmp(&(&b.composer, &b.name)));
    println!("{}", Table::new(rows));
}
