use crate::{
    catalog::Catalog,
    types::{ComposerId, SearchTableRow},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTarget {
    Composer(ComposerId),
    Piece(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    pub label: String,
    pub target: SearchTarget,
}

impl SearchEntry {
    pub fn table_row(&self) -> SearchTableRow {
        let (kind, id) = match &self.target {
            SearchTarget::Composer(id) => ("composer", id.to_string()),
            SearchTarget::Piece(id) => ("piece", id.clone()),
        };
        SearchTableRow {
            kind: kind.to_string(),
            label: self.label.clone(),
            id,
        }
    }
}

/// Searchable labels for every composer and piece.
///
/// Composers are labelled by name, pieces as `"<piece>: <composer>"`.
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
}

impl SearchIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let mut composers: Vec<SearchEntry> = catalog
            .get_composers()
            .values()
            .map(|c| SearchEntry {
                label: c.name.clone(),
                target: SearchTarget::Composer(c.id.clone()),
            })
            .collect();
        composers.sort_by(|a, b| a.label.cmp(&b.label));

        let mut pieces: Vec<SearchEntry> = catalog
            .get_pieces()
            .values()
            .map(|p| SearchEntry {
                label: format!("{}: {}", p.name, catalog.composer_name(&p.composer_id)),
                target: SearchTarget::Piece(p.id.clone()),
            })
            .collect();
        pieces.sort_by(|a, b| a.label.cmp(&b.label));

        composers.extend(pieces);
        Self { entries: composers }
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    /// Case-insensitive lookup. Exact label matches win over substring
    /// matches; a blank query matches nothing.
    pub fn find(&self, query: &str) -> Vec<&SearchEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let exact: Vec<&SearchEntry> = self
            .entries
            .iter()
            .filter(|e| e.label.to_lowercase() == needle)
            .collect();
        if !exact.is_empty() {
            return exact;
        }

        self.entries
            .iter()
            .filter(|e| e.label.to_lowercase().contains(&needle))
            .collect()
    }

    /// The single entry matching `query`, if the match is unambiguous.
    pub fn find_one(&self, query: &str) -> Option<&SearchEntry> {
        match self.find(query).as_slice() {
            [entry] => Some(*entry),
            _ => None,
        }
    }

    /// Resolves a composer by exact id or by an unambiguous name match.
    pub fn find_composer(&self, query: &str) -> Option<ComposerId> {
        let by_id = self.entries.iter().find_map(|e| match &e.target {
            SearchTarget::Composer(id) if id.as_str() == query.trim() => Some(id.clone()),
            _ => None,
        });
        if by_id.is_some() {
            return by_id;
        }

        let composers: Vec<&ComposerId> = self
            .find(query)
            .into_iter()
            .filter_map(|e| match &e.target {
                SearchTarget::Composer(id) => Some(id),
                SearchTarget::Piece(_) => None,
            })
            .collect();
        match composers.as_slice() {
            [id] => Some((*id).clone()),
            _ => None,
        }
    }
}
