//! In-memory catalog and the pure search/sort queries over it.
use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::id::EntityId;
use crate::view::CreatureView;

/// Sort order the user can pick from the filter menu.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortKey {
    /// Display name, ascending.
    Name,
    /// Primary type tag, ascending.
    Type,
    /// Identifier, ascending.
    Number,
}

/// Search text plus an optional sort selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: String,
    pub sort: Option<SortKey>,
}

impl CatalogQuery {
    pub fn new(search: impl Into<String>, sort: Option<SortKey>) -> Self {
        Self {
            search: search.into(),
            sort,
        }
    }

    pub fn matches(&self, view: &CreatureView) -> bool {
        let needle = self.search.trim().to_lowercase();
        needle.is_empty() || view.name.trim().to_lowercase().contains(&needle)
    }
}

/// Resolved collection, owned by the caller.
///
/// Rows keep the order the pipeline produced them in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogStore {
    views: Vec<CreatureView>,
}

impl CatalogStore {
    pub fn new(views: Vec<CreatureView>) -> Self {
        Self { views }
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CreatureView> {
        self.views.iter()
    }

    pub fn as_slice(&self) -> &[CreatureView] {
        &self.views
    }

    pub fn into_inner(self) -> Vec<CreatureView> {
        self.views
    }

    pub fn get(&self, id: EntityId) -> Option<&CreatureView> {
        self.views.iter().find(|view| view.id() == id)
    }

    /// Visible rows for `query`: filtered by name, then (stably) sorted.
    pub fn query(&self, query: &CatalogQuery) -> Vec<&CreatureView> {
        let mut visible: Vec<&CreatureView> =
            self.views.iter().filter(|view| query.matches(view)).collect();

        if let Some(key) = query.sort {
            visible.sort_by(|a, b| compare(key, a, b));
        }

        visible
    }
}

impl IntoIterator for CatalogStore {
    type Item = CreatureView;
    type IntoIter = std::vec::IntoIter<CreatureView>;

    fn into_iter(self) -> Self::IntoIter {
        self.views.into_iter()
    }
}

impl<'a> IntoIterator for &'a CatalogStore {
    type Item = &'a CreatureView;
    type IntoIter = std::slice::Iter<'a, CreatureView>;

    fn into_iter(self) -> Self::IntoIter {
        self.views.iter()
    }
}

impl FromIterator<CreatureView> for CatalogStore {
    fn from_iter<I: IntoIterator<Item = CreatureView>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn compare(key: SortKey, a: &CreatureView, b: &CreatureView) -> Ordering {
    match key {
        SortKey::Name => collate(&a.name, &b.name),
        SortKey::Type => match (a.primary_type(), b.primary_type()) {
            (Some(x), Some(y)) => collate(x, y),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::Number => a.id().cmp(&b.id()),
    }
}

/// Name ordering: accents and case are ignored first, then accents break
/// ties (`e` < `é`), then the raw string so the order is total.
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Lowercased base letters: NFD-decomposed with combining marks dropped.
fn primary_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
