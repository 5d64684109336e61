//! Filter criteria and the derived filtered view

use std::fmt;

/// Records that expose a discriminant field a filter compares against
///
/// Products are filtered by `category_id`, orders by `status`. Categories use
/// their own id so a single category can be singled out.
pub trait Filterable {
    /// Type of the discriminant field
    type Key: Clone + PartialEq + fmt::Debug + Send + Sync + 'static;

    /// Value of the discriminant field for this record
    fn discriminant(&self) -> Self::Key;
}

/// Active filter criterion of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<K> {
    /// Pass every record through
    All,
    /// Keep only records whose discriminant equals the key
    Only(K),
}

impl<K> Default for Filter<K> {
    fn default() -> Self {
        Filter::All
    }
}

impl<K: PartialEq> Filter<K> {
    /// Whether a discriminant value passes this filter
    pub fn matches(&self, key: &K) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => wanted == key,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }

    /// The selected key, if any
    pub fn key(&self) -> Option<&K> {
        match self {
            Filter::All => None,
            Filter::Only(key) => Some(key),
        }
    }
}

impl<K> From<Option<K>> for Filter<K> {
    fn from(value: Option<K>) -> Self {
        value.map_or(Filter::All, Filter::Only)
    }
}

/// Compute the filtered view of a list
///
/// Server order is preserved; no sorting is applied.
pub fn filtered_view<T>(items: &[T], filter: &Filter<T::Key>) -> Vec<T>
where
    T: Filterable + Clone,
{
    match filter {
        Filter::All => items.to_vec(),
        Filter::Only(_) => items
            .iter()
            .filter(|item| filter.matches(&item.discriminant()))
            .cloned()
            .collect(),
    }
}
