//! Immutable view-state snapshots.
//!
//! Every transition returns a new snapshot. Transitions that change which
//! records are in the result set (search, filters, sort) also send the page
//! back to 1, since the old page number may no longer exist.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "ascending")]
    Asc,
    #[serde(alias = "descending")]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// At most one sorted column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn by(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    /// Header-click semantics: the same column flips direction, a new column
    /// starts ascending.
    pub fn select(&self, key: &str) -> Self {
        match &self.key {
            Some(current) if current == key => Self::by(key, self.direction.toggled()),
            _ => Self::by(key, SortDirection::Asc),
        }
    }
}

/// Selected filter value per column. Empty values are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    values: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`; an empty value clears the filter on `key`.
    pub fn with(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let (key, value) = (key.into(), value.into());
        let mut values = self.values.clone();
        if value.is_empty() {
            values.remove(&key);
        } else {
            values.insert(key, value);
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(FilterState::new(), |state, (k, v)| state.with(k, v))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub page: usize,
    pub page_size: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn at(self, page: usize) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }

    pub fn first(self) -> Self {
        self.at(1)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Complete input of one view computation besides the data itself.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub search: String,
    pub filters: FilterState,
    pub sort: SortState,
    pub page: PageState,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: PageState::new(page_size),
            ..Self::default()
        }
    }

    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            page: self.page.first(),
            ..self.clone()
        }
    }

    pub fn with_filter(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            filters: self.filters.with(key, value),
            page: self.page.first(),
            ..self.clone()
        }
    }

    pub fn with_sort(&self, sort: SortState) -> Self {
        Self {
            sort,
            page: self.page.first(),
            ..self.clone()
        }
    }

    /// Header click on `key`.
    pub fn sorted_on(&self, key: &str) -> Self {
        self.with_sort(self.sort.select(key))
    }

    /// Drops search and every filter. Sort survives.
    pub fn cleared(&self) -> Self {
        Self {
            search: String::new(),
            filters: FilterState::new(),
            page: self.page.first(),
            ..self.clone()
        }
    }

    /// Moves to `page` as given; use `clamp_page` first when the bound matters.
    pub fn at_page(&self, page: usize) -> Self {
        Self {
            page: self.page.at(page),
            ..self.clone()
        }
    }
}
