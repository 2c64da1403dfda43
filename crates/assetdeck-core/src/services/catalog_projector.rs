//! Filtering, sorting and pagination of catalog listings.
//!
//! `project` always composes the three in the same order (filter, then a
//! stable sort, then paginate) so identical inputs give identical pages.

use std::cmp::Ordering;

use crate::domain::{
    Asset, AssetDetails, CatalogView, EmptyState, FilterAttribute, FilterSet, McpServerAsset,
    ModelAsset, Page, SortDirection, SortKey,
};
use crate::settings::DEFAULT_PAGE_SIZE;

/// An item the projector can filter and sort.
pub trait Projectable {
    fn display_name(&self) -> &str;
    fn details(&self) -> &AssetDetails;
}

impl Projectable for ModelAsset {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn details(&self) -> &AssetDetails {
        &self.details
    }
}

impl Projectable for McpServerAsset {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn details(&self) -> &AssetDetails {
        &self.details
    }
}

impl Projectable for Asset {
    fn display_name(&self) -> &str {
        self.name()
    }

    fn details(&self) -> &AssetDetails {
        Self::details(self)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn attribute_matches<T: Projectable>(item: &T, attribute: FilterAttribute, needle: &str) -> bool {
    let details = item.details();
    match attribute {
        FilterAttribute::Name => contains_ignore_case(item.display_name(), needle),
        FilterAttribute::Keyword => details
            .keywords
            .iter()
            .any(|k| contains_ignore_case(k, needle)),
        FilterAttribute::UseCase => contains_ignore_case(&details.use_case, needle),
        FilterAttribute::Description => contains_ignore_case(&details.description, needle),
    }
}

/// True if `item` passes every active attribute of `filters`.
pub fn matches<T: Projectable>(item: &T, filters: &FilterSet) -> bool {
    filters.active().all(|(attribute, values)| {
        values
            .iter()
            .any(|needle| attribute_matches(item, attribute, needle))
    })
}

/// Keep the items that pass `filters`, preserving order.
pub fn filter<T: Projectable + Clone>(items: &[T], filters: &FilterSet) -> Vec<T> {
    items
        .iter()
        .filter(|item| matches(*item, filters))
        .cloned()
        .collect()
}

/// Compare dotted versions numerically segment by segment, falling back to
/// case-insensitive text for non-numeric segments.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.to_lowercase().cmp(&r.to_lowercase()),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

fn compare_by<T: Projectable>(a: &T, b: &T, key: SortKey) -> Ordering {
    let (da, db) = (a.details(), b.details());
    match key {
        SortKey::Name => a
            .display_name()
            .to_lowercase()
            .cmp(&b.display_name().to_lowercase()),
        SortKey::Status => da.status.to_lowercase().cmp(&db.status.to_lowercase()),
        SortKey::Version => compare_versions(&da.version, &db.version),
        SortKey::Description => da
            .description
            .to_lowercase()
            .cmp(&db.description.to_lowercase()),
    }
}

/// Stable sort by a single key. Ties keep their original order in both directions.
pub fn sort<T: Projectable>(items: &mut [T], key: SortKey, direction: SortDirection) {
    items.sort_by(|a, b| {
        let ordering = compare_by(a, b, key);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Slice out 1-based page `page`. Page 0 is treated as page 1.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(items.len());
    let slice = if start < items.len() {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };
    Page {
        items: slice,
        page,
        page_size,
        total_items: items.len(),
    }
}

/// Stateful catalog query as driven by a listing view.
///
/// Any change to the filters resets the page to 1 so a narrowed result set
/// never lands on an empty page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    filters: FilterSet,
    sort: Option<(SortKey, SortDirection)>,
    page: usize,
    page_size: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CatalogQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            filters: FilterSet::new(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub const fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub const fn page(&self) -> usize {
        self.page
    }

    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn add_filter(&mut self, attribute: FilterAttribute, value: impl Into<String>) {
        self.filters.insert(attribute, value);
        self.page = 1;
    }

    pub fn remove_filter(&mut self, attribute: FilterAttribute, value: &str) {
        self.filters.remove(attribute, value);
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page = 1;
    }

    pub const fn set_sort(&mut self, key: SortKey, direction: SortDirection) {
        self.sort = Some((key, direction));
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Filter, sort and paginate `items`.
    pub fn project<T: Projectable + Clone>(&self, items: &[T]) -> CatalogView<T> {
        let mut visible = filter(items, &self.filters);
        if let Some((key, direction)) = self.sort {
            sort(&mut visible, key, direction);
        }

        let empty_state = if visible.is_empty() {
            if self.filters.is_active() && !items.is_empty() {
                Some(EmptyState::NoMatches)
            } else {
                Some(EmptyState::NoAssets)
            }
        } else {
            None
        };

        CatalogView {
            page: paginate(&visible, self.page, self.page_size),
            empty_state,
        }
    }
}
