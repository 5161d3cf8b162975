use crate::core::ordering::{compare_values, value_equals};
use crate::domain::column::{find_column, ColumnSpec};
use crate::domain::model::{value_text, Record};
use crate::domain::state::{FilterState, SortDirection, SortState, ViewState};

/// One computed page of a view. Rows borrow from the input collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewResult<'a> {
    pub visible: Vec<&'a Record>,
    pub total_filtered: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

impl ViewResult<'_> {
    /// 1-based `(first, last, total)` row numbers of the visible page, for a
    /// "Showing 11 to 20 of 42" footer. `None` when the page is empty.
    pub fn showing(&self) -> Option<(usize, usize, usize)> {
        if self.visible.is_empty() {
            return None;
        }
        let first = (self.page.max(1) - 1) * self.page_size + 1;
        Some((first, first + self.visible.len() - 1, self.total_filtered))
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

pub fn total_pages(total_filtered: usize, page_size: usize) -> usize {
    total_filtered.div_ceil(page_size.max(1)).max(1)
}

/// Bounds `page` to `[1, total_pages]`.
pub fn clamp_page(page: usize, total_filtered: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(total_filtered, page_size))
}

/// Search, filter, sort and paginate `records`, in that order.
///
/// Every filter and the sort key are applied as given; column flags only
/// constrain what [`DataView`] lets through. The input is never reordered.
/// `page` is not clamped here; see [`clamp_page`].
pub fn compute_view<'a>(
    records: &'a [Record],
    _columns: &[ColumnSpec],
    search: &str,
    filters: &FilterState,
    sort: &SortState,
    page: usize,
    page_size: usize,
) -> ViewResult<'a> {
    let page_size = page_size.max(1);
    let mut rows = filter_records(records, search, filters);

    if let Some(key) = sort.key.as_deref() {
        // sort_by is stable, so ties keep their filtered order in both directions.
        rows.sort_by(|a, b| {
            let ordering = compare_values(a.get(key), b.get(key));
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    let total_filtered = rows.len();
    let start = page.saturating_sub(1).saturating_mul(page_size);
    let visible = rows.into_iter().skip(start).take(page_size).collect();

    ViewResult {
        visible,
        total_filtered,
        total_pages: total_pages(total_filtered, page_size),
        page,
        page_size,
    }
}

/// [`compute_view`] driven by a state snapshot.
pub fn compute_view_for<'a>(
    records: &'a [Record],
    columns: &[ColumnSpec],
    state: &ViewState,
) -> ViewResult<'a> {
    compute_view(
        records,
        columns,
        &state.search,
        &state.filters,
        &state.sort,
        state.page.page,
        state.page.page_size,
    )
}

fn filter_records<'a>(records: &'a [Record], search: &str, filters: &FilterState) -> Vec<&'a Record> {
    let needle = search.to_lowercase();

    records
        .iter()
        .filter(|record| needle.is_empty() || matches_search(record, &needle))
        .filter(|record| {
            filters
                .iter()
                .all(|(key, expected)| value_equals(record.get(key), expected))
        })
        .collect()
}

fn matches_search(record: &Record, needle: &str) -> bool {
    record
        .values()
        .filter_map(value_text)
        .any(|text| text.to_lowercase().contains(needle))
}

/// A record collection and its columns, viewed through a [`ViewState`].
///
/// Each interaction returns a new `DataView`; the records are never copied
/// or mutated.
#[derive(Debug, Clone)]
pub struct DataView<'a> {
    records: &'a [Record],
    columns: &'a [ColumnSpec],
    state: ViewState,
}

impl<'a> DataView<'a> {
    pub fn new(records: &'a [Record], columns: &'a [ColumnSpec], state: ViewState) -> Self {
        Self {
            records,
            columns,
            state,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn columns(&self) -> &'a [ColumnSpec] {
        self.columns
    }

    pub fn current(&self) -> ViewResult<'a> {
        compute_view_for(self.records, self.columns, &self.state)
    }

    fn with_state(&self, state: ViewState) -> Self {
        tracing::trace!(?state, "view state changed");
        Self {
            state,
            ..self.clone()
        }
    }

    pub fn search(&self, term: impl Into<String>) -> Self {
        self.with_state(self.state.with_search(term))
    }

    /// Sets one column filter. A column marked non-filterable, or a value
    /// outside the column's enumerated options, leaves the view unchanged.
    /// Keys with no column entry are accepted.
    pub fn filter(&self, key: &str, value: &str) -> Self {
        if !self.accepts_filter(key, value) {
            tracing::debug!("Ignoring filter {}={}", key, value);
            return self.clone();
        }
        self.with_state(self.state.with_filter(key, value))
    }

    /// Whether [`DataView::filter`] would apply `key=value`. An empty value
    /// clears the filter and is always accepted.
    pub fn accepts_filter(&self, key: &str, value: &str) -> bool {
        match find_column(self.columns, key) {
            Some(column) => {
                value.is_empty() || (column.filterable && column.allows_filter_value(value))
            }
            None => true,
        }
    }

    pub fn accepts_sort(&self, key: &str) -> bool {
        find_column(self.columns, key).map_or(true, |c| c.sortable)
    }

    pub fn clear_filters(&self) -> Self {
        self.with_state(self.state.cleared())
    }

    /// Header click. Columns marked non-sortable leave the view unchanged.
    pub fn sort_by(&self, key: &str) -> Self {
        if !self.accepts_sort(key) {
            return self.clone();
        }
        self.with_state(self.state.sorted_on(key))
    }

    /// Replaces the sort outright, e.g. from a saved or command-line state.
    /// A non-sortable key leaves the view unchanged.
    pub fn sorted(&self, sort: SortState) -> Self {
        match sort.key.as_deref() {
            Some(key) if !self.accepts_sort(key) => self.clone(),
            _ => self.with_state(self.state.with_sort(sort)),
        }
    }

    /// Moves to `page`, clamped to the pages the current result has.
    pub fn go_to_page(&self, page: usize) -> Self {
        let total = self.current().total_filtered;
        let page = clamp_page(page, total, self.state.page.page_size);
        self.with_state(self.state.at_page(page))
    }

    pub fn next_page(&self) -> Self {
        self.go_to_page(self.state.page.page.saturating_add(1))
    }

    pub fn previous_page(&self) -> Self {
        self.go_to_page(self.state.page.page.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<Record> {
        vec![
            Record::from_value(json!({"id": 1, "name": "B", "val": 5})).unwrap(),
            Record::from_value(json!({"id": 2, "name": "A", "val": 5})).unwrap(),
            Record::from_value(json!({"id": 3, "name": "C", "val": 1})).unwrap(),
        ]
    }

    fn ids(result: &ViewResult) -> Vec<u64> {
        result
            .visible
            .iter()
            .map(|r| r.get("id").and_then(|v| v.as_u64()).unwrap())
            .collect()
    }

    #[test]
    fn test_stable_ascending_sort() {
        let data = records();
        let result = compute_view(
            &data,
            &[],
            "",
            &FilterState::new(),
            &SortState::by("val", SortDirection::Asc),
            1,
            10,
        );
        assert_eq!(ids(&result), vec![3, 1, 2]);
        assert_eq!(result.total_filtered, 3);
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_descending_sort_keeps_ties_in_input_order() {
        let data = records();
        let result = compute_view(
            &data,
            &[],
            "",
            &FilterState::new(),
            &SortState::by("val", SortDirection::Desc),
            1,
            10,
        );
        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn test_no_sort_key_preserves_input_order() {
        let data = records();
        let result = compute_view(&data, &[], "", &FilterState::new(), &SortState::none(), 1, 10);
        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_collection() {
        let result = compute_view(&[], &[], "x", &FilterState::new(), &SortState::none(), 1, 10);
        assert!(result.visible.is_empty());
        assert_eq!(result.total_filtered, 0);
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.showing(), None);
    }

    #[test]
    fn test_search_is_case_insensitive_over_all_fields() {
        let data = vec![
            Record::from_value(json!({"id": 1, "name": "North Hall", "type": "dorm"})).unwrap(),
            Record::from_value(json!({"id": 2, "name": "Gym", "type": "Athletics"})).unwrap(),
            Record::from_value(json!({"id": 3, "name": "Lab 12", "type": "science"})).unwrap(),
        ];
        let result = compute_view(&data, &[], "ATH", &FilterState::new(), &SortState::none(), 1, 10);
        assert_eq!(ids(&result), vec![2]);

        // Numbers are stringified before matching.
        let result = compute_view(&data, &[], "12", &FilterState::new(), &SortState::none(), 1, 10);
        assert_eq!(ids(&result), vec![3]);
    }

    #[test]
    fn test_filters_are_anded() {
        let data = vec![
            Record::from_value(json!({"id": 1, "role": "Admin", "status": "Active"})).unwrap(),
            Record::from_value(json!({"id": 2, "role": "Admin", "status": "Inactive"})).unwrap(),
            Record::from_value(json!({"id": 3, "role": "Student", "status": "Active"})).unwrap(),
            Record::from_value(json!({"id": 4, "status": "Active"})).unwrap(),
        ];
        let filters: FilterState = [("role", "Admin"), ("status", "Active")].into_iter().collect();
        let result = compute_view(&data, &[], "", &filters, &SortState::none(), 1, 10);
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_compute_view_applies_filters_and_sort_regardless_of_column_flags() {
        let data = records();
        let columns = vec![
            ColumnSpec::new("name", "Name").not_filterable().not_sortable(),
            ColumnSpec::new("val", "Value").not_sortable(),
        ];

        let filters = FilterState::new().with("name", "A");
        let result = compute_view(&data, &columns, "", &filters, &SortState::none(), 1, 10);
        assert_eq!(ids(&result), vec![2]);
        assert_eq!(result.total_filtered, 1);

        let sort = SortState::by("name", SortDirection::Desc);
        let result = compute_view(&data, &columns, "", &FilterState::new(), &sort, 1, 10);
        assert_eq!(ids(&result), vec![3, 1, 2]);
    }

    #[test]
    fn test_data_view_guards_column_flags_and_options() {
        let data = records();
        let columns = vec![
            ColumnSpec::new("name", "Name").not_filterable(),
            ColumnSpec::new("val", "Value").with_filter_options(["1", "5"]),
        ];
        let view = DataView::new(&data, &columns, ViewState::new(10));

        assert!(!view.accepts_filter("name", "A"));
        assert_eq!(view.filter("name", "A").state(), view.state());
        assert_eq!(view.filter("val", "7").state(), view.state());
        assert!(view.accepts_filter("id", "2"));

        let fives = view.filter("val", "5");
        assert_eq!(ids(&fives.current()), vec![1, 2]);
        assert_eq!(fives.filter("val", "").current().total_filtered, 3);
    }

    #[test]
    fn test_pagination_slices_and_counts() {
        let data: Vec<Record> = (1..=23)
            .map(|i| Record::from_value(json!({"id": i})).unwrap())
            .collect();
        let result = compute_view(&data, &[], "", &FilterState::new(), &SortState::none(), 3, 10);
        assert_eq!(ids(&result), vec![21, 22, 23]);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.showing(), Some((21, 23, 23)));
        assert!(!result.has_next());
        assert!(result.has_previous());

        // Out-of-range pages are the caller's to clamp.
        let result = compute_view(&data, &[], "", &FilterState::new(), &SortState::none(), 9, 10);
        assert!(result.visible.is_empty());
        assert_eq!(result.total_pages, 3);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 23, 10), 1);
        assert_eq!(clamp_page(2, 23, 10), 2);
        assert_eq!(clamp_page(9, 23, 10), 3);
        assert_eq!(clamp_page(4, 0, 10), 1);
    }

    #[test]
    fn test_data_view_interactions() {
        let data: Vec<Record> = (1..=25)
            .map(|i| {
                let role = if i % 5 == 0 { "Admin" } else { "Student" };
                Record::from_value(json!({"id": i, "role": role})).unwrap()
            })
            .collect();
        let columns = vec![ColumnSpec::new("role", "Role")];

        let view = DataView::new(&data, &columns, ViewState::new(10)).go_to_page(3);
        assert_eq!(view.state().page.page, 3);
        assert_eq!(view.current().visible.len(), 5);

        let view = view.next_page();
        assert_eq!(view.state().page.page, 3);

        let filtered = view.filter("role", "Admin");
        assert_eq!(filtered.state().page.page, 1);
        assert_eq!(filtered.current().total_filtered, 5);

        let cleared = filtered.clear_filters();
        assert_eq!(cleared.current().total_filtered, 25);
    }

    #[test]
    fn test_previous_page_stops_at_first_page() {
        let data: Vec<Record> = (1..=25)
            .map(|i| Record::from_value(json!({"id": i})).unwrap())
            .collect();
        let view = DataView::new(&data, &[], ViewState::new(10)).go_to_page(3);

        let view = view.previous_page();
        assert_eq!(view.state().page.page, 2);
        assert_eq!(ids(&view.current())[0], 11);

        let view = view.previous_page().previous_page();
        assert_eq!(view.state().page.page, 1);
        assert_eq!(ids(&view.current())[0], 1);
    }

    #[test]
    fn test_data_view_sort_toggle_and_guard() {
        let data = records();
        let columns = vec![
            ColumnSpec::new("val", "Value"),
            ColumnSpec::new("name", "Name").not_sortable(),
        ];
        let view = DataView::new(&data, &columns, ViewState::new(10));

        let asc = view.sort_by("val");
        assert_eq!(ids(&asc.current()), vec![3, 1, 2]);

        let desc = asc.sort_by("val");
        assert_eq!(desc.state().sort.direction, SortDirection::Desc);
        assert_eq!(ids(&desc.current()), vec![1, 2, 3]);

        let unchanged = desc.sort_by("name");
        assert_eq!(unchanged.state(), desc.state());

        let explicit = view.sorted(SortState::by("val", SortDirection::Desc));
        assert_eq!(ids(&explicit.current()), vec![1, 2, 3]);
        let refused = view.sorted(SortState::by("name", SortDirection::Asc));
        assert_eq!(refused.state(), view.state());
    }
}
