//! The single owned application state for the list window.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::filter::filter_indices;
use super::geometry::Geometry;
use super::scrollbar::{DragState, Thumb, Track};
use super::{scrollbar, selection, viewport};
use crate::collect::ProcessRecord;

/// Which region receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    #[default]
    SearchBox,
    ListArea,
}

/// Pointer hover flags. Only drive highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hover {
    pub kill_button: bool,
    pub scrollbar: bool,
}

/// Everything the list window knows.
///
/// Invariants upheld by every mutation:
/// - `offset <= max(0, filtered.len() - capacity)`
/// - `selected` is `None` or `< filtered.len()`
/// - `filtered` is `filter_indices(records, query)`
#[derive(Debug, Clone)]
pub struct ListState {
    records: Vec<ProcessRecord>,
    query: String,
    filtered: Vec<usize>,
    offset: usize,
    selected: Option<usize>,
    pub(super) drag: Option<DragState>,
    pub(super) focus: Focus,
    pub(super) hover: Hover,
    pub(super) cursor_visible: bool,
    geometry: Geometry,
}

impl ListState {
    /// Initial state: search focused, empty query, nothing loaded.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            records: Vec::new(),
            query: String::new(),
            filtered: Vec::new(),
            offset: 0,
            selected: None,
            drag: None,
            focus: Focus::SearchBox,
            hover: Hover::default(),
            cursor_visible: true,
            geometry,
        }
    }

    pub fn with_records(geometry: Geometry, records: Vec<ProcessRecord>) -> Self {
        let mut state = Self::new(geometry);
        state.replace_records(records);
        state
    }

    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn hover(&self) -> Hover {
        self.hover
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn capacity(&self) -> usize {
        self.geometry.capacity
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of records matching the current query.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// The `index`-th record of the filtered list.
    pub fn filtered_record(&self, index: usize) -> Option<&ProcessRecord> {
        self.filtered.get(index).and_then(|&i| self.records.get(i))
    }

    /// The filtered list, in store order.
    pub fn filtered(&self) -> impl Iterator<Item = &ProcessRecord> + '_ {
        self.filtered.iter().filter_map(|&i| self.records.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&ProcessRecord> {
        self.selected.and_then(|i| self.filtered_record(i))
    }

    pub fn visible_range(&self) -> Range<usize> {
        viewport::visible_range(self.offset, self.filtered_len(), self.capacity())
    }

    pub fn max_offset(&self) -> usize {
        viewport::max_offset(self.filtered_len(), self.capacity())
    }

    /// Whether the filtered list overflows the visible rows.
    pub fn scrollable(&self) -> bool {
        self.filtered_len() > self.capacity()
    }

    pub(super) fn track(&self) -> Track {
        Track::new(
            self.geometry.scrollbar.y,
            self.geometry.track_height(),
            self.geometry.min_thumb,
        )
    }

    pub fn thumb(&self) -> Option<Thumb> {
        scrollbar::thumb(&self.track(), self.offset, self.capacity(), self.filtered_len())
    }

    /// Replace the store after a refresh.
    ///
    /// Reapplies the query, keeps the offset (re-clamped), and drops a
    /// selection that no longer addresses an item.
    pub fn replace_records(&mut self, records: Vec<ProcessRecord>) {
        self.records = records;
        self.refilter();
        self.offset = viewport::clamp_offset(
            self.offset as isize,
            self.filtered_len(),
            self.capacity(),
        );
        self.selected = selection::revalidate(self.selected, self.filtered_len());
    }

    /// Apply a new query. Resets the offset and clears the selection.
    pub(super) fn set_query(&mut self, query: String) {
        self.query = query;
        self.refilter();
        self.offset = 0;
        self.selected = None;
    }

    pub(super) fn push_query_char(&mut self, c: char) {
        let mut query = std::mem::take(&mut self.query);
        query.push(c);
        self.set_query(query);
    }

    /// Returns `false` when the query was already empty.
    pub(super) fn pop_query_char(&mut self) -> bool {
        if self.query.is_empty() {
            return false;
        }
        let mut query = std::mem::take(&mut self.query);
        query.pop();
        self.set_query(query);
        true
    }

    /// Set the offset, clamped. Returns whether it changed.
    pub(super) fn scroll_to(&mut self, requested: isize) -> bool {
        let next = viewport::clamp_offset(requested, self.filtered_len(), self.capacity());
        let changed = next != self.offset;
        self.offset = next;
        changed
    }

    pub(super) fn scroll_by(&mut self, delta: isize) -> bool {
        let next = viewport::scrolled(self.offset, delta, self.filtered_len(), self.capacity());
        let changed = next != self.offset;
        self.offset = next;
        changed
    }

    pub(super) fn select(&mut self, index: usize) {
        self.selected = selection::select(index, self.filtered_len());
    }

    pub(super) fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub(super) fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
        self.offset = viewport::clamp_offset(
            self.offset as isize,
            self.filtered_len(),
            self.capacity(),
        );
    }

    fn refilter(&mut self) {
        self.filtered = filter_indices(&self.records, &self.query);
    }
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(Geometry::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: u32) -> Vec<ProcessRecord> {
        (1..=n)
            .map(|pid| ProcessRecord::new(pid, "user", format!("proc-{pid}")))
            .collect()
    }

    #[test]
    fn initial_state() {
        let state = ListState::default();
        assert_eq!(state.focus(), Focus::SearchBox);
        assert_eq!(state.offset(), 0);
        assert_eq!(state.selected_index(), None);
        assert!(!state.is_dragging());
        assert_eq!(state.query(), "");
        assert!(state.cursor_visible());
    }

    #[test]
    fn refresh_preserves_offset() {
        let mut state = ListState::with_records(Geometry::desktop(), records(100));
        assert!(state.scroll_to(30));
        state.replace_records(records(90));
        assert_eq!(state.offset(), 30);
    }

    #[test]
    fn refresh_reclamps_offset_when_list_shrinks() {
        let mut state = ListState::with_records(Geometry::desktop(), records(100));
        state.scroll_to(75);
        state.replace_records(records(40));
        assert_eq!(state.offset(), 15);
        state.replace_records(records(3));
        assert_eq!(state.offset(), 0);
    }

    #[test]
    fn refresh_drops_dangling_selection() {
        let mut state = ListState::with_records(Geometry::desktop(), records(10));
        state.select(8);
        state.replace_records(records(5));
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn query_resets_offset_and_selection() {
        let mut state = ListState::with_records(Geometry::desktop(), records(100));
        state.scroll_to(10);
        state.select(12);
        state.push_query_char('1');
        assert_eq!(state.offset(), 0);
        assert_eq!(state.selected_index(), None);
        assert!(state.filtered().all(|r| r.display_line().contains('1')));
    }

    #[test]
    fn popping_empty_query_reports_no_change() {
        let mut state = ListState::default();
        assert!(!state.pop_query_char());
    }

    #[test]
    fn selected_record_follows_filter() {
        let mut state = ListState::with_records(Geometry::desktop(), records(20));
        state.push_query_char('-');
        state.push_query_char('2');
        // proc-2, proc-20
        state.select(1);
        assert_eq!(state.selected_record().map(|r| r.pid.0), Some(20));
    }
}
