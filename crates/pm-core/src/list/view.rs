//! Declarative view state handed to renderers.

use pm_common::ProcessId;
use serde::Serialize;

use super::geometry::Rect;
use super::state::{Focus, ListState};

pub const SEARCH_PLACEHOLDER: &str = "Search...";
pub const KILL_BUTTON_LABEL: &str = "Kill Process";

/// One visible row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    /// Index into the filtered list.
    pub index: usize,
    pub pid: ProcessId,
    pub line: String,
    pub selected: bool,
    /// Even filtered indices are tinted.
    pub striped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchView {
    pub text: String,
    pub placeholder: &'static str,
    pub focused: bool,
    /// Blink phase; only meaningful while focused.
    pub cursor_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KillButtonView {
    pub label: &'static str,
    pub area: Rect,
    pub hovered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrollbarView {
    pub track: Rect,
    /// Thumb top relative to `track.y`.
    pub thumb_top: i32,
    pub thumb_height: i32,
    pub hovered: bool,
    pub dragging: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub rows: Vec<RowView>,
    pub search: SearchView,
    /// Present only while a row is selected.
    pub kill_button: Option<KillButtonView>,
    /// Present only while the filtered list overflows.
    pub scrollbar: Option<ScrollbarView>,
    pub total_records: usize,
    pub matching_records: usize,
    pub offset: usize,
}

/// Project the state into a frame description.
pub fn view_state(state: &ListState) -> ViewState {
    let selected = state.selected_index();
    let rows = state
        .visible_range()
        .filter_map(|index| {
            state.filtered_record(index).map(|record| RowView {
                index,
                pid: record.pid,
                line: record.display_line(),
                selected: selected == Some(index),
                striped: index % 2 == 0,
            })
        })
        .collect();

    let geometry = state.geometry();
    let hover = state.hover();

    let kill_button = selected.map(|_| KillButtonView {
        label: KILL_BUTTON_LABEL,
        area: geometry.kill_button,
        hovered: hover.kill_button,
    });

    let scrollbar = state.thumb().map(|thumb| ScrollbarView {
        track: geometry.scrollbar,
        thumb_top: thumb.top,
        thumb_height: thumb.height,
        hovered: hover.scrollbar,
        dragging: state.is_dragging(),
    });

    ViewState {
        rows,
        search: SearchView {
            text: state.query().to_string(),
            placeholder: SEARCH_PLACEHOLDER,
            focused: state.focus() == Focus::SearchBox,
            cursor_visible: state.cursor_visible(),
        },
        kill_button,
        scrollbar,
        total_records: state.records().len(),
        matching_records: state.filtered_len(),
        offset: state.offset(),
    }
}
