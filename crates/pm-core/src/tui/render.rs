//! Paints a [`ViewState`] onto an ftui frame.

use ftui::layout::Rect as FtuiRect;
use ftui::widgets::block::Block as FtuiBlock;
use ftui::widgets::input::TextInput as FtuiTextInput;
use ftui::widgets::paragraph::Paragraph as FtuiParagraph;
use ftui::widgets::Widget as FtuiWidget;
use ftui::{Cell as FtuiCell, Frame as FtuiFrame, PackedRgba, Style as FtuiStyle};

use crate::list::geometry::terminal::BUTTON_LABEL;
use crate::list::{Geometry, Rect, ViewState};

pub const TRACK_CHAR: char = '│';
pub const TRACK_HOVER_CHAR: char = '┃';
pub const THUMB_CHAR: char = '█';

/// Smallest terminal the layout is drawn in.
pub const MIN_COLS: u16 = 30;
pub const MIN_ROWS: u16 = 8;

/// Fixed colour scheme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub border_focused: FtuiStyle,
    pub border_normal: FtuiStyle,
    pub placeholder: FtuiStyle,
    pub cursor: FtuiStyle,
    pub row: FtuiStyle,
    pub row_striped: FtuiStyle,
    pub row_selected: FtuiStyle,
    pub button: FtuiStyle,
    pub button_hover: FtuiStyle,
    pub status: FtuiStyle,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            border_focused: FtuiStyle::new().fg(PackedRgba::rgb(0, 255, 255)).bold(),
            border_normal: FtuiStyle::new().fg(PackedRgba::rgb(128, 128, 128)),
            placeholder: FtuiStyle::new().fg(PackedRgba::rgb(128, 128, 128)),
            cursor: FtuiStyle::new().reverse(),
            row: FtuiStyle::default(),
            row_striped: FtuiStyle::new().bg(PackedRgba::rgb(40, 40, 40)),
            row_selected: FtuiStyle::new().reverse(),
            button: FtuiStyle::new().fg(PackedRgba::rgb(255, 0, 0)).bold(),
            button_hover: FtuiStyle::new().fg(PackedRgba::rgb(255, 0, 0)).bold().reverse(),
            status: FtuiStyle::new().fg(PackedRgba::rgb(128, 128, 128)),
        }
    }
}

/// Convert a layout rectangle to frame coordinates, dropping anything
/// negative or empty.
fn to_area(rect: &Rect) -> Option<FtuiRect> {
    let x = u16::try_from(rect.x).ok()?;
    let y = u16::try_from(rect.y).ok()?;
    let width = u16::try_from(rect.width).ok()?;
    let height = u16::try_from(rect.height).ok()?;
    (width > 0 && height > 0).then(|| FtuiRect::new(x, y, width, height))
}

fn draw_text(frame: &mut FtuiFrame, x: u16, y: u16, text: &str) {
    if y >= frame.height() || x >= frame.width() {
        return;
    }
    let mut col = x;
    for ch in text.chars() {
        if col >= frame.width() {
            break;
        }
        frame.buffer.set(col, y, FtuiCell::from_char(ch));
        col = col.saturating_add(1);
    }
}

fn paragraph(frame: &mut FtuiFrame, area: FtuiRect, text: String, style: FtuiStyle) {
    FtuiWidget::render(&FtuiParagraph::new(text).style(style), area, frame);
}

/// Draw one frame. `status` fills the bottom line.
pub fn render(
    view: &ViewState,
    geometry: &Geometry,
    status: &str,
    palette: &Palette,
    frame: &mut FtuiFrame,
) {
    if frame.width() < MIN_COLS || frame.height() < MIN_ROWS {
        draw_text(frame, 0, 0, "Terminal too small");
        return;
    }

    render_search(view, geometry, palette, frame);
    render_rows(view, geometry, palette, frame);
    render_scrollbar(view, frame);
    render_button(view, palette, frame);

    let status_y = frame.height() - 1;
    paragraph(
        frame,
        FtuiRect::new(0, status_y, frame.width(), 1),
        status.to_string(),
        palette.status,
    );
}

fn render_search(view: &ViewState, geometry: &Geometry, palette: &Palette, frame: &mut FtuiFrame) {
    let Some(area) = to_area(&geometry.search_box) else {
        return;
    };
    let search = &view.search;
    let (title, border) = if search.focused {
        (" Search [Tab: list] ", palette.border_focused)
    } else {
        (" Search ", palette.border_normal)
    };
    let block = FtuiBlock::bordered().title(title).border_style(border);
    let inner = block.inner(area);
    FtuiWidget::render(&block, area, frame);

    let input = FtuiTextInput::new()
        .with_value(search.text.clone())
        .with_placeholder(search.placeholder)
        .with_placeholder_style(palette.placeholder)
        .with_cursor_style(palette.cursor)
        .with_focused(search.focused && search.cursor_visible);
    FtuiWidget::render(&input, inner, frame);
}

fn render_rows(view: &ViewState, geometry: &Geometry, palette: &Palette, frame: &mut FtuiFrame) {
    let width = u16::try_from(geometry.scrollbar.x).unwrap_or(0);
    if width == 0 {
        return;
    }
    for (slot, row) in view.rows.iter().enumerate() {
        let y = geometry.list_top + slot as i32 * geometry.row_height;
        let Ok(y) = u16::try_from(y) else {
            continue;
        };
        let style = if row.selected {
            palette.row_selected
        } else if row.striped {
            palette.row_striped
        } else {
            palette.row
        };
        paragraph(frame, FtuiRect::new(0, y, width, 1), row.line.clone(), style);
    }
}

fn render_scrollbar(view: &ViewState, frame: &mut FtuiFrame) {
    let Some(bar) = &view.scrollbar else {
        return;
    };
    let Some(track) = to_area(&bar.track) else {
        return;
    };
    let track_char = if bar.hovered || bar.dragging {
        TRACK_HOVER_CHAR
    } else {
        TRACK_CHAR
    };
    let thumb = bar.thumb_top..bar.thumb_top + bar.thumb_height;
    for dy in 0..track.height {
        let ch = if thumb.contains(&i32::from(dy)) {
            THUMB_CHAR
        } else {
            track_char
        };
        let y = track.y + dy;
        if track.x < frame.width() && y < frame.height() {
            frame.buffer.set(track.x, y, FtuiCell::from_char(ch));
        }
    }
}

fn render_button(view: &ViewState, palette: &Palette, frame: &mut FtuiFrame) {
    let Some(button) = &view.kill_button else {
        return;
    };
    let Some(area) = to_area(&button.area) else {
        return;
    };
    let style = if button.hovered {
        palette.button_hover
    } else {
        palette.button
    };
    paragraph(frame, area, BUTTON_LABEL.to_string(), style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::ProcessRecord;
    use crate::list::{view_state, Event, ListState};
    use ftui::GraphemePool;
    use ftui_harness::buffer_to_text;

    fn records(n: u32) -> Vec<ProcessRecord> {
        (1..=n)
            .map(|pid| ProcessRecord::new(pid, "alice", format!("worker-{pid}")))
            .collect()
    }

    fn draw(state: &ListState, width: u16, height: u16) -> String {
        let mut pool = GraphemePool::new();
        let mut frame = FtuiFrame::new(width, height, &mut pool);
        render(
            &view_state(state),
            state.geometry(),
            "status here",
            &Palette::default(),
            &mut frame,
        );
        buffer_to_text(&frame.buffer)
    }

    #[test]
    fn tiny_terminal_shows_notice() {
        let state = ListState::with_records(Geometry::terminal(10, 4), records(3));
        let text = draw(&state, 10, 4);
        assert!(text.contains("Terminal"));
    }

    #[test]
    fn draws_placeholder_rows_and_status() {
        let state = ListState::with_records(Geometry::terminal(60, 12), records(3));
        let text = draw(&state, 60, 12);
        assert!(text.contains("Search"));
        assert!(text.contains("worker-1"));
        assert!(text.contains("worker-3"));
        assert!(text.contains("status here"));
        assert!(!text.contains("Kill Process"));
    }

    #[test]
    fn selection_shows_kill_button() {
        let mut state = ListState::with_records(Geometry::terminal(60, 12), records(3));
        state.handle(&Event::Press { x: 2, y: 4 });
        assert_eq!(state.selected_index(), Some(1));
        let text = draw(&state, 60, 12);
        assert!(text.contains("[ Kill Process ]"));
    }

    #[test]
    fn overflow_draws_thumb() {
        let state = ListState::with_records(Geometry::terminal(60, 12), records(50));
        let text = draw(&state, 60, 12);
        assert!(text.contains(THUMB_CHAR));
        assert!(text.contains(TRACK_CHAR));
    }

    #[test]
    fn short_list_has_no_scrollbar() {
        let state = ListState::with_records(Geometry::terminal(60, 12), records(2));
        let text = draw(&state, 60, 12);
        assert!(!text.contains(THUMB_CHAR));
    }
}
