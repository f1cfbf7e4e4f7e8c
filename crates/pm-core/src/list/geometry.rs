//! Screen layout used for hit testing and scrollbar math.
//!
//! Coordinates are signed so pointer positions reported outside the window
//! (negative during a drag) stay representable.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, half-open on the right and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// Fixed layout of the list window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    /// Search box region; a press here focuses the search box.
    pub search_box: Rect,
    /// First pixel (or cell) row of the list area.
    pub list_top: i32,
    /// Height of one list row.
    pub row_height: i32,
    /// Number of rows the list area shows at once.
    pub capacity: usize,
    /// Scrollbar track. Rows end where the track begins.
    pub scrollbar: Rect,
    /// Kill button region.
    pub kill_button: Rect,
    /// Smallest thumb the scrollbar draws.
    pub min_thumb: i32,
}

/// Desktop layout constants (pixels).
pub mod desktop {
    pub const WINDOW_WIDTH: i32 = 800;
    pub const WINDOW_HEIGHT: i32 = 600;
    pub const SEARCH_HEIGHT: i32 = 40;
    pub const ITEM_HEIGHT: i32 = 20;
    pub const BUTTON_WIDTH: i32 = 140;
    pub const BUTTON_HEIGHT: i32 = 40;
    pub const BUTTON_MARGIN: i32 = 15;
    pub const SCROLLBAR_WIDTH: i32 = 15;
    pub const MIN_THUMB: i32 = 30;
}

/// Terminal layout constants (cells).
pub mod terminal {
    /// Bordered search box height.
    pub const SEARCH_ROWS: u16 = 3;
    /// Kill button line plus status line.
    pub const FOOTER_ROWS: u16 = 2;
    pub const BUTTON_LABEL: &str = "[ Kill Process ]";
    pub const BUTTON_MARGIN: u16 = 2;
}

impl Geometry {
    /// The 800x600 pixel layout.
    pub fn desktop() -> Self {
        use desktop::*;

        let track_height = WINDOW_HEIGHT - SEARCH_HEIGHT - BUTTON_HEIGHT - BUTTON_MARGIN;
        let capacity = ((WINDOW_HEIGHT - SEARCH_HEIGHT - BUTTON_HEIGHT - BUTTON_MARGIN)
            / ITEM_HEIGHT) as usize;
        Self {
            search_box: Rect::new(20, 10, WINDOW_WIDTH - 40 - SCROLLBAR_WIDTH, 30),
            list_top: SEARCH_HEIGHT,
            row_height: ITEM_HEIGHT,
            capacity,
            scrollbar: Rect::new(
                WINDOW_WIDTH - SCROLLBAR_WIDTH,
                SEARCH_HEIGHT,
                SCROLLBAR_WIDTH,
                track_height,
            ),
            kill_button: Rect::new(
                WINDOW_WIDTH - BUTTON_WIDTH - BUTTON_MARGIN - SCROLLBAR_WIDTH,
                WINDOW_HEIGHT - BUTTON_HEIGHT - BUTTON_MARGIN,
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            ),
            min_thumb: MIN_THUMB,
        }
    }

    /// Cell layout for a terminal of `cols` x `rows`.
    ///
    /// ```text
    /// row 0..3        search box (bordered)
    /// row 3..rows-2   list rows, scrollbar in the last column
    /// row rows-2      kill button, right aligned
    /// row rows-1      status line
    /// ```
    pub fn terminal(cols: u16, rows: u16) -> Self {
        use terminal::*;

        let cols = i32::from(cols);
        let list_top = i32::from(SEARCH_ROWS);
        let list_rows = rows.saturating_sub(SEARCH_ROWS + FOOTER_ROWS);
        let button_width = BUTTON_LABEL.chars().count() as i32;
        let button_x = (cols - button_width - i32::from(BUTTON_MARGIN)).max(0);

        Self {
            search_box: Rect::new(0, 0, cols, list_top),
            list_top,
            row_height: 1,
            capacity: usize::from(list_rows),
            scrollbar: Rect::new((cols - 1).max(0), list_top, 1, i32::from(list_rows)),
            kill_button: Rect::new(button_x, list_top + i32::from(list_rows), button_width, 1),
            min_thumb: 1,
        }
    }

    /// Track height used by the thumb math.
    pub fn track_height(&self) -> i32 {
        self.scrollbar.height
    }

    /// Whether `(x, y)` lies in the row area left of the scrollbar.
    pub fn in_rows(&self, x: i32, y: i32) -> bool {
        x < self.scrollbar.x && y >= self.list_top
    }

    /// Row slot under `y`, counted from the top of the list area.
    pub fn row_at(&self, y: i32) -> Option<usize> {
        if y < self.list_top || self.row_height <= 0 {
            return None;
        }
        usize::try_from((y - self.list_top) / self.row_height).ok()
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::desktop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_layout_matches_window_constants() {
        let g = Geometry::desktop();
        assert_eq!(g.capacity, 25);
        assert_eq!(g.list_top, 40);
        assert_eq!(g.search_box, Rect::new(20, 10, 745, 30));
        assert_eq!(g.scrollbar, Rect::new(785, 40, 15, 505));
        assert_eq!(g.kill_button, Rect::new(630, 545, 140, 40));
        assert_eq!(g.min_thumb, 30);
    }

    #[test]
    fn terminal_layout_reserves_header_and_footer() {
        let g = Geometry::terminal(80, 24);
        assert_eq!(g.list_top, 3);
        assert_eq!(g.capacity, 19);
        assert_eq!(g.scrollbar, Rect::new(79, 3, 1, 19));
        assert_eq!(g.kill_button.y, 22);
        assert_eq!(g.kill_button.x, 80 - 16 - 2);
        assert_eq!(g.row_height, 1);
    }

    #[test]
    fn tiny_terminal_has_no_rows() {
        let g = Geometry::terminal(10, 4);
        assert_eq!(g.capacity, 0);
        assert_eq!(g.kill_button.x, 0);
    }

    #[test]
    fn row_at_is_relative_to_list_top() {
        let g = Geometry::desktop();
        assert_eq!(g.row_at(39), None);
        assert_eq!(g.row_at(40), Some(0));
        assert_eq!(g.row_at(59), Some(0));
        assert_eq!(g.row_at(60), Some(1));
    }

    #[test]
    fn rect_is_half_open() {
        let r = Rect::new(0, 0, 2, 2);
        assert!(r.contains(1, 1));
        assert!(!r.contains(2, 1));
        assert!(!r.contains(1, 2));
        assert!(!r.contains(-1, 0));
    }
}
