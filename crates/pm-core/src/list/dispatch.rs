//! Input dispatcher: `(state, event) -> (state', effects)`.
//!
//! The dispatcher never touches the process table or the screen. It
//! describes the side effects it needs as [`Effect`] values, executed in
//! order by the [`Controller`](super::Controller).

use pm_common::ProcessId;
use serde::{Deserialize, Serialize};

use super::geometry::Geometry;
use super::scrollbar;
use super::state::{Focus, Hover, ListState};

/// Keys the list window reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Delete,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

/// Input events, already reduced to window coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Key(Key),
    Press { x: i32, y: i32 },
    Motion { x: i32, y: i32 },
    Release,
    /// Wheel scrolling; positive moves towards the end of the list.
    Wheel { delta: isize },
    FocusIn,
    FocusOut,
    /// The window needs repainting; also re-reads the process table.
    Expose,
    /// Cursor blink.
    Tick,
    Resize(Geometry),
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", content = "pid", rename_all = "snake_case")]
pub enum Effect {
    RefreshProcesses,
    Terminate(ProcessId),
    Redraw,
}

/// Pure transition function.
pub fn dispatch(mut state: ListState, event: &Event) -> (ListState, Vec<Effect>) {
    let effects = state.handle(event);
    (state, effects)
}

fn redraw_if(changed: bool) -> Vec<Effect> {
    if changed {
        vec![Effect::Redraw]
    } else {
        Vec::new()
    }
}

impl ListState {
    /// Apply one event in place and return the effects it requests.
    pub fn handle(&mut self, event: &Event) -> Vec<Effect> {
        match *event {
            Event::Key(key) => self.handle_key(key),
            Event::Press { x, y } => self.handle_press(x, y),
            Event::Motion { x, y } => self.handle_motion(x, y),
            Event::Release => redraw_if(self.drag.take().is_some()),
            Event::Wheel { delta } => redraw_if(self.scroll_by(delta)),
            Event::FocusIn => {
                self.focus = Focus::SearchBox;
                vec![Effect::Redraw]
            }
            Event::FocusOut => {
                self.focus = Focus::ListArea;
                vec![Effect::Redraw]
            }
            Event::Expose => vec![Effect::RefreshProcesses, Effect::Redraw],
            Event::Tick => {
                self.cursor_visible = !self.cursor_visible;
                vec![Effect::Redraw]
            }
            Event::Resize(geometry) => {
                self.set_geometry(geometry);
                self.drag = None;
                self.hover = Hover::default();
                vec![Effect::Redraw]
            }
        }
    }

    fn handle_key(&mut self, key: Key) -> Vec<Effect> {
        match self.focus {
            Focus::SearchBox => match key {
                Key::Char(c) if !c.is_control() => {
                    self.push_query_char(c);
                    vec![Effect::Redraw]
                }
                Key::Backspace => redraw_if(self.pop_query_char()),
                _ => Vec::new(),
            },
            Focus::ListArea => {
                let page = self.capacity() as isize;
                match key {
                    Key::Up => redraw_if(self.scroll_by(-1)),
                    Key::Down => redraw_if(self.scroll_by(1)),
                    Key::PageUp => redraw_if(self.scroll_by(-page)),
                    Key::PageDown => redraw_if(self.scroll_by(page)),
                    Key::Home => redraw_if(self.scroll_to(0)),
                    Key::End => redraw_if(self.scroll_to(self.max_offset() as isize)),
                    Key::Delete => self.kill_selected(),
                    Key::Char(_) | Key::Backspace => Vec::new(),
                }
            }
        }
    }

    fn handle_press(&mut self, x: i32, y: i32) -> Vec<Effect> {
        let geometry = *self.geometry();

        if self.selected_index().is_some() && geometry.kill_button.contains(x, y) {
            return self.kill_selected();
        }

        if geometry.scrollbar.contains(x, y) {
            self.drag = scrollbar::start_drag(
                y,
                &self.track(),
                self.offset(),
                self.capacity(),
                self.filtered_len(),
            );
            return Vec::new();
        }

        if geometry.in_rows(x, y) {
            match geometry.row_at(y).filter(|row| *row < self.capacity()) {
                Some(row) => self.select(row + self.offset()),
                None => self.clear_selection(),
            }
            self.refresh_hover(x, y);
            return vec![Effect::Redraw];
        }

        Vec::new()
    }

    fn handle_motion(&mut self, x: i32, y: i32) -> Vec<Effect> {
        let hover_changed = self.refresh_hover(x, y);

        if let Some(drag) = self.drag {
            let offset = scrollbar::drag_to_offset(
                y,
                &drag,
                &self.track(),
                self.capacity(),
                self.filtered_len(),
            );
            self.scroll_to(offset as isize);
            return vec![Effect::Redraw];
        }

        redraw_if(hover_changed)
    }

    /// Terminate the selected process, then clear the selection and reload.
    fn kill_selected(&mut self) -> Vec<Effect> {
        let Some(pid) = self.selected_record().map(|r| r.pid) else {
            return Vec::new();
        };
        self.clear_selection();
        self.hover.kill_button = false;
        vec![
            Effect::Terminate(pid),
            Effect::RefreshProcesses,
            Effect::Redraw,
        ]
    }

    /// Recompute hover flags. Returns whether any flag changed.
    fn refresh_hover(&mut self, x: i32, y: i32) -> bool {
        let geometry = self.geometry();
        let next = Hover {
            kill_button: self.selected_index().is_some() && geometry.kill_button.contains(x, y),
            scrollbar: self.scrollable() && geometry.scrollbar.contains(x, y),
        };
        let changed = next != self.hover;
        self.hover = next;
        changed
    }
}
