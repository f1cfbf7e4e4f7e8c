//! Terminal input to list events.

use ftui::{KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseEvent, MouseEventKind};

use crate::list::{Event, Focus, Geometry, Key};

/// Rows moved per wheel notch.
pub const WHEEL_STEP: isize = 3;

/// What a terminal event asks of the app.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Quit,
    /// List events to dispatch in order; empty when the event is ignored.
    Dispatch(Vec<Event>),
}

impl Input {
    fn one(event: Event) -> Self {
        Input::Dispatch(vec![event])
    }

    fn ignore() -> Self {
        Input::Dispatch(Vec::new())
    }
}

fn is_press(key: &KeyEvent) -> bool {
    matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
}

fn toggle_focus(focus: Focus) -> Event {
    match focus {
        Focus::SearchBox => Event::FocusOut,
        Focus::ListArea => Event::FocusIn,
    }
}

/// Translate a key event given the current focus.
pub fn translate_key(key: &KeyEvent, focus: Focus) -> Input {
    if !is_press(key) {
        return Input::ignore();
    }

    let ctrl = key.modifiers.contains(Modifiers::CTRL);
    match key.code {
        KeyCode::Escape => Input::Quit,
        KeyCode::Char('c') if ctrl => Input::Quit,
        KeyCode::Char('l') if ctrl => Input::one(Event::Expose),
        KeyCode::F(5) => Input::one(Event::Expose),
        KeyCode::Tab | KeyCode::BackTab => Input::one(toggle_focus(focus)),
        KeyCode::Enter if focus == Focus::SearchBox => Input::one(Event::FocusOut),
        KeyCode::Char(_) if ctrl || key.modifiers.contains(Modifiers::ALT) => Input::ignore(),
        KeyCode::Char(c) => Input::one(Event::Key(Key::Char(c))),
        KeyCode::Backspace => Input::one(Event::Key(Key::Backspace)),
        KeyCode::Delete => Input::one(Event::Key(Key::Delete)),
        KeyCode::Up => Input::one(Event::Key(Key::Up)),
        KeyCode::Down => Input::one(Event::Key(Key::Down)),
        KeyCode::PageUp => Input::one(Event::Key(Key::PageUp)),
        KeyCode::PageDown => Input::one(Event::Key(Key::PageDown)),
        KeyCode::Home => Input::one(Event::Key(Key::Home)),
        KeyCode::End => Input::one(Event::Key(Key::End)),
        _ => Input::ignore(),
    }
}

/// Translate a mouse event. Cells map one-to-one onto geometry units.
pub fn translate_mouse(mouse: &MouseEvent, focus: Focus, geometry: &Geometry) -> Input {
    let x = i32::from(mouse.x);
    let y = i32::from(mouse.y);

    match mouse.kind {
        MouseEventKind::Down(_) => {
            if geometry.search_box.contains(x, y) {
                return Input::one(Event::FocusIn);
            }
            let press = Event::Press { x, y };
            if focus == Focus::SearchBox {
                Input::Dispatch(vec![Event::FocusOut, press])
            } else {
                Input::one(press)
            }
        }
        MouseEventKind::Up(_) => Input::one(Event::Release),
        MouseEventKind::Drag(_) | MouseEventKind::Moved => Input::one(Event::Motion { x, y }),
        MouseEventKind::ScrollUp => Input::one(Event::Wheel { delta: -WHEEL_STEP }),
        MouseEventKind::ScrollDown => Input::one(Event::Wheel { delta: WHEEL_STEP }),
        _ => Input::ignore(),
    }
}

/// Terminal focus follows the search box: gaining it focuses the search
/// box, losing it hands focus to the list.
pub fn translate_focus(gained: bool) -> Input {
    Input::one(if gained {
        Event::FocusIn
    } else {
        Event::FocusOut
    })
}

/// Pasted text goes into the query when the search box has focus.
pub fn translate_paste(text: &str, focus: Focus) -> Input {
    if focus != Focus::SearchBox {
        return Input::ignore();
    }
    Input::Dispatch(
        text.chars()
            .filter(|c| !c.is_control())
            .map(|c| Event::Key(Key::Char(c)))
            .collect(),
    )
}
