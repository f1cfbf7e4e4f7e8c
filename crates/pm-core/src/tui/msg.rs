//! Message type for the ftui update loop.
//!
//! Terminal events are mapped shallowly here; translating them into list
//! events happens in [`super::input`], where the current layout is known.

use ftui::{Event, KeyEvent, MouseEvent};

#[derive(Debug, Clone)]
pub enum Msg {
    KeyPressed(KeyEvent),
    Mouse(MouseEvent),
    Resized { width: u16, height: u16 },
    FocusChanged(bool),
    PasteReceived(String),
    /// Runtime tick; carries no list semantics.
    Tick,
    /// Cursor blink from the subscription.
    Blink,
    Noop,
    Quit,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) => Msg::KeyPressed(key),
            Event::Mouse(mouse) => Msg::Mouse(mouse),
            Event::Resize { width, height } => Msg::Resized { width, height },
            Event::Tick => Msg::Tick,
            Event::Focus(gained) => Msg::FocusChanged(gained),
            Event::Paste(paste) => Msg::PasteReceived(paste.text),
            Event::Clipboard(_) => Msg::Noop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftui::{KeyCode, Modifiers, MouseEventKind};

    fn assert_send_static<T: Send + 'static>() {}

    #[test]
    fn msg_is_send_static() {
        assert_send_static::<Msg>();
    }

    #[test]
    fn key_event_maps_to_keypressed() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL));
        let Msg::KeyPressed(key) = Msg::from(event) else {
            panic!("expected Msg::KeyPressed");
        };
        assert!(matches!(key.code, KeyCode::Char('c')));
        assert!(key.modifiers.contains(Modifiers::CTRL));
    }

    #[test]
    fn mouse_event_is_forwarded() {
        let msg = Msg::from(Event::Mouse(MouseEvent::new(MouseEventKind::Moved, 4, 7)));
        assert!(matches!(msg, Msg::Mouse(_)));
    }

    #[test]
    fn resize_carries_dimensions() {
        let msg = Msg::from(Event::Resize {
            width: 100,
            height: 30,
        });
        assert!(matches!(
            msg,
            Msg::Resized {
                width: 100,
                height: 30
            }
        ));
    }

    #[test]
    fn focus_maps_to_focus_changed() {
        assert!(matches!(
            Msg::from(Event::Focus(false)),
            Msg::FocusChanged(false)
        ));
    }
}
