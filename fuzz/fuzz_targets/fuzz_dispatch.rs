//! Fuzz target for the list dispatcher.
//!
//! Drives random event sequences through `dispatch` and checks that the
//! offset and selection stay in range after every step.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pm_core::collect::ProcessRecord;
use pm_core::list::{dispatch, Event, Geometry, Key, ListState};

#[derive(Debug, Arbitrary)]
enum FuzzEvent {
    Char(char),
    Backspace,
    Delete,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Press(i16, i16),
    Motion(i16, i16),
    Release,
    Wheel(i8),
    FocusIn,
    FocusOut,
    Expose,
    Tick,
    Resize(u8, u8),
}

impl FuzzEvent {
    fn into_event(self) -> Event {
        match self {
            FuzzEvent::Char(c) => Event::Key(Key::Char(c)),
            FuzzEvent::Backspace => Event::Key(Key::Backspace),
            FuzzEvent::Delete => Event::Key(Key::Delete),
            FuzzEvent::Up => Event::Key(Key::Up),
            FuzzEvent::Down => Event::Key(Key::Down),
            FuzzEvent::PageUp => Event::Key(Key::PageUp),
            FuzzEvent::PageDown => Event::Key(Key::PageDown),
            FuzzEvent::Home => Event::Key(Key::Home),
            FuzzEvent::End => Event::Key(Key::End),
            FuzzEvent::Press(x, y) => Event::Press {
                x: i32::from(x),
                y: i32::from(y),
            },
            FuzzEvent::Motion(x, y) => Event::Motion {
                x: i32::from(x),
                y: i32::from(y),
            },
            FuzzEvent::Release => Event::Release,
            FuzzEvent::Wheel(delta) => Event::Wheel {
                delta: isize::from(delta),
            },
            FuzzEvent::FocusIn => Event::FocusIn,
            FuzzEvent::FocusOut => Event::FocusOut,
            FuzzEvent::Expose => Event::Expose,
            FuzzEvent::Tick => Event::Tick,
            FuzzEvent::Resize(cols, rows) => {
                Event::Resize(Geometry::terminal(u16::from(cols), u16::from(rows)))
            }
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    labels: Vec<String>,
    events: Vec<FuzzEvent>,
}

fuzz_target!(|input: Input| {
    let records = input
        .labels
        .into_iter()
        .take(500)
        .enumerate()
        .map(|(i, label)| ProcessRecord::new(i as u32 + 1, "fuzz", label))
        .collect();
    let mut state = ListState::with_records(Geometry::desktop(), records);

    for event in input.events.into_iter().take(200) {
        state = dispatch(state, &event.into_event()).0;
        assert!(state.offset() <= state.filtered_len().saturating_sub(state.capacity()));
        if let Some(selected) = state.selected_index() {
            assert!(selected < state.filtered_len());
        }
    }
});
