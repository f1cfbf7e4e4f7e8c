//! ftui model around the list [`Controller`].
//!
//! `update` translates terminal messages into list events and feeds them
//! to the controller; `view` paints the controller's [`ViewState`]
//! (see [`crate::list::view_state`]). All state lives in the controller.

use std::time::Duration;

use ftui::runtime::{Every, Subscription};
use ftui::{Cmd as FtuiCmd, Frame as FtuiFrame, Model as FtuiModel};

use super::input::{translate_focus, translate_key, translate_mouse, translate_paste, Input};
use super::msg::Msg;
use super::render::{render, Palette};
use crate::action::Terminator;
use crate::collect::ProcessSource;
use crate::list::{Controller, Event, Focus, Geometry};
use crate::logging::event_names;

pub type DynSource = Box<dyn ProcessSource + Send>;
pub type DynTerminator = Box<dyn Terminator + Send>;
pub type AppController = Controller<DynSource, DynTerminator>;

const BLINK_SUBSCRIPTION_ID: u64 = 0x504d_424c_494e_4b;

pub const KEY_HINTS: &str = "Tab: focus  Del: kill  Ctrl+L: refresh  Esc: quit";

pub struct App {
    controller: AppController,
    palette: Palette,
    blink: Option<Duration>,
    quitting: bool,
}

impl App {
    pub fn new(controller: AppController, blink: Option<Duration>) -> Self {
        Self {
            controller,
            palette: Palette::default(),
            blink,
            quitting: false,
        }
    }

    /// Convenience constructor for a terminal of the given size.
    pub fn with_parts(
        source: DynSource,
        terminator: DynTerminator,
        size: (u16, u16),
        blink: Option<Duration>,
    ) -> Self {
        let geometry = Geometry::terminal(size.0, size.1);
        Self::new(Controller::new(geometry, source, terminator), blink)
    }

    pub fn controller(&self) -> &AppController {
        &self.controller
    }

    pub fn should_quit(&self) -> bool {
        self.quitting
    }

    fn focus(&self) -> Focus {
        self.controller.state().focus()
    }

    /// Status line text: last kill result, else counts and key hints.
    pub fn status_line(&self) -> String {
        if let Some(outcome) = self.controller.last_kill() {
            return outcome.summary();
        }
        let state = self.controller.state();
        format!(
            "{} of {} processes  |  {}",
            state.filtered_len(),
            state.records().len(),
            KEY_HINTS
        )
    }

    fn translate(&self, msg: Msg) -> Input {
        match msg {
            Msg::KeyPressed(key) => translate_key(&key, self.focus()),
            Msg::Mouse(mouse) => {
                translate_mouse(&mouse, self.focus(), self.controller.state().geometry())
            }
            Msg::Resized { width, height } => Input::Dispatch(vec![Event::Resize(
                Geometry::terminal(width, height),
            )]),
            Msg::FocusChanged(gained) => translate_focus(gained),
            Msg::PasteReceived(text) => translate_paste(&text, self.focus()),
            Msg::Blink => Input::Dispatch(vec![Event::Tick]),
            Msg::Tick | Msg::Noop => Input::Dispatch(Vec::new()),
            Msg::Quit => Input::Quit,
        }
    }
}

impl FtuiModel for App {
    type Message = Msg;

    fn init(&mut self) -> FtuiCmd<Self::Message> {
        tracing::info!(
            target: event_names::UI_STARTED,
            processes = self.controller.state().records().len(),
            capacity = self.controller.state().capacity(),
            blink_ms = self.blink.map(|d| d.as_millis() as u64),
            "interactive list started"
        );
        FtuiCmd::none()
    }

    fn update(&mut self, msg: Self::Message) -> FtuiCmd<Self::Message> {
        match self.translate(msg) {
            Input::Quit => {
                self.quitting = true;
                tracing::info!(target: event_names::UI_FINISHED, "quit requested");
                FtuiCmd::quit()
            }
            Input::Dispatch(events) => {
                for event in &events {
                    self.controller.handle(event);
                }
                if self.controller.take_redraw() {
                    tracing::trace!(target: event_names::UI_STATE_TRANSITION, "frame requested");
                }
                FtuiCmd::none()
            }
        }
    }

    fn view(&self, frame: &mut FtuiFrame) {
        let state = self.controller.state();
        render(
            &self.controller.view(),
            state.geometry(),
            &self.status_line(),
            &self.palette,
            frame,
        );
    }

    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Self::Message>>> {
        match self.blink {
            Some(period) => vec![Box::new(Every::with_id(
                BLINK_SUBSCRIPTION_ID,
                period,
                || Msg::Blink,
            ))],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::NoopTerminator;
    use crate::collect::{FixedSource, ProcessRecord};
    use ftui::{KeyCode, KeyEvent};

    fn app(n: u32) -> App {
        let records = (1..=n)
            .map(|pid| ProcessRecord::new(pid, "alice", format!("job-{pid}")))
            .collect();
        App::with_parts(
            Box::new(FixedSource::new(records)),
            Box::new(NoopTerminator::default()),
            (80, 24),
            Some(Duration::from_millis(500)),
        )
    }

    fn press(app: &mut App, code: KeyCode) -> FtuiCmd<Msg> {
        <App as FtuiModel>::update(app, Msg::KeyPressed(KeyEvent::new(code)))
    }

    #[test]
    fn typing_filters_the_list() {
        let mut app = app(30);
        press(&mut app, KeyCode::Char('2'));
        let state = app.controller().state();
        assert_eq!(state.query(), "2");
        // job-2, job-12, job-20..job-29
        assert_eq!(state.filtered_len(), 12);
    }

    #[test]
    fn escape_quits() {
        let mut app = app(3);
        let cmd = press(&mut app, KeyCode::Escape);
        assert!(matches!(cmd, FtuiCmd::Quit));
        assert!(app.should_quit());
    }

    #[test]
    fn tab_then_arrows_scroll() {
        let mut app = app(100);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.controller().state().focus(), Focus::ListArea);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.controller().state().offset(), 2);
        press(&mut app, KeyCode::End);
        assert_eq!(
            app.controller().state().offset(),
            app.controller().state().max_offset()
        );
    }

    #[test]
    fn delete_kills_selection_and_reports_status() {
        let mut app = app(5);
        press(&mut app, KeyCode::Tab);
        let list_top = app.controller().state().geometry().list_top;
        let mouse = ftui::MouseEvent::new(
            ftui::MouseEventKind::Down(ftui::core::event::MouseButton::Left),
            3,
            list_top as u16,
        );
        <App as FtuiModel>::update(&mut app, Msg::Mouse(mouse));
        assert_eq!(app.controller().state().selected_index(), Some(0));

        press(&mut app, KeyCode::Delete);
        assert_eq!(app.controller().state().selected_index(), None);
        assert_eq!(app.status_line(), "Killed process 1");
    }

    #[test]
    fn blink_toggles_cursor() {
        let mut app = app(1);
        assert!(app.controller().state().cursor_visible());
        <App as FtuiModel>::update(&mut app, Msg::Blink);
        assert!(!app.controller().state().cursor_visible());
    }

    #[test]
    fn runtime_tick_changes_nothing() {
        let mut app = app(1);
        <App as FtuiModel>::update(&mut app, Msg::Tick);
        assert!(app.controller().state().cursor_visible());
    }

    #[test]
    fn resize_recomputes_capacity() {
        let mut app = app(100);
        <App as FtuiModel>::update(
            &mut app,
            Msg::Resized {
                width: 100,
                height: 40,
            },
        );
        assert_eq!(app.controller().state().capacity(), 35);
    }

    #[test]
    fn blink_subscription_only_when_enabled() {
        let app = app(1);
        let subs = app.subscriptions();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].id(), BLINK_SUBSCRIPTION_ID);

        let quiet = App::with_parts(
            Box::new(FixedSource::new(Vec::new())),
            Box::new(NoopTerminator::default()),
            (80, 24),
            None,
        );
        assert!(quiet.subscriptions().is_empty());
    }

    #[test]
    fn status_shows_counts() {
        let app = app(4);
        assert!(app.status_line().starts_with("4 of 4 processes"));
    }
}
