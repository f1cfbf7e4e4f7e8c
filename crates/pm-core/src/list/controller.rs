//! Runs the dispatcher and executes the effects it requests.

use pm_common::ProcessId;
use tracing::{debug, trace};

use super::dispatch::{Effect, Event};
use super::geometry::Geometry;
use super::state::ListState;
use super::view::{view_state, ViewState};
use crate::action::{ActionError, Terminator};
use crate::collect::ProcessSource;
use crate::logging::event_names;

/// Result of the most recent termination request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillOutcome {
    pub pid: ProcessId,
    pub result: Result<(), ActionError>,
}

impl KillOutcome {
    /// One-line summary for a status bar.
    pub fn summary(&self) -> String {
        match &self.result {
            Ok(()) => format!("Killed process {}", self.pid),
            Err(e) => format!("Failed to kill process {}: {}", self.pid, e),
        }
    }
}

/// Owns the list state plus the collaborators its effects need.
///
/// Effects run synchronously in the order the dispatcher lists them.
/// Redraw requests are coalesced into one flag read by [`take_redraw`].
///
/// [`take_redraw`]: Controller::take_redraw
#[derive(Debug)]
pub struct Controller<S, T> {
    state: ListState,
    source: S,
    terminator: T,
    needs_redraw: bool,
    last_kill: Option<KillOutcome>,
}

impl<S: ProcessSource, T: Terminator> Controller<S, T> {
    /// Build the controller and load the initial process list.
    pub fn new(geometry: Geometry, mut source: S, terminator: T) -> Self {
        let records = source.enumerate();
        Self {
            state: ListState::with_records(geometry, records),
            source,
            terminator,
            needs_redraw: true,
            last_kill: None,
        }
    }

    /// Feed one event and execute the resulting effects.
    ///
    /// Returns the effects that ran.
    pub fn handle(&mut self, event: &Event) -> Vec<Effect> {
        let focus_before = self.state.focus();
        let effects = self.state.handle(event);
        trace!(
            target: event_names::UI_USER_INPUT,
            event = ?event,
            effects = effects.len(),
            "event dispatched"
        );
        if self.state.focus() != focus_before {
            debug!(
                target: event_names::UI_STATE_TRANSITION,
                from = ?focus_before,
                to = ?self.state.focus(),
                "focus changed"
            );
        }

        for effect in &effects {
            self.execute(*effect);
        }
        effects
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::RefreshProcesses => self.refresh(),
            Effect::Terminate(pid) => {
                let result = self.terminator.terminate(pid);
                self.last_kill = Some(KillOutcome { pid, result });
            }
            Effect::Redraw => self.needs_redraw = true,
        }
    }

    /// Re-read the process table, keeping query, offset, and selection.
    pub fn refresh(&mut self) {
        let records = self.source.enumerate();
        debug!(target: event_names::UI_STATE_TRANSITION, count = records.len(), "process list refreshed");
        self.state.replace_records(records);
    }

    /// Whether a redraw was requested since the last call. Clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn view(&self) -> ViewState {
        view_state(&self.state)
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn last_kill(&self) -> Option<&KillOutcome> {
        self.last_kill.as_ref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn terminator(&self) -> &T {
        &self.terminator
    }
}
