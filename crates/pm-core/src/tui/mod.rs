//! Interactive terminal front end for the process list.
//!
//! Built on ftui's Elm-style runtime:
//!
//! - `msg`: terminal events as model messages
//! - `input`: messages to list events, using the current layout
//! - `app`: the `ftui::Model` wrapping the list controller
//! - `render`: paints the list view state

mod app;
pub mod input;
mod msg;
pub mod render;

pub use app::{App, AppController, DynSource, DynTerminator};
pub use msg::Msg;
pub use render::Palette;

use ftui::{Program, ProgramConfig};
use thiserror::Error;

use crate::action::{NoopTerminator, SignalTerminator};
use crate::collect::{OwnerFilter, ProcfsSource};
use crate::config::RunConfig;

/// Size assumed when the terminal cannot be queried.
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Errors that can occur in the TUI module.
#[derive(Error, Debug)]
pub enum TuiError {
    #[error("terminal initialization failed: {0}")]
    TerminalInit(String),

    #[error("terminal session failed: {0}")]
    Runtime(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TuiResult<T> = Result<T, TuiError>;

impl From<TuiError> for pm_common::Error {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(e) => pm_common::Error::Io(e),
            other => pm_common::Error::CapabilityMissing(other.to_string()),
        }
    }
}

/// Current terminal size as `(cols, rows)`.
pub fn terminal_size() -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    // SAFETY: TIOCGWINSZ only writes into the provided winsize.
    let rc = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };
    (rc == 0 && size.ws_col > 0 && size.ws_row > 0).then_some((size.ws_col, size.ws_row))
}

/// Build the app for `config` against the live process table.
pub fn build_app(config: &RunConfig) -> App {
    let owner = if config.all_users {
        OwnerFilter::Any
    } else {
        OwnerFilter::CurrentUser
    };
    let source: DynSource = Box::new(ProcfsSource::new().with_owner(owner));
    let terminator: DynTerminator = if config.dry_run {
        Box::new(NoopTerminator::default())
    } else {
        Box::new(SignalTerminator::new(config.signal))
    };
    let size = terminal_size().unwrap_or(FALLBACK_SIZE);
    App::with_parts(source, terminator, size, config.blink_interval())
}

/// Run the interactive list until the user quits.
pub fn run_tui(config: &RunConfig) -> TuiResult<()> {
    let app = build_app(config);
    let program_config = ProgramConfig::fullscreen().with_mouse();
    let mut program = Program::with_config(app, program_config)
        .map_err(|e| TuiError::TerminalInit(e.to_string()))?;
    program.run().map_err(|e| TuiError::Runtime(e.to_string()))
}
