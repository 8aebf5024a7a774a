//! Output presenters
//!
//! Console panels for step-by-step results and the trace parser used when a
//! result only exists as text.

pub mod console;
pub mod panel;
pub mod trace;

pub use console::ConsolePresenter;
pub use panel::{render_panel, Panel};
pub use trace::{MarkerTraceParser, TraceParser, TraceStep};
