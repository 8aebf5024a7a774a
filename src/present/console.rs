//! Console output for task results

use std::io::{self, Write};

use crate::agent::AgentHistory;
use crate::present::panel::{render_panel, Panel};
use crate::present::trace::{TraceParser, TraceStep};

const DEFAULT_WIDTH: usize = 80;

/// Writes step panels and final results to a console
pub struct ConsolePresenter<W: Write> {
    out: W,
    width: usize,
    color: bool,
}

impl ConsolePresenter<io::Stdout> {
    /// Presenter on stdout, coloured when stdout is a terminal
    pub fn stdout() -> Self {
        use std::io::IsTerminal;
        let color = io::stdout().is_terminal();
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            width: DEFAULT_WIDTH,
            color,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// One panel per step that extracted content
    ///
    /// Returns the number of panels written.
    pub fn present_history(&mut self, history: &AgentHistory) -> io::Result<usize> {
        let steps: Vec<TraceStep> = history
            .all_results
            .iter()
            .enumerate()
            .filter_map(|(i, r)| {
                r.extracted_content
                    .as_deref()
                    .filter(|c| !c.trim().is_empty())
                    .map(|c| TraceStep {
                        index: i + 1,
                        content: c.to_string(),
                    })
            })
            .collect();

        self.write_steps(&steps)
    }

    /// One panel per step the parser recovers from a text trace
    ///
    /// Returns the number of panels written.
    pub fn present_trace(&mut self, trace: &str, parser: &dyn TraceParser) -> io::Result<usize> {
        let steps = parser.steps(trace);
        self.write_steps(&steps)
    }

    /// Completion banner followed by the result text
    pub fn present_result(&mut self, history: &AgentHistory) -> io::Result<()> {
        writeln!(self.out, "Task completed!")?;
        writeln!(self.out, "Result: {}", history)?;
        self.out.flush()
    }

    fn write_steps(&mut self, steps: &[TraceStep]) -> io::Result<usize> {
        for step in steps {
            let panel = Panel::new(format!("Step {}", step.index), step.content.as_str());
            write!(self.out, "{}", render_panel(&panel, self.width, self.color))?;
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(steps.len())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ActionResult;
    use crate::present::trace::MarkerTraceParser;

    fn output(presenter: ConsolePresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn test_present_history_skips_steps_without_content() {
        let mut history = AgentHistory::new();
        history.push(ActionResult::content("opened example.com"));
        history.push(ActionResult::failure("timeout"));
        history.push(ActionResult::done("found it"));

        let mut presenter = ConsolePresenter::new(Vec::new(), false).with_width(40);
        let panels = presenter.present_history(&history).unwrap();
        let text = output(presenter);

        assert_eq!(panels, 2);
        assert!(text.contains(" Step 1 "));
        assert!(!text.contains(" Step 2 "));
        assert!(text.contains(" Step 3 "));
        assert!(text.contains("found it"));
    }

    #[test]
    fn test_present_trace_without_markers() {
        let mut presenter = ConsolePresenter::new(Vec::new(), false);
        let panels = presenter
            .present_trace("nothing structured here", &MarkerTraceParser)
            .unwrap();
        assert_eq!(panels, 0);
        assert!(output(presenter).is_empty());
    }

    #[test]
    fn test_present_result() {
        let mut presenter = ConsolePresenter::new(Vec::new(), false);
        presenter
            .present_result(&AgentHistory::from_text("Done: found X"))
            .unwrap();
        assert_eq!(output(presenter), "Task completed!\nResult: Done: found X\n");
    }
}
