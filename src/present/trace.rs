//! Step extraction from textual agent traces
//!
//! Agents that only hand back a string are parsed heuristically. The parser
//! sits behind [`TraceParser`] so the heuristic can be swapped or tested on
//! its own.

/// Marker that opens each step record in a trace
pub const STEP_MARKER: &str = "ActionResult(";

/// Marker that precedes a step's content inside a record
pub const CONTENT_MARKER: &str = "extracted_content=";

/// One step recovered from a trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    /// 1-based position of the step record in the trace
    pub index: usize,
    pub content: String,
}

/// Recovers steps from a trace string
pub trait TraceParser {
    fn steps(&self, trace: &str) -> Vec<TraceStep>;
}

/// Splits on [`STEP_MARKER`] and reads the text after [`CONTENT_MARKER`] up to
/// the next comma
///
/// Records without the content marker, or whose content is empty, are
/// skipped. A literal `None` is kept as text. Content containing commas is cut
/// at the first one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerTraceParser;

impl MarkerTraceParser {
    fn extract(segment: &str) -> Option<String> {
        let (_, after) = segment.split_once(CONTENT_MARKER)?;
        let raw = after.split(',').next().unwrap_or_default();
        let content = raw.trim().trim_matches('\'');

        if content.is_empty() {
            None
        } else {
            Some(content.to_string())
        }
    }
}

impl TraceParser for MarkerTraceParser {
    fn steps(&self, trace: &str) -> Vec<TraceStep> {
        trace
            .split(STEP_MARKER)
            .skip(1)
            .enumerate()
            .filter_map(|(i, segment)| {
                Self::extract(segment).map(|content| TraceStep {
                    index: i + 1,
                    content,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{ActionResult, AgentHistory};

    #[test]
    fn test_no_marker_no_steps() {
        assert!(MarkerTraceParser.steps("").is_empty());
        assert!(MarkerTraceParser.steps("Task finished fine").is_empty());
    }

    #[test]
    fn test_extracts_content_up_to_comma() {
        let trace = "AgentHistoryList(all_results=[ActionResult(is_done=False, extracted_content='Navigated to example.com', error=None, include_in_memory=True)])";
        let steps = MarkerTraceParser.steps(trace);
        assert_eq!(
            steps,
            vec![TraceStep {
                index: 1,
                content: "Navigated to example.com".to_string()
            }]
        );
    }

    #[test]
    fn test_skips_segments_without_content() {
        let trace = "ActionResult(is_done=False, error='x') \
                     ActionResult(is_done=False, extracted_content='', error='y') \
                     ActionResult(is_done=True, extracted_content='final', error=None)";
        let steps = MarkerTraceParser.steps(trace);
        assert_eq!(steps.len(), 1);
        // Index keeps the record's position in the trace
        assert_eq!(steps[0].index, 3);
        assert_eq!(steps[0].content, "final");
    }

    #[test]
    fn test_none_content_is_kept() {
        let trace = "ActionResult(is_done=False, extracted_content=None, error='timeout')";
        assert_eq!(
            MarkerTraceParser.steps(trace),
            vec![TraceStep {
                index: 1,
                content: "None".to_string()
            }]
        );
    }

    #[test]
    fn test_commas_truncate_content() {
        let trace = "ActionResult(extracted_content='Paris, France', error=None)";
        assert_eq!(MarkerTraceParser.steps(trace)[0].content, "Paris");
    }

    #[test]
    fn test_at_most_one_step_per_marker() {
        for n in 0..6 {
            let trace = "ActionResult(extracted_content='a', x) ".repeat(n);
            assert!(MarkerTraceParser.steps(&trace).len() <= n);
            assert_eq!(MarkerTraceParser.steps(&trace).len(), n);
        }
    }

    #[test]
    fn test_parses_history_trace() {
        let mut history = AgentHistory::new();
        history.push(ActionResult::content("opened page"));
        history.push(ActionResult::failure("click failed"));
        history.push(ActionResult::done("answer"));

        let steps = MarkerTraceParser.steps(&history.trace());
        let contents: Vec<&str> = steps.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, vec!["opened page", "None", "answer"]);
    }
}
