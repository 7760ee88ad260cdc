//! Error adapter for converting WattflowError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Every error gets a
//! stable code; input errors additionally point into the offending file.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use wattflow::{WattflowError, graph::GraphError, layout::LayoutError};

/// Adapter giving a [`WattflowError`] a miette representation.
pub struct ErrorAdapter<'a>(pub &'a WattflowError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl ErrorAdapter<'_> {
    fn code_str(&self) -> &'static str {
        match self.0 {
            WattflowError::Io(_) => "wattflow::io",
            WattflowError::Input { .. } => "wattflow::input",
            WattflowError::Config(_) => "wattflow::config",
            WattflowError::Layout(LayoutError::Graph(err)) => match err {
                GraphError::EmptyGraph => "wattflow::graph::empty",
                GraphError::DanglingReference { .. } => "wattflow::graph::dangling_reference",
                GraphError::SelfLoop { .. } => "wattflow::graph::self_loop",
                GraphError::InvalidValue { .. } => "wattflow::graph::invalid_value",
                GraphError::InvalidColor { .. } => "wattflow::graph::invalid_color",
                GraphError::CyclePresent { .. } => "wattflow::graph::cycle",
            },
            WattflowError::Layout(LayoutError::DegenerateViewport { .. }) => {
                "wattflow::layout::viewport"
            }
            WattflowError::Layout(LayoutError::InvalidOptions(_)) => "wattflow::layout::options",
            WattflowError::Export(_) => "wattflow::export",
        }
    }

    fn help_str(&self) -> Option<&'static str> {
        let help = match self.0 {
            WattflowError::Input { .. } => {
                "graphs are TOML files with [[nodes]] (label, optional color) and [[edges]] (source, target, value) tables"
            }
            WattflowError::Config(_) => {
                "check the [layout] and [style] tables of the configuration file"
            }
            WattflowError::Layout(LayoutError::Graph(err)) => match err {
                GraphError::EmptyGraph => "add at least one [[nodes]] entry",
                GraphError::DanglingReference { .. } => {
                    "edge endpoints are zero-based positions in the [[nodes]] list"
                }
                GraphError::SelfLoop { .. } => "an edge must connect two different nodes",
                GraphError::InvalidValue { .. } => "edge values must be finite and not negative",
                GraphError::InvalidColor { .. } => {
                    "use a CSS color such as \"#3b82f6\", \"rgb(59, 130, 246)\" or \"teal\""
                }
                GraphError::CyclePresent { .. } => {
                    "flow diagrams need a direction; remove one edge of the cycle"
                }
            },
            WattflowError::Layout(LayoutError::DegenerateViewport { .. }) => {
                "increase --width/--height or reduce the layout margin and node width"
            }
            WattflowError::Layout(LayoutError::InvalidOptions(_)) => {
                "node_width must be positive; padding, margin and min_node_height must not be negative"
            }
            WattflowError::Io(_) | WattflowError::Export(_) => return None,
        };
        Some(help)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code_str()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_str()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self.0 {
            WattflowError::Input { src, .. } => Some(src as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let WattflowError::Input {
            span: Some(span),
            message,
            ..
        } = self.0
        else {
            return None;
        };

        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(message.clone()), span),
        )))
    }
}

#[cfg(test)]
mod tests {
    use wattflow::graph::NodeId;

    use super::*;

    fn graph_error(err: GraphError) -> WattflowError {
        WattflowError::Layout(LayoutError::Graph(err))
    }

    #[test]
    fn test_graph_error_codes() {
        let cases = [
            (graph_error(GraphError::EmptyGraph), "wattflow::graph::empty"),
            (
                graph_error(GraphError::CyclePresent {
                    node: NodeId::new(1),
                }),
                "wattflow::graph::cycle",
            ),
            (
                graph_error(GraphError::DanglingReference {
                    edge: 0,
                    node: 5,
                    node_count: 3,
                }),
                "wattflow::graph::dangling_reference",
            ),
        ];

        for (err, code) in &cases {
            let adapter = ErrorAdapter(err);
            assert_eq!(adapter.code().unwrap().to_string(), *code);
            assert!(adapter.help().is_some());
            assert!(adapter.labels().is_none());
        }
    }

    #[test]
    fn test_input_error_points_at_source() {
        let err = WattflowError::new_input_error("expected `]`", Some(7..8), "[[nodes]\n");
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "wattflow::input");
        assert!(adapter.source_code().is_some());

        let labels: Vec<LabeledSpan> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 7);
        assert_eq!(labels[0].len(), 1);
    }

    #[test]
    fn test_input_error_without_location() {
        let err = WattflowError::new_input_error("missing field `label`", None, "");
        assert!(ErrorAdapter(&err).labels().is_none());
    }

    #[test]
    fn test_io_error_has_no_help() {
        let err = WattflowError::Io(std::io::Error::other("disk full"));
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "wattflow::io");
        assert!(adapter.help().is_none());
        assert_eq!(adapter.to_string(), "I/O error: disk full");
    }

    #[test]
    fn test_renders_with_graphical_handler() {
        let err = graph_error(GraphError::EmptyGraph);
        let mut out = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut out, &ErrorAdapter(&err))
            .unwrap();

        assert!(out.contains("wattflow::graph::empty"));
    }
}
