//! Line-delimited JSON command protocol.
//!
//! Each request line is an object with a `command` field; each response is
//! one `{"event": ..., "data": {...}}` line. Commands:
//! `validate`, `execution_order` (both take a `graph`) and `catalog`.

use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::analyze::LayerName;
use crate::catalog::{all_schemas, NodeSchema};
use crate::check::analyze;
use crate::parse::{self, GraphDocument};

#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Event {
    Ready {
        message: String,
    },
    ValidationSuccess {
        message: String,
        node_count: usize,
        total_params: u64,
    },
    ValidationError {
        errors: Vec<String>,
    },
    ExecutionOrder {
        order: Vec<String>,
        layer_names: Vec<LayerName>,
    },
    Catalog {
        nodes: Vec<&'static NodeSchema>,
    },
    Error {
        message: String,
    },
}

#[derive(Deserialize)]
struct Request {
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    graph: Value,
}

/// Answer one request line.
pub fn handle_line(line: &str) -> Event {
    let request: Request = match serde_json::from_str(line.trim()) {
        Ok(r) => r,
        Err(e) => {
            return Event::Error {
                message: format!("Invalid JSON: {}", e),
            };
        }
    };

    debug!(command = request.command.as_deref(), "handling command");
    match request.command.as_deref() {
        Some("validate") => handle_validate(request.graph),
        Some("execution_order") => handle_execution_order(request.graph),
        Some("catalog") => Event::Catalog {
            nodes: all_schemas().collect(),
        },
        other => Event::Error {
            message: format!("Unknown command: {}", other.unwrap_or("<none>")),
        },
    }
}

fn document(graph: Value) -> Result<GraphDocument, Event> {
    if graph.is_null() {
        return Ok(GraphDocument::default());
    }
    parse::from_value(graph).map_err(|errors| Event::ValidationError {
        errors: errors.iter().map(ToString::to_string).collect(),
    })
}

fn handle_validate(graph: Value) -> Event {
    let document = match document(graph) {
        Ok(d) => d,
        Err(event) => return event,
    };

    let result = analyze(&document).to_result();
    if result.valid {
        Event::ValidationSuccess {
            message: "Graph is valid".into(),
            node_count: document.nodes.len(),
            total_params: result.total_params,
        }
    } else {
        Event::ValidationError {
            errors: result.errors,
        }
    }
}

fn handle_execution_order(graph: Value) -> Event {
    let document = match document(graph) {
        Ok(d) => d,
        Err(event) => return event,
    };

    let analysis = analyze(&document);
    if analysis.is_valid() {
        Event::ExecutionOrder {
            order: analysis.execution_order,
            layer_names: analysis.layer_names,
        }
    } else {
        Event::ValidationError {
            errors: analysis.errors(),
        }
    }
}

/// Announce readiness, then answer every non-blank line of `reader` on
/// `writer` until end of input.
pub fn serve<R: BufRead, W: Write>(reader: R, mut writer: W) -> io::Result<()> {
    emit(
        &mut writer,
        &Event::Ready {
            message: "Graph validator ready".into(),
        },
    )?;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event = handle_line(&line);
        if let Event::Error { message } = &event {
            warn!(%message, "request failed");
        }
        emit(&mut writer, &event)?;
    }
    Ok(())
}

fn emit<W: Write>(writer: &mut W, event: &Event) -> io::Result<()> {
    writeln!(writer, "{}", serde_json::to_string(event)?)?;
    writer.flush()
}
