use crate::contents::NavigationState;
use crate::event::EngineEvent;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::BufRead;

/// One line of a recorded engine trace
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStep {
    /// Update the navigation state the scripted contents report
    Contents(NavigationState),
    /// Deliver an engine event to the delegate
    Event(EngineEvent),
}

/// Errors reading a trace
#[derive(Debug)]
pub enum TraceError {
    Io(std::io::Error),
    Parse { line: usize, message: String },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::Io(e) => write!(f, "failed to read trace: {}", e),
            TraceError::Parse { line, message } => {
                write!(f, "invalid trace step on line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TraceError::Io(e) => Some(e),
            TraceError::Parse { .. } => None,
        }
    }
}

impl From<std::io::Error> for TraceError {
    fn from(e: std::io::Error) -> Self {
        TraceError::Io(e)
    }
}

/// Read a JSON-lines trace. Blank lines and `#` comments are skipped.
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<TraceStep>, TraceError> {
    let mut steps = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let step = serde_json::from_str::<TraceStep>(trimmed).map_err(|e| TraceError::Parse {
            line: index + 1,
            message: e.to_string(),
        })?;
        steps.push(step);
    }

    Ok(steps)
}
