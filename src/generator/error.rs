//! Generation errors

use crate::workload::tables::UnknownValue;
use std::fmt;
use std::io;
use thiserror::Error;

/// Position in the workload hierarchy where a failure happened
///
/// All indices are 0-based. A location without a phase refers to the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Location {
    pub phase: Option<usize>,
    pub thread: Option<usize>,
    pub device: Option<usize>,
}

impl Location {
    pub fn header() -> Self {
        Self::default()
    }

    pub fn phase(phase: usize) -> Self {
        Self {
            phase: Some(phase),
            ..Self::default()
        }
    }

    pub fn thread(self, thread: usize) -> Self {
        Self {
            thread: Some(thread),
            ..self
        }
    }

    pub fn device(self, device: usize) -> Self {
        Self {
            device: Some(device),
            ..self
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(phase) = self.phase else {
            return f.write_str("header");
        };
        write!(f, "phase {}", phase)?;
        if let Some(thread) = self.thread {
            write!(f, ", thread {}", thread)?;
        }
        if let Some(device) = self.device {
            write!(f, ", device {}", device)?;
        }
        Ok(())
    }
}

/// Failure that aborts a generation run
///
/// No variant is recoverable: the partial output must be discarded.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A sampling range that must be non-empty came out empty
    #[error("invalid {field} bound {bound} at {location}")]
    InvalidBound {
        location: Location,
        field: &'static str,
        bound: i64,
    },

    /// An index lookup was asked for a value outside its table
    #[error("unknown enumeration value at {location}: {source}")]
    UnknownEnumerationValue {
        location: Location,
        #[source]
        source: UnknownValue,
    },

    /// The record sink refused a line
    #[error("failed to write record at {location}")]
    Sink {
        location: Location,
        #[source]
        source: io::Error,
    },
}

impl GenerateError {
    /// Where in the workload the failure happened
    pub fn location(&self) -> Location {
        match self {
            GenerateError::InvalidBound { location, .. }
            | GenerateError::UnknownEnumerationValue { location, .. }
            | GenerateError::Sink { location, .. } => *location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        assert_eq!(Location::header().to_string(), "header");
        assert_eq!(Location::phase(4).to_string(), "phase 4");
        assert_eq!(Location::phase(4).thread(2).to_string(), "phase 4, thread 2");
        assert_eq!(
            Location::phase(0).thread(1).device(3).to_string(),
            "phase 0, thread 1, device 3"
        );
    }

    #[test]
    fn test_invalid_bound_message() {
        let err = GenerateError::InvalidBound {
            location: Location::phase(1).thread(5),
            field: "ndev",
            bound: 0,
        };
        assert_eq!(err.to_string(), "invalid ndev bound 0 at phase 1, thread 5");
        assert_eq!(err.location(), Location::phase(1).thread(5));
    }

    #[test]
    fn test_unknown_value_message() {
        let err = GenerateError::UnknownEnumerationValue {
            location: Location::phase(0).thread(0).device(0),
            source: UnknownValue {
                table: "burst_len",
                value: "3".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "unknown enumeration value at phase 0, thread 0, device 0: 3 is not a member of the burst_len table"
        );
    }
}
