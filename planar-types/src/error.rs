use crate::Coord;
use thiserror::Error;

/// The error kinds surfaced by the engine.
///
/// `Topology` is the only kind recovered internally: the robust overlay
/// wrapper catches it and retries at a progressively coarser precision
/// before propagating. Where available, a topology error carries the
/// coordinate at which the degeneracy was detected.
///
/// `Parse` originates in the external WKT/WKB collaborators; it is defined
/// here so the whole surface shares one error type.
///
/// Allocation failure is not a catchable variant: the library never
/// attempts to recover from out-of-memory.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("topology error: {message}{}", fmt_location(.location))]
    Topology {
        message: String,
        location: Option<Coord>,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("operation interrupted")]
    Interrupted,
}

fn fmt_location(location: &Option<Coord>) -> String {
    match location {
        Some(c) => format!(" at ({} {})", c.x, c.y),
        None => String::new(),
    }
}

impl GeometryError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        GeometryError::InvalidArgument(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        GeometryError::UnsupportedOperation(message.into())
    }

    pub fn topology(message: impl Into<String>) -> Self {
        GeometryError::Topology {
            message: message.into(),
            location: None,
        }
    }

    pub fn topology_at(message: impl Into<String>, location: Coord) -> Self {
        GeometryError::Topology {
            message: message.into(),
            location: Some(location),
        }
    }

    /// `true` for the kind the robust-overlay ladder may retry.
    pub fn is_topology(&self) -> bool {
        matches!(self, GeometryError::Topology { .. })
    }
}

pub type Result<T> = std::result::Result<T, GeometryError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn topology_error_reports_locus() {
        let err = GeometryError::topology_at("found non-noded intersection", Coord::new(1., 2.));
        assert_eq!(
            err.to_string(),
            "topology error: found non-noded intersection at (1 2)"
        );
        assert!(err.is_topology());
    }

    #[test]
    fn invalid_argument_message() {
        let err = GeometryError::invalid_argument("ring must be closed");
        assert_eq!(err.to_string(), "invalid argument: ring must be closed");
        assert!(!err.is_topology());
    }
}
