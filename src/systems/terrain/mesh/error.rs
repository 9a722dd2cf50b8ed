//! Error types for mesh construction and traversal.

use thiserror::Error;

use super::graph::PointId;

/// Errors raised while building or walking the terrain mesh.
///
/// None of these are retried: they mean either malformed input geometry
/// or a bookkeeping bug in the caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TerrainError {
    /// A point was asked to connect to itself.
    #[error("point {0} cannot be connected to itself")]
    SelfConnection(PointId),

    /// Tried to remove an edge that is not in the graph.
    #[error("no edge between points {0} and {1}")]
    NoSuchEdge(PointId, PointId),

    /// Midpoint requested for a pair that is neither connected nor cached.
    #[error("points {0} and {1} are not connected and have no cached midpoint")]
    DisconnectedEdge(PointId, PointId),

    /// Zero-length segment, the perpendicular direction is undefined.
    #[error("degenerate segment: start and end are both at ({x}, {y})")]
    DegenerateSegment {
        /// Shared x coordinate.
        x: f32,
        /// Shared y coordinate.
        y: f32,
    },

    /// A coordinate with the wrong number of components reached the displacement rule.
    #[error("expected a 2D coordinate, got {0} components")]
    InvalidDimension(usize),

    /// Dequeue on an empty work queue.
    #[error("dequeue from an empty work queue")]
    EmptyQueue,

    /// Identifier not allocated by this graph.
    #[error("unknown point {0}")]
    UnknownPoint(PointId),

    /// Roughness must be finite and non-negative.
    #[error("invalid roughness {0} (must be finite and >= 0)")]
    InvalidRoughness(f32),

    /// Requested depth is above the supported maximum.
    #[error("subdivision depth {depth} exceeds maximum {max}")]
    DepthTooLarge {
        /// Requested depth.
        depth: u32,
        /// Largest accepted depth.
        max: u32,
    },
}

/// Result type for terrain operations.
pub type TerrainResult<T> = std::result::Result<T, TerrainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TerrainError::SelfConnection(PointId(3));
        assert_eq!(format!("{err}"), "point 3 cannot be connected to itself");

        let err = TerrainError::DisconnectedEdge(PointId(1), PointId(7));
        let display = format!("{err}");
        assert!(display.contains('1'));
        assert!(display.contains('7'));

        let err = TerrainError::DepthTooLarge { depth: 12, max: 8 };
        let display = format!("{err}");
        assert!(display.contains("12"));
        assert!(display.contains('8'));
    }
}
