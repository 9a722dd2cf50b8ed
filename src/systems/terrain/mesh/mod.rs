// mesh-subdivision engine, independent of the bevy schedule

pub mod displacement;
pub mod error;
pub mod graph;
pub mod midpoint;
pub mod queue;
pub mod subdivision;
pub mod terrain;

pub use error::{TerrainError, TerrainResult};
pub use graph::{PointGraph, PointId};
pub use subdivision::{SubdivisionEngine, Triangle};
pub use terrain::{MeshStats, Terrain, TerrainSettings};
