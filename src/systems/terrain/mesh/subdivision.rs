use std::fmt;

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::error::{TerrainError, TerrainResult};
use super::graph::{PointGraph, PointId};
use super::midpoint::MidpointCache;

/// Three connected points. Never mutated once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub a: PointId,
    pub b: PointId,
    pub c: PointId,
}

impl Triangle {
    /// Build a triangle, adding any of the edges A–B, A–C, B–C that are missing.
    pub fn new(graph: &mut PointGraph, a: PointId, b: PointId, c: PointId) -> TerrainResult<Self> {
        graph.connect(a, b)?;
        graph.connect(a, c)?;
        graph.connect(b, c)?;
        Ok(Self { a, b, c })
    }

    pub fn vertices(&self) -> [PointId; 3] {
        [self.a, self.b, self.c]
    }

    /// Vertex positions in construction order.
    pub fn corners(&self, graph: &PointGraph) -> TerrainResult<[Vec2; 3]> {
        Ok([
            graph.position(self.a)?,
            graph.position(self.b)?,
            graph.position(self.c)?,
        ])
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vertex 1: {}, Vertex 2: {}, Vertex 3: {}",
            self.a, self.b, self.c
        )
    }
}

/// Owns the mesh graph, the midpoint cache and the random source for one
/// construction run.
pub struct SubdivisionEngine {
    graph: PointGraph,
    cache: MidpointCache,
    rng: StdRng,
    roughness: f32,
}

impl SubdivisionEngine {
    pub fn new(roughness: f32, seed: u64) -> TerrainResult<Self> {
        if !roughness.is_finite() || roughness < 0.0 {
            return Err(TerrainError::InvalidRoughness(roughness));
        }

        Ok(Self {
            graph: PointGraph::new(),
            cache: MidpointCache::new(),
            rng: StdRng::seed_from_u64(seed),
            roughness,
        })
    }

    pub fn graph(&self) -> &PointGraph {
        &self.graph
    }

    pub fn cache(&self) -> &MidpointCache {
        &self.cache
    }

    /// Create the three seed vertices and the root triangle joining them.
    pub fn seed_triangle(&mut self, corners: [Vec2; 3]) -> TerrainResult<Triangle> {
        let [a, b, c] = corners.map(|corner| self.graph.add_point(corner));
        Triangle::new(&mut self.graph, a, b, c)
    }

    /// Split `triangle` into three corner triangles and the medial one.
    ///
    /// Children are `(D, B, E)`, `(A, D, F)`, `(F, E, C)`, `(D, E, F)` where
    /// D, E, F are the midpoints of A–B, B–C and A–C. Midpoints already made by
    /// a neighbour across a shared edge are reused.
    pub fn subdivide(&mut self, triangle: &Triangle) -> TerrainResult<[Triangle; 4]> {
        let Triangle { a, b, c } = *triangle;

        let d = self.midpoint(a, b)?;
        let e = self.midpoint(b, c)?;
        let f = self.midpoint(a, c)?;

        Ok([
            Triangle::new(&mut self.graph, d, b, e)?,
            Triangle::new(&mut self.graph, a, d, f)?,
            Triangle::new(&mut self.graph, f, e, c)?,
            Triangle::new(&mut self.graph, d, e, f)?,
        ])
    }

    fn midpoint(&mut self, a: PointId, b: PointId) -> TerrainResult<PointId> {
        self.cache
            .get_or_create(&mut self.graph, a, b, self.roughness, &mut self.rng)
    }

    /// Forget the mesh and start ids from zero again. The random stream is kept.
    pub fn reset(&mut self) {
        self.graph.clear();
        self.cache.clear();
    }
}
