// one shared midpoint per edge, so neighbouring triangles stitch together

use std::collections::HashMap;

use bevy::prelude::*;
use rand::Rng;

use super::displacement::displaced_midpoint;
use super::error::{TerrainError, TerrainResult};
use super::graph::{PointGraph, PointId};

/// Unordered pair of endpoint ids, smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey(PointId, PointId);

impl EdgeKey {
    pub fn new(a: PointId, b: PointId) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }
}

#[derive(Debug, Default)]
pub struct MidpointCache {
    entries: HashMap<EdgeKey, PointId>,
    hits: usize,
}

impl MidpointCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the midpoint of edge `a`–`b`, creating it on first request.
    ///
    /// A miss requires the edge to exist. The new point is connected to both
    /// endpoints and the edge `a`–`b` itself is removed. A hit returns the
    /// stored point without looking at the graph: the edge is already gone by
    /// then, consumed by whichever triangle asked first.
    ///
    /// # Errors
    ///
    /// `DisconnectedEdge` on a miss for an unconnected pair, plus anything
    /// raised by the displacement rule.
    pub fn get_or_create<R: Rng>(
        &mut self,
        graph: &mut PointGraph,
        a: PointId,
        b: PointId,
        roughness: f32,
        rng: &mut R,
    ) -> TerrainResult<PointId> {
        let key = EdgeKey::new(a, b);
        if let Some(&midpoint) = self.entries.get(&key) {
            self.hits += 1;
            trace!("midpoint cache hit {:?} -> {}", key, midpoint);
            return Ok(midpoint);
        }

        if !graph.is_connected(a, b) {
            return Err(TerrainError::DisconnectedEdge(a, b));
        }

        let start = graph.position(a)?;
        let end = graph.position(b)?;
        let position = displaced_midpoint(&start.to_array(), &end.to_array(), roughness, rng)?;

        let midpoint = graph.add_point(position);
        graph.connect(midpoint, a)?;
        graph.connect(midpoint, b)?;
        graph.disconnect(a, b)?;

        trace!("midpoint cache miss {:?} -> {}", key, midpoint);
        self.entries.insert(key, midpoint);
        Ok(midpoint)
    }

    pub fn get(&self, a: PointId, b: PointId) -> Option<PointId> {
        self.entries.get(&EdgeKey::new(a, b)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
    }
}
