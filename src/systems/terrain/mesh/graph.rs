//! Point arena and the undirected adjacency between points.
//!
//! Points live in a flat arena indexed by their [`PointId`]. Triangles, the
//! midpoint cache and the work queue only ever hold ids, so there are no
//! reference cycles between points and nothing is freed until the graph is.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use bevy::prelude::*;

use super::error::{TerrainError, TerrainResult};

/// Identifier of a point, unique within one [`PointGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub u32);

impl PointId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out monotonically increasing point ids.
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> PointId {
        let id = PointId(self.next);
        self.next += 1;
        id
    }

    /// Start counting from zero again.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}

/// A mesh vertex. The position never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub id: PointId,
    pub position: Vec2,
}

#[derive(Debug, Default)]
pub struct PointGraph {
    points: Vec<Point>,
    adjacency: Vec<BTreeSet<PointId>>,
    ids: IdAllocator,
}

impl PointGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unconnected point and return its id.
    pub fn add_point(&mut self, position: Vec2) -> PointId {
        let id = self.ids.next_id();
        debug_assert_eq!(id.index(), self.points.len());
        self.points.push(Point { id, position });
        self.adjacency.push(BTreeSet::new());
        id
    }

    /// Drop every point and edge and restart id allocation.
    pub fn clear(&mut self) {
        self.points.clear();
        self.adjacency.clear();
        self.ids.reset();
    }

    pub fn point(&self, id: PointId) -> TerrainResult<&Point> {
        self.points
            .get(id.index())
            .ok_or(TerrainError::UnknownPoint(id))
    }

    pub fn position(&self, id: PointId) -> TerrainResult<Vec2> {
        self.point(id).map(|p| p.position)
    }

    /// Ids adjacent to `id`, in ascending order.
    pub fn neighbours(&self, id: PointId) -> TerrainResult<&BTreeSet<PointId>> {
        self.adjacency
            .get(id.index())
            .ok_or(TerrainError::UnknownPoint(id))
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Add the edge `a`–`b`. Re-connecting an existing edge is a no-op.
    pub fn connect(&mut self, a: PointId, b: PointId) -> TerrainResult<()> {
        if a == b {
            return Err(TerrainError::SelfConnection(a));
        }
        self.point(a)?;
        self.point(b)?;

        self.adjacency[a.index()].insert(b);
        self.adjacency[b.index()].insert(a);
        Ok(())
    }

    /// Remove the edge `a`–`b` from both sides.
    pub fn disconnect(&mut self, a: PointId, b: PointId) -> TerrainResult<()> {
        if !self.is_connected(a, b) {
            return Err(TerrainError::NoSuchEdge(a, b));
        }

        self.adjacency[a.index()].remove(&b);
        self.adjacency[b.index()].remove(&a);
        Ok(())
    }

    /// Unknown ids are simply reported as not connected.
    pub fn is_connected(&self, a: PointId, b: PointId) -> bool {
        self.adjacency
            .get(a.index())
            .is_some_and(|set| set.contains(&b))
    }

    /// True when every point can reach every other point through edges.
    /// An empty graph counts as connected.
    pub fn is_fully_connected(&self) -> bool {
        let Some(first) = self.points.first() else {
            return true;
        };

        let mut seen = vec![false; self.points.len()];
        let mut frontier = VecDeque::from([first.id]);
        seen[first.id.index()] = true;
        let mut reached = 1;

        while let Some(id) = frontier.pop_front() {
            for &next in &self.adjacency[id.index()] {
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    reached += 1;
                    frontier.push_back(next);
                }
            }
        }

        reached == self.points.len()
    }

    /// Printable summary of one point and its connections.
    pub fn describe(&self, id: PointId) -> TerrainResult<PointSummary<'_>> {
        Ok(PointSummary {
            point: self.point(id)?,
            neighbours: self.neighbours(id)?,
        })
    }
}

pub struct PointSummary<'a> {
    point: &'a Point,
    neighbours: &'a BTreeSet<PointId>,
}

impl fmt::Display for PointSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let connections = self
            .neighbours
            .iter()
            .map(PointId::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Point(ID: {}, Coordinates: [{}, {}], Connections: [{}])",
            self.point.id, self.point.position.x, self.point.position.y, connections
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(n: usize) -> (PointGraph, Vec<PointId>) {
        let mut graph = PointGraph::new();
        let ids = (0..n)
            .map(|i| graph.add_point(Vec2::new(i as f32, 0.0)))
            .collect();
        (graph, ids)
    }

    #[test]
    fn test_ids_are_monotonic() {
        let (graph, ids) = graph_with(3);
        assert_eq!(ids, vec![PointId(0), PointId(1), PointId(2)]);
        assert_eq!(graph.point_count(), 3);
    }

    #[test]
    fn test_connect_is_symmetric_and_idempotent() {
        let (mut graph, ids) = graph_with(2);
        graph.connect(ids[0], ids[1]).unwrap();
        assert!(graph.is_connected(ids[0], ids[1]));
        assert!(graph.is_connected(ids[1], ids[0]));

        graph.connect(ids[1], ids[0]).unwrap();
        assert_eq!(graph.neighbours(ids[0]).unwrap().len(), 1);
        assert_eq!(graph.neighbours(ids[1]).unwrap().len(), 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_self_connection_rejected() {
        let (mut graph, ids) = graph_with(1);
        assert_eq!(
            graph.connect(ids[0], ids[0]),
            Err(TerrainError::SelfConnection(ids[0]))
        );
        assert!(graph.neighbours(ids[0]).unwrap().is_empty());
    }

    #[test]
    fn test_connect_unknown_point() {
        let (mut graph, ids) = graph_with(1);
        assert_eq!(
            graph.connect(ids[0], PointId(9)),
            Err(TerrainError::UnknownPoint(PointId(9)))
        );
    }

    #[test]
    fn test_disconnect() {
        let (mut graph, ids) = graph_with(3);
        graph.connect(ids[0], ids[1]).unwrap();
        graph.disconnect(ids[1], ids[0]).unwrap();
        assert!(!graph.is_connected(ids[0], ids[1]));
        assert!(!graph.is_connected(ids[1], ids[0]));

        assert_eq!(
            graph.disconnect(ids[0], ids[1]),
            Err(TerrainError::NoSuchEdge(ids[0], ids[1]))
        );
        assert_eq!(
            graph.disconnect(ids[0], ids[2]),
            Err(TerrainError::NoSuchEdge(ids[0], ids[2]))
        );
    }

    #[test]
    fn test_full_connectivity() {
        let (mut graph, ids) = graph_with(4);
        graph.connect(ids[0], ids[1]).unwrap();
        graph.connect(ids[2], ids[3]).unwrap();
        assert!(!graph.is_fully_connected());

        graph.connect(ids[1], ids[2]).unwrap();
        assert!(graph.is_fully_connected());
        assert!(PointGraph::new().is_fully_connected());
    }

    #[test]
    fn test_clear_resets_ids() {
        let (mut graph, _) = graph_with(5);
        graph.clear();
        assert_eq!(graph.point_count(), 0);
        assert_eq!(graph.add_point(Vec2::ZERO), PointId(0));
    }

    #[test]
    fn test_describe() {
        let (mut graph, ids) = graph_with(3);
        graph.connect(ids[1], ids[0]).unwrap();
        graph.connect(ids[1], ids[2]).unwrap();
        let text = graph.describe(ids[1]).unwrap().to_string();
        assert_eq!(text, "Point(ID: 1, Coordinates: [1, 0], Connections: [0, 2])");
    }
}
