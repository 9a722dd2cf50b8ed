//! Drives a full build: seed triangle, breadth-first expansion to the target
//! depth, then a stable per-frame walk over the leaf triangles.

use bevy::prelude::*;

use super::error::{TerrainError, TerrainResult};
use super::queue::WorkQueue;
use super::subdivision::{SubdivisionEngine, Triangle};

/// Deepest subdivision accepted by [`Terrain::generate`].
pub const MAX_DEPTH: u32 = 8;

/// Inputs for one mesh build.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainSettings {
    pub corners: [Vec2; 3],
    pub depth: u32,
    pub roughness: f32,
    pub seed: u64,
}

/// Counts shown by the UI and logged after each build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshStats {
    pub points: usize,
    pub edges: usize,
    pub triangles: usize,
    pub cached_midpoints: usize,
    pub shared_midpoints: usize,
}

/// Number of internal nodes in a complete 4-ary tree of the given depth,
/// `(4^depth - 1) / 3`.
pub fn expansion_steps(depth: u32) -> TerrainResult<usize> {
    if depth > MAX_DEPTH {
        return Err(TerrainError::DepthTooLarge {
            depth,
            max: MAX_DEPTH,
        });
    }
    Ok((4usize.pow(depth) - 1) / 3)
}

pub struct Terrain {
    engine: SubdivisionEngine,
    queue: WorkQueue<Triangle>,
    settings: TerrainSettings,
}

impl Terrain {
    /// Build the mesh described by `settings`.
    ///
    /// Dequeues exactly [`expansion_steps`] triangles, each replaced by its four
    /// children at the back of the queue, which leaves `4^depth` leaves.
    pub fn generate(settings: TerrainSettings) -> TerrainResult<Self> {
        let steps = expansion_steps(settings.depth)?;
        let mut engine = SubdivisionEngine::new(settings.roughness, settings.seed)?;

        let root = engine.seed_triangle(settings.corners)?;
        debug!("seed triangle {}", root);
        for id in root.vertices() {
            let summary = engine.graph().describe(id)?;
            debug!("{}", summary);
        }

        let mut queue = WorkQueue::with_capacity(4usize.pow(settings.depth));
        queue.enqueue(root);

        for _ in 0..steps {
            let parent = queue.dequeue()?;
            queue.enqueue_many(engine.subdivide(&parent)?);
        }

        let terrain = Self {
            engine,
            queue,
            settings,
        };
        let stats = terrain.stats();
        debug!(
            "terrain built: {} triangles, {} points, {} edges",
            stats.triangles, stats.points, stats.edges
        );
        Ok(terrain)
    }

    pub fn settings(&self) -> &TerrainSettings {
        &self.settings
    }

    pub fn engine(&self) -> &SubdivisionEngine {
        &self.engine
    }

    pub fn triangles(&self) -> &WorkQueue<Triangle> {
        &self.queue
    }

    /// Hand every leaf triangle's corners to `draw`, in the same order every call.
    pub fn render_pass<F: FnMut([Vec2; 3])>(&mut self, mut draw: F) -> TerrainResult<()> {
        let graph = self.engine.graph();
        let mut failure = None;

        self.queue.rotate_once(|triangle| match triangle.corners(graph) {
            Ok(corners) => draw(corners),
            Err(err) => {
                failure.get_or_insert(err);
            }
        })?;

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn stats(&self) -> MeshStats {
        let graph = self.engine.graph();
        let cache = self.engine.cache();
        MeshStats {
            points: graph.point_count(),
            edges: graph.edge_count(),
            triangles: self.queue.size(),
            cached_midpoints: cache.len(),
            shared_midpoints: cache.hits(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn settings(depth: u32, roughness: f32, seed: u64) -> TerrainSettings {
        TerrainSettings {
            corners: [
                Vec2::new(100.0, 600.0),
                Vec2::new(350.0, 200.0),
                Vec2::new(600.0, 600.0),
            ],
            depth,
            roughness,
            seed,
        }
    }

    #[test]
    fn test_expansion_steps() {
        assert_eq!(expansion_steps(0), Ok(0));
        assert_eq!(expansion_steps(1), Ok(1));
        assert_eq!(expansion_steps(2), Ok(5));
        assert_eq!(expansion_steps(6), Ok(1365));
        assert_eq!(
            expansion_steps(MAX_DEPTH + 1),
            Err(TerrainError::DepthTooLarge {
                depth: MAX_DEPTH + 1,
                max: MAX_DEPTH
            })
        );
    }

    #[test]
    fn test_depth_zero_is_seed_triangle() {
        let terrain = Terrain::generate(settings(0, 0.3, 1)).unwrap();
        let stats = terrain.stats();
        assert_eq!(stats.triangles, 1);
        assert_eq!(stats.points, 3);
        assert_eq!(stats.edges, 3);
    }

    #[test]
    fn test_mesh_counts_match_subdivision_tree() {
        for depth in 0..=4u32 {
            let terrain = Terrain::generate(settings(depth, 0.3, 11)).unwrap();
            let stats = terrain.stats();
            let n = 1usize << depth; // segments per outer side

            assert_eq!(stats.triangles, 4usize.pow(depth));
            // triangular grid with n segments per side
            assert_eq!(stats.points, (n + 1) * (n + 2) / 2);
            assert_eq!(stats.edges, 3 * n * (n + 1) / 2);
            assert!(terrain.engine().graph().is_fully_connected());
        }
    }

    #[test]
    fn test_render_pass_order_is_stable() {
        let mut terrain = Terrain::generate(settings(3, 0.3, 4)).unwrap();

        let mut first = Vec::new();
        terrain.render_pass(|corners| first.push(corners)).unwrap();
        let mut second = Vec::new();
        terrain.render_pass(|corners| second.push(corners)).unwrap();

        assert_eq!(first.len(), 64);
        assert_eq!(first, second);
    }

    #[test]
    fn test_same_seed_same_mesh() {
        let mut a = Terrain::generate(settings(4, 0.6, 77)).unwrap();
        let mut b = Terrain::generate(settings(4, 0.6, 77)).unwrap();

        let mut corners_a = Vec::new();
        a.render_pass(|c| corners_a.push(c)).unwrap();
        let mut corners_b = Vec::new();
        b.render_pass(|c| corners_b.push(c)).unwrap();
        assert_eq!(corners_a, corners_b);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(matches!(
            Terrain::generate(settings(2, -1.0, 0)),
            Err(TerrainError::InvalidRoughness(_))
        ));
        assert!(matches!(
            Terrain::generate(settings(MAX_DEPTH + 1, 0.3, 0)),
            Err(TerrainError::DepthTooLarge { .. })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_leaf_count_and_connectivity(depth in 0u32..=4, roughness in 0.0f32..1.0, seed in any::<u64>()) {
            let terrain = Terrain::generate(settings(depth, roughness, seed)).unwrap();
            prop_assert_eq!(terrain.triangles().size(), 4usize.pow(depth));
            prop_assert!(terrain.engine().graph().is_fully_connected());
        }
    }
}
