// this is the entry point for the terrain plugin
use bevy::prelude::*;

use crate::config::*;

pub mod mesh;

use self::mesh::{MeshStats, Terrain, TerrainResult, TerrainSettings};

// resources
#[derive(Resource)]
pub struct Seed(pub u64);

// the built mesh; the queue inside is rotated once per frame
#[derive(Resource)]
pub struct TerrainMesh(pub Terrain);

// Event for regeneration
#[derive(Event)]
pub struct RegenerateEvent {
    pub seed: u64,
}

// terrain generation parameters
#[derive(Resource, Clone, PartialEq, Debug)]
pub struct Params {
    pub depth: u32,
    pub roughness: f32,
    pub seed_vertices: [Vec2; 3],
}

impl Default for Params {
    fn default() -> Self {
        Self {
            depth: DEPTH,
            roughness: ROUGHNESS,
            seed_vertices: SEED_VERTICES,
        }
    }
}

impl Params {
    pub fn settings(&self, seed: u64) -> TerrainSettings {
        TerrainSettings {
            corners: self.seed_vertices,
            depth: self.depth,
            roughness: self.roughness,
            seed,
        }
    }
}

/// Build a fresh mesh from `params`, logging the outcome.
pub fn build_terrain(params: &Params, seed: u64) -> TerrainResult<Terrain> {
    let terrain = Terrain::generate(params.settings(seed))?;
    let MeshStats { points, triangles, .. } = terrain.stats();
    info!(
        "generated terrain: depth {}, roughness {:.2}, seed {} -> {} triangles over {} points",
        params.depth, params.roughness, seed, triangles, points
    );
    Ok(terrain)
}

// main plugin for terrain generation
pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app
            .insert_resource(Seed(INITIAL_SEED))
            .insert_resource(Params::default())
            .add_event::<RegenerateEvent>()
            .add_systems(Startup, generate_initial)
            .add_systems(Update, (handle_regeneration, draw_terrain).chain());
    }
}

fn generate_initial(
    mut commands: Commands,
    seed: Res<Seed>,
    params: Res<Params>,
) {
    match build_terrain(&params, seed.0) {
        Ok(terrain) => {
            commands.insert_resource(TerrainMesh(terrain));
        }
        Err(e) => error!("Terrain generation failed: {}", e),
    }
}

// rebuilds the whole mesh; a failed build keeps the previous one on screen
pub fn handle_regeneration(
    mut commands: Commands,
    mut events: EventReader<RegenerateEvent>,
    mut seed: ResMut<Seed>,
    params: Res<Params>,
) {
    // only the latest request matters
    let Some(event) = events.read().last() else {
        return;
    };

    match build_terrain(&params, event.seed) {
        Ok(terrain) => {
            seed.0 = event.seed;
            commands.insert_resource(TerrainMesh(terrain));
        }
        Err(e) => error!("Terrain regeneration failed: {}", e),
    }
}

// steady-state pass: every leaf triangle is drawn once per frame, same order each time
fn draw_terrain(
    mut gizmos: Gizmos,
    mesh: Option<ResMut<TerrainMesh>>,
) {
    let Some(mut mesh) = mesh else {
        return;
    };

    let result = mesh.0.render_pass(|[a, b, c]| {
        gizmos.linestrip_2d(
            [a, b, c, a].map(screen_to_world),
            OUTLINE_COLOR,
        );
    });

    if let Err(e) = result {
        error!("Terrain render pass failed: {}", e);
    }
}
