// Configuration file, all coordinates in screen pixels (origin top-left, y down)
// This controls the initial generation parameter settings

use bevy::prelude::*;

// Window
pub const WINDOW_TITLE: &str = "Terrain Visualization";
pub const SCREEN_WIDTH: f32 = 700.0;
pub const SCREEN_HEIGHT: f32 = 700.0;
pub const FRAME_RATE: f64 = 10.0;  // redraws per second

// Colors
pub const BACKGROUND_COLOR: Color = Color::WHITE;
pub const OUTLINE_COLOR: Color = Color::BLACK;

// Seed triangle (screen space)
pub const SEED_VERTICES: [Vec2; 3] = [
    Vec2::new(100.0, 600.0),
    Vec2::new(350.0, 200.0),
    Vec2::new(600.0, 600.0),
];

pub const INITIAL_SEED: u64 = 1512086461918454205;

// Subdivision parameters
pub const DEPTH: u32 = 6;          // leaves = 4^depth
pub const ROUGHNESS: f32 = 0.3;    // fraction of the edge-length displacement bound

/// Maps a screen-space point onto the centered, y-up 2D camera.
pub fn screen_to_world(point: Vec2) -> Vec2 {
    Vec2::new(point.x - SCREEN_WIDTH * 0.5, SCREEN_HEIGHT * 0.5 - point.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_world() {
        assert_eq!(screen_to_world(Vec2::new(350.0, 350.0)), Vec2::ZERO);
        assert_eq!(screen_to_world(Vec2::ZERO), Vec2::new(-350.0, 350.0));
        assert_eq!(screen_to_world(Vec2::new(700.0, 700.0)), Vec2::new(350.0, -350.0));
    }
}
